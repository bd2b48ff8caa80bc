use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Set operator used by a composite filter to fold its children's results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOperator {
    /// Declared for completeness; composite filters reject it.
    And,
    Or,
    Not,
    Xor,
}

impl LogicalOperator {
    pub const ALL: [Self; 4] = [Self::And, Self::Or, Self::Not, Self::Xor];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::Xor => "XOR",
        }
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogicalOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown logical operator: {}", s))
    }
}
