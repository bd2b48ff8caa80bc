//! Boolean combination of child filter results.
//!
//! Children are evaluated strictly in order. OR and XOR fold each child
//! result into an accumulator that starts empty. NOT subtracts each child's
//! result from the composite's own input, recomputed from that same base on
//! every child, so with several NOT children the last one decides the
//! result. AND has no evaluation rule and is refused at configuration time.

use super::{Filter, FilterParams};
use crate::compute::cellset;
use crate::error::{ConfigError, HexsieveError, Result};
use hexsieve_types::{CellId, LogicalOperator};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeParams {
    pub operator: LogicalOperator,
}

impl CompositeParams {
    pub fn new(operator: LogicalOperator) -> Self {
        Self { operator }
    }
}

/// A filter whose result combines its children's results with a
/// [`LogicalOperator`].
#[derive(Debug, Default)]
pub struct CompositeFilter {
    operator: Option<LogicalOperator>,
    children: Vec<Box<dyn Filter>>,
    input: Option<Vec<CellId>>,
}

impl CompositeFilter {
    pub const KIND: &'static str = "composite";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn operator(&self) -> Option<LogicalOperator> {
        self.operator
    }

    pub fn children(&self) -> &[Box<dyn Filter>] {
        &self.children
    }
}

impl Filter for CompositeFilter {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn configure(&mut self, params: FilterParams) -> Result<(), ConfigError> {
        let FilterParams::Composite(CompositeParams { operator }) = params else {
            return Err(params.mismatch(Self::KIND));
        };
        match operator {
            LogicalOperator::And => return Err(ConfigError::UnsupportedOperator(operator)),
            LogicalOperator::Or | LogicalOperator::Not | LogicalOperator::Xor => {}
        }

        self.operator = Some(operator);
        Ok(())
    }

    fn set_input(&mut self, cells: Vec<CellId>) {
        for child in &mut self.children {
            child.set_input(cells.clone());
        }
        self.input = Some(cells);
    }

    fn process(&self) -> Result<Vec<CellId>> {
        let operator = self.operator.ok_or(HexsieveError::NotReady {
            filter: Self::KIND,
            missing: "configuration",
        })?;
        if self.children.is_empty() {
            return Ok(Vec::new());
        }

        let base: &[CellId] = match operator {
            LogicalOperator::Not => self.input.as_deref().ok_or(HexsieveError::NotReady {
                filter: Self::KIND,
                missing: "input",
            })?,
            _ => &[],
        };

        let mut acc = base.to_vec();
        for child in &self.children {
            let next = child.process()?;
            acc = match operator {
                LogicalOperator::Or => cellset::union(&acc, &next),
                LogicalOperator::Xor => cellset::symmetric_difference(&acc, &next),
                LogicalOperator::Not => cellset::difference(base, &next),
                LogicalOperator::And => {
                    return Err(ConfigError::UnsupportedOperator(operator).into());
                }
            };
            log::trace!("{} after {}: {} cells", operator, child.kind(), acc.len());
        }

        Ok(acc)
    }

    fn describe(&self) -> String {
        let operator = self
            .operator
            .map_or_else(|| "unconfigured".to_string(), |op| op.to_string());
        let children = self
            .children
            .iter()
            .map(|child| format!("{}: {}", child.kind(), child.describe()))
            .collect::<Vec<_>>()
            .join(",");
        format!("{}[{}]", operator, children)
    }

    fn add_filter(&mut self, mut child: Box<dyn Filter>) -> Result<(), ConfigError> {
        if let Some(input) = &self.input {
            child.set_input(input.clone());
        }
        self.children.push(child);
        Ok(())
    }
}
