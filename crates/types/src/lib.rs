//! # hexsieve-types
//!
//! Core value types shared by the hexsieve filter engine.
//!
//! - **Cells**: [`CellId`], an opaque 64-bit tessellation cell identifier
//! - **Points**: [`GeoPoint`], a latitude/longitude pair with bit-exact equality
//! - **Rings**: [`Ring`] and [`PolygonGroup`], closed boundaries and their holes
//! - **Operators**: [`LogicalOperator`], the set operator of a composite filter
//!
//! All types are serializable with Serde and convert into the `geo` crate's
//! geometric primitives.
//!
//! ## Examples
//!
//! ```rust
//! use hexsieve_types::{GeoPoint, Ring};
//!
//! let square = Ring::new(vec![
//!     GeoPoint::new(0.0, 0.0),
//!     GeoPoint::new(0.0, 1.0),
//!     GeoPoint::new(1.0, 1.0),
//!     GeoPoint::new(1.0, 0.0),
//! ]);
//! assert!(square.contains_point(&GeoPoint::new(0.5, 0.5)));
//! assert!(!square.contains_point(&GeoPoint::new(2.0, 0.5)));
//! ```

pub mod cell;
pub mod operator;
pub mod point;
pub mod ring;

pub use cell::CellId;
pub use operator::LogicalOperator;
pub use point::GeoPoint;
pub use ring::{PolygonGroup, Ring};
