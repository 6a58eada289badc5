//! Arithmetic module
//!
//! Maps endpoint paths to operations, parses operands from the query string
//! and evaluates them with IEEE 754 double precision.

mod operand;
mod operation;

pub use operand::QueryParams;
pub use operation::Operation;
