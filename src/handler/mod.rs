//! Request handler module
//!
//! Responsible for method validation, route dispatch and the fallback that
//! turns unexpected failures into a generic 500.

pub mod fallback;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
