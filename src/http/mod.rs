//! HTTP protocol layer module
//!
//! Response builders shared by the router, decoupled from the arithmetic.

pub mod response;

// Re-export commonly used types
pub use response::{
    build_404_response, build_405_response, build_500_response, build_error_response,
    build_health_response, build_result_response,
};
