//! HTTP-facing helpers shared by REST modules: RFC 9457 problem responses
//! and short response constructors.

pub mod problem;
pub mod response;
