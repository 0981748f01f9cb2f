//! Pluggable pipeline seams (request visitors, rate limiting).
//!
//! Both contracts are consulted by the [`Pipeline`](crate::pipeline::Pipeline) before a request
//! reaches the transport. Built-in implementations cover authorization, default headers, and a
//! per-second ceiling; downstream crates can add their own without touching the pipeline.

pub mod rate_limit;
pub mod request_visitor;

pub use rate_limit::*;
pub use request_visitor::*;
