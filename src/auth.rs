//! Credentials, redacted secrets, and the token source contract.

pub mod credential;
pub mod source;

pub use credential::*;
pub use source::*;
