//! Authenticated GitHub REST client with a rate-limited, retrying request pipeline and a
//! TTL-bound disk cache for expensive listing calls.
//!
//! The crate is organised leaf-first:
//!
//! - [`auth`] holds credentials and the [`auth::TokenSource`] contract.
//! - [`ext`] holds the pluggable seams the pipeline consults before dispatch (request visitors and
//!   rate-limit policies).
//! - [`transport`] abstracts the HTTP stack; the default implementation is reqwest-backed.
//! - [`pipeline`] composes visitors, rate limiting, retries, timeouts and debug logging around a
//!   transport.
//! - [`client`] exposes typed GitHub operations on top of the pipeline.
//! - [`cache`] and [`store`] implement the TTL-bound "load or compute" cache.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod ext;
pub mod obs;
pub mod pipeline;
pub mod store;
pub mod transport;
pub mod types;

mod _prelude {
	pub use std::{
		collections::HashMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
		time::Duration as StdDuration,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use http;
#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use httpmock as _;
