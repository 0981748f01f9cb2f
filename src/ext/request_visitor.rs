//! Request visitors: middleware functions applied to every request before dispatch.
//!
//! Visitors run in registration order and may fail the call outright; a failing visitor stops
//! the chain and no network I/O happens for that request.

// crates.io
use http::{HeaderMap, header::AUTHORIZATION};
// self
use crate::{_prelude::*, auth::TokenSource, transport::ApiRequest};

/// Boxed future returned by [`RequestVisitor::visit`].
pub type VisitFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + 'a + Send>>;

/// Mutates an outbound request before it is handed to the transport.
pub trait RequestVisitor
where
	Self: Send + Sync,
{
	/// Applies the visitor to `request`; returning an error aborts the call.
	fn visit<'a>(&'a self, request: &'a mut ApiRequest) -> VisitFuture<'a>;
}

/// Stamps `Authorization: <token_type> <access_token>` using a fresh credential per request.
#[derive(Clone)]
pub struct AuthorizationVisitor {
	source: Arc<dyn TokenSource>,
}
impl AuthorizationVisitor {
	/// Creates a visitor backed by `source`.
	pub fn new(source: Arc<dyn TokenSource>) -> Self {
		Self { source }
	}
}
impl RequestVisitor for AuthorizationVisitor {
	fn visit<'a>(&'a self, request: &'a mut ApiRequest) -> VisitFuture<'a> {
		Box::pin(async move {
			let credential = self.source.token().await?;

			request.set_header(AUTHORIZATION, credential.header_value()?);

			Ok(())
		})
	}
}
impl Debug for AuthorizationVisitor {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("AuthorizationVisitor(..)")
	}
}

/// Adds a fixed set of headers, leaving values already present on the request untouched.
#[derive(Clone, Debug, Default)]
pub struct DefaultHeadersVisitor(HeaderMap);
impl DefaultHeadersVisitor {
	/// Creates a visitor that applies `headers`.
	pub fn new(headers: HeaderMap) -> Self {
		Self(headers)
	}
}
impl RequestVisitor for DefaultHeadersVisitor {
	fn visit<'a>(&'a self, request: &'a mut ApiRequest) -> VisitFuture<'a> {
		Box::pin(async move {
			for (name, value) in &self.0 {
				if !request.headers.contains_key(name) {
					request.headers.insert(name.clone(), value.clone());
				}
			}

			Ok(())
		})
	}
}
