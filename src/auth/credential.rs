//! Bearer credential produced by a [`TokenSource`](crate::auth::TokenSource) and its redacted
//! secret.

// crates.io
use http::HeaderValue;
// self
use crate::{_prelude::*, error::CredentialError};

/// Token scheme plus secret value, rendered as `Authorization: <token_type> <access_token>`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
	/// Scheme name, e.g. `Bearer` or `token`.
	pub token_type: String,
	/// Access token secret; callers must avoid logging it.
	pub access_token: TokenSecret,
}
impl Credential {
	/// Creates a credential from a scheme name and secret value.
	pub fn new(token_type: impl Into<String>, access_token: impl Into<String>) -> Self {
		Self { token_type: token_type.into(), access_token: TokenSecret::new(access_token) }
	}

	/// Convenience constructor for the `Bearer` scheme.
	pub fn bearer(access_token: impl Into<String>) -> Self {
		Self::new("Bearer", access_token)
	}

	/// Renders the `Authorization` header value, marked sensitive so `http` redacts it in
	/// `Debug` output. Blank secrets are rejected.
	pub fn header_value(&self) -> Result<HeaderValue, CredentialError> {
		if self.access_token.is_blank() {
			return Err(CredentialError::InvalidHeader);
		}

		let mut value =
			HeaderValue::from_str(&format!("{} {}", self.token_type, self.access_token.expose()))
				.map_err(|_| CredentialError::InvalidHeader)?;

		value.set_sensitive(true);

		Ok(value)
	}
}
impl Debug for Credential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credential")
			.field("token_type", &self.token_type)
			.field("access_token", &"<redacted>")
			.finish()
	}
}

/// Access token that never prints itself.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Raw token value. Keep it out of logs.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Whether the secret is empty once whitespace is trimmed.
	pub fn is_blank(&self) -> bool {
		self.0.trim().is_empty()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("TokenSecret(<redacted>)")
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn header_value_joins_scheme_and_token() {
		let credential = Credential::new("token", "abc123");
		let value = credential.header_value().expect("Credential should render as a header.");

		assert_eq!(value.to_str().expect("Header should be ASCII."), "token abc123");
		assert!(value.is_sensitive());
	}

	#[test]
	fn header_value_rejects_control_characters() {
		let credential = Credential::bearer("line\nbreak");

		assert!(matches!(credential.header_value(), Err(CredentialError::InvalidHeader)));
	}

	#[test]
	fn header_value_rejects_blank_tokens() {
		let credential = Credential::new("token", "  ");

		assert!(matches!(credential.header_value(), Err(CredentialError::InvalidHeader)));
	}

	#[test]
	fn secret_formatters_redact() {
		let secret = TokenSecret::new("ghp_fixture");

		assert_eq!(format!("{secret:?}"), "TokenSecret(<redacted>)");
		assert_eq!(secret.to_string(), "<redacted>");
		assert_eq!(secret.expose(), "ghp_fixture");
	}

	#[test]
	fn debug_output_redacts_access_token() {
		let rendered = format!("{:?}", Credential::bearer("ghp_secret"));

		assert!(rendered.contains("Bearer"));
		assert!(!rendered.contains("ghp_secret"));
	}
}
