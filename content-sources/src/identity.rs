//! Tenant identity extracted from the `x-rh-identity` header
//!
//! The header carries base64-encoded JSON:
//!
//! ```json
//! {"identity": {"account_number": "0000", "internal": {"org_id": "1111"}}}
//! ```
//!
//! The gateway in front of the service is trusted to have authenticated the
//! caller; the header is decoded, not verified.
//!
//! # Example
//!
//! ```rust,ignore
//! use content_sources::identity::Identity;
//!
//! async fn handler(identity: Identity) -> String {
//!     identity.org_id
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::handlers::{ApiError, ApiErrorKind, ApiOperation};

/// Name of the identity header
pub const IDENTITY_HEADER: &str = "x-rh-identity";

/// Caller tenant resolved from the identity header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Account number of the caller
    pub account_number: String,
    /// Organization the caller belongs to
    pub org_id: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct IdentityHeader {
    identity: IdentityBody,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct IdentityBody {
    #[serde(default)]
    account_number: String,
    #[serde(default)]
    internal: Internal,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Internal {
    #[serde(default)]
    org_id: String,
}

impl Identity {
    /// Create an identity
    pub fn new(account_number: impl Into<String>, org_id: impl Into<String>) -> Self {
        Self {
            account_number: account_number.into(),
            org_id: org_id.into(),
        }
    }

    /// Decode an identity from the raw header value
    ///
    /// # Errors
    ///
    /// Returns a bad request error when the value is not base64, not the
    /// expected JSON document, or carries an empty `org_id`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use content_sources::identity::Identity;
    ///
    /// let identity = Identity::new("0000", "1111");
    /// let decoded = Identity::decode(&identity.encode()).unwrap();
    /// assert_eq!(decoded, identity);
    ///
    /// assert!(Identity::decode("not base64!").is_err());
    /// ```
    pub fn decode(raw: &str) -> Result<Self, ApiError> {
        let bytes = STANDARD.decode(raw.trim()).map_err(|e| {
            ApiError::bad_request(
                ApiOperation::Authenticate,
                format!("Error decoding identity: {}", e),
            )
        })?;

        let header: IdentityHeader = serde_json::from_slice(&bytes).map_err(|e| {
            ApiError::bad_request(
                ApiOperation::Authenticate,
                format!("Error parsing identity: {}", e),
            )
        })?;

        if header.identity.internal.org_id.is_empty() {
            return Err(ApiError::bad_request(
                ApiOperation::Authenticate,
                "Identity is missing an org_id",
            ));
        }

        Ok(Self {
            account_number: header.identity.account_number,
            org_id: header.identity.internal.org_id,
        })
    }

    /// Encode this identity as a header value
    pub fn encode(&self) -> String {
        let header = IdentityHeader {
            identity: IdentityBody {
                account_number: self.account_number.clone(),
                internal: Internal {
                    org_id: self.org_id.clone(),
                },
            },
        };
        // Serializing plain strings cannot fail
        let json = serde_json::to_vec(&header).unwrap_or_default();
        STANDARD.encode(json)
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(IDENTITY_HEADER)
            .ok_or_else(|| ApiError::unauthorized("Missing x-rh-identity header"))?;

        let raw = value.to_str().map_err(|_| {
            ApiError::new(
                ApiOperation::Authenticate,
                ApiErrorKind::BadRequest,
                "Identity header is not valid ASCII",
            )
        })?;

        let identity = Self::decode(raw)?;
        tracing::debug!(org_id = %identity.org_id, "Resolved caller identity");
        Ok(identity)
    }
}
