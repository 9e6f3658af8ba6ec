//! Repository record types exchanged over the API

use serde::{Deserialize, Serialize};

/// Version and architecture value meaning "applies to all"
pub const ANY: &str = "any";

/// Request body for creating or updating a repository
///
/// Every field is optional so the same type serves full and partial updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRequest {
    /// UUID of the repository (ignored on write)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    /// Display name, unique per organization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Repository URL, unique per organization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Distribution versions the repository serves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution_versions: Option<Vec<String>>,

    /// Distribution architecture the repository serves
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution_arch: Option<String>,

    /// Account owning the repository
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    /// Organization owning the repository
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
}

impl RepositoryRequest {
    /// Fill unset distribution fields with [`ANY`]
    ///
    /// # Example
    ///
    /// ```rust
    /// use content_sources::models::RepositoryRequest;
    ///
    /// let mut request = RepositoryRequest::default();
    /// request.fill_defaults();
    /// assert_eq!(request.distribution_arch.as_deref(), Some("any"));
    /// assert_eq!(request.distribution_versions, Some(vec!["any".to_string()]));
    /// ```
    pub fn fill_defaults(&mut self) {
        if self.distribution_versions.is_none() {
            self.distribution_versions = Some(vec![ANY.to_string()]);
        }
        if self.distribution_arch.is_none() {
            self.distribution_arch = Some(ANY.to_string());
        }
    }

    /// Stamp the caller's tenant onto the request
    pub fn set_tenant(&mut self, account_id: impl Into<String>, org_id: impl Into<String>) {
        self.account_id = Some(account_id.into());
        self.org_id = Some(org_id.into());
    }
}

/// A stored repository as returned by the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryResponse {
    /// UUID of the repository
    pub uuid: String,
    /// Display name
    pub name: String,
    /// Repository URL
    pub url: String,
    /// Distribution versions the repository serves
    pub distribution_versions: Vec<String>,
    /// Distribution architecture the repository serves
    pub distribution_arch: String,
    /// Account owning the repository
    pub account_id: String,
    /// Organization owning the repository
    pub org_id: String,
}
