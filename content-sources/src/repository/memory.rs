//! In-memory repository store
//!
//! Backs the service binary when no external store is wired in. Records live
//! in a single map guarded by a `tokio` `RwLock`, so validation and insertion
//! happen under one write lock.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::error::RepositoryStoreError;
use super::pagination::{FilterData, PageWindow};
use super::traits::{RepositoryStore, StoreResult};
use crate::models::{RepositoryRequest, RepositoryResponse, ANY};

/// [`RepositoryStore`] kept entirely in process memory
#[derive(Debug, Default)]
pub struct InMemoryRepositoryStore {
    records: RwLock<HashMap<String, RepositoryResponse>>,
}

impl InMemoryRepositoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored repositories across all organizations
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Check if the store holds no repositories
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

fn not_found(uuid: &str) -> RepositoryStoreError {
    RepositoryStoreError::not_found(format!("Could not find repository with UUID {}", uuid))
}

fn required(value: Option<String>, field: &str) -> StoreResult<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(RepositoryStoreError::bad_validation(format!(
            "{} cannot be blank",
            field
        ))),
    }
}

/// Reject a name or URL already used by another repository of the same org
fn ensure_unique(
    records: &HashMap<String, RepositoryResponse>,
    candidate: &RepositoryResponse,
) -> StoreResult<()> {
    let clash = records.values().find(|existing| {
        existing.org_id == candidate.org_id
            && existing.uuid != candidate.uuid
            && (existing.name == candidate.name || existing.url == candidate.url)
    });

    match clash {
        Some(existing) if existing.name == candidate.name => {
            Err(RepositoryStoreError::bad_validation(format!(
                "Repository with name '{}' already belongs to organization",
                candidate.name
            )))
        }
        Some(_) => Err(RepositoryStoreError::bad_validation(format!(
            "Repository with URL '{}' already belongs to organization",
            candidate.url
        ))),
        None => Ok(()),
    }
}

fn matches(record: &RepositoryResponse, filter: &FilterData) -> bool {
    if let Some(ref search) = filter.search {
        let needle = search.to_lowercase();
        if !record.name.to_lowercase().contains(&needle)
            && !record.url.to_lowercase().contains(&needle)
        {
            return false;
        }
    }

    if let Some(ref arch) = filter.arch {
        if &record.distribution_arch != arch {
            return false;
        }
    }

    filter.versions.is_empty()
        || record
            .distribution_versions
            .iter()
            .any(|version| filter.versions.contains(version))
}

#[async_trait]
impl RepositoryStore for InMemoryRepositoryStore {
    async fn create(
        &self,
        org_id: &str,
        request: RepositoryRequest,
    ) -> StoreResult<RepositoryResponse> {
        let record = RepositoryResponse {
            uuid: Uuid::new_v4().to_string(),
            name: required(request.name, "Name")?,
            url: required(request.url, "URL")?,
            distribution_versions: request
                .distribution_versions
                .unwrap_or_else(|| vec![ANY.to_string()]),
            distribution_arch: request.distribution_arch.unwrap_or_else(|| ANY.to_string()),
            account_id: request.account_id.unwrap_or_default(),
            org_id: org_id.to_string(),
        };

        let mut records = self.records.write().await;
        ensure_unique(&records, &record)?;
        records.insert(record.uuid.clone(), record.clone());

        tracing::debug!(org_id, uuid = %record.uuid, "Stored new repository");
        Ok(record)
    }

    async fn update(
        &self,
        org_id: &str,
        uuid: &str,
        request: RepositoryRequest,
    ) -> StoreResult<RepositoryResponse> {
        let mut records = self.records.write().await;

        let mut updated = match records.get(uuid) {
            Some(existing) if existing.org_id == org_id => existing.clone(),
            _ => return Err(not_found(uuid)),
        };

        if request.name.is_some() {
            updated.name = required(request.name, "Name")?;
        }
        if request.url.is_some() {
            updated.url = required(request.url, "URL")?;
        }
        if let Some(versions) = request.distribution_versions {
            updated.distribution_versions = versions;
        }
        if let Some(arch) = request.distribution_arch {
            updated.distribution_arch = arch;
        }

        ensure_unique(&records, &updated)?;
        records.insert(updated.uuid.clone(), updated.clone());

        tracing::debug!(org_id, uuid, "Updated repository");
        Ok(updated)
    }

    async fn fetch(&self, org_id: &str, uuid: &str) -> StoreResult<RepositoryResponse> {
        self.records
            .read()
            .await
            .get(uuid)
            .filter(|record| record.org_id == org_id)
            .cloned()
            .ok_or_else(|| not_found(uuid))
    }

    async fn list(
        &self,
        org_id: &str,
        window: PageWindow,
        filter: &FilterData,
    ) -> StoreResult<(Vec<RepositoryResponse>, u64)> {
        let records = self.records.read().await;

        let mut matching: Vec<&RepositoryResponse> = records
            .values()
            .filter(|record| record.org_id == org_id && matches(record, filter))
            .collect();
        matching.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.uuid.cmp(&b.uuid)));

        let total = matching.len() as u64;
        let skip = usize::try_from(window.offset).unwrap_or(usize::MAX);
        let take = usize::try_from(window.limit).unwrap_or(usize::MAX);
        let page = matching
            .into_iter()
            .skip(skip)
            .take(take)
            .cloned()
            .collect();

        Ok((page, total))
    }

    async fn delete(&self, org_id: &str, uuid: &str) -> StoreResult<()> {
        let mut records = self.records.write().await;

        match records.get(uuid) {
            Some(existing) if existing.org_id == org_id => {
                records.remove(uuid);
                tracing::debug!(org_id, uuid, "Deleted repository");
                Ok(())
            }
            _ => Err(not_found(uuid)),
        }
    }
}
