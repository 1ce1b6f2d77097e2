use std::sync::Arc;

use tracing::{debug, info};

use hoctap_core::catalog::{self, CatalogSubject};
use hoctap_core::model::{ClassId, ClassRef, SubjectId, SubjectSummary};
use hoctap_core::normalize::fields::first_id;
use hoctap_core::normalize::{
    HEADER_ID_KEYS, normalize_classes, normalize_subjects, resolve_subject_header,
};

use crate::api::{CatalogGateway, StaticCatalog};
use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::subjects::SubjectDetail;

/// Informational empty state for a class without subjects.
pub const EMPTY_SUBJECTS_MESSAGE: &str = "Chưa có môn học cho lớp này.";

/// Classes, subjects and subject detail views.
#[derive(Clone)]
pub struct CatalogService {
    gateway: Arc<dyn CatalogGateway>,
    config: CatalogConfig,
}

impl CatalogService {
    #[must_use]
    pub fn new(gateway: Arc<dyn CatalogGateway>, config: CatalogConfig) -> Self {
        Self { gateway, config }
    }

    #[must_use]
    pub fn config(&self) -> CatalogConfig {
        self.config
    }

    /// Load and normalize the class list.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Classes` if the request fails and
    /// `CatalogError::NoClasses` if the server lists no classes.
    pub async fn load_classes(&self) -> Result<Vec<ClassRef>, CatalogError> {
        let records = self
            .gateway
            .fetch_classes()
            .await
            .map_err(CatalogError::Classes)?;
        let classes = normalize_classes(&records);
        if classes.is_empty() {
            return Err(CatalogError::NoClasses);
        }
        debug!(count = classes.len(), "classes loaded");
        Ok(classes)
    }

    /// Load and normalize the subjects of a class. A blank class id yields an
    /// empty list without a request.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Api` if the request fails.
    pub async fn load_subjects(
        &self,
        class_id: &ClassId,
    ) -> Result<Vec<SubjectSummary>, CatalogError> {
        if class_id.is_blank() {
            return Ok(Vec::new());
        }
        let records = self.gateway.fetch_subjects_by_class(class_id).await?;
        let subjects = normalize_subjects(&records);
        debug!(class = %class_id, count = subjects.len(), "subjects loaded");
        Ok(subjects)
    }

    /// Build the detail view for a subject picked from the list (`passed`)
    /// or addressed by id (`requested`). Chapters are not loaded yet.
    ///
    /// With the static fallback enabled, missing header fields come from the
    /// bundled catalog, and when no id resolves at all the first bundled
    /// subject is opened from the bundled data.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::SubjectUnresolved` if no id resolves and the
    /// static fallback is disabled.
    pub fn open_subject(
        &self,
        passed: Option<&SubjectSummary>,
        requested: Option<&SubjectId>,
    ) -> Result<SubjectDetail, CatalogError> {
        let raw = passed.map(|subject| &subject.raw);
        let requested = requested
            .filter(|id| !id.is_blank())
            .or_else(|| passed.map(|subject| &subject.id).filter(|id| !id.is_blank()));
        let known_id = raw
            .and_then(|record| first_id(record, HEADER_ID_KEYS))
            .or_else(|| requested.map(|id| id.as_str().to_owned()));

        let fallback = self.fallback_subject(known_id.as_deref());
        let header = resolve_subject_header(raw, requested, fallback)
            .ok_or(CatalogError::SubjectUnresolved)?;

        let gateway = if known_id.is_none() {
            info!(subject = %header.id, "no subject id; opening bundled catalog");
            Arc::new(StaticCatalog::new()) as Arc<dyn CatalogGateway>
        } else {
            Arc::clone(&self.gateway)
        };
        Ok(SubjectDetail::new(header, gateway))
    }

    fn fallback_subject(&self, id: Option<&str>) -> Option<&'static CatalogSubject> {
        if !self.config.static_fallback {
            return None;
        }
        Some(
            id.and_then(catalog::subject_by_id)
                .unwrap_or_else(catalog::default_subject),
        )
    }
}
