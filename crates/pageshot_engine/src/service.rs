use std::sync::Arc;

use pageshot_core::{
    artifact_ids, build_args, FieldErrors, JobValidator, RequestOrigin, SchemaError,
    ScreenshotDescriptor, IMAGE_PREFIX,
};
use pageshot_logging::{shot_error, shot_info, shot_warn};
use serde_json::Value;
use thiserror::Error;

use crate::capture::{CaptureTool, ProcessCaptureTool};
use crate::config::EngineConfig;
use crate::store::{ensure_images_dir, ArtifactStore, StoreError};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Error)]
pub enum CreateError {
    #[error("invalid job description ({} field error(s))", .0.len())]
    Validation(FieldErrors),
    #[error("{0}")]
    Capture(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Runs capture jobs end to end: validate, invoke the tool, publish artifacts.
pub struct CaptureService {
    validator: JobValidator,
    store: ArtifactStore,
    tool: Arc<dyn CaptureTool>,
}

impl CaptureService {
    /// Service backed by the external capture process; creates the images directory.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        ensure_images_dir(&config.images_dir)?;
        let tool = Arc::new(ProcessCaptureTool::new(config.capture));
        Self::with_tool(ArtifactStore::new(config.images_dir), tool)
    }

    pub fn with_tool(
        store: ArtifactStore,
        tool: Arc<dyn CaptureTool>,
    ) -> Result<Self, EngineError> {
        Ok(Self {
            validator: JobValidator::new()?,
            store,
            tool,
        })
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Handle one create request. `origin` is used to build each descriptor's href.
    pub async fn create(
        &self,
        body: Option<&Value>,
        origin: &RequestOrigin,
    ) -> Result<Vec<ScreenshotDescriptor>, CreateError> {
        let mut job = self.validator.validate(body).map_err(|errors| {
            shot_warn!("Rejected capture job: {:?}", errors);
            CreateError::Validation(errors)
        })?;

        let id = new_job_id();
        let format = job.effective_format();
        job.format = Some(format);

        // The tool writes into a private staging directory; only a confirmed
        // success moves its files into the listed directory.
        let stem = format!("{IMAGE_PREFIX}{id}");
        let staging = self.store.staging_dir()?;
        let destination = staging.path().join(format!("{stem}.{}", format.extension()));
        job.filename = Some(destination.to_string_lossy().into_owned());

        let args = build_args(&job);
        shot_info!("Capture job {} started: url={} format={}", id, job.url, format);

        let outcome = self.tool.capture(&args).await;
        if let Some(message) = outcome.failure_message() {
            shot_error!("Capture job {} failed: {}", id, message);
            return Err(CreateError::Capture(message));
        }

        let promoted = self.store.promote(staging.path(), &stem).await?;
        shot_info!("Capture job {} finished: {} file(s)", id, promoted.len());

        Ok(artifact_ids(&id, format, job.delay.as_ref())
            .into_iter()
            .map(|artifact_id| origin.descriptor(artifact_id))
            .collect())
    }
}

/// Fresh opaque job identifier.
pub fn new_job_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
