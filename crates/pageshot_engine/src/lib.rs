//! Pageshot engine: capture process execution and artifact storage.
mod capture;
mod config;
mod service;
mod store;

pub use capture::{
    classify_output, CaptureOutcome, CaptureSettings, CaptureTool, ProcessCaptureTool,
    FAILURE_MARKER,
};
pub use config::EngineConfig;
pub use service::{new_job_id, CaptureService, CreateError, EngineError};
pub use store::{ensure_images_dir, ArtifactFile, ArtifactStore, StoreError};
