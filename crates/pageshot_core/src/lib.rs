//! Pageshot core: capture job model, validation and argument building.
//!
//! Everything here is pure; process execution and file handling live in
//! `pageshot_engine`.
mod args;
mod catalog;
mod descriptor;
mod job;
mod validate;

pub use args::build_args;
pub use catalog::{devices, networks, DeviceProfile, NetworkProfile};
pub use descriptor::{artifact_ids, content_type_for, RequestOrigin, ScreenshotDescriptor};
pub use job::{
    Dimension, Format, JobDescription, JpgOptions, Network, NetworkThrottle, OneOrMany,
    Orientation, PdfOptions,
};
pub use validate::{FieldErrors, JobValidator, SchemaError, NO_BODY_MESSAGE};

/// Prefix shared by every artifact file in the images directory.
pub const IMAGE_PREFIX: &str = "pageshot-";
