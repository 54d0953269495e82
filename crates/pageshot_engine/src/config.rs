use std::path::PathBuf;

use crate::capture::CaptureSettings;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub images_dir: PathBuf,
    pub capture: CaptureSettings,
}

impl EngineConfig {
    pub fn default_with_images_dir(images_dir: PathBuf) -> Self {
        Self {
            images_dir,
            capture: CaptureSettings::default(),
        }
    }
}
