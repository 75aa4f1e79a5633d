use crate::error::Result;
use crate::inspect::InspectionParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct InspectToolConfig {
    pub input: PathBuf,
    /// Tool position as raw JSON, e.g. `{"x": 320, "y": 240}`.
    pub coordinates: String,
    /// Expected bend angle in degrees; empty for none.
    #[serde(default)]
    pub expected_angle: String,
    #[serde(default)]
    pub inspection: InspectionParams,
    pub output: InspectOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct InspectOutputConfig {
    pub report_json: PathBuf,
    /// Where to save the filled seam mask, if wanted.
    #[serde(default)]
    pub mask_image: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<InspectToolConfig> {
    super::read_json(path)
}
