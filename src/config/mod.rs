//! JSON configuration of the command-line tools.
pub mod inspect;
pub mod program;

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    serde_json::from_str(&data).map_err(|e| {
        Error::InvalidInput(format!("failed to parse config {}: {e}", path.display()))
    })
}
