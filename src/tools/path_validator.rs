use crate::error::{ReelError, Result};
use std::path::Path;

pub fn validate_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ReelError::InvalidParameters(format!(
            "input folder does not exist: {}",
            path.display()
        )));
    }
    if !path.is_dir() {
        return Err(ReelError::InvalidParameters(format!(
            "input path is not a folder: {}",
            path.display()
        )));
    }
    Ok(())
}
