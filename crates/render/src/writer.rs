//! Output writers for finished drawings.

use std::path::{Path, PathBuf};

use crate::drawing::Drawing;
use crate::error::RenderError;

/// Serializes a [`Drawing`] to one file format.
pub trait DrawingWriter {
    /// File extension without the leading dot.
    fn extension(&self) -> &'static str;

    fn write(&self, drawing: &Drawing, path: &Path) -> Result<(), RenderError>;

    /// Writes to `dir/stem.<extension>` and returns the full path.
    fn write_named(
        &self,
        drawing: &Drawing,
        dir: &Path,
        stem: &str,
    ) -> Result<PathBuf, RenderError> {
        let path = dir.join(format!("{stem}.{}", self.extension()));
        self.write(drawing, &path)?;
        Ok(path)
    }
}
