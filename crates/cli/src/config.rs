//! Config file loading and `--params` overrides.

use std::path::Path;

use fieldlines_core::FieldConfig;
use fieldlines_render::{DoubleSlitConfig, RenderConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CliError;

/// Everything a config file may set. Missing sections take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub field: FieldConfig,
    pub render: RenderConfig,
    pub double_slit: DoubleSlitConfig,
}

impl FileConfig {
    /// Reads and parses a JSON config file.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))?;
        serde_json::from_str(&text)
            .map_err(|e| CliError::Input(format!("invalid config {}: {e}", path.display())))
    }

    /// Resolves the starting config from an optional file or preset.
    pub fn resolve(path: Option<&Path>, preset: Option<&str>) -> Result<Self, CliError> {
        match (path, preset) {
            (Some(path), _) => Self::load(path),
            (None, Some(name)) => Ok(Self {
                field: FieldConfig::preset(name)?,
                ..Self::default()
            }),
            (None, None) => Ok(Self::default()),
        }
    }
}

/// Parses the `--params` argument, which must be a JSON object.
pub fn parse_params(raw: &str) -> Result<Value, CliError> {
    let params: Value = serde_json::from_str(raw)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    if !params.is_object() {
        return Err(CliError::Input("--params must be a JSON object".into()));
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldlines_core::StepControl;
    use std::io::Write;

    #[test]
    fn partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"field": {{"grid_width": 64}}, "render": {{"flip_y": true}}}}"#
        )
        .unwrap();
        let config = FileConfig::load(file.path()).unwrap();
        assert_eq!(config.field.grid_width, 64);
        assert_eq!(config.field.grid_height, 100);
        assert!(config.render.flip_y);
        assert_eq!(config.double_slit, DoubleSlitConfig::default());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = FileConfig::load(Path::new("/nonexistent/fieldlines.json")).unwrap_err();
        assert_eq!(err.exit_code(), 11);
    }

    #[test]
    fn malformed_file_is_input_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        let err = FileConfig::load(file.path()).unwrap_err();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn preset_seeds_the_field_config() {
        let config = FileConfig::resolve(None, Some("threshold")).unwrap();
        assert!(matches!(
            config.field.trace.step_control,
            StepControl::Threshold { .. }
        ));
        let err = FileConfig::resolve(None, Some("nope")).unwrap_err();
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn params_must_be_an_object() {
        assert!(parse_params(r#"{"step_size": 0.02}"#).is_ok());
        assert_eq!(parse_params("[1, 2]").unwrap_err().exit_code(), 12);
        assert_eq!(parse_params("{oops").unwrap_err().exit_code(), 12);
    }
}
