//! Parameter loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::{ModuleArgs, ModuleParams};
use crate::config::validation::{validate_params, ValidationError};

/// Error type for parameter loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Toml(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Json(e) => write!(f, "Parse error: {}", e),
            ConfigError::Toml(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Read raw parameters from an args file.
///
/// Files ending in `.toml` are parsed as TOML; anything else as JSON, which is
/// what automation hosts write.
pub fn load_params(path: &Path) -> Result<ModuleParams, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;

    let is_toml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        toml::from_str(&content).map_err(ConfigError::Toml)
    } else {
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }
}

/// Load, layer and validate invocation arguments.
///
/// Values in `overrides` (typically command-line flags) win over the file.
pub fn load_args(path: Option<&Path>, overrides: ModuleParams) -> Result<ModuleArgs, ConfigError> {
    let base = match path {
        Some(path) => load_params(path)?,
        None => ModuleParams::default(),
    };

    validate_params(base.merge(overrides)).map_err(ConfigError::Validation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::DesiredState;
    use std::path::PathBuf;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("ec2-elb-{}-{}", std::process::id(), name));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_json_args_file() {
        let path = write_temp(
            "args.json",
            r#"{"state": "present", "instance_id": "i-1234", "ec2_elbs": ["lb-b", "lb-a"]}"#,
        );
        let args = load_args(Some(&path), ModuleParams::default()).unwrap();
        assert_eq!(args.state, DesiredState::Present);
        assert_eq!(args.ec2_elbs, Some(vec!["lb-b".to_string(), "lb-a".to_string()]));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_load_toml_args_file() {
        let path = write_temp(
            "args.toml",
            "state = \"absent\"\ninstance_id = \"i-1234\"\nregion = \"eu-west-1\"\nwait_timeout = 120\n",
        );
        let args = load_args(Some(&path), ModuleParams::default()).unwrap();
        assert_eq!(args.state, DesiredState::Absent);
        assert_eq!(args.region, "eu-west-1");
        assert_eq!(args.wait_timeout, Some(std::time::Duration::from_secs(120)));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_overrides_win_over_file() {
        let path = write_temp("override.json", r#"{"state": "absent", "instance_id": "i-file"}"#);
        let overrides = ModuleParams {
            instance_id: Some("i-flag".into()),
            ..ModuleParams::default()
        };
        let args = load_args(Some(&path), overrides).unwrap();
        assert_eq!(args.instance_id, "i-flag");
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let result = load_params(Path::new("/nonexistent/ec2-elb-args.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_malformed_json() {
        let path = write_temp("bad.json", "{ not json");
        let result = load_params(&path);
        assert!(matches!(result, Err(ConfigError::Json(_))));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_validation_errors_are_joined() {
        let err = load_args(None, ModuleParams::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: missing required parameter: state, missing required parameter: instance_id"
        );
    }
}
