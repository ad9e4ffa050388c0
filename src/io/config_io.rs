use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::config::{CONFIG_FILE_NAME, Config, ConfigFile, ROOT_ENV_VAR};

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("notes directory is not set: pass --dir or set {ROOT_ENV_VAR}")]
    RootUnset,
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not parse {CONFIG_FILE_NAME}: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Load configuration from the `--dir` override or `$MANDA_DIR`.
pub fn load_config(dir_override: Option<&Path>) -> Result<Config, ConfigError> {
    load_config_from(dir_override, std::env::var_os(ROOT_ENV_VAR))
}

/// Same as [`load_config`] with the environment value passed in.
pub fn load_config_from(
    dir_override: Option<&Path>,
    env_root: Option<OsString>,
) -> Result<Config, ConfigError> {
    let root = match dir_override {
        Some(dir) => dir.to_path_buf(),
        None => match env_root {
            Some(value) if !value.is_empty() => PathBuf::from(value),
            _ => return Err(ConfigError::RootUnset),
        },
    };
    let file = read_config_file(&root)?;
    Ok(Config { root, file })
}

/// Read `<root>/.manda.toml`; a missing file yields defaults.
pub fn read_config_file(root: &Path) -> Result<ConfigFile, ConfigError> {
    let path = root.join(CONFIG_FILE_NAME);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ConfigFile::default()),
        Err(e) => return Err(ConfigError::Read { path, source: e }),
    };
    Ok(toml::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn unset_root_is_fatal() {
        let err = load_config_from(None, None).unwrap_err();
        assert!(matches!(err, ConfigError::RootUnset));
        let err = load_config_from(None, Some(OsString::new())).unwrap_err();
        assert!(matches!(err, ConfigError::RootUnset));
    }

    #[test]
    fn override_wins_over_env() {
        let tmp = TempDir::new().unwrap();
        let config =
            load_config_from(Some(tmp.path()), Some(OsString::from("/elsewhere"))).unwrap();
        assert_eq!(config.root, tmp.path());
    }

    #[test]
    fn env_root_is_used() {
        let tmp = TempDir::new().unwrap();
        let config = load_config_from(None, Some(tmp.path().as_os_str().to_owned())).unwrap();
        assert_eq!(config.root, tmp.path());
        assert_eq!(config.file.navigation.search_window_days, 365);
        assert_eq!(config.file.editor.fallback, "nano");
    }

    #[test]
    fn reads_settings_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            r#"
[editor]
command = "hx"

[navigation]
search_window_days = 30
"#,
        )
        .unwrap();
        let config = load_config_from(Some(tmp.path()), None).unwrap();
        assert_eq!(config.file.editor.command.as_deref(), Some("hx"));
        assert_eq!(config.file.editor.preferred[0], "micro");
        assert_eq!(config.file.navigation.search_window_days, 30);
    }

    #[test]
    fn bad_settings_file_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "[navigation\n").unwrap();
        let err = load_config_from(Some(tmp.path()), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
