//! Configuration loading.
//!
//! Layers, lowest priority first:
//! 1. Built-in defaults (serde defaults on [`HostConfig`])
//! 2. Optional TOML file: `$FCUT_CONFIG`, else `fcut.toml` next to the executable
//! 3. Environment variables `FCUT__<SECTION>__<KEY>`, e.g. `FCUT__SERVER__PORT=6000`

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use fcut_application::{HostError, HostResult};
use fcut_domain::HostConfig;

/// Variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "FCUT_CONFIG";

/// Prefix of override variables.
pub const ENV_PREFIX: &str = "FCUT";

const CONFIG_FILE_NAME: &str = "fcut.toml";

/// Where the config file is looked up.
#[must_use]
pub fn config_file_path(runtime_dir: &Path) -> PathBuf {
    std::env::var_os(CONFIG_ENV_VAR)
        .map_or_else(|| runtime_dir.join(CONFIG_FILE_NAME), PathBuf::from)
}

/// Loads and validates the host configuration from the process environment.
///
/// A missing file is not an error.
///
/// # Errors
///
/// Returns an error if the file is malformed, an override cannot be
/// parsed, or the merged configuration fails validation.
pub fn load_config(file: &Path) -> HostResult<HostConfig> {
    load_with(file, environment(None))
}

fn environment(source: Option<HashMap<String, String>>) -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
        .list_separator(" ")
        .with_list_parse_key("dev.args")
        .source(source)
}

fn load_with(file: &Path, env: Environment) -> HostResult<HostConfig> {
    let settings = Config::builder()
        .add_source(File::from(file).format(FileFormat::Toml).required(false))
        .add_source(env)
        .build()
        .map_err(|e| HostError::Config(e.to_string()))?;

    let config: HostConfig = settings
        .try_deserialize()
        .map_err(|e| HostError::Config(e.to_string()))?;
    config.validate()?;

    tracing::debug!(file = %file.display(), profile = ?config.profile, "configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fcut_domain::Profile;
    use pretty_assertions::assert_eq;

    fn vars(pairs: &[(&str, &str)]) -> Environment {
        environment(Some(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        ))
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_with(&dir.path().join("fcut.toml"), vars(&[])).expect("load");
        assert_eq!(config, HostConfig::default());
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("fcut.toml");
        std::fs::write(
            &file,
            r#"
profile = "development"

[server]
port = 6100

[window]
devtools = false
"#,
        )
        .expect("write");

        let config = load_with(&file, vars(&[])).expect("load");
        assert_eq!(config.profile, Profile::Development);
        assert_eq!(config.server.port, 6100);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(!config.window.devtools);
    }

    #[test]
    fn environment_beats_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("fcut.toml");
        std::fs::write(&file, "[server]\nport = 6100\n").expect("write");

        let config = load_with(
            &file,
            vars(&[
                ("FCUT__SERVER__PORT", "6200"),
                ("FCUT__DEV__ARGS", "vite --port 5999"),
            ]),
        )
        .expect("load");
        assert_eq!(config.server.port, 6200);
        assert_eq!(config.dev.args, vec!["vite", "--port", "5999"]);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("fcut.toml");

        std::fs::write(&file, "[server]\nport = 0\n").expect("write");
        assert!(matches!(load_with(&file, vars(&[])), Err(HostError::Domain(_))));

        std::fs::write(&file, "[server\n").expect("write");
        assert!(matches!(load_with(&file, vars(&[])), Err(HostError::Config(_))));
    }
}
