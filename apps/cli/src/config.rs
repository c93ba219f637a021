use config::{Config, Environment, File, FileFormat, Map};
use ironseal::SealOptions;
use ironseal_logger::LogConfig;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// File loaded when `--config` is not given. Missing is fine.
pub const DEFAULT_CONFIG_FILE: &str = "ironseal.toml";
pub const ENV_PREFIX: &str = "IRONSEAL";

#[ironseal_derive::ironseal_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Settings for the `ironseal` binary.
///
/// ```toml
/// [log]
/// level = "debug"
///
/// [seal]
/// ttl = 3600000
///
/// [seal.encryption]
/// algorithm = "aes-128-ctr"
/// iterations = 1000
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub log: LogConfig,
    pub seal: SealOptions,
}

/// Loads [`CliConfig`] from a TOML file overlaid with `IRONSEAL__*` environment variables.
///
/// Nested keys use a double underscore, e.g. `IRONSEAL__SEAL__TTL=60000` or
/// `IRONSEAL__LOG__LEVEL=debug`. An explicit `path` must exist, the default file may be absent.
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing or malformed, or if the merged
/// values do not match [`CliConfig`].
pub fn load_config(path: Option<&Path>) -> Result<CliConfig, ConfigError> {
    load_with_env(path, None)
}

fn load_with_env(
    path: Option<&Path>,
    env: Option<Map<String, String>>,
) -> Result<CliConfig, ConfigError> {
    let required = path.is_some();
    let effective_path = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);

    Config::builder()
        .add_source(File::from(effective_path.as_path()).format(FileFormat::Toml).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX).separator("__").try_parsing(true).source(env),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<CliConfig>()
        .context("Failed to deserialize config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironseal::Algorithm;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect())
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join(DEFAULT_CONFIG_FILE);

        let err = load_with_env(Some(&missing), env(&[])).unwrap_err();
        assert_eq!(err.kind(), "Config");
    }

    #[test]
    fn test_file_values_are_loaded() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[log]\nlevel = \"debug\"\n\n[seal]\nttl = 5000\n\n[seal.encryption]\nalgorithm = \"aes-128-ctr\"\niterations = 7"
        )
        .unwrap();

        let config = load_with_env(Some(file.path()), env(&[])).unwrap();

        assert_eq!(config.log.level, "debug");
        assert_eq!(config.seal.ttl, 5000);
        assert_eq!(config.seal.encryption.algorithm, Algorithm::Aes128Ctr);
        assert_eq!(config.seal.encryption.iterations, 7);
        assert_eq!(config.seal.encryption.min_password_length, 32);
        assert_eq!(config.seal.integrity.algorithm, Algorithm::Sha256);
        assert_eq!(config.seal.timestamp_skew_sec, 60);
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[seal]\nttl = 5000").unwrap();

        let config = load_with_env(
            Some(file.path()),
            env(&[
                ("IRONSEAL__SEAL__TTL", "90000"),
                ("IRONSEAL__SEAL__TIMESTAMP_SKEW_SEC", "0"),
                ("IRONSEAL__LOG__CONSOLE", "false"),
                ("IRONSEAL_PASSWORD", "not a config key"),
            ]),
        )
        .unwrap();

        assert_eq!(config.seal.ttl, 90_000);
        assert_eq!(config.seal.timestamp_skew_sec, 0);
        assert!(!config.log.console);
    }

    #[test]
    fn test_unknown_algorithm_is_a_config_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[seal.encryption]\nalgorithm = \"des\"").unwrap();

        let err = load_with_env(Some(file.path()), env(&[])).unwrap_err();
        assert_eq!(err.kind(), "Config");
    }
}
