use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{DB_AUTH_TOKEN, DB_URL, Settings};

/// The env file read at startup, relative to the working directory.
pub const ENV_FILE: &str = ".env";

/// Loads the store settings.
///
/// Reads `.env` from the working directory (parent directories are not
/// searched), then pulls `DB_URL` and `DB_AUTH_TOKEN` from the environment.
/// A missing `.env` file is an error, as is a missing or empty variable.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(ENV_FILE)
}

/// Like [`load_settings`], reading the env file at an explicit path.
pub fn load_settings_from(path: impl AsRef<Path>) -> Result<Settings, ConfigError> {
    let path = path.as_ref();
    dotenvy::from_path(path)?;
    tracing::debug!(path = %path.display(), "Loaded environment file.");
    Settings::from_environment(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_settings_from(dir.path().join(".env")).unwrap_err();
        assert!(matches!(err, ConfigError::EnvFile(_)));
    }

    #[test]
    fn test_env_file_in_parent_directory_is_not_used() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(ENV_FILE), "DB_URL=libsql://parent.turso.io\n").unwrap();
        let child = dir.path().join("child");
        std::fs::create_dir(&child).unwrap();

        let err = load_settings_from(child.join(ENV_FILE)).unwrap_err();
        assert!(matches!(err, ConfigError::EnvFile(_)));
    }

    // The only test in this crate that touches the process environment.
    #[test]
    fn test_loads_settings_from_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ENV_FILE);
        std::fs::write(
            &path,
            "DB_URL=libsql://from-env-file.turso.io\nDB_AUTH_TOKEN=env-file-token\n",
        )
        .unwrap();

        let settings = load_settings_from(&path).unwrap();
        assert_eq!(settings.db_url, "libsql://from-env-file.turso.io");
        assert_eq!(settings.db_auth_token, "env-file-token");
        assert_eq!(
            settings.connection_string(),
            "libsql://from-env-file.turso.io?authToken=env-file-token"
        );
    }
}
