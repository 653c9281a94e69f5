use crate::error::ConfigError;
use serde::Deserialize;

/// Environment variable holding the store endpoint.
pub const DB_URL: &str = "DB_URL";
/// Environment variable holding the store's bearer credential.
pub const DB_AUTH_TOKEN: &str = "DB_AUTH_TOKEN";

/// The shape of the `DB_*` environment variables as read by the `config`
/// crate. With the `DB` prefix stripped, `DB_URL` becomes `url` and
/// `DB_AUTH_TOKEN` becomes `auth_token`.
#[derive(Debug, Default, Deserialize)]
struct RawSettings {
    url: Option<String>,
    auth_token: Option<String>,
}

/// Validated connection settings for the leaderboard store.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    /// The store endpoint, e.g. `libsql://my-db.turso.io`.
    pub db_url: String,
    pub db_auth_token: String,
}

impl Settings {
    /// Builds settings from an explicit set of environment variables instead of
    /// the process environment.
    pub fn from_source<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map: config::Map<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::from_environment(Some(map))
    }

    /// Reads `DB_URL` and `DB_AUTH_TOKEN` from `source`, or from the process
    /// environment when `source` is `None`. Empty values count as missing.
    pub(crate) fn from_environment(
        source: Option<config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let environment = config::Environment::with_prefix("DB")
            .prefix_separator("_")
            .ignore_empty(true)
            .source(source);

        let raw = config::Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize::<RawSettings>()?;

        let db_url = raw.url.ok_or(ConfigError::MissingVariable(DB_URL))?;
        let db_auth_token = raw
            .auth_token
            .ok_or(ConfigError::MissingVariable(DB_AUTH_TOKEN))?;

        Ok(Self {
            db_url,
            db_auth_token,
        })
    }

    /// The connection string handed to the database driver:
    /// `<DB_URL>?authToken=<DB_AUTH_TOKEN>`.
    pub fn connection_string(&self) -> String {
        format!("{}?authToken={}", self.db_url, self.db_auth_token)
    }

    /// Same as [`Settings::connection_string`] with the token masked, for logs.
    pub fn redacted_connection_string(&self) -> String {
        format!("{}?authToken=***", self.db_url)
    }
}

// The token never appears in debug output.
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("db_url", &self.db_url)
            .field("db_auth_token", &"***")
            .finish()
    }
}
