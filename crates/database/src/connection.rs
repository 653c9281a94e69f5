use crate::error::DbError;
use libsql::{Builder, Connection, Database};
use std::fmt;

/// URL schemes served by a remote libSQL server.
const REMOTE_SCHEMES: &[&str] = &["libsql", "https", "http", "wss", "ws"];

/// Where a connection string points.
#[derive(Clone, PartialEq, Eq)]
pub enum Target {
    /// A libSQL server reached over the network, authenticated with a bearer token.
    Remote { url: String, auth_token: String },
    /// A local SQLite file, or `:memory:`.
    Local { path: String },
}

impl Target {
    /// Splits a `<url>?authToken=<token>` connection string.
    ///
    /// Remote URLs take their token from the `authToken` query parameter (an
    /// absent parameter yields an empty token). Anything that is not a remote
    /// URL is a local path; its query string is ignored.
    pub fn parse(connection_string: &str) -> Result<Self, DbError> {
        let (base, query) = match connection_string.split_once('?') {
            Some((base, query)) => (base, Some(query)),
            None => (connection_string, None),
        };
        if base.is_empty() {
            return Err(DbError::InvalidConnectionString(
                "database url is empty".to_string(),
            ));
        }

        let is_remote = base.split_once("://").is_some_and(|(scheme, _)| {
            REMOTE_SCHEMES.contains(&scheme.to_ascii_lowercase().as_str())
        });

        if is_remote {
            let auth_token = query
                .into_iter()
                .flat_map(|q| q.split('&'))
                .find_map(|pair| pair.strip_prefix("authToken="))
                .unwrap_or_default()
                .to_string();
            return Ok(Target::Remote {
                url: base.to_string(),
                auth_token,
            });
        }

        let path = base
            .strip_prefix("file://")
            .or_else(|| base.strip_prefix("file:"))
            .unwrap_or(base);
        if path.is_empty() {
            return Err(DbError::InvalidConnectionString(format!(
                "no database path in {base}"
            )));
        }
        Ok(Target::Local {
            path: path.to_string(),
        })
    }
}

// Only the location is shown. The token stays out of logs.
impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Remote { url, .. } => write!(f, "{url}"),
            Target::Local { path } => write!(f, "{path}"),
        }
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Remote { url, .. } => f
                .debug_struct("Remote")
                .field("url", url)
                .field("auth_token", &"***")
                .finish(),
            Target::Local { path } => f.debug_struct("Local").field("path", path).finish(),
        }
    }
}

/// The process's single handle to the store.
///
/// Owns the database and its one connection. Dropping the `Store` closes the
/// connection, so every exit path out of the owning scope releases it.
pub struct Store {
    // Dropped in declaration order: the connection goes before the database.
    conn: Connection,
    _db: Database,
    target: Target,
}

impl Store {
    /// Opens the store named by `connection_string` and connects to it once.
    pub async fn open(connection_string: &str) -> Result<Self, DbError> {
        let target = Target::parse(connection_string)?;
        tracing::info!(store = %target, "Opening store.");

        let db = match &target {
            Target::Remote { url, auth_token } => {
                Builder::new_remote(url.clone(), auth_token.clone())
                    .build()
                    .await
            }
            Target::Local { path } => Builder::new_local(path).build().await,
        }
        .map_err(DbError::Connection)?;

        let conn = db.connect().map_err(DbError::Connection)?;

        Ok(Self {
            conn,
            _db: db,
            target,
        })
    }

    /// The connection every repository operation runs on.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl Drop for Store {
    fn drop(&mut self) {
        tracing::debug!(store = %self.target, "Closing store.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_remote_with_token() {
        let target = Target::parse("libsql://scores.turso.io?authToken=abc.def").unwrap();
        assert_eq!(
            target,
            Target::Remote {
                url: "libsql://scores.turso.io".to_string(),
                auth_token: "abc.def".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_remote_without_token() {
        let target = Target::parse("https://scores.turso.io").unwrap();
        assert_eq!(
            target,
            Target::Remote {
                url: "https://scores.turso.io".to_string(),
                auth_token: String::new(),
            }
        );
    }

    #[test]
    fn test_parse_token_among_other_parameters() {
        let target = Target::parse("wss://db.example.com?tls=1&authToken=t0k").unwrap();
        assert!(matches!(target, Target::Remote { auth_token, .. } if auth_token == "t0k"));
    }

    #[test]
    fn test_parse_local_targets() {
        assert_eq!(
            Target::parse(":memory:").unwrap(),
            Target::Local { path: ":memory:".to_string() }
        );
        assert_eq!(
            Target::parse("file:scores.db?authToken=ignored").unwrap(),
            Target::Local { path: "scores.db".to_string() }
        );
        assert_eq!(
            Target::parse("file:///tmp/scores.db").unwrap(),
            Target::Local { path: "/tmp/scores.db".to_string() }
        );
    }

    #[test]
    fn test_parse_rejects_empty_url() {
        assert!(matches!(
            Target::parse("?authToken=abc"),
            Err(DbError::InvalidConnectionString(_))
        ));
        assert!(matches!(
            Target::parse("file:"),
            Err(DbError::InvalidConnectionString(_))
        ));
    }

    #[test]
    fn test_token_is_not_displayed() {
        let target = Target::parse("libsql://scores.turso.io?authToken=secret").unwrap();
        assert_eq!(target.to_string(), "libsql://scores.turso.io");
        assert!(!format!("{target:?}").contains("secret"));
    }
}
