use anyhow::Context;
use configuration::Settings;
use core_types::User;
use database::{DbRepository, InsertOutcome, Store};
use std::io::Write;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod presenter;

use presenter::display_leaderboard;

/// The users every run makes sure are on the board.
const SEED_USERS: [(&str, &str, i64); 3] = [
    ("John Doe", "john@example.com", 100),
    ("Bobs Burgers", "bob@example.com", 70),
    ("Jane Doe", "jane@example.com", 90),
];

/// The main entry point for the leaderboard application.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Logs go to stderr so stdout carries only the leaderboard.
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install the log subscriber: {e}");
    }

    let result = match configuration::load_settings().context("Error loading configuration") {
        Ok(settings) => run(&settings, &mut std::io::stdout().lock()).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

/// Connect, ensure the schema, seed, then print the board to `out`.
async fn run<W: Write>(settings: &Settings, out: &mut W) -> anyhow::Result<()> {
    // The store is released when `run` returns, on success or error.
    let store = Store::open(&settings.connection_string())
        .await
        .with_context(|| {
            format!(
                "failed to open db {}",
                settings.redacted_connection_string()
            )
        })?;
    let repo = DbRepository::new(&store);

    repo.ensure_schema().await?;

    for (name, email, high_score) in SEED_USERS {
        let user = User::new(name, email, high_score);
        if repo.insert_if_absent(&user).await? == InsertOutcome::AlreadyExists {
            writeln!(out, "User with this email already exists")?;
        }
    }

    let users = repo
        .get_leaderboard()
        .await
        .context("Failed to get leaderboard")?;
    display_leaderboard(out, &users);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEADERBOARD: &str = "Leaderboard:\n\
        1. John Doe (Email: john@example.com) - Score: 100\n\
        2. Jane Doe (Email: jane@example.com) - Score: 90\n\
        3. Bobs Burgers (Email: bob@example.com) - Score: 70\n";

    fn file_settings(dir: &tempfile::TempDir) -> Settings {
        let db_path = dir.path().join("leaderboard.db");
        Settings::from_source([
            ("DB_URL", db_path.display().to_string()),
            ("DB_AUTH_TOKEN", "unused".to_string()),
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn test_first_run_seeds_and_prints() {
        let dir = tempfile::tempdir().unwrap();
        let settings = file_settings(&dir);

        let mut out = Vec::new();
        run(&settings, &mut out).await.unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), LEADERBOARD);
    }

    #[tokio::test]
    async fn test_second_run_reports_existing_users() {
        let dir = tempfile::tempdir().unwrap();
        let settings = file_settings(&dir);

        run(&settings, &mut Vec::new()).await.unwrap();
        let mut out = Vec::new();
        run(&settings, &mut out).await.unwrap();

        let expected = format!("{}{LEADERBOARD}", "User with this email already exists\n".repeat(3));
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[tokio::test]
    async fn test_open_failure_is_returned_with_redacted_context() {
        let settings = Settings::from_source([
            ("DB_URL", "file:"),
            ("DB_AUTH_TOKEN", "secret"),
        ])
        .unwrap();

        let err = run(&settings, &mut Vec::new()).await.unwrap_err();
        let message = format!("{err:#}");
        assert!(message.starts_with("failed to open db file:?authToken=***"));
        assert!(!message.contains("secret"));
    }
}
