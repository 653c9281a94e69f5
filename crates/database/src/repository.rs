use crate::DbError;
use crate::connection::Store;
use core_types::User;
use libsql::params;

const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        high_score INT NOT NULL
    );
"#;
const USER_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1)";
const INSERT_USER: &str = "INSERT INTO users (name, email, high_score) VALUES (?1, ?2, ?3)";
const SELECT_LEADERBOARD: &str =
    "SELECT name, email, high_score FROM users ORDER BY high_score DESC";

/// What [`DbRepository::insert_if_absent`] did with a candidate user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// A row with the same email was already stored. Nothing was written.
    AlreadyExists,
}

/// The `DbRepository` provides the leaderboard's data access operations.
/// It borrows the process's single [`Store`] and runs every statement on it.
#[derive(Clone, Copy)]
pub struct DbRepository<'a> {
    store: &'a Store,
}

impl<'a> DbRepository<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Creates the `users` table if it does not exist yet. Safe to call on
    /// every start.
    #[tracing::instrument(skip(self))]
    pub async fn ensure_schema(&self) -> Result<(), DbError> {
        self.store
            .connection()
            .execute(CREATE_USERS_TABLE, ())
            .await
            .map_err(DbError::Schema)?;
        tracing::debug!("users table is present.");
        Ok(())
    }

    /// Returns whether a row with `email` is stored.
    pub async fn user_exists(&self, email: &str) -> Result<bool, DbError> {
        let check = DbError::data_access("check if user exists");
        let mut rows = self
            .store
            .connection()
            .query(USER_EXISTS, params![email])
            .await
            .map_err(check)?;

        let exists = match rows.next().await.map_err(check)? {
            Some(row) => row.get::<i64>(0).map_err(check)? != 0,
            None => false,
        };
        Ok(exists)
    }

    /// Inserts `user` unless a row with the same email is already stored.
    ///
    /// The existence check and the insert are separate statements. If another
    /// writer stores the same email in between, the table's UNIQUE constraint
    /// rejects our insert and the rejection is returned as a data access error.
    #[tracing::instrument(skip(self, user), fields(email = %user.email))]
    pub async fn insert_if_absent(&self, user: &User) -> Result<InsertOutcome, DbError> {
        if self.user_exists(&user.email).await? {
            tracing::debug!("User already stored, skipping insert.");
            return Ok(InsertOutcome::AlreadyExists);
        }

        self.insert_user(user).await?;
        Ok(InsertOutcome::Inserted)
    }

    /// Inserts `user` without checking for an existing row first.
    pub async fn insert_user(&self, user: &User) -> Result<(), DbError> {
        self.store
            .connection()
            .execute(
                INSERT_USER,
                params![user.name.as_str(), user.email.as_str(), user.high_score],
            )
            .await
            .map_err(DbError::data_access("insert user"))?;
        tracing::info!(display_name = %user.name, high_score = user.high_score, "Inserted user.");
        Ok(())
    }

    /// Fetches every user, highest score first. Ties come back in whatever
    /// order the store returns them.
    #[tracing::instrument(skip(self))]
    pub async fn get_leaderboard(&self) -> Result<Vec<User>, DbError> {
        let mut rows = self
            .store
            .connection()
            .query(SELECT_LEADERBOARD, ())
            .await
            .map_err(DbError::data_access("query leaderboard"))?;

        let scan = DbError::data_access("scan leaderboard row");
        let mut users = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(DbError::data_access("iterate leaderboard rows"))?
        {
            users.push(User {
                name: row.get::<String>(0).map_err(scan)?,
                email: row.get::<String>(1).map_err(scan)?,
                high_score: row.get::<i64>(2).map_err(scan)?,
            });
        }

        tracing::debug!(count = users.len(), "Fetched leaderboard.");
        Ok(users)
    }
}
