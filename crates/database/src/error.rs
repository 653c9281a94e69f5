use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Invalid connection string: {0}")]
    InvalidConnectionString(String),

    #[error("Failed to connect to the database")]
    Connection(#[source] libsql::Error),

    #[error("Failed to create table")]
    Schema(#[source] libsql::Error),

    #[error("Failed to {operation}")]
    DataAccess {
        operation: &'static str,
        #[source]
        source: libsql::Error,
    },
}

impl DbError {
    pub(crate) fn data_access(operation: &'static str) -> impl Fn(libsql::Error) -> Self + Copy {
        move |source| DbError::DataAccess { operation, source }
    }
}
