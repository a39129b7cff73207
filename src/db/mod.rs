pub mod corpus;
pub mod repository;
pub mod sqlite;

pub use corpus::*;
pub use sqlite::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Corpus connection lock poisoned")]
    ConnectionPoisoned,
}
