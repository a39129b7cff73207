use std::path::Path;

use rusqlite::Connection;

use super::DatabaseError;

/// Open a SQLite connection to the chemical corpus at the given path.
pub fn open_corpus(path: &Path) -> Result<Connection, DatabaseError> {
    let conn = Connection::open(path)?;
    configure_pragmas(&conn)?;
    Ok(conn)
}

/// Open an in-memory corpus with the schema applied (for testing and seeding).
pub fn open_memory_corpus() -> Result<Connection, DatabaseError> {
    let conn = Connection::open_in_memory()?;
    configure_pragmas(&conn)?;
    init_schema(&conn)?;
    Ok(conn)
}

fn configure_pragmas(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        "PRAGMA journal_mode=DELETE;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}

/// Create the corpus tables if they do not exist.
/// `smiles` maps a CID to its canonical structure; `synonyms` maps the
/// many names a chemical goes by back to its CID.
pub fn init_schema(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS smiles (
             cid    INTEGER PRIMARY KEY,
             smiles TEXT NOT NULL
         );
         CREATE TABLE IF NOT EXISTS synonyms (
             cid     INTEGER NOT NULL REFERENCES smiles(cid),
             synonym TEXT NOT NULL,
             PRIMARY KEY (cid, synonym)
         );",
    )?;
    Ok(())
}
