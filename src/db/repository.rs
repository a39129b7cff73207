use rusqlite::{params, Connection};

use super::DatabaseError;

/// One (synonym, cid) row from the corpus.
#[derive(Debug, Clone)]
pub struct SynonymRow {
    pub synonym: String,
    pub cid: i64,
}

/// Load every (synonym, cid) row, ordered by cid then synonym so scans
/// over the corpus are deterministic across runs.
pub fn all_synonyms(conn: &Connection) -> Result<Vec<SynonymRow>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT synonym, cid FROM synonyms ORDER BY cid, synonym")?;

    let rows = stmt.query_map([], |row| {
        Ok(SynonymRow {
            synonym: row.get(0)?,
            cid: row.get(1)?,
        })
    })?;

    let mut synonyms = Vec::new();
    for row in rows {
        synonyms.push(row?);
    }
    Ok(synonyms)
}

/// SMILES string for a CID, if the compound is known.
pub fn smiles_by_cid(conn: &Connection, cid: i64) -> Result<Option<String>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT smiles FROM smiles WHERE cid = ?1")?;
    let mut rows = stmt.query(params![cid])?;
    match rows.next()? {
        Some(row) => Ok(Some(row.get(0)?)),
        None => Ok(None),
    }
}

/// Insert a compound and its canonical SMILES (seeding helper).
pub fn insert_compound(conn: &Connection, cid: i64, smiles: &str) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT OR REPLACE INTO smiles (cid, smiles) VALUES (?1, ?2)",
        params![cid, smiles],
    )?;
    Ok(())
}

/// Insert one synonym for a compound (seeding helper).
pub fn insert_synonym(conn: &Connection, cid: i64, synonym: &str) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT OR IGNORE INTO synonyms (cid, synonym) VALUES (?1, ?2)",
        params![cid, synonym],
    )?;
    Ok(())
}
