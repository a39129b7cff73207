use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use super::repository::{self, SynonymRow};
use super::sqlite::open_corpus;
use super::DatabaseError;

/// Read-only access to the chemical corpus: a scan over every
/// (synonym, cid) pair and a point lookup from CID to SMILES.
///
/// Scans must be deterministic so identity resolution is reproducible.
pub trait ChemicalCorpus: Send + Sync {
    /// Visit every (synonym, cid) row in a stable order.
    fn for_each_synonym(
        &self,
        visit: &mut dyn FnMut(&str, i64),
    ) -> Result<(), DatabaseError>;

    /// Canonical SMILES for a CID, if the compound is known.
    fn smiles_by_cid(&self, cid: i64) -> Result<Option<String>, DatabaseError>;
}

/// SQLite-backed corpus. Synonym rows are loaded once at open and held in
/// memory (tens of thousands of rows scan far faster there than through a
/// per-call query); SMILES lookups go to the connection.
pub struct SqliteCorpus {
    conn: Mutex<Connection>,
    synonyms: Vec<SynonymRow>,
}

impl SqliteCorpus {
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        let conn = open_corpus(path)?;
        Self::from_connection(conn)
    }

    pub fn from_connection(conn: Connection) -> Result<Self, DatabaseError> {
        let synonyms = repository::all_synonyms(&conn)?;
        tracing::info!(rows = synonyms.len(), "Synonym corpus loaded");
        Ok(Self {
            conn: Mutex::new(conn),
            synonyms,
        })
    }

    pub fn synonym_count(&self) -> usize {
        self.synonyms.len()
    }
}

impl ChemicalCorpus for SqliteCorpus {
    fn for_each_synonym(
        &self,
        visit: &mut dyn FnMut(&str, i64),
    ) -> Result<(), DatabaseError> {
        for row in &self.synonyms {
            visit(&row.synonym, row.cid);
        }
        Ok(())
    }

    fn smiles_by_cid(&self, cid: i64) -> Result<Option<String>, DatabaseError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| DatabaseError::ConnectionPoisoned)?;
        repository::smiles_by_cid(&conn, cid)
    }
}

/// In-memory corpus for unit tests and small fixtures.
#[derive(Debug, Default)]
pub struct InMemoryCorpus {
    synonyms: Vec<SynonymRow>,
    smiles: HashMap<i64, String>,
}

impl InMemoryCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_compound(mut self, cid: i64, smiles: &str, synonyms: &[&str]) -> Self {
        self.smiles.insert(cid, smiles.to_string());
        for synonym in synonyms {
            self.synonyms.push(SynonymRow {
                synonym: synonym.to_string(),
                cid,
            });
        }
        self
    }

    /// A synonym row without a SMILES entry (corpus gaps happen).
    pub fn with_orphan_synonym(mut self, cid: i64, synonym: &str) -> Self {
        self.synonyms.push(SynonymRow {
            synonym: synonym.to_string(),
            cid,
        });
        self
    }
}

impl ChemicalCorpus for InMemoryCorpus {
    fn for_each_synonym(
        &self,
        visit: &mut dyn FnMut(&str, i64),
    ) -> Result<(), DatabaseError> {
        for row in &self.synonyms {
            visit(&row.synonym, row.cid);
        }
        Ok(())
    }

    fn smiles_by_cid(&self, cid: i64) -> Result<Option<String>, DatabaseError> {
        Ok(self.smiles.get(&cid).cloned())
    }
}
