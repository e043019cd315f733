use crate::domain::denomination::{DEFAULT_MAX_NOTES, DenominationTable};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Static ATM configuration, usually read from a JSON file.
///
/// ```json
/// { "denominations": { "PL": [500, 200, 100, 50, 20, 10] }, "max_notes": 40 }
/// ```
///
/// Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtmConfig {
    pub denominations: DenominationTable,
    /// Most notes one withdrawal may be paid out in.
    pub max_notes: usize,
}

impl Default for AtmConfig {
    fn default() -> Self {
        Self {
            denominations: DenominationTable::default(),
            max_notes: DEFAULT_MAX_NOTES,
        }
    }
}

impl AtmConfig {
    /// The denomination table with this config's note limit applied.
    pub fn denomination_table(&self) -> DenominationTable {
        self.denominations.clone().with_max_notes(self.max_notes)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}
