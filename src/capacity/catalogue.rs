use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::CapacityError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogueRecord {
    #[serde(alias = "Checkpoint")]
    pub checkpoint: String,
    #[serde(alias = "Sentido", alias = "sentido", alias = "sense")]
    pub sense_code: String,
}

/// per-checkpoint sets of permitted sense codes, from the operator-supplied
/// cardinality catalogue. a checkpoint absent from the catalogue (or a run
/// with no catalogue configured) permits any mechanically derived code; the
/// capacity lookup remains the hard gate.
#[derive(Debug, Clone, Default)]
pub struct SenseCatalogue(HashMap<String, HashSet<String>>);

impl SenseCatalogue {
    pub fn empty() -> SenseCatalogue {
        SenseCatalogue::default()
    }

    pub fn from_records(records: &[CatalogueRecord]) -> SenseCatalogue {
        let mut catalogue: HashMap<String, HashSet<String>> = HashMap::new();
        for record in records.iter() {
            catalogue
                .entry(record.checkpoint.trim().to_string())
                .or_default()
                .insert(record.sense_code.trim().to_string());
        }
        SenseCatalogue(catalogue)
    }

    pub fn permits(&self, checkpoint_id: &str, sense_key: &str) -> bool {
        match self.0.get(checkpoint_id.trim()) {
            Some(permitted) => permitted.contains(sense_key),
            None => true,
        }
    }
}

pub fn read_catalogue_csv(catalogue_file: &Path) -> Result<SenseCatalogue, CapacityError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(catalogue_file)
        .map_err(|e| CapacityError::Parse {
            path: catalogue_file.to_path_buf(),
            message: format!("failure opening sense catalogue: {e}"),
        })?;
    let records = reader
        .deserialize::<CatalogueRecord>()
        .enumerate()
        .map(|(idx, row)| {
            row.map_err(|e| CapacityError::Parse {
                path: catalogue_file.to_path_buf(),
                message: format!("failure deserializing catalogue row {idx}: {e}"),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    log::info!(
        "read {} sense catalogue rows from {}",
        records.len(),
        catalogue_file.display()
    );
    Ok(SenseCatalogue::from_records(&records))
}
