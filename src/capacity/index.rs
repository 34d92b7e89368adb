use std::path::Path;

use indexmap::IndexMap;

use crate::model::SenseCode;

use super::{CapacityError, CapacityRecord, RawCapacityRecord};

/// whether a checkpoint's capacity table distinguishes directions or records
/// all traffic under the single aggregate sense "0". fixed for the run,
/// decided once from the loaded table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckpointClass {
    Directional,
    Aggregate,
}

/// immutable map from (checkpoint id, sense key) to an aggregated capacity
/// record. the lookup is an exact key match: no fallback to the aggregate
/// sense, no averaging, no symmetric-direction substitution.
pub struct CapacityIndex(IndexMap<(String, String), CapacityRecord>);

impl CapacityIndex {
    /// aggregates raw gauging-station rows by (checkpoint, sense): category
    /// capacities are summed, the adjustment factor is the arithmetic mean,
    /// and each occupancy factor is the mean weighted by its category
    /// capacity (entries with zero or missing capacity carry no weight; a
    /// zero weight sum leaves the factor missing).
    pub fn from_records(records: &[RawCapacityRecord]) -> Result<CapacityIndex, CapacityError> {
        let mut groups: IndexMap<(String, String), GroupAccumulator> = IndexMap::new();
        for record in records.iter() {
            let key = (
                record.checkpoint.trim().to_string(),
                record.sentido.trim().to_string(),
            );
            if key.0.is_empty() || key.1.is_empty() {
                return Err(CapacityError::Build(format!(
                    "capacity row with empty checkpoint or sense: '{}'/'{}'",
                    record.checkpoint, record.sentido
                )));
            }
            groups.entry(key).or_default().push(record);
        }

        let index = groups
            .into_iter()
            .map(|(key, acc)| (key, acc.finish()))
            .collect::<IndexMap<_, _>>();
        Ok(CapacityIndex(index))
    }

    /// exact-match lookup. an invalid sense has no key and never matches.
    pub fn lookup(&self, checkpoint_id: &str, sense_code: &SenseCode) -> Option<&CapacityRecord> {
        let sense_key = sense_code.as_key()?;
        self.0.get(&(checkpoint_id.trim().to_string(), sense_key))
    }

    /// a checkpoint is directional iff it has at least one non-aggregate
    /// capacity row.
    pub fn classify(&self, checkpoint_id: &str) -> CheckpointClass {
        let checkpoint_id = checkpoint_id.trim();
        let directional = self
            .0
            .keys()
            .any(|(cp, sense)| cp == checkpoint_id && sense != "0");
        if directional {
            CheckpointClass::Directional
        } else {
            CheckpointClass::Aggregate
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Default)]
struct GroupAccumulator {
    cap_sum: [Option<f64>; 6],
    fa_sum: f64,
    fa_count: usize,
    focup_weighted_sum: [f64; 6],
    focup_weight: [f64; 6],
}

impl GroupAccumulator {
    fn push(&mut self, record: &RawCapacityRecord) {
        let caps = record.caps();
        let focups = record.focups();
        for k in 0..6 {
            if let Some(cap) = caps[k] {
                self.cap_sum[k] = Some(self.cap_sum[k].unwrap_or(0.0) + cap);
                if cap > 0.0 {
                    if let Some(focup) = focups[k] {
                        self.focup_weighted_sum[k] += focup * cap;
                        self.focup_weight[k] += cap;
                    }
                }
            }
        }
        if let Some(fa) = record.fa {
            self.fa_sum += fa;
            self.fa_count += 1;
        }
    }

    fn finish(self) -> CapacityRecord {
        let mut focup = [None; 6];
        for k in 0..6 {
            if self.focup_weight[k] > 0.0 {
                focup[k] = Some(self.focup_weighted_sum[k] / self.focup_weight[k]);
            }
        }
        let fa = if self.fa_count > 0 {
            Some(self.fa_sum / self.fa_count as f64)
        } else {
            None
        };
        CapacityRecord {
            cap: self.cap_sum,
            fa,
            focup,
        }
    }
}

const REQUIRED_COLUMNS: [&str; 16] = [
    "Checkpoint",
    "Sentido",
    "FA",
    "M",
    "A",
    "B",
    "CU",
    "CAI",
    "CAII",
    "TOTAL",
    "Focup_M",
    "Focup_A",
    "Focup_B",
    "Focup_CU",
    "Focup_CAI",
    "Focup_CAII",
];

/// reads raw capacity rows from a CSV file, verifying the expected gauging
/// report columns are present.
pub fn read_capacity_csv(capacity_file: &Path) -> Result<Vec<RawCapacityRecord>, CapacityError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(capacity_file)
        .map_err(|e| CapacityError::Parse {
            path: capacity_file.to_path_buf(),
            message: format!("failure opening capacity file: {e}"),
        })?;

    let headers = reader
        .headers()
        .map_err(|e| CapacityError::Parse {
            path: capacity_file.to_path_buf(),
            message: format!("failure reading headers: {e}"),
        })?
        .clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(CapacityError::MissingColumns {
            columns: missing,
            path: capacity_file.to_path_buf(),
        });
    }

    let records = reader
        .deserialize::<RawCapacityRecord>()
        .enumerate()
        .map(|(idx, row)| {
            row.map_err(|e| CapacityError::Parse {
                path: capacity_file.to_path_buf(),
                message: format!("failure deserializing capacity row {idx}: {e}"),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    log::info!(
        "read {} capacity rows from {}",
        records.len(),
        capacity_file.display()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Cardinal, SenseCode};

    fn raw(
        checkpoint: &str,
        sentido: &str,
        caps: [Option<f64>; 6],
        fa: Option<f64>,
        focups: [Option<f64>; 6],
    ) -> RawCapacityRecord {
        RawCapacityRecord {
            checkpoint: checkpoint.to_string(),
            sentido: sentido.to_string(),
            cap_m: caps[0],
            cap_a: caps[1],
            cap_b: caps[2],
            cap_cu: caps[3],
            cap_cai: caps[4],
            cap_caii: caps[5],
            total: None,
            fa,
            focup_m: focups[0],
            focup_a: focups[1],
            focup_b: focups[2],
            focup_cu: focups[3],
            focup_cai: focups[4],
            focup_caii: focups[5],
        }
    }

    #[test]
    fn test_duplicate_keys_aggregate() {
        // two gauging stations for the same checkpoint and sense: capacities
        // sum, FA averages, Focup_M is weighted by the M capacities.
        let records = vec![
            raw(
                "2003",
                "4-2",
                [Some(100.0), Some(50.0), None, None, None, None],
                Some(1.0),
                [Some(1.2), Some(1.4), None, None, None, None],
            ),
            raw(
                "2003",
                "4-2",
                [Some(300.0), Some(50.0), None, None, None, None],
                Some(1.2),
                [Some(1.6), Some(1.4), None, None, None, None],
            ),
        ];
        let index = CapacityIndex::from_records(&records).expect("index built");
        let sense = SenseCode::Directional(Cardinal::South, Cardinal::East);
        let record = index.lookup("2003", &sense).expect("record exists");

        assert_eq!(record.cap[0], Some(400.0));
        assert_eq!(record.cap[1], Some(100.0));
        assert!((record.fa.expect("fa present") - 1.1).abs() < 1e-12);
        // (1.2*100 + 1.6*300) / 400 = 1.5
        assert!((record.focup[0].expect("focup present") - 1.5).abs() < 1e-12);
        assert_eq!(record.focup[1], Some(1.4));
        assert_eq!(record.focup[2], None);
    }

    #[test]
    fn test_zero_capacity_carries_no_occupancy_weight() {
        let records = vec![raw(
            "2003",
            "1-3",
            [Some(0.0), None, None, None, None, None],
            Some(1.0),
            [Some(1.2), None, None, None, None, None],
        )];
        let index = CapacityIndex::from_records(&records).expect("index built");
        let sense = SenseCode::Directional(Cardinal::North, Cardinal::West);
        let record = index.lookup("2003", &sense).expect("record exists");
        assert_eq!(record.cap[0], Some(0.0));
        assert_eq!(record.focup[0], None, "zero weight sum leaves focup missing");
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let records = vec![
            raw(
                "2003",
                "4-2",
                [Some(100.0), Some(50.0), Some(30.0), Some(20.0), Some(10.0), Some(5.0)],
                Some(1.1),
                [Some(1.2), Some(1.4), Some(1.3), Some(1.0), Some(1.0), Some(1.0)],
            ),
            raw(
                "2003",
                "4-2",
                [Some(50.0), Some(25.0), Some(15.0), Some(10.0), Some(5.0), Some(2.5)],
                Some(1.3),
                [Some(1.8), Some(1.4), Some(1.3), Some(1.0), Some(1.0), Some(1.0)],
            ),
        ];
        let index = CapacityIndex::from_records(&records).expect("index built");
        let sense = SenseCode::Directional(Cardinal::South, Cardinal::East);
        let aggregated = *index.lookup("2003", &sense).expect("record exists");

        // re-feed the aggregated record as a single raw row
        let roundtrip = vec![raw("2003", "4-2", aggregated.cap, aggregated.fa, aggregated.focup)];
        let index2 = CapacityIndex::from_records(&roundtrip).expect("index built");
        let reaggregated = *index2.lookup("2003", &sense).expect("record exists");
        assert_eq!(aggregated, reaggregated);
    }

    #[test]
    fn test_lookup_is_exact_match_only() {
        let records = vec![raw(
            "2003",
            "1-3",
            [Some(10.0); 6],
            Some(1.0),
            [Some(1.0); 6],
        )];
        let index = CapacityIndex::from_records(&records).expect("index built");

        let other_sense = SenseCode::Directional(Cardinal::South, Cardinal::East);
        assert!(index.lookup("2003", &other_sense).is_none());
        assert!(index.lookup("2003", &SenseCode::Aggregate).is_none());
        assert!(index.lookup("2003", &SenseCode::Invalid).is_none());
        assert!(index
            .lookup("2004", &SenseCode::Directional(Cardinal::North, Cardinal::West))
            .is_none());
    }

    #[test]
    fn test_checkpoint_classification() {
        let records = vec![
            raw("2003", "4-2", [Some(10.0); 6], Some(1.0), [Some(1.0); 6]),
            raw("2003", "0", [Some(10.0); 6], Some(1.0), [Some(1.0); 6]),
            raw("2002", "0", [Some(10.0); 6], Some(1.0), [Some(1.0); 6]),
        ];
        let index = CapacityIndex::from_records(&records).expect("index built");
        assert_eq!(index.classify("2003"), CheckpointClass::Directional);
        assert_eq!(index.classify("2002"), CheckpointClass::Aggregate);
        // unknown checkpoints have no directional rows
        assert_eq!(index.classify("9999"), CheckpointClass::Aggregate);
    }
}
