use std::collections::HashMap;
use std::path::Path;

use super::PipelineError;

/// what kind of query an OD file encodes: a checkpoint file carries the
/// checkpoint id in its filename stem, a general file has no checkpoint and
/// produces an all-zero vehicle table without any routing work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryKind {
    Checkpoint(String),
    General,
}

/// one OD row as ingested, before any derivation. `total_trips` stays raw
/// text here because the survey censors small counts with the literal `<10`.
#[derive(Debug, Clone)]
pub struct RawOdRecord {
    pub origin_id: String,
    pub destination_id: String,
    pub total_trips: Option<String>,
}

/// lifts the checkpoint id from the filename stem: the digits following the
/// configured prefix. a stem without the prefix is a general query.
pub fn query_kind_from_filename(od_file: &Path, checkpoint_prefix: &str) -> QueryKind {
    let stem = od_file
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let lower = stem.to_lowercase();
    let prefix = checkpoint_prefix.to_lowercase();
    match lower.find(&prefix) {
        Some(at) => {
            let digits: String = lower[at + prefix.len()..]
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            if digits.is_empty() {
                QueryKind::General
            } else {
                QueryKind::Checkpoint(digits)
            }
        }
        None => QueryKind::General,
    }
}

/// person-trip coercion for a raw count cell: the censor literal `<10`, a
/// missing or unparseable value, and anything numerically under 10 all become
/// 1; everything else rounds to an integer.
pub fn trips_person_from_raw(raw: Option<&str>) -> u64 {
    let text = match raw {
        Some(t) => t.trim(),
        None => return 1,
    };
    if text.is_empty() || text == "<10" {
        return 1;
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 10.0 => value.round() as u64,
        _ => 1,
    }
}

/// columns that could smuggle a pre-computed direction into the pipeline.
/// they are dropped at ingest; the sense comes only from the constrained
/// path's geometry.
const DROPPED_COLUMNS: [&str; 5] = ["sense", "sentido", "sense_code", "direction", "direccion"];

const ORIGIN_ALIASES: [&str; 3] = ["origin_id", "origin", "origen"];
const DESTINATION_ALIASES: [&str; 3] = ["destination_id", "destination", "destino"];
const TRIPS_ALIASES: [&str; 3] = ["total_trips", "trips", "viajes"];

/// snake_cases a header the way the survey deliverables vary: trims,
/// lowercases, and folds spaces, hyphens and dots to underscores.
fn normalize_column_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace([' ', '-', '.'], "_")
}

fn find_column(headers: &HashMap<String, usize>, aliases: &[&str]) -> Option<usize> {
    aliases.iter().find_map(|alias| headers.get(*alias).copied())
}

/// reads an OD table, normalizing and aliasing column names. every input row
/// produces a record; empty ids are carried through and fail to bind
/// downstream rather than being filtered here, so output row order and count
/// always match the input.
pub fn read_od_csv(od_file: &Path) -> Result<Vec<RawOdRecord>, PipelineError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(od_file)
        .map_err(|e| PipelineError::Parse {
            path: od_file.to_path_buf(),
            message: format!("failure opening OD file: {e}"),
        })?;

    let headers: HashMap<String, usize> = reader
        .headers()
        .map_err(|e| PipelineError::Parse {
            path: od_file.to_path_buf(),
            message: format!("failure reading headers: {e}"),
        })?
        .iter()
        .enumerate()
        .map(|(idx, col)| (normalize_column_name(col), idx))
        .collect();

    for dropped in DROPPED_COLUMNS {
        if headers.contains_key(dropped) {
            log::info!(
                "dropping input column '{dropped}' from {}: directions are derived, never read",
                od_file.display()
            );
        }
    }

    let origin_idx = find_column(&headers, &ORIGIN_ALIASES);
    let destination_idx = find_column(&headers, &DESTINATION_ALIASES);
    let trips_idx = find_column(&headers, &TRIPS_ALIASES);
    let missing: Vec<String> = [
        (origin_idx, "origin_id"),
        (destination_idx, "destination_id"),
        (trips_idx, "total_trips"),
    ]
    .iter()
    .filter(|(idx, _)| idx.is_none())
    .map(|(_, name)| name.to_string())
    .collect();
    if !missing.is_empty() {
        return Err(PipelineError::MissingColumns {
            columns: missing,
            path: od_file.to_path_buf(),
        });
    }
    let origin_idx = origin_idx.unwrap_or_default();
    let destination_idx = destination_idx.unwrap_or_default();

    let mut records = vec![];
    for (n, row) in reader.records().enumerate() {
        let record = row.map_err(|e| PipelineError::Parse {
            path: od_file.to_path_buf(),
            message: format!("failure reading OD row {n}: {e}"),
        })?;
        let origin_id = record.get(origin_idx).unwrap_or_default().to_string();
        let destination_id = record.get(destination_idx).unwrap_or_default().to_string();
        let total_trips = trips_idx
            .and_then(|idx| record.get(idx))
            .map(|t| t.to_string());
        records.push(RawOdRecord {
            origin_id,
            destination_id,
            total_trips,
        });
    }
    log::info!("read {} OD rows from {}", records.len(), od_file.display());
    Ok(records)
}
