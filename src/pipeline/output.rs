use std::path::Path;

use serde::Serialize;

use super::{OdRow, PipelineError};
use crate::util::fs::serialize_into_csv;

/// one row of the deliverable vehicle table. the schema is fixed: origin,
/// destination, the six vehicle categories, and the recomputed total, in
/// input row order, and nothing else.
#[derive(Debug, Clone, Serialize)]
pub struct OutputRecord {
    #[serde(rename = "Origen")]
    pub origen: String,
    #[serde(rename = "Destino")]
    pub destino: String,
    #[serde(rename = "veh_M")]
    pub veh_m: f64,
    #[serde(rename = "veh_A")]
    pub veh_a: f64,
    #[serde(rename = "veh_B")]
    pub veh_b: f64,
    #[serde(rename = "veh_CU")]
    pub veh_cu: f64,
    #[serde(rename = "veh_CAI")]
    pub veh_cai: f64,
    #[serde(rename = "veh_CAII")]
    pub veh_caii: f64,
    #[serde(rename = "veh_total")]
    pub veh_total: f64,
}

impl From<&OdRow> for OutputRecord {
    fn from(row: &OdRow) -> OutputRecord {
        OutputRecord {
            origen: row.origin_zone.to_string(),
            destino: row.destination_zone.to_string(),
            veh_m: row.vehicles.by_class[0],
            veh_a: row.vehicles.by_class[1],
            veh_b: row.vehicles.by_class[2],
            veh_cu: row.vehicles.by_class[3],
            veh_cai: row.vehicles.by_class[4],
            veh_caii: row.vehicles.by_class[5],
            veh_total: row.vehicles.total,
        }
    }
}

pub fn write_vehicle_csv(rows: &[OdRow], output_file: &Path) -> Result<(), PipelineError> {
    serialize_into_csv(
        rows.iter().map(OutputRecord::from),
        output_file,
        "write vehicle table",
    )
    .map_err(|message| PipelineError::Write {
        path: output_file.to_path_buf(),
        message,
    })
}

/// wide diagnostics row mirroring the intermediate columns of the pipeline.
/// written next to the main output on request; never part of the deliverable
/// schema.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticsRecord {
    pub origen: String,
    pub destino: String,
    pub trips_person: u64,
    pub intrazonal_factor: u8,
    pub mc_length_m: Option<f64>,
    pub mc2_length_m: Option<f64>,
    pub mc2_passes_checkpoint: bool,
    pub sense_code: String,
    pub congruence_id: u8,
    pub congruence_label: String,
    pub ratio_dist: Option<f64>,
    pub veh_total: f64,
}

impl From<&OdRow> for DiagnosticsRecord {
    fn from(row: &OdRow) -> DiagnosticsRecord {
        let ratio_dist = match (row.mc_length_m, row.mc2_length_m) {
            (Some(mc), Some(mc2)) if mc > 0.0 => Some(mc2 / mc),
            _ => None,
        };
        DiagnosticsRecord {
            origen: row.origin_zone.to_string(),
            destino: row.destination_zone.to_string(),
            trips_person: row.trips_person,
            intrazonal_factor: row.intrazonal as u8,
            mc_length_m: row.mc_length_m,
            mc2_length_m: row.mc2_length_m,
            mc2_passes_checkpoint: row.mc2_passes_checkpoint,
            sense_code: row.sense_code.to_string(),
            congruence_id: row.congruence.id(),
            congruence_label: row.congruence.label().to_string(),
            ratio_dist,
            veh_total: row.vehicles.total,
        }
    }
}

pub fn write_diagnostics_csv(rows: &[OdRow], output_file: &Path) -> Result<(), PipelineError> {
    serialize_into_csv(
        rows.iter().map(DiagnosticsRecord::from),
        output_file,
        "write diagnostics table",
    )
    .map_err(|message| PipelineError::Write {
        path: output_file.to_path_buf(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::ZoneId;

    #[test]
    fn test_output_schema_and_row_order() {
        let rows = vec![
            OdRow::new(ZoneId::new("1002"), ZoneId::new("1001"), 250),
            OdRow::new(ZoneId::new("1001"), ZoneId::new("1002"), 30),
        ];
        let dir = tempfile::tempdir().expect("temp dir");
        let output_file = dir.path().join("checkpoint2003_vehicles.csv");
        write_vehicle_csv(&rows, &output_file).expect("output written");

        let content = std::fs::read_to_string(&output_file).expect("output readable");
        let mut lines = content.lines();
        assert_eq!(
            lines.next(),
            Some("Origen,Destino,veh_M,veh_A,veh_B,veh_CU,veh_CAI,veh_CAII,veh_total")
        );
        let first = lines.next().expect("first data row");
        assert!(first.starts_with("1002,1001,"));
        let second = lines.next().expect("second data row");
        assert!(second.starts_with("1001,1002,"));
        assert_eq!(lines.next(), None);
    }
}
