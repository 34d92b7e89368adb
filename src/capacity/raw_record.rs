use serde::{Deserialize, Serialize};

/// one gauging-station row of the capacity file, before aggregation by
/// (checkpoint, sense). empty cells deserialize as missing, never as zero.
///
/// the TOTAL column is carried through deserialization but never used: the
/// index always recomputes the total from the six category capacities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCapacityRecord {
    #[serde(rename = "Checkpoint")]
    pub checkpoint: String,
    #[serde(rename = "Sentido")]
    pub sentido: String,
    #[serde(rename = "M")]
    pub cap_m: Option<f64>,
    #[serde(rename = "A")]
    pub cap_a: Option<f64>,
    #[serde(rename = "B")]
    pub cap_b: Option<f64>,
    #[serde(rename = "CU")]
    pub cap_cu: Option<f64>,
    #[serde(rename = "CAI")]
    pub cap_cai: Option<f64>,
    #[serde(rename = "CAII")]
    pub cap_caii: Option<f64>,
    #[serde(rename = "TOTAL")]
    pub total: Option<f64>,
    #[serde(rename = "FA")]
    pub fa: Option<f64>,
    #[serde(rename = "Focup_M")]
    pub focup_m: Option<f64>,
    #[serde(rename = "Focup_A")]
    pub focup_a: Option<f64>,
    #[serde(rename = "Focup_B")]
    pub focup_b: Option<f64>,
    #[serde(rename = "Focup_CU")]
    pub focup_cu: Option<f64>,
    #[serde(rename = "Focup_CAI")]
    pub focup_cai: Option<f64>,
    #[serde(rename = "Focup_CAII")]
    pub focup_caii: Option<f64>,
}

impl RawCapacityRecord {
    pub fn caps(&self) -> [Option<f64>; 6] {
        [
            self.cap_m,
            self.cap_a,
            self.cap_b,
            self.cap_cu,
            self.cap_cai,
            self.cap_caii,
        ]
    }

    pub fn focups(&self) -> [Option<f64>; 6] {
        [
            self.focup_m,
            self.focup_a,
            self.focup_b,
            self.focup_cu,
            self.focup_cai,
            self.focup_caii,
        ]
    }
}
