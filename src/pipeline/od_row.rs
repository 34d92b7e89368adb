use crate::capacity::CapacityRecord;
use crate::congruence::Congruence;
use crate::model::SenseCode;
use crate::trips::VehicleTrips;
use crate::zone::ZoneId;

/// one OD table row and everything derived for it along the pipeline. rows
/// start with every derived field at its sentinel and are filled in stages;
/// a row that never leaves its sentinels reads as impossible with zero
/// vehicles, which is exactly the contract for rows whose computation fails.
#[derive(Debug, Clone)]
pub struct OdRow {
    pub origin_zone: ZoneId,
    pub destination_zone: ZoneId,
    pub trips_person: u64,
    /// true when origin and destination are the same zone: the trip crosses
    /// no zone boundary and contributes no vehicles.
    pub intrazonal: bool,
    pub mc_length_m: Option<f64>,
    pub mc2_length_m: Option<f64>,
    pub mc2_passes_checkpoint: bool,
    pub sense_code: SenseCode,
    pub capacity: Option<CapacityRecord>,
    pub congruence: Congruence,
    pub vehicles: VehicleTrips,
}

impl OdRow {
    pub fn new(origin_zone: ZoneId, destination_zone: ZoneId, trips_person: u64) -> OdRow {
        let intrazonal = origin_zone == destination_zone;
        OdRow {
            origin_zone,
            destination_zone,
            trips_person,
            intrazonal,
            mc_length_m: None,
            mc2_length_m: None,
            mc2_passes_checkpoint: false,
            sense_code: SenseCode::Invalid,
            capacity: None,
            congruence: Congruence::Impossible,
            vehicles: VehicleTrips::zero(),
        }
    }

    /// the hard congruence gates: both routes exist, the sense is usable, and
    /// a capacity record with a positive total matched. any failure is an
    /// immediate class 4.
    pub fn passes_hard_gates(&self) -> bool {
        self.mc_length_m.is_some()
            && self.mc2_length_m.is_some()
            && !self.sense_code.is_invalid()
            && self
                .capacity
                .and_then(|record| record.cap_total())
                .map(|total| total > 0.0)
                .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_row_is_impossible_with_zero_vehicles() {
        let row = OdRow::new(ZoneId::new("1002"), ZoneId::new("1001"), 250);
        assert!(!row.intrazonal);
        assert_eq!(row.congruence, Congruence::Impossible);
        assert_eq!(row.vehicles, VehicleTrips::zero());
        assert!(!row.passes_hard_gates());
    }

    #[test]
    fn test_intrazonal_detection() {
        let row = OdRow::new(ZoneId::new("1001"), ZoneId::new("1001"), 250);
        assert!(row.intrazonal);
        let row = OdRow::new(ZoneId::new(" 1001 "), ZoneId::new("1001"), 250);
        assert!(row.intrazonal, "zone ids compare trimmed");
    }
}
