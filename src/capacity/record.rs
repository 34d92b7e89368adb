use serde::{Deserialize, Serialize};

use crate::model::VehicleClass;

/// per-direction vehicle throughput of a checkpoint, aggregated over its
/// gauging stations: six category capacities, an adjustment factor, and six
/// occupancy factors. any component may be missing; missing is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityRecord {
    pub cap: [Option<f64>; 6],
    pub fa: Option<f64>,
    pub focup: [Option<f64>; 6],
}

impl CapacityRecord {
    pub fn cap(&self, class: VehicleClass) -> Option<f64> {
        self.cap[class.index()]
    }

    pub fn focup(&self, class: VehicleClass) -> Option<f64> {
        self.focup[class.index()]
    }

    /// total capacity across the six categories. defined only when every
    /// category capacity is present; a partial six-tuple has no total.
    pub fn cap_total(&self) -> Option<f64> {
        self.cap
            .iter()
            .try_fold(0.0, |acc, c| c.map(|value| acc + value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cap_total_requires_all_six_categories() {
        let mut record = CapacityRecord {
            cap: [
                Some(100.0),
                Some(50.0),
                Some(30.0),
                Some(20.0),
                Some(10.0),
                Some(5.0),
            ],
            fa: Some(1.1),
            focup: [Some(1.0); 6],
        };
        assert_eq!(record.cap_total(), Some(215.0));

        record.cap[3] = None;
        assert_eq!(record.cap_total(), None);
    }

    #[test]
    fn test_class_accessors() {
        let record = CapacityRecord {
            cap: [Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(5.0), Some(6.0)],
            fa: Some(1.0),
            focup: [Some(1.2), None, Some(1.3), Some(1.0), Some(1.0), Some(1.0)],
        };
        assert_eq!(record.cap(VehicleClass::M), Some(1.0));
        assert_eq!(record.cap(VehicleClass::CAII), Some(6.0));
        assert_eq!(record.focup(VehicleClass::A), None);
    }
}
