use crate::capacity::CapacityRecord;
use crate::congruence::Congruence;
use crate::model::VehicleClass;

/// vehicle counts per category for one OD row, in the order of
/// [VehicleClass::ALL]. totals follow the category values: all finite sums,
/// any NaN poisons the total.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VehicleTrips {
    pub by_class: [f64; 6],
    pub total: f64,
}

impl VehicleTrips {
    pub fn zero() -> VehicleTrips {
        VehicleTrips {
            by_class: [0.0; 6],
            total: 0.0,
        }
    }

    pub fn get(&self, class: VehicleClass) -> f64 {
        self.by_class[class.index()]
    }
}

/// disaggregates a person-trip count into vehicle trips using the capacity
/// shares and occupancy factors of the matched capacity record:
///
/// ```text
/// veh_k = trips_person * (1 - intrazonal) * fa * (cap_k / cap_total) / focup_k
/// ```
///
/// gates, in order: an impossible row is all zeros; an intrazonal row is all
/// zeros; a missing capacity, occupancy, or adjustment component makes the
/// affected category NaN, and NaN is propagated, never coerced to zero. the
/// capacity shares are used exactly as they come; they sum to one by
/// construction and are not renormalised.
///
/// this is a pure function: identical inputs produce bit-identical outputs.
pub fn disaggregate(
    trips_person: u64,
    intrazonal: bool,
    congruence: Congruence,
    capacity: Option<&CapacityRecord>,
) -> VehicleTrips {
    if congruence == Congruence::Impossible {
        return VehicleTrips::zero();
    }
    if intrazonal {
        return VehicleTrips::zero();
    }
    // a row that is neither impossible nor intrazonal always carries a
    // capacity record with a positive total; both are hard gates upstream.
    let record = match capacity {
        Some(record) => record,
        None => return VehicleTrips::zero(),
    };
    let cap_total = match record.cap_total() {
        Some(total) if total > 0.0 => total,
        _ => return VehicleTrips::zero(),
    };

    let trips = trips_person as f64;
    let mut by_class = [f64::NAN; 6];
    for class in VehicleClass::ALL {
        let k = class.index();
        by_class[k] = match (record.cap(class), record.focup(class), record.fa) {
            (Some(cap), Some(focup), Some(fa)) => trips * fa * (cap / cap_total) / focup,
            _ => f64::NAN,
        };
    }
    let total = if by_class.iter().any(|v| v.is_nan()) {
        f64::NAN
    } else {
        by_class.iter().sum()
    };
    VehicleTrips { by_class, total }
}
