use serde::{Deserialize, Serialize};

/// the six vehicle categories observed at a checkpoint gauging station.
/// the short names follow the gauging report column convention:
/// motorcycles (M), autos (A), buses (B), unit trucks (CU), and articulated
/// trucks with one (CAI) or two (CAII) trailers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleClass {
    M,
    A,
    B,
    CU,
    CAI,
    CAII,
}

impl VehicleClass {
    pub const ALL: [VehicleClass; 6] = [
        VehicleClass::M,
        VehicleClass::A,
        VehicleClass::B,
        VehicleClass::CU,
        VehicleClass::CAI,
        VehicleClass::CAII,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleClass::M => "M",
            VehicleClass::A => "A",
            VehicleClass::B => "B",
            VehicleClass::CU => "CU",
            VehicleClass::CAI => "CAI",
            VehicleClass::CAII => "CAII",
        }
    }

    /// position of this class in capacity and occupancy vectors.
    pub fn index(&self) -> usize {
        match self {
            VehicleClass::M => 0,
            VehicleClass::A => 1,
            VehicleClass::B => 2,
            VehicleClass::CU => 3,
            VehicleClass::CAI => 4,
            VehicleClass::CAII => 5,
        }
    }
}

impl std::fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
