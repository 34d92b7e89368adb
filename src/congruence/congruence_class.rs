use serde::{Deserialize, Serialize};

/// discrete plausibility of a trip given its route and the checkpoint
/// capacity. class 4 gates the vehicle computation to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Congruence {
    ExtremelyPossible,
    Possible,
    Unlikely,
    Impossible,
}

impl Congruence {
    pub fn id(&self) -> u8 {
        match self {
            Congruence::ExtremelyPossible => 1,
            Congruence::Possible => 2,
            Congruence::Unlikely => 3,
            Congruence::Impossible => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Congruence::ExtremelyPossible => "Extremely possible",
            Congruence::Possible => "Possible",
            Congruence::Unlikely => "Unlikely",
            Congruence::Impossible => "Impossible",
        }
    }
}

impl std::fmt::Display for Congruence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}
