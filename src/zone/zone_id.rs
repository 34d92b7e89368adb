use serde::{Deserialize, Serialize};

/// identifier of a survey zone. zone ids come from the zonification polygon
/// file and from the OD table; both sides are compared as trimmed strings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ZoneId(pub String);

impl ZoneId {
    pub fn new<S: AsRef<str>>(value: S) -> ZoneId {
        ZoneId(value.as_ref().trim().to_string())
    }
}

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
