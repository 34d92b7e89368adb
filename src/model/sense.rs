use serde::{Deserialize, Serialize};

/// cardinal code of a bearing at the checkpoint, in the convention used by
/// the gauging capacity tables: N=1, E=2, W=3, S=4.
///
/// the quadrant partition over planar bearings (degrees, atan2 convention)
/// is [-45, 45) -> E, [45, 135) -> N, [135, 225) -> W, remainder -> S.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cardinal {
    North,
    East,
    West,
    South,
}

impl Cardinal {
    /// numeric code used in sense strings such as "4-2".
    pub fn code(&self) -> u8 {
        match self {
            Cardinal::North => 1,
            Cardinal::East => 2,
            Cardinal::West => 3,
            Cardinal::South => 4,
        }
    }

    /// maps a planar bearing in degrees to its cardinal quadrant. the input
    /// may be any finite angle; it is normalized into [-180, 180) first.
    pub fn from_bearing_deg(bearing_deg: f64) -> Cardinal {
        let mut deg = bearing_deg.rem_euclid(360.0);
        if deg >= 180.0 {
            deg -= 360.0;
        }
        if (-45.0..45.0).contains(&deg) {
            Cardinal::East
        } else if (45.0..135.0).contains(&deg) {
            Cardinal::North
        } else if (-135.0..-45.0).contains(&deg) {
            Cardinal::South
        } else {
            Cardinal::West
        }
    }
}

impl std::fmt::Display for Cardinal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// direction of a trip at its checkpoint.
///
/// aggregate checkpoints record all traffic under the single sense "0", so no
/// direction is ever derived for them. directional checkpoints take their
/// sense from the inbound and outbound bearings of the constrained path at
/// the checkpoint vertex. a trip whose geometry cannot produce a sense, or
/// whose candidate is not permitted by the sense catalogue, is Invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SenseCode {
    Aggregate,
    Directional(Cardinal, Cardinal),
    Invalid,
}

impl SenseCode {
    /// the capacity-table key for this sense, if it has one. Invalid senses
    /// have no key and can never match a capacity row.
    pub fn as_key(&self) -> Option<String> {
        match self {
            SenseCode::Aggregate => Some("0".to_string()),
            SenseCode::Directional(inbound, outbound) => Some(format!("{inbound}-{outbound}")),
            SenseCode::Invalid => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, SenseCode::Invalid)
    }
}

impl std::fmt::Display for SenseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.as_key() {
            Some(key) => write!(f, "{key}"),
            None => write!(f, "invalid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal_quadrants() {
        assert_eq!(Cardinal::from_bearing_deg(0.0), Cardinal::East);
        assert_eq!(Cardinal::from_bearing_deg(44.9), Cardinal::East);
        assert_eq!(Cardinal::from_bearing_deg(45.0), Cardinal::North);
        assert_eq!(Cardinal::from_bearing_deg(90.0), Cardinal::North);
        assert_eq!(Cardinal::from_bearing_deg(134.9), Cardinal::North);
        assert_eq!(Cardinal::from_bearing_deg(135.0), Cardinal::West);
        assert_eq!(Cardinal::from_bearing_deg(180.0), Cardinal::West);
        assert_eq!(Cardinal::from_bearing_deg(-180.0), Cardinal::West);
        assert_eq!(Cardinal::from_bearing_deg(-135.1), Cardinal::West);
        assert_eq!(Cardinal::from_bearing_deg(-135.0), Cardinal::South);
        assert_eq!(Cardinal::from_bearing_deg(-90.0), Cardinal::South);
        assert_eq!(Cardinal::from_bearing_deg(-45.0), Cardinal::East);
    }

    #[test]
    fn test_cardinal_normalizes_out_of_range_angles() {
        assert_eq!(Cardinal::from_bearing_deg(360.0), Cardinal::East);
        assert_eq!(Cardinal::from_bearing_deg(450.0), Cardinal::North);
        assert_eq!(Cardinal::from_bearing_deg(-270.0), Cardinal::North);
        assert_eq!(Cardinal::from_bearing_deg(270.0), Cardinal::South);
    }

    #[test]
    fn test_sense_keys() {
        let sense = SenseCode::Directional(Cardinal::South, Cardinal::East);
        assert_eq!(sense.as_key(), Some("4-2".to_string()));
        assert_eq!(SenseCode::Aggregate.as_key(), Some("0".to_string()));
        assert_eq!(SenseCode::Invalid.as_key(), None);
    }
}
