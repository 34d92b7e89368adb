use super::Congruence;

/// one relative ULP of slack on the e1 band edges, so a ratio that lands
/// exactly on a boundary after floating-point division does not flap between
/// classes.
const SLACK: f64 = f64::EPSILON;

fn ge(value: f64, bound: f64) -> bool {
    value >= bound * (1.0 - SLACK)
}

fn le(value: f64, bound: f64) -> bool {
    value <= bound * (1.0 + SLACK)
}

/// classifies a row that has already passed the hard gates (routes exist,
/// sense valid, capacity present with a positive total). conditions are
/// evaluated top-down; the first match wins. an undefined detour ratio never
/// matches and falls through to Impossible.
pub fn classify(e1: Option<f64>, e2: f64) -> Congruence {
    let e1 = match e1 {
        Some(value) if value.is_finite() => value,
        _ => return Congruence::Impossible,
    };
    if ge(e1, 0.9) && le(e1, 1.2) && e2 >= 0.8 {
        Congruence::ExtremelyPossible
    } else if ge(e1, 0.8) && le(e1, 1.5) && e2 >= 0.5 {
        Congruence::Possible
    } else if e1 < 2.0 {
        Congruence::Unlikely
    } else {
        Congruence::Impossible
    }
}
