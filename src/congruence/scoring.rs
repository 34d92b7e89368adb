/// e1, the detour ratio: constrained over unconstrained path length. a value
/// near 1 means the checkpoint lies on (or near) the natural route. undefined
/// when the free-flow length is zero, which happens when two distinct zones
/// bind to the same vertex.
pub fn detour_ratio(mc_length_m: f64, mc2_length_m: f64) -> Option<f64> {
    if mc_length_m > 0.0 {
        Some(mc2_length_m / mc_length_m)
    } else {
        None
    }
}

/// e2, the capacity score: a step function of the ratio between the person
/// demand asserted for a (checkpoint, sense) and its observed total capacity.
/// demand comfortably under capacity scores 1.0, demand roughly at capacity
/// scores 0.5, demand over capacity scores 0.0.
pub fn capacity_score(total_demand: f64, cap_total: f64) -> f64 {
    if cap_total <= 0.0 {
        return 0.0;
    }
    let ratio = total_demand / cap_total;
    if ratio <= 0.8 {
        1.0
    } else if ratio <= 1.2 {
        0.5
    } else {
        0.0
    }
}
