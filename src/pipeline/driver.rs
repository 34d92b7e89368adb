use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use itertools::Itertools;
use kdam::{Bar, BarExt};
use rayon::prelude::*;

use crate::capacity::{CapacityIndex, CheckpointClass, SenseCatalogue};
use crate::congruence::{capacity_score, classify, detour_ratio, Congruence};
use crate::network::{RoadNetwork, VertexId};
use crate::routing::{derive_sense, free_flow_length_m, via_checkpoint_path};
use crate::trips::disaggregate;
use crate::zone::ZoneBinding;

use super::OdRow;

/// everything a checkpoint query shares across its rows: the immutable
/// network, bindings, capacity index and catalogue, plus the checkpoint's
/// identity, bound vertex, and directional/aggregate class. built once per
/// query, before row iteration, and shared read-only by the workers.
pub struct CheckpointContext<'a> {
    pub network: &'a RoadNetwork,
    pub binding: &'a ZoneBinding,
    pub capacity: &'a CapacityIndex,
    pub catalogue: &'a SenseCatalogue,
    pub checkpoint_id: String,
    pub checkpoint_vertex: Option<VertexId>,
    pub class: CheckpointClass,
}

impl<'a> CheckpointContext<'a> {
    pub fn new(
        network: &'a RoadNetwork,
        binding: &'a ZoneBinding,
        capacity: &'a CapacityIndex,
        catalogue: &'a SenseCatalogue,
        checkpoint_id: &str,
    ) -> CheckpointContext<'a> {
        let checkpoint_vertex = binding.vertex_for_checkpoint(checkpoint_id);
        if checkpoint_vertex.is_none() {
            log::warn!(
                "checkpoint '{checkpoint_id}' is not bound to a network vertex; all of its rows \
                 will be impossible"
            );
        }
        let class = capacity.classify(checkpoint_id);
        log::info!("checkpoint '{checkpoint_id}' classified as {class:?}");
        CheckpointContext {
            network,
            binding,
            capacity,
            catalogue,
            checkpoint_id: checkpoint_id.trim().to_string(),
            checkpoint_vertex,
            class,
        }
    }
}

/// runs the full row pipeline for a checkpoint query: route, match capacity,
/// aggregate demand, classify, disaggregate. rows are partitioned disjointly
/// among rayon workers; each worker writes only into its own rows, and the
/// slice order (the input order) is never disturbed. errors inside a row
/// reduce to sentinels, never abort the table.
pub fn process_checkpoint_rows(ctx: &CheckpointContext, rows: &mut [OdRow]) {
    route_rows(ctx, rows);
    let demand_by_sense = aggregate_demand(rows);
    score_rows(ctx, rows, &demand_by_sense);
}

/// a general query does no routing and no capacity work: every row keeps its
/// impossible/zero-vehicle defaults deterministically.
pub fn process_general_rows(rows: &mut [OdRow]) {
    log::info!(
        "general query: emitting {} all-zero vehicle rows without routing",
        rows.len()
    );
}

/// stage one: both shortest paths and the sense code, per row.
fn route_rows(ctx: &CheckpointContext, rows: &mut [OdRow]) {
    let bar = Arc::new(Mutex::new(
        Bar::builder()
            .desc("routing (MC+MC2)")
            .total(rows.len())
            .build()
            .unwrap_or_default(),
    ));
    rows.par_iter_mut().for_each(|row| {
        if let Ok(mut bar) = bar.clone().lock() {
            let _ = bar.update(1);
        }
        route_row(ctx, row);
    });
    eprintln!();
}

fn route_row(ctx: &CheckpointContext, row: &mut OdRow) {
    let origin = ctx.binding.vertex_for_zone(&row.origin_zone);
    let destination = ctx.binding.vertex_for_zone(&row.destination_zone);

    row.mc_length_m = free_flow_length_m(ctx.network, origin, destination);

    let checkpoint = match ctx.checkpoint_vertex {
        Some(v) => v,
        None => return,
    };
    let constrained = match via_checkpoint_path(ctx.network, origin, checkpoint, destination) {
        Some(c) => c,
        None => return,
    };
    row.mc2_length_m = Some(constrained.length_m);
    row.mc2_passes_checkpoint = constrained.passes_checkpoint;
    row.sense_code = derive_sense(
        ctx.network,
        &constrained,
        checkpoint,
        &ctx.checkpoint_id,
        ctx.class,
        ctx.catalogue,
    );
    row.capacity = ctx
        .capacity
        .lookup(&ctx.checkpoint_id, &row.sense_code)
        .copied();
}

/// stage two: total person demand per sense across the rows that pass the
/// hard gates. the capacity score compares this aggregate, not the single
/// row, against the observed throughput.
fn aggregate_demand(rows: &[OdRow]) -> HashMap<String, f64> {
    let mut demand: HashMap<String, f64> = HashMap::new();
    for row in rows.iter().filter(|r| r.passes_hard_gates()) {
        if let Some(key) = row.sense_code.as_key() {
            *demand.entry(key).or_insert(0.0) += row.trips_person as f64;
        }
    }
    for (sense, total) in demand.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
        log::debug!("sense {sense}: total person demand {total}");
    }
    demand
}

/// stage three: congruence classification and vehicle disaggregation.
fn score_rows(ctx: &CheckpointContext, rows: &mut [OdRow], demand_by_sense: &HashMap<String, f64>) {
    rows.par_iter_mut().for_each(|row| {
        row.congruence = classify_row(row, demand_by_sense);
        row.vehicles = disaggregate(
            row.trips_person,
            row.intrazonal,
            row.congruence,
            row.capacity.as_ref(),
        );
    });
    let n_impossible = rows
        .iter()
        .filter(|r| r.congruence == Congruence::Impossible)
        .count();
    log::info!(
        "checkpoint '{}': {} rows, {} impossible",
        ctx.checkpoint_id,
        rows.len(),
        n_impossible
    );
}

fn classify_row(row: &OdRow, demand_by_sense: &HashMap<String, f64>) -> Congruence {
    if !row.passes_hard_gates() {
        return Congruence::Impossible;
    }
    // hard gates guarantee lengths, sense key, and a positive capacity total
    let e1 = match (row.mc_length_m, row.mc2_length_m) {
        (Some(mc), Some(mc2)) => detour_ratio(mc, mc2),
        _ => None,
    };
    let e2 = match (
        row.sense_code.as_key(),
        row.capacity.and_then(|c| c.cap_total()),
    ) {
        (Some(key), Some(cap_total)) => {
            let total_demand = demand_by_sense.get(&key).copied().unwrap_or(0.0);
            capacity_score(total_demand, cap_total)
        }
        _ => return Congruence::Impossible,
    };
    classify(e1, e2)
}
