use std::path::Path;

use uom::si::f64::Length;
use uom::si::length::meter;

use crate::capacity::{read_capacity_csv, read_catalogue_csv, CapacityIndex, SenseCatalogue};
use crate::network::read_network_geojson;
use crate::pipeline::{
    process_checkpoint_rows, process_general_rows, query_kind_from_filename, read_od_csv,
    trips_person_from_raw, write_diagnostics_csv, write_vehicle_csv, CheckpointContext, OdRow,
    PipelineError, QueryKind,
};
use crate::util::fs::create_dirs;
use crate::zone::{read_polygons_geojson, ZoneBinding, ZoneId};

use super::{AppError, RunConfig};

/// builds the immutable run state (network, bindings, capacity, catalogue)
/// once, then processes each OD file in turn. construction failures abort the
/// run; anything that goes wrong inside a row is a sentinel, not an error.
pub fn run(config: &RunConfig, od_files: &[String], output_directory: &Path) -> Result<(), AppError> {
    log::info!("starting aforo run at {}", chrono::Local::now().to_rfc3339());
    if let Some(parallelism) = config.parallelism {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(parallelism)
            .build_global()
        {
            log::warn!("could not configure {parallelism} worker threads: {e}");
        }
    }

    let network = read_network_geojson(
        Path::new(&config.network_file),
        config.allow_geographic_coordinates,
    )?;
    let polygons = read_polygons_geojson(
        Path::new(&config.zones_file),
        &config.zone_id_property,
        &config.poly_type_property,
    )?;
    let max_snap = config.max_snap_distance_m.map(Length::new::<meter>);
    let binding = ZoneBinding::new(&polygons, &network, max_snap)?;

    let capacity_records = read_capacity_csv(Path::new(&config.capacity_file))?;
    let capacity = CapacityIndex::from_records(&capacity_records)?;
    let catalogue = match &config.sense_catalogue_file {
        Some(file) => read_catalogue_csv(Path::new(file))?,
        None => SenseCatalogue::empty(),
    };

    if !output_directory.as_os_str().is_empty() {
        create_dirs(output_directory).map_err(AppError::InvalidUserInput)?;
    }

    for od_file in od_files.iter() {
        let od_path = Path::new(od_file);
        process_od_file(
            config,
            &network,
            &binding,
            &capacity,
            &catalogue,
            od_path,
            output_directory,
        )?;
    }
    log::info!("finished aforo run at {}", chrono::Local::now().to_rfc3339());
    Ok(())
}

fn process_od_file(
    config: &RunConfig,
    network: &crate::network::RoadNetwork,
    binding: &ZoneBinding,
    capacity: &CapacityIndex,
    catalogue: &SenseCatalogue,
    od_path: &Path,
    output_directory: &Path,
) -> Result<(), AppError> {
    let raw_records = read_od_csv(od_path)?;
    let mut rows: Vec<OdRow> = raw_records
        .iter()
        .map(|record| {
            OdRow::new(
                ZoneId::new(&record.origin_id),
                ZoneId::new(&record.destination_id),
                trips_person_from_raw(record.total_trips.as_deref()),
            )
        })
        .collect();

    match query_kind_from_filename(od_path, &config.checkpoint_prefix) {
        QueryKind::Checkpoint(checkpoint_id) => {
            log::info!(
                "processing '{}' as checkpoint query '{checkpoint_id}'",
                od_path.display()
            );
            let ctx = CheckpointContext::new(network, binding, capacity, catalogue, &checkpoint_id);
            process_checkpoint_rows(&ctx, &mut rows);
        }
        QueryKind::General => {
            log::info!("processing '{}' as general query", od_path.display());
            process_general_rows(&mut rows);
        }
    }

    let stem = od_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .ok_or_else(|| PipelineError::Build(format!("OD file '{}' has no stem", od_path.display())))?;
    let vehicle_file = output_directory.join(format!("{stem}_vehicles.csv"));
    write_vehicle_csv(&rows, &vehicle_file)?;
    log::info!("wrote {}", vehicle_file.display());

    if config.write_diagnostics {
        let diagnostics_file = output_directory.join(format!("{stem}_diagnostics.csv"));
        write_diagnostics_csv(&rows, &diagnostics_file)?;
        log::info!("wrote {}", diagnostics_file.display());
    }
    Ok(())
}
