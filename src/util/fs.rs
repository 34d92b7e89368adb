use std::fs::File;
use std::path::Path;

use csv::QuoteStyle;
use kdam::tqdm;
use serde::Serialize;

/// helper function to "mkdir -p path" - make all directories along a path
pub fn create_dirs<P>(path: P) -> Result<(), String>
where
    P: AsRef<Path>,
{
    let dirspath = path.as_ref();
    if !dirspath.is_dir() {
        std::fs::create_dir_all(dirspath).map_err(|e| {
            format!(
                "error building output directory '{}': {e}",
                dirspath.to_str().unwrap_or_default()
            )
        })
    } else {
        Ok(())
    }
}

/// serializes an iterator of records into a headed CSV file, with a progress
/// bar. the file is always (over)written in full; partial outputs from a
/// failed write are not kept consistent.
pub fn serialize_into_csv<I>(iterable: I, filepath: &Path, desc: &str) -> Result<(), String>
where
    I: IntoIterator,
    I::IntoIter: ExactSizeIterator,
    I::Item: Serialize,
{
    let file = File::create(filepath).map_err(|e| {
        format!(
            "failure opening output file '{}': {e}",
            filepath.to_string_lossy()
        )
    })?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(file);

    let iter = iterable.into_iter();
    let total = iter.len();
    let bar_iter = tqdm!(iter, total = total, desc = desc);
    for element in bar_iter {
        writer
            .serialize(element)
            .map_err(|e| format!("failed to write to {}: {e}", filepath.to_string_lossy()))?;
    }
    eprintln!();
    writer
        .flush()
        .map_err(|e| format!("failed to flush {}: {e}", filepath.to_string_lossy()))?;
    Ok(())
}
