//! gapfill - gap-limited interpolation for time-series CSV files
//!
//! This is the main entry point for the gapfill command-line tool.

use std::io;
use tracing::{error, info};

use gapfill::csv_io::{read_table_from_path, write_table, write_table_to_path};
use gapfill::{
    init_tracing, log_error, log_table_stats, log_timed_operation, run_pipeline, Config,
    Diagnostics, Result,
};

fn main() -> Result<()> {
    // Load configuration before logging so the configured level applies
    let (config, paths) = Config::load()?;
    init_tracing(&config.log_level);

    info!("Starting gapfill v{}", env!("CARGO_PKG_VERSION"));

    // Validate configuration
    config.validate().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    info!("Loading CSV file: {:?}", paths.input);

    let table = read_table_from_path(&paths.input, config.input.time_column.as_deref())
        .map_err(|e| {
            log_error(&e, "loading input");
            e
        })?;
    log_table_stats("input", &table);

    let mut diagnostics = Diagnostics::new(paths.input.display().to_string());
    let table = log_timed_operation("pipeline", || {
        run_pipeline(table, &config.pipeline, &mut diagnostics)
    })
    .map_err(|e| {
        log_error(&e, "running pipeline");
        e
    })?;
    log_table_stats("output", &table);

    let time_column = &config.input.output_time_column;
    match &paths.output {
        Some(path) => write_table_to_path(path, &table, time_column)?,
        None => write_table(io::stdout().lock(), &table, time_column)?,
    }

    info!(
        steps = config.pipeline.len(),
        warnings = diagnostics.warnings().count(),
        "gapfill finished"
    );
    Ok(())
}
