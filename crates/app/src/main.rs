//! FCut - Main Entry Point
//!
//! Loads configuration, starts logging, then runs the host until the
//! window is closed.

use std::sync::Arc;
use std::time::SystemTime;

use fcut_infrastructure::{
    RfdFileDialogs, clean_old_logs, config_file_path, init_logging, load_config, resolve_paths,
    runtime_dir,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let runtime = runtime_dir()?;
    let config = load_config(&config_file_path(&runtime))?;
    let paths = resolve_paths(&config.product.name)?;

    // Held until exit so buffered lines reach the file.
    let _log_guard = init_logging(&config, &paths.logs)?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        profile = ?config.profile,
        native_window = fcut_ui::has_native_window(),
        "starting {}",
        config.product.name
    );

    if let Err(e) = clean_old_logs(
        &paths.logs,
        config.log_file_prefix(),
        config.logging.retention_days,
        SystemTime::now(),
    ) {
        tracing::warn!("log cleanup failed: {e}");
    }

    let dialogs = Arc::new(RfdFileDialogs::new().with_start_dir(paths.home.clone()));
    let report = fcut::run_host(config, paths, fcut_ui::default_host(), dialogs)?;
    tracing::info!(?report, "exiting");

    Ok(())
}
