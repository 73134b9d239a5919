//! Platform directory resolution.

use std::path::PathBuf;

use fcut_application::{HostError, HostResult};
use fcut_domain::AppPaths;

/// Directory holding the running executable.
///
/// # Errors
///
/// Returns an error if the executable path cannot be determined.
pub fn runtime_dir() -> HostResult<PathBuf> {
    let exe = std::env::current_exe()
        .map_err(|e| HostError::Config(format!("cannot locate executable: {e}")))?;
    exe.parent()
        .map(PathBuf::from)
        .ok_or_else(|| HostError::Config(format!("executable {} has no parent", exe.display())))
}

/// Resolves the host directory layout for `product`.
///
/// # Errors
///
/// Returns an error if the home or data directory is unknown on this
/// platform.
pub fn resolve_paths(product: &str) -> HostResult<AppPaths> {
    let home = dirs::home_dir()
        .ok_or_else(|| HostError::Config("home directory is unknown".to_string()))?;
    let data = dirs::data_dir()
        .ok_or_else(|| HostError::Config("user data directory is unknown".to_string()))?;
    let runtime = runtime_dir()?;

    Ok(AppPaths::from_roots(&home, &data, &runtime, product))
}
