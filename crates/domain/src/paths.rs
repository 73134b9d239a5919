//! Per-user and per-install directories the host consumes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Directory layout resolved once at startup.
///
/// - `app_data`: `<user data dir>/<product>`
/// - `logs`: `<app_data>/Logs`
/// - `runtime`: directory holding the executable
/// - `bin`: `<runtime>/bin`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppPaths {
    /// User home directory.
    pub home: PathBuf,
    /// Per-user application data directory.
    pub app_data: PathBuf,
    /// Log destination.
    pub logs: PathBuf,
    /// Directory of the running executable.
    pub runtime: PathBuf,
    /// Bundled helper binaries.
    pub bin: PathBuf,
}

impl AppPaths {
    /// Derives the layout from the three platform roots.
    #[must_use]
    pub fn from_roots(home: &Path, data_dir: &Path, runtime: &Path, product: &str) -> Self {
        let app_data = data_dir.join(product);
        Self {
            home: home.to_path_buf(),
            logs: app_data.join("Logs"),
            app_data,
            runtime: runtime.to_path_buf(),
            bin: runtime.join("bin"),
        }
    }

    /// Platform default downloads directory: `<home>/Downloads`.
    #[must_use]
    pub fn downloads(&self) -> PathBuf {
        self.home.join("Downloads")
    }

    /// Resolves a configured path against the runtime directory.
    ///
    /// Absolute paths are returned unchanged.
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.runtime.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> AppPaths {
        AppPaths::from_roots(
            Path::new("/home/ana"),
            Path::new("/home/ana/.local/share"),
            Path::new("/opt/fcut"),
            "FCut",
        )
    }

    #[test]
    fn layout_from_roots() {
        let paths = sample();
        assert_eq!(paths.app_data, PathBuf::from("/home/ana/.local/share/FCut"));
        assert_eq!(paths.logs, PathBuf::from("/home/ana/.local/share/FCut/Logs"));
        assert_eq!(paths.bin, PathBuf::from("/opt/fcut/bin"));
    }

    #[test]
    fn downloads_is_under_home() {
        assert_eq!(sample().downloads(), PathBuf::from("/home/ana/Downloads"));
    }

    #[test]
    fn relative_paths_resolve_against_runtime() {
        let paths = sample();
        assert_eq!(
            paths.resolve(Path::new("src/ui/dist")),
            PathBuf::from("/opt/fcut/src/ui/dist")
        );
        assert_eq!(paths.resolve(Path::new("/srv/ui")), PathBuf::from("/srv/ui"));
    }
}
