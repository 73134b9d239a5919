//! Native dialog adapter using `rfd`.
//!
//! Dialogs are modal for the calling thread only; bridge calls run on
//! their own worker threads so the window event loop stays responsive.

use std::path::PathBuf;

use fcut_application::{FileDialogs, FileFilter, HostResult};
use rfd::FileDialog;

/// Blocking native dialogs.
#[derive(Debug, Clone, Default)]
pub struct RfdFileDialogs {
    start_dir: Option<PathBuf>,
}

impl RfdFileDialogs {
    /// Creates dialogs that open in the platform default location.
    #[must_use]
    pub const fn new() -> Self {
        Self { start_dir: None }
    }

    /// Opens dialogs in `dir`.
    #[must_use]
    pub fn with_start_dir(mut self, dir: PathBuf) -> Self {
        self.start_dir = Some(dir);
        self
    }

    fn dialog(&self) -> FileDialog {
        let dialog = FileDialog::new();
        match &self.start_dir {
            Some(dir) => dialog.set_directory(dir),
            None => dialog,
        }
    }
}

impl FileDialogs for RfdFileDialogs {
    fn pick_files(&self, filters: &[FileFilter]) -> HostResult<Option<Vec<PathBuf>>> {
        let dialog = filters.iter().fold(self.dialog(), |dialog, filter| {
            dialog.add_filter(&filter.name, filter.extensions.as_slice())
        });
        Ok(dialog.pick_files())
    }

    fn pick_folder(&self) -> HostResult<Option<PathBuf>> {
        Ok(self.dialog().pick_folder())
    }
}
