//! Native dialog port

use std::path::PathBuf;

use crate::HostResult;

/// Named extension filter for file dialogs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    /// Label shown in the dialog.
    pub name: String,
    /// Extensions without the leading dot; `*` matches everything.
    pub extensions: Vec<String>,
}

impl FileFilter {
    /// Creates a filter from a label and extension list.
    #[must_use]
    pub fn new(name: impl Into<String>, extensions: &[&str]) -> Self {
        Self {
            name: name.into(),
            extensions: extensions.iter().map(|e| (*e).to_string()).collect(),
        }
    }
}

/// Native open dialogs. `Ok(None)` means the user cancelled.
pub trait FileDialogs: Send + Sync {
    /// Multi-selection file picker.
    ///
    /// # Errors
    ///
    /// Returns an error only if the dialog could not be shown.
    fn pick_files(&self, filters: &[FileFilter]) -> HostResult<Option<Vec<PathBuf>>>;

    /// Single directory picker.
    ///
    /// # Errors
    ///
    /// Returns an error only if the dialog could not be shown.
    fn pick_folder(&self) -> HostResult<Option<PathBuf>>;
}
