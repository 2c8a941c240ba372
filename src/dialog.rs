//! Native file pickers.

use std::path::PathBuf;

pub fn pick_open(filter: &str, extensions: &[&str]) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter(filter, extensions)
        .pick_file()
}

/// Save dialog; `extension` is appended when the user typed a bare name.
pub fn pick_save(filter: &str, extension: &str, file_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter(filter, &[extension])
        .set_file_name(file_name)
        .save_file()
        .map(|path| with_default_extension(path, extension))
}

fn with_default_extension(path: PathBuf, extension: &str) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(extension)
    }
}
