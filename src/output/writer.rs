use crate::MirrorError;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Writes a Markdown file as UTF-8, refusing to replace an existing file
pub fn write_markdown(path: &Path, content: &str) -> Result<(), MirrorError> {
    let to_error = |source| MirrorError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(to_error)?;
    file.write_all(content.as_bytes()).map_err(to_error)?;
    Ok(())
}
