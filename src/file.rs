// src/file.rs

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use crate::table::{self, ExportFormat};

/// Write `contents` to `path`, creating parent directories as needed.
pub fn save(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    fs::write(path, contents)
}

/// Render a table in `format` and write it to `<dir>/<stem>.<ext>`.
/// Returns the final path written to.
pub fn write_table(
    dir: &Path,
    stem: &str,
    format: ExportFormat,
    headers: &[String],
    rows: &[Vec<String>],
) -> io::Result<PathBuf> {
    let path = dir.join(format!("{stem}.{}", format.ext()));
    save(&path, &table::render(format, headers, rows))?;
    Ok(path)
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        ));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
