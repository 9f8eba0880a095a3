//! MessagePack persistence for trained artifacts.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use rmp_serde::{decode::from_read, encode::write_named};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Serializes `value` to `path`, replacing the file only once it is fully written.
pub fn save_to_file<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let mut tmp = temp_sibling(path)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        write_named(&mut writer, value)?;
        writer.flush()?;
    }
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

/// Loads an artifact written by [`save_to_file`].
pub fn load_from_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(Error::MissingArtifact(path.to_path_buf()));
    }
    let reader = BufReader::new(File::open(path)?);
    Ok(from_read(reader)?)
}

/// Writes a text artifact with the same all-or-nothing guarantee.
pub fn write_text(path: &Path, contents: &str) -> Result<()> {
    let mut tmp = temp_sibling(path)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

/// A temp file in the destination directory, so the final rename stays on one filesystem.
pub(crate) fn temp_sibling(path: &Path) -> Result<NamedTempFile> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;
    Ok(NamedTempFile::new_in(parent)?)
}
