//! JSON file helpers with atomic writes
//!
//! A write goes to `<name>.tmp` in the same directory, is synced, and is
//! then renamed over the target, so a crash leaves either the old or the new
//! file and never a torn one.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{LedgerError, LedgerResult};

fn storage_error(action: &str, path: &Path, err: impl std::fmt::Display) -> LedgerError {
    LedgerError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// Read JSON from `path`; a missing file yields `T::default()`
pub fn read_json<T, P>(path: P) -> LedgerResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(storage_error("open", path, e)),
    };

    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_error("parse", path, e))
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write `data` as pretty JSON to `path` atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> LedgerResult<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let temp_path = stage_json(path, data)?;
    commit_staged(&temp_path, path)
}

/// Write `data` to the temp file beside `path` and sync it, leaving `path`
/// itself untouched
///
/// Returns the temp path to hand to [`commit_staged`]. On error no temp file
/// is left behind.
pub fn stage_json<T, P>(path: P, data: &T) -> LedgerResult<PathBuf>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| storage_error("create directory", parent, e))?;
    }

    let temp_path = temp_path_for(path);
    let result = (|| -> LedgerResult<()> {
        let file = File::create(&temp_path).map_err(|e| storage_error("create", &temp_path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, data)
            .map_err(|e| storage_error("serialize", path, e))?;
        writer
            .flush()
            .map_err(|e| storage_error("flush", &temp_path, e))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| storage_error("sync", &temp_path, e))
    })();

    match result {
        Ok(()) => Ok(temp_path),
        Err(e) => {
            discard_staged(&temp_path);
            Err(e)
        }
    }
}

/// Rename a staged temp file over its target
pub fn commit_staged(temp_path: &Path, path: &Path) -> LedgerResult<()> {
    fs::rename(temp_path, path).map_err(|e| {
        discard_staged(temp_path);
        storage_error("replace", path, e)
    })
}

/// Remove a staged temp file that will not be committed
pub fn discard_staged(temp_path: &Path) {
    let _ = fs::remove_file(temp_path);
}

/// Whether `path` exists and holds well-formed JSON
pub fn json_file_valid<P: AsRef<Path>>(path: P) -> bool {
    File::open(path.as_ref())
        .ok()
        .map(|file| serde_json::from_reader::<_, serde_json::Value>(BufReader::new(file)).is_ok())
        .unwrap_or(false)
}
