//! Flat-file load and save, UTF-8 only.

use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log};
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Save name used when no file has been loaded.
pub const DEFAULT_SAVE_NAME: &str = "duplicated_text.txt";

/// Suffix appended to the loaded file's stem for the suggested save name.
pub const SAVE_SUFFIX: &str = "_duplicated";

/// Extensions offered by the open prompt as text files.
pub const TEXT_EXTENSIONS: &[&str] = &["txt", "py", "js", "java", "cpp", "c", "html", "css", "md"];

/// Read a whole file as UTF-8.
///
/// Invalid UTF-8 is reported as an I/O error of kind `InvalidData`.
pub fn load(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| Error::io(path, io::Error::new(io::ErrorKind::InvalidData, e)))?;
    emit_log(
        LogLevel::Debug,
        &format!("loaded {} ({} bytes)", path.display(), text.len()),
    );
    Ok(text)
}

/// Write `text` to `path`, replacing any existing file.
///
/// Data goes to a hidden sibling file that is renamed over the target, so a
/// failed write leaves the previous file as it was. A symlink is followed and
/// its target replaced; an existing file keeps its permissions.
pub fn save(path: impl AsRef<Path>, text: &str) -> Result<()> {
    let path = path.as_ref();
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let tmp = temp_sibling(&target);

    let written = fs::File::create(&tmp).and_then(|mut file| {
        file.write_all(text.as_bytes())?;
        if let Ok(existing) = fs::metadata(&target) {
            file.set_permissions(existing.permissions())?;
        }
        file.sync_all()
    });
    if let Err(e) = written.and_then(|()| fs::rename(&tmp, &target)) {
        let _ = fs::remove_file(&tmp);
        return Err(Error::io(path, e));
    }

    emit_log(
        LogLevel::Debug,
        &format!("saved {} ({} bytes)", path.display(), text.len()),
    );
    Ok(())
}

/// Default save target: `<stem>_duplicated<.ext>` beside the loaded file.
#[must_use]
pub fn suggested_save_path(current: Option<&Path>) -> PathBuf {
    let Some(current) = current else {
        return PathBuf::from(DEFAULT_SAVE_NAME);
    };
    let mut name = current
        .file_stem()
        .map_or_else(OsString::new, ToOwned::to_owned);
    name.push(SAVE_SUFFIX);
    if let Some(ext) = current.extension() {
        name.push(".");
        name.push(ext);
    }
    current.with_file_name(name)
}

/// Whether the open prompt lists this path as a text file.
#[must_use]
pub fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            TEXT_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Display name of a path for the file label.
#[must_use]
pub fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}
