//! Idempotent filesystem primitives used by the install sequence.

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::{
    application::{
        InstallError,
        ports::{EntryKind, Filesystem},
    },
    domain::{CONFIG_FILE_MODE, DIR_MODE},
    error::InstallResult,
};

/// Make sure `path` is a directory, creating it and its parents if absent.
///
/// An existing directory is left untouched (mode included), so re-runs
/// succeed. Anything else at `path` is a [`InstallError::NotADirectory`].
#[instrument(skip_all, fields(path = %path.display()))]
pub fn ensure_directory(fs: &dyn Filesystem, path: &Path) -> InstallResult<()> {
    match fs.entry_kind(path) {
        EntryKind::Directory => {
            debug!("Directory already present");
            Ok(())
        }
        EntryKind::Other => Err(InstallError::NotADirectory {
            path: path.to_path_buf(),
        }),
        EntryKind::Missing => {
            fs.create_dir_all(path, DIR_MODE)
                .map_err(|source| InstallError::DirectoryCreation {
                    path: path.to_path_buf(),
                    source,
                })?;
            debug!(mode = %format!("{DIR_MODE:o}"), "Directory created");
            Ok(())
        }
    }
}

/// Copy `source` into `dest_dir` under the same base name, overwriting
/// whatever is there. Returns the destination path.
///
/// When the destination already is the source (the installer was started
/// from inside the working directory) the file is left as it is.
///
/// Both handles are dropped before returning, on every path.
#[instrument(skip_all, fields(source = %source.display(), dest_dir = %dest_dir.display()))]
pub fn copy_file(fs: &dyn Filesystem, source: &Path, dest_dir: &Path) -> InstallResult<PathBuf> {
    let Some(file_name) = source.file_name() else {
        return Err(InstallError::SourceUnreadable {
            path: source.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
        });
    };
    let dest = dest_dir.join(file_name);

    let mut reader = fs
        .open_read(source)
        .map_err(|e| InstallError::SourceUnreadable {
            path: source.to_path_buf(),
            source: e,
        })?;

    if fs.same_file(source, &dest) {
        debug!(dest = %dest.display(), "Source is the destination, nothing to copy");
        return Ok(dest);
    }

    let mut writer =
        fs.create_file(&dest, CONFIG_FILE_MODE)
            .map_err(|e| InstallError::DestinationUnwritable {
                path: dest.clone(),
                source: e,
            })?;

    let bytes = io::copy(&mut reader, &mut writer)
        .and_then(|n| writer.flush().map(|()| n))
        .map_err(|e| InstallError::CopyInterrupted {
            from: source.to_path_buf(),
            to: dest.clone(),
            source: e,
        })?;

    debug!(bytes, dest = %dest.display(), "File copied");
    Ok(dest)
}
