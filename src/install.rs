use std::io;
use std::path::{Path, PathBuf};

use fs_err as fs;
use zip::result::ZipError;

use crate::cache::tag_cache_dir;
use crate::fs::{ExtractError, extract_archive, open_archive};
use crate::payload::Archive;

/// Whether the cache directory is there.
/// A present directory is assumed to be complete: there is no integrity check.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CacheState {
    Present,
    Absent,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InstallOutcome {
    /// The directory existed, nothing was written
    AlreadyInstalled,
    /// The archives were extracted during this call
    Installed,
}

#[derive(Debug, thiserror::Error)]
#[error("Failed to install the toolchain in `{}`", .path.display())]
#[non_exhaustive]
pub struct InstallError {
    pub path: PathBuf,
    pub source: InstallErrorKind,
}

impl InstallError {
    fn new(path: &Path, source: InstallErrorKind) -> Self {
        Self {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InstallErrorKind {
    #[error("Failed to check whether the cache directory exists")]
    Stat(#[source] io::Error),
    #[error("Failed to create the cache directory")]
    CreateDir(#[source] io::Error),
    #[error("Failed to open archive {archive}")]
    ArchiveOpen {
        archive: String,
        #[source]
        source: ZipError,
    },
    #[error("Failed to extract archive {archive}")]
    ArchiveExtract {
        archive: String,
        #[source]
        source: ExtractError,
    },
    /// Extraction failed and the partial install could not be removed either.
    /// The cleanup error is in the message, the original one is the source.
    #[error("Failed to remove the partially installed cache directory ({cleanup})")]
    Rollback {
        #[source]
        original: Box<InstallErrorKind>,
        cleanup: io::Error,
    },
}

pub fn probe(path: &Path) -> Result<CacheState, InstallError> {
    match fs::metadata(path) {
        Ok(_) => Ok(CacheState::Present),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(CacheState::Absent),
        Err(e) => Err(InstallError::new(path, InstallErrorKind::Stat(e))),
    }
}

/// Makes sure the toolchain is extracted in `path`.
///
/// If the directory doesn't exist, it is created and every archive is extracted in it, in order.
/// When any archive fails to open or extract, the whole directory is deleted so the next run
/// doesn't mistake a partial install for a complete one.
pub fn install(path: &Path, archives: &[Archive]) -> Result<InstallOutcome, InstallError> {
    install_with_cleanup(path, archives, |p| fs::remove_dir_all(p))
}

fn install_with_cleanup(
    path: &Path,
    archives: &[Archive],
    remove_dir_all: impl FnOnce(&Path) -> io::Result<()>,
) -> Result<InstallOutcome, InstallError> {
    if probe(path)? == CacheState::Present {
        log::debug!("Toolchain already installed in {}", path.display());
        return Ok(InstallOutcome::AlreadyInstalled);
    }

    log::debug!("Installing toolchain in {}", path.display());
    fs::create_dir_all(path).map_err(|e| InstallError::new(path, InstallErrorKind::CreateDir(e)))?;

    if let Err(original) = extract_all(path, archives) {
        log::debug!("Install failed, removing {}", path.display());
        let kind = match remove_dir_all(path) {
            Ok(()) => original,
            Err(cleanup) => InstallErrorKind::Rollback {
                original: Box::new(original),
                cleanup,
            },
        };
        return Err(InstallError::new(path, kind));
    }

    tag_cache_dir(path);
    Ok(InstallOutcome::Installed)
}

fn extract_all(path: &Path, archives: &[Archive]) -> Result<(), InstallErrorKind> {
    for archive in archives {
        log::debug!("Extracting {}", archive.name);
        let mut zip =
            open_archive(archive.bytes).map_err(|source| InstallErrorKind::ArchiveOpen {
                archive: archive.name.to_string(),
                source,
            })?;
        extract_archive(&mut zip, path).map_err(|source| InstallErrorKind::ArchiveExtract {
            archive: archive.name.to_string(),
            source,
        })?;
    }
    Ok(())
}
