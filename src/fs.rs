use std::io::{self, Cursor, Read, Seek};
use std::path::Path;

use fs_err as fs;
use zip::ZipArchive;
use zip::result::ZipError;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error(transparent)]
    Zip(#[from] ZipError),
    #[error("Entry `{0}` would be extracted outside of the destination")]
    UnsafePath(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Reads the zip central directory of an in-memory archive
pub(crate) fn open_archive(bytes: &[u8]) -> Result<ZipArchive<Cursor<&[u8]>>, ZipError> {
    ZipArchive::new(Cursor::new(bytes))
}

/// Extract every entry of the archive below `destination`, keeping the relative paths.
/// Files already present are replaced so a later archive can overlay an earlier one.
pub(crate) fn extract_archive<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    destination: &Path,
) -> Result<(), ExtractError> {
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let Some(relative) = entry.enclosed_name() else {
            return Err(ExtractError::UnsafePath(entry.name().to_string()));
        };
        let out_path = destination.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        // A read-only file from a previous archive can't be truncated, remove it instead
        if out_path.is_file() {
            fs::remove_file(&out_path)?;
        }

        let mut out_file = fs::File::create(&out_path)?;
        io::copy(&mut entry, &mut out_file)?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&out_path, std::fs::Permissions::from_mode(mode & 0o777))?;
        }
    }

    log::debug!(
        "Extracted {} entries to {}",
        archive.len(),
        destination.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ZipEntry, zip_bytes};

    #[test]
    fn extracts_nested_files() {
        let bytes = zip_bytes(&[
            ZipEntry::dir("lib/"),
            ZipEntry::file("lib/std/std.zig", b"pub const x = 1;"),
            ZipEntry::file("README", b"hello"),
        ]);
        let tmp = tempfile::tempdir().unwrap();
        let mut archive = open_archive(&bytes).unwrap();
        extract_archive(&mut archive, tmp.path()).unwrap();

        assert_eq!(
            std::fs::read_to_string(tmp.path().join("lib/std/std.zig")).unwrap(),
            "pub const x = 1;"
        );
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("README")).unwrap(),
            "hello"
        );
    }

    #[test]
    fn later_archive_overwrites_files() {
        let first = zip_bytes(&[
            ZipEntry::file("shared.txt", b"first").mode(0o444),
            ZipEntry::file("only-first.txt", b"1"),
        ]);
        let second = zip_bytes(&[ZipEntry::file("shared.txt", b"second")]);
        let tmp = tempfile::tempdir().unwrap();

        extract_archive(&mut open_archive(&first).unwrap(), tmp.path()).unwrap();
        extract_archive(&mut open_archive(&second).unwrap(), tmp.path()).unwrap();

        assert_eq!(
            std::fs::read_to_string(tmp.path().join("shared.txt")).unwrap(),
            "second"
        );
        assert!(tmp.path().join("only-first.txt").is_file());
    }

    #[test]
    fn rejects_entries_escaping_destination() {
        let bytes = zip_bytes(&[ZipEntry::file("../escape.txt", b"nope")]);
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("dest");
        std::fs::create_dir(&dest).unwrap();

        let res = extract_archive(&mut open_archive(&bytes).unwrap(), &dest);
        assert!(matches!(res, Err(ExtractError::UnsafePath(name)) if name == "../escape.txt"));
        assert!(!tmp.path().join("escape.txt").exists());
    }

    #[test]
    fn garbage_is_not_an_archive() {
        assert!(open_archive(b"definitely not a zip").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn applies_unix_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let bytes = zip_bytes(&[
            ZipEntry::file("zig", b"#!/bin/sh\n").mode(0o755),
            ZipEntry::file("doc.txt", b"doc").mode(0o644),
        ]);
        let tmp = tempfile::tempdir().unwrap();
        extract_archive(&mut open_archive(&bytes).unwrap(), tmp.path()).unwrap();

        let mode = |name: &str| {
            std::fs::metadata(tmp.path().join(name))
                .unwrap()
                .permissions()
                .mode()
                & 0o777
        };
        assert_eq!(mode("zig"), 0o755);
        assert_eq!(mode("doc.txt"), 0o644);
    }
}
