//! Builds small zip archives in memory for the tests
use std::io::{Cursor, Write};

use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

pub(crate) struct ZipEntry<'a> {
    name: &'a str,
    content: Option<&'a [u8]>,
    mode: Option<u32>,
}

impl<'a> ZipEntry<'a> {
    pub(crate) fn file(name: &'a str, content: &'a [u8]) -> Self {
        Self {
            name,
            content: Some(content),
            mode: None,
        }
    }

    pub(crate) fn dir(name: &'a str) -> Self {
        Self {
            name,
            content: None,
            mode: None,
        }
    }

    pub(crate) fn mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }
}

pub(crate) fn zip_bytes(entries: &[ZipEntry]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for entry in entries {
        let mut options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        if let Some(mode) = entry.mode {
            options = options.unix_permissions(mode);
        }
        match entry.content {
            Some(content) => {
                writer.start_file(entry.name, options).unwrap();
                writer.write_all(content).unwrap();
            }
            None => writer.add_directory(entry.name, options).unwrap(),
        }
    }
    writer.finish().unwrap().into_inner()
}
