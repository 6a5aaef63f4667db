//! The toolchain archives are bundled into the binary by `build.rs`.
//! They are plain zip files, extracted in the order they are listed.

/// A named zip archive held in memory
#[derive(Debug, Clone, Copy)]
pub struct Archive<'a> {
    pub name: &'a str,
    pub bytes: &'a [u8],
}

/// Common files first, then the files specific to the target this binary was built for
pub static EMBEDDED_ARCHIVES: &[Archive<'static>] =
    include!(concat!(env!("OUT_DIR"), "/archives.rs"));
