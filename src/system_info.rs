//! The launcher only needs to know which OS family it was built for:
//! it decides the cache layout and the name of the executable to run.
//! That is a compile time property so we don't query the running system.
use crate::consts::{EXECUTABLE_NAME, WINDOWS_EXECUTABLE_NAME};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum OsType {
    Windows,
    MacOs,
    /// Linux, the BSDs and every other unix-like
    Unix,
}

impl OsType {
    /// The OS family this binary was compiled for
    pub const fn current() -> Self {
        if cfg!(windows) {
            OsType::Windows
        } else if cfg!(target_os = "macos") {
            OsType::MacOs
        } else {
            OsType::Unix
        }
    }

    /// File name of the toolchain executable at the root of the cache directory
    pub fn executable_name(&self) -> &'static str {
        match self {
            OsType::Windows => WINDOWS_EXECUTABLE_NAME,
            OsType::MacOs | OsType::Unix => EXECUTABLE_NAME,
        }
    }
}
