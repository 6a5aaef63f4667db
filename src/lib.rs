mod cache;
mod delegate;
mod fs;
mod install;
mod payload;
mod system_info;
#[cfg(test)]
mod test_utils;

pub mod consts;

pub use cache::{CacheDirError, CacheLayout, user_cache_root};
pub use delegate::{DelegateError, Invocation, run};
pub use fs::ExtractError;
pub use install::{CacheState, InstallError, InstallErrorKind, InstallOutcome, install, probe};
pub use payload::{Archive, EMBEDDED_ARCHIVES};
pub use system_info::OsType;

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error(transparent)]
    CacheDir(#[from] CacheDirError),
    #[error(transparent)]
    Install(#[from] InstallError),
    #[error(transparent)]
    Delegate(#[from] DelegateError),
}

/// Resolve the cache directory, extract the archives in it if it doesn't exist yet and run
/// the toolchain from there.
/// Returns the exit code of the toolchain.
pub fn launch(
    layout: &CacheLayout,
    os: OsType,
    archives: &[Archive],
    invocation: &Invocation,
) -> Result<i32, LaunchError> {
    let cache_dir = layout.cache_path(os)?;
    install(&cache_dir, archives)?;
    Ok(run(&cache_dir, os, invocation)?)
}
