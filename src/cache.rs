use std::ffi::OsString;
use std::path::{Path, PathBuf};

use etcetera::BaseStrategy;

use crate::OsType;
use crate::consts::{
    APP_ID, CACHE_DIR_ENV_VAR_NAME, PUBLISHER_ID, TOOLCHAIN_VERSION, WINDOWS_CACHE_DIR_NAME,
};

#[derive(Debug, thiserror::Error)]
pub enum CacheDirError {
    #[error("Could not determine the user cache directory")]
    EnvironmentUnavailable(#[source] etcetera::HomeDirError),
}

/// Returns the root under which the toolchain cache lives.
/// `ZIG_LAUNCHER_CACHE_DIR` wins if it is set, otherwise it's the OS own per-user cache
/// directory: `%LOCALAPPDATA%` on Windows, `~/Library/Caches` on macOS and
/// `$XDG_CACHE_HOME` (or `~/.cache`) everywhere else.
pub fn user_cache_root() -> Result<PathBuf, CacheDirError> {
    cache_root_from(std::env::var_os(CACHE_DIR_ENV_VAR_NAME))
}

fn cache_root_from(env_override: Option<OsString>) -> Result<PathBuf, CacheDirError> {
    if let Some(root) = env_override.filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(root));
    }

    etcetera::base_strategy::choose_native_strategy()
        .map(|dirs| dirs.cache_dir())
        .map_err(CacheDirError::EnvironmentUnavailable)
}

/// Which directory the toolchain gets extracted to.
/// Nothing in there is read from the environment: the same layout and root always give the
/// same path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheLayout {
    pub publisher: String,
    pub app: String,
    pub version: String,
}

impl CacheLayout {
    pub fn new(
        publisher: impl Into<String>,
        app: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            publisher: publisher.into(),
            app: app.into(),
            version: version.into(),
        }
    }

    /// The layout of the toolchain bundled in this binary
    pub fn bundled() -> Self {
        Self::new(PUBLISHER_ID, APP_ID, TOOLCHAIN_VERSION)
    }

    /// In practice it looks like:
    /// - Windows: `CACHE_ROOT/{publisher}/{app}/Cache/{version}`
    /// - others: `CACHE_ROOT/{app}/{version}`
    ///
    /// The publisher segment only exists on Windows, and existing caches depend on it.
    pub fn resolve(&self, os: OsType, cache_root: impl AsRef<Path>) -> PathBuf {
        let root = cache_root.as_ref();
        match os {
            OsType::Windows => root
                .join(&self.publisher)
                .join(&self.app)
                .join(WINDOWS_CACHE_DIR_NAME)
                .join(&self.version),
            OsType::MacOs | OsType::Unix => root.join(&self.app).join(&self.version),
        }
    }

    pub fn cache_path(&self, os: OsType) -> Result<PathBuf, CacheDirError> {
        Ok(self.resolve(os, user_cache_root()?))
    }
}

/// Marks the directory holding all the cached versions with a CACHEDIR.TAG.
/// Only a convenience for backup tools, so failing is not an error.
pub(crate) fn tag_cache_dir(cache_path: &Path) {
    let Some(parent) = cache_path.parent() else {
        return;
    };
    if let Err(e) = cachedir::ensure_tag(parent) {
        log::warn!("Failed to create CACHEDIR.TAG in {}: {e}", parent.display());
    }
}
