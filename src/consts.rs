/// Identity the cache directory is keyed on.
/// Kept identical to previous releases so existing caches are reused.
pub const PUBLISHER_ID: &str = "jcbhmr";
pub const APP_ID: &str = "go-zig";
/// Version of the bundled toolchain, which is also the crate version
pub const TOOLCHAIN_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Only used on Windows, where caches live under `<publisher>/<app>/Cache`
pub(crate) const WINDOWS_CACHE_DIR_NAME: &str = "Cache";

pub(crate) const WINDOWS_EXECUTABLE_NAME: &str = "zig.exe";
pub(crate) const EXECUTABLE_NAME: &str = "zig";

/// Overrides the user cache root when set to a non-empty value
pub const CACHE_DIR_ENV_VAR_NAME: &str = "ZIG_LAUNCHER_CACHE_DIR";
/// `env_logger` filter for the launcher itself
pub const LOG_ENV_VAR_NAME: &str = "ZIG_LAUNCHER_LOG";
