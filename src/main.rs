use anyhow::Result;
use env_logger::Env;
use zig_launcher::consts::LOG_ENV_VAR_NAME;
use zig_launcher::{CacheLayout, EMBEDDED_ARCHIVES, Invocation, OsType, launch};

/// Prints the whole chain of errors, one cause per line
fn write_err(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = format!("{err}");

    let mut cause = err.source();
    while let Some(e) = cause {
        out += &format!("\nReason: {e}");
        cause = e.source();
    }

    out
}

fn try_main() -> Result<i32> {
    env_logger::Builder::from_env(Env::new().filter_or(LOG_ENV_VAR_NAME, "warn")).init();

    let code = launch(
        &CacheLayout::bundled(),
        OsType::current(),
        EMBEDDED_ARCHIVES,
        &Invocation::from_env(),
    )?;
    Ok(code)
}

fn main() {
    match try_main() {
        Ok(code) => ::std::process::exit(code),
        Err(e) => {
            eprintln!("error: {}", write_err(e.as_ref()));
            ::std::process::exit(1)
        }
    }
}
