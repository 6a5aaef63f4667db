use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use crate::OsType;

#[derive(Debug, thiserror::Error)]
pub enum DelegateError {
    #[error("Failed to start `{}`", .path.display())]
    Start {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// How the launcher was called.
/// The arguments are passed through untouched, we don't parse anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// argv[0], the name the launcher was called with
    pub program_name: Option<OsString>,
    pub args: Vec<OsString>,
}

impl Invocation {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut args = args.into_iter().map(Into::into);
        let program_name = args.next();
        Self {
            program_name,
            args: args.collect(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(std::env::args_os())
    }
}

/// The child gets our stdin/stdout/stderr as is.
/// On unix, it also gets our argv[0] so it sees exactly the argument vector we got.
fn command(executable: &Path, invocation: &Invocation) -> Command {
    let mut cmd = Command::new(executable);
    cmd.args(&invocation.args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    #[cfg(unix)]
    if let Some(name) = &invocation.program_name {
        use std::os::unix::process::CommandExt;
        cmd.arg0(name);
    }

    cmd
}

/// A child killed by a signal has no code, we report -1 like the exit code of a failed wait
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

/// Runs the toolchain found at the root of `cache_dir` and waits for it to finish.
/// Returns its exit code, whatever it is. Only failing to start it at all is an error.
pub fn run(cache_dir: &Path, os: OsType, invocation: &Invocation) -> Result<i32, DelegateError> {
    let executable = cache_dir.join(os.executable_name());
    log::debug!(
        "Running {} with args {:?}",
        executable.display(),
        invocation.args
    );

    let status = command(&executable, invocation)
        .status()
        .map_err(|source| DelegateError::Start {
            path: executable.clone(),
            source,
        })?;

    log::debug!("{} exited with {status}", executable.display());
    Ok(exit_code(status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_splits_program_name() {
        let invocation = Invocation::new(["zig", "build", "-Doptimize=ReleaseFast"]);
        assert_eq!(invocation.program_name, Some(OsString::from("zig")));
        assert_eq!(
            invocation.args,
            vec![
                OsString::from("build"),
                OsString::from("-Doptimize=ReleaseFast")
            ]
        );
    }

    #[test]
    fn empty_invocation() {
        let invocation = Invocation::new(Vec::<OsString>::new());
        assert_eq!(invocation, Invocation::default());
    }

    #[test]
    fn command_forwards_args_verbatim() {
        let invocation = Invocation::new(["zig", "foo", "", "with space"]);
        let cmd = command(Path::new("/cache/zig"), &invocation);
        assert_eq!(cmd.get_program(), "/cache/zig");
        let args: Vec<_> = cmd.get_args().collect();
        assert_eq!(args, ["foo", "", "with space"]);
    }

    #[test]
    fn missing_executable_fails_to_start() {
        let tmp = tempfile::tempdir().unwrap();
        let err = run(
            tmp.path(),
            OsType::current(),
            &Invocation::new(["zig", "version"]),
        )
        .unwrap_err();
        let DelegateError::Start { path, .. } = err;
        assert_eq!(path, tmp.path().join(OsType::current().executable_name()));
    }

    #[cfg(unix)]
    #[test]
    fn exit_codes_are_forwarded() {
        use std::os::unix::process::ExitStatusExt;

        assert_eq!(exit_code(ExitStatus::from_raw(0)), 0);
        assert_eq!(exit_code(ExitStatus::from_raw(7 << 8)), 7);
        // SIGKILL
        assert_eq!(exit_code(ExitStatus::from_raw(9)), -1);
    }
}
