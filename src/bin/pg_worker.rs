//! Runs embedded `PostgreSQL` lifecycle steps in a separate, demoted process.
//!
//! ```text
//! pg_worker <setup|start|stop> <config-path>
//! ```
//!
//! The file at `config-path` holds a JSON [`WorkerPayload`]: the cluster
//! settings plus environment overrides to apply before touching the server.
//! The adapter integration tests write it through `pg-embed-setup-unpriv`
//! when they run as root, because `initdb` and `postgres` refuse to run with
//! root privileges. The worker re-executes itself as `nobody` (or drops to
//! that user in-process) before running the requested step.
//!
//! `start` leaves the server running after the worker exits; `stop` shuts it
//! down again.

#[cfg(unix)]
use camino::{Utf8Path, Utf8PathBuf};
#[cfg(unix)]
use nix::unistd::{Uid, User, initgroups, setgid, setuid};
#[cfg(unix)]
use pg_embedded_setup_unpriv::ambient_dir_and_path;
#[cfg(unix)]
use pg_embedded_setup_unpriv::worker::{PlainSecret, WorkerPayload};
#[cfg(unix)]
use postgresql_embedded::{PostgreSQL, Status};
#[cfg(unix)]
use std::{env, ffi::CString, io, io::Read, mem::ManuallyDrop, process::Command};
#[cfg(unix)]
use tasktree::worker::shell_escape;
#[cfg(unix)]
use thiserror::Error;
#[cfg(unix)]
use tokio::runtime::{Builder, Runtime};

#[cfg(unix)]
const REEXEC_MARKER: &str = "PG_WORKER_REEXEC";
#[cfg(unix)]
const SAFE_PATH: &str = "/usr/sbin:/usr/bin:/sbin:/bin";
#[cfg(unix)]
const DEMOTED_USER: &str = "nobody";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failures reported by the worker on stderr with a non-zero exit status.
#[cfg(unix)]
#[derive(Debug, Error)]
enum WorkerError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error("failed to read worker config: {0}")]
    ConfigRead(#[source] BoxError),
    #[error("failed to parse worker config: {0}")]
    ConfigParse(#[source] serde_json::Error),
    #[error("invalid cluster settings: {0}")]
    Settings(String),
    #[error("failed to build runtime: {0}")]
    Runtime(#[source] io::Error),
    #[error("failed to drop privileges: {0}")]
    PrivilegeDrop(String),
    #[error("postgres {operation} failed: {message}")]
    Postgres {
        operation: &'static str,
        message: String,
    },
}

#[cfg(unix)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Setup,
    Start,
    Stop,
}

#[cfg(unix)]
impl Operation {
    fn parse(arg: &str) -> Result<Self, WorkerError> {
        match arg {
            "setup" => Ok(Self::Setup),
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            other => Err(WorkerError::InvalidArgs(format!(
                "unknown pg_worker operation '{other}'; expected setup, start or stop"
            ))),
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

#[cfg(unix)]
fn main() -> Result<(), BoxError> {
    // Report failures through `Display`; `main` prints the error's `Debug` form.
    worker_main().map_err(|err| BoxError::from(err.to_string()))
}

#[cfg(unix)]
fn worker_main() -> Result<(), WorkerError> {
    let args = collect_args()?;
    reexec_as_demoted_user(&args)?;
    run(args.into_iter())
}

#[cfg(not(unix))]
fn main() -> Result<(), BoxError> {
    Err("pg_worker only runs on Unix platforms".into())
}

#[cfg(unix)]
fn collect_args() -> Result<Vec<Utf8PathBuf>, WorkerError> {
    env::args_os()
        .map(|arg| {
            arg.into_string()
                .map(Utf8PathBuf::from)
                .map_err(|_| WorkerError::InvalidArgs("argument is not valid UTF-8".into()))
        })
        .collect()
}

#[cfg(unix)]
fn parse_args(
    mut args: impl Iterator<Item = Utf8PathBuf>,
) -> Result<(Operation, Utf8PathBuf), WorkerError> {
    let _program = args.next();
    let operation = args
        .next()
        .ok_or_else(|| WorkerError::InvalidArgs("missing operation argument".into()))
        .and_then(|arg| Operation::parse(arg.as_str()))?;
    let config_path = args
        .next()
        .ok_or_else(|| WorkerError::InvalidArgs("missing config path argument".into()))?;
    if let Some(extra) = args.next() {
        return Err(WorkerError::InvalidArgs(format!(
            "unexpected extra argument: {extra}"
        )));
    }
    Ok((operation, config_path))
}

#[cfg(unix)]
fn run(args: impl Iterator<Item = Utf8PathBuf>) -> Result<(), WorkerError> {
    let (operation, config_path) = parse_args(args)?;
    let payload = load_payload(&config_path)?;
    drop_privileges_if_root(DEMOTED_USER)?;
    let settings = payload
        .settings
        .into_settings()
        .map_err(|err| WorkerError::Settings(err.to_string()))?;
    let runtime = current_thread_runtime()?;
    apply_environment(&payload.environment);
    runtime.block_on(perform(operation, PostgreSQL::new(settings)))
}

#[cfg(unix)]
async fn perform(operation: Operation, mut postgres: PostgreSQL) -> Result<(), WorkerError> {
    let failed = |err: postgresql_embedded::Error| WorkerError::Postgres {
        operation: operation.name(),
        message: err.to_string(),
    };
    match operation {
        Operation::Setup => {
            postgres.setup().await.map_err(failed)?;
            start_unless_running(&mut postgres).await.map_err(failed)
        }
        Operation::Start => {
            start_unless_running(&mut postgres).await.map_err(failed)?;
            // The server must outlive this process; dropping the handle would stop it.
            let _running = ManuallyDrop::new(postgres);
            Ok(())
        }
        Operation::Stop => postgres.stop().await.map_err(failed),
    }
}

#[cfg(unix)]
async fn start_unless_running(postgres: &mut PostgreSQL) -> Result<(), postgresql_embedded::Error> {
    if matches!(postgres.status(), Status::Started) {
        return Ok(());
    }
    postgres.start().await
}

#[cfg(unix)]
fn load_payload(config_path: &Utf8Path) -> Result<WorkerPayload, WorkerError> {
    let bytes = read_config(config_path).map_err(WorkerError::ConfigRead)?;
    serde_json::from_slice(&bytes).map_err(WorkerError::ConfigParse)
}

#[cfg(unix)]
fn read_config(path: &Utf8Path) -> Result<Vec<u8>, BoxError> {
    let (dir, relative) = ambient_dir_and_path(path)?;
    let mut file = dir.open(relative.as_std_path())?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(bytes)
}

#[cfg(unix)]
fn current_thread_runtime() -> Result<Runtime, WorkerError> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(WorkerError::Runtime)
}

#[cfg(unix)]
fn apply_environment(environment: &[(String, Option<PlainSecret>)]) {
    for (key, value) in environment {
        // SAFETY: the worker is single-threaded here; nothing else reads or
        // writes the environment concurrently.
        unsafe {
            match value {
                Some(secret) => env::set_var(key, secret.expose()),
                None => env::remove_var(key),
            }
        }
    }
}

/// Re-runs the worker as the demoted user when started as root.
///
/// Exits the current process with the child's status once it finishes.
#[cfg(unix)]
fn reexec_as_demoted_user(args: &[Utf8PathBuf]) -> Result<(), WorkerError> {
    if !Uid::effective().is_root() || env::var_os(REEXEC_MARKER).is_some() {
        return Ok(());
    }

    let exe = env::current_exe()
        .map_err(WorkerError::Runtime)?
        .into_os_string()
        .into_string()
        .map(Utf8PathBuf::from)
        .map_err(|_| WorkerError::Runtime(io::Error::other("executable path is not valid UTF-8")))?;
    let forwarded = args.iter().skip(1);
    let status = match Command::new("runuser")
        .args(["-u", DEMOTED_USER, "--"])
        .arg(exe.as_std_path())
        .args(forwarded.clone().map(|arg| arg.as_std_path()))
        .env(REEXEC_MARKER, "1")
        .env("PATH", SAFE_PATH)
        .status()
    {
        Ok(status) => status,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            let line = forwarded.fold(
                format!("{REEXEC_MARKER}=1 exec {}", shell_escape(exe.as_str())),
                |line, arg| format!("{line} {}", shell_escape(arg.as_str())),
            );
            Command::new("/bin/su")
                .args(["-s", "/bin/sh", DEMOTED_USER, "-c"])
                .arg(line)
                .env("PATH", SAFE_PATH)
                .status()
                .map_err(|su_err| WorkerError::PrivilegeDrop(su_err.to_string()))?
        }
        Err(err) => return Err(WorkerError::PrivilegeDrop(err.to_string())),
    };

    std::process::exit(status.code().unwrap_or(1));
}

#[cfg(unix)]
fn drop_privileges_if_root(username: &str) -> Result<(), WorkerError> {
    if !Uid::effective().is_root() {
        return Ok(());
    }

    let denied = |err: nix::Error| WorkerError::PrivilegeDrop(err.to_string());
    let user = User::from_name(username)
        .map_err(denied)?
        .ok_or_else(|| WorkerError::PrivilegeDrop(format!("user '{username}' not found")))?;
    let name = CString::new(user.name.clone())
        .map_err(|err| WorkerError::PrivilegeDrop(format!("invalid user name: {err}")))?;
    initgroups(&name, user.gid).map_err(denied)?;
    setgid(user.gid).map_err(denied)?;
    setuid(user.uid).map_err(denied)?;

    // SAFETY: still single-threaded; the runtime has not been built yet.
    unsafe {
        env::set_var("HOME", &user.dir);
        env::set_var("USER", &user.name);
        env::set_var("LOGNAME", &user.name);
    }
    Ok(())
}
