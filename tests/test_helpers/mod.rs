//! Process-wide helpers shared by integration test binaries.

use camino::Utf8PathBuf;
use std::env;
use std::ffi::{OsStr, OsString};
use std::sync::{Mutex, MutexGuard, OnceLock};

static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

const WORKER_NAME: &str = "pg_worker";

/// Scoped environment update, restored on drop.
///
/// Holds a global lock so only one guard mutates the environment at a time.
pub struct EnvVarGuard {
    previous: Vec<(OsString, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl EnvVarGuard {
    /// Applies `changes`; `None` removes the variable.
    pub fn set_many(changes: &[(OsString, Option<OsString>)]) -> Self {
        let lock = ENV_MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let previous = changes
            .iter()
            .map(|(key, value)| {
                let before = env::var_os(key);
                write_var(key, value.as_deref());
                (key.clone(), before)
            })
            .collect();
        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..).rev() {
            write_var(&key, value.as_deref());
        }
    }
}

fn write_var(key: &OsStr, value: Option<&OsStr>) {
    // SAFETY: callers hold `ENV_MUTEX`, serialising environment mutation.
    unsafe {
        match value {
            Some(new_value) => env::set_var(key, new_value),
            None => env::remove_var(key),
        }
    }
}

/// Finds the `pg_worker` binary built alongside the tests.
///
/// Checks the path Cargo bakes in as `CARGO_BIN_EXE_pg_worker`, an existing
/// `PG_EMBEDDED_WORKER`, the profile directory of the running test and
/// finally `PATH`.
pub fn locate_pg_worker_path() -> Option<Utf8PathBuf> {
    option_env!("CARGO_BIN_EXE_pg_worker")
        .map(Utf8PathBuf::from)
        .filter(|path| path.is_file())
        .or_else(|| {
            env::var_os("PG_EMBEDDED_WORKER")
                .and_then(existing_file)
                .filter(|path| path.file_stem() == Some(WORKER_NAME))
        })
        .or_else(worker_in_target_dir)
        .or_else(worker_on_path)
}

fn worker_in_target_dir() -> Option<Utf8PathBuf> {
    let test_exe = existing_file(env::current_exe().ok()?.into_os_string())?;
    let profile_dir = test_exe.parent()?.parent()?;
    existing_file(profile_dir.join(WORKER_NAME).into_string().into())
}

fn worker_on_path() -> Option<Utf8PathBuf> {
    let path = env::var_os("PATH")?;
    env::split_paths(&path).find_map(|dir| existing_file(dir.join(WORKER_NAME).into_os_string()))
}

fn existing_file(path: OsString) -> Option<Utf8PathBuf> {
    let utf8 = Utf8PathBuf::from(path.into_string().ok()?);
    utf8.is_file().then_some(utf8)
}
