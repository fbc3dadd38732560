//! Embedded `PostgreSQL` cluster shared by the adapter tests.
//!
//! The cluster is bootstrapped through `pg-embed-setup-unpriv`. As an
//! unprivileged user the server runs in-process; as root every lifecycle
//! step goes through the `pg_worker` binary, which demotes itself to
//! `nobody` first. A cluster that fails to start fails every adapter test
//! with the startup error unless `TASKTREE_SKIP_POSTGRES_TESTS` is set.

mod fs_utils;
mod worker_helpers;

use self::env_utils::{env_vars_to_os, worker_env_changes};
use self::fs_utils::{sync_password_from_file, sync_port_from_pid};
use crate::test_helpers::EnvVarGuard;
use diesel::prelude::*;
use pg_embedded_setup_unpriv::worker_process_test_api::{
    WorkerOperation, WorkerRequest, WorkerRequestArgs, run as run_worker,
};
use pg_embedded_setup_unpriv::{ExecutionPrivileges, TestBootstrapSettings, bootstrap_for_tests};
use postgresql_embedded::{PostgreSQL, Status};
use std::ffi::OsStr;
use std::sync::OnceLock;
use std::time::Duration;
use tokio::runtime::{Builder, Runtime};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Set to a non-empty value other than `0` to skip the adapter tests.
pub const SKIP_POSTGRES_ENV: &str = "TASKTREE_SKIP_POSTGRES_TESTS";

static SHARED_CLUSTER: OnceLock<Result<ManagedCluster, String>> = OnceLock::new();

/// Shared `PostgreSQL` cluster handle for integration tests.
pub type PostgresCluster = &'static ManagedCluster;

/// Running embedded cluster and the handles needed to stop it.
pub struct ManagedCluster {
    bootstrap: TestBootstrapSettings,
    env_vars: Vec<(String, Option<String>)>,
    runtime: Option<Runtime>,
    postgres: Option<PostgreSQL>,
}

impl ManagedCluster {
    fn new() -> Result<Self, BoxError> {
        let worker_env = worker_env_changes()?;
        let env_guard = EnvVarGuard::set_many(&worker_env);
        let bootstrapped = bootstrap_for_tests();
        drop(env_guard);
        let mut bootstrap = bootstrapped.map_err(|err| Box::new(err) as BoxError)?;
        sync_password_from_file(&mut bootstrap.settings)?;
        let env_vars = bootstrap.environment.to_env();
        let mut cluster = Self {
            bootstrap,
            env_vars,
            runtime: None,
            postgres: None,
        };
        match cluster.bootstrap.privileges {
            ExecutionPrivileges::Root => cluster.start_via_worker()?,
            ExecutionPrivileges::Unprivileged => cluster.start_in_process()?,
        }
        Ok(cluster)
    }

    fn start_in_process(&mut self) -> Result<(), BoxError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let env_guard = EnvVarGuard::set_many(&env_vars_to_os(&self.env_vars));
        let mut postgres = PostgreSQL::new(self.bootstrap.settings.clone());
        let started = runtime.block_on(async {
            postgres.setup().await?;
            if !matches!(postgres.status(), Status::Started) {
                postgres.start().await?;
            }
            Ok::<(), postgresql_embedded::Error>(())
        });
        drop(env_guard);
        started?;
        self.bootstrap.settings = postgres.settings().clone();
        sync_port_from_pid(&mut self.bootstrap.settings)?;
        self.runtime = Some(runtime);
        self.postgres = Some(postgres);
        Ok(())
    }

    fn start_via_worker(&mut self) -> Result<(), BoxError> {
        self.run_worker_operation(WorkerOperation::Setup, self.bootstrap.setup_timeout)?;
        self.run_worker_operation(WorkerOperation::Start, self.bootstrap.start_timeout)?;
        sync_port_from_pid(&mut self.bootstrap.settings)
    }

    fn stop(&mut self) -> Result<(), BoxError> {
        match (self.postgres.take(), &self.runtime) {
            (Some(postgres), Some(runtime)) => Ok(runtime.block_on(postgres.stop())?),
            (None, _) if matches!(self.bootstrap.privileges, ExecutionPrivileges::Root) => {
                self.run_worker_operation(WorkerOperation::Stop, self.bootstrap.shutdown_timeout)
            }
            _ => Ok(()),
        }
    }

    fn run_worker_operation(
        &self,
        operation: WorkerOperation,
        timeout: Duration,
    ) -> Result<(), BoxError> {
        let worker = self.bootstrap.worker_binary.as_ref().ok_or_else(|| {
            Box::new(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "running as root but no pg_worker binary was configured",
            )) as BoxError
        })?;
        let args = WorkerRequestArgs {
            worker: worker.as_path(),
            settings: &self.bootstrap.settings,
            env_vars: &self.env_vars,
            operation,
            timeout,
        };
        run_worker(&WorkerRequest::new(args)).map_err(|err| Box::new(err) as BoxError)
    }

    /// Returns the connection URL for `database`.
    #[must_use]
    pub fn database_url(&self, database: &str) -> String {
        self.bootstrap.settings.url(database)
    }

    /// Creates an empty database.
    ///
    /// # Errors
    ///
    /// Returns an error if the admin connection or statement fails.
    pub fn create_database(&self, name: &str) -> Result<(), BoxError> {
        self.execute_admin_sql(&format!("CREATE DATABASE {}", quote_identifier(name)))
    }

    /// Drops a database, disconnecting any remaining sessions.
    ///
    /// # Errors
    ///
    /// Returns an error if the admin connection or statement fails.
    pub fn drop_database(&self, name: &str) -> Result<(), BoxError> {
        self.execute_admin_sql(&format!(
            "DROP DATABASE IF EXISTS {} WITH (FORCE)",
            quote_identifier(name)
        ))
    }

    fn execute_admin_sql(&self, sql: &str) -> Result<(), BoxError> {
        let mut conn = PgConnection::establish(&self.database_url("postgres"))?;
        diesel::sql_query(sql).execute(&mut conn)?;
        Ok(())
    }
}

impl Drop for ManagedCluster {
    fn drop(&mut self) {
        drop(self.stop());
    }
}

/// Returns the shared cluster, starting it on first use.
///
/// `Ok(None)` only when [`SKIP_POSTGRES_ENV`] opts out. Startup runs on a
/// dedicated thread so its runtime never nests inside the test's.
///
/// # Errors
///
/// Returns the startup failure, for this and every later call.
pub fn postgres_cluster() -> Result<Option<PostgresCluster>, BoxError> {
    if skip_requested(std::env::var_os(SKIP_POSTGRES_ENV).as_deref()) {
        return Ok(None);
    }
    SHARED_CLUSTER
        .get_or_init(|| {
            std::thread::spawn(|| ManagedCluster::new().map_err(|err| err.to_string()))
                .join()
                .unwrap_or_else(|_| Err("cluster startup thread panicked".to_owned()))
        })
        .as_ref()
        .map(Some)
        .map_err(|err| {
            format!(
                "failed to start embedded PostgreSQL: {err} \
                 (set {SKIP_POSTGRES_ENV}=1 to skip the adapter tests)"
            )
            .into()
        })
}

fn skip_requested(value: Option<&OsStr>) -> bool {
    value.is_some_and(|flag| !flag.is_empty() && flag != "0")
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::{quote_identifier, skip_requested};
    use rstest::rstest;
    use std::ffi::OsStr;

    #[rstest]
    #[case::unset(None, false)]
    #[case::empty(Some(""), false)]
    #[case::zero(Some("0"), false)]
    #[case::one(Some("1"), true)]
    #[case::word(Some("yes"), true)]
    fn skipping_requires_an_explicit_opt_out(#[case] value: Option<&str>, #[case] skips: bool) {
        assert_eq!(skip_requested(value.map(OsStr::new)), skips);
    }

    #[test]
    fn identifiers_escape_embedded_quotes() {
        assert_eq!(quote_identifier("tasktree_1"), "\"tasktree_1\"");
        assert_eq!(quote_identifier("odd\"name"), "\"odd\"\"name\"");
    }
}
