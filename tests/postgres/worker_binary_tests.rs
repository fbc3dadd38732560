//! Argument and config handling of the `pg_worker` binary.

use eyre::{Result, ensure, eyre};
use rstest::rstest;
use std::process::{Command, Output};

fn run_worker(args: &[&str]) -> Result<Output> {
    Command::new(env!("CARGO_BIN_EXE_pg_worker"))
        .args(args)
        .env("PG_WORKER_REEXEC", "1")
        .output()
        .map_err(|err| eyre!(err))
}

#[rstest]
#[case::no_arguments(&[], "missing operation argument")]
#[case::no_config(&["setup"], "missing config path argument")]
#[case::unknown_operation(&["restart", "/tmp/config.json"], "unknown pg_worker operation")]
#[case::extra_argument(&["start", "/tmp/config.json", "extra"], "unexpected extra argument")]
fn malformed_invocations_are_rejected(
    #[case] args: &[&str],
    #[case] message: &str,
) -> Result<()> {
    let output = run_worker(args)?;
    ensure!(!output.status.success(), "worker accepted {args:?}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    ensure!(stderr.contains(message), "expected {message:?} in {stderr:?}");
    Ok(())
}

#[rstest]
#[case::setup("setup")]
#[case::start("start")]
#[case::stop("stop")]
fn unreadable_config_fails_every_operation(#[case] operation: &str) -> Result<()> {
    let missing = std::env::temp_dir().join(format!(
        "tasktree_worker_config_{}.json",
        uuid::Uuid::new_v4().simple()
    ));
    let config = missing
        .to_str()
        .ok_or_else(|| eyre!("temp path is not valid UTF-8"))?;
    let output = run_worker(&[operation, config])?;
    ensure!(!output.status.success(), "{operation} succeeded without config");
    let stderr = String::from_utf8_lossy(&output.stderr);
    ensure!(
        stderr.contains("failed to read worker config"),
        "expected a config read error, got {stderr:?}"
    );
    Ok(())
}
