//! Helpers shared by the `pg_worker` binary and the test cluster wrappers.

/// Quotes `value` for a POSIX shell command line.
///
/// The value is wrapped in single quotes; embedded quotes close the quoted
/// run, emit an escaped quote and reopen it (`'\''`).
#[must_use]
pub fn shell_escape(value: &str) -> String {
    let quoted = value.replace('\'', "'\\''");
    format!("'{quoted}'")
}
