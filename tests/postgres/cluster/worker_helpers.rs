//! Stages the `pg_worker` binary where the demoted user can execute it.

use super::BoxError;
use super::fs_utils::open_parent_dir;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::fs::Permissions;
use cap_std::fs::PermissionsExt;
use std::io::ErrorKind;

/// Copies `worker` into the system temp directory with mode `0755`.
///
/// The copy is named after the source and the current process, so repeated
/// calls replace it.
///
/// Build directories under a root home are unreadable for `nobody`; the copy
/// is not.
pub(super) fn prepare_pg_worker(worker: &Utf8Path) -> Result<Utf8PathBuf, BoxError> {
    let (source_dir, source_name) = open_parent_dir(worker)?;
    let temp_dir = Utf8PathBuf::try_from(std::env::temp_dir())?;
    let staged = temp_dir.join(format!("tasktree_{source_name}_{}", std::process::id()));
    let (staged_dir, staged_name) = open_parent_dir(&staged)?;

    match staged_dir.remove_file(staged_name) {
        Ok(()) => {}
        Err(err) if err.kind() == ErrorKind::NotFound => {}
        Err(err) => return Err(err.into()),
    }
    source_dir.copy(source_name, &staged_dir, staged_name)?;
    staged_dir.set_permissions(staged_name, Permissions::from_mode(0o755))?;
    Ok(staged)
}

#[cfg(test)]
mod tests {
    use super::prepare_pg_worker;
    use camino::Utf8PathBuf;
    use cap_std::ambient_authority;
    use cap_std::fs_utf8::Dir;
    use std::io::Write;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn staged_worker_is_an_executable_copy() {
        let temp_dir = Utf8PathBuf::try_from(std::env::temp_dir()).expect("utf-8 temp dir");
        let source_name = format!("tasktree_worker_source_{}", uuid::Uuid::new_v4().simple());
        let dir = Dir::open_ambient_dir(&temp_dir, ambient_authority()).expect("temp dir opens");
        dir.create(&source_name)
            .and_then(|mut file| file.write_all(b"#!/bin/sh\nexit 0\n"))
            .expect("source written");

        let staged = prepare_pg_worker(&temp_dir.join(&source_name)).expect("worker staged");

        let mode = std::fs::metadata(staged.as_std_path())
            .expect("staged metadata")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
        let copied = std::fs::read_to_string(staged.as_std_path()).expect("staged contents");
        assert_eq!(copied, "#!/bin/sh\nexit 0\n");
        dir.remove_file(&source_name).expect("source removed");
        std::fs::remove_file(staged.as_std_path()).expect("staged copy removed");
    }
}
