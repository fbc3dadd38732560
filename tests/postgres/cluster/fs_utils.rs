//! Reads back what the server wrote to disk during startup.

use super::BoxError;
use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use postgresql_embedded::Settings;
use std::io::ErrorKind;
use std::path::Path;

/// Opens the parent directory of `path` and returns it with the file name.
pub(super) fn open_parent_dir(path: &Utf8Path) -> Result<(Dir, &str), BoxError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| std::io::Error::other(format!("{path} has no file name")))?;
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name))
}

/// Uses the generated password when the bootstrap wrote one to disk.
pub(super) fn sync_password_from_file(settings: &mut Settings) -> Result<(), BoxError> {
    let Some(contents) = read_optional(&settings.password_file)? else {
        return Ok(());
    };
    let password = contents.trim_end();
    if !password.is_empty() {
        password.clone_into(&mut settings.password);
    }
    Ok(())
}

/// Uses the port recorded in `postmaster.pid` once the server is up.
///
/// The fourth line of the pid file holds the listening port.
pub(super) fn sync_port_from_pid(settings: &mut Settings) -> Result<(), BoxError> {
    let pid_file = settings.data_dir.join("postmaster.pid");
    let port = read_optional(&pid_file)?
        .and_then(|contents| contents.lines().nth(3).map(|line| line.trim().parse::<u16>()))
        .and_then(Result::ok);
    if let Some(listening) = port {
        settings.port = listening;
    }
    Ok(())
}

fn read_optional(path: &Path) -> Result<Option<String>, BoxError> {
    let utf8 = Utf8Path::from_path(path)
        .ok_or_else(|| std::io::Error::other(format!("{} is not valid UTF-8", path.display())))?;
    let (dir, file_name) = open_parent_dir(utf8)?;
    match dir.read_to_string(file_name) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err.into()),
    }
}
