//! Artifact file placement and atomic persistence.
//!
//! Verified bytes go to `<name>.part` first, are synced, then renamed onto the
//! final name so a crash never leaves a truncated jar under the real name.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Permission bits for written artifacts on Unix.
#[cfg(unix)]
const ARTIFACT_MODE: u32 = 0o644;

/// The manifest's `filename` cannot be used as a file inside the target directory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid target filename {0:?}: must be a single file name")]
pub struct InvalidFilename(pub String);

/// Joins `filename` onto `dir`, accepting only a single plain file name.
///
/// Empty names, `.`/`..`, absolute paths and anything with a separator are
/// rejected so writes cannot land outside `dir`.
pub fn artifact_path(dir: &Path, filename: &str) -> Result<PathBuf, InvalidFilename> {
    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name == filename => Ok(dir.join(name)),
        _ => Err(InvalidFilename(filename.to_string())),
    }
}

/// Path for the temp file: appends `.part` to the final path (e.g. `mod.jar` → `mod.jar.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Writes `data` to `final_path` via a synced temp file and rename.
/// On failure the temp file is removed; `final_path` is untouched.
pub fn write_atomic(final_path: &Path, data: &[u8]) -> io::Result<()> {
    let tmp = temp_path(final_path);
    let result = write_and_rename(&tmp, final_path, data);
    if result.is_err() {
        if let Err(e) = std::fs::remove_file(&tmp) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!(path = %tmp.display(), "failed to remove temp file: {}", e);
            }
        }
    }
    result
}

fn write_and_rename(tmp: &Path, final_path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = create_truncated(tmp)?;
    file.write_all(data)?;
    file.sync_all()?;
    drop(file);
    std::fs::rename(tmp, final_path)
}

#[cfg(unix)]
fn create_truncated(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    File::options()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(ARTIFACT_MODE)
        .open(path)
}

#[cfg(not(unix))]
fn create_truncated(path: &Path) -> io::Result<File> {
    File::options()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}
