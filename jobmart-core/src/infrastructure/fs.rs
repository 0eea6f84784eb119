// jobmart-core/src/infrastructure/fs.rs

use crate::infrastructure::error::InfrastructureError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a file atomically through a temporary file.
///
/// The temporary file lives in the destination directory (created if
/// missing) so the final rename never crosses filesystems. The target is
/// either fully replaced or left as it was.
pub fn atomic_write_with<P, F, E>(path: P, write: F) -> Result<(), E>
where
    P: AsRef<Path>,
    F: FnOnce(&mut File) -> Result<(), E>,
    E: From<InfrastructureError>,
{
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(InfrastructureError::Io)?;

    let mut temp_file = tempfile::NamedTempFile::new_in(parent).map_err(InfrastructureError::Io)?;

    write(temp_file.as_file_mut())?;
    temp_file
        .as_file()
        .sync_all()
        .map_err(InfrastructureError::Io)?;

    // Atomic rename (persist)
    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

/// Byte-content flavour of [`atomic_write_with`].
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    atomic_write_with(path, |file| {
        file.write_all(content.as_ref())
            .map_err(InfrastructureError::Io)
    })
}
