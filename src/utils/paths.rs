//! Path helpers

use std::io;
use std::path::{Path, PathBuf};

/// Directory the running executable was installed into.
///
/// Env files and the default data directory are resolved relative to it.
pub fn install_base_dir() -> io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("executable has no parent directory: {}", exe.display()),
        )
    })
}

/// Render a path with forward slashes for stable, platform-neutral output.
pub fn display_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}
