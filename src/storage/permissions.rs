use std::{fmt, fs, io, path::Path};

use log::warn;

#[cfg(unix)]
const WRITABLE_MODE: u32 = 0o644;
#[cfg(unix)]
const SEALED_MODE: u32 = 0o444;

#[cfg(unix)]
fn set_mode(path: &Path, writable: bool) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = if writable { WRITABLE_MODE } else { SEALED_MODE };
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(path: &Path, writable: bool) -> io::Result<()> {
    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_readonly(!writable);
    fs::set_permissions(path, permissions)
}

pub fn make_writable(path: &Path) -> io::Result<()> {
    set_mode(path, true)
}

pub fn seal(path: &Path) -> io::Result<()> {
    set_mode(path, false)
}

/// True when no one holds write permission on `path`.
pub fn is_sealed(path: &Path) -> io::Result<bool> {
    let permissions = fs::metadata(path)?.permissions();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        Ok(permissions.mode() & 0o222 == 0)
    }

    #[cfg(not(unix))]
    {
        Ok(permissions.readonly())
    }
}

/// The mode changes a flush performs around its append.
#[derive(Clone, Copy)]
pub struct ModeSwitch {
    pub unlock: fn(&Path) -> io::Result<()>,
    pub lock: fn(&Path) -> io::Result<()>,
}

impl fmt::Debug for ModeSwitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeSwitch").finish_non_exhaustive()
    }
}

impl Default for ModeSwitch {
    fn default() -> Self {
        Self {
            unlock: make_writable,
            lock: seal,
        }
    }
}

/// Write access to a log file for the span of one append.
///
/// Dropping the guard without calling [`WriteUnlock::seal`] restores the
/// read-only mode on a best-effort basis, so a failed append never leaves
/// the file writable behind our back.
pub struct WriteUnlock<'a> {
    path: &'a Path,
    lock: fn(&Path) -> io::Result<()>,
    armed: bool,
}

impl<'a> WriteUnlock<'a> {
    /// Unlocks `path` if it already exists. A file that does not exist yet is
    /// created writable by the append itself.
    pub fn acquire(path: &'a Path) -> io::Result<Self> {
        Self::acquire_with(path, ModeSwitch::default())
    }

    pub fn acquire_with(path: &'a Path, modes: ModeSwitch) -> io::Result<Self> {
        if path.exists() {
            (modes.unlock)(path)?;
        }
        Ok(Self {
            path,
            lock: modes.lock,
            armed: true,
        })
    }

    pub fn seal(mut self) -> io::Result<()> {
        self.armed = false;
        (self.lock)(self.path)
    }
}

impl Drop for WriteUnlock<'_> {
    fn drop(&mut self) {
        if !self.armed || !self.path.exists() {
            return;
        }
        if let Err(err) = (self.lock)(self.path) {
            warn!("Failed to restore read-only mode on {}: {err}", self.path.display());
        }
    }
}
