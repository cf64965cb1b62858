//! Host operating system family and filesystem probing.

use std::path::Path;

/// Operating system family the launcher is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    /// macOS
    MacOs,
    /// Linux
    Linux,
    /// Windows
    Windows,
    /// Anything else (BSDs, Solaris, ...)
    Other,
}

impl HostOs {
    /// Query the host family at run time.
    pub fn current() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Map a `std::env::consts::OS` value to a host family.
    pub fn from_os_name(name: &str) -> Self {
        match name {
            "macos" => Self::MacOs,
            "linux" => Self::Linux,
            "windows" => Self::Windows,
            _ => Self::Other,
        }
    }

    /// True on hosts that have unix file permissions.
    pub const fn is_unix(self) -> bool {
        !matches!(self, Self::Windows)
    }
}

/// Answers "does this path exist?" for terminal detection and install checks.
pub trait PathProbe {
    /// Return true if `path` exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Probe backed by the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsProbe;

impl PathProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

impl<F: Fn(&Path) -> bool> PathProbe for F {
    fn exists(&self, path: &Path) -> bool {
        self(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_os_name() {
        assert_eq!(HostOs::from_os_name("macos"), HostOs::MacOs);
        assert_eq!(HostOs::from_os_name("linux"), HostOs::Linux);
        assert_eq!(HostOs::from_os_name("windows"), HostOs::Windows);
        assert_eq!(HostOs::from_os_name("freebsd"), HostOs::Other);
    }

    #[test]
    fn test_is_unix() {
        assert!(HostOs::Linux.is_unix());
        assert!(HostOs::MacOs.is_unix());
        assert!(!HostOs::Windows.is_unix());
    }

    #[test]
    fn test_fs_probe() {
        let dir = tempfile::tempdir().unwrap();
        assert!(FsProbe.exists(dir.path()));
        assert!(!FsProbe.exists(&dir.path().join("missing")));
    }
}
