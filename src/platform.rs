//! Platform detection for release asset selection

use std::fmt;

/// Operating system family as it appears in release asset names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
    Linux,
    Darwin,
    Windows,
}

impl Os {
    /// Map a `std::env::consts::OS` value to its asset alias.
    /// Unknown systems are treated as linux.
    pub fn from_std(os: &str) -> Self {
        match os.to_lowercase().as_str() {
            "macos" | "darwin" => Os::Darwin,
            "windows" => Os::Windows,
            _ => Os::Linux,
        }
    }

    pub fn alias(&self) -> &'static str {
        match self {
            Os::Linux => "linux",
            Os::Darwin => "darwin",
            Os::Windows => "windows",
        }
    }

    pub fn is_windows_like(&self) -> bool {
        matches!(self, Os::Windows)
    }

    /// Suffix native executables carry on this OS
    pub fn executable_suffix(&self) -> &'static str {
        match self {
            Os::Windows => ".exe",
            Os::Linux | Os::Darwin => "",
        }
    }
}

/// CPU architecture with the aliases release authors use for it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Arch {
    Amd64,
    Arm64,
    Other(String),
}

impl Arch {
    pub fn from_std(arch: &str) -> Self {
        match arch.to_lowercase().as_str() {
            "x86_64" | "amd64" => Arch::Amd64,
            "aarch64" | "arm64" => Arch::Arm64,
            other => Arch::Other(other.to_string()),
        }
    }

    /// Accepted aliases, most common first
    pub fn aliases(&self) -> Vec<&str> {
        match self {
            Arch::Amd64 => vec!["amd64", "x86_64", "x86-64"],
            Arch::Arm64 => vec!["arm64", "aarch64"],
            Arch::Other(name) => vec![name.as_str()],
        }
    }
}

/// The (OS, architecture) pair assets are matched against
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlatformTarget {
    pub os: Os,
    pub arch: Arch,
}

impl PlatformTarget {
    pub fn new(os: Os, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// Platform of the running process
    pub fn current() -> Self {
        Self {
            os: Os::from_std(std::env::consts::OS),
            arch: Arch::from_std(std::env::consts::ARCH),
        }
    }
}

impl fmt::Display for PlatformTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.os.alias(), self.arch.aliases()[0])
    }
}
