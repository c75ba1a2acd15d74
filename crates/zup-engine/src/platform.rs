//! Platform identification for compiler downloads.
//!
//! The ziglang.org download site uses two different platform spellings:
//! archive names carry `<os>-<arch>` (`zig-linux-x86_64-0.11.0.tar.xz`)
//! while the JSON download index keys releases by `<arch>-<os>`
//! (`x86_64-linux`). Both spellings live here so nothing else has to
//! remember which goes where.

/// Supported operating systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
    Linux,
    Macos,
    Windows,
}

impl Os {
    /// The OS component used in archive names and index keys.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linux => "linux",
            Self::Macos => "macos",
            Self::Windows => "windows",
        }
    }
}

/// Supported CPU architectures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    X86_64,
    Aarch64,
}

impl Arch {
    /// The architecture component used in archive names and index keys.
    pub fn name(&self) -> &'static str {
        match self {
            Self::X86_64 => "x86_64",
            Self::Aarch64 => "aarch64",
        }
    }
}

#[cfg(target_os = "linux")]
const HOST_OS: Os = Os::Linux;
#[cfg(target_os = "macos")]
const HOST_OS: Os = Os::Macos;
#[cfg(target_os = "windows")]
const HOST_OS: Os = Os::Windows;
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
compile_error!("no zig download target for this operating system");

#[cfg(target_arch = "x86_64")]
const HOST_ARCH: Arch = Arch::X86_64;
#[cfg(target_arch = "aarch64")]
const HOST_ARCH: Arch = Arch::Aarch64;
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
compile_error!("no zig download target for this CPU architecture");

/// An (os, arch) pair naming one published compiler build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
    pub os: Os,
    pub arch: Arch,
}

impl Platform {
    /// The build target of this binary. Total: an unsupported host fails
    /// at compile time, never at run time.
    pub const fn host() -> Self {
        Self {
            os: HOST_OS,
            arch: HOST_ARCH,
        }
    }

    /// The `<os>-<arch>` component embedded in archive names.
    pub fn url_component(&self) -> String {
        format!("{}-{}", self.os.name(), self.arch.name())
    }

    /// The `<arch>-<os>` key used by the JSON download index.
    pub fn index_key(&self) -> String {
        format!("{}-{}", self.arch.name(), self.os.name())
    }

    /// Archive extension published for this platform.
    pub fn archive_ext(&self) -> &'static str {
        match self.os {
            Os::Windows => "zip",
            _ => "tar.xz",
        }
    }

    /// Check if this platform uses Unix conventions.
    pub fn is_unix(&self) -> bool {
        !matches!(self.os, Os::Windows)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.index_key())
    }
}

/// The compiler executable name on the build host.
pub fn compiler_exe_name() -> &'static str {
    if cfg!(windows) { "zig.exe" } else { "zig" }
}
