//! Host capability detection.

/// Capabilities of the host the zipapp is produced on.
///
/// Passed explicitly into the pipeline so tests can exercise either branch on
/// any host.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct HostPlatform {
    native_launchers: bool,
}

impl HostPlatform {
    /// Creates a platform description.
    pub const fn new(native_launchers: bool) -> Self {
        Self { native_launchers }
    }

    /// Describes the running host. Only Windows executes launcher stubs.
    pub const fn current() -> Self {
        Self::new(cfg!(windows))
    }

    /// Whether fused launcher executables (`.exe`) can be produced.
    pub const fn supports_native_launchers(&self) -> bool {
        self.native_launchers
    }
}

impl Default for HostPlatform {
    fn default() -> Self {
        Self::current()
    }
}
