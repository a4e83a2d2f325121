//! Logging facilities for frameless.
//!
//! frameless uses the `tracing` crate for instrumentation and never installs
//! a subscriber itself. To see logs, install one in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("frameless_core::interceptor=trace")
//!     .init();
//! ```
//!
//! Per-event classification is logged at `trace`, registration changes at
//! `debug`, and best-effort failures at `warn`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Window registry target.
    pub const REGISTRY: &str = "frameless_core::registry";
    /// Hit testing target.
    pub const HIT_TEST: &str = "frameless_core::hit_test";
    /// Event classification target.
    pub const INTERCEPTOR: &str = "frameless_core::interceptor";
    /// Facade target.
    pub const CHROME: &str = "frameless_core::chrome";
    /// X11 backend target.
    pub const X11: &str = "frameless::x11";
    /// Win32 backend target.
    pub const WIN32: &str = "frameless::win32";
}
