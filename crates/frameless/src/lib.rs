//! Borderless window chrome for native windows.
//!
//! frameless lets an application draw its own title bar and window controls
//! while keeping native behavior: dragging the title bar moves the window,
//! dragging an edge resizes it, and a secondary click on the title bar opens
//! the system menu.
//!
//! The platform-independent part lives in [`frameless_core`] and is
//! re-exported here. This crate adds the native backends:
//!
//! - **X11** ([`x11`]): an event-loop interceptor that turns caption and edge
//!   clicks into EWMH window-manager requests
//! - **Win32** ([`win32`]): a subclassed window procedure answering the
//!   system's non-client hit tests
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(target_os = "linux")]
//! # fn main() -> Result<(), frameless::ChromeError> {
//! use frameless::x11::{X11Backend, X11Interceptor};
//! use frameless::{ChromeConfig, FrameKind, NativeWindowHandle, WindowChrome};
//!
//! let chrome = WindowChrome::new(
//!     X11Backend::connect()?,
//!     ChromeConfig::new().with_edge_insets(5).with_title_bar_height(32),
//! );
//! let window = NativeWindowHandle::from(0x0040_0001u32);
//! chrome.set_borderless(window)?;
//!
//! let interceptor = X11Interceptor::new(chrome.backend(), chrome.classifier());
//! loop {
//!     let event = interceptor.next_event()?;
//!     // Hand `event` to the toolkit.
//!     # let _ = event;
//! }
//! # }
//! # #[cfg(not(target_os = "linux"))]
//! # fn main() {}
//! ```

pub use frameless_core::*;

#[cfg(target_os = "windows")]
pub mod win32;
#[cfg(target_os = "linux")]
pub mod x11;

#[cfg(target_os = "linux")]
pub use x11::{X11Backend, X11Interceptor};

#[cfg(target_os = "windows")]
pub use win32::Win32Backend;
