//! Opaque native window handles.

use std::fmt;

use raw_window_handle::{HasWindowHandle, RawWindowHandle};

use crate::error::{ChromeError, ChromeResult};

/// An opaque, integer-sized native window identifier.
///
/// On X11 this is the `Window` XID; on Win32 it is the `HWND` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NativeWindowHandle(u64);

impl NativeWindowHandle {
    /// Wrap a raw native identifier.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw native identifier.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Resolve the handle of anything exposing a `raw-window-handle`.
    pub fn from_window(window: &impl HasWindowHandle) -> ChromeResult<Self> {
        let handle = window
            .window_handle()
            .map_err(|e| ChromeError::UnsupportedHandle(e.to_string()))?;
        Self::try_from(handle.as_raw())
    }
}

impl From<u64> for NativeWindowHandle {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<u32> for NativeWindowHandle {
    fn from(raw: u32) -> Self {
        Self(u64::from(raw))
    }
}

impl TryFrom<RawWindowHandle> for NativeWindowHandle {
    type Error = ChromeError;

    fn try_from(handle: RawWindowHandle) -> Result<Self, Self::Error> {
        match handle {
            RawWindowHandle::Xlib(handle) => Ok(Self(handle.window as u64)),
            RawWindowHandle::Xcb(handle) => Ok(Self(u64::from(handle.window.get()))),
            RawWindowHandle::Win32(handle) => Ok(Self(handle.hwnd.get() as usize as u64)),
            other => Err(ChromeError::UnsupportedHandle(format!("{other:?}"))),
        }
    }
}

impl fmt::Display for NativeWindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}
