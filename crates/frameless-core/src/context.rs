//! Per-window chrome state.

use parking_lot::RwLock;

use crate::geometry::{ControlKind, FrameKind, Rectangle, Size};
use crate::handle::NativeWindowHandle;

/// A copy of a window's chrome geometry at one instant.
///
/// Hit testing runs against a snapshot, so a concurrent update from the
/// embedder is observed at most one event late and never half-applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeGeometry {
    /// Window bounds in host coordinates.
    pub bounds: Rectangle,
    /// Frame sizes, indexed by [`FrameKind::index`].
    pub frame_sizes: [i32; FrameKind::COUNT],
    /// Control rectangles in window-local coordinates, indexed by
    /// [`ControlKind::index`].
    pub controls: [Option<Rectangle>; ControlKind::COUNT],
}

impl ChromeGeometry {
    /// Geometry with the given bounds and no frame or controls configured.
    pub fn new(bounds: Rectangle) -> Self {
        Self {
            bounds,
            frame_sizes: [0; FrameKind::COUNT],
            controls: [None; ControlKind::COUNT],
        }
    }

    /// Configured size for a frame kind.
    pub fn frame_size(&self, frame: FrameKind) -> i32 {
        self.frame_sizes[frame.index()]
    }

    /// Configured rectangle for a control, if any.
    pub fn control(&self, control: ControlKind) -> Option<Rectangle> {
        self.controls[control.index()]
    }

    /// Window size.
    pub fn size(&self) -> Size {
        self.bounds.size()
    }

    /// Iterate the configured controls.
    pub fn controls(&self) -> impl Iterator<Item = (ControlKind, Rectangle)> + '_ {
        ControlKind::ALL
            .iter()
            .filter_map(|&kind| self.control(kind).map(|rect| (kind, rect)))
    }
}

/// Chrome state of one managed top-level window.
///
/// Every native handle that belongs to the logical window resolves to the
/// same `WindowContext` through the registry.
#[derive(Debug)]
pub struct WindowContext {
    root: NativeWindowHandle,
    geometry: RwLock<ChromeGeometry>,
}

impl WindowContext {
    /// Create a context for `root` with its current bounds.
    pub fn new(root: NativeWindowHandle, bounds: Rectangle) -> Self {
        Self::with_geometry(root, ChromeGeometry::new(bounds))
    }

    /// Create a context with fully specified initial geometry.
    pub fn with_geometry(root: NativeWindowHandle, geometry: ChromeGeometry) -> Self {
        Self {
            root,
            geometry: RwLock::new(geometry),
        }
    }

    /// The root handle of the logical window.
    pub fn root(&self) -> NativeWindowHandle {
        self.root
    }

    /// Whether `handle` is this context's root.
    pub fn is_root(&self, handle: NativeWindowHandle) -> bool {
        self.root == handle
    }

    /// Take a snapshot of the current geometry.
    pub fn snapshot(&self) -> ChromeGeometry {
        *self.geometry.read()
    }

    /// Current bounds in host coordinates.
    pub fn bounds(&self) -> Rectangle {
        self.geometry.read().bounds
    }

    /// Replace the bounds after a move or resize notification.
    pub fn set_bounds(&self, bounds: Rectangle) {
        self.geometry.write().bounds = bounds;
    }

    /// Set a frame size. Negative sizes are treated as zero.
    pub fn set_frame_size(&self, frame: FrameKind, size: i32) {
        self.geometry.write().frame_sizes[frame.index()] = size.max(0);
    }

    /// Configured size for a frame kind.
    pub fn frame_size(&self, frame: FrameKind) -> i32 {
        self.geometry.read().frame_size(frame)
    }

    /// Set a control's hit rectangle in window-local coordinates.
    pub fn set_control_position(&self, control: ControlKind, rect: Rectangle) {
        self.geometry.write().controls[control.index()] = Some(rect);
    }

    /// Configured rectangle for a control, if any.
    pub fn control_position(&self, control: ControlKind) -> Option<Rectangle> {
        self.geometry.read().control(control)
    }
}

// Ensure WindowContext is Send + Sync
static_assertions::assert_impl_all!(WindowContext: Send, Sync);
