//! Core of frameless, borderless window chrome for native windows.
//!
//! This crate holds everything that does not touch a native windowing API:
//!
//! - **Geometry**: points, rectangles and the frame/control ordinals
//! - **Window contexts**: per-window chrome geometry shared by all native
//!   sub-windows of one logical window
//! - **Registry**: the handle -> context map the interceptors consult
//! - **Hit testing**: classifying a pointer position as client, caption,
//!   resize edge or control
//! - **Interception**: the rules deciding which events the host toolkit sees
//!   and which become window-manager requests
//!
//! The native backends live in the `frameless` crate.
//!
//! # Example
//!
//! ```
//! use frameless_core::{
//!     hit_test, ControlKind, FrameKind, HitZone, NativeWindowHandle, Point, Rectangle,
//!     ResizeDirection, WindowContext,
//! };
//!
//! let context = WindowContext::new(NativeWindowHandle::from_raw(1), Rectangle::new(0, 0, 800, 600));
//! context.set_frame_size(FrameKind::EdgeInsets, 5);
//! context.set_frame_size(FrameKind::TitleBar, 32);
//! context.set_control_position(ControlKind::CloseButton, Rectangle::new(700, 0, 740, 30));
//!
//! let geometry = context.snapshot();
//! assert_eq!(hit_test(&geometry, Point::new(720, 10)), HitZone::Control(ControlKind::CloseButton));
//! assert_eq!(hit_test(&geometry, Point::new(2, 2)), HitZone::Resize(ResizeDirection::NorthWest));
//! assert_eq!(hit_test(&geometry, Point::new(400, 20)), HitZone::Caption);
//! assert_eq!(hit_test(&geometry, Point::new(400, 100)), HitZone::Client);
//! ```

mod chrome;
mod config;
mod context;
mod error;
pub mod geometry;
mod handle;
pub mod hit_test;
pub mod interceptor;
pub mod logging;
pub mod procedure;
mod registry;

pub use chrome::{ChromeBackend, WindowChrome};
pub use config::ChromeConfig;
pub use context::{ChromeGeometry, WindowContext};
pub use error::{ChromeError, ChromeResult};
pub use geometry::{ControlKind, FrameKind, Point, Rectangle, Size};
pub use handle::NativeWindowHandle;
pub use hit_test::{cursor_for_zone, hit_test, HitZone, ResizeDirection};
pub use interceptor::{
    ButtonAction, ChromeEvent, Disposition, EventClassifier, PointerButton, WmRequest,
    WmRequestKind,
};
pub use procedure::{dispatch, SubclassAction, SubclassMessage};
pub use registry::{WindowRegistry, WindowTree};

// Re-export cursor types so embedders can map zones to cursors
pub use cursor_icon::CursorIcon;
