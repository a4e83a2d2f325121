//! The embedder-facing chrome facade.
//!
//! A [`WindowChrome`] is created once when the windowing subsystem starts and
//! lives until it shuts down. It owns the [`WindowRegistry`] and hands it to
//! the native backend, so there is no process-wide registry.
//!
//! # Example
//!
//! ```ignore
//! use frameless_core::{ChromeConfig, ControlKind, FrameKind, Rectangle, WindowChrome};
//!
//! let chrome = WindowChrome::new(backend, ChromeConfig::new().with_edge_insets(5));
//! chrome.set_borderless(window)?;
//! chrome.set_frame_size(window, FrameKind::TitleBar, 32);
//! chrome.set_control_position(window, ControlKind::CloseButton, Rectangle::new(700, 0, 740, 30));
//! ```

use std::sync::Arc;

use crate::config::ChromeConfig;
use crate::context::WindowContext;
use crate::error::{ChromeError, ChromeResult};
use crate::geometry::{ControlKind, FrameKind, Rectangle};
use crate::handle::NativeWindowHandle;
use crate::interceptor::EventClassifier;
use crate::logging::targets;
use crate::registry::{WindowRegistry, WindowTree};

/// Native operations a windowing stack provides to the chrome.
pub trait ChromeBackend: WindowTree {
    /// Current bounds of `window` in host coordinates.
    fn window_bounds(&self, window: NativeWindowHandle) -> ChromeResult<Rectangle>;

    /// Strip the native frame and title bar from `window`.
    fn remove_decorations(&self, window: NativeWindowHandle) -> ChromeResult<()>;

    /// Start intercepting events of a newly registered handle.
    ///
    /// Called once per handle after it has been bound to `context`, root
    /// first. Backends that intercept at the event-loop level need nothing
    /// here.
    fn attach(
        &self,
        window: NativeWindowHandle,
        context: &Arc<WindowContext>,
        registry: &Arc<WindowRegistry>,
        config: &ChromeConfig,
    ) -> ChromeResult<()> {
        let _ = (window, context, registry, config);
        Ok(())
    }

    /// Whether the running window manager supports the chrome protocols.
    fn is_supported(&self) -> bool {
        true
    }
}

/// Borderless window chrome over a native backend.
#[derive(Debug)]
pub struct WindowChrome<B: ChromeBackend> {
    registry: Arc<WindowRegistry>,
    backend: B,
    config: ChromeConfig,
}

impl<B: ChromeBackend> WindowChrome<B> {
    /// Create the chrome with an empty registry.
    pub fn new(backend: B, config: ChromeConfig) -> Self {
        Self {
            registry: Arc::new(WindowRegistry::new()),
            backend,
            config,
        }
    }

    /// Make `window` borderless and start managing it.
    ///
    /// Calling this again for a managed window returns the existing context
    /// with its geometry untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ChromeError::Unsupported`] without touching the window if the
    /// window manager lacks the move and resize protocol. Returns a native
    /// error if reading the bounds, removing decorations or attaching fails;
    /// after a failed attach the window is unmanaged again. A failure to
    /// enumerate part of the window tree is logged and skipped.
    pub fn set_borderless(&self, window: NativeWindowHandle) -> ChromeResult<Arc<WindowContext>> {
        if let Some(context) = self.registry.lookup(window) {
            return Ok(context);
        }
        if !self.backend.is_supported() {
            return Err(ChromeError::Unsupported("interactive move and resize"));
        }

        let bounds = self.backend.window_bounds(window)?;
        if self.config.remove_decorations() {
            self.backend.remove_decorations(window)?;
        }

        let context = Arc::new(WindowContext::with_geometry(
            window,
            self.config.initial_geometry(bounds),
        ));
        let registered = self.registry.register_tree(window, &context, &self.backend);
        let attached = registered.iter().try_for_each(|&handle| {
            self.backend
                .attach(handle, &context, &self.registry, &self.config)
        });
        if let Err(err) = attached {
            for &handle in &registered {
                self.registry.remove(handle);
            }
            tracing::warn!(
                target: targets::CHROME,
                %window,
                error = %err,
                "attach failed, window left unmanaged"
            );
            return Err(err);
        }

        tracing::debug!(
            target: targets::CHROME,
            %window,
            ?bounds,
            handles = registered.len(),
            "window is now borderless"
        );
        // A racing call may have registered its own context first.
        Ok(self.registry.lookup(window).unwrap_or(context))
    }

    /// Set a frame size of a managed window. Unmanaged windows are ignored.
    pub fn set_frame_size(&self, window: NativeWindowHandle, frame: FrameKind, size: i32) {
        if let Some(context) = self.registry.lookup(window) {
            context.set_frame_size(frame, size);
        }
    }

    /// Set a control rectangle of a managed window. Unmanaged windows are
    /// ignored.
    pub fn set_control_position(
        &self,
        window: NativeWindowHandle,
        control: ControlKind,
        rect: Rectangle,
    ) {
        if let Some(context) = self.registry.lookup(window) {
            context.set_control_position(control, rect);
        }
    }

    /// The context bound to `window`, if managed.
    pub fn context(&self, window: NativeWindowHandle) -> Option<Arc<WindowContext>> {
        self.registry.lookup(window)
    }

    /// A classifier sharing this chrome's registry.
    pub fn classifier(&self) -> EventClassifier {
        EventClassifier::new(Arc::clone(&self.registry), &self.config)
    }

    /// The registry of managed windows.
    pub fn registry(&self) -> &Arc<WindowRegistry> {
        &self.registry
    }

    /// The native backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The configuration.
    pub fn config(&self) -> &ChromeConfig {
        &self.config
    }

    /// Whether the running window manager supports the chrome protocols.
    pub fn is_supported(&self) -> bool {
        self.backend.is_supported()
    }

    /// Forget every managed window.
    pub fn shutdown(&self) {
        self.registry.clear();
    }
}
