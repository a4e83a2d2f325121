//! Registry of chrome-managed windows.
//!
//! The `WindowRegistry` maps every native handle that forms part of a managed
//! window to that window's shared [`WindowContext`]. Some windowing systems
//! compose one logical window from several native sub-windows and deliver
//! input to whichever one is under the pointer, so descendants are registered
//! against the root's context.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use frameless_core::{NativeWindowHandle, Rectangle, WindowContext, WindowRegistry};
//!
//! let registry = WindowRegistry::new();
//! let root = NativeWindowHandle::from_raw(1);
//! let context = Arc::new(WindowContext::new(root, Rectangle::new(0, 0, 800, 600)));
//!
//! assert!(registry.register(root, &context));
//! assert!(registry.lookup(root).is_some());
//!
//! registry.remove(root);
//! assert!(registry.lookup(root).is_none());
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::context::WindowContext;
use crate::error::ChromeResult;
use crate::handle::NativeWindowHandle;
use crate::logging::targets;

/// Enumeration of a native window's children.
pub trait WindowTree {
    /// Return the child windows of `window`.
    ///
    /// Implementations may return any descendants; the registry skips handles
    /// it has already seen.
    fn children(&self, window: NativeWindowHandle) -> ChromeResult<Vec<NativeWindowHandle>>;
}

/// Concurrency-safe map from native handles to window contexts.
///
/// Every operation takes the single internal lock for the duration of the map
/// access only. Callbacks into native code (such as tree enumeration) always
/// run with the lock released.
#[derive(Debug, Default)]
pub struct WindowRegistry {
    windows: Mutex<HashMap<NativeWindowHandle, Arc<WindowContext>>>,
}

impl WindowRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handle` to `context`.
    ///
    /// Returns `false` and leaves the existing binding untouched if the handle
    /// is already registered.
    pub fn register(&self, handle: NativeWindowHandle, context: &Arc<WindowContext>) -> bool {
        let mut windows = self.windows.lock();
        if windows.contains_key(&handle) {
            return false;
        }

        windows.insert(handle, Arc::clone(context));
        tracing::debug!(
            target: targets::REGISTRY,
            %handle,
            root = %context.root(),
            "registered window"
        );
        true
    }

    /// Register `root` and all of its descendants against `context`.
    ///
    /// The tree is walked iteratively with an explicit work-list. The walk is
    /// best-effort: if enumerating one window's children fails, that subtree
    /// is skipped and everything already registered stays registered.
    ///
    /// Returns the handles that were newly registered, root first.
    pub fn register_tree(
        &self,
        root: NativeWindowHandle,
        context: &Arc<WindowContext>,
        tree: &(impl WindowTree + ?Sized),
    ) -> Vec<NativeWindowHandle> {
        let mut registered = Vec::new();
        let mut pending = vec![root];

        while let Some(window) = pending.pop() {
            if !self.register(window, context) {
                continue;
            }
            registered.push(window);

            match tree.children(window) {
                // Reversed so siblings are visited in native stacking order.
                Ok(children) => pending.extend(children.into_iter().rev()),
                Err(err) => {
                    tracing::warn!(
                        target: targets::REGISTRY,
                        %window,
                        error = %err,
                        "failed to enumerate child windows"
                    );
                }
            }
        }

        registered
    }

    /// Find the context bound to `handle`.
    pub fn lookup(&self, handle: NativeWindowHandle) -> Option<Arc<WindowContext>> {
        self.windows.lock().get(&handle).cloned()
    }

    /// Check if a handle is registered.
    pub fn contains(&self, handle: NativeWindowHandle) -> bool {
        self.windows.lock().contains_key(&handle)
    }

    /// Remove exactly one handle. Other handles bound to the same context are
    /// left in place.
    pub fn remove(&self, handle: NativeWindowHandle) -> Option<Arc<WindowContext>> {
        let removed = self.windows.lock().remove(&handle);
        if removed.is_some() {
            tracing::debug!(target: targets::REGISTRY, %handle, "removed window");
        }
        removed
    }

    /// All handles currently bound to `context`.
    pub fn handles_of(&self, context: &Arc<WindowContext>) -> Vec<NativeWindowHandle> {
        self.windows
            .lock()
            .iter()
            .filter(|(_, bound)| Arc::ptr_eq(bound, context))
            .map(|(&handle, _)| handle)
            .collect()
    }

    /// Number of registered handles.
    pub fn len(&self) -> usize {
        self.windows.lock().len()
    }

    /// Check if no handles are registered.
    pub fn is_empty(&self) -> bool {
        self.windows.lock().is_empty()
    }

    /// Drop every registration.
    pub fn clear(&self) {
        let drained = std::mem::take(&mut *self.windows.lock());
        tracing::debug!(
            target: targets::REGISTRY,
            count = drained.len(),
            "cleared window registry"
        );
    }
}

// Ensure WindowRegistry is Send + Sync
static_assertions::assert_impl_all!(WindowRegistry: Send, Sync);
