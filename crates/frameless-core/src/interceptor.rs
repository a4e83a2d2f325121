//! Platform-neutral event classification.
//!
//! Every native backend funnels the events the host toolkit would otherwise
//! receive through an [`EventClassifier`]. The classifier consults the
//! [`WindowRegistry`] and the hit tester and decides whether the toolkit
//! sees the event, never sees it, or whether the window manager should be
//! asked to start a move, a resize or the system menu in its place.
//!
//! # Rules
//!
//! | Event | Zone | Disposition |
//! |-------|------|-------------|
//! | primary press | caption | request move |
//! | primary press | resize edge | request resize |
//! | primary release | caption / resize edge | suppress |
//! | secondary press | caption | suppress |
//! | secondary release | caption | request system menu |
//! | size/move of a root | - | update bounds, forward |
//! | destroy | - | unregister, forward |
//! | anything else | - | forward |

use std::sync::Arc;

use crate::config::ChromeConfig;
use crate::geometry::{Point, Rectangle};
use crate::handle::NativeWindowHandle;
use crate::hit_test::{hit_test, HitZone, ResizeDirection};
use crate::logging::targets;
use crate::registry::WindowRegistry;

/// A pointer button as reported by the windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// The primary (usually left) button.
    Primary,
    /// The secondary (usually right) button.
    Secondary,
    /// Any other button, by native number.
    Other(u8),
}

impl PointerButton {
    /// Map an X-style button number (1 = primary, 3 = secondary).
    pub fn from_x11(detail: u8) -> Self {
        match detail {
            1 => Self::Primary,
            3 => Self::Secondary,
            other => Self::Other(other),
        }
    }

    /// The X-style button number.
    pub fn x11_number(self) -> u8 {
        match self {
            Self::Primary => 1,
            Self::Secondary => 3,
            Self::Other(other) => other,
        }
    }
}

/// Whether a button went down or up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonAction {
    /// The button was pressed.
    Press,
    /// The button was released.
    Release,
}

/// An event as seen by the chrome, independent of the native stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeEvent {
    /// A pointer button press or release.
    Button {
        /// Window the event was addressed to.
        window: NativeWindowHandle,
        /// Which button.
        button: PointerButton,
        /// Press or release.
        action: ButtonAction,
        /// Position relative to the logical window's root.
        local: Point,
        /// Position on the screen.
        screen: Point,
    },
    /// The window was moved or resized.
    Configure {
        /// Window that changed.
        window: NativeWindowHandle,
        /// New bounds in host coordinates.
        bounds: Rectangle,
    },
    /// The window was destroyed.
    Destroy {
        /// Window that went away.
        window: NativeWindowHandle,
    },
    /// Any event the chrome does not inspect.
    Other,
}

/// A window-manager operation to start on behalf of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WmRequestKind {
    /// Interactive move.
    Move,
    /// Interactive resize in a direction.
    Resize(ResizeDirection),
    /// Show the native system menu.
    SystemMenu,
}

/// A request for the window manager, emitted instead of a toolkit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WmRequest {
    /// Root handle of the logical window.
    pub root: NativeWindowHandle,
    /// What to start.
    pub kind: WmRequestKind,
    /// Screen position of the triggering event.
    pub screen: Point,
    /// Button that triggered the request.
    pub button: PointerButton,
}

/// What to do with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Hand the event to the toolkit unchanged.
    Forward,
    /// Drop the event.
    Suppress,
    /// Drop the event and send this request to the window manager.
    Request(WmRequest),
}

impl Disposition {
    /// Check if the toolkit should see the event.
    pub fn is_forward(&self) -> bool {
        matches!(self, Self::Forward)
    }
}

/// Classifies events against the registered windows.
///
/// Cloning is cheap; clones share the registry.
#[derive(Debug, Clone)]
pub struct EventClassifier {
    registry: Arc<WindowRegistry>,
    system_menu: bool,
}

impl EventClassifier {
    /// Create a classifier over `registry`.
    pub fn new(registry: Arc<WindowRegistry>, config: &ChromeConfig) -> Self {
        Self {
            registry,
            system_menu: config.system_menu(),
        }
    }

    /// The registry this classifier reads and updates.
    pub fn registry(&self) -> &Arc<WindowRegistry> {
        &self.registry
    }

    /// Decide what happens to `event`.
    ///
    /// Configure and destroy notifications update the registry as a side
    /// effect before the event is forwarded.
    pub fn classify(&self, event: &ChromeEvent) -> Disposition {
        let disposition = match *event {
            ChromeEvent::Configure { window, bounds } => {
                if let Some(context) = self.registry.lookup(window)
                    && context.is_root(window)
                {
                    context.set_bounds(bounds);
                }
                Disposition::Forward
            }
            ChromeEvent::Destroy { window } => {
                self.registry.remove(window);
                Disposition::Forward
            }
            ChromeEvent::Button {
                window,
                button,
                action,
                local,
                screen,
            } => self.classify_button(window, button, action, local, screen),
            ChromeEvent::Other => Disposition::Forward,
        };

        if !disposition.is_forward() {
            tracing::trace!(target: targets::INTERCEPTOR, ?event, ?disposition, "intercepted event");
        }
        disposition
    }

    fn classify_button(
        &self,
        window: NativeWindowHandle,
        button: PointerButton,
        action: ButtonAction,
        local: Point,
        screen: Point,
    ) -> Disposition {
        let Some(context) = self.registry.lookup(window) else {
            return Disposition::Forward;
        };

        let zone = hit_test(&context.snapshot(), local);
        let request = |kind| {
            Disposition::Request(WmRequest {
                root: context.root(),
                kind,
                screen,
                button,
            })
        };

        match (button, action, zone) {
            (PointerButton::Primary, ButtonAction::Press, HitZone::Caption) => {
                request(WmRequestKind::Move)
            }
            (PointerButton::Primary, ButtonAction::Press, HitZone::Resize(direction)) => {
                request(WmRequestKind::Resize(direction))
            }
            (PointerButton::Primary, ButtonAction::Release, zone) if zone.is_non_client() => {
                Disposition::Suppress
            }
            (PointerButton::Secondary, ButtonAction::Press, HitZone::Caption) if self.system_menu => {
                Disposition::Suppress
            }
            (PointerButton::Secondary, ButtonAction::Release, HitZone::Caption)
                if self.system_menu =>
            {
                request(WmRequestKind::SystemMenu)
            }
            _ => Disposition::Forward,
        }
    }
}
