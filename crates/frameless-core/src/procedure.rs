//! Decisions of the subclassed window procedure.
//!
//! On message-procedure platforms every managed native window has its
//! procedure replaced by the chrome procedure, which keeps a reference to the
//! previous one and forwards anything it does not handle. The native side
//! decodes each message into a [`SubclassMessage`], asks [`dispatch`] what to
//! do and carries out the returned [`SubclassAction`]. Keeping the decision
//! here lets it be tested without a native window.

use crate::config::ChromeConfig;
use crate::context::WindowContext;
use crate::geometry::Point;
use crate::handle::NativeWindowHandle;
use crate::hit_test::{hit_test, HitZone};
use crate::logging::targets;

/// A native message, reduced to what the chrome inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubclassMessage {
    /// Non-client hit test at a screen position.
    HitTest {
        /// Pointer position in screen coordinates.
        screen: Point,
    },
    /// Non-client area size calculation.
    NonClientCalcSize {
        /// Whether the proposed client rectangle should be recomputed.
        recalculate: bool,
    },
    /// The window was resized or moved.
    SizeOrMove,
    /// Secondary button pressed in the non-client area.
    NonClientRightDown {
        /// Whether the press landed on the caption.
        caption: bool,
    },
    /// Secondary button released in the non-client area.
    NonClientRightUp {
        /// Whether the release landed on the caption.
        caption: bool,
        /// Release position in screen coordinates.
        screen: Point,
    },
    /// A command, possibly picked from the system menu.
    Command {
        /// Whether the command identifier is a system-menu command.
        system: bool,
    },
    /// A system command.
    SystemCommand,
    /// The window is being destroyed.
    Destroy,
    /// Last message the window receives.
    NonClientDestroy,
    /// A child window was created.
    ChildCreated {
        /// The new child.
        child: NativeWindowHandle,
    },
    /// Anything else.
    Other,
}

/// What the chrome procedure does with a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubclassAction {
    /// Answer a hit test with this zone.
    Zone(HitZone),
    /// Answer a hit test as transparent so the message reaches the parent.
    Transparent,
    /// Extend the client area over the native frame, padding the caption
    /// when maximized, and return 0.
    PadCaption,
    /// Re-read the window rectangle into the context, then forward.
    RefreshBounds,
    /// Return 0 without forwarding.
    Handled,
    /// Show the root's system menu at `screen`, return 0.
    ShowSystemMenu {
        /// Window owning the menu.
        root: NativeWindowHandle,
        /// Where to open it.
        screen: Point,
    },
    /// Re-send the command to the root as a system command.
    RedirectSystemCommand {
        /// Target window.
        root: NativeWindowHandle,
    },
    /// Run the default procedure on the root.
    DefaultOnRoot {
        /// Target window.
        root: NativeWindowHandle,
    },
    /// Remove the window from the registry, then forward.
    Unregister,
    /// Forward, then release the per-window state.
    Detach,
    /// Subclass the child, then forward.
    SubclassChild {
        /// The child to subclass.
        child: NativeWindowHandle,
    },
    /// Call the previous procedure.
    Forward,
}

/// Decide how `window`, bound to `context`, handles `message`.
pub fn dispatch(
    context: &WindowContext,
    window: NativeWindowHandle,
    message: SubclassMessage,
    config: &ChromeConfig,
) -> SubclassAction {
    let is_root = context.is_root(window);

    let action = match message {
        SubclassMessage::HitTest { screen } => {
            let geometry = context.snapshot();
            let zone = hit_test(&geometry, screen.relative_to(geometry.bounds.origin()));
            if is_root || !zone.is_non_client() {
                SubclassAction::Zone(zone)
            } else {
                SubclassAction::Transparent
            }
        }
        SubclassMessage::NonClientCalcSize { recalculate: true } if is_root => {
            SubclassAction::PadCaption
        }
        SubclassMessage::SizeOrMove if is_root => SubclassAction::RefreshBounds,
        SubclassMessage::NonClientRightDown { caption: true } if config.system_menu() => {
            SubclassAction::Handled
        }
        SubclassMessage::NonClientRightUp {
            caption: true,
            screen,
        } if config.system_menu() => SubclassAction::ShowSystemMenu {
            root: context.root(),
            screen,
        },
        SubclassMessage::Command { system: true } => SubclassAction::RedirectSystemCommand {
            root: context.root(),
        },
        SubclassMessage::SystemCommand => SubclassAction::DefaultOnRoot {
            root: context.root(),
        },
        SubclassMessage::Destroy => SubclassAction::Unregister,
        SubclassMessage::NonClientDestroy => SubclassAction::Detach,
        SubclassMessage::ChildCreated { child } => SubclassAction::SubclassChild { child },
        _ => SubclassAction::Forward,
    };

    tracing::trace!(target: targets::INTERCEPTOR, %window, ?message, ?action, "subclass dispatch");
    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{ControlKind, FrameKind, Rectangle};
    use crate::hit_test::ResizeDirection;

    const ROOT: NativeWindowHandle = NativeWindowHandle::from_raw(0x10);
    const CHILD: NativeWindowHandle = NativeWindowHandle::from_raw(0x11);

    /// 800x600 window placed at (100, 50) on the screen.
    fn context() -> WindowContext {
        let context = WindowContext::new(ROOT, Rectangle::new(100, 50, 900, 650));
        context.set_frame_size(FrameKind::EdgeInsets, 5);
        context.set_frame_size(FrameKind::TitleBar, 32);
        context.set_control_position(ControlKind::CloseButton, Rectangle::new(700, 0, 740, 30));
        context
    }

    fn hit(window: NativeWindowHandle, x: i32, y: i32) -> SubclassAction {
        dispatch(
            &context(),
            window,
            SubclassMessage::HitTest {
                screen: Point::new(x, y),
            },
            &ChromeConfig::new(),
        )
    }

    #[test]
    fn test_root_hit_test_uses_window_origin() {
        assert_eq!(hit(ROOT, 500, 70), SubclassAction::Zone(HitZone::Caption));
        assert_eq!(hit(ROOT, 500, 150), SubclassAction::Zone(HitZone::Client));
        assert_eq!(
            hit(ROOT, 102, 52),
            SubclassAction::Zone(HitZone::Resize(ResizeDirection::NorthWest))
        );
        assert_eq!(
            hit(ROOT, 820, 60),
            SubclassAction::Zone(HitZone::Control(ControlKind::CloseButton))
        );
    }

    #[test]
    fn test_child_hit_test_is_transparent_outside_client() {
        assert_eq!(hit(CHILD, 500, 70), SubclassAction::Transparent);
        assert_eq!(hit(CHILD, 102, 300), SubclassAction::Transparent);
        assert_eq!(hit(CHILD, 500, 150), SubclassAction::Zone(HitZone::Client));
        assert_eq!(
            hit(CHILD, 820, 60),
            SubclassAction::Zone(HitZone::Control(ControlKind::CloseButton))
        );
    }

    #[test]
    fn test_calc_size_only_pads_root() {
        let context = context();
        let config = ChromeConfig::new();
        let recalc = SubclassMessage::NonClientCalcSize { recalculate: true };

        assert_eq!(dispatch(&context, ROOT, recalc, &config), SubclassAction::PadCaption);
        assert_eq!(dispatch(&context, CHILD, recalc, &config), SubclassAction::Forward);
        assert_eq!(
            dispatch(
                &context,
                ROOT,
                SubclassMessage::NonClientCalcSize { recalculate: false },
                &config
            ),
            SubclassAction::Forward
        );
    }

    #[test]
    fn test_size_or_move_refreshes_root() {
        let context = context();
        let config = ChromeConfig::new();

        assert_eq!(
            dispatch(&context, ROOT, SubclassMessage::SizeOrMove, &config),
            SubclassAction::RefreshBounds
        );
        assert_eq!(
            dispatch(&context, CHILD, SubclassMessage::SizeOrMove, &config),
            SubclassAction::Forward
        );
    }

    #[test]
    fn test_system_menu_on_caption() {
        let context = context();
        let config = ChromeConfig::new();
        let screen = Point::new(400, 60);

        assert_eq!(
            dispatch(&context, ROOT, SubclassMessage::NonClientRightDown { caption: true }, &config),
            SubclassAction::Handled
        );
        assert_eq!(
            dispatch(
                &context,
                ROOT,
                SubclassMessage::NonClientRightUp { caption: true, screen },
                &config
            ),
            SubclassAction::ShowSystemMenu { root: ROOT, screen }
        );
        assert_eq!(
            dispatch(
                &context,
                ROOT,
                SubclassMessage::NonClientRightUp { caption: false, screen },
                &config
            ),
            SubclassAction::Forward
        );
    }

    #[test]
    fn test_system_menu_disabled() {
        let context = context();
        let config = ChromeConfig::new().with_system_menu(false);

        assert_eq!(
            dispatch(
                &context,
                ROOT,
                SubclassMessage::NonClientRightUp {
                    caption: true,
                    screen: Point::ZERO
                },
                &config
            ),
            SubclassAction::Forward
        );
    }

    #[test]
    fn test_commands_go_to_root() {
        let context = context();
        let config = ChromeConfig::new();

        assert_eq!(
            dispatch(&context, CHILD, SubclassMessage::Command { system: true }, &config),
            SubclassAction::RedirectSystemCommand { root: ROOT }
        );
        assert_eq!(
            dispatch(&context, CHILD, SubclassMessage::Command { system: false }, &config),
            SubclassAction::Forward
        );
        assert_eq!(
            dispatch(&context, CHILD, SubclassMessage::SystemCommand, &config),
            SubclassAction::DefaultOnRoot { root: ROOT }
        );
    }

    #[test]
    fn test_lifecycle_messages() {
        let context = context();
        let config = ChromeConfig::new();
        let child = NativeWindowHandle::from_raw(0x12);

        assert_eq!(
            dispatch(&context, CHILD, SubclassMessage::Destroy, &config),
            SubclassAction::Unregister
        );
        assert_eq!(
            dispatch(&context, CHILD, SubclassMessage::NonClientDestroy, &config),
            SubclassAction::Detach
        );
        assert_eq!(
            dispatch(&context, ROOT, SubclassMessage::ChildCreated { child }, &config),
            SubclassAction::SubclassChild { child }
        );
        assert_eq!(
            dispatch(&context, ROOT, SubclassMessage::Other, &config),
            SubclassAction::Forward
        );
    }
}
