//! Hit testing for borderless window chrome.
//!
//! When a window has no native decorations, the application draws its own
//! title bar and controls. This module decides what a pointer position means
//! for such a window:
//!
//! - **Controls**: embedder-drawn buttons that must receive ordinary clicks
//! - **Resize borders**: areas at the window edges that trigger resizing
//! - **Caption**: the title bar, which drags the window
//! - **Client**: everything else
//!
//! # Usage
//!
//! ```
//! use frameless_core::{hit_test, ChromeGeometry, FrameKind, HitZone, Point, Rectangle};
//!
//! let mut geometry = ChromeGeometry::new(Rectangle::new(0, 0, 800, 600));
//! geometry.frame_sizes[FrameKind::EdgeInsets.index()] = 5;
//! geometry.frame_sizes[FrameKind::TitleBar.index()] = 32;
//!
//! assert_eq!(hit_test(&geometry, Point::new(400, 20)), HitZone::Caption);
//! assert_eq!(hit_test(&geometry, Point::new(400, 100)), HitZone::Client);
//! ```

use cursor_icon::CursorIcon;

use crate::context::ChromeGeometry;
use crate::geometry::{ControlKind, FrameKind, Point};
use crate::logging::targets;

/// Re-export of winit's ResizeDirection for convenience.
pub use winit::window::ResizeDirection;

/// Semantic zone under a pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitZone {
    /// Ordinary client area - handle as a normal toolkit event.
    Client,

    /// The title bar. Dragging moves the window; a secondary click opens
    /// the system menu.
    Caption,

    /// A resize border. Dragging resizes the window in the given direction.
    Resize(ResizeDirection),

    /// An embedder-drawn control. Behaves like client area.
    Control(ControlKind),
}

impl HitZone {
    /// Check if this zone starts a resize operation.
    pub fn is_resize(&self) -> bool {
        matches!(self, Self::Resize(_))
    }

    /// Check if this zone is the caption.
    pub fn is_caption(&self) -> bool {
        matches!(self, Self::Caption)
    }

    /// Check if this zone is a control.
    pub fn is_control(&self) -> bool {
        matches!(self, Self::Control(_))
    }

    /// Check if this zone is handled by the chrome rather than the toolkit.
    pub fn is_non_client(&self) -> bool {
        matches!(self, Self::Caption | Self::Resize(_))
    }
}

/// Classify a point given in window-local coordinates.
///
/// # Hit Test Order
///
/// 1. Controls (they always win, so an overlapping caption or edge never
///    steals a click meant for a button)
/// 2. Resize corners: top-left, top-right, bottom-left, bottom-right
/// 3. Resize edges: top, bottom, left, right
/// 4. Caption (`y` above the title bar height)
/// 5. Client area (default)
///
/// Windows smaller than twice the edge inset resolve deterministically by
/// that same order.
pub fn hit_test(geometry: &ChromeGeometry, point: Point) -> HitZone {
    let zone = classify(geometry, point);
    tracing::trace!(target: targets::HIT_TEST, x = point.x, y = point.y, ?zone, "hit test");
    zone
}

fn classify(geometry: &ChromeGeometry, point: Point) -> HitZone {
    // 1. Controls take priority
    if let Some((control, _)) = geometry.controls().find(|(_, rect)| rect.contains(point)) {
        return HitZone::Control(control);
    }

    // 2. and 3. Resize borders
    if let Some(direction) = hit_test_resize(geometry, point) {
        return HitZone::Resize(direction);
    }

    // 4. Title bar
    if point.y < geometry.frame_size(FrameKind::TitleBar) {
        return HitZone::Caption;
    }

    // 5. Client area (default)
    HitZone::Client
}

/// Hit test for resize borders.
///
/// Returns the resize direction if the point is in a resize border, or
/// `None` otherwise. A zero inset disables resizing entirely.
fn hit_test_resize(geometry: &ChromeGeometry, point: Point) -> Option<ResizeDirection> {
    let inset = geometry.frame_size(FrameKind::EdgeInsets);
    if inset <= 0 {
        return None;
    }

    let size = geometry.size();
    let on_left = point.x < inset;
    let on_right = point.x > size.width - inset;
    let on_top = point.y < inset;
    let on_bottom = point.y > size.height - inset;

    // Corners override edges
    match (on_top, on_bottom, on_left, on_right) {
        (true, _, true, _) => Some(ResizeDirection::NorthWest),
        (true, _, _, true) => Some(ResizeDirection::NorthEast),
        (_, true, true, _) => Some(ResizeDirection::SouthWest),
        (_, true, _, true) => Some(ResizeDirection::SouthEast),
        (true, ..) => Some(ResizeDirection::North),
        (_, true, ..) => Some(ResizeDirection::South),
        (_, _, true, _) => Some(ResizeDirection::West),
        (_, _, _, true) => Some(ResizeDirection::East),
        _ => None,
    }
}

/// Get the cursor that should be displayed over a zone.
pub fn cursor_for_zone(zone: HitZone) -> CursorIcon {
    match zone {
        HitZone::Client | HitZone::Caption => CursorIcon::Default,
        HitZone::Control(_) => CursorIcon::Pointer,
        HitZone::Resize(direction) => match direction {
            ResizeDirection::North | ResizeDirection::South => CursorIcon::NsResize,
            ResizeDirection::East | ResizeDirection::West => CursorIcon::EwResize,
            ResizeDirection::NorthWest | ResizeDirection::SouthEast => CursorIcon::NwseResize,
            ResizeDirection::NorthEast | ResizeDirection::SouthWest => CursorIcon::NeswResize,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rectangle;

    fn geometry(width: i32, height: i32, inset: i32, title_bar: i32) -> ChromeGeometry {
        let mut geometry = ChromeGeometry::new(Rectangle::new(0, 0, width, height));
        geometry.frame_sizes[FrameKind::EdgeInsets.index()] = inset;
        geometry.frame_sizes[FrameKind::TitleBar.index()] = title_bar;
        geometry
    }

    fn scenario() -> ChromeGeometry {
        let mut geometry = geometry(800, 600, 5, 32);
        geometry.controls[ControlKind::CloseButton.index()] =
            Some(Rectangle::new(700, 0, 740, 30));
        geometry
    }

    #[test]
    fn test_reference_scenario() {
        let geometry = scenario();

        assert_eq!(
            hit_test(&geometry, Point::new(720, 10)),
            HitZone::Control(ControlKind::CloseButton)
        );
        assert_eq!(
            hit_test(&geometry, Point::new(2, 2)),
            HitZone::Resize(ResizeDirection::NorthWest)
        );
        assert_eq!(
            hit_test(&geometry, Point::new(400, 2)),
            HitZone::Resize(ResizeDirection::North)
        );
        assert_eq!(hit_test(&geometry, Point::new(400, 20)), HitZone::Caption);
        assert_eq!(hit_test(&geometry, Point::new(400, 100)), HitZone::Client);
    }

    #[test]
    fn test_control_beats_edge_and_caption() {
        let mut geometry = geometry(800, 600, 10, 40);
        // Overlaps the top-right corner, the top edge and the caption.
        geometry.controls[ControlKind::BackButton.index()] = Some(Rectangle::new(760, 0, 800, 40));

        for point in [Point::new(795, 2), Point::new(770, 3), Point::new(770, 30)] {
            assert_eq!(
                hit_test(&geometry, point),
                HitZone::Control(ControlKind::BackButton)
            );
        }
    }

    #[test]
    fn test_all_corners() {
        let geometry = geometry(800, 600, 5, 32);

        assert_eq!(
            hit_test(&geometry, Point::new(1, 1)),
            HitZone::Resize(ResizeDirection::NorthWest)
        );
        assert_eq!(
            hit_test(&geometry, Point::new(798, 1)),
            HitZone::Resize(ResizeDirection::NorthEast)
        );
        assert_eq!(
            hit_test(&geometry, Point::new(1, 598)),
            HitZone::Resize(ResizeDirection::SouthWest)
        );
        assert_eq!(
            hit_test(&geometry, Point::new(798, 598)),
            HitZone::Resize(ResizeDirection::SouthEast)
        );
    }

    #[test]
    fn test_all_edges() {
        let geometry = geometry(800, 600, 5, 32);

        assert_eq!(
            hit_test(&geometry, Point::new(400, 0)),
            HitZone::Resize(ResizeDirection::North)
        );
        assert_eq!(
            hit_test(&geometry, Point::new(400, 599)),
            HitZone::Resize(ResizeDirection::South)
        );
        assert_eq!(
            hit_test(&geometry, Point::new(0, 300)),
            HitZone::Resize(ResizeDirection::West)
        );
        assert_eq!(
            hit_test(&geometry, Point::new(799, 300)),
            HitZone::Resize(ResizeDirection::East)
        );
    }

    #[test]
    fn test_edge_boundaries_are_strict() {
        let geometry = geometry(800, 600, 5, 0);

        // x < inset and x > width - inset
        assert_eq!(hit_test(&geometry, Point::new(5, 300)), HitZone::Client);
        assert_eq!(hit_test(&geometry, Point::new(795, 300)), HitZone::Client);
        assert_eq!(
            hit_test(&geometry, Point::new(796, 300)),
            HitZone::Resize(ResizeDirection::East)
        );
        assert_eq!(hit_test(&geometry, Point::new(400, 595)), HitZone::Client);
    }

    #[test]
    fn test_corner_wins_within_inset_of_two_borders() {
        let geometry = geometry(300, 200, 8, 32);

        for x in 0..8 {
            for y in 0..8 {
                assert_eq!(
                    hit_test(&geometry, Point::new(x, y)),
                    HitZone::Resize(ResizeDirection::NorthWest)
                );
            }
        }

        // The far edges use a strict `>` against width - inset.
        for x in 293..300 {
            for y in 193..200 {
                assert_eq!(
                    hit_test(&geometry, Point::new(x, y)),
                    HitZone::Resize(ResizeDirection::SouthEast)
                );
            }
        }
    }

    #[test]
    fn test_zero_inset_never_resizes() {
        let geometry = geometry(120, 80, 0, 20);

        for x in -2..122 {
            for y in -2..82 {
                assert!(!hit_test(&geometry, Point::new(x, y)).is_resize());
            }
        }
    }

    #[test]
    fn test_caption_boundary() {
        let geometry = geometry(800, 600, 0, 32);

        assert_eq!(hit_test(&geometry, Point::new(400, 31)), HitZone::Caption);
        assert_eq!(hit_test(&geometry, Point::new(400, 32)), HitZone::Client);
        assert_eq!(hit_test(&geometry, Point::new(0, 0)), HitZone::Caption);
    }

    #[test]
    fn test_no_title_bar_is_all_client() {
        let geometry = geometry(800, 600, 0, 0);
        assert_eq!(hit_test(&geometry, Point::new(400, 0)), HitZone::Client);
    }

    #[test]
    fn test_tiny_window_tie_break() {
        // Inset larger than half of each dimension: every border flag is set.
        let tiny = geometry(10, 10, 8, 0);

        assert_eq!(
            hit_test(&tiny, Point::new(5, 5)),
            HitZone::Resize(ResizeDirection::NorthWest)
        );

        // Only bottom and both horizontal flags: bottom-left wins.
        let narrow = geometry(10, 30, 8, 0);
        assert_eq!(
            hit_test(&narrow, Point::new(5, 25)),
            HitZone::Resize(ResizeDirection::SouthWest)
        );
    }

    #[test]
    fn test_zone_predicates() {
        assert!(HitZone::Resize(ResizeDirection::North).is_resize());
        assert!(HitZone::Resize(ResizeDirection::North).is_non_client());
        assert!(HitZone::Caption.is_caption());
        assert!(HitZone::Caption.is_non_client());
        assert!(HitZone::Control(ControlKind::CloseButton).is_control());
        assert!(!HitZone::Control(ControlKind::CloseButton).is_non_client());
        assert!(!HitZone::Client.is_non_client());
    }

    #[test]
    fn test_cursor_for_zone() {
        assert_eq!(cursor_for_zone(HitZone::Client), CursorIcon::Default);
        assert_eq!(
            cursor_for_zone(HitZone::Control(ControlKind::CloseButton)),
            CursorIcon::Pointer
        );
        assert_eq!(
            cursor_for_zone(HitZone::Resize(ResizeDirection::West)),
            CursorIcon::EwResize
        );
        assert_eq!(
            cursor_for_zone(HitZone::Resize(ResizeDirection::NorthEast)),
            CursorIcon::NeswResize
        );
    }
}
