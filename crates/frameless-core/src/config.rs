//! Chrome configuration.

use crate::context::ChromeGeometry;
use crate::geometry::{FrameKind, Rectangle};

/// Configuration applied when a window becomes borderless.
///
/// # Defaults
///
/// - Edge insets: 0 (no resize border until the embedder sets one)
/// - Title bar height: 0
/// - Native decorations are removed
/// - Secondary clicks on the caption open the system menu
///
/// # Example
///
/// ```
/// use frameless_core::ChromeConfig;
///
/// let config = ChromeConfig::new()
///     .with_edge_insets(5)
///     .with_title_bar_height(32)
///     .with_system_menu(false);
///
/// assert_eq!(config.edge_insets(), 5);
/// assert!(!config.system_menu());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromeConfig {
    edge_insets: i32,
    title_bar_height: i32,
    remove_decorations: bool,
    system_menu: bool,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ChromeConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self {
            edge_insets: 0,
            title_bar_height: 0,
            remove_decorations: true,
            system_menu: true,
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set the initial resize border thickness.
    pub fn with_edge_insets(mut self, insets: i32) -> Self {
        self.edge_insets = insets.max(0);
        self
    }

    /// Set the initial title bar height.
    pub fn with_title_bar_height(mut self, height: i32) -> Self {
        self.title_bar_height = height.max(0);
        self
    }

    /// Whether `set_borderless` strips the native frame.
    ///
    /// Disable this when the toolkit already created the window undecorated.
    pub fn with_remove_decorations(mut self, remove: bool) -> Self {
        self.remove_decorations = remove;
        self
    }

    /// Whether secondary clicks on the caption open the system menu.
    pub fn with_system_menu(mut self, enabled: bool) -> Self {
        self.system_menu = enabled;
        self
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// Initial resize border thickness.
    pub fn edge_insets(&self) -> i32 {
        self.edge_insets
    }

    /// Initial title bar height.
    pub fn title_bar_height(&self) -> i32 {
        self.title_bar_height
    }

    /// Whether native decorations are removed.
    pub fn remove_decorations(&self) -> bool {
        self.remove_decorations
    }

    /// Whether the system menu is enabled.
    pub fn system_menu(&self) -> bool {
        self.system_menu
    }

    /// Initial geometry for a window with the given bounds.
    pub fn initial_geometry(&self, bounds: Rectangle) -> ChromeGeometry {
        let mut geometry = ChromeGeometry::new(bounds);
        geometry.frame_sizes[FrameKind::EdgeInsets.index()] = self.edge_insets;
        geometry.frame_sizes[FrameKind::TitleBar.index()] = self.title_bar_height;
        geometry
    }
}
