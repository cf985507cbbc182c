/// Fill applied to every region when a selection replaces the previous one.
pub const NEUTRAL_FILL: &str = "#ececec";

/// Fill applied to every shape of the selected region.
pub const SELECTED_FILL: &str = "#90caf9";

/// Fill opacity while a region is hovered, and at rest.
pub const HOVER_OPACITY: &str = "0.7";
pub const REST_OPACITY: &str = "1";
