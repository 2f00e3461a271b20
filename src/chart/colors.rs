//! Color definitions for the decomposition figure

pub(super) const COLOR_BACKGROUND: &str = "#FFFFFF"; // White
pub(super) const COLOR_TEXT: &str = "#202020"; // Near black
pub(super) const COLOR_GRID: &str = "#D8D8D8"; // Light grey split lines

/// Every dataset, line or bar, is drawn in this one flat color
pub(super) const COLOR_DATA: &str = "#000000";
