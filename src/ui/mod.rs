pub mod chart;
pub mod cursor;
pub mod dashboard;
pub mod footer;
pub mod help;
pub mod markers_panel;
pub mod plot;
pub mod surface;
pub mod theme;
