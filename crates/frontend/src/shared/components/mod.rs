pub mod bar_chart;
pub mod chart_geometry;
pub mod date_range_picker;
pub mod line_chart;
pub mod pagination_controls;
pub mod stat_card;
