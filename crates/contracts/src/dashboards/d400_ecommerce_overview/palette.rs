//! Fixed chart colours of the dashboard

/// Five-step blue ramp for top-5 / bottom-5 bar charts
pub const PALETTE_5: [&str; 5] = ["#331CFF", "#5349FD", "#7377FB", "#93A4F9", "#B3D1F7"];

/// Ten-step blue ramp for top-10 / bottom-10 bar charts
pub const PALETTE_10: [&str; 10] = [
    "#331CFF", "#4333FE", "#5349FD", "#6360FC", "#7377FB", "#838DFA", "#93A4F9", "#A3BBF8",
    "#B3D1F7", "#C3E8F6",
];

/// Leading bar of the by-state charts
pub const HIGHLIGHT_COLOR: &str = "#331CFF";

/// Remaining bars of the by-state charts
pub const MUTED_COLOR: &str = "#C3E8F6";

pub const LINE_COLOR: &str = "#331CFF";

pub const TOP_SELLERS_N: usize = 5;
pub const CATEGORY_ITEMS_N: usize = 10;
pub const CATEGORY_REVIEWS_N: usize = 5;

/// Colour of bar `index` in a chart where only the first bar stands out
pub fn highlight_first(index: usize) -> &'static str {
    if index == 0 {
        HIGHLIGHT_COLOR
    } else {
        MUTED_COLOR
    }
}

/// Colour of bar `index` cycling through `palette`
pub fn palette_color(palette: &[&'static str], index: usize) -> &'static str {
    if palette.is_empty() {
        return HIGHLIGHT_COLOR;
    }
    palette[index % palette.len()]
}
