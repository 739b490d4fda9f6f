//! Pure layout math for the SVG charts

/// Bar lengths scaled so the largest absolute value fills `extent`
pub fn scale_lengths(values: &[f64], extent: f64) -> Vec<f64> {
    let max = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if max <= 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| v.abs() / max * extent).collect()
}

/// Polyline points for a series spread evenly over `width`, y growing down
///
/// The smallest value maps to `height`, the largest to 0; a flat series is
/// drawn along the middle.
pub fn line_points(values: &[f64], width: f64, height: f64) -> Vec<(f64, f64)> {
    if values.is_empty() {
        return Vec::new();
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;
    let step = if values.len() > 1 {
        width / (values.len() - 1) as f64
    } else {
        0.0
    };

    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let x = if values.len() > 1 { i as f64 * step } else { width / 2.0 };
            let y = if span > 0.0 {
                height - (v - min) / span * height
            } else {
                height / 2.0
            };
            (x, y)
        })
        .collect()
}

/// SVG `points` attribute value
pub fn points_attr(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shorten long identifiers (seller hashes) for axis labels
pub fn short_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let head: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_lengths() {
        assert_eq!(scale_lengths(&[5.0, 10.0, 2.5], 100.0), vec![50.0, 100.0, 25.0]);
        assert_eq!(scale_lengths(&[0.0, 0.0], 100.0), vec![0.0, 0.0]);
        assert!(scale_lengths(&[], 100.0).is_empty());
    }

    #[test]
    fn test_line_points() {
        let points = line_points(&[1.0, 3.0, 2.0], 200.0, 100.0);
        assert_eq!(points, vec![(0.0, 100.0), (100.0, 0.0), (200.0, 50.0)]);

        assert_eq!(line_points(&[7.0], 200.0, 100.0), vec![(100.0, 50.0)]);
        assert_eq!(points_attr(&[(0.0, 1.5), (2.0, 3.0)]), "0.0,1.5 2.0,3.0");
    }

    #[test]
    fn test_short_label() {
        assert_eq!(short_label("SP", 8), "SP");
        assert_eq!(short_label("1f50f920176fa81dab994f9023523100", 8), "1f50f92…");
    }
}
