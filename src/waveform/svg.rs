//! SVG path rendering.

use std::fmt::Write;

use super::WavePoint;

/// Two-point horizontal line through the vertical centre.
#[must_use]
pub fn flat_line(width: u32, height: u32) -> Vec<WavePoint> {
    let mid = f64::from(height) / 2.0;
    vec![WavePoint { x: 0, y: mid }, WavePoint { x: width, y: mid }]
}

/// `M x,y L x,y ...` path data. Empty input gives an empty string.
#[must_use]
pub fn svg_path(points: &[WavePoint]) -> String {
    let mut d = String::with_capacity(points.len() * 10);
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { "M" } else { " L" };
        // Writing to a String cannot fail.
        let _ = write!(d, "{cmd} {},{:.2}", p.x, p.y);
    }
    d
}
