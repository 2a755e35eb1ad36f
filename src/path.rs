/// Generate SVG path command for a straight edge between two points
///
/// # Arguments
/// * `start` - Start point (parent node center)
/// * `end` - End point (child node center)
///
/// # Returns
/// SVG path command string (e.g., "M 10 20 L 140 80")
pub fn generate_line_path(start: (f32, f32), end: (f32, f32)) -> String {
    format!("M {} {} L {} {}", start.0, start.1, end.0, end.1)
}

/// Generate SVG path command for a dashed straight edge
///
/// Emits one `M .. L ..` pair per dash. A non-positive dash or gap length
/// falls back to a solid line.
///
/// # Arguments
/// * `start`, `end` - Endpoints
/// * `dash` - Length of each drawn segment
/// * `gap` - Length of each skipped segment
pub fn generate_dashed_line_path(start: (f32, f32), end: (f32, f32), dash: f32, gap: f32) -> String {
    if dash <= 0.0 || gap <= 0.0 {
        return generate_line_path(start, end);
    }

    let dx = end.0 - start.0;
    let dy = end.1 - start.1;
    let length = (dx * dx + dy * dy).sqrt();
    if length < f32::EPSILON {
        return generate_line_path(start, end);
    }

    let unit = (dx / length, dy / length);
    let at = |d: f32| (start.0 + unit.0 * d, start.1 + unit.1 * d);

    let mut commands = Vec::new();
    let mut offset = 0.0;
    while offset < length {
        let dash_end = (offset + dash).min(length);
        commands.push(generate_line_path(at(offset), at(dash_end)));
        offset += dash + gap;
    }
    commands.join(" ")
}

/// Linear interpolation between two points
pub fn lerp_point(a: (f32, f32), b: (f32, f32), t: f32) -> (f32, f32) {
    (a.0 + (b.0 - a.0) * t, a.1 + (b.1 - a.1) * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_path() {
        assert_eq!(generate_line_path((10.0, 20.0), (140.0, 80.0)), "M 10 20 L 140 80");
    }

    #[test]
    fn test_dashed_path_segments() {
        let path = generate_dashed_line_path((0.0, 0.0), (20.0, 0.0), 5.0, 5.0);
        assert_eq!(path, "M 0 0 L 5 0 M 10 0 L 15 0");
    }

    #[test]
    fn test_dashed_path_truncates_last_dash() {
        let path = generate_dashed_line_path((0.0, 0.0), (12.0, 0.0), 5.0, 5.0);
        assert_eq!(path, "M 0 0 L 5 0 M 10 0 L 12 0");
    }

    #[test]
    fn test_dashed_path_degenerate_inputs() {
        assert_eq!(generate_dashed_line_path((1.0, 1.0), (1.0, 1.0), 5.0, 5.0), "M 1 1 L 1 1");
        assert_eq!(generate_dashed_line_path((0.0, 0.0), (9.0, 0.0), 0.0, 5.0), "M 0 0 L 9 0");
    }

    #[test]
    fn test_lerp_point() {
        assert_eq!(lerp_point((0.0, 0.0), (10.0, 20.0), 0.25), (2.5, 5.0));
    }
}
