//! Static gridline generation.
//!
//! Two line sets, generated once at startup and never mutated: a gray
//! major/minor grid on the XY plane (axes drawn brighter), and a
//! gradient-colored reference grid on the XZ plane. Both emit line-list
//! vertex pairs.

use super::GridVertex;

/// Base color of the XY gridlines; the two axes are drawn at twice this
/// intensity.
pub const GRID_COLOR: [f32; 3] = [0.3, 0.3, 0.3];

/// Major/minor gridlines on the XY plane over `[-extent, extent]` with
/// the given spacing.
///
/// The first two line segments are the X and Y axes at double
/// brightness; step lines follow, one pair per spacing increment in each
/// direction. Every consecutive vertex pair is one line segment.
#[must_use]
pub fn xy_grid(extent: f32, step: f32) -> Vec<GridVertex> {
    let axis = [GRID_COLOR[0] * 2.0, GRID_COLOR[1] * 2.0, GRID_COLOR[2] * 2.0];
    let mut vertices = vec![
        GridVertex::new([-extent, 0.0, 0.0], axis),
        GridVertex::new([extent, 0.0, 0.0], axis),
        GridVertex::new([0.0, -extent, 0.0], axis),
        GridVertex::new([0.0, extent, 0.0], axis),
    ];

    // A non-positive or non-finite step would make the line count
    // unbounded; emit only the axes in that case.
    let lines = if step > 0.0 && (extent / step).is_finite() {
        (extent / step) as i32
    } else {
        0
    };
    for i in 1..=lines {
        let d = step * i as f32;
        // Horizontal pair above and below the X axis.
        vertices.push(GridVertex::new([-extent, d, 0.0], GRID_COLOR));
        vertices.push(GridVertex::new([extent, d, 0.0], GRID_COLOR));
        vertices.push(GridVertex::new([-extent, -d, 0.0], GRID_COLOR));
        vertices.push(GridVertex::new([extent, -d, 0.0], GRID_COLOR));
        // Vertical pair left and right of the Y axis.
        vertices.push(GridVertex::new([d, -extent, 0.0], GRID_COLOR));
        vertices.push(GridVertex::new([d, extent, 0.0], GRID_COLOR));
        vertices.push(GridVertex::new([-d, -extent, 0.0], GRID_COLOR));
        vertices.push(GridVertex::new([-d, extent, 0.0], GRID_COLOR));
    }

    vertices
}

/// Gradient-colored reference grid on the XZ plane.
///
/// `sections` evenly spaced lines run along Z (red fading to white) and
/// along X (blue fading to white), spanning a square of side `extent`
/// centered on the origin.
#[must_use]
pub fn xz_reference_grid(extent: f32, sections: u32) -> Vec<GridVertex> {
    let half = extent / 2.0;
    let spacing = extent / sections as f32;
    let mut vertices = Vec::with_capacity(sections as usize * 4);

    for i in 0..sections {
        let offset = -half + i as f32 * spacing;
        // -Z -> +Z, red to white.
        vertices.push(GridVertex::new([offset, 0.0, -half], [1.0, 0.0, 0.0]));
        vertices.push(GridVertex::new(
            [offset, 0.0, half - spacing],
            [1.0, 1.0, 1.0],
        ));
        // -X -> +X, blue to white.
        vertices.push(GridVertex::new([-half, 0.0, offset], [0.0, 0.0, 1.0]));
        vertices.push(GridVertex::new(
            [half - spacing, 0.0, offset],
            [1.0, 1.0, 1.0],
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xy_grid_counts_and_plane() {
        let verts = xy_grid(25.0, 1.0);
        // 2 axis lines + 25 steps * 4 lines, 2 vertices each.
        assert_eq!(verts.len(), 4 + 25 * 8);
        assert!(verts.iter().all(|v| v.position[2] == 0.0));
        // Line-list input: even vertex count.
        assert_eq!(verts.len() % 2, 0);
    }

    #[test]
    fn xy_grid_axes_are_brighter() {
        let verts = xy_grid(25.0, 1.0);
        for axis_vertex in &verts[..4] {
            assert_eq!(axis_vertex.color, [0.6, 0.6, 0.6]);
        }
        for step_vertex in &verts[4..] {
            assert_eq!(step_vertex.color, GRID_COLOR);
        }
    }

    #[test]
    fn xz_grid_counts_and_plane() {
        let verts = xz_reference_grid(25.0, 25);
        assert_eq!(verts.len(), 25 * 4);
        assert!(verts.iter().all(|v| v.position[1] == 0.0));
    }

    #[test]
    fn xy_grid_degenerate_step_yields_axes_only() {
        for step in [0.0, -1.0, f32::NAN] {
            assert_eq!(xy_grid(25.0, step).len(), 4);
        }
        assert_eq!(xy_grid(f32::INFINITY, 1.0).len(), 4);
    }

    #[test]
    fn grids_are_deterministic() {
        assert_eq!(xy_grid(25.0, 1.0), xy_grid(25.0, 1.0));
        assert_eq!(xz_reference_grid(25.0, 25), xz_reference_grid(25.0, 25));
    }
}
