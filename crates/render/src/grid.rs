use orbitview_common::{GridConfig, Rgb};

/// Floats per grid line: two segments of two endpoints, three components each.
pub const FLOATS_PER_LINE: usize = 12;

/// Build the flat vertex buffer for a square reference grid on the XZ plane.
///
/// Line `l` contributes a segment parallel to Z at `x = -r + l * spacing`
/// and a segment parallel to X at `z = -r + l * spacing`, where
/// `r = (line_count - 1) * spacing / 2`. The result holds exactly
/// `line_count * FLOATS_PER_LINE` entries.
pub fn build_grid_buffer(line_count: usize, spacing: f32) -> Vec<f32> {
    let size = line_count * FLOATS_PER_LINE;
    let mut vbo = Vec::with_capacity(size);

    let radius = line_count.saturating_sub(1) as f32 * 0.5 * spacing;

    for l in 0..line_count {
        let offset = -radius + l as f32 * spacing;
        vbo.extend_from_slice(&[offset, 0.0, -radius]);
        vbo.extend_from_slice(&[offset, 0.0, radius]);
        vbo.extend_from_slice(&[-radius, 0.0, offset]);
        vbo.extend_from_slice(&[radius, 0.0, offset]);
    }
    debug_assert_eq!(vbo.len(), size, "grid buffer size mismatch");

    vbo
}

/// Static reference grid: built once, never inspected by the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLines {
    vertices: Vec<f32>,
    line_count: usize,
    spacing: f32,
    color: Rgb,
}

impl GridLines {
    pub fn new(line_count: usize, spacing: f32, color: Rgb) -> Self {
        Self {
            vertices: build_grid_buffer(line_count, spacing),
            line_count,
            spacing,
            color,
        }
    }

    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(config.line_count, config.spacing, config.color)
    }

    /// Flat `x, y, z` triples, two per segment.
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    pub fn positions(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.vertices.chunks_exact(3).map(|p| [p[0], p[1], p[2]])
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn segment_count(&self) -> usize {
        self.vertex_count() / 2
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Half the side length of the grid square.
    pub fn radius(&self) -> f32 {
        self.line_count.saturating_sub(1) as f32 * 0.5 * self.spacing
    }

    pub fn color(&self) -> Rgb {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_has_252_entries() {
        let vbo = build_grid_buffer(21, 10.0);
        assert_eq!(vbo.len(), 21 * 12);
        assert_eq!(vbo.len(), 252);
    }

    #[test]
    fn endpoints_lie_on_boundary() {
        let vbo = build_grid_buffer(21, 10.0);
        let r = 100.0;
        for (l, line) in vbo.chunks_exact(FLOATS_PER_LINE).enumerate() {
            let o = -r + l as f32 * 10.0;
            assert_eq!(
                line,
                &[o, 0.0, -r, o, 0.0, r, -r, 0.0, o, r, 0.0, o],
                "line {l}"
            );
        }
    }

    #[test]
    fn grid_lies_flat() {
        let vbo = build_grid_buffer(5, 2.5);
        assert!(vbo.chunks_exact(3).all(|p| p[1] == 0.0));
    }

    #[test]
    fn first_and_last_lines_are_the_border() {
        let vbo = build_grid_buffer(3, 1.0);
        assert_eq!(&vbo[0..3], &[-1.0, 0.0, -1.0]);
        let last = &vbo[vbo.len() - 3..];
        assert_eq!(last, &[1.0, 0.0, 1.0]);
    }

    #[test]
    fn single_line_collapses_to_origin() {
        let vbo = build_grid_buffer(1, 10.0);
        assert_eq!(vbo.len(), 12);
        assert!(vbo.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn grid_lines_counts() {
        let grid = GridLines::from_config(&GridConfig::default());
        assert_eq!(grid.vertex_count(), 84);
        assert_eq!(grid.segment_count(), 42);
        assert_eq!(grid.radius(), 100.0);
        assert_eq!(grid.positions().count(), 84);
        assert_eq!(grid.color(), Rgb::from_hex(0x7f7f7f));
    }
}
