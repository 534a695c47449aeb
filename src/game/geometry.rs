//! Pure geometry: grid index to surface point and back.

/// Grid inset as a fraction of the board edge.
///
/// The board surface reserves a tenth of its edge on each side before the
/// first grid line, matching the reference layout (inset 100 on a 1000-unit
/// canvas).
const EDGE_INSET_RATIO: f64 = 0.1;

/// Stone diameter as a fraction of the board edge.
const STONE_DIAMETER_RATIO: f64 = 0.09;

/// Presentation parameters for one rendered board.
///
/// Every field derives from a single base dimension (the viewport's
/// constrained edge) by fixed ratios. A viewport change produces a whole
/// new value via [`BoardGeometry::from_viewport`]; fields are never
/// adjusted one at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardGeometry {
    board_px: f64,
    edge_inset: f64,
    stone_radius: f64,
    stone_diameter: f64,
}

impl BoardGeometry {
    /// Derives geometry from a viewport, using the constrained edge.
    pub fn from_viewport(width: f64, height: f64) -> Self {
        Self::from_edge(width.min(height))
    }

    /// Derives geometry from the board edge length directly.
    pub fn from_edge(board_px: f64) -> Self {
        let stone_diameter = board_px * STONE_DIAMETER_RATIO;
        Self {
            board_px,
            edge_inset: board_px * EDGE_INSET_RATIO,
            stone_radius: stone_diameter / 2.0,
            stone_diameter,
        }
    }

    /// Edge length of the board surface.
    pub fn board_px(&self) -> f64 {
        self.board_px
    }

    /// Distance from the surface edge to the outermost grid line.
    pub fn edge_inset(&self) -> f64 {
        self.edge_inset
    }

    /// Radius of a rendered stone.
    pub fn stone_radius(&self) -> f64 {
        self.stone_radius
    }

    /// Diameter of a rendered stone.
    pub fn stone_diameter(&self) -> f64 {
        self.stone_diameter
    }

    /// Distance between adjacent grid lines for a board of side `size`.
    pub fn spacing(&self, size: usize) -> f64 {
        debug_assert!(size >= 2);
        (self.board_px - 2.0 * self.edge_inset) / (size as f64 - 1.0)
    }

    /// Maps a grid index to its surface point.
    ///
    /// Index 0 maps to the inset, index `size - 1` to `board_px - inset`,
    /// with intermediate indices evenly spaced. Defined for `size >= 2`
    /// only; callers reject smaller boards before any geometry runs.
    pub fn grid_to_point(&self, row: usize, col: usize, size: usize) -> (f64, f64) {
        let step = self.spacing(size);
        (
            self.edge_inset + col as f64 * step,
            self.edge_inset + row as f64 * step,
        )
    }

    /// Finds the grid index whose mapped point lies within `hit_radius` of
    /// `(x, y)`, or `None` when no intersection qualifies.
    ///
    /// Intersections are scanned in row-major order and the first hit wins.
    /// That tie-break only matters for degenerate configurations where the
    /// radius spans several intersections, but it is deliberate and tested
    /// rather than an accident of iteration order.
    pub fn point_to_nearest(
        &self,
        x: f64,
        y: f64,
        size: usize,
        hit_radius: f64,
    ) -> Option<(usize, usize)> {
        for row in 0..size {
            for col in 0..size {
                let (px, py) = self.grid_to_point(row, col, size);
                let (dx, dy) = (px - x, py - y);
                if (dx * dx + dy * dy).sqrt() <= hit_radius {
                    return Some((row, col));
                }
            }
        }
        None
    }
}
