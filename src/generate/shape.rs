use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::HashSet;

/// Shapes larger than this are not cataloged; they are derived on demand
/// by randomly extending a cataloged shape
pub(crate) const MAX_SHAPE_SIZE: usize = 5;

/// The footprint of a cage, independent of its position in the grid
///
/// A shape is a connected set of cells normalized to its bounding box.
/// Its origin is the leftmost cell of its top row; placing a shape anchors
/// the origin on a grid cell and the rest of the shape follows.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct CageShape {
    rows: usize,
    cols: usize,
    mask: Vec<bool>,
}

impl CageShape {
    fn single() -> Self {
        Self {
            rows: 1,
            cols: 1,
            mask: vec![true],
        }
    }

    /// Normalizes a connected set of (row, col) offsets into a shape
    fn from_cells(cells: &[(i32, i32)]) -> Self {
        let min_row = cells.iter().map(|&(r, _)| r).min().unwrap();
        let min_col = cells.iter().map(|&(_, c)| c).min().unwrap();
        let max_row = cells.iter().map(|&(r, _)| r).max().unwrap();
        let max_col = cells.iter().map(|&(_, c)| c).max().unwrap();
        let rows = (max_row - min_row + 1) as usize;
        let cols = (max_col - min_col + 1) as usize;
        let mut mask = vec![false; rows * cols];
        for &(r, c) in cells {
            mask[(r - min_row) as usize * cols + (c - min_col) as usize] = true;
        }
        Self { rows, cols, mask }
    }

    pub fn size(&self) -> usize {
        self.mask.iter().filter(|&&b| b).count()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The column of the origin cell within the bounding box
    fn col_origin_offset(&self) -> usize {
        self.mask.iter().position(|&b| b).unwrap()
    }

    /// The (row, col) grid positions covered when the origin is anchored at
    /// the given position, in row-major order. The first entry is the origin
    /// itself. Positions may be negative or exceed the grid; the caller
    /// validates them.
    pub fn cells_at(&self, origin_row: i32, origin_col: i32) -> Vec<(i32, i32)> {
        let offset = self.col_origin_offset() as i32;
        let mut cells = Vec::with_capacity(self.size());
        for r in 0..self.rows {
            for c in 0..self.cols {
                if self.mask[r * self.cols + c] {
                    cells.push((origin_row + r as i32, origin_col + c as i32 - offset));
                }
            }
        }
        cells
    }

    fn offsets(&self) -> Vec<(i32, i32)> {
        self.cells_at(0, self.col_origin_offset() as i32)
    }

    /// Every distinct shape obtained by adding one adjacent cell
    fn extensions(&self) -> Vec<CageShape> {
        let cells = self.offsets();
        let mut seen = HashSet::default();
        let mut extensions = Vec::new();
        for &(r, c) in &cells {
            for &(dr, dc) in &[(-1, 0), (1, 0), (0, -1), (0, 1)] {
                let candidate = (r + dr, c + dc);
                if cells.contains(&candidate) {
                    continue;
                }
                let mut extended = cells.clone();
                extended.push(candidate);
                let shape = CageShape::from_cells(&extended);
                if seen.insert(shape.clone()) {
                    extensions.push(shape);
                }
            }
        }
        extensions
    }
}

/// All cage shapes up to `MAX_SHAPE_SIZE` cells, smallest first
pub(crate) struct ShapeCatalog {
    shapes: Vec<CageShape>,
    cumulative: Vec<usize>,
}

static INSTANCE: Lazy<ShapeCatalog> = Lazy::new(ShapeCatalog::new);

impl ShapeCatalog {
    pub fn instance() -> &'static ShapeCatalog {
        &INSTANCE
    }

    fn new() -> Self {
        let mut shapes = vec![CageShape::single()];
        let mut cumulative = vec![1];
        let mut start = 0;
        for _ in 2..=MAX_SHAPE_SIZE {
            let end = shapes.len();
            let mut seen: HashSet<CageShape> = HashSet::default();
            for i in start..end {
                for shape in shapes[i].extensions() {
                    if seen.insert(shape.clone()) {
                        shapes.push(shape);
                    }
                }
            }
            start = end;
            cumulative.push(shapes.len());
        }
        Self { shapes, cumulative }
    }

    /// The single-cell shape, always at index 0
    pub fn single_cell_shape(&self) -> &CageShape {
        &self.shapes[0]
    }

    pub fn shape_at(&self, index: usize) -> &CageShape {
        &self.shapes[index]
    }

    /// The number of cataloged shapes with at most `max_cage_size` cells
    pub fn catalog_size(&self, max_cage_size: usize) -> usize {
        let size = max_cage_size.min(MAX_SHAPE_SIZE);
        self.cumulative[size - 1]
    }

    /// A random shape of exactly `size` cells fitting within the given
    /// dimensions. Shapes beyond the catalog are grown by random extension.
    pub fn random_shape(
        &self,
        size: usize,
        max_rows: Option<usize>,
        max_cols: Option<usize>,
        rng: &mut StdRng,
    ) -> CageShape {
        let fits = |shape: &CageShape| {
            max_rows.map_or(true, |m| shape.rows() <= m)
                && max_cols.map_or(true, |m| shape.cols() <= m)
        };
        if size <= MAX_SHAPE_SIZE {
            let lower = if size == 1 { 0 } else { self.cumulative[size - 2] };
            let upper = self.cumulative[size - 1];
            let candidates = self.shapes[lower..upper]
                .iter()
                .filter(|&s| fits(s))
                .collect::<Vec<_>>();
            return (*candidates.choose(rng).unwrap()).clone();
        }
        let lower = self.cumulative[MAX_SHAPE_SIZE - 2];
        let upper = self.cumulative[MAX_SHAPE_SIZE - 1];
        let starters = self.shapes[lower..upper]
            .iter()
            .filter(|&s| fits(s))
            .collect::<Vec<_>>();
        let mut shape = (*starters.choose(rng).unwrap()).clone();
        while shape.size() < size {
            let extensions = shape
                .extensions()
                .into_iter()
                .filter(fits)
                .collect::<Vec<_>>();
            shape = extensions.choose(rng).unwrap().clone();
        }
        shape
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{CageShape, ShapeCatalog};

    #[test]
    fn catalog_counts_match_fixed_polyominoes() {
        let catalog = ShapeCatalog::instance();
        assert_eq!(1, catalog.catalog_size(1));
        assert_eq!(3, catalog.catalog_size(2));
        assert_eq!(9, catalog.catalog_size(3));
        assert_eq!(28, catalog.catalog_size(4));
        assert_eq!(91, catalog.catalog_size(5));
        assert_eq!(91, catalog.catalog_size(6));
    }

    #[test]
    fn origin_is_the_first_cell_of_the_top_row() {
        // an S-shaped tromino whose top-left corner is empty
        let shape = CageShape::from_cells(&[(0, 1), (1, 0), (1, 1)]);
        let cells = shape.cells_at(2, 3);
        assert_eq!(vec![(2, 3), (3, 2), (3, 3)], cells);
    }

    #[test]
    fn random_shape_respects_dimensions() {
        let catalog = ShapeCatalog::instance();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let shape = catalog.random_shape(6, Some(3), Some(3), &mut rng);
            assert_eq!(6, shape.size());
            assert!(shape.rows() <= 3 && shape.cols() <= 3);
        }
    }

    #[test]
    fn single_cell_shape_covers_its_origin() {
        let catalog = ShapeCatalog::instance();
        assert_eq!(vec![(4, 4)], catalog.single_cell_shape().cells_at(4, 4));
    }
}
