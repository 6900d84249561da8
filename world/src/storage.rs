use lanes_core::{Cell, GridDimensions, GridView};

/// Row-major cell storage that scrolls by rotating its origin row.
///
/// Logical row `r` lives at physical row `(origin + r) % height`, so inserting
/// a leading row only moves the origin back by one and overwrites the storage
/// of the discarded trailing row.
#[derive(Clone, Debug)]
pub(crate) struct RowRing {
    cells: Vec<Cell>,
    dimensions: GridDimensions,
    origin: u32,
}

impl RowRing {
    /// Wraps cells laid out in logical order, leading row first.
    pub(crate) fn from_cells(dimensions: GridDimensions, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), dimensions.cell_count());
        Self {
            cells,
            dimensions,
            origin: 0,
        }
    }

    pub(crate) const fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    pub(crate) fn view(&self) -> GridView<'_> {
        GridView::new(&self.cells, self.dimensions, self.origin)
    }

    /// Drops the trailing row and inserts `row` as the new leading row.
    ///
    /// `row` must be exactly one grid width long.
    pub(crate) fn push_leading(&mut self, row: &[Cell]) {
        let height = self.dimensions.height();
        self.origin = (self.origin + height - 1) % height;
        let range = self.physical_row(self.origin);
        self.cells[range].copy_from_slice(row);
    }

    /// Overwrites every row, `rows` ordered leading to trailing.
    ///
    /// `rows` must match the grid dimensions exactly.
    pub(crate) fn replace(&mut self, rows: &[Vec<Cell>]) {
        self.origin = 0;
        for (physical, row) in (0..).zip(rows) {
            let range = self.physical_row(physical);
            self.cells[range].copy_from_slice(row);
        }
    }

    fn physical_row(&self, physical: u32) -> std::ops::Range<usize> {
        let width = self.dimensions.width() as usize;
        let start = physical as usize * width;
        start..start + width
    }
}
