#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the lanes workspace.
//!
//! This crate defines the vocabulary that connects the placement system, the
//! authoritative grid engine and the adapters. The engine owns a fixed-size
//! grid of [`Cell`] values that scrolls one row per tick; collaborators read it
//! through a borrowed [`GridView`] and push per-tick content through
//! [`TickInput`]. Every fallible operation reports a [`GridError`].

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Number of placement attempts granted per grid cell when no explicit cap is configured.
pub const DEFAULT_ATTEMPTS_PER_CELL: u64 = 64;

/// Identifier of one obstacle variant drawn from the configured [`ObstacleSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObstacleKind(u16);

impl ObstacleKind {
    /// Creates a new obstacle kind from its index within the configured set.
    #[must_use]
    pub const fn new(index: u16) -> Self {
        Self(index)
    }

    /// Retrieves the index of the kind within the configured set.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }

    /// Single character used when dumping grids as text.
    ///
    /// The first 26 kinds map onto `A..=Z`; any further kinds share `#`.
    #[must_use]
    pub const fn glyph(&self) -> char {
        if self.0 < 26 {
            (b'A' + self.0 as u8) as char
        } else {
            '#'
        }
    }
}

/// State of a single grid position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Nothing occupies the cell.
    #[default]
    Empty,
    /// The cell is blocked by an obstacle of the provided kind.
    Obstacle(ObstacleKind),
}

impl Cell {
    /// Reports whether the cell is free.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Reports whether the cell holds an obstacle.
    #[must_use]
    pub const fn is_obstacle(&self) -> bool {
        matches!(self, Self::Obstacle(_))
    }

    /// Obstacle kind occupying the cell, if any.
    #[must_use]
    pub const fn obstacle(&self) -> Option<ObstacleKind> {
        match self {
            Self::Empty => None,
            Self::Obstacle(kind) => Some(*kind),
        }
    }

    /// Single character used when dumping grids as text.
    #[must_use]
    pub const fn glyph(&self) -> char {
        match self {
            Self::Empty => '.',
            Self::Obstacle(kind) => kind.glyph(),
        }
    }
}

/// Closed set of obstacle variants sized once at startup.
///
/// Names are presentation metadata only; the engine selects kinds by index with
/// uniform probability.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObstacleSet {
    names: Vec<String>,
}

impl ObstacleSet {
    /// Builds the set from the configured kind names.
    pub fn new<I, S>(names: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(GridError::InvalidConfiguration(
                "obstacle set must contain at least one kind",
            ));
        }
        if names.len() > usize::from(u16::MAX) {
            return Err(GridError::InvalidConfiguration(
                "obstacle set cannot exceed 65535 kinds",
            ));
        }
        Ok(Self { names })
    }

    /// Number of kinds in the set. Always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always `false`; an obstacle set cannot be constructed empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Kind stored at the provided index, if the index is part of the set.
    #[must_use]
    pub fn kind(&self, index: usize) -> Option<ObstacleKind> {
        if index < self.names.len() {
            u16::try_from(index).ok().map(ObstacleKind::new)
        } else {
            None
        }
    }

    /// Reports whether the kind belongs to this set.
    #[must_use]
    pub fn contains(&self, kind: ObstacleKind) -> bool {
        usize::from(kind.get()) < self.names.len()
    }

    /// Configured name of the kind.
    #[must_use]
    pub fn name(&self, kind: ObstacleKind) -> Option<&str> {
        self.names.get(usize::from(kind.get())).map(String::as_str)
    }

    /// Iterates every kind in configuration order.
    pub fn kinds(&self) -> impl Iterator<Item = ObstacleKind> + '_ {
        (0..self.names.len()).filter_map(|index| self.kind(index))
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Row 0 is the leading row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Fixed width and height of a grid.
///
/// Deserialisation goes through [`GridDimensions::new`], so zero-sized axes are
/// rejected there as well.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct GridDimensions {
    width: u32,
    height: u32,
}

impl<'de> Deserialize<'de> for GridDimensions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(deny_unknown_fields)]
        struct Raw {
            width: u32,
            height: u32,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.width, raw.height).map_err(de::Error::custom)
    }
}

impl GridDimensions {
    /// Creates grid dimensions, rejecting zero-sized axes.
    pub const fn new(width: u32, height: u32) -> Result<Self, GridError> {
        if width == 0 {
            return Err(GridError::InvalidConfiguration("grid width must be positive"));
        }
        if height == 0 {
            return Err(GridError::InvalidConfiguration("grid height must be positive"));
        }
        Ok(Self { width, height })
    }

    /// Number of cells in each row.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Reports whether the coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, coord: CellCoord) -> bool {
        coord.column() < self.width && coord.row() < self.height
    }

    /// Fails with [`GridError::OutOfRange`] when the coordinate lies outside the grid.
    pub const fn check(&self, coord: CellCoord) -> Result<(), GridError> {
        if self.contains(coord) {
            Ok(())
        } else {
            Err(GridError::OutOfRange {
                column: coord.column(),
                row: coord.row(),
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Checks that `rows` is exactly one grid of these dimensions.
    pub fn check_rows(&self, rows: &[Vec<Cell>]) -> Result<(), OverrideError> {
        if rows.len() != self.height as usize {
            return Err(OverrideError::GridHeight {
                expected: self.height,
                actual: rows.len(),
            });
        }
        match rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != self.width as usize)
        {
            Some((index, row)) => Err(OverrideError::GridRowWidth {
                row: index,
                expected: self.width,
                actual: row.len(),
            }),
            None => Ok(()),
        }
    }

    /// Largest obstacle count that can satisfy vertical passability.
    ///
    /// Each column holds at most every other cell, `ceil(height / 2)`.
    #[must_use]
    pub const fn obstacle_capacity(&self) -> usize {
        self.width as usize * (self.height as usize).div_ceil(2)
    }
}

/// Read-only view over ring-ordered grid storage.
///
/// `cells` is row-major physical storage; logical row `r` lives at physical row
/// `(origin + r) % height`.
#[derive(Clone, Copy, Debug)]
pub struct GridView<'a> {
    cells: &'a [Cell],
    dimensions: GridDimensions,
    origin: u32,
}

impl<'a> GridView<'a> {
    /// Creates a view over the provided storage.
    #[must_use]
    pub fn new(cells: &'a [Cell], dimensions: GridDimensions, origin: u32) -> Self {
        debug_assert_eq!(cells.len(), dimensions.cell_count());
        Self {
            cells,
            dimensions,
            origin: origin % dimensions.height(),
        }
    }

    /// Dimensions of the viewed grid.
    #[must_use]
    pub const fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// Cell stored at the coordinate, or `None` when out of range.
    #[must_use]
    pub fn cell(&self, coord: CellCoord) -> Option<Cell> {
        let row = self.row(coord.row())?;
        row.get(coord.column() as usize).copied()
    }

    /// Cells of the logical row, or `None` when out of range.
    #[must_use]
    pub fn row(&self, row: u32) -> Option<&'a [Cell]> {
        if row >= self.dimensions.height() {
            return None;
        }
        let physical = (self.origin + row) % self.dimensions.height();
        let width = self.dimensions.width() as usize;
        let start = physical as usize * width;
        self.cells.get(start..start + width)
    }

    /// Row 0, the most recently inserted row.
    #[must_use]
    pub fn leading_row(&self) -> &'a [Cell] {
        self.row(0).unwrap_or_default()
    }

    /// Last row, the next to be discarded.
    #[must_use]
    pub fn trailing_row(&self) -> &'a [Cell] {
        self.row(self.dimensions.height() - 1).unwrap_or_default()
    }

    /// Iterates logical rows from leading to trailing.
    pub fn rows(&self) -> impl Iterator<Item = &'a [Cell]> + 'a {
        let view = *self;
        (0..view.dimensions.height()).filter_map(move |row| view.row(row))
    }

    /// Iterates every cell with its logical coordinate, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, Cell)> + 'a {
        self.rows().zip(0..).flat_map(|(cells, row)| {
            cells
                .iter()
                .zip(0..)
                .map(move |(cell, column)| (CellCoord::new(column, row), *cell))
        })
    }

    /// Number of cells holding an obstacle.
    #[must_use]
    pub fn obstacle_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_obstacle()).count()
    }

    /// Copies the grid into an owned snapshot in logical row order.
    #[must_use]
    pub fn to_snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            dimensions: self.dimensions,
            rows: self.rows().map(<[Cell]>::to_vec).collect(),
        }
    }
}

impl fmt::Display for GridView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Owned copy of a grid in logical row order, used for save and restore.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    /// Dimensions of the grid the snapshot was captured from.
    pub dimensions: GridDimensions,
    /// Rows from leading (index 0) to trailing.
    pub rows: Vec<Vec<Cell>>,
}

impl GridSnapshot {
    /// Number of cells holding an obstacle.
    #[must_use]
    pub fn obstacle_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|cell| cell.is_obstacle())
            .count()
    }
}

/// Per-tick payload pushed into the engine by an external driver.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TickInput {
    /// Generate the next row procedurally.
    #[default]
    Generate,
    /// Scroll the provided row in verbatim, without legality checks.
    Row(Vec<Cell>),
    /// Replace the whole grid, rows ordered leading to trailing.
    Grid(Vec<Vec<Cell>>),
}

impl TickInput {
    /// Builds the input from an external payload that may carry either field.
    ///
    /// An explicit row takes priority over a replacement grid.
    #[must_use]
    pub fn from_parts(next_row: Option<Vec<Cell>>, grid: Option<Vec<Vec<Cell>>>) -> Self {
        match (next_row, grid) {
            (Some(row), _) => Self::Row(row),
            (None, Some(rows)) => Self::Grid(rows),
            (None, None) => Self::Generate,
        }
    }
}

impl TryFrom<GridSnapshot> for TickInput {
    type Error = GridError;

    /// Converts a snapshot into a replacement grid, rejecting rows that
    /// disagree with the dimensions the snapshot declares.
    fn try_from(snapshot: GridSnapshot) -> Result<Self, Self::Error> {
        snapshot.dimensions.check_rows(&snapshot.rows)?;
        Ok(Self::Grid(snapshot.rows))
    }
}

/// Engine configuration read once at construction.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    /// Number of lanes (columns).
    #[serde(default = "default_width")]
    pub width: u32,
    /// Number of visible rows.
    #[serde(default = "default_height")]
    pub height: u32,
    /// Number of obstacles placed during initial population.
    #[serde(default = "default_obstacle_target")]
    pub obstacle_target: usize,
    /// Names of the obstacle variants, selected with uniform probability.
    #[serde(default = "default_obstacle_kinds")]
    pub obstacle_kinds: Vec<String>,
    /// Upper bound on random placement attempts during initial population.
    ///
    /// Defaults to [`DEFAULT_ATTEMPTS_PER_CELL`] attempts per grid cell.
    #[serde(default)]
    pub max_placement_attempts: Option<u64>,
    /// Seed for the generator; drawn from OS entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_width() -> u32 {
    5
}

fn default_height() -> u32 {
    8
}

fn default_obstacle_target() -> usize {
    6
}

fn default_obstacle_kinds() -> Vec<String> {
    vec!["rock".to_owned(), "cone".to_owned(), "barrel".to_owned()]
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            obstacle_target: default_obstacle_target(),
            obstacle_kinds: default_obstacle_kinds(),
            max_placement_attempts: None,
            seed: None,
        }
    }
}

impl GridConfig {
    /// Validated grid dimensions.
    pub fn dimensions(&self) -> Result<GridDimensions, GridError> {
        GridDimensions::new(self.width, self.height)
    }

    /// Validated obstacle set.
    pub fn obstacle_set(&self) -> Result<ObstacleSet, GridError> {
        ObstacleSet::new(self.obstacle_kinds.iter().cloned())
    }

    /// Placement attempt cap for the provided dimensions.
    pub fn attempt_cap(&self, dimensions: GridDimensions) -> Result<u64, GridError> {
        match self.max_placement_attempts {
            Some(0) => Err(GridError::InvalidConfiguration(
                "max_placement_attempts must be positive",
            )),
            Some(cap) => Ok(cap),
            None => Ok((dimensions.cell_count() as u64).saturating_mul(DEFAULT_ATTEMPTS_PER_CELL)),
        }
    }
}

/// Errors reported by the grid engine and its collaborators.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// Coordinates fell outside the configured grid.
    #[error("cell ({column}, {row}) lies outside the {width}x{height} grid")]
    OutOfRange {
        /// Requested column.
        column: u32,
        /// Requested row.
        row: u32,
        /// Configured grid width.
        width: u32,
        /// Configured grid height.
        height: u32,
    },
    /// The obstacle target cannot be reached under vertical passability.
    #[error(
        "placed {placed} of {target} obstacles before giving up after {attempts} attempts"
    )]
    UnsatisfiableConfiguration {
        /// Configured obstacle target.
        target: usize,
        /// Obstacles placed before giving up.
        placed: usize,
        /// Attempts spent before giving up.
        attempts: u64,
    },
    /// Externally supplied content did not match the grid dimensions.
    #[error("override rejected: {0}")]
    InvalidOverride(#[from] OverrideError),
    /// A configuration value was out of its permitted range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Reasons an externally supplied row or grid was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum OverrideError {
    /// Row length differs from the grid width.
    #[error("row holds {actual} cells but the grid is {expected} wide")]
    RowWidth {
        /// Configured grid width.
        expected: u32,
        /// Length of the supplied row.
        actual: usize,
    },
    /// Replacement grid has the wrong number of rows.
    #[error("replacement grid holds {actual} rows but the grid is {expected} tall")]
    GridHeight {
        /// Configured grid height.
        expected: u32,
        /// Number of supplied rows.
        actual: usize,
    },
    /// A row of the replacement grid has the wrong length.
    #[error("replacement row {row} holds {actual} cells but the grid is {expected} wide")]
    GridRowWidth {
        /// Index of the offending row.
        row: usize,
        /// Configured grid width.
        expected: u32,
        /// Length of the offending row.
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle(index: u16) -> Cell {
        Cell::Obstacle(ObstacleKind::new(index))
    }

    #[test]
    fn view_maps_logical_rows_through_origin() {
        let dimensions = GridDimensions::new(2, 3).expect("valid dimensions");
        let cells = [
            obstacle(0),
            Cell::Empty,
            Cell::Empty,
            obstacle(1),
            obstacle(2),
            obstacle(2),
        ];
        let view = GridView::new(&cells, dimensions, 2);

        assert_eq!(view.leading_row(), &[obstacle(2), obstacle(2)]);
        assert_eq!(view.row(1), Some(&[obstacle(0), Cell::Empty][..]));
        assert_eq!(view.trailing_row(), &[Cell::Empty, obstacle(1)]);
        assert_eq!(view.cell(CellCoord::new(1, 2)), Some(obstacle(1)));
        assert_eq!(view.cell(CellCoord::new(2, 0)), None);
        assert_eq!(view.row(3), None);
        assert_eq!(view.obstacle_count(), 4);
    }

    #[test]
    fn view_renders_rows_leading_first() {
        let dimensions = GridDimensions::new(3, 2).expect("valid dimensions");
        let cells = [
            Cell::Empty,
            obstacle(1),
            Cell::Empty,
            obstacle(0),
            Cell::Empty,
            Cell::Empty,
        ];
        let view = GridView::new(&cells, dimensions, 1);

        assert_eq!(view.to_string(), "A..\n.B.\n");
    }

    #[test]
    fn view_iter_reports_logical_coordinates() {
        let dimensions = GridDimensions::new(2, 2).expect("valid dimensions");
        let cells = [Cell::Empty, obstacle(3), Cell::Empty, Cell::Empty];
        let view = GridView::new(&cells, dimensions, 1);

        let occupied: Vec<CellCoord> = view
            .iter()
            .filter(|(_, cell)| cell.is_obstacle())
            .map(|(coord, _)| coord)
            .collect();
        assert_eq!(occupied, vec![CellCoord::new(1, 1)]);
    }

    #[test]
    fn snapshot_preserves_logical_order() {
        let dimensions = GridDimensions::new(1, 3).expect("valid dimensions");
        let cells = [obstacle(0), Cell::Empty, obstacle(1)];
        let snapshot = GridView::new(&cells, dimensions, 1).to_snapshot();

        assert_eq!(
            snapshot.rows,
            vec![vec![Cell::Empty], vec![obstacle(1)], vec![obstacle(0)]]
        );
        assert_eq!(snapshot.obstacle_count(), 2);
    }

    #[test]
    fn snapshot_survives_json() {
        let snapshot = GridSnapshot {
            dimensions: GridDimensions::new(2, 1).expect("valid dimensions"),
            rows: vec![vec![obstacle(4), Cell::Empty]],
        };
        let json = serde_json::to_string(&snapshot).expect("snapshot serializes");
        let decoded: GridSnapshot = serde_json::from_str(&json).expect("snapshot deserializes");

        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn snapshot_with_zero_dimensions_fails_to_decode() {
        let json = r#"{"dimensions":{"width":0,"height":0},"rows":[]}"#;

        assert!(serde_json::from_str::<GridSnapshot>(json).is_err());
    }

    #[test]
    fn snapshot_rows_must_match_declared_dimensions() {
        let short = GridSnapshot {
            dimensions: GridDimensions::new(2, 3).expect("valid dimensions"),
            rows: vec![vec![Cell::Empty; 2]; 2],
        };
        let ragged = GridSnapshot {
            dimensions: GridDimensions::new(2, 2).expect("valid dimensions"),
            rows: vec![vec![Cell::Empty; 2], vec![Cell::Empty; 3]],
        };

        assert_eq!(
            TickInput::try_from(short),
            Err(GridError::InvalidOverride(OverrideError::GridHeight {
                expected: 3,
                actual: 2,
            }))
        );
        assert_eq!(
            TickInput::try_from(ragged),
            Err(GridError::InvalidOverride(OverrideError::GridRowWidth {
                row: 1,
                expected: 2,
                actual: 3,
            }))
        );
    }

    #[test]
    fn consistent_snapshot_becomes_replacement_grid() {
        let rows = vec![vec![obstacle(0)], vec![Cell::Empty]];
        let snapshot = GridSnapshot {
            dimensions: GridDimensions::new(1, 2).expect("valid dimensions"),
            rows: rows.clone(),
        };

        assert_eq!(TickInput::try_from(snapshot), Ok(TickInput::Grid(rows)));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(
            GridDimensions::new(0, 4),
            Err(GridError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            GridDimensions::new(4, 0),
            Err(GridError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn check_reports_out_of_range() {
        let dimensions = GridDimensions::new(4, 2).expect("valid dimensions");

        assert_eq!(
            dimensions.check(CellCoord::new(5, 0)),
            Err(GridError::OutOfRange {
                column: 5,
                row: 0,
                width: 4,
                height: 2,
            })
        );
        assert!(dimensions.check(CellCoord::new(3, 1)).is_ok());
    }

    #[test]
    fn obstacle_capacity_counts_every_other_row() {
        let odd = GridDimensions::new(3, 5).expect("valid dimensions");
        let even = GridDimensions::new(3, 4).expect("valid dimensions");
        let single = GridDimensions::new(7, 1).expect("valid dimensions");

        assert_eq!(odd.obstacle_capacity(), 9);
        assert_eq!(even.obstacle_capacity(), 6);
        assert_eq!(single.obstacle_capacity(), 7);
    }

    #[test]
    fn obstacle_set_rejects_empty_configuration() {
        let error = ObstacleSet::new(Vec::<String>::new()).expect_err("empty set must fail");

        assert!(matches!(error, GridError::InvalidConfiguration(_)));
    }

    #[test]
    fn obstacle_set_resolves_names() {
        let set = ObstacleSet::new(["rock", "cone"]).expect("valid set");

        assert_eq!(set.len(), 2);
        assert_eq!(set.kind(1), Some(ObstacleKind::new(1)));
        assert_eq!(set.kind(2), None);
        assert_eq!(set.name(ObstacleKind::new(0)), Some("rock"));
        assert!(!set.contains(ObstacleKind::new(2)));
        assert_eq!(set.kinds().count(), 2);
    }

    #[test]
    fn tick_input_prefers_explicit_row() {
        let row = vec![Cell::Empty];
        let grid = vec![vec![obstacle(0)]];

        assert_eq!(
            TickInput::from_parts(Some(row.clone()), Some(grid.clone())),
            TickInput::Row(row)
        );
        assert_eq!(
            TickInput::from_parts(None, Some(grid.clone())),
            TickInput::Grid(grid)
        );
        assert_eq!(TickInput::from_parts(None, None), TickInput::Generate);
    }

    #[test]
    fn config_defaults_fill_missing_fields() {
        let config: GridConfig =
            serde_json::from_str(r#"{ "width": 3, "seed": 9 }"#).expect("config parses");

        assert_eq!(config.width, 3);
        assert_eq!(config.height, 8);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.obstacle_kinds.len(), 3);
    }

    #[test]
    fn config_rejects_misspelled_keys() {
        let result = serde_json::from_str::<GridConfig>(r#"{ "widht": 2, "obstacle_targt": 0 }"#);

        assert!(result.is_err());
    }

    #[test]
    fn attempt_cap_scales_with_grid_and_rejects_zero() {
        let dimensions = GridDimensions::new(4, 4).expect("valid dimensions");
        let mut config = GridConfig::default();

        assert_eq!(
            config.attempt_cap(dimensions),
            Ok(16 * DEFAULT_ATTEMPTS_PER_CELL)
        );

        config.max_placement_attempts = Some(0);
        assert!(config.attempt_cap(dimensions).is_err());
    }

    #[test]
    fn glyphs_follow_kind_index() {
        assert_eq!(Cell::Empty.glyph(), '.');
        assert_eq!(obstacle(0).glyph(), 'A');
        assert_eq!(obstacle(25).glyph(), 'Z');
        assert_eq!(obstacle(26).glyph(), '#');
    }
}
