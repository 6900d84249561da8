#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative scrolling grid state.
//!
//! [`GridEngine`] owns the obstacle grid for the lifetime of a run. It is
//! populated once at construction and advanced one row per tick by an external
//! driver through [`GridEngine::advance_tick`]. Read-only collaborators use the
//! [`query`] functions.

mod storage;

use std::fmt;

use lanes_core::{
    Cell, CellCoord, GridConfig, GridDimensions, GridError, GridSnapshot, GridView, ObstacleSet,
    OverrideError, TickInput,
};
use lanes_system_obstacles::{ObstaclePlanner, PlacementBudget};
use log::{debug, trace, warn};

use self::storage::RowRing;

/// Scrolling obstacle grid.
#[derive(Debug)]
pub struct GridEngine {
    storage: RowRing,
    planner: ObstaclePlanner,
    obstacle_target: usize,
    tick: u64,
}

impl GridEngine {
    /// Creates an engine from configuration and populates the initial obstacles.
    ///
    /// Without a configured seed one is drawn from OS entropy and logged.
    pub fn new(config: &GridConfig) -> Result<Self, GridError> {
        let dimensions = config.dimensions()?;
        let obstacles = config.obstacle_set()?;
        let budget = PlacementBudget::new(config.obstacle_target, config.attempt_cap(dimensions)?);
        let planner = match config.seed {
            Some(seed) => ObstaclePlanner::new(obstacles, seed),
            None => ObstaclePlanner::from_entropy(obstacles),
        };
        Self::with_planner(dimensions, planner, budget)
    }

    /// Creates an engine that draws from an already constructed planner.
    pub fn with_planner(
        dimensions: GridDimensions,
        mut planner: ObstaclePlanner,
        budget: PlacementBudget,
    ) -> Result<Self, GridError> {
        let storage = populate_initial(dimensions, &mut planner, budget)?;
        debug!(
            "grid {}x{} populated with {} obstacles (seed {})",
            dimensions.width(),
            dimensions.height(),
            budget.target(),
            planner.seed()
        );
        Ok(Self {
            storage,
            planner,
            obstacle_target: budget.target(),
            tick: 0,
        })
    }

    /// Fixed grid dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> GridDimensions {
        self.storage.dimensions()
    }

    /// Configured obstacle variants.
    #[must_use]
    pub const fn obstacles(&self) -> &ObstacleSet {
        self.planner.obstacles()
    }

    /// Seed of the generator, for replaying a run.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.planner.seed()
    }

    /// Number of obstacles placed at construction.
    #[must_use]
    pub const fn obstacle_target(&self) -> usize {
        self.obstacle_target
    }

    /// Number of rows scrolled in or grids replaced since construction.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Read-only view of the grid.
    #[must_use]
    pub fn view(&self) -> GridView<'_> {
        self.storage.view()
    }

    /// Owned copy of the grid, restorable through [`TickInput::Grid`].
    #[must_use]
    pub fn snapshot(&self) -> GridSnapshot {
        self.view().to_snapshot()
    }

    /// Cell at column `x`, row `y`.
    pub fn obstacle_at(&self, x: u32, y: u32) -> Result<Cell, GridError> {
        let coord = CellCoord::new(x, y);
        let view = self.view();
        view.dimensions().check(coord)?;
        Ok(view.cell(coord).unwrap_or_default())
    }

    /// Reports whether a new obstacle at column `x`, row `y` keeps its column passable.
    pub fn is_legal_placement(&self, x: u32, y: u32) -> Result<bool, GridError> {
        lanes_system_obstacles::is_legal_placement(&self.view(), CellCoord::new(x, y))
    }

    /// Builds the next row against the current leading row without applying it.
    pub fn generate_row(&mut self) -> Vec<Cell> {
        self.planner.generate_row(self.storage.view().leading_row())
    }

    /// Discards the trailing row and inserts `row` as the leading row.
    ///
    /// The row is applied verbatim; only its width is checked.
    pub fn scroll(&mut self, row: &[Cell]) -> Result<(), GridError> {
        let width = self.dimensions().width();
        if row.len() != width as usize {
            return Err(OverrideError::RowWidth {
                expected: width,
                actual: row.len(),
            }
            .into());
        }
        self.storage.push_leading(row);
        self.tick += 1;
        Ok(())
    }

    /// Applies one tick of external or generated content.
    ///
    /// Returns the row that entered the grid, or `None` when the whole grid was
    /// replaced. Rejected overrides leave the grid untouched.
    pub fn advance_tick(&mut self, input: TickInput) -> Result<Option<Vec<Cell>>, GridError> {
        let entered = match input {
            TickInput::Row(row) => {
                if let Err(error) = self.scroll(&row) {
                    warn!("rejected override row at tick {}: {error}", self.tick);
                    return Err(error);
                }
                Some(row)
            }
            TickInput::Grid(rows) => {
                if let Err(error) = self.replace_grid(&rows) {
                    warn!("rejected replacement grid at tick {}: {error}", self.tick);
                    return Err(error);
                }
                None
            }
            TickInput::Generate => Some(self.next_row()),
        };
        trace!("tick {} applied", self.tick);
        Ok(entered)
    }

    /// Generates the next row, scrolls it in and returns it.
    pub fn next_row(&mut self) -> Vec<Cell> {
        let row = self.generate_row();
        self.storage.push_leading(&row);
        self.tick += 1;
        row
    }

    fn replace_grid(&mut self, rows: &[Vec<Cell>]) -> Result<(), GridError> {
        self.dimensions().check_rows(rows)?;
        self.storage.replace(rows);
        self.tick += 1;
        Ok(())
    }
}

impl fmt::Display for GridEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.view(), f)
    }
}

fn populate_initial(
    dimensions: GridDimensions,
    planner: &mut ObstaclePlanner,
    budget: PlacementBudget,
) -> Result<RowRing, GridError> {
    let mut cells = vec![Cell::Empty; dimensions.cell_count()];
    let _ = planner.populate(dimensions, &mut cells, budget)?;
    Ok(RowRing::from_cells(dimensions, cells))
}

/// Query functions that provide read-only access to the grid.
pub mod query {
    use lanes_core::{Cell, CellCoord, GridError, GridSnapshot, GridView};

    use super::GridEngine;

    /// Borrowed view of every cell.
    #[must_use]
    pub fn view(engine: &GridEngine) -> GridView<'_> {
        engine.view()
    }

    /// Cell at the coordinate, failing when it lies outside the grid.
    pub fn obstacle_at(engine: &GridEngine, coord: CellCoord) -> Result<Cell, GridError> {
        engine.obstacle_at(coord.column(), coord.row())
    }

    /// Row that entered the grid most recently.
    #[must_use]
    pub fn leading_row(engine: &GridEngine) -> &[Cell] {
        engine.storage.view().leading_row()
    }

    /// Number of cells currently holding an obstacle.
    #[must_use]
    pub fn obstacle_count(engine: &GridEngine) -> usize {
        engine.view().obstacle_count()
    }

    /// Owned copy of the grid in logical row order.
    #[must_use]
    pub fn snapshot(engine: &GridEngine) -> GridSnapshot {
        engine.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lanes_core::ObstacleKind;

    const A: Cell = Cell::Obstacle(ObstacleKind::new(0));

    fn config(width: u32, height: u32, target: usize, seed: u64) -> GridConfig {
        GridConfig {
            width,
            height,
            obstacle_target: target,
            obstacle_kinds: vec!["A".to_owned()],
            max_placement_attempts: None,
            seed: Some(seed),
        }
    }

    #[test]
    fn three_by_three_single_obstacle_scenario() {
        let mut engine = GridEngine::new(&config(3, 3, 1, 42)).expect("one obstacle fits");

        let occupied: Vec<CellCoord> = engine
            .view()
            .iter()
            .filter(|(_, cell)| cell.is_obstacle())
            .map(|(coord, _)| coord)
            .collect();
        assert_eq!(occupied.len(), 1);
        let coord = occupied[0];
        assert_eq!(engine.obstacle_at(coord.column(), coord.row()), Ok(A));
        for row in [coord.row().wrapping_sub(1), coord.row() + 1] {
            if row < 3 {
                assert_eq!(engine.obstacle_at(coord.column(), row), Ok(Cell::Empty));
            }
        }

        let previous_leading = query::leading_row(&engine).to_vec();
        let row = engine.next_row();

        assert_eq!(row.len(), 3);
        for (old, new) in previous_leading.iter().zip(&row) {
            if old.is_obstacle() {
                assert_eq!(*new, Cell::Empty);
            }
        }
        assert_eq!(query::leading_row(&engine), row.as_slice());
    }

    #[test]
    fn obstacle_at_rejects_out_of_range_column() {
        let engine = GridEngine::new(&config(4, 3, 2, 1)).expect("valid engine");

        assert_eq!(
            engine.obstacle_at(5, 0),
            Err(GridError::OutOfRange {
                column: 5,
                row: 0,
                width: 4,
                height: 3,
            })
        );
        assert!(engine.obstacle_at(0, 3).is_err());
    }

    #[test]
    fn short_override_row_leaves_grid_unchanged() {
        let mut engine = GridEngine::new(&config(4, 5, 3, 8)).expect("valid engine");
        let before = engine.snapshot();

        let error = engine
            .advance_tick(TickInput::Row(vec![Cell::Empty; 3]))
            .expect_err("short row must be rejected");

        assert_eq!(
            error,
            GridError::InvalidOverride(OverrideError::RowWidth {
                expected: 4,
                actual: 3,
            })
        );
        assert_eq!(engine.snapshot(), before);
        assert_eq!(engine.tick(), 0);
    }

    #[test]
    fn generate_row_does_not_mutate_grid() {
        let mut engine = GridEngine::new(&config(5, 4, 3, 12)).expect("valid engine");
        let before = engine.snapshot();

        let row = engine.generate_row();

        assert_eq!(row.len(), 5);
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn unsatisfiable_target_is_an_error() {
        let result = GridEngine::new(&config(2, 2, 3, 0));

        assert!(matches!(
            result,
            Err(GridError::UnsatisfiableConfiguration { target: 3, .. })
        ));
    }

    #[test]
    fn invalid_configuration_is_reported() {
        let mut empty_kinds = config(3, 3, 1, 0);
        empty_kinds.obstacle_kinds.clear();

        assert!(matches!(
            GridEngine::new(&empty_kinds),
            Err(GridError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            GridEngine::new(&config(0, 3, 0, 0)),
            Err(GridError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn legality_queries_follow_current_grid() {
        let mut engine = GridEngine::new(&config(2, 3, 0, 5)).expect("valid engine");
        let _ = engine
            .advance_tick(TickInput::Grid(vec![
                vec![A, Cell::Empty],
                vec![Cell::Empty, Cell::Empty],
                vec![Cell::Empty, A],
            ]))
            .expect("dimensions match");

        assert_eq!(engine.is_legal_placement(0, 1), Ok(false));
        assert_eq!(engine.is_legal_placement(1, 1), Ok(false));
        assert_eq!(engine.is_legal_placement(1, 0), Ok(true));
        assert_eq!(engine.is_legal_placement(0, 2), Ok(true));
        assert!(engine.is_legal_placement(2, 0).is_err());
    }

    #[test]
    fn display_dumps_rows_leading_first() {
        let mut engine = GridEngine::new(&config(3, 2, 0, 5)).expect("valid engine");
        let _ = engine
            .advance_tick(TickInput::Grid(vec![
                vec![A, Cell::Empty, Cell::Empty],
                vec![Cell::Empty, Cell::Empty, A],
            ]))
            .expect("dimensions match");

        assert_eq!(engine.to_string(), "A..\n..A\n");
    }

    #[test]
    fn engine_can_move_between_threads() {
        fn assert_send<T: Send>() {}
        assert_send::<GridEngine>();
    }
}
