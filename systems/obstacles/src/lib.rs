#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Seeded obstacle placement system.
//!
//! The planner never owns the grid. It reads the engine's state through a
//! [`GridView`], writes initial placements into a caller-provided buffer and
//! hands freshly generated rows back to the engine, which decides how to apply
//! them.

use lanes_core::{Cell, CellCoord, GridDimensions, GridError, GridView, ObstacleKind, ObstacleSet};
use log::{debug, warn};
use rand::{rngs::OsRng, Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Reports whether a new obstacle at `coord` keeps its column vertically passable.
///
/// Only the neighbours that exist are inspected: the leading row checks the
/// cell below, the trailing row the cell above and interior rows both. The cell
/// at `coord` itself is not inspected.
pub fn is_legal_placement(view: &GridView<'_>, coord: CellCoord) -> Result<bool, GridError> {
    let dimensions = view.dimensions();
    dimensions.check(coord)?;

    let above = coord
        .row()
        .checked_sub(1)
        .map(|row| CellCoord::new(coord.column(), row));
    let below = (coord.row() + 1 < dimensions.height())
        .then(|| CellCoord::new(coord.column(), coord.row() + 1));

    Ok(is_clear(view, above) && is_clear(view, below))
}

fn is_clear(view: &GridView<'_>, neighbour: Option<CellCoord>) -> bool {
    neighbour
        .and_then(|coord| view.cell(coord))
        .map_or(true, |cell| cell.is_empty())
}

/// Obstacle target and attempt cap for initial population.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementBudget {
    target: usize,
    max_attempts: u64,
}

impl PlacementBudget {
    /// Creates a budget placing `target` obstacles within `max_attempts` random draws.
    #[must_use]
    pub const fn new(target: usize, max_attempts: u64) -> Self {
        Self {
            target,
            max_attempts,
        }
    }

    /// Number of obstacles to place.
    #[must_use]
    pub const fn target(&self) -> usize {
        self.target
    }

    /// Maximum number of random coordinates drawn before giving up.
    #[must_use]
    pub const fn max_attempts(&self) -> u64 {
        self.max_attempts
    }
}

/// Pure system generating obstacle layouts from a seeded random stream.
#[derive(Debug)]
pub struct ObstaclePlanner {
    obstacles: ObstacleSet,
    seed: u64,
    rng: ChaCha8Rng,
}

impl ObstaclePlanner {
    /// Creates a planner whose output is fully determined by `seed`.
    #[must_use]
    pub fn new(obstacles: ObstacleSet, seed: u64) -> Self {
        Self {
            obstacles,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates a planner seeded from OS entropy. The drawn seed is available via [`Self::seed`].
    #[must_use]
    pub fn from_entropy(obstacles: ObstacleSet) -> Self {
        Self::new(obstacles, OsRng.next_u64())
    }

    /// Seed the random stream started from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Configured obstacle variants.
    #[must_use]
    pub const fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    /// Draws an obstacle kind with uniform probability.
    pub fn random_obstacle(&mut self) -> ObstacleKind {
        // ObstacleSet guarantees 1..=u16::MAX kinds.
        let count = self.obstacles.len() as u16;
        ObstacleKind::new(self.rng.gen_range(0..count))
    }

    /// Places `budget.target()` obstacles into `cells` at random legal positions.
    ///
    /// `cells` is row-major storage whose first row is the leading row. A draw
    /// succeeds when the cell is empty and [`is_legal_placement`] holds. Fails
    /// with [`GridError::UnsatisfiableConfiguration`] when the target exceeds
    /// what vertical passability permits or the attempt cap runs out.
    pub fn populate(
        &mut self,
        dimensions: GridDimensions,
        cells: &mut [Cell],
        budget: PlacementBudget,
    ) -> Result<usize, GridError> {
        let target = budget.target();
        if target > dimensions.obstacle_capacity() {
            warn!(
                "obstacle target {target} exceeds capacity {} of a {}x{} grid",
                dimensions.obstacle_capacity(),
                dimensions.width(),
                dimensions.height()
            );
            return Err(GridError::UnsatisfiableConfiguration {
                target,
                placed: 0,
                attempts: 0,
            });
        }

        let width = dimensions.width();
        let mut placed = 0;
        let mut attempts = 0;
        while placed < target {
            if attempts == budget.max_attempts() {
                warn!("placed {placed} of {target} obstacles before exhausting {attempts} attempts");
                return Err(GridError::UnsatisfiableConfiguration {
                    target,
                    placed,
                    attempts,
                });
            }
            attempts += 1;

            let column = self.rng.gen_range(0..width);
            let row = self.rng.gen_range(0..dimensions.height());
            let coord = CellCoord::new(column, row);

            let accepted = {
                let view = GridView::new(cells, dimensions, 0);
                view.cell(coord).is_some_and(|cell| cell.is_empty())
                    && is_legal_placement(&view, coord)?
            };
            if accepted {
                let index = row as usize * width as usize + column as usize;
                cells[index] = Cell::Obstacle(self.random_obstacle());
                placed += 1;
            }
        }

        debug!("placed {placed} obstacles in {attempts} attempts");
        Ok(placed)
    }

    /// Builds the row that will enter the grid next.
    ///
    /// Every lane that is empty in `leading` receives a fresh obstacle, every
    /// blocked lane stays empty. `leading` is the current leading row, which
    /// becomes the new row's neighbour once the grid scrolls.
    pub fn generate_row(&mut self, leading: &[Cell]) -> Vec<Cell> {
        leading
            .iter()
            .map(|cell| {
                if cell.is_empty() {
                    Cell::Obstacle(self.random_obstacle())
                } else {
                    Cell::Empty
                }
            })
            .collect()
    }
}
