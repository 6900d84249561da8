#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for lanes adapters.
//!
//! The grid engine knows nothing about pixels. This crate owns the mapping from
//! logical grid coordinates to screen space, the rotation of the road texture
//! bands that scroll underneath the obstacles, and the [`Scene`] snapshot a
//! backend draws each frame. Asset loading stays with the backend; only the
//! configured texture directories pass through here.

use std::path::PathBuf;

use glam::Vec2;
use lanes_core::{CellCoord, GridDimensions, GridView, ObstacleKind};
use serde::Deserialize;
use thiserror::Error;

/// Screen placement and asset locations read from configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    /// Horizontal offset of column 0 in pixels.
    #[serde(default = "default_left_margin")]
    pub left_margin: f32,
    /// Vertical offset of row 0 in pixels.
    #[serde(default = "default_top_margin")]
    pub top_margin: f32,
    /// Width of a single lane in pixels.
    #[serde(default = "default_cell_width")]
    pub cell_width: f32,
    /// Height of a single row in pixels.
    #[serde(default = "default_row_height")]
    pub row_height: f32,
    /// Number of road texture bands cycled underneath the rows.
    #[serde(default = "default_road_bands")]
    pub road_bands: u32,
    /// Directory holding one texture per obstacle kind, in kind order.
    #[serde(default = "default_obstacle_textures")]
    pub obstacle_textures: PathBuf,
    /// Directory holding the road band textures, in band order.
    #[serde(default = "default_road_textures")]
    pub road_textures: PathBuf,
}

fn default_left_margin() -> f32 {
    40.0
}

fn default_top_margin() -> f32 {
    0.0
}

fn default_cell_width() -> f32 {
    80.0
}

fn default_row_height() -> f32 {
    80.0
}

fn default_road_bands() -> u32 {
    4
}

fn default_obstacle_textures() -> PathBuf {
    PathBuf::from("assets/obstacles")
}

fn default_road_textures() -> PathBuf {
    PathBuf::from("assets/road")
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            left_margin: default_left_margin(),
            top_margin: default_top_margin(),
            cell_width: default_cell_width(),
            row_height: default_row_height(),
            road_bands: default_road_bands(),
            obstacle_textures: default_obstacle_textures(),
            road_textures: default_road_textures(),
        }
    }
}

/// Maps grid coordinates onto screen-space pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenLayout {
    origin: Vec2,
    cell_size: Vec2,
}

impl ScreenLayout {
    /// Creates a layout from configuration, rejecting non-positive cell sizes.
    pub fn new(config: &LayoutConfig) -> Result<Self, RenderingError> {
        let cell_size = Vec2::new(config.cell_width, config.row_height);
        if !(cell_size.is_finite() && cell_size.min_element() > 0.0) {
            return Err(RenderingError::InvalidCellSize {
                width: config.cell_width,
                height: config.row_height,
            });
        }
        Ok(Self {
            origin: Vec2::new(config.left_margin, config.top_margin),
            cell_size,
        })
    }

    /// Size of a single cell in pixels.
    #[must_use]
    pub const fn cell_size(&self) -> Vec2 {
        self.cell_size
    }

    /// Top-left pixel of the cell.
    #[must_use]
    pub fn screen_position(&self, coord: CellCoord) -> Vec2 {
        self.origin + Vec2::new(coord.column() as f32, coord.row() as f32) * self.cell_size
    }

    /// Top-left pixel of a road band strip. Strips span the full screen width,
    /// so they ignore the margins.
    #[must_use]
    pub fn road_position(&self, row: u32) -> Vec2 {
        Vec2::new(0.0, row as f32 * self.cell_size.y)
    }

    /// Pixel extent of the whole grid including the margins.
    #[must_use]
    pub fn extent(&self, dimensions: GridDimensions) -> Vec2 {
        self.origin
            + Vec2::new(dimensions.width() as f32, dimensions.height() as f32) * self.cell_size
    }
}

/// Rotating assignment of road bands to rows.
///
/// Every tick the last band moves to the front, so a band appears to travel one
/// row further along with the obstacles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoadScroll {
    bands: u32,
    offset: u32,
}

impl RoadScroll {
    /// Creates a rotation over `bands` textures.
    pub const fn new(bands: u32) -> Result<Self, RenderingError> {
        if bands == 0 {
            return Err(RenderingError::NoRoadBands);
        }
        Ok(Self { bands, offset: 0 })
    }

    /// Number of bands in the rotation.
    #[must_use]
    pub const fn bands(&self) -> u32 {
        self.bands
    }

    /// Rotates the bands by one row.
    pub fn advance(&mut self) {
        self.offset = (self.offset + 1) % self.bands;
    }

    /// Band drawn underneath the row.
    #[must_use]
    pub const fn band_for_row(&self, row: u32) -> u32 {
        (row % self.bands + self.bands - self.offset) % self.bands
    }
}

/// Road band strip positioned underneath one row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoadStrip {
    /// Row the strip sits under.
    pub row: u32,
    /// Index of the band texture.
    pub band: u32,
    /// Top-left pixel of the strip.
    pub position: Vec2,
}

/// Obstacle positioned in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObstacleSprite {
    /// Grid cell the obstacle occupies.
    pub coord: CellCoord,
    /// Kind selecting the obstacle texture.
    pub kind: ObstacleKind,
    /// Top-left pixel of the sprite.
    pub position: Vec2,
}

/// Everything a backend needs to draw one frame, road first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    /// Road strips, one per row.
    pub road: Vec<RoadStrip>,
    /// Obstacles drawn on top of the road.
    pub obstacles: Vec<ObstacleSprite>,
}

impl Scene {
    /// Captures the grid, visiting every cell exactly once.
    #[must_use]
    pub fn capture(view: &GridView<'_>, layout: &ScreenLayout, road: &RoadScroll) -> Self {
        let road = (0..view.dimensions().height())
            .map(|row| RoadStrip {
                row,
                band: road.band_for_row(row),
                position: layout.road_position(row),
            })
            .collect();
        let obstacles = view
            .iter()
            .filter_map(|(coord, cell)| {
                cell.obstacle().map(|kind| ObstacleSprite {
                    coord,
                    kind,
                    position: layout.screen_position(coord),
                })
            })
            .collect();
        Self { road, obstacles }
    }
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum RenderingError {
    /// Cell width and row height must be positive and finite.
    #[error("cell size must be positive (received {width}x{height})")]
    InvalidCellSize {
        /// Configured cell width.
        width: f32,
        /// Configured row height.
        height: f32,
    },
    /// The road rotation needs at least one band.
    #[error("road_bands must be positive")]
    NoRoadBands,
}
