pub mod coords;
pub mod error;
pub mod graph;
pub mod grid;
pub mod map_types;
pub mod processor;
pub mod region;
pub mod room;
pub mod sampling;

mod symmetric_set;

pub use error::{GenerationError, GridError};
pub use grid::Grid;
pub use map_types::dungeon::{generate_level, GeneratedLevel, LevelSpec};
pub use region::Region;

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

/// What a single cell of a level holds.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Tile {
    /// Unallocated void outside of any room.
    Nothing,
    Wall,
    Floor,
}

/// Every position a player could start on.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct SpawnArea {
    pub valid_spawn_points: Vec<(usize, usize)>,
}

impl SpawnArea {
    /// Collects every `Floor` tile of `level` in row-major order.
    pub fn in_level(level: &Grid<Tile>) -> Self {
        SpawnArea {
            valid_spawn_points: level
                .iter()
                .filter(|(_, _, t)| **t == Tile::Floor)
                .map(|(x, y, _)| (x, y))
                .collect(),
        }
    }

    /// Picks a spawn point uniformly at random, or `None` if there are none.
    pub fn choose(&self, rng: &mut impl Rng) -> Option<(usize, usize)> {
        self.valid_spawn_points.choose(rng).copied()
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
