use crate::{
    error::GenerationError,
    graph::{plan_connections, RoomConnections},
    grid::Grid,
    region::Region,
    room::{fill_map_with_rooms, Room},
    sampling::{sample_inclusive, sample_region, small_rng, RoomSizeDistSpec},
    SpawnArea, Tile,
};

use rand::{prelude::*, rngs::SmallRng};
use serde::{Deserialize, Serialize};
use stats::OnlineStats;

pub const DEFAULT_WIDTH: usize = 120;
pub const DEFAULT_HEIGHT: usize = 80;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct RoomGraphSpec {
    /// Inclusive range the room count is drawn from.
    pub num_rooms: (usize, usize),
    pub path_inclusion_chance: f64,
    pub extra_connection_chance: f64,
}

impl Default for RoomGraphSpec {
    fn default() -> Self {
        RoomGraphSpec {
            num_rooms: (6, 6),
            path_inclusion_chance: 0.75,
            extra_connection_chance: 0.25,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct LevelSpec {
    pub seed: u64,
    pub width: usize,
    pub height: usize,
    pub room_graph: RoomGraphSpec,
    pub room_dist: RoomSizeDistSpec,
    /// Minimum number of tiles between any two rooms.
    pub room_padding: usize,
    /// How many positions to try for a single room before giving up on the layout.
    pub max_placement_attempts: usize,
    /// How many whole layouts to try before giving up on the level.
    pub max_generate_tries: usize,
}

impl Default for LevelSpec {
    fn default() -> Self {
        LevelSpec {
            seed: 0,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            room_graph: RoomGraphSpec::default(),
            room_dist: RoomSizeDistSpec::default(),
            room_padding: 2,
            max_placement_attempts: 1000,
            max_generate_tries: 200,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct PlacementStats {
    pub rooms: usize,
    pub total_attempts: usize,
    pub max_attempts: usize,
    pub mean_attempts: f64,
    pub std_dev_attempts: f64,
}

impl PlacementStats {
    fn from_attempts(attempts: &[usize]) -> Self {
        if attempts.is_empty() {
            return PlacementStats::default();
        }

        let mut online = OnlineStats::new();
        for a in attempts.iter() {
            online.add(*a);
        }

        PlacementStats {
            rooms: attempts.len(),
            total_attempts: attempts.iter().sum(),
            max_attempts: attempts.iter().copied().max().unwrap_or(0),
            mean_attempts: online.mean(),
            std_dev_attempts: online.stddev(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedLevel {
    pub grid: Grid<Tile>,
    /// Footprints of the placed rooms, in placement order.
    pub rooms: Vec<Region>,
    pub connections: RoomConnections,
    pub spawn_area: SpawnArea,
    pub placement_stats: PlacementStats,
}

impl LevelSpec {
    pub fn from_ron_str(s: &str) -> Result<Self, GenerationError> {
        let spec: LevelSpec =
            ron::de::from_str(s).map_err(|e| GenerationError::InvalidSpec(e.to_string()))?;
        spec.validate()?;

        Ok(spec)
    }

    pub fn rng(&self) -> SmallRng {
        small_rng(self.seed)
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        let invalid = |msg: String| Err(GenerationError::InvalidSpec(msg));

        let (min_rooms, max_rooms) = self.room_graph.num_rooms;
        if min_rooms == 0 || min_rooms > max_rooms {
            return invalid(format!("bad room count range {:?}", self.room_graph.num_rooms));
        }
        for (name, p) in [
            ("path_inclusion_chance", self.room_graph.path_inclusion_chance),
            ("extra_connection_chance", self.room_graph.extra_connection_chance),
        ]
        .iter()
        {
            if !(0.0..=1.0).contains(p) {
                return invalid(format!("{} must be in [0, 1], got {}", name, p));
            }
        }
        for (name, (min, max)) in [
            ("width", self.room_dist.width),
            ("height", self.room_dist.height),
        ]
        .iter()
        {
            // Anything thinner than 3 has no floor.
            if *min < 3 || min > max {
                return invalid(format!("bad room {} range ({}, {})", name, min, max));
            }
        }
        if self.max_placement_attempts == 0 || self.max_generate_tries == 0 {
            return invalid("attempt budgets must be positive".to_string());
        }

        let (min_width, min_height) = (self.room_dist.width.0, self.room_dist.height.0);
        if self.width < min_width || self.height < min_height {
            return Err(GenerationError::MapTooSmall {
                width: self.width,
                height: self.height,
                min_width,
                min_height,
            });
        }

        Ok(())
    }

    /// Picks a spot for each of `num_rooms` rooms on `map`. A candidate is accepted once it, grown
    /// by the padding, collides with none of the rooms accepted so far.
    fn place_rooms(
        &self,
        map: &Grid<Tile>,
        num_rooms: usize,
        rng: &mut impl Rng,
    ) -> Result<(Vec<Room<Tile>>, PlacementStats), GenerationError> {
        let size_distr = self.room_dist.make();
        let mut rooms: Vec<Room<Tile>> = Vec::with_capacity(num_rooms);
        let mut attempts_per_room = Vec::with_capacity(num_rooms);
        for room in 0..num_rooms {
            let mut attempts = 0;
            let region = loop {
                if attempts == self.max_placement_attempts {
                    return Err(GenerationError::PlacementFailed { room, attempts });
                }
                attempts += 1;

                let candidate = sample_region(rng, &size_distr, map.width(), map.height());
                let padded = candidate.radial_grow(self.room_padding as i32);
                if !rooms.iter().any(|r| r.collides_with(&padded)) {
                    break candidate;
                }
            };
            log::trace!("Placed room {} at {:?} after {} attempts", room, region, attempts);

            rooms.push(Room::from_parent(map, &region)?);
            attempts_per_room.push(attempts);
        }

        Ok((rooms, PlacementStats::from_attempts(&attempts_per_room)))
    }

    /// Makes a single attempt at a whole level. Fails with `PlacementFailed` when some room can't
    /// be placed within the attempt budget.
    pub fn try_generate(&self, rng: &mut impl Rng) -> Result<GeneratedLevel, GenerationError> {
        log::debug!("Generating {}x{} level", self.width, self.height);

        let num_rooms = sample_inclusive(rng, self.room_graph.num_rooms);
        let connections = plan_connections(
            num_rooms,
            self.room_graph.path_inclusion_chance,
            self.room_graph.extra_connection_chance,
            rng,
        );

        let mut rooms: Vec<Region> = Vec::new();
        let mut placement_stats = PlacementStats::default();
        let mut carve_rooms = |grid: Grid<Tile>| -> Result<Grid<Tile>, GenerationError> {
            let (placed, stats) = self.place_rooms(&grid, num_rooms, rng)?;
            let grid = fill_map_with_rooms(grid, &placed)?;
            rooms = placed.iter().map(Room::footprint).collect();
            placement_stats = stats;

            Ok(grid)
        };
        let mut thin_walls = |grid: Grid<Tile>| -> Result<Grid<Tile>, GenerationError> {
            Ok(remove_interior_walls(&grid))
        };

        let grid = Grid::new_empty(self.width, self.height, Tile::Nothing)?
            .apply_processors(&mut [&mut carve_rooms, &mut thin_walls])?;
        log::debug!("Placement stats = {:?}", placement_stats);

        let spawn_area = SpawnArea::in_level(&grid);

        Ok(GeneratedLevel {
            grid,
            rooms,
            connections,
            spawn_area,
            placement_stats,
        })
    }

    /// Validates the spec, then retries `try_generate` until a layout fits or the try budget runs
    /// out.
    pub fn generate(&self, rng: &mut impl Rng) -> Result<GeneratedLevel, GenerationError> {
        self.validate()?;

        for attempt in 0..self.max_generate_tries {
            match self.try_generate(rng) {
                Ok(level) => return Ok(level),
                Err(e @ GenerationError::PlacementFailed { .. }) => {
                    log::debug!("Level attempt {} failed: {}", attempt, e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(GenerationError::Exhausted {
            tries: self.max_generate_tries,
        })
    }
}

/// Opens up walls that don't touch the void. A wall survives only if one of its 8 neighbors is
/// `Nothing` or off the map. Single pass over the input; results don't feed back.
pub fn remove_interior_walls(level: &Grid<Tile>) -> Grid<Tile> {
    let mut removed = 0;
    let thinned = level.map_cells(|x, y, tile| {
        if *tile != Tile::Wall {
            return *tile;
        }

        let borders_void = level
            .neighbors(x as i32, y as i32)
            .tiles()
            .iter()
            .any(|n| matches!(n, None | Some(Tile::Nothing)));
        if borders_void {
            Tile::Wall
        } else {
            removed += 1;
            Tile::Floor
        }
    });
    log::debug!("Removed {} interior walls", removed);

    thinned
}

/// Generates a level with the default policy and a fresh random seed.
pub fn generate_level(width: usize, height: usize) -> Result<Grid<Tile>, GenerationError> {
    let spec = LevelSpec {
        width,
        height,
        ..LevelSpec::default()
    };

    Ok(spec.generate(&mut SmallRng::from_entropy())?.grid)
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
