use crate::{error::GridError, grid::Grid, region::Region, Tile};

/// A rectangle cut out of a parent grid, remembering where it came from so it can be stamped
/// back with `Grid::set_region`.
///
/// Cells are `Option<T>`; `None` means "leave the parent alone" when the room is merged back.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Room<T> {
    grid: Grid<Option<T>>,
}

impl<T: Clone> Room<T> {
    /// Copies `region` out of `parent`. The region must lie inside the parent.
    pub fn from_parent(parent: &Grid<T>, region: &Region) -> Result<Self, GridError> {
        let grid = parent
            .extract_region(region)?
            .map_cells(|_, _, t| Some(t.clone()));

        Ok(Room { grid })
    }

    pub fn x(&self) -> i32 {
        self.grid.x()
    }

    pub fn y(&self) -> i32 {
        self.grid.y()
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn footprint(&self) -> Region {
        self.grid.footprint()
    }

    pub fn grid(&self) -> &Grid<Option<T>> {
        &self.grid
    }

    pub fn collides_with(&self, other: &Region) -> bool {
        self.footprint().overlaps(other)
    }

    fn is_border(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x == self.width() - 1 || y == self.height() - 1
    }

    /// Sets every cell off the outer ring to `tile`.
    pub fn fill_floor(&self, tile: T) -> Self {
        let grid = self.grid.map_cells(|x, y, t| {
            if self.is_border(x, y) {
                t.clone()
            } else {
                Some(tile.clone())
            }
        });

        Room { grid }
    }

    /// Sets every cell on the outer ring to `tile`.
    pub fn fill_walls(&self, tile: T) -> Self {
        let grid = self.grid.map_cells(|x, y, t| {
            if self.is_border(x, y) {
                Some(tile.clone())
            } else {
                t.clone()
            }
        });

        Room { grid }
    }
}

/// Carves each room into `grid` as a floor surrounded by a one tile thick wall.
pub fn fill_map_with_rooms(
    grid: Grid<Tile>,
    rooms: &[Room<Tile>],
) -> Result<Grid<Tile>, GridError> {
    rooms.iter().try_fold(grid, |grid, room| {
        let room = room.fill_floor(Tile::Floor).fill_walls(Tile::Wall);

        grid.set_region(room.grid())
    })
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
