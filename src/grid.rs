use crate::{
    coords::RowMajor,
    error::{GenerationError, GridError},
    processor::Processor,
    region::Region,
};

/// An immutable, row-major rectangle of cells.
///
/// Every operation that looks like a mutation returns a new `Grid` and leaves the receiver alone.
/// `x` and `y` record where this grid sits in the coordinate space of the grid it was cut from;
/// a top-level grid sits at `(0, 0)`. Region arguments are always expressed in the receiver's
/// local coordinates.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Grid<T> {
    x: i32,
    y: i32,
    height: usize,
    coords: RowMajor,
    tiles: Vec<T>,
}

impl<T> Grid<T> {
    pub fn new(tiles: Vec<T>, width: usize) -> Result<Self, GridError> {
        Self::with_origin(tiles, width, 0, 0)
    }

    pub fn with_origin(tiles: Vec<T>, width: usize, x: i32, y: i32) -> Result<Self, GridError> {
        if width == 0 || tiles.is_empty() {
            return Err(GridError::Degenerate {
                width,
                height: tiles.len().checked_div(width).unwrap_or(0),
            });
        }
        if tiles.len() % width != 0 {
            return Err(GridError::Misaligned {
                len: tiles.len(),
                width,
            });
        }

        Ok(Self::from_parts(tiles, width, x, y))
    }

    /// Skips validation; only for shapes already known to be non-empty and aligned.
    fn from_parts(tiles: Vec<T>, width: usize, x: i32, y: i32) -> Self {
        debug_assert!(width > 0 && !tiles.is_empty() && tiles.len() % width == 0);

        Grid {
            x,
            y,
            height: tiles.len() / width,
            coords: RowMajor::new(width),
            tiles,
        }
    }

    pub fn width(&self) -> usize {
        self.coords.width()
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn coords(&self) -> &RowMajor {
        &self.coords
    }

    pub fn tiles(&self) -> &[T] {
        &self.tiles
    }

    /// Where this grid sits in its parent's coordinate space.
    pub fn footprint(&self) -> Region {
        Region::new(self.x, self.y, self.width(), self.height)
    }

    /// The grid's own extent, anchored at the local origin.
    pub fn bounds(&self) -> Region {
        Region::new(0, 0, self.width(), self.height)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&T> {
        self.cell(i64::from(x), i64::from(y))
    }

    fn cell(&self, x: i64, y: i64) -> Option<&T> {
        if self.bounds().contains(x, y) {
            Some(&self.tiles[self.coords.index(x as usize, y as usize)])
        } else {
            None
        }
    }

    pub fn at(&self, x: usize, y: usize) -> Result<&T, GridError> {
        if x < self.width() && y < self.height {
            Ok(&self.tiles[self.coords.index(x, y)])
        } else {
            Err(GridError::PointOutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height,
            })
        }
    }

    /// Every cell with its local position, in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> + '_ {
        let coords = self.coords;

        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, t)| (coords.x(i), coords.y(i), t))
    }

    /// Builds a grid of the same shape and origin from each cell and its local position.
    pub fn map_cells<U>(&self, mut f: impl FnMut(usize, usize, &T) -> U) -> Grid<U> {
        let tiles = self.iter().map(|(x, y, t)| f(x, y, t)).collect();

        Grid::from_parts(tiles, self.width(), self.x, self.y)
    }

    fn out_of_bounds(&self, region: &Region) -> GridError {
        GridError::OutOfBounds {
            region: *region,
            width: self.width(),
            height: self.height,
        }
    }
}

impl<T: Clone> Grid<T> {
    pub fn new_empty(width: usize, height: usize, zero_value: T) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::Degenerate { width, height });
        }

        Ok(Self::from_parts(
            vec![zero_value; width * height],
            width,
            0,
            0,
        ))
    }

    pub fn set_at(&self, x: usize, y: usize, value: T) -> Result<Self, GridError> {
        self.at(x, y)?;
        let mut tiles = self.tiles.clone();
        tiles[self.coords.index(x, y)] = value;

        Ok(Self::from_parts(tiles, self.width(), self.x, self.y))
    }

    /// Copies out `region`. Cells that fall outside of this grid come back as `None`, so a region
    /// hanging off the edge yields a partially-filled result instead of an error.
    pub fn get_region(&self, region: &Region) -> Result<Grid<Option<T>>, GridError> {
        if region.is_empty() {
            return Err(GridError::Degenerate {
                width: region.width,
                height: region.height,
            });
        }

        Ok(self.sample_region(region))
    }

    fn sample_region(&self, region: &Region) -> Grid<Option<T>> {
        let tiles = region
            .points()
            .map(|(x, y)| self.cell(x, y).cloned())
            .collect();

        Grid::from_parts(tiles, region.width, region.x, region.y)
    }

    /// Like `get_region`, but the region must lie entirely inside this grid.
    pub fn extract_region(&self, region: &Region) -> Result<Grid<T>, GridError> {
        if region.is_empty() || !region.is_within(self.width(), self.height) {
            return Err(self.out_of_bounds(region));
        }

        let tiles = region
            .points()
            .map(|(x, y)| self.tiles[self.coords.index(x as usize, y as usize)].clone())
            .collect();

        Ok(Grid::from_parts(tiles, region.width, region.x, region.y))
    }

    /// The 3x3 block centered on `(x, y)`, including the cell itself at local `(1, 1)`.
    pub fn neighbors(&self, x: i32, y: i32) -> Grid<Option<T>> {
        self.sample_region(&Region::around(x, y))
    }

    pub fn fill_region(&self, region: &Region, value: T) -> Result<Self, GridError> {
        if !region.is_within(self.width(), self.height) {
            return Err(self.out_of_bounds(region));
        }

        Ok(self.map_cells(|x, y, t| {
            if region.contains(x as i64, y as i64) {
                value.clone()
            } else {
                t.clone()
            }
        }))
    }

    /// Sparse merge of `sub_grid` at its own origin. `None` cells leave the destination as it
    /// was; `Some` cells overwrite it. Only `None` cells may fall outside of this grid.
    pub fn set_region(&self, sub_grid: &Grid<Option<T>>) -> Result<Self, GridError> {
        let mut tiles = self.tiles.clone();
        for (sx, sy, cell) in sub_grid.iter() {
            let value = match cell {
                Some(v) => v,
                None => continue,
            };
            let (x, y) = (
                i64::from(sub_grid.x) + sx as i64,
                i64::from(sub_grid.y) + sy as i64,
            );
            if !self.bounds().contains(x, y) {
                return Err(self.out_of_bounds(&sub_grid.footprint()));
            }
            tiles[self.coords.index(x as usize, y as usize)] = value.clone();
        }

        Ok(Self::from_parts(tiles, self.width(), self.x, self.y))
    }

    /// Folds the grid through each processor in order, stopping at the first failure.
    pub fn apply_processors(
        self,
        processors: &mut [&mut dyn Processor<T>],
    ) -> Result<Self, GenerationError> {
        processors
            .iter_mut()
            .try_fold(self, |grid, processor| processor.process(grid))
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    fn numbered(width: usize, height: usize) -> Grid<u32> {
        Grid::new((0..(width * height) as u32).collect(), width).unwrap()
    }

    #[test]
    fn test_misaligned_tiles_are_rejected() {
        assert_eq!(
            Grid::new(vec![0u8; 10], 3),
            Err(GridError::Misaligned { len: 10, width: 3 })
        );
    }

    #[test]
    fn test_degenerate_grids_are_rejected() {
        assert!(Grid::new(vec![0u8; 4], 0).is_err());
        assert!(Grid::<u8>::new(Vec::new(), 4).is_err());
        assert!(Grid::new_empty(0, 5, 0u8).is_err());
        assert!(Grid::new_empty(5, 0, 0u8).is_err());
    }

    #[test]
    fn test_new_empty() {
        let grid = Grid::new_empty(4, 3, 7u8).unwrap();

        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!((grid.x(), grid.y()), (0, 0));
        assert!(grid.tiles().iter().all(|t| *t == 7));
    }

    #[test]
    fn test_at_and_set_at() {
        let grid = numbered(4, 3);
        let changed = grid.set_at(1, 2, 100).unwrap();

        assert_eq!(*grid.at(1, 2).unwrap(), 9);
        assert_eq!(*changed.at(1, 2).unwrap(), 100);
        assert_eq!(changed.tiles().iter().filter(|t| **t == 100).count(), 1);
        assert!(grid.at(4, 0).is_err());
        assert!(grid.set_at(0, 3, 1).is_err());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_huge_coordinates_are_out_of_bounds() {
        let grid = numbered(3, 3);

        assert_eq!(
            grid.at((1 << 32) + 1, 0),
            Err(GridError::PointOutOfBounds {
                x: (1 << 32) + 1,
                y: 0,
                width: 3,
                height: 3,
            })
        );
        assert!(grid.at(0, 1 << 32).is_err());
        assert!(grid.set_at(1 << 32, 0, 7).is_err());

        let wide = Region::new(0, 0, (1 << 32) + 1, 1);
        assert_eq!(
            grid.fill_region(&wide, 99),
            Err(GridError::OutOfBounds {
                region: wide,
                width: 3,
                height: 3,
            })
        );
        assert!(grid.extract_region(&wide).is_err());
    }

    #[test]
    fn test_get_region_inside() {
        let grid = numbered(4, 4);
        let region = grid.get_region(&Region::new(1, 1, 2, 2)).unwrap();

        assert_eq!((region.x(), region.y()), (1, 1));
        assert_eq!(region.tiles(), &[Some(5), Some(6), Some(9), Some(10)]);
    }

    #[test]
    fn test_get_region_off_the_edge_uses_sentinels() {
        let grid = numbered(4, 4);
        let region = grid.get_region(&Region::new(-1, -1, 2, 2)).unwrap();

        assert_eq!(region.tiles(), &[None, None, None, Some(0)]);
    }

    #[test]
    fn test_extract_region_is_strict() {
        let grid = numbered(4, 4);

        assert_eq!(
            grid.extract_region(&Region::new(2, 2, 2, 2)).unwrap().tiles(),
            &[10, 11, 14, 15]
        );
        assert!(grid.extract_region(&Region::new(3, 3, 2, 2)).is_err());
        assert!(grid.extract_region(&Region::new(-1, 0, 2, 2)).is_err());
    }

    #[test]
    fn test_neighbors_in_the_corner() {
        let grid = numbered(3, 3);
        let n = grid.neighbors(0, 0);

        assert_eq!(
            n.tiles(),
            &[None, None, None, None, Some(0), Some(1), None, Some(3), Some(4)]
        );
    }

    #[test]
    fn test_fill_region_out_of_bounds_fails() {
        let grid = numbered(4, 4);

        assert!(grid.fill_region(&Region::new(2, 2, 3, 1), 0).is_err());
        assert!(grid.fill_region(&Region::new(-1, 0, 1, 1), 0).is_err());
    }

    #[test]
    fn test_set_region_is_sparse() {
        let grid = numbered(3, 3);
        let patch = Grid::with_origin(vec![Some(50), None, None, Some(80)], 2, 1, 1).unwrap();
        let merged = grid.set_region(&patch).unwrap();

        assert_eq!(merged.tiles(), &[0, 1, 2, 3, 50, 5, 6, 7, 80]);
        assert_eq!(grid, numbered(3, 3));
    }

    #[test]
    fn test_set_region_ignores_sentinels_off_the_edge() {
        let grid = numbered(3, 3);
        let edge = grid.neighbors(0, 0).map_cells(|_, _, t| t.map(|_| 42));
        let merged = grid.set_region(&edge).unwrap();

        assert_eq!(merged.tiles(), &[42, 42, 2, 42, 42, 5, 6, 7, 8]);
    }

    #[test]
    fn test_set_region_rejects_values_off_the_edge() {
        let grid = numbered(3, 3);
        let patch = Grid::with_origin(vec![Some(1), Some(1)], 2, 2, 0).unwrap();

        assert!(grid.set_region(&patch).is_err());
    }

    #[test]
    fn test_apply_processors_folds_in_order() {
        let mut add_one =
            |g: Grid<u32>| -> Result<_, GenerationError> { Ok(g.map_cells(|_, _, t| t + 1)) };
        let mut double =
            |g: Grid<u32>| -> Result<_, GenerationError> { Ok(g.map_cells(|_, _, t| t * 2)) };

        let out = numbered(2, 1)
            .apply_processors(&mut [&mut add_one, &mut double])
            .unwrap();

        assert_eq!(out.tiles(), &[2, 4]);
    }

    #[test]
    fn test_apply_processors_stops_on_error() {
        let mut fail =
            |_: Grid<u32>| -> Result<Grid<u32>, _> { Err(GenerationError::Exhausted { tries: 1 }) };
        let mut calls = 0;
        let mut count = |g: Grid<u32>| -> Result<_, GenerationError> {
            calls += 1;
            Ok(g)
        };

        let out = numbered(2, 1).apply_processors(&mut [&mut fail, &mut count]);

        assert_eq!(out, Err(GenerationError::Exhausted { tries: 1 }));
        assert_eq!(calls, 0);
    }

    fn grid_and_region() -> impl Strategy<Value = (Grid<u32>, Region)> {
        (1usize..12, 1usize..12).prop_flat_map(|(w, h)| {
            (0..w, 0..h).prop_flat_map(move |(x, y)| {
                (1..=w - x, 1..=h - y).prop_map(move |(rw, rh)| {
                    (numbered(w, h), Region::new(x as i32, y as i32, rw, rh))
                })
            })
        })
    }

    proptest! {
        #[test]
        fn prop_misaligned_construction_fails(
            width in 2usize..16,
            rows in 0usize..16,
            extra in 1usize..16,
        ) {
            let extra = extra % width;
            prop_assume!(extra != 0);

            prop_assert!(Grid::new(vec![0u8; rows * width + extra], width).is_err());
        }

        #[test]
        fn prop_fill_region_containment((grid, region) in grid_and_region()) {
            let filled = grid.fill_region(&region, u32::MAX).unwrap();

            for (x, y, t) in filled.iter() {
                if region.contains(x as i64, y as i64) {
                    prop_assert_eq!(*t, u32::MAX);
                } else {
                    prop_assert_eq!(t, grid.at(x, y).unwrap());
                }
            }
        }

        #[test]
        fn prop_region_round_trip((grid, region) in grid_and_region()) {
            let sub_grid = grid.get_region(&region).unwrap();

            prop_assert_eq!(grid.set_region(&sub_grid).unwrap(), grid);
        }

        #[test]
        fn prop_neighbors_include_self(
            w in 1usize..10,
            h in 1usize..10,
            x in 0usize..10,
            y in 0usize..10,
        ) {
            let (x, y) = (x % w, y % h);
            let grid = numbered(w, h);
            let n = grid.neighbors(x as i32, y as i32);

            prop_assert_eq!(n.at(1, 1).unwrap().as_ref(), Some(grid.at(x, y).unwrap()));
        }
    }
}
