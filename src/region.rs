use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// An axis-aligned rectangle of tiles. The origin may be negative so that regions can hang off
/// the edge of a grid (neighborhood queries and padded collision checks do this).
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: usize,
    pub height: usize,
}

impl Region {
    pub fn new(x: i32, y: i32, width: usize, height: usize) -> Self {
        Region {
            x,
            y,
            width,
            height,
        }
    }

    /// The 3x3 block centered on `(x, y)`.
    pub fn around(x: i32, y: i32) -> Self {
        Region::new(x.saturating_sub(1), y.saturating_sub(1), 3, 3)
    }

    /// One past the last column. Computed in `i64` so huge widths can't wrap.
    pub fn x_end(&self) -> i64 {
        i64::from(self.x) + dim_i64(self.width)
    }

    /// One past the last row.
    pub fn y_end(&self) -> i64 {
        i64::from(self.y) + dim_i64(self.height)
    }

    pub fn area(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= i64::from(self.x) && x < self.x_end() && y >= i64::from(self.y) && y < self.y_end()
    }

    /// True iff every tile of `self` lies inside a `width x height` grid anchored at the origin.
    pub fn is_within(&self, width: usize, height: usize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x_end() <= dim_i64(width)
            && self.y_end() <= dim_i64(height)
    }

    /// Grows the region by `amount` on every side. Negative amounts shrink it, bottoming out at
    /// an empty region.
    pub fn radial_grow(&self, amount: i32) -> Self {
        let grow_dim = |dim: usize| {
            let grown = dim_i64(dim).saturating_add(2 * i64::from(amount)).max(0);
            usize::try_from(grown).unwrap_or(usize::MAX)
        };

        Region::new(
            self.x.saturating_sub(amount),
            self.y.saturating_sub(amount),
            grow_dim(self.width),
            grow_dim(self.height),
        )
    }

    /// Strict AABB overlap. Rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Region) -> bool {
        i64::from(self.x) < other.x_end()
            && self.x_end() > i64::from(other.x)
            && i64::from(self.y) < other.y_end()
            && self.y_end() > i64::from(other.y)
    }

    /// Iterates over every position in the region, row by row.
    pub fn points(&self) -> impl Iterator<Item = (i64, i64)> {
        let (x, x_end) = (i64::from(self.x), self.x_end());

        (i64::from(self.y)..self.y_end()).flat_map(move |py| (x..x_end).map(move |px| (px, py)))
    }
}

fn dim_i64(dim: usize) -> i64 {
    i64::try_from(dim).unwrap_or(i64::MAX)
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
