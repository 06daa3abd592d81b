use crate::region::Region;

use rand::{prelude::*, rngs::SmallRng};
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};

/// The seedable source every generator draws from.
pub fn small_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Uniformly samples from `[min, max]`.
pub fn sample_inclusive<R: Rng + ?Sized>(rng: &mut R, (min, max): (usize, usize)) -> usize {
    Uniform::new_inclusive(min, max).sample(rng)
}

/// True with probability `p`. Values outside `[0, 1]` are clamped, and NaN never succeeds.
pub fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    if p.is_nan() || p <= 0.0 {
        false
    } else if p >= 1.0 {
        true
    } else {
        rng.gen_bool(p)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct RoomSizeDistSpec {
    pub width: (usize, usize),
    pub height: (usize, usize),
}

impl Default for RoomSizeDistSpec {
    fn default() -> Self {
        RoomSizeDistSpec {
            width: (20, 30),
            height: (20, 30),
        }
    }
}

impl RoomSizeDistSpec {
    pub fn make(&self) -> RoomSizeDist {
        RoomSizeDist {
            width: Uniform::new_inclusive(self.width.0, self.width.1),
            height: Uniform::new_inclusive(self.height.0, self.height.1),
        }
    }
}

pub struct RoomSizeDist {
    pub width: Uniform<usize>,
    pub height: Uniform<usize>,
}

impl Distribution<(usize, usize)> for RoomSizeDist {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> (usize, usize) {
        (self.width.sample(rng), self.height.sample(rng))
    }
}

/// Samples a room size, clamped to the map, and a top-left corner that keeps the whole room on
/// the map.
pub fn sample_region<R: Rng + ?Sized>(
    rng: &mut R,
    size_distr: &impl Distribution<(usize, usize)>,
    map_width: usize,
    map_height: usize,
) -> Region {
    let (width, height) = size_distr.sample(rng);
    let width = width.min(map_width);
    let height = height.min(map_height);
    let x = sample_inclusive(rng, (0, map_width - width));
    let y = sample_inclusive(rng, (0, map_height - height));

    Region::new(x as i32, y as i32, width, height)
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
