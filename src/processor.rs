use crate::{error::GenerationError, grid::Grid};

/// One stage of a generation pipeline: consumes a grid and produces the next one.
///
/// Any `FnMut(Grid<T>) -> Result<Grid<T>, GenerationError>` is a processor, so stages that need
/// state (an RNG, an output slot) can just be closures.
pub trait Processor<T> {
    fn process(&mut self, grid: Grid<T>) -> Result<Grid<T>, GenerationError>;
}

impl<T, F> Processor<T> for F
where
    F: FnMut(Grid<T>) -> Result<Grid<T>, GenerationError>,
{
    fn process(&mut self, grid: Grid<T>) -> Result<Grid<T>, GenerationError> {
        self(grid)
    }
}
