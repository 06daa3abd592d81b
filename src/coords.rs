/// Maps between linear tile indices and `(x, y)` positions for rows of a fixed width.
///
/// No bounds checking happens here; `Grid` is responsible for only asking about valid indices.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RowMajor {
    width: usize,
}

impl RowMajor {
    pub fn new(width: usize) -> Self {
        RowMajor { width }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn x(&self, i: usize) -> usize {
        i % self.width
    }

    pub fn y(&self, i: usize) -> usize {
        i / self.width
    }

    pub fn xy(&self, i: usize) -> (usize, usize) {
        (self.x(i), self.y(i))
    }

    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
