use fnv::FnvHashSet;

/// A set of unordered index pairs: `(a, b)` and `(b, a)` are the same member.
#[derive(Clone, Debug, Default)]
pub struct SymmetricSet {
    set: FnvHashSet<(usize, usize)>,
}

impl SymmetricSet {
    pub fn new() -> Self {
        SymmetricSet {
            set: FnvHashSet::default(),
        }
    }

    pub fn order_indices(i1: usize, i2: usize) -> (usize, usize) {
        if i1 > i2 {
            (i2, i1)
        } else {
            (i1, i2)
        }
    }

    /// Returns true iff the pair was not already present.
    pub fn insert(&mut self, i1: usize, i2: usize) -> bool {
        self.set.insert(Self::order_indices(i1, i2))
    }
}
