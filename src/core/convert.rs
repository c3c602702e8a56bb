use anyhow::Result;

/// Types laid out over the dense index range `0..COUNT`
pub trait FromIndex: Sized {
    const COUNT: usize;

    fn from_index(idx: usize) -> Result<Self>;

    fn all_indices() -> std::ops::Range<usize> {
        0..Self::COUNT
    }
}

/// Position of a value inside its `FromIndex` range
pub trait ToIndex {
    fn to_index(&self) -> usize;
}
