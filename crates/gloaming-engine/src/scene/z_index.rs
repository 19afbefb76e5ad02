/// Paint layer; higher values are drawn on top.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ZIndex(pub i32);

impl ZIndex {
    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }

    /// This layer shifted by `by`.
    #[inline]
    pub const fn offset(self, by: i32) -> Self {
        Self(self.0.saturating_add(by))
    }
}
