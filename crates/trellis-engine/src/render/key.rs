use core::cmp::Ordering;

/// Priority of a node for hit-testing and painting.
///
/// Ordering rules (front-most first):
/// 1) `layer`: descending, higher layers always win
/// 2) `depth`: descending, deeper nodes sit on top of their ancestors
///
/// Equal keys compare equal, so a stable sort keeps traversal order between them.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct PaintKey {
    pub layer: i32,
    pub depth: u32,
}

impl PaintKey {
    #[inline]
    pub const fn new(layer: i32, depth: u32) -> Self {
        Self { layer, depth }
    }
}

impl Ord for PaintKey {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        match other.layer.cmp(&self.layer) {
            Ordering::Equal => other.depth.cmp(&self.depth),
            o => o,
        }
    }
}

impl PartialOrd for PaintKey {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
