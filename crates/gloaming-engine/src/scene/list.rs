use super::{DrawCmd, SortKey, ZIndex};

#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
}

/// Draw stream for one frame.
///
/// `push` is O(1); paint-order iteration sorts an index buffer that is
/// reused across frames.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,
    sorted_indices: Vec<usize>,
    sorted_dirty: bool,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all items, keeping capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_indices.clear();
        self.sorted_dirty = true;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);
        self.items.push(DrawItem {
            key: SortKey::new(z, order),
            cmd,
        });
        self.sorted_dirty = true;
    }

    /// Items back to front.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.sorted_indices.clear();
            self.sorted_indices.extend(0..self.items.len());
            let items = &self.items;
            self.sorted_indices.sort_by_key(|&i| items[i].key);
            self.sorted_dirty = false;
        }
        self.sorted_indices.iter().map(|&i| &self.items[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Vec2};
    use crate::paint::Color;
    use crate::scene::QuadCmd;

    fn widths(list: &mut DrawList) -> Vec<f32> {
        list.iter_in_paint_order()
            .map(|item| match &item.cmd {
                DrawCmd::Quad(q) => q.size.x,
            })
            .collect()
    }

    #[test]
    fn paints_by_z_then_insertion() {
        let mut list = DrawList::new();
        let c = Color::from_hex(0x112233);
        list.push_rect(ZIndex(5), Rect::new(0.0, 0.0, 1.0, 1.0), c);
        list.push_rect(ZIndex(-2), Rect::new(0.0, 0.0, 2.0, 1.0), c);
        list.push_rect(ZIndex(5), Rect::new(0.0, 0.0, 3.0, 1.0), c);
        list.push_ellipse(ZIndex(0), Vec2::zero(), Vec2::new(4.0, 4.0), c);
        assert_eq!(widths(&mut list), vec![2.0, 4.0, 1.0, 3.0]);
    }

    #[test]
    fn clear_resets_order() {
        let mut list = DrawList::new();
        list.push_rect(ZIndex(1), Rect::new(0.0, 0.0, 1.0, 1.0), Color::transparent());
        assert_eq!(widths(&mut list).len(), 1);
        list.clear();
        assert!(list.is_empty());
        list.push_rect(ZIndex(0), Rect::new(0.0, 0.0, 7.0, 1.0), Color::transparent());
        assert_eq!(list.items()[0].key.order, 0);
        assert_eq!(widths(&mut list), vec![7.0]);
    }

    #[test]
    fn invisible_quads_are_detected() {
        let q = QuadCmd::new(Vec2::zero(), Vec2::new(10.0, 10.0), Color::from_hex(0xffffff), crate::scene::QuadShape::Leaf);
        assert!(!q.is_invisible());
        assert!(q.clone().scaled(0.0).is_invisible());
        assert!(QuadCmd { color: Color::transparent(), ..q }.is_invisible());
    }
}
