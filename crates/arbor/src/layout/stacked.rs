use super::{snap_sizes, weight_total};
use crate::{
    error::Result,
    geom::{Axis, Margins, Rect, Size},
};

/// One entry in a stacked layout.
#[derive(Debug, Clone)]
struct Entry<K> {
    /// Desired size. Padding entries use `(padding, 0)` along (main, cross).
    size: Size,
    /// Share of the leftover main-axis space.
    weight: f32,
    /// Caller key, `None` for padding.
    key: Option<K>,
}

/// Distributes entries along one axis.
///
/// Each entry gets its desired main-axis size plus a weighted share of whatever space is left once
/// margins and desired sizes are accounted for. Every entry spans the full cross-axis extent inside
/// the margins. In vertical mode the first entry sits at the top.
#[derive(Debug, Clone)]
pub struct StackedLayout<K> {
    /// Distribution axis.
    axis: Axis,
    /// Space kept clear around the entries.
    margins: Margins,
    /// Snap main-axis sizes to whole pixels.
    snap: bool,
    /// Entries in insertion order.
    entries: Vec<Entry<K>>,
}

impl<K> StackedLayout<K> {
    /// An empty layout along `axis`, with pixel snapping on.
    pub fn new(axis: Axis, margins: Margins) -> Self {
        Self {
            axis,
            margins,
            snap: true,
            entries: Vec::new(),
        }
    }

    /// Enable or disable pixel snapping.
    pub fn snap(mut self, snap: bool) -> Self {
        self.snap = snap;
        self
    }

    /// Add an entry with a desired size and weight.
    pub fn add_entry(&mut self, size: Size, weight: f32, key: K) {
        self.entries.push(Entry {
            size,
            weight,
            key: Some(key),
        });
    }

    /// Add a spacer of `padding` along the main axis.
    pub fn add_padding(&mut self, padding: f32, weight: f32) {
        self.entries.push(Entry {
            size: Size::from_axes(self.axis, padding, 0.0),
            weight,
            key: None,
        });
    }

    /// Number of entries, padding included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Does the layout have no entries?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in distribution order: reversed in vertical mode so the first entry ends up on top.
    fn ordered(&self) -> Vec<&Entry<K>> {
        match self.axis {
            Axis::Horizontal => self.entries.iter().collect(),
            Axis::Vertical => self.entries.iter().rev().collect(),
        }
    }

    /// Resolve rects in distribution order.
    fn resolve(&self, parent: Rect) -> Vec<(&Entry<K>, Rect)> {
        let axis = self.axis;
        let cross = axis.cross();
        let entries = self.ordered();

        let fixed: Vec<f32> = entries.iter().map(|e| e.size.along(axis)).collect();
        let total = self.margins.total(axis) + fixed.iter().sum::<f32>();
        let weight = weight_total(entries.iter().map(|e| e.weight));
        let leftover = (parent.size.along(axis) - total).max(0.0);

        let mut sizes: Vec<f32> = entries
            .iter()
            .zip(&fixed)
            .map(|(e, f)| f + leftover * e.weight / weight)
            .collect();
        if self.snap {
            sizes = snap_sizes(&sizes);
        }

        let (lead, _) = self.margins.along(axis);
        let (cross_lead, _) = self.margins.along(cross);
        let cross_start = parent.start(cross) + cross_lead;
        let cross_len = parent.size.along(cross) - self.margins.total(cross);

        let mut offset = parent.start(axis) + lead;
        entries
            .into_iter()
            .zip(sizes)
            .map(|(e, size)| {
                let rect = Rect::from_axes(axis, (offset, size), (cross_start, cross_len));
                offset += size;
                (e, rect)
            })
            .collect()
    }

    /// Run a layout pass inside `parent`, calling `place` once per keyed entry.
    pub fn compute_layout(
        &self,
        parent: Rect,
        mut place: impl FnMut(&K, Rect) -> Result<()>,
    ) -> Result<()> {
        for (entry, rect) in self.resolve(parent) {
            if let Some(key) = &entry.key {
                place(key, rect)?;
            }
        }
        Ok(())
    }

    /// Resolved rects for every entry, padding included, in insertion order.
    pub fn rects(&self, parent: Rect) -> Vec<Rect> {
        let mut rects: Vec<Rect> = self.resolve(parent).into_iter().map(|(_, r)| r).collect();
        if self.axis == Axis::Vertical {
            rects.reverse();
        }
        rects
    }

    /// Sum of main-axis sizes and max of cross-axis sizes, plus margins.
    pub fn compute_desired_size(&self) -> Size {
        let axis = self.axis;
        let (main, cross) = self.entries.iter().fold((0.0f32, 0.0f32), |(m, c), e| {
            (m + e.size.along(axis), c.max(e.size.along(axis.cross())))
        });
        Size::from_axes(
            axis,
            main + self.margins.total(axis),
            cross + self.margins.total(axis.cross()),
        )
    }
}
