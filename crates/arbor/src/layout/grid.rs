use std::collections::BTreeMap;

use super::{snap_sizes, weight_total};
use crate::{
    error::Result,
    geom::{Margins, Rect, Size},
};

/// One cell entry in a grid layout.
#[derive(Debug, Clone)]
struct Entry<K> {
    /// Row index, 0 at the bottom.
    row: usize,
    /// Column index, 0 at the left.
    column: usize,
    /// Desired size.
    size: Size,
    /// Caller key.
    key: K,
}

/// Distributes entries over a sparse grid.
///
/// Rows and columns are addressed by index and need not be contiguous; unused indices below the
/// highest one used collapse to zero unless given a fixed size. Each column is as wide as its widest
/// entry, each row as tall as its tallest, and fixed sizes act as minimums. Leftover space is shared
/// between weighted rows and weighted columns independently. Row 0 is the bottom row.
#[derive(Debug, Clone)]
pub struct GridLayout<K> {
    /// Space kept clear around the grid.
    margins: Margins,
    /// Snap row and column sizes to whole pixels.
    snap: bool,
    /// Cell entries.
    entries: Vec<Entry<K>>,
    /// Fixed minimum row heights.
    row_sizes: BTreeMap<usize, f32>,
    /// Fixed minimum column widths.
    column_sizes: BTreeMap<usize, f32>,
    /// Row weights.
    row_weights: BTreeMap<usize, f32>,
    /// Column weights.
    column_weights: BTreeMap<usize, f32>,
}

impl<K> GridLayout<K> {
    /// An empty grid, with pixel snapping on.
    pub fn new(margins: Margins) -> Self {
        Self {
            margins,
            snap: true,
            entries: Vec::new(),
            row_sizes: BTreeMap::new(),
            column_sizes: BTreeMap::new(),
            row_weights: BTreeMap::new(),
            column_weights: BTreeMap::new(),
        }
    }

    /// Enable or disable pixel snapping.
    pub fn snap(mut self, snap: bool) -> Self {
        self.snap = snap;
        self
    }

    /// Add an entry at `(row, column)`.
    pub fn add_entry(&mut self, row: usize, column: usize, size: Size, key: K) {
        self.entries.push(Entry {
            row,
            column,
            size,
            key,
        });
    }

    /// Set a minimum height for a row.
    pub fn set_row_size(&mut self, row: usize, size: f32) {
        self.row_sizes.insert(row, size);
    }

    /// Set a minimum width for a column.
    pub fn set_column_size(&mut self, column: usize, size: f32) {
        self.column_sizes.insert(column, size);
    }

    /// Set a row's share of leftover height.
    pub fn set_row_weight(&mut self, row: usize, weight: f32) {
        self.row_weights.insert(row, weight);
    }

    /// Set a column's share of leftover width.
    pub fn set_column_weight(&mut self, column: usize, weight: f32) {
        self.column_weights.insert(column, weight);
    }

    /// Desired column widths and row heights.
    fn absolute_sizes(&self) -> (Vec<f32>, Vec<f32>) {
        let columns = count(
            self.entries.iter().map(|e| e.column),
            self.column_sizes.keys(),
        );
        let rows = count(self.entries.iter().map(|e| e.row), self.row_sizes.keys());

        let mut widths = vec![0.0f32; columns];
        let mut heights = vec![0.0f32; rows];
        for (i, s) in &self.column_sizes {
            widths[*i] = *s;
        }
        for (i, s) in &self.row_sizes {
            heights[*i] = *s;
        }
        for e in &self.entries {
            widths[e.column] = widths[e.column].max(e.size.w);
            heights[e.row] = heights[e.row].max(e.size.h);
        }
        (widths, heights)
    }

    /// Add weighted shares of `available` beyond the absolute sizes, then snap.
    fn distribute(
        &self,
        absolute: Vec<f32>,
        weights: &BTreeMap<usize, f32>,
        available: f32,
        margins: f32,
    ) -> Vec<f32> {
        let total = margins + absolute.iter().sum::<f32>();
        let leftover = (available - total).max(0.0);
        let per_weight = leftover / weight_total(weights.values().copied());
        let sizes: Vec<f32> = absolute
            .into_iter()
            .enumerate()
            .map(|(i, s)| s + weights.get(&i).copied().unwrap_or(0.0) * per_weight)
            .collect();
        if self.snap { snap_sizes(&sizes) } else { sizes }
    }

    /// Run a layout pass inside `parent`, calling `place` once per entry in insertion order.
    pub fn compute_layout(
        &self,
        parent: Rect,
        mut place: impl FnMut(&K, Rect) -> Result<()>,
    ) -> Result<()> {
        let (widths, heights) = self.absolute_sizes();
        let m = self.margins;
        let widths = self.distribute(widths, &self.column_weights, parent.size.w, m.left + m.right);
        let heights = self.distribute(heights, &self.row_weights, parent.size.h, m.bottom + m.top);

        let xs = offsets(parent.pos.x + m.left, &widths);
        let ys = offsets(parent.pos.y + m.bottom, &heights);

        for e in &self.entries {
            let rect = Rect::new(xs[e.column], ys[e.row], widths[e.column], heights[e.row]);
            place(&e.key, rect)?;
        }
        Ok(())
    }

    /// Margins plus the sum of absolute row and column sizes.
    pub fn compute_desired_size(&self) -> Size {
        let (widths, heights) = self.absolute_sizes();
        let m = self.margins;
        Size::new(
            m.left + m.right + widths.iter().sum::<f32>(),
            m.bottom + m.top + heights.iter().sum::<f32>(),
        )
    }
}

/// One more than the highest index in use.
fn count<'a>(entries: impl Iterator<Item = usize>, sized: impl Iterator<Item = &'a usize>) -> usize {
    entries
        .chain(sized.copied())
        .max()
        .map_or(0, |m| m.saturating_add(1))
}

/// Running start offsets for a run of sizes.
fn offsets(start: f32, sizes: &[f32]) -> Vec<f32> {
    let mut offset = start;
    sizes
        .iter()
        .map(|s| {
            let o = offset;
            offset += s;
            o
        })
        .collect()
}
