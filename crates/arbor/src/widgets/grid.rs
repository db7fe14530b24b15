use std::collections::BTreeMap;

use crate::{
    error::Result,
    geom::{Margins, Rect, Size},
    id::WidgetId,
    layout::{GridLayout, Place},
    widget::{Ctx, ReadCtx, Widget},
};

/// A child placed in a grid cell.
#[derive(Debug, Clone, Copy)]
struct Cell {
    /// The child.
    id: WidgetId,
    /// Row, 0 at the bottom.
    row: usize,
    /// Column, 0 at the left.
    column: usize,
    /// Placement within the cell.
    place: Place,
}

/// A container that places children in a sparse grid of rows and columns.
///
/// Row 0 is the bottom row.
#[derive(Debug, Default)]
pub struct Grid {
    /// Children in insertion order.
    cells: Vec<Cell>,
    /// Minimum row heights.
    row_sizes: BTreeMap<usize, f32>,
    /// Minimum column widths.
    column_sizes: BTreeMap<usize, f32>,
    /// Row weights.
    row_weights: BTreeMap<usize, f32>,
    /// Column weights.
    column_weights: BTreeMap<usize, f32>,
    /// Replaces the computed desired width when set.
    pub desired_width: Option<f32>,
    /// Replaces the computed desired height when set.
    pub desired_height: Option<f32>,
    /// Space kept clear around the grid.
    pub margins: Margins,
}

impl Grid {
    /// An empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Attach a child at `(row, column)`.
    pub fn add_child(
        &mut self,
        cx: &mut Ctx<'_>,
        row: usize,
        column: usize,
        child: WidgetId,
        place: Place,
    ) -> Result<()> {
        cx.attach(child, None)?;
        self.cells.push(Cell {
            id: child,
            row,
            column,
            place,
        });
        Ok(())
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

    /// Detach a child without destroying it.
    pub fn remove_child(&mut self, cx: &mut Ctx<'_>, child: WidgetId) -> Result<()> {
        self.cells.retain(|c| c.id != child);
        cx.detach(child)
    }

    /// Detach every child and drop all row and column configuration.
    pub fn clear_children(&mut self, cx: &mut Ctx<'_>) -> Result<()> {
        self.cells.clear();
        self.row_sizes.clear();
        self.column_sizes.clear();
        self.row_weights.clear();
        self.column_weights.clear();
        for child in cx.children()? {
            cx.detach(child)?;
        }
        Ok(())
    }

    /// Build a layout pass from the current cells and configuration.
    fn build(
        &self,
        snap: bool,
        desired: impl Fn(WidgetId) -> Result<Size>,
    ) -> Result<GridLayout<(WidgetId, Place)>> {
        let mut layout = GridLayout::new(self.margins).snap(snap);
        for c in &self.cells {
            layout.add_entry(c.row, c.column, desired(c.id)?, (c.id, c.place));
        }
        for (i, s) in &self.row_sizes {
            layout.set_row_size(*i, *s);
        }
        for (i, s) in &self.column_sizes {
            layout.set_column_size(*i, *s);
        }
        for (i, w) in &self.row_weights {
            layout.set_row_weight(*i, *w);
        }
        for (i, w) in &self.column_weights {
            layout.set_column_weight(*i, *w);
        }
        Ok(layout)
    }
}

impl Widget for Grid {
    fn accepts_children(&self) -> bool {
        true
    }

    fn desired_size(&self, cx: &ReadCtx<'_>) -> Result<Size> {
        let snap = cx.ui().config().snap_to_pixels;
        let computed = self
            .build(snap, |id| cx.desired_size(id))?
            .compute_desired_size();
        Ok(Size::new(
            self.desired_width.unwrap_or(computed.w),
            self.desired_height.unwrap_or(computed.h),
        ))
    }

    fn layout_children(&mut self, cx: &mut Ctx<'_>) -> Result<()> {
        let snap = cx.ui().config().snap_to_pixels;
        let layout = self.build(snap, |id| cx.desired_size(id))?;
        let bounds = Rect::from_size(cx.size()?);
        layout.compute_layout(bounds, |(id, place), slot| {
            cx.layout_widget(*id, slot, *place)
        })
    }

    fn on_child_detached(&mut self, child: WidgetId) {
        self.cells.retain(|c| c.id != child);
    }
}
