use std::{cell::RefCell, rc::Rc};

use arbor::{
    Result, TypedId, Ui, WidgetId,
    anim::Rgba,
    geom::{Margins, Size},
    layout::Place,
    modal::{Modal, ModalHost, show_modal},
    widgets::{Background, Grid, Rectangle, Stack, Stacked},
};
use tracing::debug;

use crate::swatch::Swatch;

/// Height of the header and footer bars.
pub const BAR_HEIGHT: f32 = 32.0;
/// Margin around the body grid and the footer buttons.
const GUTTER: f32 = 4.0;
/// Header and footer color.
const BAR_COLOR: Rgba = [0.2, 0.2, 0.25, 1.0];
/// Colors cycled by the body swatches.
const PALETTE: [Rgba; 4] = [
    [0.85, 0.3, 0.3, 1.0],
    [0.3, 0.75, 0.4, 1.0],
    [0.3, 0.45, 0.85, 1.0],
    [0.9, 0.8, 0.3, 1.0],
];
/// Colors of the footer button.
const BUTTON_PALETTE: [Rgba; 2] = [[0.95, 0.95, 0.95, 1.0], [0.7, 0.7, 0.7, 1.0]];
/// Size of the dialog content.
const DIALOG_SIZE: Size = Size::new(160.0, 90.0);

/// Slot holding the open dialog, if any.
type DialogSlot = Rc<RefCell<Option<Modal>>>;

/// Handles to a scene built into a [`Ui`]: a root stack whose base layer is a vertical layout of a
/// header bar, a weighted grid of swatches and a footer holding a button.
///
/// Double-clicking the footer button opens a dialog; double-clicking the dialog closes it.
pub struct Gallery {
    /// Modal host over the root stack.
    pub host: ModalHost,
    /// Body swatches, in row-major order with row 0 at the bottom.
    pub cells: Vec<TypedId<Swatch>>,
    /// The footer button.
    pub button: TypedId<Swatch>,
    /// The open dialog.
    dialog: DialogSlot,
}

impl Gallery {
    /// Build the scene into `ui`, which must not have a root yet, with a `rows` by `columns` body
    /// grid.
    pub fn build(ui: &mut Ui, rows: usize, columns: usize) -> Result<Self> {
        let stack = ui.add_typed(Stack::new());
        ui.set_root(stack)?;
        ui.layout_root()?;
        let host = ModalHost::new(stack);
        let dialog = DialogSlot::default();

        let header = ui.build(|a| Rectangle::new(a, Size::new(0.0, BAR_HEIGHT), BAR_COLOR));

        let grid = ui.add_typed(Grid::new().with_margins(Margins::uniform(GUTTER)));
        let mut cells = Vec::with_capacity(rows * columns);
        for i in 0..rows * columns {
            let mut palette = PALETTE;
            palette.rotate_left(i % PALETTE.len());
            cells.push(ui.build(|a| Swatch::new(a, Size::new(8.0, 8.0), &palette)));
        }
        ui.with_typed(grid, |g, cx| {
            for (i, cell) in cells.iter().enumerate() {
                g.add_child(cx, i / columns, i % columns, cell.id(), Place::FILL)?;
            }
            for r in 0..rows {
                g.set_row_weight(r, 1.0);
            }
            for c in 0..columns {
                g.set_column_weight(c, 1.0);
            }
            Ok(())
        })?;

        let (h, d) = (host.clone(), dialog.clone());
        let button = ui.build(|a| {
            Swatch::new(a, Size::new(96.0, BAR_HEIGHT - 2.0 * GUTTER), &BUTTON_PALETTE)
                .with_action(move |ui| open_dialog(ui, &h, &d))
        });
        let buttons = ui.add_typed(Stacked::horizontal().with_margins(Margins::uniform(GUTTER)));
        ui.with_typed(buttons, |f, cx| {
            f.add_padding(0.0, 1.0);
            f.add_child(cx, button.id(), 0.0, Place::CENTER)?;
            f.add_padding(0.0, 1.0);
            Ok(())
        })?;
        let footer = ui.build(|a| Background::new(a, BAR_COLOR));
        ui.with_typed(footer, |f, cx| f.set_child(cx, Some(buttons.id())))?;

        let body = ui.add_typed(Stacked::vertical());
        ui.with_typed(body, |b, cx| {
            b.add_child(cx, header.id(), 0.0, Place::FILL)?;
            b.add_child(cx, grid.id(), 1.0, Place::FILL)?;
            b.add_child(cx, footer.id(), 0.0, Place::FILL)?;
            Ok(())
        })?;
        ui.with_typed(stack, |w, cx| w.push_child(cx, body.id(), true))?;

        Ok(Self {
            host,
            cells,
            button,
            dialog,
        })
    }

    /// Open the dialog. Does nothing if it is already open.
    pub fn open_dialog(&self, ui: &mut Ui) -> Result<()> {
        open_dialog(ui, &self.host, &self.dialog)
    }

    /// Close the dialog. Does nothing if there is none, or if it is still opening.
    pub fn close_dialog(&self, ui: &mut Ui) -> Result<()> {
        close_dialog(ui, &self.dialog)
    }

    /// Is a dialog shown?
    pub fn dialog_open(&self) -> bool {
        self.dialog.borrow().is_some()
    }

    /// The dialog's panel, while a dialog is shown.
    pub fn dialog_panel(&self) -> Option<WidgetId> {
        self.dialog.borrow().as_ref().map(|m| m.panel().id())
    }
}

/// Show the dialog over the root stack and remember it in `slot`.
fn open_dialog(ui: &mut Ui, host: &ModalHost, slot: &DialogSlot) -> Result<()> {
    if slot.borrow().is_some() {
        debug!("dialog already open");
        return Ok(());
    }
    let s = slot.clone();
    let content = ui.build(|a| {
        Swatch::new(a, DIALOG_SIZE, &BUTTON_PALETTE).with_action(move |ui| close_dialog(ui, &s))
    });
    let modal = show_modal(ui, host, content.id())?;
    *slot.borrow_mut() = Some(modal);
    Ok(())
}

/// Close the dialog in `slot`, unless it is still sliding in.
fn close_dialog(ui: &mut Ui, slot: &DialogSlot) -> Result<()> {
    let Some(mut modal) = slot.borrow_mut().take() else {
        return Ok(());
    };
    if modal.is_opening(ui) {
        debug!("dialog still opening");
        *slot.borrow_mut() = Some(modal);
        return Ok(());
    }
    modal.close(ui)
}
