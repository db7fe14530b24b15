//! Modal dialogs layered over a [`Stack`] root.
//!
//! A modal pushes up to three layers: a shared shade that darkens everything beneath, the dialog
//! panel, and an empty blocker. The stack only hit-tests its top layer, so while the zero-sized
//! blocker is on top no widget receives pointer input. The blocker is removed once the panel has
//! slid into place and pushed again while it slides out.

use std::{cell::RefCell, rc::Rc};

use crate::{
    Ui,
    anim::Rgba,
    error::{Error, Result},
    geom::{Margins, Rect, round_px},
    id::{TimerId, TypedId, WidgetId},
    layout::Place,
    widgets::{Absolute, Background, Rectangle, Stack, Stacked},
};

/// Seconds for the slide and fade transitions.
const TRANSITION_TIME: f32 = 0.25;
/// Space between the panel edge and the dialog.
const PANEL_MARGIN: f32 = 24.0;
/// Panel fill.
const PANEL_COLOR: Rgba = [0.75, 0.25, 0.4, 1.0];
/// Shade while a modal is open.
const SHADE_COLOR: Rgba = [0.0, 0.0, 0.0, 0.5];
/// Shade when no modal is open.
const SHADE_CLEAR: Rgba = [0.0, 0.0, 0.0, 0.0];

/// State shared by every modal on one stack.
#[derive(Debug, Default)]
struct ModalState {
    /// Modals shown and not yet closed.
    open: usize,
    /// The shade layer, while any modal is showing or closing.
    shade: Option<TypedId<Rectangle>>,
}

/// Shows modals on a stack.
///
/// Nested modals share one shade, so the display darkens only once.
#[derive(Debug, Clone)]
pub struct ModalHost {
    /// The root stack.
    stack: TypedId<Stack>,
    /// Shared state.
    state: Rc<RefCell<ModalState>>,
}

impl ModalHost {
    /// A host for modals layered over `stack`.
    pub fn new(stack: TypedId<Stack>) -> Self {
        Self {
            stack,
            state: Rc::default(),
        }
    }

    /// Number of modals shown and not yet closed.
    pub fn open_count(&self) -> usize {
        self.state.borrow().open
    }

    /// The shade layer, if present.
    pub fn shade(&self) -> Option<TypedId<Rectangle>> {
        self.state.borrow().shade
    }
}

/// An open modal.
#[derive(Debug)]
#[must_use]
pub struct Modal {
    /// The host that showed this modal.
    host: ModalHost,
    /// The panel wrapping the dialog.
    panel: TypedId<Background>,
    /// Input blocker layer.
    blocker: WidgetId,
    /// Panel y when off-screen.
    start_y: f32,
    /// Timer that ends the opening transition.
    opening: TimerId,
    /// `close` has run.
    closed: bool,
}

/// Show `dialog` as a modal on the host's stack, centered on the display.
///
/// Focus is released first. The panel slides in from below while the shade fades in; pointer input
/// is blocked until the slide completes.
pub fn show_modal(ui: &mut Ui, host: &ModalHost, dialog: WidgetId) -> Result<Modal> {
    ui.release_focus(None)?;
    let display = Rect::from_size(ui.display_size());

    let existing = host.state.borrow().shade;
    let (shade, fresh) = match existing {
        Some(s) => (s, false),
        None => (
            ui.build(|a| Rectangle::new(a, display.size, SHADE_CLEAR)),
            true,
        ),
    };

    let panel = ui.build(|a| Background::new(a, PANEL_COLOR));
    let frame = ui.add_typed(Stacked::horizontal().with_margins(Margins::uniform(PANEL_MARGIN)));
    ui.with_typed(frame, |w, cx| w.add_child(cx, dialog, 0.0, Place::FILL))?;
    ui.with_typed(panel, |w, cx| w.set_child(cx, Some(frame.id())))?;
    ui.layout_widget(panel, display, Place::CENTER)?;

    let end_y = ui.position(panel)?.y;
    let height = ui.size(panel)?.h;
    let mut start_y = end_y - (display.size.h + height) * 0.5;
    if ui.config().snap_to_pixels {
        start_y = round_px(start_y);
    }

    let blocker = ui.add(Absolute::default());
    ui.with_typed(host.stack, |w, cx| {
        if fresh {
            w.push_child(cx, shade.id(), true)?;
        }
        w.push_child(cx, panel.id(), false)?;
        w.push_child(cx, blocker, false)
    })?;
    {
        let mut state = host.state.borrow_mut();
        state.shade = Some(shade);
        state.open += 1;
    }

    let color = ui.widget_ref::<Rectangle>(shade)?.color();
    let (_, y) = ui.position_params(panel)?;
    let animator = ui.animator_mut();
    animator
        .transition(color)?
        .target(SHADE_COLOR)
        .duration(TRANSITION_TIME)
        .ease_out();
    animator.set(y, start_y)?;
    animator
        .transition(y)?
        .target(end_y)
        .duration(TRANSITION_TIME)
        .ease_out();

    let stack = host.stack;
    let opening = ui.timers_mut().add_timer(TRANSITION_TIME, move |ui| {
        ui.with_typed(stack, |w, cx| w.remove_child(cx, blocker))
    });
    tracing::debug!("modal shown, {} open", host.open_count());

    Ok(Modal {
        host: host.clone(),
        panel,
        blocker,
        start_y,
        opening,
        closed: false,
    })
}

impl Modal {
    /// The panel wrapping the dialog.
    pub fn panel(&self) -> TypedId<Background> {
        self.panel
    }

    /// Is the opening transition still running?
    pub fn is_opening(&self, ui: &Ui) -> bool {
        ui.timers().is_running(self.opening)
    }

    /// Slide the modal out and destroy it, along with the dialog.
    ///
    /// Input is blocked again until the panel is gone. The shade fades out only when this is the
    /// last open modal. Closing a modal that is still opening, or already closed, is an error and
    /// changes nothing.
    pub fn close(&mut self, ui: &mut Ui) -> Result<()> {
        if self.closed {
            return Err(Error::Invalid("modal already closed".into()));
        }
        if self.is_opening(ui) {
            return Err(Error::Invalid("modal is still opening".into()));
        }
        let (host, panel, blocker) = (self.host.clone(), self.panel, self.blocker);

        ui.with_typed(host.stack, |w, cx| w.push_child(cx, blocker, false))?;

        let (open, shade) = {
            let state = host.state.borrow();
            (state.open, state.shade)
        };
        if open == 1
            && let Some(shade) = shade
        {
            let color = ui.widget_ref::<Rectangle>(shade)?.color();
            ui.animator_mut()
                .transition(color)?
                .target(SHADE_CLEAR)
                .duration(TRANSITION_TIME)
                .ease_in();
        }
        let (_, y) = ui.position_params(panel)?;
        ui.animator_mut()
            .transition(y)?
            .target(self.start_y)
            .duration(TRANSITION_TIME)
            .ease_in();
        self.closed = true;
        host.state.borrow_mut().open = open.saturating_sub(1);

        let state = host.state.clone();
        ui.timers_mut().add_timer(TRANSITION_TIME, move |ui| {
            let shade = {
                let mut state = state.borrow_mut();
                if state.open == 0 { state.shade.take() } else { None }
            };
            if let Some(shade) = shade {
                ui.destroy(shade)?;
            }
            ui.destroy(panel)?;
            ui.destroy(blocker)
        });
        tracing::debug!("modal closing, {} open", open.saturating_sub(1));
        Ok(())
    }
}
