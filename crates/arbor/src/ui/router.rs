use std::collections::HashMap;

use super::Ui;
use crate::{
    error::Result,
    event::{
        Event, HostEvent, KeyEvent, MouseButton, MouseEvent, MouseEventKind, host::button,
    },
    geom::Point,
    id::{TimerId, WidgetId},
    timer::Timers,
};

/// A consumed press that may become a double-click.
#[derive(Debug, Clone, Copy)]
struct DoubleClick {
    /// The widget that consumed the press.
    widget: WidgetId,
    /// The button pressed.
    button: MouseButton,
    /// Timer that closes the window.
    timer: TimerId,
}

/// Pointer, capture and focus state.
///
/// Every reference here is a plain id. Destroying a widget runs [`forget`](Self::forget) on each
/// node of the subtree before the nodes are removed.
#[derive(Debug, Default)]
pub(crate) struct Router {
    /// Last pointer position in display space.
    pub(crate) pointer: Option<Point>,
    /// Widget under the pointer.
    pub(crate) hovered: Option<WidgetId>,
    /// Widget receiving all pointer events.
    pub(crate) captured: Option<WidgetId>,
    /// Widget receiving keystrokes.
    pub(crate) focused: Option<WidgetId>,
    /// Pending long-press timers.
    long_press: HashMap<WidgetId, TimerId>,
    /// Open double-click window.
    double_click: Option<DoubleClick>,
    /// Widgets may have moved since hover was last computed.
    pub(crate) stale: bool,
}

impl Router {
    /// Drop every reference to a widget that is about to be destroyed.
    pub(crate) fn forget(&mut self, id: WidgetId, timers: &mut Timers) {
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        if self.captured == Some(id) {
            self.captured = None;
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
        self.cancel_long_press(id, timers);
        if self.double_click.is_some_and(|dc| dc.widget == id) {
            self.cancel_double_click(timers);
        }
    }

    /// Cancel the long-press timer for one widget.
    fn cancel_long_press(&mut self, id: WidgetId, timers: &mut Timers) {
        if let Some(t) = self.long_press.remove(&id) {
            timers.cancel(t);
        }
    }

    /// Cancel every long-press timer.
    fn cancel_all_long_press(&mut self, timers: &mut Timers) {
        for (_, t) in self.long_press.drain() {
            timers.cancel(t);
        }
    }

    /// Close the double-click window.
    fn cancel_double_click(&mut self, timers: &mut Timers) {
        if let Some(dc) = self.double_click.take() {
            timers.cancel(dc.timer);
        }
    }

    /// Is a long-press pending for this widget?
    pub(crate) fn long_press_pending(&self, id: WidgetId) -> bool {
        self.long_press.contains_key(&id)
    }

    /// Translate and route one host event.
    pub(crate) fn process(ui: &mut Ui, event: HostEvent) -> Result<()> {
        match event {
            HostEvent::PointerMoved { x, y } => {
                let p = Point::new(x, ui.config.display_height - y - 1.0);
                Self::pointer_moved(ui, p)
            }
            HostEvent::PointerPressed { button: n } => Self::pressed(ui, button(n)?),
            HostEvent::PointerReleased { button: n } => Self::released(ui, button(n)?),
            HostEvent::KeyPressed { key, text } => Self::key(ui, KeyEvent::press(key, text)),
            HostEvent::KeyReleased { key } => Self::key(ui, KeyEvent::release(key)),
        }
    }

    /// Recompute the widget under the pointer and send leave/enter on change.
    pub(crate) fn update_hover(ui: &mut Ui) -> Result<()> {
        let Some(p) = ui.router.pointer else {
            return Ok(());
        };
        let under = ui.hit_test(p);
        if under == ui.router.hovered {
            return Ok(());
        }
        let previous = ui.router.hovered;
        ui.router.hovered = under;
        if let Some(prev) = previous {
            ui.router.cancel_long_press(prev, &mut ui.timers);
            if ui.contains(prev) {
                ui.send_event(prev, &Event::MouseLeave, false)?;
            }
        }
        if let Some(h) = under {
            tracing::trace!("hover {h:?}");
            ui.send_event(h, &Event::MouseEnter, false)?;
        }
        Ok(())
    }

    /// A pointer event at the last known position.
    fn mouse(ui: &Ui, kind: MouseEventKind, button: Option<MouseButton>) -> Event {
        Event::Mouse(MouseEvent::new(
            kind,
            button,
            ui.router.pointer.unwrap_or_default(),
        ))
    }

    /// Pointer motion: update hover, then send MOVE to the captured widget and to the hovered
    /// widget, without propagation.
    ///
    /// Hover is current afterwards, so the next [`Ui::begin_process_events`] skips its hit-test
    /// unless something moves in between.
    fn pointer_moved(ui: &mut Ui, p: Point) -> Result<()> {
        ui.router.pointer = Some(p);
        ui.animator.take_placement_dirty();
        ui.router.stale = false;
        Self::update_hover(ui)?;
        let event = Self::mouse(ui, MouseEventKind::Move, None);
        let captured = ui.router.captured;
        if let Some(c) = captured {
            ui.send_event(c, &event, false)?;
        }
        if let Some(h) = ui.router.hovered
            && Some(h) != captured
        {
            ui.send_event(h, &event, false)?;
        }
        Ok(())
    }

    /// Send to the captured widget without propagation, or else to the hovered widget with
    /// propagation. Returns the consumer.
    fn send_to_captured_or_hovered(ui: &mut Ui, event: &Event) -> Result<Option<WidgetId>> {
        if let Some(c) = ui.router.captured {
            ui.send_event(c, event, false)
        } else if let Some(h) = ui.router.hovered {
            ui.send_event(h, event, true)
        } else {
            Ok(None)
        }
    }

    /// Button press: either completes a double-click or dispatches PRESS and arms the gesture
    /// timers for the consumer.
    fn pressed(ui: &mut Ui, button: MouseButton) -> Result<()> {
        if let Some(dc) = ui.router.double_click
            && dc.button == button
            && ui
                .router
                .hovered
                .is_some_and(|h| ui.is_ancestor(dc.widget, h))
        {
            ui.router.cancel_double_click(&mut ui.timers);
            tracing::debug!("double-click on {:?}", dc.widget);
            let event = Self::mouse(ui, MouseEventKind::DoubleClick, Some(button));
            ui.send_event(dc.widget, &event, false)?;
            return Ok(());
        }

        ui.router.cancel_double_click(&mut ui.timers);
        let event = Self::mouse(ui, MouseEventKind::Press, Some(button));
        let Some(widget) = Self::send_to_captured_or_hovered(ui, &event)? else {
            return Ok(());
        };
        if !ui.contains(widget) {
            return Ok(());
        }

        ui.router.cancel_long_press(widget, &mut ui.timers);
        let long_press = ui.config.long_press_duration;
        let t = ui.timers.add_timer(long_press, move |ui| {
            Self::fire_long_press(ui, widget, button)
        });
        ui.router.long_press.insert(widget, t);

        let window = ui.config.double_click_duration;
        let timer = ui.timers.add_timer(window, |ui| {
            ui.router.double_click = None;
            Ok(())
        });
        ui.router.double_click = Some(DoubleClick {
            widget,
            button,
            timer,
        });
        Ok(())
    }

    /// Deliver LONG_PRESS to the widget that consumed the press, without propagation.
    fn fire_long_press(ui: &mut Ui, widget: WidgetId, button: MouseButton) -> Result<()> {
        ui.router.long_press.remove(&widget);
        if !ui.contains(widget) {
            return Ok(());
        }
        tracing::debug!("long press on {widget:?}");
        let event = Self::mouse(ui, MouseEventKind::LongPress, Some(button));
        ui.send_event(widget, &event, false)?;
        Ok(())
    }

    /// Button release: cancels pending long-presses and dispatches RELEASE.
    fn released(ui: &mut Ui, button: MouseButton) -> Result<()> {
        ui.router.cancel_all_long_press(&mut ui.timers);
        let event = Self::mouse(ui, MouseEventKind::Release, Some(button));
        Self::send_to_captured_or_hovered(ui, &event)?;
        Ok(())
    }

    /// Keystrokes go to the focused widget, with propagation.
    fn key(ui: &mut Ui, key: KeyEvent) -> Result<()> {
        if let Some(f) = ui.router.focused {
            ui.send_event(f, &Event::Key(key), true)?;
        }
        Ok(())
    }
}
