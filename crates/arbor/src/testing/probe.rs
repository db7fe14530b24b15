use std::{cell::RefCell, rc::Rc};

use crate::{
    error::Result,
    event::Event,
    geom::Size,
    widget::{Ctx, EventOutcome, ReadCtx, Widget},
};

/// Shared record of `(label, event)` pairs, in delivery order.
pub type EventLog = Rc<RefCell<Vec<(&'static str, Event)>>>;

/// An empty event log.
pub fn event_log() -> EventLog {
    Rc::default()
}

/// Callback run by a probe on every event, after logging it.
type Hook = Box<dyn FnMut(&Event, &mut Ctx<'_>) -> Result<()>>;

/// A widget that logs every event it receives.
///
/// Probes consume everything by default.
pub struct Probe {
    /// Name written to the log.
    label: &'static str,
    /// Destination log.
    log: EventLog,
    /// Size requested from the parent.
    desired: Size,
    /// Accept children.
    container: bool,
    /// Decides whether an event is consumed.
    consume: fn(&Event) -> bool,
    /// Extra behavior.
    hook: Option<Hook>,
}

impl Probe {
    /// A probe logging to `log` under `label`.
    pub fn new(label: &'static str, log: &EventLog) -> Self {
        Self {
            label,
            log: log.clone(),
            desired: Size::zero(),
            container: false,
            consume: |_| true,
            hook: None,
        }
    }

    /// Request a size from the parent.
    pub fn desired(mut self, size: Size) -> Self {
        self.desired = size;
        self
    }

    /// Accept children.
    pub fn container(mut self) -> Self {
        self.container = true;
        self
    }

    /// Let every event bubble.
    pub fn ignoring(mut self) -> Self {
        self.consume = |_| false;
        self
    }

    /// Consume only events matching `f`.
    pub fn consuming(mut self, f: fn(&Event) -> bool) -> Self {
        self.consume = f;
        self
    }

    /// Run `f` on every event after logging it.
    pub fn on_event(mut self, f: impl FnMut(&Event, &mut Ctx<'_>) -> Result<()> + 'static) -> Self {
        self.hook = Some(Box::new(f));
        self
    }
}

impl Widget for Probe {
    fn name(&self) -> &'static str {
        self.label
    }

    fn accepts_children(&self) -> bool {
        self.container
    }

    fn desired_size(&self, _cx: &ReadCtx<'_>) -> Result<Size> {
        Ok(self.desired)
    }

    fn on_event(&mut self, event: &Event, cx: &mut Ctx<'_>) -> Result<EventOutcome> {
        self.log.borrow_mut().push((self.label, event.clone()));
        if let Some(hook) = self.hook.as_mut() {
            hook(event, cx)?;
        }
        Ok((self.consume)(event).into())
    }
}
