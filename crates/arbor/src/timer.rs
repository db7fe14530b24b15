//! One-shot timers, per-frame updaters and frame hooks.

use slotmap::SlotMap;

use crate::{Ui, error::Result, id::TimerId};

/// Callback fired once when a timer expires.
pub type TimerFn = Box<dyn FnOnce(&mut Ui) -> Result<()>>;
/// Callback run every frame with the frame's `dt`.
pub type UpdaterFn = Box<dyn FnMut(&mut Ui, f32) -> Result<()>>;
/// Callback run every frame after input has been processed.
pub type HookFn = Box<dyn FnMut(&mut Ui) -> Result<()>>;

/// A registered callback. The callback is `None` while it is running.
enum Entry {
    /// Fires once when `remaining` reaches zero.
    Timer {
        /// Seconds until the timer fires.
        remaining: f32,
        /// Callback to fire.
        callback: Option<TimerFn>,
    },
    /// Runs every frame until cancelled.
    Updater(Option<UpdaterFn>),
    /// Runs every frame after input, until cancelled.
    Hook(Option<HookFn>),
}

/// Registry of timers, updaters and frame hooks.
///
/// Each kind is driven from a snapshot of its ids, so callbacks may add or cancel entries freely.
/// Entries added during a pass first run on the next pass. Cancelling removes an entry before its
/// next tick and never interrupts a callback that is already running.
#[derive(Default)]
pub struct Timers {
    /// Entry storage.
    entries: SlotMap<TimerId, Entry>,
    /// Timer ids in creation order.
    timers: Vec<TimerId>,
    /// Updater ids in creation order.
    updaters: Vec<TimerId>,
    /// Frame hook ids in creation order.
    hooks: Vec<TimerId>,
}

impl Timers {
    /// Construct an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `callback` once after `duration` seconds.
    pub fn add_timer(
        &mut self,
        duration: f32,
        callback: impl FnOnce(&mut Ui) -> Result<()> + 'static,
    ) -> TimerId {
        let id = self.entries.insert(Entry::Timer {
            remaining: duration.max(0.0),
            callback: Some(Box::new(callback)),
        });
        self.timers.push(id);
        id
    }

    /// Run `callback` with `dt` every frame until cancelled.
    pub fn add_updater(
        &mut self,
        callback: impl FnMut(&mut Ui, f32) -> Result<()> + 'static,
    ) -> TimerId {
        let id = self.entries.insert(Entry::Updater(Some(Box::new(callback))));
        self.updaters.push(id);
        id
    }

    /// Run `callback` every frame after input processing, until cancelled.
    pub fn add_frame_hook(
        &mut self,
        callback: impl FnMut(&mut Ui) -> Result<()> + 'static,
    ) -> TimerId {
        let id = self.entries.insert(Entry::Hook(Some(Box::new(callback))));
        self.hooks.push(id);
        id
    }

    /// Cancel an entry. Returns false if it had already fired or been cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.entries.remove(id).is_some()
    }

    /// Is the entry still pending?
    pub fn is_running(&self, id: TimerId) -> bool {
        self.entries.contains_key(id)
    }

    /// Seconds left on a timer.
    pub fn remaining(&self, id: TimerId) -> Option<f32> {
        match self.entries.get(id)? {
            Entry::Timer { remaining, .. } => Some(*remaining),
            _ => None,
        }
    }

    /// Number of pending entries of all kinds.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Is the registry empty?
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop ids whose entries are gone and return a copy of what remains.
    fn snapshot(entries: &SlotMap<TimerId, Entry>, ids: &mut Vec<TimerId>) -> Vec<TimerId> {
        ids.retain(|id| entries.contains_key(*id));
        ids.clone()
    }

    /// Count a timer down. Returns its callback, removing the entry, once it reaches zero.
    fn tick_timer(&mut self, id: TimerId, dt: f32) -> Option<TimerFn> {
        let Some(Entry::Timer {
            remaining,
            callback,
        }) = self.entries.get_mut(id)
        else {
            return None;
        };
        *remaining = (*remaining - dt).max(0.0);
        if *remaining > 0.0 {
            return None;
        }
        let callback = callback.take();
        self.entries.remove(id);
        callback
    }

    /// Advance all timers and then all updaters by `dt`.
    pub(crate) fn advance(ui: &mut Ui, dt: f32) -> Result<()> {
        let timers = Self::snapshot(&ui.timers.entries, &mut ui.timers.timers);
        for id in timers {
            if let Some(callback) = ui.timers.tick_timer(id, dt) {
                callback(ui)?;
            }
        }

        let updaters = Self::snapshot(&ui.timers.entries, &mut ui.timers.updaters);
        for id in updaters {
            let Some(Entry::Updater(slot)) = ui.timers.entries.get_mut(id) else {
                continue;
            };
            let Some(mut callback) = slot.take() else {
                continue;
            };
            let result = callback(ui, dt);
            if let Some(Entry::Updater(slot)) = ui.timers.entries.get_mut(id) {
                *slot = Some(callback);
            }
            result?;
        }
        Ok(())
    }

    /// Run all frame hooks once.
    pub(crate) fn run_hooks(ui: &mut Ui) -> Result<()> {
        let hooks = Self::snapshot(&ui.timers.entries, &mut ui.timers.hooks);
        for id in hooks {
            let Some(Entry::Hook(slot)) = ui.timers.entries.get_mut(id) else {
                continue;
            };
            let Some(mut callback) = slot.take() else {
                continue;
            };
            let result = callback(ui);
            if let Some(Entry::Hook(slot)) = ui.timers.entries.get_mut(id) {
                *slot = Some(callback);
            }
            result?;
        }
        Ok(())
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.timers.clear();
        self.updaters.clear();
        self.hooks.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::EngineConfig;

    #[test]
    fn timer_fires_once_at_zero() -> Result<()> {
        let mut ui = Ui::new(EngineConfig::default());
        let fired = Rc::new(RefCell::new(0));
        let f = fired.clone();
        let id = ui.timers_mut().add_timer(0.5, move |_| {
            *f.borrow_mut() += 1;
            Ok(())
        });
        ui.update(0.25)?;
        assert_eq!(*fired.borrow(), 0);
        assert_eq!(ui.timers().remaining(id), Some(0.25));
        ui.update(0.5)?;
        assert_eq!(*fired.borrow(), 1);
        assert!(!ui.timers().is_running(id));
        ui.update(1.0)?;
        assert_eq!(*fired.borrow(), 1);
        Ok(())
    }

    #[test]
    fn cancel_is_idempotent() -> Result<()> {
        let mut ui = Ui::new(EngineConfig::default());
        let id = ui.timers_mut().add_timer(0.1, |_| panic!("cancelled timer fired"));
        assert!(ui.timers_mut().cancel(id));
        assert!(!ui.timers_mut().cancel(id));
        ui.update(1.0)?;
        Ok(())
    }

    #[test]
    fn callbacks_can_cancel_and_schedule() -> Result<()> {
        let mut ui = Ui::new(EngineConfig::default());
        let log = Rc::new(RefCell::new(Vec::new()));

        let victim: Rc<RefCell<Option<TimerId>>> = Rc::new(RefCell::new(None));

        let (l, v) = (log.clone(), victim.clone());
        ui.timers_mut().add_timer(0.0, move |ui| {
            l.borrow_mut().push("first");
            if let Some(id) = *v.borrow() {
                ui.timers_mut().cancel(id);
            }
            let l = l.clone();
            ui.timers_mut().add_timer(0.0, move |_| {
                l.borrow_mut().push("scheduled");
                Ok(())
            });
            Ok(())
        });
        let l = log.clone();
        let id = ui.timers_mut().add_timer(0.1, move |_| {
            l.borrow_mut().push("victim");
            Ok(())
        });
        *victim.borrow_mut() = Some(id);

        ui.update(0.1)?;
        assert_eq!(*log.borrow(), vec!["first"]);
        ui.update(0.0)?;
        assert_eq!(*log.borrow(), vec!["first", "scheduled"]);
        Ok(())
    }

    #[test]
    fn updater_runs_until_cancelled() -> Result<()> {
        let mut ui = Ui::new(EngineConfig::default());
        let total = Rc::new(RefCell::new(0.0f32));
        let t = total.clone();
        let id = ui.timers_mut().add_updater(move |_, dt| {
            *t.borrow_mut() += dt;
            Ok(())
        });
        ui.update(0.5)?;
        ui.update(0.25)?;
        assert_eq!(*total.borrow(), 0.75);
        ui.timers_mut().cancel(id);
        ui.update(0.25)?;
        assert_eq!(*total.borrow(), 0.75);
        Ok(())
    }

    #[test]
    fn updater_may_cancel_itself() -> Result<()> {
        let mut ui = Ui::new(EngineConfig::default());
        let calls = Rc::new(RefCell::new(0));
        let c = calls.clone();
        let slot: Rc<RefCell<Option<TimerId>>> = Rc::new(RefCell::new(None));
        let s = slot.clone();
        let id = ui.timers_mut().add_updater(move |ui, _| {
            *c.borrow_mut() += 1;
            if let Some(id) = *s.borrow() {
                ui.timers_mut().cancel(id);
            }
            Ok(())
        });
        *slot.borrow_mut() = Some(id);
        ui.update(0.1)?;
        ui.update(0.1)?;
        assert_eq!(*calls.borrow(), 1);
        assert!(!ui.timers().is_running(id));
        Ok(())
    }
}
