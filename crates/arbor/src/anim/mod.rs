//! Animatable parameters and the registry that drives their transitions.

/// Easing curves.
mod easing;
/// Interpolation of animatable values.
mod lerp;
/// Transitions and their builder.
mod transition;

use std::{
    any::{Any, type_name},
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    mem,
};

use slotmap::SlotMap;

pub use easing::Easing;
pub use lerp::{Lerp, Rgba};
pub use transition::{Transition, TransitionBuilder};

use crate::{
    error::{Error, Result},
    id::{ListenerId, ParamId},
};

/// Callback invoked with the new value whenever a parameter changes.
pub type Listener<T> = Box<dyn FnMut(&T, &mut Animator)>;

/// Typed handle to a parameter stored in an [`Animator`].
pub struct Param<T> {
    /// Untyped parameter id.
    id: ParamId,
    /// Marker for the value type.
    _marker: PhantomData<fn() -> T>,
}

impl<T> Param<T> {
    /// The untyped id.
    pub fn id(&self) -> ParamId {
        self.id
    }
}

impl<T> Clone for Param<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Param<T> {}

impl<T> PartialEq for Param<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Param<T> {}

impl<T> Hash for Param<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for Param<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Param<{}>({:?})", type_name::<T>(), self.id)
    }
}

/// Storage for one parameter.
struct Cell<T> {
    /// Current value.
    value: T,
    /// Change listeners, in registration order.
    listeners: Vec<(ListenerId, Listener<T>)>,
    /// The active transition, if any.
    transition: Option<Transition<T>>,
}

/// Type-erased slot in the registry.
struct Slot {
    /// A `Cell<T>` for the parameter's value type.
    cell: Box<dyn Any>,
    /// Changes to this parameter move a widget.
    placement: bool,
    /// Monomorphized tick function for the cell's value type.
    tick: fn(&mut Animator, ParamId, f32) -> Result<bool>,
    /// Monomorphized listener pruning for the cell's value type.
    prune: fn(&mut Animator, ParamId),
}

/// Registry of animatable parameters and the set of running transitions.
///
/// One `Animator` lives in each [`Ui`](crate::Ui). Parameters are addressed through typed
/// [`Param`] handles; a stale handle yields [`Error::ParamNotFound`].
#[derive(Default)]
pub struct Animator {
    /// Parameter storage.
    slots: SlotMap<ParamId, Slot>,
    /// Listener id allocation, mapped to the owning parameter.
    listener_ids: SlotMap<ListenerId, ParamId>,
    /// Parameters with a running transition, in arming order.
    active: Vec<ParamId>,
    /// A placement parameter changed since the router last looked.
    placement_dirty: bool,
}

impl Animator {
    /// Construct an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new parameter holding `value`.
    pub fn param<T: Lerp>(&mut self, value: T) -> Param<T> {
        self.insert(value, false)
    }

    /// Register a parameter whose changes invalidate widget placements.
    pub(crate) fn placement_param(&mut self, value: f32) -> Param<f32> {
        self.insert(value, true)
    }

    /// Insert a new slot.
    fn insert<T: Lerp>(&mut self, value: T, placement: bool) -> Param<T> {
        let id = self.slots.insert(Slot {
            cell: Box::new(Cell {
                value,
                listeners: Vec::new(),
                transition: None,
            }),
            placement,
            tick: Self::tick::<T>,
            prune: Self::prune::<T>,
        });
        Param {
            id,
            _marker: PhantomData,
        }
    }

    /// Remove a parameter, dropping its listeners and any running transition.
    pub fn remove<T>(&mut self, param: Param<T>) {
        self.remove_id(param.id);
    }

    /// Remove a parameter by untyped id. Removing twice is a no-op.
    pub fn remove_id(&mut self, id: ParamId) {
        if self.slots.remove(id).is_some() {
            self.listener_ids.retain(|_, owner| *owner != id);
            self.active.retain(|a| *a != id);
        }
    }

    /// Does the handle refer to a live parameter?
    pub fn contains<T>(&self, param: Param<T>) -> bool {
        self.slots.contains_key(param.id)
    }

    /// Number of live parameters.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Is the registry empty?
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Borrow a typed cell.
    fn cell<T: Lerp>(&self, id: ParamId) -> Result<&Cell<T>> {
        self.slots
            .get(id)
            .ok_or(Error::ParamNotFound)?
            .cell
            .downcast_ref::<Cell<T>>()
            .ok_or(Error::TypeMismatch {
                expected: type_name::<T>(),
            })
    }

    /// Mutably borrow a typed cell.
    fn cell_mut<T: Lerp>(&mut self, id: ParamId) -> Result<&mut Cell<T>> {
        self.slots
            .get_mut(id)
            .ok_or(Error::ParamNotFound)?
            .cell
            .downcast_mut::<Cell<T>>()
            .ok_or(Error::TypeMismatch {
                expected: type_name::<T>(),
            })
    }

    /// Current value of a parameter.
    pub fn get<T: Lerp>(&self, param: Param<T>) -> Result<T> {
        Ok(self.cell::<T>(param.id)?.value.clone())
    }

    /// Set a parameter directly. Any running transition is cancelled, and listeners fire only if the
    /// value changed.
    pub fn set<T: Lerp>(&mut self, param: Param<T>, value: T) -> Result<()> {
        self.stop(param)?;
        self.store(param.id, value)
    }

    /// Cancel the running transition on a parameter, leaving its value where it is.
    pub fn stop<T: Lerp>(&mut self, param: Param<T>) -> Result<()> {
        if self.cell_mut::<T>(param.id)?.transition.take().is_some() {
            self.active.retain(|a| *a != param.id);
        }
        Ok(())
    }

    /// Is a transition running on this parameter?
    pub fn is_animating<T: Lerp>(&self, param: Param<T>) -> bool {
        self.cell::<T>(param.id)
            .map(|c| c.transition.is_some())
            .unwrap_or(false)
    }

    /// Number of parameters with a running transition.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Arm a new transition on `param`, replacing any running one, and return its builder.
    ///
    /// The transition starts from the value the parameter holds now.
    pub fn transition<T: Lerp>(&mut self, param: Param<T>) -> Result<TransitionBuilder<'_, T>> {
        let cell = self.cell_mut::<T>(param.id)?;
        cell.transition = Some(Transition::new(cell.value.clone()));
        if !self.active.contains(&param.id) {
            self.active.push(param.id);
        }
        Ok(TransitionBuilder::new(self, param))
    }

    /// Borrow the armed transition for a parameter.
    pub(crate) fn transition_mut<T: Lerp>(&mut self, param: Param<T>) -> Option<&mut Transition<T>> {
        self.cell_mut::<T>(param.id).ok()?.transition.as_mut()
    }

    /// Register a change listener.
    pub fn add_change_listener<T: Lerp>(
        &mut self,
        param: Param<T>,
        listener: impl FnMut(&T, &mut Self) + 'static,
    ) -> Result<ListenerId> {
        self.cell::<T>(param.id)?;
        let lid = self.listener_ids.insert(param.id);
        self.cell_mut::<T>(param.id)?
            .listeners
            .push((lid, Box::new(listener)));
        Ok(lid)
    }

    /// Remove a change listener. Returns false if it was already gone.
    ///
    /// A listener removed while its parameter is notifying is skipped for the rest of that pass.
    pub fn remove_change_listener(&mut self, listener: ListenerId) -> bool {
        let Some(owner) = self.listener_ids.remove(listener) else {
            return false;
        };
        if let Some(prune) = self.slots.get(owner).map(|s| s.prune) {
            prune(self, owner);
        }
        true
    }

    /// Drop listeners whose ids have been released.
    fn prune<T: Lerp>(&mut self, id: ParamId) {
        let listener_ids = &self.listener_ids;
        if let Some(cell) = self
            .slots
            .get_mut(id)
            .and_then(|s| s.cell.downcast_mut::<Cell<T>>())
        {
            cell.listeners.retain(|(lid, _)| listener_ids.contains_key(*lid));
        }
    }

    /// Write a value without touching the transition, notifying listeners on change.
    fn store<T: Lerp>(&mut self, id: ParamId, value: T) -> Result<()> {
        let cell = self.cell_mut::<T>(id)?;
        if cell.value == value {
            return Ok(());
        }
        cell.value = value.clone();
        if self.slots.get(id).is_some_and(|s| s.placement) {
            self.placement_dirty = true;
        }
        self.notify(id, &value)
    }

    /// Run the listeners of `id` with `value`.
    ///
    /// Listeners are detached from the cell while they run so they may freely use the registry,
    /// including arming a transition on this same parameter.
    fn notify<T: Lerp>(&mut self, id: ParamId, value: &T) -> Result<()> {
        let mut listeners = mem::take(&mut self.cell_mut::<T>(id)?.listeners);
        if listeners.is_empty() {
            return Ok(());
        }
        for (lid, listener) in &mut listeners {
            if self.listener_ids.contains_key(*lid) {
                listener(value, self);
            }
        }
        let listener_ids = &self.listener_ids;
        listeners.retain(|(lid, _)| listener_ids.contains_key(*lid));
        if let Ok(cell) = self.cell_mut::<T>(id) {
            let added = mem::take(&mut cell.listeners);
            cell.listeners = listeners;
            cell.listeners.extend(added);
        }
        Ok(())
    }

    /// Advance the transition on `id`. Returns true when the parameter should leave the active set.
    fn tick<T: Lerp>(&mut self, id: ParamId, dt: f32) -> Result<bool> {
        let cell = self.cell_mut::<T>(id)?;
        let Some(transition) = cell.transition.as_mut() else {
            return Ok(true);
        };
        let step = transition.advance(dt).inspect_err(|e| {
            tracing::error!("transition on {id:?} failed: {e}");
        })?;
        if step.done {
            cell.transition = None;
            tracing::trace!("transition on {id:?} finished");
        }
        if let Some(value) = step.value {
            self.store(id, value)?;
        }
        Ok(step.done)
    }

    /// Advance every running transition by `dt` seconds.
    ///
    /// The active set is snapshotted first. Transitions armed by listeners during the pass are kept
    /// and first advance on the next call, unless they replaced a transition still waiting in the
    /// snapshot.
    pub fn update_all(&mut self, dt: f32) -> Result<()> {
        let snapshot = mem::take(&mut self.active);
        let mut running = Vec::with_capacity(snapshot.len());
        for id in snapshot {
            let Some(tick) = self.slots.get(id).map(|s| s.tick) else {
                continue;
            };
            if !tick(self, id, dt)? {
                running.push(id);
            }
        }
        for id in mem::take(&mut self.active) {
            if !running.contains(&id) {
                running.push(id);
            }
        }
        self.active = running;
        Ok(())
    }

    /// Report and clear the placement-changed flag.
    pub(crate) fn take_placement_dirty(&mut self) -> bool {
        mem::take(&mut self.placement_dirty)
    }
}
