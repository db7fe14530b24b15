use std::result::Result as StdResult;

use thiserror::Error;

use crate::{geom, id::WidgetId};

/// Result type for arbor operations.
pub type Result<T> = StdResult<T, Error>;

/// Engine error type.
///
/// Contract violations surface as errors and propagate out of the frame loop. Callers are not
/// expected to recover from them mid-frame.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// The widget id is stale: it was never created or has been destroyed.
    #[error("widget not found: {0:?}")]
    WidgetNotFound(WidgetId),
    /// A parameter handle outlived its parameter.
    #[error("parameter not found")]
    ParamNotFound,
    /// The child already has a parent.
    #[error("widget already attached: {0:?}")]
    AlreadyAttached(WidgetId),
    /// Attaching would make a widget its own ancestor.
    #[error("attaching {child:?} to {parent:?} would create a cycle")]
    WouldCreateCycle {
        /// Prospective parent.
        parent: WidgetId,
        /// Prospective child.
        child: WidgetId,
    },
    /// Children were added to a widget that does not own children.
    #[error("widget does not accept children: {0:?}")]
    NotAContainer(WidgetId),
    /// Layout was requested for a widget that may only be used as the root.
    #[error("widget may only be laid out as the root: {0:?}")]
    RootOnly(WidgetId),
    /// The widget is already borrowed for dispatch further up the stack.
    #[error("widget is busy: {0:?}")]
    WidgetBusy(WidgetId),
    /// Typed access found a widget of another type.
    #[error("expected widget type {expected}")]
    TypeMismatch {
        /// Name of the requested type.
        expected: &'static str,
    },
    /// A transition was driven without a target or with a non-positive duration.
    #[error("transition: {0}")]
    Transition(String),
    /// Configuration could not be parsed or failed validation.
    #[error("config: {0}")]
    Config(String),
    /// The drawing backend reported a failure.
    #[error("backend: {0}")]
    Backend(String),
    /// Geometry could not be constructed.
    #[error("geometry: {0}")]
    Geometry(String),
    /// An operation was invalid in the current state.
    #[error("invalid: {0}")]
    Invalid(String),
}

impl From<geom::Error> for Error {
    fn from(e: geom::Error) -> Self {
        Self::Geometry(e.to_string())
    }
}
