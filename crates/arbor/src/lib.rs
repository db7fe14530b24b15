//! Arbor: a retained-mode UI engine.
//!
//! Arbor keeps a tree of widgets in an arena, lays them out with weighted stacked and grid
//! engines, animates any numeric property through typed parameters, and routes pointer and
//! keyboard input with hover, capture, focus, long-press and double-click tracking. Rendering goes
//! through a minimal [`DrawBackend`](backend::DrawBackend) trait.
//!
//! # Quick Start
//!
//! The main entry points are:
//! - [`Ui`] - The engine: widget arena, parameters, timers and the event router
//! - [`Widget`] - The trait implemented by all widgets
//! - [`anim::Animator`] - Parameters and transitions
//!
//! # Module Organization
//!
//! - [`geom`] - Geometry primitives (Point, Size, Rect, Transform, ...)
//! - [`layout`] - Pure layout engines and placement resolution
//! - [`widgets`] - Built-in containers and leaves
//! - [`modal`] - Modal dialogs over a root stack

#![warn(missing_docs)]

pub use arbor_geom as geom;

mod id;
mod ui;

pub mod anim;
pub mod backend;
pub mod compose;
pub mod config;
pub mod error;
pub mod event;
pub mod layout;
pub mod modal;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod timer;
pub mod widget;
pub mod widgets;

pub use config::EngineConfig;
pub use error::{Error, Result};
pub use id::{ListenerId, ParamId, TimerId, TypedId, WidgetId};
pub use ui::{OverlayFn, Ui};
pub use widget::{Ctx, EventOutcome, HitTest, ReadCtx, Widget};
