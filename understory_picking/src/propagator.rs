// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seams to the host: delivering events and resolving picking ids.
//!
//! Both traits have blanket implementations for closures, so tests and small
//! integrations can pass plain functions:
//!
//! ```
//! use understory_picking::{ActionId, Event, EventPropagator, GlobalId, PickingResolver, Resolved};
//!
//! let resolver = |id: GlobalId| match id.0 {
//!     1..=9 => Resolved::new(id.0 as usize - 1, ActionId(0)),
//!     _ => Resolved::NONE,
//! };
//! assert_eq!(resolver.resolve(GlobalId(3)).action, Some(ActionId(0)));
//! assert_eq!(resolver.resolve(GlobalId(42)).action, None);
//!
//! let mut seen = 0;
//! let mut propagator = |_: &mut Event| seen += 1;
//! propagator.propagate_event(&mut understory_picking::MouseEvent::default().into());
//! assert_eq!(seen, 1);
//! ```

use crate::event::Event;
use crate::types::{ActionId, GlobalId};

/// Delivers an event further down the host's handler graph.
///
/// Handlers consume an event by calling [`Event::mark_as_used`] and record
/// themselves through [`EventStatus::mark_as_visited`](crate::EventStatus::mark_as_visited).
pub trait EventPropagator {
    /// Delivers `event`.
    fn propagate_event(&mut self, event: &mut Event);
}

impl<F: FnMut(&mut Event)> EventPropagator for F {
    fn propagate_event(&mut self, event: &mut Event) {
        self(event);
    }
}

/// Result of resolving a global picking id.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Resolved {
    /// Index of the target within its action.
    pub index: usize,
    /// Bound action, if the id is registered.
    pub action: Option<ActionId>,
}

impl Resolved {
    /// An unresolved id.
    pub const NONE: Self = Self {
        index: 0,
        action: None,
    };

    /// A resolved id.
    pub const fn new(index: usize, action: ActionId) -> Self {
        Self {
            index,
            action: Some(action),
        }
    }
}

/// Maps global picking ids to host actions.
pub trait PickingResolver {
    /// Resolves `id`; unregistered ids yield [`Resolved::NONE`].
    fn resolve(&self, id: GlobalId) -> Resolved;
}

impl<F: Fn(GlobalId) -> Resolved> PickingResolver for F {
    fn resolve(&self, id: GlobalId) -> Resolved {
        self(id)
    }
}
