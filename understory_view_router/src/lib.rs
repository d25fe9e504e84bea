// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_view_router --heading-base-level=0

//! Understory View Router: split one canvas into views and route events into them.
//!
//! A canvas is partitioned into rectangular [`View`]s, possibly overlapping,
//! held in priority order by a [`ViewRegistry`]. The registry hit tests
//! incoming [`understory_picking::Event`]s, remaps a copy of each into the
//! normalized space of its view, and hands it to a propagator together with
//! the view index.
//!
//! - [`View`]: an integer pixel rectangle with a half-open hit test.
//! - [`ViewTransform`] / [`remap`]: canvas-normalized to view-normalized
//!   coordinates, for positions and NDC.
//! - [`ViewRegistry`]: view list, hit testing, press/gesture/touch capture and
//!   dispatch. Picking events are re-targeted per view with their pressed and
//!   previous NDC remapped as well.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Size};
//! use understory_picking::{Event, TouchDevice, TouchEvent, TouchPoint, TouchState};
//! use understory_view_router::{View, ViewRegistry};
//!
//! let canvas = Size::new(200.0, 100.0);
//! let mut views = ViewRegistry::new();
//! views.push_view(View::new(0, 0, 100, 100));
//! views.push_view(View::new(100, 0, 100, 100));
//!
//! // One finger in each half.
//! let mut touch = Event::from(TouchEvent::new(
//!     vec![
//!         TouchPoint::new(1, TouchState::Started, Point::new(0.25, 0.5), canvas),
//!         TouchPoint::new(2, TouchState::Started, Point::new(0.75, 0.5), canvas),
//!     ],
//!     TouchDevice::TouchScreen,
//! ));
//!
//! // Only the left view consumes its contact.
//! let all_used = views.propagate(&mut touch, |e, view| {
//!     if view == 0 {
//!         e.mark_as_used();
//!     }
//! });
//! assert!(!all_used);
//! let Event::Touch(rest) = &touch else { unreachable!() };
//! assert_eq!(rest.points.len(), 1);
//! assert_eq!(rest.points[0].id, 2);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod registry;
mod remap;
mod view;

pub use registry::{OutOfRange, ViewRegistry};
pub use remap::{ViewTransform, remap};
pub use view::View;
