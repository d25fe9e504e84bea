// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_picking --heading-base-level=0

//! Understory Picking: picking events and per-pointer picking state.
//!
//! ## Overview
//!
//! Hosts identify what is under the pointer with a [`GlobalId`] (for example by
//! reading a picking buffer or casting a ray). This crate does not perform that
//! lookup. Instead it turns a stream of raw input events, each paired with the
//! id under the pointer, into [`PickingEvent`]s that tell the target when the
//! pointer enters, moves over, presses, drags, releases and exits it.
//!
//! - [`event`]: raw [`Event`]s (mouse, wheel, gesture, touch) and the shared
//!   [`EventStatus`] handlers use to mark events used or visited.
//! - [`PickingEvent`]: the synthesized notification, carrying the raw event.
//! - [`fsm`]: [`PickingFsm`], one state machine per pointer stream.
//! - [`EventPropagator`] / [`PickingResolver`]: the two seams to the host.
//!
//! ## Press items
//!
//! Mouse buttons and touch contacts are folded into [`PickingPressItems`]:
//! left/right/middle map to primary/secondary/tertiary; touch pads report one
//! item by the number of pressed contacts; touch screens report the primary
//! item while any contact is down.
//!
//! ## Routing into views
//!
//! Screen partitioning and coordinate remapping live in
//! `understory_view_router`, which forwards remapped copies of these events
//! into views and re-targets picking events per view.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod event;
pub mod fsm;
mod picking_event;
mod propagator;
mod types;

pub use event::{
    Event, EventStatus, GestureEvent, GestureKind, GestureState, MouseButtons, MouseEvent,
    MouseState, ProcessorId, TouchDevice, TouchEvent, TouchPoint, TouchState, WheelEvent,
};
pub use fsm::{FsmInput, PickingFsm, PickingPhase};
pub use picking_event::{PickingEvent, PickingInfo};
pub use propagator::{EventPropagator, PickingResolver, Resolved};
pub use types::{
    ActionId, GlobalId, Ndc, PickingHoverState, PickingPressItem, PickingPressItems,
    PickingPressState, PickingState,
};
