// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synthesized picking notifications.

use alloc::boxed::Box;

use crate::event::{Event, EventStatus};
use crate::types::{
    ActionId, GlobalId, Ndc, PickingHoverState, PickingPressItem, PickingPressItems,
    PickingPressState, PickingState,
};

/// Everything a picking event reports besides the raw event it wraps.
///
/// This part is `Copy` so routers can rebuild a picking event around a
/// remapped inner event without cloning the original.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PickingInfo {
    /// Action bound to the picked target.
    pub action: ActionId,
    /// Index of the picked target within its action.
    pub picked_index: usize,
    /// Interaction phase with the picked target.
    pub state: PickingState,
    /// Press phase.
    pub press_state: PickingPressState,
    /// The item this event is about (pressed, released or held).
    pub press_item: PickingPressItem,
    /// Hover phase.
    pub hover_state: PickingHoverState,
    /// Items held when the event was emitted.
    pub press_items: PickingPressItems,
    /// Id of the target this event is for.
    pub global_id: GlobalId,
    /// Id currently under the pointer.
    pub current_global_id: GlobalId,
    /// Id that was under the pointer at press time.
    pub pressed_global_id: GlobalId,
    /// Id of the previously reported target.
    pub previous_global_id: GlobalId,
    /// NDC captured at press time.
    pub pressed_ndc: Ndc,
    /// NDC of the previously reported event.
    pub previous_ndc: Ndc,
}

/// A picking notification for one target, wrapping the raw event that caused it.
#[derive(Clone, Debug, PartialEq)]
pub struct PickingEvent {
    /// Reported picking information.
    pub info: PickingInfo,
    /// The raw event that caused this notification.
    pub event: Box<Event>,
    /// Propagation status.
    pub status: EventStatus,
}

impl PickingEvent {
    /// Creates a picking event around `event`.
    pub fn new(info: PickingInfo, event: Event) -> Self {
        Self {
            info,
            event: Box::new(event),
            status: EventStatus::default(),
        }
    }

    /// Action bound to the picked target.
    pub fn action(&self) -> ActionId {
        self.info.action
    }

    /// Index of the picked target within its action.
    pub fn picked_index(&self) -> usize {
        self.info.picked_index
    }

    /// Interaction phase.
    pub fn state(&self) -> PickingState {
        self.info.state
    }

    /// Press phase.
    pub fn press_state(&self) -> PickingPressState {
        self.info.press_state
    }

    /// The item this event is about.
    pub fn press_item(&self) -> PickingPressItem {
        self.info.press_item
    }

    /// Items held when the event was emitted.
    pub fn press_items(&self) -> PickingPressItems {
        self.info.press_items
    }

    /// Hover phase.
    pub fn hover_state(&self) -> PickingHoverState {
        self.info.hover_state
    }

    /// NDC of the wrapped raw event.
    pub fn ndc(&self) -> Ndc {
        self.event.ndc()
    }

    /// NDC captured at press time.
    pub fn pressed_ndc(&self) -> Ndc {
        self.info.pressed_ndc
    }

    /// NDC of the previously reported event.
    pub fn previous_ndc(&self) -> Ndc {
        self.info.previous_ndc
    }

    /// Returns `true` if this event reports `item` being pressed.
    pub fn is_press(&self, item: PickingPressItem) -> bool {
        self.info.press_state == PickingPressState::Press && self.info.press_item == item
    }

    /// Returns `true` if this event reports `item` being released.
    pub fn is_release(&self, item: PickingPressItem) -> bool {
        self.info.press_state == PickingPressState::Release && self.info.press_item == item
    }

    /// Marks the picking event as used.
    pub fn mark_as_used(&mut self) {
        self.status.mark_as_used();
    }

    /// Returns `true` once a handler marked the event as used.
    pub fn has_been_used(&self) -> bool {
        self.status.has_been_used()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{MouseButtons, MouseEvent, MouseState};
    use kurbo::{Point, Size};

    fn info() -> PickingInfo {
        PickingInfo {
            action: ActionId(3),
            picked_index: 1,
            state: PickingState::Updated,
            press_state: PickingPressState::Release,
            press_item: PickingPressItem::Secondary,
            hover_state: PickingHoverState::None,
            press_items: PickingPressItems::PRIMARY,
            global_id: GlobalId(5),
            current_global_id: GlobalId(5),
            pressed_global_id: GlobalId(5),
            previous_global_id: GlobalId(5),
            pressed_ndc: Ndc::ZERO,
            previous_ndc: Ndc::ZERO,
        }
    }

    #[test]
    fn ndc_comes_from_wrapped_event() {
        let raw = MouseEvent::new(
            MouseButtons::empty(),
            MouseState::Move,
            MouseButtons::empty(),
            Point::new(1.0, 0.0),
            Size::new(10.0, 10.0),
        )
        .with_depth(0.25);
        let pe = PickingEvent::new(info(), raw.into());
        assert_eq!(pe.ndc(), Ndc::new(1.0, -1.0, 0.25));
    }

    #[test]
    fn release_queries() {
        let pe = PickingEvent::new(info(), MouseEvent::default().into());
        assert!(pe.is_release(PickingPressItem::Secondary));
        assert!(!pe.is_release(PickingPressItem::Primary));
        assert!(!pe.is_press(PickingPressItem::Secondary));
    }
}
