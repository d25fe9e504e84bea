// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw interaction events and their shared propagation status.
//!
//! Host integrations translate platform input into one of the [`Event`]
//! variants. Every event carries an [`EventStatus`] that handlers use to mark
//! the event as used and to record which processors have seen it.
//!
//! Positions are stored normalized to `[0, 1]` over the canvas. The pixel
//! position of a normalized coordinate treats pixel extents as inclusive, so
//! a canvas of width `w` spans pixels `0..=w - 1`:
//!
//! ```
//! use kurbo::{Point, Size};
//! use understory_picking::event::pixel_position;
//!
//! let px = pixel_position(Point::new(0.5, 1.0), Size::new(201.0, 101.0));
//! assert_eq!(px, Point::new(100.0, 100.0));
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;

use kurbo::{Point, Size, Vec2};
use smallvec::SmallVec;

use crate::picking_event::PickingEvent;
use crate::types::{Ndc, PickingPressItems, PickingState};

/// Identifier of a processor (handler node) that an event has visited.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ProcessorId(pub u32);

/// Propagation bookkeeping shared by all event kinds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventStatus {
    used: bool,
    visited: SmallVec<[ProcessorId; 4]>,
}

impl EventStatus {
    /// Marks the event as used; later consumers should ignore it.
    pub fn mark_as_used(&mut self) {
        self.used = true;
    }

    /// Returns `true` once a handler marked the event as used.
    pub fn has_been_used(&self) -> bool {
        self.used
    }

    /// Records that `processor` has seen the event. Duplicates are ignored.
    pub fn mark_as_visited(&mut self, processor: ProcessorId) {
        if !self.visited.contains(&processor) {
            self.visited.push(processor);
        }
    }

    /// Returns `true` if `processor` has seen the event.
    pub fn has_visited(&self, processor: ProcessorId) -> bool {
        self.visited.contains(&processor)
    }

    /// Processors that have seen the event, in first-visit order.
    pub fn visited(&self) -> &[ProcessorId] {
        &self.visited
    }

    /// Copies the visited processors of `other` onto `self`.
    pub fn merge_visited(&mut self, other: &Self) {
        for &p in &other.visited {
            self.mark_as_visited(p);
        }
    }

    /// Copies both the used flag and the visited processors of `other` onto `self`.
    pub fn absorb(&mut self, other: &Self) {
        if other.used {
            self.used = true;
        }
        self.merge_visited(other);
    }
}

/// Converts a normalized position into canvas pixels (inclusive extents).
pub fn pixel_position(normalized: Point, canvas: Size) -> Point {
    Point::new(
        normalized.x * (canvas.width - 1.0),
        normalized.y * (canvas.height - 1.0),
    )
}

bitflags::bitflags! {
    /// Mouse buttons.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MouseButtons: u8 {
        /// Left button.
        const LEFT   = 0b0000_0001;
        /// Middle button.
        const MIDDLE = 0b0000_0010;
        /// Right button.
        const RIGHT  = 0b0000_0100;
    }
}

impl MouseButtons {
    /// Maps held buttons to press items: left → primary, right → secondary, middle → tertiary.
    pub fn press_items(self) -> PickingPressItems {
        let mut items = PickingPressItems::empty();
        if self.contains(Self::LEFT) {
            items |= PickingPressItems::PRIMARY;
        }
        if self.contains(Self::RIGHT) {
            items |= PickingPressItems::SECONDARY;
        }
        if self.contains(Self::MIDDLE) {
            items |= PickingPressItems::TERTIARY;
        }
        items
    }
}

/// What a mouse event reports about its button.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum MouseState {
    /// A button went down.
    Press,
    /// The pointer moved.
    #[default]
    Move,
    /// A button went up.
    Release,
    /// A button was double clicked.
    DoubleClick,
}

/// A single-pointer mouse event.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MouseEvent {
    /// The button this event is about (empty for plain moves).
    pub button: MouseButtons,
    /// What happened to `button`.
    pub state: MouseState,
    /// Buttons held after this event.
    pub buttons: MouseButtons,
    /// Position normalized to the canvas.
    pub pos_normalized: Point,
    /// Canvas size in pixels.
    pub canvas_size: Size,
    /// Depth under the pointer.
    pub depth: f64,
    /// Propagation status.
    pub status: EventStatus,
}

impl MouseEvent {
    /// Creates a mouse event with depth `1.0`.
    pub fn new(
        button: MouseButtons,
        state: MouseState,
        buttons: MouseButtons,
        pos_normalized: Point,
        canvas_size: Size,
    ) -> Self {
        Self {
            button,
            state,
            buttons,
            pos_normalized,
            canvas_size,
            depth: 1.0,
            status: EventStatus::default(),
        }
    }

    /// Sets the depth under the pointer.
    #[must_use]
    pub fn with_depth(mut self, depth: f64) -> Self {
        self.depth = depth;
        self
    }

    /// Position in canvas pixels.
    pub fn pos(&self) -> Point {
        pixel_position(self.pos_normalized, self.canvas_size)
    }

    /// Position in normalized device coordinates.
    pub fn ndc(&self) -> Ndc {
        Ndc::from_normalized(self.pos_normalized, self.depth)
    }
}

/// A scroll wheel event.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WheelEvent {
    /// Buttons held while scrolling.
    pub buttons: MouseButtons,
    /// Scroll amount.
    pub delta: Vec2,
    /// Position normalized to the canvas.
    pub pos_normalized: Point,
    /// Canvas size in pixels.
    pub canvas_size: Size,
    /// Depth under the pointer.
    pub depth: f64,
    /// Propagation status.
    pub status: EventStatus,
}

impl WheelEvent {
    /// Creates a wheel event with no held buttons and depth `1.0`.
    pub fn new(delta: Vec2, pos_normalized: Point, canvas_size: Size) -> Self {
        Self {
            buttons: MouseButtons::empty(),
            delta,
            pos_normalized,
            canvas_size,
            depth: 1.0,
            status: EventStatus::default(),
        }
    }

    /// Position in canvas pixels.
    pub fn pos(&self) -> Point {
        pixel_position(self.pos_normalized, self.canvas_size)
    }

    /// Position in normalized device coordinates.
    pub fn ndc(&self) -> Ndc {
        Ndc::from_normalized(self.pos_normalized, self.depth)
    }
}

/// Kind of a recognized gesture.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum GestureKind {
    /// Multi-finger pan.
    #[default]
    Pan,
    /// Two-finger pinch.
    Pinch,
    /// Swipe.
    Swipe,
}

/// Phase of a recognized gesture.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum GestureState {
    /// The gesture began.
    #[default]
    Started,
    /// The gesture is moving.
    Updated,
    /// The gesture ended.
    Finished,
    /// The platform abandoned the gesture.
    Canceled,
}

impl GestureState {
    /// Returns `true` for the phases that end a gesture.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Finished | Self::Canceled)
    }
}

/// A recognized gesture event.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureEvent {
    /// Gesture kind.
    pub kind: GestureKind,
    /// Gesture phase.
    pub state: GestureState,
    /// Movement of the gesture center since the last event.
    pub delta_pos: Vec2,
    /// Change of finger spread since the last event.
    pub delta_distance: f64,
    /// Number of fingers.
    pub num_fingers: u32,
    /// Gesture center normalized to the canvas.
    pub screen_pos_normalized: Point,
    /// Canvas size in pixels.
    pub canvas_size: Size,
    /// Depth under the gesture center.
    pub depth: f64,
    /// Propagation status.
    pub status: EventStatus,
}

impl GestureEvent {
    /// Creates a gesture event with no movement and depth `1.0`.
    pub fn new(
        kind: GestureKind,
        state: GestureState,
        num_fingers: u32,
        screen_pos_normalized: Point,
        canvas_size: Size,
    ) -> Self {
        Self {
            kind,
            state,
            delta_pos: Vec2::ZERO,
            delta_distance: 0.0,
            num_fingers,
            screen_pos_normalized,
            canvas_size,
            depth: 1.0,
            status: EventStatus::default(),
        }
    }

    /// Gesture center in canvas pixels.
    pub fn pos(&self) -> Point {
        pixel_position(self.screen_pos_normalized, self.canvas_size)
    }

    /// Gesture center in normalized device coordinates.
    pub fn ndc(&self) -> Ndc {
        Ndc::from_normalized(self.screen_pos_normalized, self.depth)
    }
}

/// Lifecycle of a touch point.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum TouchState {
    /// Unknown.
    #[default]
    None,
    /// The contact began this frame.
    Started,
    /// The contact moved.
    Updated,
    /// The contact did not move. On touch pads this means "pressed".
    Stationary,
    /// The contact was lifted.
    Finished,
}

/// One physical contact.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TouchPoint {
    /// Stable id for the lifetime of the contact.
    pub id: u64,
    /// Lifecycle state.
    pub state: TouchState,
    /// Position normalized to the canvas.
    pub pos_normalized: Point,
    /// Position of the previous frame, normalized.
    pub prev_pos_normalized: Point,
    /// Position where the contact started, normalized.
    pub pressed_pos_normalized: Point,
    /// Canvas size in pixels.
    pub canvas_size: Size,
    /// Contact pressure.
    pub pressure: f64,
    /// Depth under the contact.
    pub depth: f64,
}

impl TouchPoint {
    /// Creates a touch point that has not moved since it was pressed.
    pub fn new(id: u64, state: TouchState, pos_normalized: Point, canvas_size: Size) -> Self {
        Self {
            id,
            state,
            pos_normalized,
            prev_pos_normalized: pos_normalized,
            pressed_pos_normalized: pos_normalized,
            canvas_size,
            pressure: 0.0,
            depth: 1.0,
        }
    }

    /// Sets the previous-frame position.
    #[must_use]
    pub fn with_prev_pos_normalized(mut self, pos: Point) -> Self {
        self.prev_pos_normalized = pos;
        self
    }

    /// Sets the position where the contact started.
    #[must_use]
    pub fn with_pressed_pos_normalized(mut self, pos: Point) -> Self {
        self.pressed_pos_normalized = pos;
        self
    }

    /// Sets the depth under the contact.
    #[must_use]
    pub fn with_depth(mut self, depth: f64) -> Self {
        self.depth = depth;
        self
    }

    /// Position in canvas pixels.
    pub fn pos(&self) -> Point {
        pixel_position(self.pos_normalized, self.canvas_size)
    }

    /// Position in normalized device coordinates.
    pub fn ndc(&self) -> Ndc {
        Ndc::from_normalized(self.pos_normalized, self.depth)
    }
}

/// Source device of a touch event.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum TouchDevice {
    /// Direct touch screen: every contact counts as pressed.
    #[default]
    TouchScreen,
    /// Indirect touch pad: only stationary contacts count as pressed.
    TouchPad,
}

/// A multi-touch event with zero or more contacts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TouchEvent {
    /// Contacts in this frame.
    pub points: Vec<TouchPoint>,
    /// Source device.
    pub device: TouchDevice,
    /// Propagation status.
    pub status: EventStatus,
}

impl TouchEvent {
    /// Creates a touch event.
    pub fn new(points: Vec<TouchPoint>, device: TouchDevice) -> Self {
        Self {
            points,
            device,
            status: EventStatus::default(),
        }
    }

    /// Canvas size of the first contact, or zero without contacts.
    pub fn canvas_size(&self) -> Size {
        self.points.first().map_or(Size::ZERO, |p| p.canvas_size)
    }

    /// Mean NDC over all contacts, [`Ndc::ZERO`] without contacts.
    pub fn center_ndc(&self) -> Ndc {
        if self.points.is_empty() {
            return Ndc::ZERO;
        }
        let mut sum = Ndc::ZERO;
        for p in &self.points {
            let ndc = p.ndc();
            sum.x += ndc.x;
            sum.y += ndc.y;
            sum.depth += ndc.depth;
        }
        let n = self.points.len() as f64;
        Ndc::new(sum.x / n, sum.y / n, sum.depth / n)
    }

    /// Summarizes the contacts as a picking phase.
    ///
    /// Empty → `None`; all started → `Started`; all finished → `Finished`;
    /// anything else → `Updated`.
    pub fn picking_state(&self) -> PickingState {
        if self.points.is_empty() {
            PickingState::None
        } else if self.points.iter().all(|p| p.state == TouchState::Started) {
            PickingState::Started
        } else if self.points.iter().all(|p| p.state == TouchState::Finished) {
            PickingState::Finished
        } else {
            PickingState::Updated
        }
    }

    /// Returns `true` if `point` counts as pressed on this event's device.
    pub fn is_pressed(&self, point: &TouchPoint) -> bool {
        match self.device {
            TouchDevice::TouchPad => point.state == TouchState::Stationary,
            TouchDevice::TouchScreen => point.state != TouchState::Finished,
        }
    }

    /// Press items held by the contacts.
    ///
    /// Touch pads report one item by the number of pressed contacts
    /// (1 → primary, 2 → secondary, 3+ → tertiary). Touch screens report the
    /// primary item while any contact is down.
    pub fn press_items(&self) -> PickingPressItems {
        let pressed = self.points.iter().filter(|p| self.is_pressed(p)).count();
        match (self.device, pressed) {
            (_, 0) => PickingPressItems::empty(),
            (TouchDevice::TouchScreen, _) | (TouchDevice::TouchPad, 1) => {
                PickingPressItems::PRIMARY
            }
            (TouchDevice::TouchPad, 2) => PickingPressItems::SECONDARY,
            (TouchDevice::TouchPad, _) => PickingPressItems::TERTIARY,
        }
    }
}

/// Any event routed by this crate family.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Mouse press, move or release.
    Mouse(MouseEvent),
    /// Scroll wheel.
    Wheel(WheelEvent),
    /// Recognized gesture.
    Gesture(GestureEvent),
    /// Multi-touch frame.
    Touch(TouchEvent),
    /// Synthesized picking notification wrapping a raw event.
    Picking(Box<PickingEvent>),
}

impl Event {
    /// Propagation status of this event.
    pub fn status(&self) -> &EventStatus {
        match self {
            Self::Mouse(e) => &e.status,
            Self::Wheel(e) => &e.status,
            Self::Gesture(e) => &e.status,
            Self::Touch(e) => &e.status,
            Self::Picking(e) => &e.status,
        }
    }

    /// Mutable propagation status of this event.
    pub fn status_mut(&mut self) -> &mut EventStatus {
        match self {
            Self::Mouse(e) => &mut e.status,
            Self::Wheel(e) => &mut e.status,
            Self::Gesture(e) => &mut e.status,
            Self::Touch(e) => &mut e.status,
            Self::Picking(e) => &mut e.status,
        }
    }

    /// Marks the event as used.
    pub fn mark_as_used(&mut self) {
        self.status_mut().mark_as_used();
    }

    /// Returns `true` once a handler marked the event as used.
    pub fn has_been_used(&self) -> bool {
        self.status().has_been_used()
    }

    /// Canvas size the event's positions are normalized against.
    pub fn canvas_size(&self) -> Size {
        match self {
            Self::Mouse(e) => e.canvas_size,
            Self::Wheel(e) => e.canvas_size,
            Self::Gesture(e) => e.canvas_size,
            Self::Touch(e) => e.canvas_size(),
            Self::Picking(e) => e.event.canvas_size(),
        }
    }

    /// Representative position in normalized device coordinates.
    pub fn ndc(&self) -> Ndc {
        match self {
            Self::Mouse(e) => e.ndc(),
            Self::Wheel(e) => e.ndc(),
            Self::Gesture(e) => e.ndc(),
            Self::Touch(e) => e.center_ndc(),
            Self::Picking(e) => e.event.ndc(),
        }
    }

    /// Press items held in this event.
    pub fn press_items(&self) -> PickingPressItems {
        match self {
            Self::Mouse(e) => e.buttons.press_items(),
            Self::Wheel(e) => e.buttons.press_items(),
            Self::Gesture(_) => PickingPressItems::empty(),
            Self::Touch(e) => e.press_items(),
            Self::Picking(e) => e.event.press_items(),
        }
    }

    /// NDC of the first pressed position, falling back to [`Event::ndc`].
    pub fn press_ndc(&self) -> Ndc {
        match self {
            Self::Touch(e) => e
                .points
                .iter()
                .find(|p| e.is_pressed(p))
                .map_or_else(|| e.center_ndc(), TouchPoint::ndc),
            _ => self.ndc(),
        }
    }
}

impl From<MouseEvent> for Event {
    fn from(e: MouseEvent) -> Self {
        Self::Mouse(e)
    }
}

impl From<WheelEvent> for Event {
    fn from(e: WheelEvent) -> Self {
        Self::Wheel(e)
    }
}

impl From<GestureEvent> for Event {
    fn from(e: GestureEvent) -> Self {
        Self::Gesture(e)
    }
}

impl From<TouchEvent> for Event {
    fn from(e: TouchEvent) -> Self {
        Self::Touch(e)
    }
}

impl From<PickingEvent> for Event {
    fn from(e: PickingEvent) -> Self {
        Self::Picking(Box::new(e))
    }
}
