// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered view list with hit testing and event dispatch.
//!
//! ## Routing rules
//!
//! - Mouse: while any button is held the view hit at the start of the press
//!   keeps receiving events, even when the pointer leaves it. Without held
//!   buttons every event is hit tested.
//! - Wheel: every event is hit tested.
//! - Gesture: the view hit when the gesture starts receives all its events,
//!   including the final `Finished` or `Canceled` one. Gesture events outside
//!   a started gesture are not routed.
//! - Touch: each contact is bound to the view it started in until it is
//!   lifted. Contacts are grouped per view and every group is delivered as its
//!   own touch event, in ascending view order.
//! - Picking: the wrapped raw event is routed by the rules above and each
//!   view receives a picking event rebuilt around its remapped copy.
//!
//! Every delivered event is a copy remapped into the view (see
//! [`ViewTransform`]); the `used` flag and visited processors of the copy are
//! folded back into the original afterwards.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;

use hashbrown::{HashMap, HashSet};
use kurbo::Point;
use tracing::{debug, trace};
use understory_picking::{
    Event, EventStatus, GestureEvent, GestureState, MouseEvent, PickingEvent, TouchEvent,
    TouchPoint, TouchState, WheelEvent,
};

use crate::remap::ViewTransform;
use crate::view::View;

/// Error returned when a view index is past the end of the registry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OutOfRange {
    /// The requested index.
    pub index: usize,
    /// Number of views at the time of the request.
    pub len: usize,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "view index {} is out of range for {} views",
            self.index, self.len
        )
    }
}

impl core::error::Error for OutOfRange {}

/// Receives each remapped copy along with its view index and transform.
type Sink<'a> = dyn FnMut(&mut Event, usize, &ViewTransform) + 'a;

/// Remembers the view an interaction started in until it ends.
#[derive(Copy, Clone, Debug, Default)]
struct Capture {
    active: bool,
    view: Option<usize>,
}

impl Capture {
    fn start(&mut self, view: Option<usize>) {
        self.active = true;
        self.view = view;
    }

    fn end(&mut self) -> Option<usize> {
        self.active = false;
        self.view.take()
    }
}

/// An ordered list of views that routes events into them.
///
/// Views are identified by their index. Lower indices take priority when
/// views overlap. Indices shift when a view is erased, so callers should not
/// hold on to them across mutation.
///
/// ```
/// use kurbo::{Point, Size};
/// use understory_picking::{Event, MouseButtons, MouseEvent, MouseState};
/// use understory_view_router::{View, ViewRegistry};
///
/// let mut views = ViewRegistry::new();
/// views.push_view(View::new(0, 0, 50, 100));
/// views.push_view(View::new(50, 0, 50, 100));
///
/// let mut event = Event::from(MouseEvent::new(
///     MouseButtons::empty(),
///     MouseState::Move,
///     MouseButtons::empty(),
///     Point::new(0.75, 0.5),
///     Size::new(100.0, 100.0),
/// ));
/// let mut hits = Vec::new();
/// assert!(views.propagate(&mut event, |_, index| hits.push(index)));
/// assert_eq!(hits, [1]);
/// assert_eq!(views.selected_view(), Some(1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ViewRegistry {
    views: Vec<View>,
    selected: Option<usize>,
    mouse: Capture,
    gesture: Capture,
    touches: HashMap<u64, usize>,
}

impl ViewRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a view with the lowest priority and returns its index.
    pub fn push_view(&mut self, view: View) -> usize {
        self.views.push(view);
        self.views.len() - 1
    }

    /// Removes every view equal to `view`. Returns `true` if any was removed.
    pub fn erase_view(&mut self, view: &View) -> bool {
        let before = self.views.len();
        self.views.retain(|v| v != view);
        self.views.len() != before
    }

    /// Removes the view at `index`, shifting later views down.
    ///
    /// Out-of-range indices are ignored and return `None`.
    pub fn erase(&mut self, index: usize) -> Option<View> {
        if index < self.views.len() {
            Some(self.views.remove(index))
        } else {
            None
        }
    }

    /// Replaces the view at `index` and returns the previous one.
    pub fn replace(&mut self, index: usize, view: View) -> Result<View, OutOfRange> {
        let len = self.views.len();
        let slot = self
            .views
            .get_mut(index)
            .ok_or(OutOfRange { index, len })?;
        Ok(core::mem::replace(slot, view))
    }

    /// Removes all views and forgets every ongoing interaction.
    pub fn clear(&mut self) {
        self.views.clear();
        self.selected = None;
        self.mouse = Capture::default();
        self.gesture = Capture::default();
        self.touches.clear();
    }

    /// Number of views.
    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Returns `true` if there are no views.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// The view at `index`.
    pub fn get(&self, index: usize) -> Result<&View, OutOfRange> {
        self.views.get(index).ok_or(OutOfRange {
            index,
            len: self.views.len(),
        })
    }

    /// Iterates views in priority order.
    pub fn iter(&self) -> core::slice::Iter<'_, View> {
        self.views.iter()
    }

    /// All views in priority order.
    pub fn views(&self) -> &[View] {
        &self.views
    }

    /// Index of the first view containing the canvas pixel position `pos`.
    pub fn find_view(&self, pos: Point) -> Option<usize> {
        self.views.iter().position(|v| v.contains(pos))
    }

    /// View chosen by the most recent mouse, wheel or gesture dispatch.
    pub fn selected_view(&self) -> Option<usize> {
        self.selected
    }

    /// Routes `event` into the views it belongs to.
    ///
    /// `propagator` is called with a remapped copy and the view index for
    /// every delivery. Returns `true` if the event was delivered; for touch
    /// events, only if every contact was consumed.
    pub fn propagate<F>(&mut self, event: &mut Event, mut propagator: F) -> bool
    where
        F: FnMut(&mut Event, usize),
    {
        match event {
            Event::Picking(pe) => self.propagate_picking(pe, &mut propagator),
            _ => self.propagate_raw(event, &mut |e, index, _| propagator(e, index)),
        }
    }

    fn propagate_picking(
        &mut self,
        pe: &mut PickingEvent,
        propagator: &mut dyn FnMut(&mut Event, usize),
    ) -> bool {
        let info = pe.info;
        let routed = match &mut *pe.event {
            Event::Picking(_) => {
                debug!("picking event wrapping a picking event is not routed");
                false
            }
            inner => self.propagate_raw(inner, &mut |sub, index, transform| {
                let mut info = info;
                info.pressed_ndc = transform.apply_ndc(info.pressed_ndc);
                info.previous_ndc = transform.apply_ndc(info.previous_ndc);
                let mut wrapped = Event::from(PickingEvent::new(info, sub.clone()));
                propagator(&mut wrapped, index);
                if let Event::Picking(w) = &wrapped {
                    sub.status_mut().absorb(w.event.status());
                    sub.status_mut().absorb(&w.status);
                }
            }),
        };
        pe.status.absorb(pe.event.status());
        routed
    }

    fn propagate_raw(&mut self, event: &mut Event, sink: &mut Sink<'_>) -> bool {
        match event {
            Event::Mouse(e) => self.propagate_mouse(e, sink),
            Event::Wheel(e) => self.propagate_wheel(e, sink),
            Event::Gesture(e) => self.propagate_gesture(e, sink),
            Event::Touch(e) => self.propagate_touch(e, sink),
            Event::Picking(_) => false,
        }
    }

    fn target(&self, index: Option<usize>) -> Option<(usize, View)> {
        let index = index?;
        self.views.get(index).map(|view| (index, *view))
    }

    fn propagate_mouse(&mut self, e: &mut MouseEvent, sink: &mut Sink<'_>) -> bool {
        let pos = e.pos();
        let held = !e.buttons.is_empty();
        if held && !self.mouse.active {
            self.mouse.start(self.find_view(pos));
        } else if !held && self.mouse.active {
            self.mouse.end();
        }
        self.selected = if self.mouse.active {
            self.mouse.view
        } else {
            self.find_view(pos)
        };

        let Some((index, view)) = self.target(self.selected) else {
            trace!(x = pos.x, y = pos.y, "mouse event hit no view");
            return false;
        };
        let transform = ViewTransform::new(&view, e.canvas_size);
        let mut sub = e.clone();
        sub.canvas_size = transform.view_size();
        sub.pos_normalized = transform.apply(e.pos_normalized);
        trace!(view = index, captured = self.mouse.active, "routing mouse event");
        deliver(sink, index, &transform, sub.into(), &mut e.status);
        true
    }

    fn propagate_wheel(&mut self, e: &mut WheelEvent, sink: &mut Sink<'_>) -> bool {
        let pos = e.pos();
        self.selected = self.find_view(pos);

        let Some((index, view)) = self.target(self.selected) else {
            trace!(x = pos.x, y = pos.y, "wheel event hit no view");
            return false;
        };
        let transform = ViewTransform::new(&view, e.canvas_size);
        let mut sub = e.clone();
        sub.canvas_size = transform.view_size();
        sub.pos_normalized = transform.apply(e.pos_normalized);
        trace!(view = index, "routing wheel event");
        deliver(sink, index, &transform, sub.into(), &mut e.status);
        true
    }

    fn propagate_gesture(&mut self, e: &mut GestureEvent, sink: &mut Sink<'_>) -> bool {
        self.selected = if e.state == GestureState::Started && !self.gesture.active {
            self.gesture.start(self.find_view(e.pos()));
            self.gesture.view
        } else if e.state.is_terminal() && self.gesture.active {
            self.gesture.end()
        } else {
            self.gesture.view
        };

        let Some((index, view)) = self.target(self.selected) else {
            trace!(state = ?e.state, "gesture event not routed");
            return false;
        };
        let transform = ViewTransform::new(&view, e.canvas_size);
        let mut sub = e.clone();
        sub.canvas_size = transform.view_size();
        sub.screen_pos_normalized = transform.apply(e.screen_pos_normalized);
        trace!(view = index, state = ?e.state, "routing gesture event");
        deliver(sink, index, &transform, sub.into(), &mut e.status);
        true
    }

    /// Looks up, binds or releases the view of one contact.
    fn touch_view(&mut self, point: &TouchPoint) -> Option<usize> {
        match point.state {
            TouchState::Started => {
                let hit = self.find_view(point.pos());
                if let Some(index) = hit {
                    self.touches.insert(point.id, index);
                }
                hit
            }
            TouchState::Finished => self.touches.remove(&point.id),
            TouchState::None | TouchState::Updated | TouchState::Stationary => {
                self.touches.get(&point.id).copied()
            }
        }
    }

    fn propagate_touch(&mut self, e: &mut TouchEvent, sink: &mut Sink<'_>) -> bool {
        if e.points.is_empty() {
            return false;
        }

        let mut groups: BTreeMap<usize, Vec<TouchPoint>> = BTreeMap::new();
        for point in &e.points {
            match self.touch_view(point) {
                Some(index) => groups.entry(index).or_default().push(point.clone()),
                None => debug!(id = point.id, state = ?point.state, "touch point has no view"),
            }
        }

        let canvas = e.canvas_size();
        let mut used: HashSet<u64> = HashSet::new();
        for (index, mut points) in groups {
            let Some((index, view)) = self.target(Some(index)) else {
                continue;
            };
            let transform = ViewTransform::new(&view, canvas);
            for p in &mut points {
                p.canvas_size = transform.view_size();
                p.pos_normalized = transform.apply(p.pos_normalized);
                p.prev_pos_normalized = transform.apply(p.prev_pos_normalized);
                p.pressed_pos_normalized = transform.apply(p.pressed_pos_normalized);
            }
            let ids: Vec<u64> = points.iter().map(|p| p.id).collect();

            trace!(view = index, points = ids.len(), "routing touch points");
            let mut sub = Event::from(TouchEvent::new(points, e.device));
            sink(&mut sub, index, &transform);
            e.status.merge_visited(sub.status());
            if sub.has_been_used() {
                used.extend(ids);
            }
        }

        e.points.retain(|p| !used.contains(&p.id));
        if e.points.is_empty() {
            e.status.mark_as_used();
        }
        e.points.is_empty()
    }
}

fn deliver(
    sink: &mut Sink<'_>,
    index: usize,
    transform: &ViewTransform,
    mut sub: Event,
    status: &mut EventStatus,
) {
    sink(&mut sub, index, transform);
    status.absorb(sub.status());
}

impl Index<usize> for ViewRegistry {
    type Output = View;

    fn index(&self, index: usize) -> &View {
        &self.views[index]
    }
}

impl<'a> IntoIterator for &'a ViewRegistry {
    type Item = &'a View;
    type IntoIter = core::slice::Iter<'a, View>;

    fn into_iter(self) -> Self::IntoIter {
        self.views.iter()
    }
}

impl FromIterator<View> for ViewRegistry {
    fn from_iter<I: IntoIterator<Item = View>>(iter: I) -> Self {
        Self {
            views: iter.into_iter().collect(),
            ..Self::default()
        }
    }
}
