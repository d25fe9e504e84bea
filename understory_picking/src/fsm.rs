// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-pointer picking state machine.
//!
//! A [`PickingFsm`] follows one pointer stream and turns it into
//! [`PickingEvent`]s for the target under the pointer. It tracks at most one
//! active target, so a stream never reports two `Enter`s without an `Exit`
//! in between.
//!
//! ## States
//!
//! - [`PickingPhase::Idle`]: nothing is targeted.
//! - [`PickingPhase::HasTarget`]: hovering a target with nothing pressed.
//! - [`PickingPhase::Pressing`]: a press started on the active target; the
//!   target stays captured until every press item is released.
//! - [`PickingPhase::PressingOutside`]: a press started over empty space; no
//!   target is reported until the press ends.
//!
//! ## Layering
//!
//! [`transition`] is a pure function from the current phase and a [`Step`]
//! to the next phase plus a list of [`Effect`]s. [`PickingFsm::process`]
//! computes the step from the incoming event, applies the effects, and
//! emits through an [`EventPropagator`]. Emission needs the active id to
//! resolve to an action via the [`PickingResolver`]; otherwise the
//! transition still happens and nothing is emitted.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Size};
//! use understory_picking::{
//!     ActionId, Event, GlobalId, MouseButtons, MouseEvent, MouseState, PickingFsm,
//!     PickingHoverState, PickingPhase, Resolved,
//! };
//!
//! let resolver = |id: GlobalId| Resolved::new(0, ActionId(id.0 as u32));
//! let mut fsm = PickingFsm::new();
//! let mut hovers = Vec::new();
//! let mut record = |e: &mut Event| {
//!     if let Event::Picking(pe) = e {
//!         hovers.push(pe.hover_state());
//!     }
//! };
//!
//! let mut over = Event::from(MouseEvent::new(
//!     MouseButtons::empty(),
//!     MouseState::Move,
//!     MouseButtons::empty(),
//!     Point::new(0.5, 0.5),
//!     Size::new(100.0, 100.0),
//! ));
//! fsm.propagate_event(GlobalId(5), &mut over, &mut record, &resolver);
//! assert_eq!(fsm.phase(), PickingPhase::HasTarget);
//!
//! fsm.propagate_event(GlobalId::VOID, &mut over, &mut record, &resolver);
//! assert_eq!(fsm.phase(), PickingPhase::Idle);
//! assert_eq!(hovers, [PickingHoverState::Enter, PickingHoverState::Exit]);
//! ```

use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::event::Event;
use crate::picking_event::{PickingEvent, PickingInfo};
use crate::propagator::{EventPropagator, PickingResolver};
use crate::types::{
    GlobalId, Ndc, PickingHoverState, PickingPressItem, PickingPressItems, PickingPressState,
    PickingState,
};

/// State of a [`PickingFsm`].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum PickingPhase {
    /// Nothing is targeted.
    #[default]
    Idle,
    /// Hovering the active target.
    HasTarget,
    /// Pressing the active target.
    Pressing,
    /// Pressing over empty space.
    PressingOutside,
}

impl PickingPhase {
    /// Returns `true` for the phases that hold press items.
    pub fn is_pressing(self) -> bool {
        matches!(self, Self::Pressing | Self::PressingOutside)
    }
}

/// Lifecycle input of a pointer stream.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FsmInput {
    /// The stream began.
    Started,
    /// The stream continues.
    Updated,
    /// The stream ended.
    Finished,
}

impl FsmInput {
    /// Maps a picking phase to an input; [`PickingState::None`] has none.
    pub fn from_picking_state(state: PickingState) -> Option<Self> {
        match state {
            PickingState::None => None,
            PickingState::Started => Some(Self::Started),
            PickingState::Updated => Some(Self::Updated),
            PickingState::Finished => Some(Self::Finished),
        }
    }
}

/// The currently active target of a stream.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct FsmState {
    /// Active global id, [`GlobalId::VOID`] when nothing is targeted.
    pub active: GlobalId,
}

/// The previously reported target, used to fill `previous_*` fields.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PreviousFsmState {
    /// Last reported active id.
    pub global_id: GlobalId,
    /// NDC of the event that reported it.
    pub ndc: Ndc,
}

/// What was under the pointer when the current press began.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PressFsmState {
    /// Id under the pointer at press time.
    pub global_id: GlobalId,
    /// NDC at press time.
    pub ndc: Ndc,
    /// Press items currently tracked as held.
    pub items: PickingPressItems,
}

/// How the incoming id relates to the active one.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum IdMatch {
    /// Non-void and equal to the active id.
    Same,
    /// Non-void and different from the active id.
    Different,
    /// Void.
    Void,
}

impl IdMatch {
    /// Classifies `incoming` against `active`.
    pub fn classify(active: GlobalId, incoming: GlobalId) -> Self {
        if incoming.is_void() {
            Self::Void
        } else if incoming == active {
            Self::Same
        } else {
            Self::Different
        }
    }
}

/// Guard inputs for one transition.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Step {
    /// Lifecycle input.
    pub input: FsmInput,
    /// Incoming id relative to the active one.
    pub id: IdMatch,
    /// Items held in the incoming event.
    pub held: PickingPressItems,
    /// Items tracked as held before this event.
    pub tracked: PickingPressItems,
}

/// Description of one picking event to emit.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Emit {
    /// Interaction phase.
    pub state: PickingState,
    /// Press phase.
    pub press_state: PickingPressState,
    /// Hover phase.
    pub hover_state: PickingHoverState,
    /// Reported press item.
    pub press_item: PickingPressItem,
    /// Store the active id and event NDC as "previous" afterwards.
    pub update_previous: bool,
    /// Let a used picking event mark the raw event as used.
    pub mark_as_used: bool,
}

impl Emit {
    const fn new(state: PickingState, press: PickingPressState, hover: PickingHoverState) -> Self {
        Self {
            state,
            press_state: press,
            hover_state: hover,
            press_item: PickingPressItem::None,
            update_previous: true,
            mark_as_used: true,
        }
    }

    const fn item(mut self, item: PickingPressItem) -> Self {
        self.press_item = item;
        self
    }

    /// The exit that precedes entering another target in the same frame.
    const fn quiet(mut self, update_previous: bool) -> Self {
        self.update_previous = update_previous;
        self.mark_as_used = false;
        self
    }
}

/// A side effect of a transition, applied in order.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Effect {
    /// Make the incoming id the active one.
    SetActive,
    /// Clear the active id.
    ClearActive,
    /// Record id, NDC and held items of the incoming event as the press.
    CapturePress,
    /// Update the tracked press items to the held ones.
    TrackPressItems,
    /// Emit a picking event for the active id.
    Emit(Emit),
}

/// Result of [`transition`].
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    /// Phase after the transition.
    pub next: PickingPhase,
    /// Effects to apply, in order.
    pub effects: SmallVec<[Effect; 4]>,
}

impl Transition {
    fn to(next: PickingPhase, effects: &[Effect]) -> Self {
        Self {
            next,
            effects: SmallVec::from_slice(effects),
        }
    }
}

fn pressed_item(step: &Step) -> PickingPressItem {
    let newly = step.held - step.tracked;
    if newly.is_empty() {
        step.held.highest()
    } else {
        newly.highest()
    }
}

fn released_item(step: &Step) -> PickingPressItem {
    let released = step.tracked - step.held;
    if released.is_empty() {
        step.tracked.highest()
    } else {
        released.highest()
    }
}

/// Computes the next phase and the effects for `step` in `phase`.
///
/// Pairs without an entry in the table leave the phase unchanged and have no
/// effects. A `Started` input outside `Idle` is handled like `Updated`.
#[must_use]
pub fn transition(phase: PickingPhase, step: Step) -> Transition {
    use Effect::{CapturePress, ClearActive, SetActive, TrackPressItems};
    use FsmInput::{Finished, Started, Updated};
    use PickingHoverState as H;
    use PickingPhase::{HasTarget, Idle, Pressing, PressingOutside};
    use PickingPressState as P;
    use PickingState as S;

    let no_press = step.held.is_empty();
    let emit = |e: Emit| Effect::Emit(e);

    match (phase, step.input) {
        (Idle, Started) => match (step.id, no_press) {
            (IdMatch::Void, true) => Transition::to(Idle, &[]),
            (IdMatch::Void, false) => Transition::to(PressingOutside, &[TrackPressItems]),
            (_, true) => Transition::to(
                HasTarget,
                &[SetActive, emit(Emit::new(S::Started, P::None, H::Enter))],
            ),
            (_, false) => Transition::to(
                Pressing,
                &[
                    SetActive,
                    CapturePress,
                    emit(Emit::new(S::Started, P::Press, H::Enter).item(pressed_item(&step))),
                ],
            ),
        },
        (Idle, Updated | Finished) => Transition::to(Idle, &[]),

        (HasTarget, Started | Updated) => match (step.id, no_press) {
            (IdMatch::Same, true) => {
                Transition::to(HasTarget, &[emit(Emit::new(S::Updated, P::None, H::Move))])
            }
            (IdMatch::Void, true) => Transition::to(
                Idle,
                &[emit(Emit::new(S::Finished, P::None, H::Exit)), ClearActive],
            ),
            (IdMatch::Different, true) => Transition::to(
                HasTarget,
                &[
                    emit(Emit::new(S::Finished, P::None, H::Exit).quiet(false)),
                    SetActive,
                    emit(Emit::new(S::Started, P::None, H::Enter)),
                ],
            ),
            (IdMatch::Same, false) => Transition::to(
                Pressing,
                &[
                    CapturePress,
                    emit(Emit::new(S::Updated, P::Press, H::None).item(pressed_item(&step))),
                ],
            ),
            (IdMatch::Different, false) => Transition::to(
                Pressing,
                &[
                    emit(Emit::new(S::Finished, P::None, H::Exit).quiet(false)),
                    CapturePress,
                    SetActive,
                    emit(Emit::new(S::Updated, P::Press, H::Enter).item(pressed_item(&step))),
                ],
            ),
            // A press over empty space while hovering is not matched.
            (IdMatch::Void, false) => Transition::to(HasTarget, &[]),
        },
        (HasTarget, Finished) => Transition::to(
            Idle,
            &[emit(Emit::new(S::Finished, P::None, H::Exit)), ClearActive],
        ),

        (Pressing, Started | Updated) => match (step.id, no_press) {
            (IdMatch::Same, true) => Transition::to(
                HasTarget,
                &[emit(
                    Emit::new(S::Updated, P::Release, H::None).item(released_item(&step)),
                )],
            ),
            (IdMatch::Void, true) => Transition::to(
                Idle,
                &[
                    emit(Emit::new(S::Finished, P::Release, H::Exit).item(released_item(&step))),
                    ClearActive,
                ],
            ),
            (IdMatch::Different, true) => Transition::to(
                HasTarget,
                &[
                    emit(
                        Emit::new(S::Finished, P::Release, H::Exit)
                            .item(released_item(&step))
                            .quiet(true),
                    ),
                    SetActive,
                    emit(Emit::new(S::Started, P::None, H::Enter)),
                ],
            ),
            (_, false) => {
                let released = step.tracked - step.held;
                let pressed = step.held - step.tracked;
                let release = Emit::new(S::Updated, P::Release, H::None);
                let press = Emit::new(S::Updated, P::Press, H::None);
                match (released.is_empty(), pressed.is_empty()) {
                    (true, true) => Transition::to(
                        Pressing,
                        &[
                            emit(
                                Emit::new(S::Updated, P::Move, H::Move)
                                    .item(step.held.highest()),
                            ),
                            TrackPressItems,
                        ],
                    ),
                    (false, true) => Transition::to(
                        Pressing,
                        &[emit(release.item(released.highest())), TrackPressItems],
                    ),
                    (true, false) => Transition::to(
                        Pressing,
                        &[emit(press.item(pressed.highest())), TrackPressItems],
                    ),
                    // One item swapped for another, as when a touch pad goes
                    // from two contacts to one.
                    (false, false) => Transition::to(
                        Pressing,
                        &[
                            emit(release.item(released.highest())),
                            emit(press.item(pressed.highest())),
                            TrackPressItems,
                        ],
                    ),
                }
            }
        },
        (Pressing, Finished) => Transition::to(
            Idle,
            &[
                emit(Emit::new(S::Finished, P::Release, H::Exit).item(released_item(&step))),
                ClearActive,
            ],
        ),

        (PressingOutside, Started | Updated) => match (step.id, no_press) {
            (IdMatch::Void, true) => Transition::to(Idle, &[]),
            (_, true) => Transition::to(
                HasTarget,
                &[SetActive, emit(Emit::new(S::Started, P::None, H::Enter))],
            ),
            (_, false) => Transition::to(PressingOutside, &[TrackPressItems]),
        },
        (PressingOutside, Finished) => Transition::to(Idle, &[]),
    }
}

/// Picking state machine for one pointer stream.
#[derive(Clone, Debug, Default)]
pub struct PickingFsm {
    phase: PickingPhase,
    state: FsmState,
    previous: PreviousFsmState,
    press: PressFsmState,
}

impl PickingFsm {
    /// Creates an idle state machine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> PickingPhase {
        self.phase
    }

    /// Currently active target.
    pub fn active(&self) -> GlobalId {
        self.state.active
    }

    /// Previously reported target.
    pub fn previous(&self) -> PreviousFsmState {
        self.previous
    }

    /// Press record; empty outside the pressing phases.
    pub fn press(&self) -> PressFsmState {
        self.press
    }

    /// Feeds `event` with the lifecycle input derived from it.
    ///
    /// Touch events use [`TouchEvent::picking_state`](crate::TouchEvent::picking_state)
    /// and are ignored when it is `None`. Other raw events feed `Started`
    /// while idle and `Updated` otherwise. Picking events are ignored.
    pub fn propagate_event<P, R>(
        &mut self,
        global_id: GlobalId,
        event: &mut Event,
        propagator: &mut P,
        resolver: &R,
    ) where
        P: EventPropagator + ?Sized,
        R: PickingResolver + ?Sized,
    {
        let input = match event {
            Event::Touch(te) => FsmInput::from_picking_state(te.picking_state()),
            Event::Picking(_) => None,
            Event::Mouse(_) | Event::Wheel(_) | Event::Gesture(_) => {
                if self.phase == PickingPhase::Idle {
                    Some(FsmInput::Started)
                } else {
                    Some(FsmInput::Updated)
                }
            }
        };
        if let Some(input) = input {
            self.process(input, global_id, event, propagator, resolver);
        }
    }

    /// Feeds one lifecycle `input` for the target `global_id` under the pointer.
    pub fn process<P, R>(
        &mut self,
        input: FsmInput,
        global_id: GlobalId,
        event: &mut Event,
        propagator: &mut P,
        resolver: &R,
    ) where
        P: EventPropagator + ?Sized,
        R: PickingResolver + ?Sized,
    {
        let step = Step {
            input,
            id: IdMatch::classify(self.state.active, global_id),
            held: event.press_items(),
            tracked: self.press.items,
        };
        let from = self.phase;
        let Transition { next, effects } = transition(from, step);
        trace!(
            from = ?from,
            to = ?next,
            ?input,
            id = global_id.0,
            active = self.state.active.0,
            "picking transition"
        );

        for effect in effects {
            match effect {
                Effect::SetActive => self.state.active = global_id,
                Effect::ClearActive => self.state.active = GlobalId::VOID,
                Effect::CapturePress => {
                    self.press = PressFsmState {
                        global_id,
                        ndc: event.press_ndc(),
                        items: step.held,
                    };
                }
                Effect::TrackPressItems => self.press.items = step.held,
                Effect::Emit(emit) => self.emit(emit, global_id, event, propagator, resolver),
            }
        }

        if next != from && !next.is_pressing() {
            self.press = PressFsmState::default();
        }
        self.phase = next;
    }

    fn emit<P, R>(
        &mut self,
        emit: Emit,
        current: GlobalId,
        event: &mut Event,
        propagator: &mut P,
        resolver: &R,
    ) where
        P: EventPropagator + ?Sized,
        R: PickingResolver + ?Sized,
    {
        let active = self.state.active;
        let resolved = resolver.resolve(active);
        let Some(action) = resolved.action else {
            debug!(id = active.0, "no picking action for active id; nothing emitted");
            return;
        };

        let info = PickingInfo {
            action,
            picked_index: resolved.index,
            state: emit.state,
            press_state: emit.press_state,
            press_item: emit.press_item,
            hover_state: emit.hover_state,
            press_items: event.press_items(),
            global_id: active,
            current_global_id: current,
            pressed_global_id: self.press.global_id,
            previous_global_id: self.previous.global_id,
            pressed_ndc: self.press.ndc,
            previous_ndc: self.previous.ndc,
        };
        let mut picking = Event::from(PickingEvent::new(info, event.clone()));
        propagator.propagate_event(&mut picking);

        if emit.mark_as_used && picking.has_been_used() {
            event.mark_as_used();
        }
        event.status_mut().merge_visited(picking.status());

        if emit.update_previous {
            self.previous = PreviousFsmState {
                global_id: active,
                ndc: event.ndc(),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(input: FsmInput, id: IdMatch, held: PickingPressItems) -> Step {
        Step {
            input,
            id,
            held,
            tracked: PickingPressItems::empty(),
        }
    }

    fn emits(t: &Transition) -> SmallVec<[Emit; 4]> {
        t.effects
            .iter()
            .filter_map(|e| match e {
                Effect::Emit(emit) => Some(*emit),
                _ => None,
            })
            .collect()
    }

    const NONE: PickingPressItems = PickingPressItems::empty();
    const PRIMARY: PickingPressItems = PickingPressItems::PRIMARY;

    #[test]
    fn idle_started_without_target_or_press_stays_idle() {
        let t = transition(
            PickingPhase::Idle,
            step(FsmInput::Started, IdMatch::Void, NONE),
        );
        assert_eq!(t.next, PickingPhase::Idle);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn idle_ignores_updates_and_finish() {
        for input in [FsmInput::Updated, FsmInput::Finished] {
            let t = transition(PickingPhase::Idle, step(input, IdMatch::Different, PRIMARY));
            assert_eq!(t.next, PickingPhase::Idle);
            assert!(t.effects.is_empty());
        }
    }

    #[test]
    fn idle_press_on_target_captures_and_enters() {
        let t = transition(
            PickingPhase::Idle,
            step(FsmInput::Started, IdMatch::Different, PRIMARY),
        );
        assert_eq!(t.next, PickingPhase::Pressing);
        assert_eq!(t.effects[0], Effect::SetActive);
        assert_eq!(t.effects[1], Effect::CapturePress);
        let e = emits(&t);
        assert_eq!(e.len(), 1);
        assert_eq!(e[0].state, PickingState::Started);
        assert_eq!(e[0].press_state, PickingPressState::Press);
        assert_eq!(e[0].hover_state, PickingHoverState::Enter);
        assert_eq!(e[0].press_item, PickingPressItem::Primary);
    }

    #[test]
    fn idle_press_on_void_goes_outside_silently() {
        let t = transition(
            PickingPhase::Idle,
            step(FsmInput::Started, IdMatch::Void, PRIMARY),
        );
        assert_eq!(t.next, PickingPhase::PressingOutside);
        assert!(emits(&t).is_empty());
    }

    #[test]
    fn switching_targets_exits_quietly_then_enters() {
        let t = transition(
            PickingPhase::HasTarget,
            step(FsmInput::Updated, IdMatch::Different, NONE),
        );
        assert_eq!(t.next, PickingPhase::HasTarget);
        let e = emits(&t);
        assert_eq!(e.len(), 2);
        assert_eq!(e[0].hover_state, PickingHoverState::Exit);
        assert!(!e[0].mark_as_used);
        assert!(!e[0].update_previous);
        assert_eq!(e[1].hover_state, PickingHoverState::Enter);
        assert!(e[1].mark_as_used);
        assert!(matches!(t.effects[1], Effect::SetActive));
    }

    #[test]
    fn has_target_press_moves_to_pressing() {
        for id in [IdMatch::Same, IdMatch::Different] {
            let t = transition(PickingPhase::HasTarget, step(FsmInput::Updated, id, PRIMARY));
            assert_eq!(t.next, PickingPhase::Pressing);
            let last = *emits(&t).last().unwrap();
            assert_eq!(last.press_state, PickingPressState::Press);
            assert_eq!(last.state, PickingState::Updated);
        }
    }

    #[test]
    fn pressing_holds_target_while_dragging_anywhere() {
        for id in [IdMatch::Same, IdMatch::Different, IdMatch::Void] {
            let mut s = step(FsmInput::Updated, id, PRIMARY);
            s.tracked = PRIMARY;
            let t = transition(PickingPhase::Pressing, s);
            assert_eq!(t.next, PickingPhase::Pressing);
            let e = emits(&t);
            assert_eq!(e.len(), 1);
            assert_eq!(e[0].press_state, PickingPressState::Move);
            assert_eq!(e[0].hover_state, PickingHoverState::Move);
            assert_eq!(e[0].press_item, PickingPressItem::Primary);
        }
    }

    #[test]
    fn pressing_release_over_void_exits_to_idle() {
        let mut s = step(FsmInput::Updated, IdMatch::Void, NONE);
        s.tracked = PRIMARY;
        let t = transition(PickingPhase::Pressing, s);
        assert_eq!(t.next, PickingPhase::Idle);
        let e = emits(&t);
        assert_eq!(e[0].state, PickingState::Finished);
        assert_eq!(e[0].press_state, PickingPressState::Release);
        assert_eq!(e[0].hover_state, PickingHoverState::Exit);
        assert_eq!(e[0].press_item, PickingPressItem::Primary);
        assert_eq!(t.effects.last(), Some(&Effect::ClearActive));
    }

    #[test]
    fn pressing_release_over_other_target_updates_previous_but_not_used() {
        let mut s = step(FsmInput::Updated, IdMatch::Different, NONE);
        s.tracked = PRIMARY;
        let t = transition(PickingPhase::Pressing, s);
        assert_eq!(t.next, PickingPhase::HasTarget);
        let e = emits(&t);
        assert_eq!(e.len(), 2);
        assert!(e[0].update_previous);
        assert!(!e[0].mark_as_used);
        assert_eq!(e[1].state, PickingState::Started);
    }

    #[test]
    fn partial_release_stays_pressing_and_reports_released_item() {
        let mut s = step(FsmInput::Updated, IdMatch::Same, PickingPressItems::SECONDARY);
        s.tracked = PRIMARY | PickingPressItems::SECONDARY;
        let t = transition(PickingPhase::Pressing, s);
        assert_eq!(t.next, PickingPhase::Pressing);
        let e = emits(&t);
        assert_eq!(e[0].press_state, PickingPressState::Release);
        assert_eq!(e[0].press_item, PickingPressItem::Primary);
        assert_eq!(t.effects.last(), Some(&Effect::TrackPressItems));
    }

    #[test]
    fn additional_press_reports_new_item() {
        let mut s = step(FsmInput::Updated, IdMatch::Same, PRIMARY | PickingPressItems::TERTIARY);
        s.tracked = PRIMARY;
        let t = transition(PickingPhase::Pressing, s);
        let e = emits(&t);
        assert_eq!(e[0].press_state, PickingPressState::Press);
        assert_eq!(e[0].press_item, PickingPressItem::Tertiary);
    }

    #[test]
    fn swapped_item_reports_release_then_press() {
        let mut s = step(FsmInput::Updated, IdMatch::Same, PRIMARY);
        s.tracked = PickingPressItems::SECONDARY;
        let t = transition(PickingPhase::Pressing, s);
        assert_eq!(t.next, PickingPhase::Pressing);
        let e = emits(&t);
        assert_eq!(e.len(), 2);
        assert_eq!(e[0].press_state, PickingPressState::Release);
        assert_eq!(e[0].press_item, PickingPressItem::Secondary);
        assert_eq!(e[1].press_state, PickingPressState::Press);
        assert_eq!(e[1].press_item, PickingPressItem::Primary);
        assert_eq!(t.effects.last(), Some(&Effect::TrackPressItems));
    }

    #[test]
    fn has_target_ignores_press_over_empty_space() {
        let t = transition(
            PickingPhase::HasTarget,
            step(FsmInput::Updated, IdMatch::Void, PRIMARY),
        );
        assert_eq!(t.next, PickingPhase::HasTarget);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn outside_press_recovers_on_release_over_target() {
        let t = transition(
            PickingPhase::PressingOutside,
            step(FsmInput::Updated, IdMatch::Different, NONE),
        );
        assert_eq!(t.next, PickingPhase::HasTarget);
        let e = emits(&t);
        assert_eq!(e.len(), 1);
        assert_eq!(e[0].state, PickingState::Started);
        assert_eq!(e[0].hover_state, PickingHoverState::Enter);

        let t = transition(
            PickingPhase::PressingOutside,
            step(FsmInput::Updated, IdMatch::Void, NONE),
        );
        assert_eq!(t.next, PickingPhase::Idle);
        assert!(t.effects.is_empty());

        let t = transition(
            PickingPhase::PressingOutside,
            step(FsmInput::Finished, IdMatch::Different, NONE),
        );
        assert_eq!(t.next, PickingPhase::Idle);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn started_outside_idle_acts_like_updated() {
        for phase in [
            PickingPhase::HasTarget,
            PickingPhase::Pressing,
            PickingPhase::PressingOutside,
        ] {
            let mut a = step(FsmInput::Started, IdMatch::Same, PRIMARY);
            let mut b = step(FsmInput::Updated, IdMatch::Same, PRIMARY);
            a.tracked = PRIMARY;
            b.tracked = PRIMARY;
            assert_eq!(transition(phase, a), transition(phase, b), "{phase:?}");
        }
    }

    #[test]
    fn finish_always_returns_to_idle() {
        for phase in [
            PickingPhase::Idle,
            PickingPhase::HasTarget,
            PickingPhase::Pressing,
            PickingPhase::PressingOutside,
        ] {
            let t = transition(phase, step(FsmInput::Finished, IdMatch::Same, NONE));
            assert_eq!(t.next, PickingPhase::Idle, "{phase:?}");
        }
    }
}
