// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public picking types: identifiers, picking phases, press items, and NDC positions.

use core::fmt;

/// Identifier of a pickable target in the global picking id space.
///
/// The id space is owned by the host's picking manager. [`GlobalId::VOID`]
/// (`0`) means "nothing under the pointer".
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct GlobalId(pub u64);

impl GlobalId {
    /// The void id: no pickable target.
    pub const VOID: Self = Self(0);

    /// Returns `true` for [`GlobalId::VOID`].
    pub const fn is_void(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle to an action registered with the host's picking manager.
///
/// The action itself lives in the host; this crate only carries the handle
/// through emitted [`PickingEvent`](crate::PickingEvent)s.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ActionId(pub u32);

/// Lifecycle of a picking interaction with one target.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum PickingState {
    /// No interaction.
    #[default]
    None,
    /// The pointer started interacting with the target.
    Started,
    /// The interaction continues.
    Updated,
    /// The interaction with the target ended.
    Finished,
}

/// Press phase reported by a picking event.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum PickingPressState {
    /// Nothing press-related happened.
    #[default]
    None,
    /// A press item went down.
    Press,
    /// The pointer moved while pressed.
    Move,
    /// A press item went up.
    Release,
}

/// Hover phase reported by a picking event.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum PickingHoverState {
    /// No hover change.
    #[default]
    None,
    /// The pointer entered the target.
    Enter,
    /// The pointer moved over the target.
    Move,
    /// The pointer left the target.
    Exit,
}

/// A single press item, the "button" of a picking interaction.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum PickingPressItem {
    /// No item.
    #[default]
    None,
    /// Primary item (left mouse button, one-finger press).
    Primary,
    /// Secondary item (right mouse button, two-finger press).
    Secondary,
    /// Tertiary item (middle mouse button, three-finger press).
    Tertiary,
}

bitflags::bitflags! {
    /// Set of press items held at the same time.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PickingPressItems: u8 {
        /// [`PickingPressItem::Primary`] is held.
        const PRIMARY   = 0b0000_0001;
        /// [`PickingPressItem::Secondary`] is held.
        const SECONDARY = 0b0000_0010;
        /// [`PickingPressItem::Tertiary`] is held.
        const TERTIARY  = 0b0000_0100;
    }
}

impl PickingPressItems {
    /// Returns the highest-priority item in the set.
    ///
    /// Priority is `Primary > Secondary > Tertiary`; the empty set yields
    /// [`PickingPressItem::None`].
    ///
    /// ```
    /// use understory_picking::{PickingPressItem, PickingPressItems};
    ///
    /// let held = PickingPressItems::SECONDARY | PickingPressItems::TERTIARY;
    /// assert_eq!(held.highest(), PickingPressItem::Secondary);
    /// assert_eq!(PickingPressItems::empty().highest(), PickingPressItem::None);
    /// ```
    pub fn highest(self) -> PickingPressItem {
        if self.contains(Self::PRIMARY) {
            PickingPressItem::Primary
        } else if self.contains(Self::SECONDARY) {
            PickingPressItem::Secondary
        } else if self.contains(Self::TERTIARY) {
            PickingPressItem::Tertiary
        } else {
            PickingPressItem::None
        }
    }
}

impl From<PickingPressItem> for PickingPressItems {
    fn from(item: PickingPressItem) -> Self {
        match item {
            PickingPressItem::None => Self::empty(),
            PickingPressItem::Primary => Self::PRIMARY,
            PickingPressItem::Secondary => Self::SECONDARY,
            PickingPressItem::Tertiary => Self::TERTIARY,
        }
    }
}

/// Normalized device coordinate: `x`/`y` in `[-1, 1]` plus a depth value.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ndc {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
    /// Depth at the position.
    pub depth: f64,
}

impl Ndc {
    /// The origin with zero depth.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates an NDC value.
    pub const fn new(x: f64, y: f64, depth: f64) -> Self {
        Self { x, y, depth }
    }

    /// Converts a normalized (`[0, 1]`) position to NDC.
    pub fn from_normalized(pos: kurbo::Point, depth: f64) -> Self {
        Self::new(2.0 * pos.x - 1.0, 2.0 * pos.y - 1.0, depth)
    }

    /// Returns the normalized (`[0, 1]`) position of this coordinate.
    pub fn to_normalized(self) -> kurbo::Point {
        kurbo::Point::new((self.x + 1.0) * 0.5, (self.y + 1.0) * 0.5)
    }
}
