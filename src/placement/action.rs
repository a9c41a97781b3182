use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::direction::Direction;
use crate::sys::geometry::Edges;

/// Key codes that trigger an action, in no particular order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keybind(pub BTreeSet<u16>);

impl Keybind {
    pub fn new(codes: impl IntoIterator<Item = u16>) -> Self { Keybind(codes.into_iter().collect()) }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

/// A user-configured placement: a direction plus the keys bound to it.
///
/// Identity is the `id`; two actions with the same direction and keys are
/// still different actions.
#[derive(Clone, Debug)]
pub struct WindowAction {
    pub id: Uuid,
    pub direction: Direction,
    pub keybind: Keybind,
    pub name: Option<String>,
}

impl PartialEq for WindowAction {
    fn eq(&self, other: &Self) -> bool { self.id == other.id }
}

impl Eq for WindowAction {}

impl Hash for WindowAction {
    fn hash<H: Hasher>(&self, state: &mut H) { self.id.hash(state); }
}

impl WindowAction {
    pub fn new(direction: Direction) -> Self {
        WindowAction {
            id: Uuid::new_v4(),
            direction,
            keybind: Keybind::default(),
            name: None,
        }
    }

    pub fn custom(frame: CustomFrame) -> Self { Self::new(Direction::Custom(frame)) }

    pub fn cycle(children: Vec<WindowAction>) -> Self { Self::new(Direction::Cycle(children)) }

    pub fn with_keybind(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.keybind = Keybind::new(codes);
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Compares everything except the id, recursing into cycles.
    pub fn same_binding(&self, other: &WindowAction) -> bool {
        if self.keybind != other.keybind || self.name != other.name {
            return false;
        }
        match (&self.direction, &other.direction) {
            (Direction::Cycle(a), Direction::Cycle(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_binding(y))
            }
            (a, b) => a == b,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Unit {
    Pixels,
    #[default]
    Percentage,
}

/// Nine-point anchors plus the visually-centred variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Anchor {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    #[default]
    Center,
    MacOSCenter,
}

impl Anchor {
    pub fn edges(&self) -> Edges {
        match self {
            Anchor::TopLeft => Edges::TOP | Edges::LEADING,
            Anchor::Top => Edges::TOP,
            Anchor::TopRight => Edges::TOP | Edges::TRAILING,
            Anchor::Right => Edges::TRAILING,
            Anchor::BottomRight => Edges::BOTTOM | Edges::TRAILING,
            Anchor::Bottom => Edges::BOTTOM,
            Anchor::BottomLeft => Edges::BOTTOM | Edges::LEADING,
            Anchor::Left => Edges::LEADING,
            Anchor::Center | Anchor::MacOSCenter => Edges::empty(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SizeMode {
    #[default]
    Custom,
    PreserveSize,
    InitialSize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PositionMode {
    #[default]
    Generic,
    Coordinates,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CustomSize {
    Custom { width: f64, height: f64 },
    /// Keep the window's current size.
    Preserve,
    /// Use the size recorded before the window was first placed.
    Initial,
}

impl CustomSize {
    pub fn mode(&self) -> SizeMode {
        match self {
            CustomSize::Custom { .. } => SizeMode::Custom,
            CustomSize::Preserve => SizeMode::PreserveSize,
            CustomSize::Initial => SizeMode::InitialSize,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CustomPosition {
    Generic(Anchor),
    /// Offset from the top-left of the screen bounds.
    Coordinates { x: f64, y: f64 },
}

impl CustomPosition {
    pub fn mode(&self) -> PositionMode {
        match self {
            CustomPosition::Generic(_) => PositionMode::Generic,
            CustomPosition::Coordinates { .. } => PositionMode::Coordinates,
        }
    }
}

/// A user-defined frame. `unit` applies to both the size and the coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CustomFrame {
    pub unit: Unit,
    pub size: CustomSize,
    pub position: CustomPosition,
}

impl Default for CustomFrame {
    fn default() -> Self {
        CustomFrame {
            unit: Unit::Percentage,
            size: CustomSize::Custom { width: 100.0, height: 100.0 },
            position: CustomPosition::Generic(Anchor::Center),
        }
    }
}

impl CustomFrame {
    pub fn anchored(anchor: Anchor, unit: Unit, width: f64, height: f64) -> Self {
        CustomFrame {
            unit,
            size: CustomSize::Custom { width, height },
            position: CustomPosition::Generic(anchor),
        }
    }

    pub fn edges_touching_screen(&self) -> Edges {
        let mut edges = match self.position {
            CustomPosition::Generic(anchor) => anchor.edges(),
            CustomPosition::Coordinates { .. } => Edges::empty(),
        };
        if let (Unit::Percentage, CustomSize::Custom { width, height }) = (self.unit, self.size) {
            if width >= 100.0 {
                edges |= Edges::LEADING | Edges::TRAILING;
            }
            if height >= 100.0 {
                edges |= Edges::TOP | Edges::BOTTOM;
            }
        }
        edges
    }
}
