use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use strum::{IntoEnumIterator, VariantNames};

use super::action::{CustomFrame, WindowAction};
use crate::sys::geometry::{Edges, Rect};

const UNIT_EPSILON: f64 = 1e-9;

/// Every placement the engine knows how to perform.
///
/// Only [`Direction::Custom`] and [`Direction::Cycle`] carry data; the rest are
/// plain tags. [`DirectionKind`] is the payload-free discriminant and doubles
/// as the string tag used in exported keybinds.
#[derive(Clone, Debug, PartialEq, strum_macros::EnumDiscriminants)]
#[strum_discriminants(name(DirectionKind))]
#[strum_discriminants(derive(
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum_macros::EnumIter,
    strum_macros::VariantNames
))]
#[strum_discriminants(serde(rename_all = "camelCase"))]
pub enum Direction {
    NoAction,

    Maximize,
    AlmostMaximize,
    MaximizeHeight,
    MaximizeWidth,
    Fullscreen,

    Undo,
    InitialFrame,
    Hide,
    Minimize,

    MacOSCenter,
    Center,

    NextScreen,
    PreviousScreen,

    Larger,
    Smaller,

    ShrinkTop,
    ShrinkBottom,
    ShrinkRight,
    ShrinkLeft,
    GrowTop,
    GrowBottom,
    GrowRight,
    GrowLeft,

    MoveUp,
    MoveDown,
    MoveRight,
    MoveLeft,

    TopHalf,
    RightHalf,
    BottomHalf,
    LeftHalf,
    HorizontalCenterHalf,
    VerticalCenterHalf,

    TopLeftQuarter,
    TopRightQuarter,
    BottomRightQuarter,
    BottomLeftQuarter,

    RightThird,
    RightTwoThirds,
    HorizontalCenterThird,
    LeftThird,
    LeftTwoThirds,

    TopThird,
    TopTwoThirds,
    VerticalCenterThird,
    BottomThird,
    BottomTwoThirds,

    /// Radial menu edge sectors. Expanded against the previous selection with
    /// [`Direction::next_in_cycle`].
    CycleTop,
    CycleRight,
    CycleBottom,
    CycleLeft,

    Custom(CustomFrame),
    Cycle(Vec<WindowAction>),
}

static TOP_CYCLE: [Direction; 3] =
    [Direction::TopHalf, Direction::TopThird, Direction::TopTwoThirds];
static RIGHT_CYCLE: [Direction; 3] =
    [Direction::RightHalf, Direction::RightThird, Direction::RightTwoThirds];
static BOTTOM_CYCLE: [Direction; 3] =
    [Direction::BottomHalf, Direction::BottomThird, Direction::BottomTwoThirds];
static LEFT_CYCLE: [Direction; 3] =
    [Direction::LeftHalf, Direction::LeftThird, Direction::LeftTwoThirds];

static DIRECTION_TAGS: LazyLock<Vec<String>> =
    LazyLock::new(|| DirectionKind::VARIANTS.iter().map(|v| lower_first(v)).collect());

impl Direction {
    pub fn kind(&self) -> DirectionKind { DirectionKind::from(self) }

    /// The constant unit rect this direction maps to, for the directions
    /// that have one.
    pub fn frame_multiplier(&self) -> Option<Rect> {
        use Direction::*;
        const THIRD: f64 = 1.0 / 3.0;
        const TWO_THIRDS: f64 = 2.0 / 3.0;
        let rect = match self {
            Maximize | Fullscreen => Rect::new(0.0, 0.0, 1.0, 1.0),
            AlmostMaximize => Rect::new(0.05, 0.05, 0.9, 0.9),

            TopHalf => Rect::new(0.0, 0.0, 1.0, 0.5),
            RightHalf => Rect::new(0.5, 0.0, 0.5, 1.0),
            BottomHalf => Rect::new(0.0, 0.5, 1.0, 0.5),
            LeftHalf => Rect::new(0.0, 0.0, 0.5, 1.0),
            HorizontalCenterHalf => Rect::new(0.25, 0.0, 0.5, 1.0),
            VerticalCenterHalf => Rect::new(0.0, 0.25, 1.0, 0.5),

            TopLeftQuarter => Rect::new(0.0, 0.0, 0.5, 0.5),
            TopRightQuarter => Rect::new(0.5, 0.0, 0.5, 0.5),
            BottomRightQuarter => Rect::new(0.5, 0.5, 0.5, 0.5),
            BottomLeftQuarter => Rect::new(0.0, 0.5, 0.5, 0.5),

            RightThird => Rect::new(TWO_THIRDS, 0.0, THIRD, 1.0),
            RightTwoThirds => Rect::new(THIRD, 0.0, TWO_THIRDS, 1.0),
            HorizontalCenterThird => Rect::new(THIRD, 0.0, THIRD, 1.0),
            LeftThird => Rect::new(0.0, 0.0, THIRD, 1.0),
            LeftTwoThirds => Rect::new(0.0, 0.0, TWO_THIRDS, 1.0),

            TopThird => Rect::new(0.0, 0.0, 1.0, THIRD),
            TopTwoThirds => Rect::new(0.0, 0.0, 1.0, TWO_THIRDS),
            VerticalCenterThird => Rect::new(0.0, THIRD, 1.0, THIRD),
            BottomThird => Rect::new(0.0, TWO_THIRDS, 1.0, THIRD),
            BottomTwoThirds => Rect::new(0.0, THIRD, 1.0, TWO_THIRDS),

            NoAction | MaximizeHeight | MaximizeWidth | Undo | InitialFrame | Hide | Minimize
            | MacOSCenter | Center | NextScreen | PreviousScreen | Larger | Smaller
            | ShrinkTop | ShrinkBottom | ShrinkRight | ShrinkLeft | GrowTop | GrowBottom
            | GrowRight | GrowLeft | MoveUp | MoveDown | MoveRight | MoveLeft | CycleTop
            | CycleRight | CycleBottom | CycleLeft | Custom(_) | Cycle(_) => return None,
        };
        Some(rect)
    }

    /// Screen edges a frame produced by this direction lies flush against.
    /// Derived from the direction alone, never from a resolved frame.
    pub fn edges_touching_screen(&self) -> Edges {
        match self {
            Direction::MaximizeHeight => Edges::TOP | Edges::BOTTOM,
            Direction::MaximizeWidth => Edges::LEADING | Edges::TRAILING,
            Direction::Custom(frame) => frame.edges_touching_screen(),
            _ => self
                .frame_multiplier()
                .map(|unit| unit.edges_touching(Rect::new(0.0, 0.0, 1.0, 1.0), UNIT_EPSILON))
                .unwrap_or_else(Edges::empty),
        }
    }

    pub fn is_size_adjustment(&self) -> bool {
        matches!(self, Direction::Larger | Direction::Smaller)
    }

    pub fn is_edge_adjustment(&self) -> bool { self.pinned_edge().is_some() }

    pub fn is_move(&self) -> bool {
        matches!(
            self,
            Direction::MoveUp | Direction::MoveDown | Direction::MoveLeft | Direction::MoveRight
        )
    }

    /// Directions that work from the previous target frame instead of the
    /// screen bounds.
    pub fn manipulates_existing_frame(&self) -> bool {
        self.is_size_adjustment() || self.is_edge_adjustment() || self.is_move()
    }

    pub fn is_center(&self) -> bool { matches!(self, Direction::Center | Direction::MacOSCenter) }

    pub fn is_history(&self) -> bool { matches!(self, Direction::Undo | Direction::InitialFrame) }

    /// Directions applied by toggling window state rather than by a frame.
    pub fn is_window_state(&self) -> bool {
        matches!(self, Direction::Fullscreen | Direction::Hide | Direction::Minimize)
    }

    pub fn is_screen_switch(&self) -> bool {
        matches!(self, Direction::NextScreen | Direction::PreviousScreen)
    }

    /// Whether resolving this direction describes a place for the window.
    pub fn has_frame(&self) -> bool {
        !matches!(self, Direction::NoAction | Direction::Undo | Direction::Cycle(_))
            && !self.is_window_state()
            && !self.is_screen_switch()
    }

    /// Edge moved by a per-edge direction, and whether it moves outward.
    pub fn pinned_edge(&self) -> Option<(Edges, bool)> {
        use Direction::*;
        match self {
            ShrinkTop => Some((Edges::TOP, false)),
            ShrinkBottom => Some((Edges::BOTTOM, false)),
            ShrinkLeft => Some((Edges::LEADING, false)),
            ShrinkRight => Some((Edges::TRAILING, false)),
            GrowTop => Some((Edges::TOP, true)),
            GrowBottom => Some((Edges::BOTTOM, true)),
            GrowLeft => Some((Edges::LEADING, true)),
            GrowRight => Some((Edges::TRAILING, true)),
            _ => None,
        }
    }

    pub fn edge_cycle(&self) -> Option<&'static [Direction]> {
        match self {
            Direction::CycleTop => Some(&TOP_CYCLE),
            Direction::CycleRight => Some(&RIGHT_CYCLE),
            Direction::CycleBottom => Some(&BOTTOM_CYCLE),
            Direction::CycleLeft => Some(&LEFT_CYCLE),
            _ => None,
        }
    }

    /// Expands an edge-cycle pseudo-direction: the member after `previous`
    /// when `previous` belongs to the cycle, otherwise the first member.
    /// Any other direction is returned unchanged.
    pub fn next_in_cycle(&self, previous: &Direction) -> Direction {
        let Some(members) = self.edge_cycle() else {
            return self.clone();
        };
        match members.iter().position(|m| m == previous) {
            Some(idx) => members[(idx + 1) % members.len()].clone(),
            None => members[0].clone(),
        }
    }

    /// Builds the payload-free direction for `kind`. `Custom` and `Cycle` need
    /// data and return `None`.
    pub fn from_kind(kind: DirectionKind) -> Option<Direction> {
        use DirectionKind as K;
        let direction = match kind {
            K::NoAction => Direction::NoAction,
            K::Maximize => Direction::Maximize,
            K::AlmostMaximize => Direction::AlmostMaximize,
            K::MaximizeHeight => Direction::MaximizeHeight,
            K::MaximizeWidth => Direction::MaximizeWidth,
            K::Fullscreen => Direction::Fullscreen,
            K::Undo => Direction::Undo,
            K::InitialFrame => Direction::InitialFrame,
            K::Hide => Direction::Hide,
            K::Minimize => Direction::Minimize,
            K::MacOSCenter => Direction::MacOSCenter,
            K::Center => Direction::Center,
            K::NextScreen => Direction::NextScreen,
            K::PreviousScreen => Direction::PreviousScreen,
            K::Larger => Direction::Larger,
            K::Smaller => Direction::Smaller,
            K::ShrinkTop => Direction::ShrinkTop,
            K::ShrinkBottom => Direction::ShrinkBottom,
            K::ShrinkRight => Direction::ShrinkRight,
            K::ShrinkLeft => Direction::ShrinkLeft,
            K::GrowTop => Direction::GrowTop,
            K::GrowBottom => Direction::GrowBottom,
            K::GrowRight => Direction::GrowRight,
            K::GrowLeft => Direction::GrowLeft,
            K::MoveUp => Direction::MoveUp,
            K::MoveDown => Direction::MoveDown,
            K::MoveRight => Direction::MoveRight,
            K::MoveLeft => Direction::MoveLeft,
            K::TopHalf => Direction::TopHalf,
            K::RightHalf => Direction::RightHalf,
            K::BottomHalf => Direction::BottomHalf,
            K::LeftHalf => Direction::LeftHalf,
            K::HorizontalCenterHalf => Direction::HorizontalCenterHalf,
            K::VerticalCenterHalf => Direction::VerticalCenterHalf,
            K::TopLeftQuarter => Direction::TopLeftQuarter,
            K::TopRightQuarter => Direction::TopRightQuarter,
            K::BottomRightQuarter => Direction::BottomRightQuarter,
            K::BottomLeftQuarter => Direction::BottomLeftQuarter,
            K::RightThird => Direction::RightThird,
            K::RightTwoThirds => Direction::RightTwoThirds,
            K::HorizontalCenterThird => Direction::HorizontalCenterThird,
            K::LeftThird => Direction::LeftThird,
            K::LeftTwoThirds => Direction::LeftTwoThirds,
            K::TopThird => Direction::TopThird,
            K::TopTwoThirds => Direction::TopTwoThirds,
            K::VerticalCenterThird => Direction::VerticalCenterThird,
            K::BottomThird => Direction::BottomThird,
            K::BottomTwoThirds => Direction::BottomTwoThirds,
            K::CycleTop => Direction::CycleTop,
            K::CycleRight => Direction::CycleRight,
            K::CycleBottom => Direction::CycleBottom,
            K::CycleLeft => Direction::CycleLeft,
            K::Custom | K::Cycle => return None,
        };
        Some(direction)
    }
}

impl DirectionKind {
    /// The serialized tag, e.g. `topLeftQuarter` or `macOSCenter`.
    pub fn tag(&self) -> &'static str {
        let idx = DirectionKind::iter().position(|k| k == *self).unwrap_or_default();
        DIRECTION_TAGS.get(idx).map(String::as_str).unwrap_or_default()
    }

    /// Tags of every direction, in declaration order.
    pub fn tags() -> &'static [String] { &DIRECTION_TAGS }
}

// Matches serde's camelCase, which only lowers the first character.
fn lower_first(variant: &str) -> String {
    let mut chars = variant.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
