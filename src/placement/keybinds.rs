//! JSON export and import of keybind lists.
//!
//! The file is a flat array of objects. Custom frames and cycles spread their
//! payload over optional fields that are only meaningful for those two
//! directions, so the file format lives here as its own type and is converted
//! to and from [`WindowAction`] at the boundary.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use super::action::{
    Anchor, CustomFrame, CustomPosition, CustomSize, Keybind, PositionMode, SizeMode, Unit,
    WindowAction,
};
use super::direction::{Direction, DirectionKind};
use crate::common::collections::HashMap;

#[derive(Debug, Error)]
pub enum KeybindError {
    #[error("invalid keybind file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown direction `{tag}`{}", did_you_mean(.suggestion))]
    UnknownDirection { tag: String, suggestion: Option<String> },
    #[error("`{direction}` keybind is missing `{field}`")]
    MissingField { direction: &'static str, field: &'static str },
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    suggestion.as_ref().map(|s| format!(", did you mean `{s}`?")).unwrap_or_default()
}

/// One entry of the keybind file.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SavedAction {
    pub id: Option<Uuid>,
    pub direction: String,
    #[serde(default)]
    pub keybind: Vec<u16>,
    pub name: Option<String>,
    pub unit: Option<Unit>,
    pub size_mode: Option<SizeMode>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub position_mode: Option<PositionMode>,
    pub anchor: Option<Anchor>,
    pub x_point: Option<f64>,
    pub y_point: Option<f64>,
    pub cycle: Option<Vec<SavedAction>>,
}

impl From<&WindowAction> for SavedAction {
    fn from(action: &WindowAction) -> Self {
        let mut saved = SavedAction {
            id: Some(action.id),
            direction: action.direction.kind().tag().to_string(),
            keybind: action.keybind.0.iter().copied().collect(),
            name: action.name.clone(),
            ..Default::default()
        };
        match &action.direction {
            Direction::Custom(frame) => {
                saved.unit = Some(frame.unit);
                saved.size_mode = Some(frame.size.mode());
                if let CustomSize::Custom { width, height } = frame.size {
                    saved.width = Some(width);
                    saved.height = Some(height);
                }
                saved.position_mode = Some(frame.position.mode());
                match frame.position {
                    CustomPosition::Generic(anchor) => saved.anchor = Some(anchor),
                    CustomPosition::Coordinates { x, y } => {
                        saved.x_point = Some(x);
                        saved.y_point = Some(y);
                    }
                }
            }
            Direction::Cycle(children) => {
                saved.cycle = Some(children.iter().map(SavedAction::from).collect());
            }
            _ => {}
        }
        saved
    }
}

impl TryFrom<SavedAction> for WindowAction {
    type Error = KeybindError;

    fn try_from(saved: SavedAction) -> Result<Self, Self::Error> {
        let kind = parse_direction(&saved.direction)?;
        let direction = match kind {
            DirectionKind::Custom => Direction::Custom(custom_frame(&saved)?),
            DirectionKind::Cycle => Direction::Cycle(
                saved
                    .cycle
                    .clone()
                    .unwrap_or_default()
                    .into_iter()
                    .map(WindowAction::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            kind => {
                if saved.cycle.is_some() || saved.size_mode.is_some() || saved.anchor.is_some() {
                    warn!(direction = kind.tag(), "ignoring custom fields on a plain direction");
                }
                Direction::from_kind(kind).ok_or_else(|| KeybindError::UnknownDirection {
                    tag: saved.direction.clone(),
                    suggestion: None,
                })?
            }
        };
        Ok(WindowAction {
            id: saved.id.unwrap_or_else(Uuid::new_v4),
            direction,
            keybind: Keybind::new(saved.keybind),
            name: saved.name,
        })
    }
}

fn custom_frame(saved: &SavedAction) -> Result<CustomFrame, KeybindError> {
    let missing = |field| KeybindError::MissingField { direction: DirectionKind::Custom.tag(), field };
    let size = match saved.size_mode.unwrap_or_default() {
        SizeMode::Custom => CustomSize::Custom {
            width: saved.width.ok_or_else(|| missing("width"))?,
            height: saved.height.ok_or_else(|| missing("height"))?,
        },
        SizeMode::PreserveSize => CustomSize::Preserve,
        SizeMode::InitialSize => CustomSize::Initial,
    };
    let position = match saved.position_mode.unwrap_or_default() {
        PositionMode::Generic => CustomPosition::Generic(saved.anchor.unwrap_or_default()),
        PositionMode::Coordinates => CustomPosition::Coordinates {
            x: saved.x_point.ok_or_else(|| missing("xPoint"))?,
            y: saved.y_point.ok_or_else(|| missing("yPoint"))?,
        },
    };
    Ok(CustomFrame {
        unit: saved.unit.unwrap_or_default(),
        size,
        position,
    })
}

pub fn parse_direction(tag: &str) -> Result<DirectionKind, KeybindError> {
    DirectionKind::iter().find(|k| k.tag() == tag).ok_or_else(|| KeybindError::UnknownDirection {
        tag: tag.to_string(),
        suggestion: suggest_direction(tag),
    })
}

/// Closest known direction tag, if any is close enough to be a typo.
pub fn suggest_direction(tag: &str) -> Option<String> {
    let needle = tag.to_lowercase();
    let (best, dist) = DirectionKind::tags()
        .iter()
        .map(|cand| (cand, levenshtein(&needle, &cand.to_lowercase())))
        .min_by_key(|(_, dist)| *dist)?;
    let threshold = std::cmp::max(3, best.len() / 2);
    (dist <= threshold).then(|| best.clone())
}

fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut row = vec![i + 1; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            row[j + 1] = (prev[j + 1] + 1).min(row[j] + 1).min(prev[j] + cost);
        }
        prev = row;
    }
    prev[b.len()]
}

pub fn export(actions: &[WindowAction]) -> Result<String, KeybindError> {
    let saved: Vec<SavedAction> = actions.iter().map(SavedAction::from).collect();
    Ok(serde_json::to_string_pretty(&saved)?)
}

pub fn import(json: &str) -> Result<Vec<WindowAction>, KeybindError> {
    let saved: Vec<SavedAction> = serde_json::from_str(json)?;
    saved.into_iter().map(WindowAction::try_from).collect()
}

pub fn save(path: &Path, actions: &[WindowAction]) -> anyhow::Result<()> {
    let json = export(actions)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, json.as_bytes())
        .with_context(|| format!("writing keybinds to {}", path.display()))?;
    debug!(count = actions.len(), path = %path.display(), "saved keybinds");
    Ok(())
}

pub fn load(path: &Path) -> anyhow::Result<Vec<WindowAction>> {
    let buf = std::fs::read_to_string(path)
        .with_context(|| format!("reading keybinds from {}", path.display()))?;
    let actions = import(&buf).with_context(|| format!("parsing {}", path.display()))?;
    debug!(count = actions.len(), path = %path.display(), "loaded keybinds");
    Ok(actions)
}

/// Problems worth telling the user about that do not stop a file from loading.
pub fn check(actions: &[WindowAction]) -> Vec<String> {
    let mut issues = Vec::new();
    let mut seen: HashMap<&Keybind, &WindowAction> = HashMap::default();
    for action in actions {
        if let Direction::Cycle(children) = &action.direction {
            if children.is_empty() {
                issues.push(format!("cycle {} has no members", label(action)));
            }
        }
        if action.keybind.is_empty() {
            continue;
        }
        if let Some(previous) = seen.insert(&action.keybind, action) {
            issues.push(format!(
                "{} and {} share the keybind {:?}",
                label(previous),
                label(action),
                action.keybind.0
            ));
        }
    }
    issues
}

fn label(action: &WindowAction) -> String {
    match &action.name {
        Some(name) => format!("`{name}`"),
        None => format!("`{}`", action.direction.kind().tag()),
    }
}

mod key {
    pub const RETURN: u16 = 0x24;
    pub const SPACE: u16 = 0x31;
    pub const DELETE: u16 = 0x33;
    pub const Z: u16 = 0x06;
    pub const EQUAL: u16 = 0x18;
    pub const MINUS: u16 = 0x1b;
    pub const LEFT: u16 = 0x7b;
    pub const RIGHT: u16 = 0x7c;
    pub const DOWN: u16 = 0x7d;
    pub const UP: u16 = 0x7e;
}

/// The keybinds a fresh install starts with.
pub fn default_keybinds() -> Vec<WindowAction> {
    use key::*;
    let bind = |direction: Direction, keys: &[u16]| {
        WindowAction::new(direction).with_keybind(keys.iter().copied())
    };
    vec![
        bind(Direction::Maximize, &[RETURN]),
        bind(Direction::Center, &[SPACE]),
        bind(Direction::TopHalf, &[UP]),
        bind(Direction::BottomHalf, &[DOWN]),
        bind(Direction::RightHalf, &[RIGHT]),
        bind(Direction::LeftHalf, &[LEFT]),
        bind(Direction::TopLeftQuarter, &[UP, LEFT]),
        bind(Direction::TopRightQuarter, &[UP, RIGHT]),
        bind(Direction::BottomLeftQuarter, &[DOWN, LEFT]),
        bind(Direction::BottomRightQuarter, &[DOWN, RIGHT]),
        bind(Direction::Larger, &[EQUAL]),
        bind(Direction::Smaller, &[MINUS]),
        bind(Direction::Undo, &[Z]),
        bind(Direction::InitialFrame, &[DELETE]),
    ]
}
