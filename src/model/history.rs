//! Per-window placement history.
//!
//! Each window the engine has touched gets a [`Record`]: the frame it had
//! before the first placement, plus a stack of the directions applied since,
//! newest first. The base of every stack is [`Direction::InitialFrame`].

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::common::collections::HashMap;
use crate::common::collections::hash_map::Entry;
use crate::placement::Direction;
use crate::sys::geometry::Rect;
use crate::sys::window::WindowId;

#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub direction: Direction,
    /// Set when the entry was produced by advancing through a cycle rather
    /// than by a direct request.
    pub is_cycling: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub initial_frame: Rect,
    entries: VecDeque<HistoryEntry>,
}

impl Record {
    fn new(initial_frame: Rect) -> Self {
        let mut entries = VecDeque::new();
        entries.push_back(HistoryEntry {
            direction: Direction::InitialFrame,
            is_cycling: false,
        });
        Record { initial_frame, entries }
    }

    /// Entries, most recent first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> { self.entries.iter() }

    pub fn len(&self) -> usize { self.entries.len() }

    /// First entry at or below `depth` that places the window on its own,
    /// skipping relative adjustments stacked on top of it.
    fn placement_from(&self, depth: usize) -> Option<&Direction> {
        self.entries
            .iter()
            .skip(depth)
            .map(|e| &e.direction)
            .find(|d| !d.manipulates_existing_frame())
    }

    fn undo_depth(&self) -> usize {
        let last = self.entries.len().saturating_sub(1);
        let mut depth = 0;
        while depth < last && self.entries[depth].is_cycling {
            depth += 1;
        }
        if depth < last {
            depth += 1;
        }
        depth
    }
}

#[derive(Clone, Debug, Default)]
pub struct WindowHistory {
    records: HashMap<WindowId, Record>,
}

impl WindowHistory {
    pub fn new() -> Self { Self::default() }

    /// Starts a fresh record for `id`, discarding whatever was there.
    pub fn record_first(&mut self, id: WindowId, frame: Rect) {
        debug!(%id, ?frame, "recording initial frame");
        self.records.insert(id, Record::new(frame));
    }

    pub fn has_record(&self, id: WindowId) -> bool { self.records.contains_key(&id) }

    pub fn record(&self, id: WindowId) -> Option<&Record> { self.records.get(&id) }

    /// Pushes `direction` on top of the window's stack. Does nothing for a
    /// window without a record.
    pub fn record_direction(&mut self, id: WindowId, direction: Direction, is_cycling: bool) {
        let Some(record) = self.records.get_mut(&id) else {
            trace!(%id, ?direction, "no record, dropping direction");
            return;
        };
        trace!(%id, ?direction, is_cycling, "recording direction");
        record.entries.push_front(HistoryEntry { direction, is_cycling });
    }

    /// Walks the stack from index `offset`, stepping past cycling entries
    /// unless `can_be_cycling`. Returns `NoAction` when the walk runs off the
    /// end.
    pub fn get_last_direction(&self, id: WindowId, offset: usize, can_be_cycling: bool) -> Direction {
        let Some(record) = self.records.get(&id) else {
            return Direction::NoAction;
        };
        record
            .entries
            .iter()
            .skip(offset)
            .find(|e| can_be_cycling || !e.is_cycling)
            .map(|e| e.direction.clone())
            .unwrap_or(Direction::NoAction)
    }

    /// Whether the newest entry was produced by cycling.
    pub fn is_cycling(&self, id: WindowId) -> bool {
        self.records
            .get(&id)
            .and_then(|r| r.entries.front())
            .is_some_and(|e| e.is_cycling)
    }

    pub fn get_initial_frame(&self, id: WindowId) -> Option<Rect> {
        self.records.get(&id).map(|r| r.initial_frame)
    }

    /// The direction an undo would return the window to: the entry below the
    /// newest direct entry and the cycling run stacked on it.
    pub fn undo_target(&self, id: WindowId) -> Direction {
        self.records
            .get(&id)
            .and_then(|r| r.entries.get(r.undo_depth()))
            .map(|e| e.direction.clone())
            .unwrap_or(Direction::NoAction)
    }

    /// Like [`WindowHistory::undo_target`], but steps over grow, shrink and
    /// move entries so the result can be resolved without the frame it was
    /// relative to.
    pub fn undo_placement(&self, id: WindowId) -> Direction {
        self.records
            .get(&id)
            .and_then(|r| r.placement_from(r.undo_depth()))
            .cloned()
            .unwrap_or(Direction::NoAction)
    }

    /// The newest entry that places the window on its own.
    pub fn current_placement(&self, id: WindowId) -> Direction {
        self.records
            .get(&id)
            .and_then(|r| r.placement_from(0))
            .cloned()
            .unwrap_or(Direction::NoAction)
    }

    /// Removes what [`WindowHistory::undo_target`] skips over and returns the
    /// direction that is current afterwards. The base entry is never removed.
    pub fn pop_direction(&mut self, id: WindowId) -> Option<Direction> {
        let record = self.records.get_mut(&id)?;
        let depth = record.undo_depth();
        record.entries.drain(..depth);
        let current = record.entries.front().map(|e| e.direction.clone());
        debug!(%id, ?current, "popped history");
        current
    }

    pub fn erase(&mut self, id: WindowId) {
        if let Entry::Occupied(entry) = self.records.entry(id) {
            debug!(%id, "erasing history");
            entry.remove();
        }
    }

    pub fn clear(&mut self) { self.records.clear(); }

    pub fn len(&self) -> usize { self.records.len() }

    pub fn is_empty(&self) -> bool { self.records.is_empty() }
}
