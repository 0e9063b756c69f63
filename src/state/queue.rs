//! Rotation queue.
//!
//! Ordered list of active players, head goes off next. Inactive players are
//! removed from the active list and parked in a separate list, so nothing
//! that reads the active list can ever surface them. The goalie is in
//! neither list.
//!
//! Every operation on an id the queue does not track is a silent no-op.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Where [`RotationQueue::insert_at`] puts a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    Start,
    End,
    Index(usize),
}

/// Substitution order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RotationQueue {
    /// Active players, next to go off first
    queue: Vec<PlayerId>,

    /// Players out of the rotation
    inactive: Vec<PlayerId>,
}

impl RotationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Partition `ids` into active and inactive, keeping their order.
    pub fn initialize<'a, I, F>(ids: I, is_inactive: F) -> Self
    where
        I: IntoIterator<Item = &'a PlayerId>,
        F: Fn(&str) -> bool,
    {
        let mut rotation = Self::new();
        for id in ids {
            if rotation.contains(id) {
                continue;
            }
            if is_inactive(id) {
                rotation.inactive.push(id.clone());
            } else {
                rotation.queue.push(id.clone());
            }
        }
        rotation
    }

    /// Active players in order.
    pub fn active(&self) -> &[PlayerId] {
        &self.queue
    }

    /// Inactive players in the order they left the rotation.
    pub fn inactive(&self) -> &[PlayerId] {
        &self.inactive
    }

    /// First `n` active players.
    pub fn next_active(&self, n: usize) -> &[PlayerId] {
        &self.queue[..n.min(self.queue.len())]
    }

    /// Move an active player to the tail.
    pub fn rotate_to_end(&mut self, id: &str) {
        if let Some(index) = self.position_of(id) {
            let player = self.queue.remove(index);
            self.queue.push(player);
        }
    }

    /// Take a player out of the rotation.
    pub fn deactivate(&mut self, id: &str) {
        if let Some(index) = self.position_of(id) {
            self.queue.remove(index);
            if !self.is_inactive(id) {
                self.inactive.push(id.to_string());
            }
        }
    }

    /// Bring an inactive player back as the next substitute in.
    ///
    /// `field_positions` is the outfield count of the active formation; the
    /// player lands right after the players currently on the field so they
    /// are never the next one off.
    pub fn reactivate(&mut self, id: &str, field_positions: usize) {
        let Some(index) = self.inactive.iter().position(|p| p == id) else {
            return;
        };
        let player = self.inactive.remove(index);
        let at = field_positions.min(self.queue.len());
        self.queue.insert(at, player);
    }

    /// Insert an active player, dropping any previous occurrence first.
    pub fn insert_at(&mut self, id: &str, at: InsertPosition) {
        self.remove(id);
        let player = id.to_string();
        match at {
            InsertPosition::Start => self.queue.insert(0, player),
            InsertPosition::End => self.queue.push(player),
            InsertPosition::Index(index) => {
                let index = index.min(self.queue.len());
                self.queue.insert(index, player);
            }
        }
    }

    /// Drop a player from both lists.
    pub fn remove(&mut self, id: &str) {
        self.queue.retain(|p| p != id);
        self.inactive.retain(|p| p != id);
    }

    /// Put `new` exactly where `old` stands in the active list.
    pub fn replace(&mut self, old: &str, new: &str) {
        if old == new || self.position_of(old).is_none() {
            return;
        }
        self.queue.retain(|p| p != new);
        // `old` shifts left by one if `new` stood before it
        if let Some(index) = self.position_of(old) {
            self.queue[index] = new.to_string();
        }
    }

    /// Exchange the places of two active players.
    pub fn swap(&mut self, a: &str, b: &str) {
        if let (Some(i), Some(j)) = (self.position_of(a), self.position_of(b)) {
            self.queue.swap(i, j);
        }
    }

    /// Active plus inactive.
    pub fn size(&self) -> usize {
        self.queue.len() + self.inactive.len()
    }

    pub fn active_size(&self) -> usize {
        self.queue.len()
    }

    pub fn inactive_size(&self) -> usize {
        self.inactive.len()
    }

    /// Tracked in either list.
    pub fn contains(&self, id: &str) -> bool {
        self.position_of(id).is_some() || self.is_inactive(id)
    }

    pub fn is_inactive(&self, id: &str) -> bool {
        self.inactive.iter().any(|p| p == id)
    }

    /// Index in the active list.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.queue.iter().position(|p| p == id)
    }
}
