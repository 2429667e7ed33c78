//! Ordered, stable-identity editor for the wizard's time-slot drafts.

use chrono::NaiveTime;
use uuid::Uuid;

/// One in-progress time slot. Fields stay optional until the step validator
/// signs off on the list as a whole.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeSlotDraft {
    pub day_of_week: Option<u8>,
    pub start_time: Option<NaiveTime>,
    pub capacity: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SlotEntry {
    id: Uuid,
    draft: TimeSlotDraft,
}

/// The single source of truth for the slot list.
///
/// Every entry keeps a stable id across sibling insertions and removals, so
/// anything rendering the list can key on identity rather than position.
/// Removal shifts later indices down by one; there is no second mirrored
/// list that could fall out of alignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeSlotList {
    entries: Vec<SlotEntry>,
}

impl TimeSlotList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a draft and returns its stable id.
    pub fn append(&mut self, draft: TimeSlotDraft) -> Uuid {
        let id = Uuid::new_v4();
        self.entries.push(SlotEntry { id, draft });
        id
    }

    /// Replaces the draft at `index`, keeping its id. Returns false when the
    /// index is out of range.
    pub fn update(&mut self, index: usize, draft: TimeSlotDraft) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.draft = draft;
                true
            }
            None => false,
        }
    }

    /// Removes and returns the draft at `index`; later entries shift down.
    pub fn remove(&mut self, index: usize) -> Option<TimeSlotDraft> {
        if index < self.entries.len() {
            Some(self.entries.remove(index).draft)
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&TimeSlotDraft> {
        self.entries.get(index).map(|entry| &entry.draft)
    }

    /// Stable id of the entry at `index`.
    pub fn id_at(&self, index: usize) -> Option<Uuid> {
        self.entries.get(index).map(|entry| entry.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimeSlotDraft> {
        self.entries.iter().map(|entry| &entry.draft)
    }

    /// Ids in list order, for identity/ordering assertions.
    pub fn ids(&self) -> Vec<Uuid> {
        self.entries.iter().map(|entry| entry.id).collect()
    }
}
