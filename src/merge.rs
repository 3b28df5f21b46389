//! Note merging: group annotation rows into meal events
//!
//! A group opens at its first note and accepts every later note whose
//! timestamp is at most `first + window`. Accepted notes move
//! `latest_timestamp` forward but never move the window end, so a chain of
//! notes 50 minutes apart does not collapse into one meal.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::reading::RawNote;

/// Separator placed between member note texts
pub const NOTE_SEPARATOR: &str = " | ";

/// One eating occasion built from one or more raw notes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealEvent {
    /// Timestamp of the first member note (anchors initial glucose)
    pub first_timestamp: NaiveDateTime,
    /// Timestamp of the last member note (anchors peak and postprandial)
    pub latest_timestamp: NaiveDateTime,
    /// Member texts in timestamp order, joined with [`NOTE_SEPARATOR`]
    pub text: String,
    /// Glucose recorded on the first member note
    pub anchor_glucose: Option<f64>,
    /// Number of raw notes merged into this event
    pub member_count: usize,
}

/// Open group while scanning
struct PendingEvent<'a> {
    first: &'a RawNote,
    latest_timestamp: NaiveDateTime,
    window_end: NaiveDateTime,
    texts: Vec<&'a str>,
}

impl<'a> PendingEvent<'a> {
    fn open(note: &'a RawNote, window: Duration) -> Self {
        Self {
            first: note,
            latest_timestamp: note.timestamp,
            window_end: note.timestamp + window,
            texts: vec![note.text.as_str()],
        }
    }

    fn accepts(&self, note: &RawNote) -> bool {
        note.timestamp <= self.window_end
    }

    fn push(&mut self, note: &'a RawNote) {
        self.latest_timestamp = note.timestamp;
        self.texts.push(note.text.as_str());
    }

    fn close(self) -> MealEvent {
        MealEvent {
            first_timestamp: self.first.timestamp,
            latest_timestamp: self.latest_timestamp,
            text: self.texts.join(NOTE_SEPARATOR),
            anchor_glucose: self.first.glucose,
            member_count: self.texts.len(),
        }
    }
}

/// Merge raw notes into meal events using an anchored window
///
/// Notes are stably sorted by timestamp first, so notes sharing a timestamp
/// keep their input order. Every note lands in exactly one event.
pub fn merge_notes(notes: &[RawNote], window: Duration) -> Vec<MealEvent> {
    let mut ordered: Vec<&RawNote> = notes.iter().collect();
    ordered.sort_by_key(|n| n.timestamp);

    let mut ordered = ordered.into_iter();
    let Some(first) = ordered.next() else {
        return Vec::new();
    };

    let mut events = Vec::new();
    let mut pending = PendingEvent::open(first, window);

    for note in ordered {
        if pending.accepts(note) {
            pending.push(note);
        } else {
            let next = PendingEvent::open(note, window);
            events.push(std::mem::replace(&mut pending, next).close());
        }
    }
    events.push(pending.close());

    events
}
