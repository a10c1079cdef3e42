//! Fixed-capacity ordered note store.
//!
//! # Responsibility
//! - Own the ordered note sequence and its capacity bound.
//! - Notify registered observers after every successful mutation.
//! - Encode/decode the versioned snapshot written at shutdown.
//!
//! # Invariants
//! - `len() <= capacity()` always holds; capacity is checked before any write.
//! - Removal shifts later notes down by one; relative order is otherwise stable.
//! - Failed operations leave the store untouched and fire no notification.
//! - Decoding never trusts the stored count beyond `capacity`.

use crate::model::note::{Note, MAX_NOTE_BYTES};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Capacity used by the watch application.
pub const DEFAULT_CAPACITY: usize = 10;

/// Snapshot format version written by `serialize`.
pub const SNAPSHOT_VERSION: u32 = 1;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error kinds for store operations and snapshot decoding.
#[derive(Debug)]
pub enum StoreError {
    /// Store already holds `capacity` notes.
    CapacityExceeded { capacity: usize },
    /// Index does not address an existing note.
    IndexOutOfRange { index: usize, len: usize },
    /// Snapshot payload is malformed or violates store bounds.
    CorruptData(String),
    /// Snapshot was written by an incompatible format version.
    UnsupportedVersion { found: u32, supported: u32 },
    /// Capacity of zero was requested.
    InvalidCapacity(usize),
    /// Snapshot encoder failure.
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CapacityExceeded { capacity } => {
                write!(f, "note store is full (capacity {capacity})")
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "note index {index} out of range for {len} note(s)")
            }
            Self::CorruptData(details) => write!(f, "corrupt note snapshot: {details}"),
            Self::UnsupportedVersion { found, supported } => write!(
                f,
                "note snapshot version {found} is not supported (expected {supported})"
            ),
            Self::InvalidCapacity(value) => {
                write!(f, "note store capacity must be at least 1, got {value}")
            }
            Self::Encode(err) => write!(f, "failed to encode note snapshot: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            _ => None,
        }
    }
}

/// Receiver of "something changed" signals from a `NoteStore`.
pub trait ChangeObserver {
    fn notes_changed(&mut self);
}

impl<F: FnMut()> ChangeObserver for F {
    fn notes_changed(&mut self) {
        self()
    }
}

/// Ordered, capacity-bounded collection of notes.
pub struct NoteStore {
    capacity: usize,
    notes: Vec<Note>,
    observers: Vec<Box<dyn ChangeObserver>>,
}

impl Debug for NoteStore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteStore")
            .field("capacity", &self.capacity)
            .field("notes", &self.notes)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[derive(Serialize)]
struct SnapshotOut<'a> {
    version: u32,
    count: usize,
    notes: Vec<&'a str>,
}

#[derive(Deserialize)]
struct SnapshotVersion {
    version: u32,
}

#[derive(Deserialize)]
struct SnapshotIn {
    count: usize,
    notes: Vec<String>,
}

impl NoteStore {
    /// Creates an empty store.
    ///
    /// # Errors
    /// - `InvalidCapacity` when `capacity == 0`.
    pub fn new(capacity: usize) -> StoreResult<Self> {
        if capacity == 0 {
            return Err(StoreError::InvalidCapacity(capacity));
        }
        Ok(Self {
            capacity,
            notes: Vec::with_capacity(capacity),
            observers: Vec::new(),
        })
    }

    /// Creates an empty store with `DEFAULT_CAPACITY`.
    pub fn with_default_capacity() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            notes: Vec::with_capacity(DEFAULT_CAPACITY),
            observers: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.notes.len() >= self.capacity
    }

    /// Iterates notes in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter()
    }

    /// Copies note texts in display order.
    pub fn texts(&self) -> Vec<String> {
        self.notes.iter().map(|note| note.as_str().to_owned()).collect()
    }

    /// Registers an observer fired after each successful mutation.
    pub fn subscribe(&mut self, observer: impl ChangeObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Appends one note at the end of the display order.
    ///
    /// Text longer than `MAX_NOTE_BYTES` is truncated; the append still succeeds.
    ///
    /// # Errors
    /// - `CapacityExceeded` when the store is full. Nothing is written.
    pub fn append(&mut self, text: impl Into<String>) -> StoreResult<usize> {
        if self.is_full() {
            debug!(
                "event=note_append module=store status=rejected reason=capacity_exceeded capacity={}",
                self.capacity
            );
            return Err(StoreError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let text = text.into();
        let original_len = text.len();
        let (note, truncated) = Note::bounded(text);
        if truncated {
            warn!(
                "event=note_truncated module=store status=ok original_bytes={} kept_bytes={}",
                original_len,
                note.len()
            );
        }

        self.notes.push(note);
        let index = self.notes.len() - 1;
        debug!(
            "event=note_append module=store status=ok index={} len={}",
            index,
            self.notes.len()
        );
        self.notify();
        Ok(index)
    }

    /// Removes the note at `index`, shifting later notes one position earlier.
    ///
    /// # Errors
    /// - `IndexOutOfRange` when `index >= len()`.
    pub fn remove_at(&mut self, index: usize) -> StoreResult<()> {
        self.check_index(index)?;
        self.notes.remove(index);
        debug!(
            "event=note_remove module=store status=ok index={} len={}",
            index,
            self.notes.len()
        );
        self.notify();
        Ok(())
    }

    /// Returns the note at `index`.
    ///
    /// # Errors
    /// - `IndexOutOfRange` when `index >= len()`.
    pub fn get(&self, index: usize) -> StoreResult<&Note> {
        self.check_index(index)?;
        Ok(&self.notes[index])
    }

    /// Encodes `{ version, count, notes }` as JSON bytes.
    pub fn serialize(&self) -> StoreResult<Vec<u8>> {
        let snapshot = SnapshotOut {
            version: SNAPSHOT_VERSION,
            count: self.notes.len(),
            notes: self.notes.iter().map(Note::as_str).collect(),
        };
        serde_json::to_vec(&snapshot).map_err(StoreError::Encode)
    }

    /// Decodes a snapshot into a fresh store bounded by `capacity`.
    ///
    /// # Errors
    /// - `CorruptData` for malformed payloads, `count > capacity`, a count that
    ///   disagrees with the note list, or oversize note text.
    /// - `UnsupportedVersion` when the version tag differs from `SNAPSHOT_VERSION`.
    /// - `InvalidCapacity` when `capacity == 0`.
    pub fn deserialize(bytes: &[u8], capacity: usize) -> StoreResult<Self> {
        let mut store = Self::new(capacity)?;

        let header: SnapshotVersion = serde_json::from_slice(bytes)
            .map_err(|err| StoreError::CorruptData(format!("unreadable header: {err}")))?;
        if header.version != SNAPSHOT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: header.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        let snapshot: SnapshotIn = serde_json::from_slice(bytes)
            .map_err(|err| StoreError::CorruptData(format!("unreadable body: {err}")))?;
        if snapshot.count > capacity {
            return Err(StoreError::CorruptData(format!(
                "stored count {} exceeds capacity {capacity}",
                snapshot.count
            )));
        }
        if snapshot.count != snapshot.notes.len() {
            return Err(StoreError::CorruptData(format!(
                "stored count {} disagrees with {} stored note(s)",
                snapshot.count,
                snapshot.notes.len()
            )));
        }

        for (index, text) in snapshot.notes.into_iter().enumerate() {
            let note = Note::try_exact(text).ok_or_else(|| {
                StoreError::CorruptData(format!(
                    "note {index} exceeds {MAX_NOTE_BYTES} bytes"
                ))
            })?;
            store.notes.push(note);
        }

        Ok(store)
    }

    fn check_index(&self, index: usize) -> StoreResult<()> {
        if index >= self.notes.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.notes.len(),
            });
        }
        Ok(())
    }

    fn notify(&mut self) {
        for observer in &mut self.observers {
            observer.notes_changed();
        }
    }
}

impl Default for NoteStore {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteStore, StoreError, DEFAULT_CAPACITY};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn zero_capacity_is_rejected() {
        let err = NoteStore::new(0).expect_err("zero capacity must fail");
        assert!(matches!(err, StoreError::InvalidCapacity(0)));
    }

    #[test]
    fn default_store_uses_default_capacity() {
        let store = NoteStore::default();
        assert_eq!(store.capacity(), DEFAULT_CAPACITY);
        assert!(store.is_empty());
    }

    #[test]
    fn observers_fire_once_per_successful_mutation_only() {
        let fired = Rc::new(Cell::new(0));
        let mut store = NoteStore::new(1).expect("capacity 1 is valid");
        let counter = Rc::clone(&fired);
        store.subscribe(move || counter.set(counter.get() + 1));

        store.append("one").expect("first append fits");
        assert_eq!(fired.get(), 1);

        store.append("two").expect_err("second append overflows");
        store.remove_at(3).expect_err("index is out of range");
        let _ = store.get(0).expect("note exists");
        let _ = store.serialize().expect("serialize succeeds");
        assert_eq!(fired.get(), 1);

        store.remove_at(0).expect("remove existing note");
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn deserialized_store_has_no_observers() {
        let fired = Rc::new(Cell::new(false));
        let mut store = NoteStore::new(2).expect("valid capacity");
        let flag = Rc::clone(&fired);
        store.subscribe(move || flag.set(true));
        store.append("a").expect("append");
        fired.set(false);

        let bytes = store.serialize().expect("serialize");
        let mut restored = NoteStore::deserialize(&bytes, 2).expect("deserialize");
        restored.append("b").expect("append on restored");
        assert!(!fired.get());
    }
}
