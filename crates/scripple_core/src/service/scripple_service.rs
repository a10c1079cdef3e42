//! Note list use-case service.
//!
//! # Responsibility
//! - Load the store at startup and save it at shutdown.
//! - Translate menu rows (row 0 = add affordance) into store indices.
//! - Turn dictation outcomes into appends.
//!
//! # Invariants
//! - Row `r > 0` addresses note `r - 1`; the store itself never sees row 0.
//! - Unreadable snapshots fall back to an empty store; startup does not abort.
//! - Over-capacity appends surface as `StoreError::CapacityExceeded`.
//! - Log events carry lengths and indices only, never note text.

use crate::dictation::{DictationOutcome, DictationResolution, PendingDictation};
use crate::model::note::Note;
use crate::repo::snapshot_repo::{RepoError, SnapshotRepository};
use crate::store::note_store::{ChangeObserver, NoteStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Menu row reserved for the "add note" affordance.
pub const ADD_ROW: usize = 0;

/// Service error for note list use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Store rejected the operation.
    Store(StoreError),
    /// Storage medium failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Content of one menu row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuRow<'a> {
    /// The leading "+" row.
    Add,
    /// A stored note.
    Note(&'a str),
}

/// What the UI should do after a row is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Start a dictation request; its outcome goes to `apply_dictation`.
    StartDictation,
    /// Push a detail view showing the full note text.
    ShowDetail { text: String },
}

/// How a startup load ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// No snapshot was saved before.
    Empty,
    /// Snapshot decoded successfully.
    Restored,
    /// Snapshot was unreadable and discarded.
    Discarded,
}

/// Note list facade driven by the UI event loop.
pub struct ScrippleService<R: SnapshotRepository> {
    repo: R,
    store: NoteStore,
    load_source: LoadSource,
}

impl<R: SnapshotRepository> ScrippleService<R> {
    /// Loads the persisted snapshot, or starts empty.
    ///
    /// # Errors
    /// - `Repo` when the storage medium cannot be read.
    /// - `Store(InvalidCapacity)` when `capacity == 0`.
    pub fn start(repo: R, capacity: usize) -> ServiceResult<Self> {
        let (store, load_source) = match repo.load_snapshot()? {
            None => (NoteStore::new(capacity)?, LoadSource::Empty),
            Some(bytes) => match NoteStore::deserialize(&bytes, capacity) {
                Ok(store) => (store, LoadSource::Restored),
                Err(
                    err @ (StoreError::CorruptData(_) | StoreError::UnsupportedVersion { .. }),
                ) => {
                    warn!(
                        "event=service_start module=service status=fallback reason=unreadable_snapshot bytes={} error={}",
                        bytes.len(),
                        err
                    );
                    (NoteStore::new(capacity)?, LoadSource::Discarded)
                }
                Err(err) => return Err(err.into()),
            },
        };

        info!(
            "event=service_start module=service status=ok source={:?} len={} capacity={}",
            load_source,
            store.len(),
            store.capacity()
        );
        Ok(Self {
            repo,
            store,
            load_source,
        })
    }

    /// Reports whether startup restored, discarded, or found no snapshot.
    pub fn load_source(&self) -> LoadSource {
        self.load_source
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    /// Registers a redraw observer on the underlying store.
    pub fn subscribe(&mut self, observer: impl ChangeObserver + 'static) {
        self.store.subscribe(observer);
    }

    /// Number of menu rows, including the add row.
    pub fn row_count(&self) -> usize {
        self.store.len() + 1
    }

    /// Returns row content, or `None` past the last row.
    pub fn row(&self, row: usize) -> Option<MenuRow<'_>> {
        match row_to_index(row) {
            None => Some(MenuRow::Add),
            Some(index) => self
                .store
                .get(index)
                .ok()
                .map(|note| MenuRow::Note(note.as_str())),
        }
    }

    /// Handles a short press on `row`.
    pub fn select_row(&self, row: usize) -> ServiceResult<MenuAction> {
        match row_to_index(row) {
            None => Ok(MenuAction::StartDictation),
            Some(index) => {
                let note = self.store.get(index)?;
                Ok(MenuAction::ShowDetail {
                    text: note.as_str().to_owned(),
                })
            }
        }
    }

    /// Handles a long press on `row`. Returns whether a note was deleted.
    pub fn long_select_row(&mut self, row: usize) -> ServiceResult<bool> {
        match row_to_index(row) {
            None => Ok(false),
            Some(index) => {
                self.delete_note(index)?;
                Ok(true)
            }
        }
    }

    /// Appends a note and returns its store index.
    pub fn add_note(&mut self, text: impl Into<String>) -> ServiceResult<usize> {
        Ok(self.store.append(text)?)
    }

    /// Deletes the note at store index `index`.
    pub fn delete_note(&mut self, index: usize) -> ServiceResult<()> {
        Ok(self.store.remove_at(index)?)
    }

    /// Returns the note at store index `index`.
    pub fn note(&self, index: usize) -> ServiceResult<&Note> {
        Ok(self.store.get(index)?)
    }

    /// Applies one dictation outcome.
    ///
    /// Returns the new note index, or `None` when the recognizer failed.
    pub fn apply_dictation(&mut self, outcome: DictationOutcome) -> ServiceResult<Option<usize>> {
        match outcome {
            Ok(text) => {
                let index = self.add_note(text)?;
                Ok(Some(index))
            }
            Err(reason) => {
                warn!(
                    "event=dictation_failed module=service status=error reason={}",
                    reason.code()
                );
                Ok(None)
            }
        }
    }

    /// Waits for a pending dictation and applies it.
    ///
    /// Cancelled requests leave the store untouched and return `None`.
    pub fn resolve_dictation(&mut self, pending: PendingDictation) -> ServiceResult<Option<usize>> {
        match pending.wait() {
            DictationResolution::Completed(outcome) => self.apply_dictation(outcome),
            DictationResolution::Cancelled => {
                info!("event=dictation_cancelled module=service status=ok");
                Ok(None)
            }
        }
    }

    /// Writes the current store snapshot to the repository.
    pub fn save(&mut self) -> ServiceResult<()> {
        let bytes = self.store.serialize()?;
        self.repo.save_snapshot(&bytes)?;
        Ok(())
    }

    /// Saves and releases the service.
    pub fn shutdown(mut self) -> ServiceResult<R> {
        self.save()?;
        info!(
            "event=service_shutdown module=service status=ok len={}",
            self.store.len()
        );
        Ok(self.repo)
    }
}

fn row_to_index(row: usize) -> Option<usize> {
    row.checked_sub(ADD_ROW + 1)
}

#[cfg(test)]
mod tests {
    use super::row_to_index;

    #[test]
    fn add_row_has_no_store_index() {
        assert_eq!(row_to_index(0), None);
        assert_eq!(row_to_index(1), Some(0));
        assert_eq!(row_to_index(7), Some(6));
    }
}
