//! Entry store
//!
//! Sole owner of the canonical entry list. Every mutation goes through here,
//! is written back to the entry document, and is announced to subscribers.
//!
//! The list is kept newest-first at all times. Mutations hold the write lock
//! for the whole change-then-persist sequence, so writers are serialized even
//! when the store is shared between threads behind an `Arc`.
//!
//! Disk problems never roll back the in-memory list: a missing or corrupt
//! document loads as empty history, and a failed write is logged and
//! remembered (see [`EntryStore::last_write_error`]) while the change stands.
//! The next mutation writes the full current list again.
//!
//! A document that exists but can't be used is moved aside before the store
//! starts empty. While it can't be moved, no write replaces it.

use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;
use std::sync::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, error, info, warn};

use crate::error::{NightlyError, NightlyResult};
use crate::models::{Entry, EntryId, Mood};

use super::codec;
use super::events::{StoreChange, Subscribers};
use super::file_io::{quarantine, read_optional, write_bytes_atomic};

/// Result of reading the entry document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// No document yet
    FirstRun,
    Loaded { count: usize },
    /// The document couldn't be used; the store started empty
    Recovered {
        reason: String,
        /// Where the unreadable document was moved, if it was
        moved_to: Option<PathBuf>,
    },
}

#[derive(Default)]
struct StoreState {
    entries: Vec<Entry>,
    loaded: bool,
    /// The document on disk could be neither read nor moved aside
    unread_document: bool,
}

/// Store for journal entries backed by a single JSON document
pub struct EntryStore {
    path: PathBuf,
    state: RwLock<StoreState>,
    subscribers: Subscribers,
    last_write_error: Mutex<Option<String>>,
}

impl EntryStore {
    /// Create a store for the document at `path`
    ///
    /// Nothing is read until [`load`](Self::load) or the first access.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            state: RwLock::new(StoreState::default()),
            subscribers: Subscribers::new(),
            last_write_error: Mutex::new(None),
        }
    }

    /// Path of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the backing document, replacing the in-memory list
    ///
    /// A missing document means a first run; an unreadable or corrupt one is
    /// moved aside and the store starts empty. Neither is an error.
    pub fn load(&self) -> NightlyResult<LoadOutcome> {
        let mut state = self.lock_write()?;
        Ok(self.load_into(&mut state))
    }

    /// Add a new entry stamped now
    pub fn add(
        &self,
        questions: Vec<String>,
        answers: Vec<String>,
        mood: Mood,
    ) -> NightlyResult<EntryId> {
        self.insert(Entry::new(questions, answers, mood))
    }

    /// Insert a fully-formed entry at its date position
    ///
    /// An existing entry with the same id is replaced. Among entries with the
    /// same date, the most recently inserted comes first.
    pub fn insert(&self, entry: Entry) -> NightlyResult<EntryId> {
        let id = entry.id();
        let mut state = self.write_state()?;

        state.entries.retain(|e| e.id() != id);
        let position = state
            .entries
            .partition_point(|e| e.date() > entry.date());
        state.entries.insert(position, entry);

        self.persist(&mut state);
        self.subscribers.notify(StoreChange::Added(id));
        Ok(id)
    }

    /// Remove entries by id; unknown ids are ignored
    ///
    /// Returns how many entries were removed.
    pub fn delete(&self, ids: &[EntryId]) -> NightlyResult<usize> {
        let mut state = self.write_state()?;

        let mut removed = Vec::new();
        state.entries.retain(|e| {
            if ids.contains(&e.id()) {
                removed.push(e.id());
                false
            } else {
                true
            }
        });

        if removed.is_empty() {
            return Ok(0);
        }

        self.persist(&mut state);
        let count = removed.len();
        self.subscribers.notify(StoreChange::Deleted(removed));
        Ok(count)
    }

    /// Remove entries by position in the newest-first list
    ///
    /// Out-of-range positions are ignored.
    pub fn delete_at(&self, offsets: &[usize]) -> NightlyResult<usize> {
        let ids: Vec<EntryId> = {
            let state = self.read_state()?;
            offsets
                .iter()
                .filter_map(|&i| state.entries.get(i).map(Entry::id))
                .collect()
        };
        self.delete(&ids)
    }

    /// Replace the answers of an entry, keeping its id, date, questions and mood
    ///
    /// Returns `false` (and changes nothing) if the id is unknown.
    pub fn update_answers(&self, id: EntryId, answers: Vec<String>) -> NightlyResult<bool> {
        self.modify(id, |entry| entry.set_answers(answers))
    }

    /// Replace only the mood of an entry
    pub fn update_mood(&self, id: EntryId, mood: Mood) -> NightlyResult<bool> {
        self.modify(id, |entry| entry.set_mood(mood))
    }

    /// Rewrite questions, answers and mood together
    ///
    /// This is the only operation that changes an entry's question snapshot.
    pub fn update(
        &self,
        id: EntryId,
        questions: Vec<String>,
        answers: Vec<String>,
        mood: Mood,
    ) -> NightlyResult<bool> {
        self.modify(id, |entry| entry.replace_content(questions, answers, mood))
    }

    /// Snapshot of all entries, newest first
    pub fn entries(&self) -> NightlyResult<Vec<Entry>> {
        Ok(self.read_state()?.entries.clone())
    }

    pub fn get(&self, id: EntryId) -> NightlyResult<Option<Entry>> {
        let state = self.read_state()?;
        Ok(state.entries.iter().find(|e| e.id() == id).cloned())
    }

    /// Find the single entry whose id starts with `text`
    ///
    /// Ambiguous prefixes match nothing.
    pub fn find_by_prefix(&self, text: &str) -> NightlyResult<Option<Entry>> {
        let state = self.read_state()?;
        let mut matches = state.entries.iter().filter(|e| e.id().matches_prefix(text));

        match (matches.next(), matches.next()) {
            (Some(entry), None) => Ok(Some(entry.clone())),
            _ => Ok(None),
        }
    }

    pub fn len(&self) -> NightlyResult<usize> {
        Ok(self.read_state()?.entries.len())
    }

    pub fn is_empty(&self) -> NightlyResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Receive a [`StoreChange`] after every mutation
    pub fn subscribe(&self) -> Receiver<StoreChange> {
        self.subscribers.subscribe()
    }

    /// Message from the most recent failed write, cleared by the next success
    pub fn last_write_error(&self) -> Option<String> {
        self.last_write_error
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }

    fn modify<F>(&self, id: EntryId, change: F) -> NightlyResult<bool>
    where
        F: FnOnce(&mut Entry),
    {
        let mut state = self.write_state()?;

        let Some(entry) = state.entries.iter_mut().find(|e| e.id() == id) else {
            debug!("No entry {} to update", id);
            return Ok(false);
        };
        change(entry);

        self.persist(&mut state);
        self.subscribers.notify(StoreChange::Updated(id));
        Ok(true)
    }

    fn load_into(&self, state: &mut StoreState) -> LoadOutcome {
        state.unread_document = false;

        let outcome = match read_optional(&self.path) {
            Ok(None) => {
                info!("No entry document at {}, starting fresh", self.path.display());
                state.entries = Vec::new();
                LoadOutcome::FirstRun
            }
            Ok(Some(bytes)) => match codec::decode(&bytes) {
                Ok(mut entries) => {
                    // Stable, so equal dates keep their document order
                    entries.sort_by(|a, b| b.date().cmp(&a.date()));
                    dedupe_ids(&mut entries);
                    let count = entries.len();
                    info!("Loaded {} entries from {}", count, self.path.display());
                    state.entries = entries;
                    LoadOutcome::Loaded { count }
                }
                Err(e) => {
                    warn!("Ignoring unreadable entry document: {}", e);
                    self.recover(state, e)
                }
            },
            Err(e) => {
                warn!("Could not read entry document, starting empty: {}", e);
                self.recover(state, e)
            }
        };

        state.loaded = true;
        self.subscribers.notify(StoreChange::Loaded {
            count: state.entries.len(),
        });
        outcome
    }

    /// Start empty and move the document that couldn't be used out of the way
    ///
    /// If it can't be moved, writes are held back until it can (see
    /// [`persist`](Self::persist)).
    fn recover(&self, state: &mut StoreState, reason: NightlyError) -> LoadOutcome {
        state.entries = Vec::new();

        let moved_to = match quarantine(&self.path) {
            Ok(target) => {
                warn!("Moved unreadable document to {}", target.display());
                Some(target)
            }
            Err(move_err) => {
                warn!("{}; it will not be overwritten", move_err);
                state.unread_document = true;
                None
            }
        };

        LoadOutcome::Recovered {
            reason: reason.to_string(),
            moved_to,
        }
    }

    /// Write the full list; failures are logged and remembered, never returned
    fn persist(&self, state: &mut StoreState) {
        let result = self
            .clear_unread_document(state)
            .and_then(|()| codec::encode(&state.entries))
            .and_then(|bytes| write_bytes_atomic(&self.path, &bytes));

        let message = match result {
            Ok(()) => {
                debug!(
                    "Wrote {} entries to {}",
                    state.entries.len(),
                    self.path.display()
                );
                None
            }
            Err(e) => {
                let e = match e {
                    NightlyError::WriteFailure(_) => e,
                    other => NightlyError::WriteFailure(other.to_string()),
                };
                error!("Failed to save entries: {}", e);
                Some(e.to_string())
            }
        };

        if let Ok(mut last) = self.last_write_error.lock() {
            *last = message;
        }
    }

    /// Retry moving aside a document that was never read
    ///
    /// Fails while it is still in place, so it is never replaced by a list
    /// that doesn't contain its entries.
    fn clear_unread_document(&self, state: &mut StoreState) -> NightlyResult<()> {
        if !state.unread_document {
            return Ok(());
        }

        if self.path.symlink_metadata().is_ok() {
            let target = quarantine(&self.path).map_err(|e| {
                NightlyError::WriteFailure(format!(
                    "{} was never read and is kept as is: {}",
                    self.path.display(),
                    e
                ))
            })?;
            warn!("Moved unreadable document to {}", target.display());
        }

        state.unread_document = false;
        Ok(())
    }

    fn lock_write(&self) -> NightlyResult<RwLockWriteGuard<'_, StoreState>> {
        self.state
            .write()
            .map_err(|e| NightlyError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Write access, loading first if nothing has been loaded yet
    fn write_state(&self) -> NightlyResult<RwLockWriteGuard<'_, StoreState>> {
        let mut state = self.lock_write()?;
        if !state.loaded {
            self.load_into(&mut state);
        }
        Ok(state)
    }

    /// Read access, loading first if nothing has been loaded yet
    fn read_state(&self) -> NightlyResult<RwLockReadGuard<'_, StoreState>> {
        let state = self
            .state
            .read()
            .map_err(|e| NightlyError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        if state.loaded {
            return Ok(state);
        }
        drop(state);

        drop(self.write_state()?);
        self.state
            .read()
            .map_err(|e| NightlyError::Storage(format!("Failed to acquire read lock: {}", e)))
    }
}

/// Keep the first (newest) copy of each id
fn dedupe_ids(entries: &mut Vec<Entry>) {
    let mut seen = std::collections::HashSet::new();
    let before = entries.len();
    entries.retain(|e| seen.insert(e.id()));
    if entries.len() < before {
        warn!("Dropped {} duplicate entries", before - entries.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, EntryStore) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("nightly_entries.json");
        let store = EntryStore::new(path);
        (temp_dir, store)
    }

    fn questions() -> Vec<String> {
        vec!["Were we resentful?".into(), "What are we grateful for today?".into()]
    }

    fn entry_at(offset: Duration, mood: Mood) -> Entry {
        Entry::from_parts(
            EntryId::new(),
            Utc::now() + offset,
            questions(),
            vec!["answer".into(), "thanks".into()],
            mood,
        )
    }

    fn assert_newest_first(entries: &[Entry]) {
        assert!(entries.windows(2).all(|w| w[0].date() >= w[1].date()));
    }

    #[test]
    fn test_first_run_load() {
        let (_temp_dir, store) = create_test_store();
        assert_eq!(store.load().unwrap(), LoadOutcome::FirstRun);
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_add_and_get() {
        let (_temp_dir, store) = create_test_store();
        store.load().unwrap();

        let id = store
            .add(questions(), vec!["No".into(), "Coffee".into()], Mood::Good)
            .unwrap();

        let entry = store.get(id).unwrap().unwrap();
        assert_eq!(entry.answers(), &["No".to_string(), "Coffee".to_string()]);
        assert_eq!(entry.mood(), Mood::Good);
        assert!(store.path().exists());
    }

    #[test]
    fn test_add_pairs_answers() {
        let (_temp_dir, store) = create_test_store();

        let id = store.add(questions(), vec!["Only".into()], Mood::Neutral).unwrap();

        let entry = store.get(id).unwrap().unwrap();
        assert_eq!(entry.answers().len(), entry.questions().len());
    }

    #[test]
    fn test_insert_keeps_newest_first() {
        let (_temp_dir, store) = create_test_store();
        store.load().unwrap();

        let middle = entry_at(Duration::hours(-5), Mood::Neutral);
        let newest = entry_at(Duration::zero(), Mood::Good);
        let oldest = entry_at(Duration::days(-3), Mood::Bad);

        store.insert(middle.clone()).unwrap();
        store.insert(newest.clone()).unwrap();
        store.insert(oldest.clone()).unwrap();

        let entries = store.entries().unwrap();
        assert_eq!(entries, vec![newest, middle, oldest]);
    }

    #[test]
    fn test_equal_dates_newest_call_first() {
        let (_temp_dir, store) = create_test_store();
        let date = Utc::now();

        let first = Entry::from_parts(EntryId::new(), date, questions(), vec![], Mood::Bad);
        let second = Entry::from_parts(EntryId::new(), date, questions(), vec![], Mood::Good);
        store.insert(first.clone()).unwrap();
        store.insert(second.clone()).unwrap();

        let ids: Vec<_> = store.entries().unwrap().iter().map(Entry::id).collect();
        assert_eq!(ids, vec![second.id(), first.id()]);
    }

    #[test]
    fn test_many_adds_stay_sorted() {
        let (_temp_dir, store) = create_test_store();
        for offset in [3, -7, 12, 0, -1, 5, -20] {
            store.insert(entry_at(Duration::hours(offset), Mood::Neutral)).unwrap();
        }
        let entries = store.entries().unwrap();
        assert_eq!(entries.len(), 7);
        assert_newest_first(&entries);
    }

    #[test]
    fn test_insert_same_id_replaces() {
        let (_temp_dir, store) = create_test_store();
        let entry = entry_at(Duration::zero(), Mood::Bad);
        store.insert(entry.clone()).unwrap();

        let replacement = Entry::from_parts(
            entry.id(),
            entry.date(),
            questions(),
            vec!["changed".into()],
            Mood::Good,
        );
        store.insert(replacement.clone()).unwrap();

        assert_eq!(store.entries().unwrap(), vec![replacement]);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, store) = create_test_store();
        let a = entry_at(Duration::hours(-2), Mood::VeryGood);
        let b = entry_at(Duration::zero(), Mood::VeryBad);
        store.insert(a.clone()).unwrap();
        store.insert(b.clone()).unwrap();

        let path = temp_dir.path().join("data").join("nightly_entries.json");
        let reloaded = EntryStore::new(path);
        assert_eq!(reloaded.load().unwrap(), LoadOutcome::Loaded { count: 2 });
        assert_eq!(reloaded.entries().unwrap(), vec![b, a]);
    }

    #[test]
    fn test_load_sorts_unsorted_document() {
        let (_temp_dir, store) = create_test_store();
        let old = entry_at(Duration::days(-2), Mood::Neutral);
        let new = entry_at(Duration::zero(), Mood::Neutral);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), codec::encode(&[old.clone(), new.clone()]).unwrap()).unwrap();

        store.load().unwrap();

        assert_eq!(store.entries().unwrap(), vec![new, old]);
    }

    #[test]
    fn test_corrupt_document_loads_empty_and_is_kept_aside() {
        let (_temp_dir, store) = create_test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ definitely not entries").unwrap();

        let outcome = store.load().unwrap();

        let LoadOutcome::Recovered { moved_to, .. } = outcome else {
            panic!("expected recovery, got {:?}", outcome);
        };
        assert!(store.is_empty().unwrap());
        let moved_to = moved_to.unwrap();
        assert_eq!(fs::read_to_string(moved_to).unwrap(), "{ definitely not entries");

        // The store keeps working and writes a fresh document
        store.add(questions(), vec![], Mood::Neutral).unwrap();
        assert_eq!(codec::decode(&fs::read(store.path()).unwrap()).unwrap().len(), 1);
    }

    #[test]
    fn test_legacy_document_without_mood() {
        let (_temp_dir, store) = create_test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            r#"[{"id": "550e8400-e29b-41d4-a716-446655440000",
                 "date": "2025-09-17T21:00:00Z",
                 "questions": ["Were we selfish?"], "answers": ["Maybe"]}]"#,
        )
        .unwrap();

        assert_eq!(store.load().unwrap(), LoadOutcome::Loaded { count: 1 });
        assert_eq!(store.entries().unwrap()[0].mood(), Mood::Neutral);
    }

    #[test]
    fn test_access_before_load_auto_loads() {
        let (temp_dir, store) = create_test_store();
        store.add(questions(), vec!["x".into()], Mood::Good).unwrap();

        let path = temp_dir.path().join("data").join("nightly_entries.json");
        let fresh = EntryStore::new(path);
        assert_eq!(fresh.len().unwrap(), 1);

        // Mutating before load must not clobber what is on disk
        fresh.add(questions(), vec!["y".into()], Mood::Bad).unwrap();
        assert_eq!(fresh.len().unwrap(), 2);
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let (_temp_dir, store) = create_test_store();
        let keep = entry_at(Duration::hours(-1), Mood::Good);
        let gone = entry_at(Duration::zero(), Mood::Bad);
        store.insert(keep.clone()).unwrap();
        store.insert(gone.clone()).unwrap();

        assert_eq!(store.delete(&[gone.id()]).unwrap(), 1);

        assert_eq!(store.entries().unwrap(), vec![keep]);
        assert!(store.get(gone.id()).unwrap().is_none());
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let (_temp_dir, store) = create_test_store();
        store.insert(entry_at(Duration::zero(), Mood::Good)).unwrap();
        let before = store.len().unwrap();

        assert_eq!(store.delete(&[EntryId::new()]).unwrap(), 0);
        assert_eq!(store.len().unwrap(), before);
    }

    #[test]
    fn test_delete_at_positions() {
        let (_temp_dir, store) = create_test_store();
        let newest = entry_at(Duration::zero(), Mood::Good);
        let middle = entry_at(Duration::hours(-1), Mood::Neutral);
        let oldest = entry_at(Duration::hours(-2), Mood::Bad);
        for e in [&oldest, &middle, &newest] {
            store.insert(e.clone()).unwrap();
        }

        assert_eq!(store.delete_at(&[1, 99]).unwrap(), 1);

        assert_eq!(store.entries().unwrap(), vec![newest, oldest]);
    }

    #[test]
    fn test_update_answers_preserves_identity() {
        let (_temp_dir, store) = create_test_store();
        let entry = entry_at(Duration::zero(), Mood::VeryGood);
        store.insert(entry.clone()).unwrap();

        assert!(store
            .update_answers(entry.id(), vec!["revised".into(), "more".into(), "extra".into()])
            .unwrap());

        let updated = store.get(entry.id()).unwrap().unwrap();
        assert_eq!(updated.id(), entry.id());
        assert_eq!(updated.date(), entry.date());
        assert_eq!(updated.questions(), entry.questions());
        assert_eq!(updated.mood(), Mood::VeryGood);
        assert_eq!(updated.answers(), &["revised".to_string(), "more".to_string()]);
    }

    #[test]
    fn test_update_mood_only() {
        let (_temp_dir, store) = create_test_store();
        let entry = entry_at(Duration::zero(), Mood::Bad);
        store.insert(entry.clone()).unwrap();

        assert!(store.update_mood(entry.id(), Mood::Good).unwrap());

        let updated = store.get(entry.id()).unwrap().unwrap();
        assert_eq!(updated.mood(), Mood::Good);
        assert_eq!(updated.answers(), entry.answers());
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let (_temp_dir, store) = create_test_store();
        store.insert(entry_at(Duration::zero(), Mood::Bad)).unwrap();
        let before = store.entries().unwrap();

        assert!(!store.update_answers(EntryId::new(), vec!["x".into()]).unwrap());
        assert!(!store.update_mood(EntryId::new(), Mood::Good).unwrap());
        assert_eq!(store.entries().unwrap(), before);
    }

    #[test]
    fn test_combined_update_replaces_questions() {
        let (_temp_dir, store) = create_test_store();
        let entry = entry_at(Duration::zero(), Mood::Neutral);
        store.insert(entry.clone()).unwrap();

        store
            .update(entry.id(), vec!["One prompt?".into()], vec![], Mood::Good)
            .unwrap();

        let updated = store.get(entry.id()).unwrap().unwrap();
        assert_eq!(updated.date(), entry.date());
        assert_eq!(updated.questions(), &["One prompt?".to_string()]);
        assert_eq!(updated.answers(), &[String::new()]);
    }

    #[test]
    fn test_find_by_prefix() {
        let (_temp_dir, store) = create_test_store();
        let entry = entry_at(Duration::zero(), Mood::Good);
        store.insert(entry.clone()).unwrap();

        let found = store.find_by_prefix(&entry.id().short()).unwrap().unwrap();
        assert_eq!(found.id(), entry.id());
        assert!(store.find_by_prefix("zzzz").unwrap().is_none());
    }

    #[test]
    fn test_subscribers_see_each_mutation() {
        let (_temp_dir, store) = create_test_store();
        store.load().unwrap();
        let rx = store.subscribe();

        let id = store.add(questions(), vec![], Mood::Neutral).unwrap();
        store.update_mood(id, Mood::Good).unwrap();
        store.update_mood(EntryId::new(), Mood::Good).unwrap();
        store.delete(&[id]).unwrap();

        let changes: Vec<_> = rx.try_iter().collect();
        assert_eq!(
            changes,
            vec![
                StoreChange::Added(id),
                StoreChange::Updated(id),
                StoreChange::Deleted(vec![id]),
            ]
        );
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let temp_dir = TempDir::new().unwrap();
        // A directory on the temp path makes every write fail
        let path = temp_dir.path().join("nightly_entries.json");
        fs::create_dir(temp_dir.path().join("nightly_entries.json.tmp")).unwrap();
        let store = EntryStore::new(path);
        assert_eq!(store.load().unwrap(), LoadOutcome::FirstRun);

        let id = store.add(questions(), vec!["kept".into()], Mood::Good).unwrap();

        assert!(store.get(id).unwrap().is_some());
        let message = store.last_write_error().unwrap();
        assert!(message.starts_with("Write failure"));
    }

    #[test]
    fn test_successful_write_clears_last_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nightly_entries.json");
        let blocker = temp_dir.path().join("nightly_entries.json.tmp");
        fs::create_dir(&blocker).unwrap();
        let store = EntryStore::new(path.clone());
        store.load().unwrap();

        store.add(questions(), vec![], Mood::Neutral).unwrap();
        assert!(store.last_write_error().is_some());

        fs::remove_dir(&blocker).unwrap();
        store.add(questions(), vec![], Mood::Neutral).unwrap();

        assert!(store.last_write_error().is_none());
        let on_disk = codec::decode(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(on_disk.len(), 2);
    }

    #[test]
    fn test_shared_between_threads() {
        let (_temp_dir, store) = create_test_store();
        let store = Arc::new(store);

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store
                        .add(questions(), vec![format!("thread {}", i)], Mood::Neutral)
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len().unwrap(), 4);
        let on_disk = codec::decode(&fs::read(store.path()).unwrap()).unwrap();
        assert_eq!(on_disk.len(), 4);
        assert_newest_first(&store.entries().unwrap());
    }

    #[test]
    fn test_duplicate_ids_load_as_one_entry() {
        let (_temp_dir, store) = create_test_store();
        let id = EntryId::new();
        let now = Utc::now();
        let old = Entry::from_parts(id, now - Duration::days(1), questions(), vec!["old".into()], Mood::Bad);
        let new = Entry::from_parts(id, now, questions(), vec!["new".into()], Mood::Good);

        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), codec::encode(&[old, new]).unwrap()).unwrap();

        assert_eq!(store.load().unwrap(), LoadOutcome::Loaded { count: 1 });
        let entries = store.entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].answers()[0], "new");
        assert_eq!(entries[0].mood(), Mood::Good);
    }

    #[test]
    fn test_repeated_corrupt_loads_keep_every_copy() {
        let (_temp_dir, store) = create_test_store();
        let data_dir = store.path().parent().unwrap().to_path_buf();
        fs::create_dir_all(&data_dir).unwrap();

        fs::write(store.path(), "first broken document").unwrap();
        store.load().unwrap();
        fs::write(store.path(), "second broken document").unwrap();
        store.load().unwrap();

        let mut kept: Vec<String> = fs::read_dir(&data_dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p != store.path())
            .map(|p| fs::read_to_string(p).unwrap())
            .collect();
        kept.sort();
        assert_eq!(kept, vec!["first broken document", "second broken document"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_document_is_moved_aside() {
        let (_temp_dir, store) = create_test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        // A link to itself can't be read (ELOOP) but can be renamed
        std::os::unix::fs::symlink(store.path(), store.path()).unwrap();

        let outcome = store.load().unwrap();

        let LoadOutcome::Recovered { moved_to, .. } = outcome else {
            panic!("expected recovery, got {:?}", outcome);
        };
        let moved_to = moved_to.unwrap();
        assert!(moved_to.symlink_metadata().unwrap().file_type().is_symlink());

        store.add(questions(), vec!["fresh".into()], Mood::Good).unwrap();
        assert!(store.last_write_error().is_none());
        assert_eq!(codec::decode(&fs::read(store.path()).unwrap()).unwrap().len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_document_that_cannot_move_is_not_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        // Long enough that the quarantine name exceeds the file name limit
        let path = temp_dir.path().join("j".repeat(240));
        std::os::unix::fs::symlink(&path, &path).unwrap();
        let store = EntryStore::new(path.clone());

        let outcome = store.load().unwrap();
        assert!(matches!(outcome, LoadOutcome::Recovered { moved_to: None, .. }));

        let id = store.add(questions(), vec!["kept".into()], Mood::Good).unwrap();

        assert!(store.get(id).unwrap().is_some());
        assert!(store.last_write_error().unwrap().contains("never read"));
        assert!(path.symlink_metadata().unwrap().file_type().is_symlink());

        // Once the document is gone the next mutation writes everything
        fs::remove_file(&path).unwrap();
        store.add(questions(), vec!["later".into()], Mood::Neutral).unwrap();

        assert!(store.last_write_error().is_none());
        assert_eq!(codec::decode(&fs::read(&path).unwrap()).unwrap().len(), 2);
    }
}
