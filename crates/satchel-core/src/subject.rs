//! Subjects: the user-defined groups documents are filed under.
//!
//! A subject is a bare name. [`SubjectList`] holds the pure collection rules;
//! [`SubjectRegistry`] adds the persistence contract on top of it.

use std::sync::Arc;

use crate::{
  persist::{self, Loaded},
  store::KvStore,
};

/// Key under which the subject list is persisted.
pub const SUBJECTS_KEY: &str = "subjects";

/// Seed used when no subject list has been persisted yet.
pub const DEFAULT_SUBJECTS: [&str; 5] =
  ["Maths", "Science", "English", "Marketing", "Software Development"];

// ─── SubjectList ─────────────────────────────────────────────────────────────

/// An ordered set of subject names.
///
/// Names are compared after trimming, case-sensitively. The list never holds
/// an empty name or the same name twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectList {
  names: Vec<String>,
}

impl SubjectList {
  pub fn defaults() -> Self {
    Self {
      names: DEFAULT_SUBJECTS.iter().map(|s| (*s).to_owned()).collect(),
    }
  }

  /// Build a list from stored names, dropping blanks and duplicates.
  pub fn from_names(names: impl IntoIterator<Item = String>) -> Self {
    let mut list = Self::default();
    for name in names {
      list.add(&name);
    }
    list
  }

  pub fn as_slice(&self) -> &[String] { &self.names }

  pub fn contains(&self, name: &str) -> bool {
    let name = name.trim();
    self.names.iter().any(|n| n == name)
  }

  /// Append `name` (trimmed). Returns `false` if it was blank or present.
  pub fn add(&mut self, name: &str) -> bool {
    let name = name.trim();
    if name.is_empty() || self.contains(name) {
      return false;
    }
    self.names.push(name.to_owned());
    true
  }

  /// Remove every entry equal to `name` (trimmed). Returns `false` if none
  /// matched.
  pub fn remove(&mut self, name: &str) -> bool {
    let name = name.trim();
    let before = self.names.len();
    self.names.retain(|n| n != name);
    self.names.len() != before
  }
}

// ─── SubjectRegistry ─────────────────────────────────────────────────────────

/// The persisted subject list.
///
/// Every mutation rewrites the whole list under [`SUBJECTS_KEY`]. Storage
/// failures are logged and absorbed; the in-memory list stays authoritative
/// for the life of the registry.
pub struct SubjectRegistry<S> {
  store:    Arc<S>,
  subjects: SubjectList,
}

impl<S: KvStore> SubjectRegistry<S> {
  /// Load the persisted list. An absent list is seeded with
  /// [`DEFAULT_SUBJECTS`] and written; an unreadable one falls back to the
  /// defaults in memory only.
  pub fn open(store: Arc<S>) -> Self {
    match persist::load_json::<_, Vec<String>>(store.as_ref(), SUBJECTS_KEY) {
      Loaded::Value(names) => Self {
        store,
        subjects: SubjectList::from_names(names),
      },
      Loaded::Absent => {
        let registry = Self { store, subjects: SubjectList::defaults() };
        registry.save();
        registry
      }
      // Whatever is stored stays untouched until the next mutation.
      Loaded::Failed => Self { store, subjects: SubjectList::defaults() },
    }
  }

  pub fn list(&self) -> &[String] { self.subjects.as_slice() }

  pub fn contains(&self, name: &str) -> bool { self.subjects.contains(name) }

  pub fn add(&mut self, name: &str) -> bool {
    let added = self.subjects.add(name);
    if added {
      tracing::debug!(subject = name.trim(), "subject added");
      self.save();
    }
    added
  }

  pub fn remove(&mut self, name: &str) -> bool {
    let removed = self.subjects.remove(name);
    if removed {
      tracing::debug!(subject = name.trim(), "subject removed");
      self.save();
    }
    removed
  }

  fn save(&self) {
    persist::save_json(self.store.as_ref(), SUBJECTS_KEY, self.subjects.as_slice());
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::store::MemoryStore;

  fn stored(store: &MemoryStore) -> Vec<String> {
    serde_json::from_str(&store.peek(SUBJECTS_KEY).unwrap()).unwrap()
  }

  #[test]
  fn add_trims_and_dedupes() {
    let mut list = SubjectList::default();
    assert!(list.add("Maths "));
    assert!(!list.add("Maths"));
    assert!(!list.add("  Maths  "));
    assert!(list.add("maths"));
    assert_eq!(list.as_slice(), ["Maths", "maths"]);
  }

  #[test]
  fn add_ignores_blank() {
    let mut list = SubjectList::default();
    assert!(!list.add(""));
    assert!(!list.add("   \t"));
    assert!(list.as_slice().is_empty());
  }

  #[test]
  fn remove_is_exact_and_quiet() {
    let mut list = SubjectList::defaults();
    assert!(!list.remove("History"));
    assert!(!list.remove("maths"));
    assert!(list.remove("Maths"));
    assert!(!list.contains("Maths"));
    assert_eq!(list.as_slice().len(), 4);
  }

  #[test]
  fn remove_trims_like_add() {
    let mut list = SubjectList::defaults();
    assert!(list.remove(" Science\t"));
    assert!(!list.contains("Science"));
    assert!(!list.remove("  "));
  }

  #[test]
  fn from_names_drops_blank_and_duplicate_entries() {
    let list = SubjectList::from_names(
      ["A", " ", "B", "A "].into_iter().map(String::from),
    );
    assert_eq!(list.as_slice(), ["A", "B"]);
  }

  #[test]
  fn fresh_store_is_seeded() {
    let store = Arc::new(MemoryStore::new());
    let registry = SubjectRegistry::open(store.clone());
    assert_eq!(
      registry.list(),
      ["Maths", "Science", "English", "Marketing", "Software Development"]
    );
    assert_eq!(stored(&store), registry.list());
  }

  #[test]
  fn persisted_list_is_loaded_verbatim() {
    let store =
      Arc::new(MemoryStore::new().with_entry(SUBJECTS_KEY, r#"["History","Art"]"#));
    let registry = SubjectRegistry::open(store);
    assert_eq!(registry.list(), ["History", "Art"]);
  }

  #[test]
  fn persisted_empty_list_is_not_reseeded() {
    let store = Arc::new(MemoryStore::new().with_entry(SUBJECTS_KEY, "[]"));
    let registry = SubjectRegistry::open(store);
    assert!(registry.list().is_empty());
  }

  #[test]
  fn mutations_overwrite_store() {
    let store = Arc::new(MemoryStore::new());
    let mut registry = SubjectRegistry::open(store.clone());

    registry.add("History");
    assert_eq!(stored(&store).last().map(String::as_str), Some("History"));

    registry.remove("Maths");
    assert!(!stored(&store).contains(&"Maths".to_owned()));

    let reopened = SubjectRegistry::open(store);
    assert_eq!(reopened.list(), registry.list());
  }

  #[test]
  fn read_failure_falls_back_to_defaults() {
    let store =
      Arc::new(MemoryStore::new().with_entry(SUBJECTS_KEY, r#"["History"]"#));
    store.fail_reads(true);
    let registry = SubjectRegistry::open(store);
    assert_eq!(registry.list(), SubjectList::defaults().as_slice());
  }

  #[test]
  fn read_failure_leaves_stored_list_alone() {
    let store =
      Arc::new(MemoryStore::new().with_entry(SUBJECTS_KEY, r#"["History","Art"]"#));
    store.fail_reads(true);
    let during = SubjectRegistry::open(store.clone());
    assert_eq!(during.list(), SubjectList::defaults().as_slice());
    assert_eq!(stored(&store), ["History", "Art"]);

    store.fail_reads(false);
    let recovered = SubjectRegistry::open(store);
    assert_eq!(recovered.list(), ["History", "Art"]);
  }

  #[test]
  fn corrupt_value_falls_back_to_defaults() {
    let store = Arc::new(MemoryStore::new().with_entry(SUBJECTS_KEY, "{oops"));
    let registry = SubjectRegistry::open(store);
    assert_eq!(registry.list(), SubjectList::defaults().as_slice());
  }

  #[test]
  fn write_failure_keeps_memory_state() {
    let store = Arc::new(MemoryStore::new());
    let mut registry = SubjectRegistry::open(store.clone());
    store.fail_writes(true);

    assert!(registry.add("History"));
    assert!(registry.contains("History"));
    store.fail_writes(false);
    assert!(!stored(&store).contains(&"History".to_owned()));
  }
}
