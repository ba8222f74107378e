//! Tasks and notes
//!
//! Both live in the key-value store as JSON arrays under `tasks` and
//! `notes`. Other tools create and edit them; the dashboard only counts
//! them, lists pending tasks and appends notes. Fields it does not know
//! about are carried through untouched.

use super::error::StoreResult;
use super::kv::KeyValueStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Storage key for the task list
pub const TASKS_KEY: &str = "tasks";
/// Storage key for the note list
pub const NOTES_KEY: &str = "notes";

/// A task; only `completed` is interpreted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub completed: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        let mut extra = Map::new();
        extra.insert("title".to_string(), Value::String(title.into()));
        Self {
            completed: false,
            extra,
        }
    }

    /// Builder: mark as done
    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }

    /// Best-effort display label
    pub fn label(&self) -> &str {
        ["title", "text", "name"]
            .iter()
            .find_map(|k| self.extra.get(*k).and_then(Value::as_str))
            .unwrap_or("(untitled task)")
    }
}

/// An opaque note
///
/// Notes written elsewhere may be plain strings or objects; notes added
/// here are `{id, text, created_at}` objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Note(pub Value);

impl Note {
    /// Create a note with a fresh id and the current time
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_timestamp(text, Utc::now())
    }

    pub fn with_timestamp(text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Note(serde_json::json!({
            "id": uuid::Uuid::new_v4().to_string(),
            "text": text.into(),
            "created_at": created_at.to_rfc3339(),
        }))
    }

    /// Text content, if the note has any recognizable text
    pub fn text(&self) -> Option<&str> {
        match &self.0 {
            Value::String(s) => Some(s.as_str()),
            Value::Object(map) => ["text", "content", "title"]
                .iter()
                .find_map(|k| map.get(*k).and_then(Value::as_str)),
            _ => None,
        }
    }
}

fn load_array(kv: &dyn KeyValueStore, key: &str) -> StoreResult<Vec<Value>> {
    let Some(raw) = kv.get(key)? else {
        return Ok(Vec::new());
    };

    match serde_json::from_str::<Vec<Value>>(&raw) {
        Ok(items) => Ok(items),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Stored list is not a JSON array, treating as empty");
            Ok(Vec::new())
        }
    }
}

/// Read all tasks; entries that are not task objects are skipped
pub fn load_tasks(kv: &dyn KeyValueStore) -> StoreResult<Vec<Task>> {
    let tasks = load_array(kv, TASKS_KEY)?
        .into_iter()
        .filter_map(|v| match serde_json::from_value::<Task>(v) {
            Ok(task) => Some(task),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping malformed task");
                None
            }
        })
        .collect();
    Ok(tasks)
}

/// Replace the stored task list
pub fn save_tasks(kv: &dyn KeyValueStore, tasks: &[Task]) -> StoreResult<()> {
    kv.set(TASKS_KEY, &serde_json::to_string(tasks)?)
}

/// Read all notes
pub fn load_notes(kv: &dyn KeyValueStore) -> StoreResult<Vec<Note>> {
    Ok(load_array(kv, NOTES_KEY)?.into_iter().map(Note).collect())
}

/// Append a note and persist the list
pub fn add_note(kv: &dyn KeyValueStore, note: Note) -> StoreResult<Note> {
    let mut notes = load_notes(kv)?;
    notes.push(note.clone());
    kv.set(NOTES_KEY, &serde_json::to_string(&notes)?)?;
    tracing::info!(total = notes.len(), "Note added");
    Ok(note)
}

/// Tasks not yet completed
pub fn pending_tasks(tasks: &[Task]) -> impl Iterator<Item = &Task> {
    tasks.iter().filter(|t| !t.completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::kv::MemoryStore;

    #[test]
    fn test_empty_store_has_no_items() {
        let kv = MemoryStore::new();
        assert!(load_tasks(&kv).unwrap().is_empty());
        assert!(load_notes(&kv).unwrap().is_empty());
    }

    #[test]
    fn test_pending_count() {
        let kv = MemoryStore::new();
        kv.set(
            TASKS_KEY,
            r#"[{"completed":false,"title":"a"},{"completed":true},{"title":"no flag"}]"#,
        )
        .unwrap();

        let tasks = load_tasks(&kv).unwrap();
        assert_eq!(tasks.len(), 3);
        assert_eq!(pending_tasks(&tasks).count(), 2);
    }

    #[test]
    fn test_unknown_task_fields_survive_save() {
        let kv = MemoryStore::new();
        kv.set(TASKS_KEY, r#"[{"completed":false,"title":"read","due":"mon"}]"#)
            .unwrap();

        let tasks = load_tasks(&kv).unwrap();
        save_tasks(&kv, &tasks).unwrap();

        let reloaded = load_tasks(&kv).unwrap();
        assert_eq!(reloaded[0].extra.get("due"), Some(&Value::from("mon")));
        assert_eq!(reloaded[0].label(), "read");
    }

    #[test]
    fn test_add_note_appends() {
        let kv = MemoryStore::new();
        kv.set(NOTES_KEY, r#"["existing"]"#).unwrap();

        add_note(&kv, Note::new("buy milk")).unwrap();

        let notes = load_notes(&kv).unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].text(), Some("existing"));
        assert_eq!(notes[1].text(), Some("buy milk"));
    }

    #[test]
    fn test_garbage_list_is_empty() {
        let kv = MemoryStore::new();
        kv.set(NOTES_KEY, "not json").unwrap();
        assert!(load_notes(&kv).unwrap().is_empty());
    }
}
