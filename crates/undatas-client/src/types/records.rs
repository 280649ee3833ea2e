//! Opaque server-side records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parsed output records returned by the result endpoint.
pub type ParseResult = Vec<Value>;

macro_rules! opaque_record {
    ($(#[$meta:meta])* $name:ident, $id_field:literal, $id_fn:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Value);

        impl $name {
            #[doc = concat!("Returns the server assigned `", $id_field, "`, if present.")]
            pub fn $id_fn(&self) -> Option<&str> {
                self.get($id_field).and_then(Value::as_str)
            }

            /// Returns a field of the record by name.
            pub fn get(&self, key: &str) -> Option<&Value> {
                self.0.get(key)
            }

            /// Borrows the raw JSON value.
            pub fn as_value(&self) -> &Value {
                &self.0
            }

            /// Consumes the record, returning the raw JSON value.
            pub fn into_value(self) -> Value {
                self.0
            }
        }

        impl From<Value> for $name {
            fn from(value: Value) -> Self {
                Self(value)
            }
        }
    };
}

opaque_record!(
    /// A top-level grouping of tasks.
    Workspace,
    "work_id",
    work_id
);

opaque_record!(
    /// A server-side parsing job grouping one or more files.
    Task,
    "task_id",
    task_id
);

opaque_record!(
    /// A file uploaded to a task.
    TaskFile,
    "file_id",
    file_id
);

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_record_round_trips_unchanged() {
        let raw = json!({"work_id": "w1", "work_name": "Invoices", "extra": {"n": 1}});
        let workspace: Workspace = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(workspace.work_id(), Some("w1"));
        assert_eq!(serde_json::to_value(&workspace).unwrap(), raw);
    }

    #[test]
    fn test_missing_identifier() {
        let file = TaskFile::from(json!({"file_name": "a.pdf"}));
        assert_eq!(file.file_id(), None);
        assert_eq!(file.get("file_name"), Some(&json!("a.pdf")));
    }

    #[test]
    fn test_non_string_identifier() {
        let task = Task::from(json!({"task_id": 42}));
        assert_eq!(task.task_id(), None);
    }
}
