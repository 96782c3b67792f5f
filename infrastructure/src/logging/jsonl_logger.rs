//! JSONL sink for conversation events.
//!
//! Records carry the event payload fields plus `type`, `timestamp` and,
//! when the logger is bound to a session, `session`.

use droidmind_application::{ConversationEvent, ConversationLogger};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
    session_id: Option<String>,
}

impl JsonlConversationLogger {
    /// Open `path` for appending, creating parent directories.
    ///
    /// Returns `None` (after a warning) when the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(dir = %parent.display(), error = %e, "Could not create conversation log directory");
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Could not open conversation log");
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
            session_id: None,
        })
    }

    /// `<dir>/<session_id>.conversation.jsonl`, stamping every record
    pub fn for_session(dir: impl AsRef<Path>, session_id: &str) -> Option<Self> {
        let path = dir
            .as_ref()
            .join(format!("{session_id}.conversation.jsonl"));
        let mut logger = Self::new(path)?;
        logger.session_id = Some(session_id.to_string());
        Some(logger)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(&self, event: ConversationEvent) -> Value {
        let mut map = match event.payload {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert("type".to_string(), Value::from(event.event_type));
        map.insert(
            "timestamp".to_string(),
            Value::from(chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
        );
        if let Some(session) = &self.session_id {
            map.insert("session".to_string(), Value::from(session.as_str()));
        }
        Value::Object(map)
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(line) = serde_json::to_string(&self.record(event)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn read_records(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_records_are_flat_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let logger = JsonlConversationLogger::for_session(dir.path(), "s-42").unwrap();

        logger.log(ConversationEvent::new(
            "tool_call",
            json!({"tool": "champion_lore", "cached": false}),
        ));
        logger.log(ConversationEvent::new("turn_completed", json!({"tier": "primary"})));
        let path = logger.path().to_path_buf();
        drop(logger);

        let records = read_records(&path);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["type"], "tool_call");
        assert_eq!(records[0]["tool"], "champion_lore");
        assert_eq!(records[0]["session"], "s-42");
        assert!(records[1]["timestamp"].is_string());
        assert!(path.ends_with("s-42.conversation.jsonl"));
    }

    #[test]
    fn test_scalar_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();
        logger.log(ConversationEvent::new("note", json!("just a string")));
        drop(logger);

        let records = read_records(&path);
        assert_eq!(records[0]["data"], "just a string");
        assert!(records[0].get("session").is_none());
    }

    #[test]
    fn test_reopening_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("log.jsonl");
        for _ in 0..2 {
            let logger = JsonlConversationLogger::new(&path).unwrap();
            logger.log(ConversationEvent::new("turn_started", json!({})));
        }
        assert_eq!(read_records(&path).len(), 2);
    }
}
