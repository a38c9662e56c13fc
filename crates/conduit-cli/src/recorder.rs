use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use conduit_types::Recorder;

/// Append-only JSONL sink for the `Recorder` interface. Each call appends
/// one `{"type":..., "data":...}` line. This is a standalone convenience
/// for `conduit run --log-file`, not a full indexing/replay store — it
/// just keeps raw events around on disk.
pub struct FileRecorder {
    file: Mutex<File>,
}

impl FileRecorder {
    pub fn create(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file: Mutex::new(file) })
    }

    fn write_event(&self, event_type: &str, data: &str) {
        let line = serde_json::json!({ "type": event_type, "data": data });
        let mut file = self.file.lock().unwrap();
        let _ = writeln!(file, "{line}");
    }

    fn write_bytes_event(&self, event_type: &str, chunk: &[u8]) {
        self.write_event(event_type, &String::from_utf8_lossy(chunk));
    }
}

impl Recorder for FileRecorder {
    fn record_meta(&self, key: &str, value: &str) {
        self.write_event("meta", &format!("{key}={value}"));
    }

    fn record_stdin(&self, prompt: &str) {
        self.write_event("stdin", prompt);
    }

    fn record_stdout(&self, chunk: &[u8]) {
        self.write_bytes_event("stdout", chunk);
    }

    fn record_stderr(&self, chunk: &[u8]) {
        self.write_bytes_event("stderr", chunk);
    }

    fn record_stream(&self, line: &[u8]) {
        self.write_bytes_event("claude_stream", line);
    }
}
