//! Append-only output log shown under the editor.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Info,
    Success,
    Error,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Info => "info",
            Category::Success => "success",
            Category::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub category: Category,
    pub text: String,
}

impl LogEntry {
    pub fn new(category: Category, text: impl Into<String>) -> Self {
        Self {
            category,
            text: text.into(),
        }
    }
}

/// Entries in arrival order. Only `append` and `clear` mutate the sequence.
///
/// `scroll_offset` counts rows from the bottom; 0 keeps the newest entry in
/// view and every append snaps back to it.
#[derive(Debug, Clone, Default)]
pub struct OutputLog {
    entries: Vec<LogEntry>,
    scroll_offset: usize,
}

impl OutputLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, entry: LogEntry) {
        self.entries.push(entry);
        self.scroll_to_latest();
    }

    pub fn push(&mut self, category: Category, text: impl Into<String>) {
        self.append(LogEntry::new(category, text));
    }

    pub fn clear(&mut self) {
        self.entries = Vec::new();
        self.scroll_offset = 0;
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Scroll one row towards older entries, never past `max` rows.
    pub fn scroll_up(&mut self, max: usize) {
        self.scroll_offset = (self.scroll_offset + 1).min(max);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn scroll_to_latest(&mut self) {
        self.scroll_offset = 0;
    }
}
