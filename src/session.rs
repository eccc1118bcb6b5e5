// Session log: the scrollback of one terminal session, oldest first.

/// Who produced an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub direction: Direction,
    pub text: String,
}

/// Append-only history. The only way to remove entries is `clear`, which
/// drops all of them.
#[derive(Debug, Clone, Default)]
pub struct SessionLog {
    entries: Vec<Entry>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_input(&mut self, text: impl Into<String>) {
        self.push(Direction::Input, text.into());
    }

    pub fn push_output(&mut self, text: impl Into<String>) {
        self.push(Direction::Output, text.into());
    }

    fn push(&mut self, direction: Direction, text: String) {
        self.entries.push(Entry { direction, text });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entries appended since the log held `from` entries. Empty when the
    /// log has been cleared below that point.
    pub fn since(&self, from: usize) -> &[Entry] {
        self.entries.get(from..).unwrap_or(&[])
    }

    pub fn last(&self) -> Option<&Entry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
