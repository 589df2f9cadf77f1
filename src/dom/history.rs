use parking_lot::Mutex;

/// Session history.
pub trait History: Send + Sync {
    /// Record a new location without reloading.
    fn push(&self, path: &str);

    /// The location currently shown in the address bar.
    fn current(&self) -> String;
}

struct Entries {
    paths: Vec<String>,
    cursor: usize,
}

/// In-memory history stack with back/forward support.
pub struct MemoryHistory {
    entries: Mutex<Entries>,
}

impl MemoryHistory {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: Mutex::new(Entries {
                paths: vec![initial.into()],
                cursor: 0,
            }),
        }
    }

    /// Move one entry back. Returns `false` at the start of history.
    ///
    /// A `true` return is where a browser would fire `popstate`.
    pub fn back(&self) -> bool {
        let mut entries = self.entries.lock();
        if entries.cursor == 0 {
            return false;
        }
        entries.cursor -= 1;
        true
    }

    /// Move one entry forward. Returns `false` at the end of history.
    pub fn forward(&self) -> bool {
        let mut entries = self.entries.lock();
        if entries.cursor + 1 >= entries.paths.len() {
            return false;
        }
        entries.cursor += 1;
        true
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().paths.clone()
    }
}

impl History for MemoryHistory {
    fn push(&self, path: &str) {
        let mut entries = self.entries.lock();
        let keep = entries.cursor + 1;
        entries.paths.truncate(keep);
        entries.paths.push(path.to_string());
        entries.cursor = keep;
    }

    fn current(&self) -> String {
        let entries = self.entries.lock();
        entries.paths[entries.cursor].clone()
    }
}
