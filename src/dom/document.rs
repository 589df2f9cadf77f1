use parking_lot::Mutex;

use crate::routes::Theme;

/// The visible content surface and the theme marker on the document root.
pub trait Document: Send + Sync {
    /// Replace the whole content surface.
    fn set_content(&self, html: &str);

    /// Replace the theme marker class on the document root.
    fn set_theme(&self, theme: Theme);
}

#[derive(Default)]
struct DocumentState {
    content: String,
    theme_class: String,
    content_writes: usize,
}

/// In-memory document.
#[derive(Default)]
pub struct HeadlessDocument {
    state: Mutex<DocumentState>,
}

impl HeadlessDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> String {
        self.state.lock().content.clone()
    }

    /// Current root class, empty until a theme has been set.
    pub fn theme_class(&self) -> String {
        self.state.lock().theme_class.clone()
    }

    /// How many times the content surface has been replaced.
    pub fn content_writes(&self) -> usize {
        self.state.lock().content_writes
    }
}

impl Document for HeadlessDocument {
    fn set_content(&self, html: &str) {
        let mut state = self.state.lock();
        state.content = html.to_string();
        state.content_writes += 1;
    }

    fn set_theme(&self, theme: Theme) {
        self.state.lock().theme_class = theme.marker();
    }
}
