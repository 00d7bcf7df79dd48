use serde::Serialize;

/// Router-side navigation service
pub trait Navigator {
    /// Push a new history entry
    fn navigate(&mut self, path: &str);

    /// Navigate without leaving the current entry in history
    fn replace(&mut self, path: &str);
}

/// Source of the location a page is rendered at
pub trait PathProvider {
    fn current_path(&self) -> String;
}

impl PathProvider for str {
    fn current_path(&self) -> String {
        self.to_string()
    }
}

impl PathProvider for String {
    fn current_path(&self) -> String {
        self.clone()
    }
}

/// One navigation request issued by a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "lowercase")]
pub enum Navigation {
    Push(String),
    Replace(String),
}

/// Navigator that records requests instead of performing them. HTTP
/// handlers turn the recorded requests into redirect responses.
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    history: Vec<Navigation>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[Navigation] {
        &self.history
    }

    pub fn last(&self) -> Option<&Navigation> {
        self.history.last()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, path: &str) {
        self.history.push(Navigation::Push(path.to_string()));
    }

    fn replace(&mut self, path: &str) {
        self.history.push(Navigation::Replace(path.to_string()));
    }
}
