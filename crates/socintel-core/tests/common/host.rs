//! In-memory host that records tabs and clipboard writes.

use anyhow::{bail, Result};
use socintel_core::pivot::Host;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct RecordingHost {
    pub active_index: usize,
    /// URLs containing this substring fail to open.
    pub fail_on: Option<String>,
    pub tabs: Mutex<Vec<(String, usize, bool)>>,
    pub clipboard: Mutex<Vec<String>>,
}

impl RecordingHost {
    pub fn at(active_index: usize) -> Self {
        Self {
            active_index,
            ..Self::default()
        }
    }

    pub fn opened(&self) -> Vec<(String, usize, bool)> {
        self.tabs.lock().unwrap().clone()
    }

    pub fn copied(&self) -> Vec<String> {
        self.clipboard.lock().unwrap().clone()
    }
}

impl Host for RecordingHost {
    async fn active_tab_index(&self) -> Result<usize> {
        Ok(self.active_index)
    }

    async fn open_tab(&self, url: &str, index: usize, active: bool) -> Result<()> {
        if let Some(needle) = &self.fail_on {
            if url.contains(needle.as_str()) {
                bail!("tab refused: {url}");
            }
        }
        self.tabs.lock().unwrap().push((url.to_string(), index, active));
        Ok(())
    }

    async fn write_clipboard(&self, text: &str) -> Result<()> {
        self.clipboard.lock().unwrap().push(text.to_string());
        Ok(())
    }
}
