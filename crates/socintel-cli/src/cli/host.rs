//! Terminal host: lookups are printed or handed to a launcher command,
//! the clipboard is the desktop clipboard.

use anyhow::{bail, Context, Result};
use socintel_core::pivot::Host;

pub struct TerminalHost {
    launcher: Option<String>,
    dry_run: bool,
}

impl TerminalHost {
    pub fn new(launcher: Option<String>, dry_run: bool) -> Self {
        Self { launcher, dry_run }
    }
}

impl Host for TerminalHost {
    async fn active_tab_index(&self) -> Result<usize> {
        // A terminal has no tab strip; lookups are numbered from 1.
        Ok(0)
    }

    async fn open_tab(&self, url: &str, index: usize, _active: bool) -> Result<()> {
        match (&self.launcher, self.dry_run) {
            (Some(launcher), false) => {
                let status = tokio::process::Command::new(launcher)
                    .arg(url)
                    .status()
                    .await
                    .with_context(|| format!("spawn launcher {launcher}"))?;
                if !status.success() {
                    bail!("launcher {launcher} exited with {status}");
                }
                println!("{index:>2}. opened {url}");
            }
            (_, true) => println!("{index:>2}. would open {url}"),
            (None, false) => println!("{index:>2}. {url}"),
        }
        Ok(())
    }

    async fn write_clipboard(&self, text: &str) -> Result<()> {
        if self.dry_run {
            println!("would copy: {text}");
            return Ok(());
        }
        let owned = text.to_string();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut clipboard = arboard::Clipboard::new().context("open clipboard")?;
            clipboard.set_text(owned).context("set clipboard text")?;
            Ok(())
        })
        .await
        .context("clipboard task")??;
        println!("copied: {text}");
        Ok(())
    }
}
