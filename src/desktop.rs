//! Desktop collaborators: where query text comes from and where resolved
//! addresses go.

use std::path::Path;
use std::process::Command;

/// Supplies query text when none was given on the command line
pub trait TextSource: Send + Sync {
    /// Current text, possibly empty
    fn read_text(&self) -> String;
}

/// Opens resolved addresses. Best-effort: failures are logged, not returned.
pub trait BrowserDispatcher: Send + Sync {
    fn open_tabs(&self, urls: &[String]);
}

/// System clipboard
#[derive(Debug, Default)]
pub struct ClipboardSource;

impl TextSource for ClipboardSource {
    fn read_text(&self) -> String {
        let text = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.get_text());
        match text {
            Ok(text) => {
                tracing::debug!(len = text.len(), "read text from clipboard");
                text
            }
            Err(e) => {
                tracing::warn!(error = %e, "clipboard unavailable, treating it as empty");
                String::new()
            }
        }
    }
}

/// Name used for search attribution and window focusing.
///
/// Prefers the configured browser, then the basename of `$BROWSER`.
pub fn browser_name(configured: Option<&str>) -> Option<String> {
    configured
        .map(str::to_string)
        .or_else(|| std::env::var("BROWSER").ok())
        .map(|cmd| command_basename(&cmd))
        .filter(|name| !name.is_empty())
}

fn command_basename(cmd: &str) -> String {
    // $BROWSER may hold a colon-separated list and arguments.
    let first = cmd.split(':').next().unwrap_or_default();
    let program = first.split_whitespace().next().unwrap_or_default();
    Path::new(program)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(program)
        .to_string()
}

/// Opens tabs through the platform launcher and raises the browser window
pub struct SystemBrowser {
    command: Option<String>,
}

impl SystemBrowser {
    /// `command` selects a specific browser; `None` uses the system default.
    pub fn new(command: Option<String>) -> Self {
        Self { command }
    }

    fn focus_window(&self) {
        if !cfg!(unix) {
            return;
        }
        let Some(name) = browser_name(self.command.as_deref()) else {
            return;
        };

        match Command::new("wmctrl").args(["-a", name.as_str()]).status() {
            Ok(status) if status.success() => tracing::debug!(browser = %name, "browser window raised"),
            Ok(status) => tracing::debug!(browser = %name, status = %status, "wmctrl could not raise window"),
            Err(e) => tracing::debug!(error = %e, "wmctrl unavailable"),
        }
    }
}

impl BrowserDispatcher for SystemBrowser {
    fn open_tabs(&self, urls: &[String]) {
        for url in urls {
            let opened = match &self.command {
                Some(command) => open::with(url, command),
                None => open::that(url),
            };

            match opened {
                Ok(()) => tracing::info!(url = %url, "opened tab"),
                Err(e) => tracing::warn!(url = %url, error = %e, "failed to open tab"),
            }
        }

        if !urls.is_empty() {
            self.focus_window();
        }
    }
}
