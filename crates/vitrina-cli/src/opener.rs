//! Terminal front end for deep-link handoff.
//!
//! "Opening a new context" launches the platform's URL opener; "navigating in
//! place" prints the link for the user to follow.

use std::process::{Command, Stdio};

use vitrina_core::{ClientCapability, FixedCapability, HandoffError, LinkOpener};

#[cfg(target_os = "macos")]
const DEFAULT_OPENER: &str = "open";
#[cfg(target_os = "windows")]
const DEFAULT_OPENER: &str = "explorer";
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const DEFAULT_OPENER: &str = "xdg-open";

/// Capability for a checkout: `--open` asks for the system opener, otherwise
/// the link is only printed.
pub(crate) fn capability_for(open: bool) -> FixedCapability {
    if open {
        FixedCapability(ClientCapability::NewContext)
    } else {
        FixedCapability(ClientCapability::InPlaceOnly)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct SystemOpener {
    program: String,
}

impl Default for SystemOpener {
    fn default() -> Self {
        Self::with_program(DEFAULT_OPENER)
    }
}

impl SystemOpener {
    pub(crate) fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl LinkOpener for SystemOpener {
    // Platform openers hand the URL to the desktop and exit, so waiting on
    // them is short and reaps the child.
    fn open_new_context(&self, url: &str) -> Result<(), HandoffError> {
        let failed = |reason: String| HandoffError {
            url: url.to_owned(),
            reason: format!("{}: {reason}", self.program),
        };

        let status = Command::new(&self.program)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| failed(e.to_string()))?;

        if status.success() {
            Ok(())
        } else {
            Err(failed(format!("exited with {status}")))
        }
    }

    fn navigate(&self, url: &str) {
        println!("{url}");
    }
}
