//! Handing a deep link off to the external messaging app.
//!
//! Some clients (mobile Safari and other iOS browsers) block or lose a new
//! browsing context opened from script, so the link must replace the current
//! page there. Everywhere else a new context is opened, and the current
//! context is navigated only if that fails.
//!
//! Both the capability check and the actual opening are injected so callers
//! can substitute them in tests or on non-browser front ends.

use crate::HandoffError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCapability {
    /// The client cannot reliably open a new context; navigate in place.
    InPlaceOnly,
    /// The client can open a new context.
    NewContext,
}

pub trait CapabilityDetector {
    fn detect(&self) -> ClientCapability;
}

/// Performs the actual navigation for a front end.
pub trait LinkOpener {
    /// Opens `url` in a new browsing context (tab, window, external app).
    ///
    /// # Errors
    ///
    /// Returns [`HandoffError`] if the new context could not be opened.
    fn open_new_context(&self, url: &str) -> Result<(), HandoffError>;

    /// Replaces the current context with `url`. Cannot fail observably.
    fn navigate(&self, url: &str);
}

/// How a link was handed off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffMode {
    NavigatedInPlace,
    OpenedNewContext,
    /// Opening a new context failed and the current context was navigated.
    FellBackToInPlace,
}

/// Classifies a client by its `User-Agent` string.
#[derive(Debug, Clone)]
pub struct UserAgentDetector {
    user_agent: String,
}

impl UserAgentDetector {
    #[must_use]
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }
}

impl CapabilityDetector for UserAgentDetector {
    fn detect(&self) -> ClientCapability {
        let ua = self.user_agent.to_lowercase();
        let ios = ["iphone", "ipad", "ipod"].iter().any(|d| ua.contains(d));
        let mobile_safari = ua.contains("safari")
            && ua.contains("mobile")
            && !ua.contains("android")
            && !ua.contains("chrome");
        if ios || mobile_safari {
            ClientCapability::InPlaceOnly
        } else {
            ClientCapability::NewContext
        }
    }
}

/// Detector that always reports the same capability.
#[derive(Debug, Clone, Copy)]
pub struct FixedCapability(pub ClientCapability);

impl CapabilityDetector for FixedCapability {
    fn detect(&self) -> ClientCapability {
        self.0
    }
}

/// Hands `url` off according to the detected client capability.
pub fn dispatch_link(
    url: &str,
    detector: &dyn CapabilityDetector,
    opener: &dyn LinkOpener,
) -> HandoffMode {
    match detector.detect() {
        ClientCapability::InPlaceOnly => {
            opener.navigate(url);
            HandoffMode::NavigatedInPlace
        }
        ClientCapability::NewContext => match opener.open_new_context(url) {
            Ok(()) => HandoffMode::OpenedNewContext,
            Err(e) => {
                tracing::warn!(error = %e, "new context failed, navigating in place");
                opener.navigate(url);
                HandoffMode::FellBackToInPlace
            }
        },
    }
}
