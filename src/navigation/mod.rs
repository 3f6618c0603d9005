//! Route-transition progress indicator.
//!
//! The shell reports link clicks and route settles here; [`RouteProgress`] decides
//! whether a click is a real same-origin navigation and drives an injected
//! [`ProgressIndicator`].

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

/// Progress value shown as soon as a navigation starts.
pub const START_PROGRESS: f32 = 0.2;

/// Start/stop sink for the progress bar.
pub trait ProgressIndicator: Send + Sync {
    fn start(&self, initial: f32, delay: Duration);
    fn stop(&self, delay: Duration);
}

/// Indicator that only writes to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingIndicator;

impl ProgressIndicator for TracingIndicator {
    fn start(&self, initial: f32, delay: Duration) {
        tracing::debug!(initial, delay_ms = delay.as_millis() as u64, "Route progress started");
    }

    fn stop(&self, delay: Duration) {
        tracing::debug!(delay_ms = delay.as_millis() as u64, "Route progress stopped");
    }
}

/// A click on (or inside) an anchor, as reported by the browser shell.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkClick {
    /// Raw `href` attribute of the closest anchor, `None` if there is no anchor.
    pub href: Option<String>,
    pub button: u16,
    pub default_prevented: bool,
    pub meta_key: bool,
    pub ctrl_key: bool,
    pub shift_key: bool,
    pub alt_key: bool,
    /// Anchor `target` attribute.
    pub target: Option<String>,
    pub download: bool,
    /// `data-disable-progress="true"` on the anchor.
    pub disable_progress: bool,
}

/// Why a click did not start the progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IgnoreReason {
    DefaultPrevented,
    NonPrimaryButton,
    ModifierKey,
    NoHref,
    NewTab,
    Download,
    ProgressDisabled,
    InPageAnchor,
    NonNavigational,
    InvalidUrl,
    ExternalOrigin,
    SameLocation,
}

const NON_NAVIGATIONAL_SCHEMES: [&str; 4] = ["mailto:", "tel:", "javascript:", "blob:"];

/// Resolve the navigation target of `click`, or the reason it is not one.
pub fn navigation_target(click: &LinkClick, current: &Url) -> Result<Url, IgnoreReason> {
    if click.default_prevented {
        return Err(IgnoreReason::DefaultPrevented);
    }
    if click.button != 0 {
        return Err(IgnoreReason::NonPrimaryButton);
    }
    if click.meta_key || click.ctrl_key || click.shift_key || click.alt_key {
        return Err(IgnoreReason::ModifierKey);
    }

    let href = match click.href.as_deref() {
        Some(href) if !href.is_empty() => href,
        _ => return Err(IgnoreReason::NoHref),
    };
    if click.target.as_deref() == Some("_blank") {
        return Err(IgnoreReason::NewTab);
    }
    if click.download {
        return Err(IgnoreReason::Download);
    }
    if click.disable_progress {
        return Err(IgnoreReason::ProgressDisabled);
    }
    if href.starts_with('#') {
        return Err(IgnoreReason::InPageAnchor);
    }
    if NON_NAVIGATIONAL_SCHEMES
        .iter()
        .any(|scheme| href.starts_with(scheme))
    {
        return Err(IgnoreReason::NonNavigational);
    }

    let target = current.join(href).map_err(|_| IgnoreReason::InvalidUrl)?;
    if target.origin() != current.origin() {
        return Err(IgnoreReason::ExternalOrigin);
    }
    if target.path() == current.path()
        && target.query().unwrap_or_default() == current.query().unwrap_or_default()
    {
        return Err(IgnoreReason::SameLocation);
    }

    Ok(target)
}

/// Result of reporting a click.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickOutcome {
    pub started: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignored: Option<IgnoreReason>,
}

/// Current progress bar state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub active: bool,
    pub navigations: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_target: Option<String>,
}

/// Owner of the route progress lifecycle.
pub struct RouteProgress {
    indicator: Arc<dyn ProgressIndicator>,
    stop_delay: Duration,
    state: Mutex<ProgressSnapshot>,
}

impl RouteProgress {
    pub fn new(indicator: Arc<dyn ProgressIndicator>, stop_delay: Duration) -> Self {
        Self {
            indicator,
            stop_delay,
            state: Mutex::new(ProgressSnapshot::default()),
        }
    }

    /// Report a link click against the page at `current`.
    pub fn on_link_click(&self, click: &LinkClick, current: &Url) -> ClickOutcome {
        match navigation_target(click, current) {
            Ok(target) => {
                let mut state = self.lock();
                state.active = true;
                state.navigations += 1;
                state.pending_target = Some(target.to_string());
                self.indicator.start(START_PROGRESS, Duration::ZERO);

                ClickOutcome {
                    started: true,
                    target: Some(target.to_string()),
                    ignored: None,
                }
            }
            Err(reason) => {
                tracing::trace!(?reason, "Link click ignored");
                ClickOutcome {
                    started: false,
                    target: None,
                    ignored: Some(reason),
                }
            }
        }
    }

    /// The target route finished rendering.
    pub fn on_route_settled(&self) {
        let mut state = self.lock();
        state.active = false;
        state.pending_target = None;
        self.indicator.stop(self.stop_delay);
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, ProgressSnapshot> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
