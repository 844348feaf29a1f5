//! The one-shot page affordances: anchor navigation, reveal-on-scroll, and
//! the back-to-top button. Each is a few lines of state that the page task
//! wires to the host adapter's events.

use std::collections::BTreeSet;

/// Known in-page fragment ids; anchors pointing anywhere else are ignored.
#[derive(Debug, Clone)]
pub struct AnchorIndex {
    fragments: BTreeSet<String>,
}

impl AnchorIndex {
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: fragments.into_iter().map(Into::into).collect(),
        }
    }

    /// Resolve an anchor href of the form `#fragment` to a known fragment id.
    #[must_use]
    pub fn resolve<'a>(&'a self, href: &str) -> Option<&'a str> {
        let fragment = href.strip_prefix('#')?;
        self.fragments.get(fragment).map(String::as_str)
    }
}

/// Tracks which reveal targets are still awaiting their first intersection.
///
/// A target is revealed exactly once; after that it is dropped from
/// observation, matching the observe-then-unobserve behavior of the page.
#[derive(Debug, Clone)]
pub struct RevealTracker {
    pending: BTreeSet<String>,
    threshold: f32,
}

impl RevealTracker {
    pub fn new<I, S>(targets: I, threshold: f32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pending: targets.into_iter().map(Into::into).collect(),
            threshold,
        }
    }

    /// Record an intersection report. Returns true when `id` becomes visible
    /// for the first time.
    pub fn on_intersection(&mut self, id: &str, ratio: f32) -> bool {
        if ratio < self.threshold {
            return false;
        }
        self.pending.remove(id)
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

/// Visibility toggle for the back-to-top button.
#[derive(Debug, Clone)]
pub struct BackToTop {
    show_threshold_px: f32,
    visible: bool,
}

impl BackToTop {
    #[must_use]
    pub fn new(show_threshold_px: f32) -> Self {
        Self {
            show_threshold_px,
            visible: false,
        }
    }

    /// Track the window scroll depth. Returns the new visibility when it
    /// changed, None while it stays the same.
    pub fn on_window_scroll(&mut self, y: f32) -> Option<bool> {
        let show = y > self.show_threshold_px;
        if show == self.visible {
            return None;
        }
        self.visible = show;
        Some(show)
    }

    #[must_use]
    pub fn visible(&self) -> bool {
        self.visible
    }
}
