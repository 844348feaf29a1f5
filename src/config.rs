use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

/// Top-level configuration describing the host page this engine drives.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Configuration {
    /// The gallery track: where each slide sits inside the scrollable
    /// viewport, in CSS pixels, in sequence order.
    pub track: TrackConfig,
    #[serde(default)]
    pub carousel: CarouselOptions,
    #[serde(default)]
    pub page: PageStructure,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TrackConfig {
    pub slide_offsets: Vec<f32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct CarouselOptions {
    /// Interval between automatic advances.
    #[serde(with = "humantime_serde")]
    pub auto_advance_interval: Duration,
    /// Quiet period after the last manual scroll movement before the
    /// logical index is resynchronized with the viewport.
    #[serde(with = "humantime_serde")]
    pub settle_debounce: Duration,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            auto_advance_interval: Duration::from_secs(4),
            settle_debounce: Duration::from_millis(100),
        }
    }
}

/// Optional page structure beyond the gallery: which fragments, reveal
/// targets, and widgets the markup actually carries. Absent structure is
/// silently skipped at runtime, never an error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct PageStructure {
    /// In-page fragment ids anchor links may target.
    pub anchors: Vec<String>,
    /// Element ids that fade in once scrolled into view.
    pub reveal_targets: Vec<String>,
    /// Whether the page carries the contact form.
    pub contact_form: bool,
    pub reveal: RevealOptions,
    pub back_to_top: BackToTopOptions,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct RevealOptions {
    /// Visible-area ratio at which a target counts as revealed.
    pub threshold: f32,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self { threshold: 0.2 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct BackToTopOptions {
    /// Window scroll depth past which the affordance is shown.
    pub show_threshold_px: f32,
}

impl Default for BackToTopOptions {
    fn default() -> Self {
        Self {
            show_threshold_px: 300.0,
        }
    }
}

impl Configuration {
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let cfg: Self = serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(cfg)
    }

    /// Validate configured values, consuming and returning the configuration.
    pub fn validated(self) -> Result<Self> {
        ensure!(
            !self.track.slide_offsets.is_empty(),
            "track.slide-offsets must name at least one slide"
        );
        ensure!(
            !self.carousel.auto_advance_interval.is_zero(),
            "carousel.auto-advance-interval must be non-zero"
        );
        ensure!(
            !self.carousel.settle_debounce.is_zero(),
            "carousel.settle-debounce must be non-zero"
        );
        let threshold = self.page.reveal.threshold;
        ensure!(
            threshold > 0.0 && threshold <= 1.0,
            "page.reveal.threshold must be within (0, 1], got {threshold}"
        );
        ensure!(
            self.page.back_to_top.show_threshold_px >= 0.0,
            "page.back-to-top.show-threshold-px must not be negative"
        );
        Ok(self)
    }
}
