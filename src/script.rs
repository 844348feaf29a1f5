//! Timed event scripts: a YAML stand-in for the host page's event dispatch,
//! used by the binary to replay user interactions against the tasks.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use crate::events::{CarouselEvent, PageEvent};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Script {
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Step {
    /// Offset from playback start at which the event fires.
    #[serde(with = "humantime_serde")]
    pub at: Duration,
    #[serde(flatten)]
    pub event: ScriptEvent,
}

/// Every stimulus the host page can produce, in serializable form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "event")]
pub enum ScriptEvent {
    PrevPressed,
    NextPressed,
    PointerEntered,
    PointerLeft,
    GalleryScrolled { offset: f32 },
    AnchorClicked { href: String },
    WindowScrolled { y: f32 },
    TargetIntersected { id: String, ratio: f32 },
    FormSubmitted { name: String, email: String, message: String },
    BackToTopPressed,
}

/// Which task an event belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum Routed {
    Carousel(CarouselEvent),
    Page(PageEvent),
}

impl ScriptEvent {
    #[must_use]
    pub fn route(self) -> Routed {
        match self {
            Self::PrevPressed => Routed::Carousel(CarouselEvent::PrevPressed),
            Self::NextPressed => Routed::Carousel(CarouselEvent::NextPressed),
            Self::PointerEntered => Routed::Carousel(CarouselEvent::PointerEntered),
            Self::PointerLeft => Routed::Carousel(CarouselEvent::PointerLeft),
            Self::GalleryScrolled { offset } => Routed::Carousel(CarouselEvent::Scrolled { offset }),
            Self::AnchorClicked { href } => Routed::Page(PageEvent::AnchorClicked { href }),
            Self::WindowScrolled { y } => Routed::Page(PageEvent::WindowScrolled { y }),
            Self::TargetIntersected { id, ratio } => {
                Routed::Page(PageEvent::TargetIntersected { id, ratio })
            }
            Self::FormSubmitted {
                name,
                email,
                message,
            } => Routed::Page(PageEvent::FormSubmitted {
                name,
                email,
                message,
            }),
            Self::BackToTopPressed => Routed::Page(PageEvent::BackToTopPressed),
        }
    }
}

impl Script {
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let script: Self = serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        script.validated()
    }

    /// Steps must be listed in playback order.
    pub fn validated(self) -> Result<Self> {
        for pair in self.steps.windows(2) {
            ensure!(
                pair[0].at <= pair[1].at,
                "script steps out of order: {:?} listed before {:?}",
                pair[0].at,
                pair[1].at
            );
        }
        Ok(self)
    }
}
