//! Async page task: anchors, reveal-on-scroll, back-to-top, contact form.

use anyhow::Result;
use tokio::select;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::PageStructure;
use crate::events::{PageCommand, PageEvent};
use crate::forms::{ContactForm, SubmitOutcome};
use crate::page::{AnchorIndex, BackToTop, RevealTracker};

pub async fn run(
    structure: PageStructure,
    mut events: Receiver<PageEvent>,
    to_adapter: Sender<PageCommand>,
    cancel: CancellationToken,
) -> Result<()> {
    let mut page = PageState::new(&structure);
    info!(
        anchors = structure.anchors.len(),
        reveal_targets = structure.reveal_targets.len(),
        contact_form = structure.contact_form,
        "page task started"
    );

    loop {
        select! {
            _ = cancel.cancelled() => break,

            maybe_ev = events.recv() => {
                let Some(ev) = maybe_ev else {
                    debug!("event producer ended; stopping page task");
                    break;
                };
                for command in page.handle(ev) {
                    if to_adapter.send(command).await.is_err() {
                        warn!("adapter channel closed");
                        return Ok(());
                    }
                }
            }
        }
    }

    Ok(())
}

/// All page-feature state behind the event loop. Synchronous so it can also
/// back the script dry-run in `main`.
pub struct PageState {
    anchors: AnchorIndex,
    reveal: RevealTracker,
    back_to_top: BackToTop,
    form: Option<ContactForm>,
}

impl PageState {
    #[must_use]
    pub fn new(structure: &PageStructure) -> Self {
        Self {
            anchors: AnchorIndex::new(structure.anchors.iter().cloned()),
            reveal: RevealTracker::new(
                structure.reveal_targets.iter().cloned(),
                structure.reveal.threshold,
            ),
            back_to_top: BackToTop::new(structure.back_to_top.show_threshold_px),
            form: structure.contact_form.then(ContactForm::new),
        }
    }

    pub fn handle(&mut self, event: PageEvent) -> Vec<PageCommand> {
        match event {
            PageEvent::AnchorClicked { href } => match self.anchors.resolve(&href) {
                Some(fragment) => vec![PageCommand::SmoothScrollTo {
                    fragment: fragment.to_owned(),
                }],
                None => {
                    debug!(href, "anchor target not on page; ignoring");
                    Vec::new()
                }
            },

            PageEvent::WindowScrolled { y } => self
                .back_to_top
                .on_window_scroll(y)
                .map(PageCommand::SetBackToTopVisible)
                .into_iter()
                .collect(),

            PageEvent::BackToTopPressed => vec![PageCommand::ScrollToTop],

            PageEvent::TargetIntersected { id, ratio } => {
                if self.reveal.on_intersection(&id, ratio) {
                    vec![PageCommand::Reveal { id }]
                } else {
                    Vec::new()
                }
            }

            PageEvent::FormSubmitted {
                name,
                email,
                message,
            } => {
                let Some(form) = self.form.as_mut() else {
                    debug!("no contact form on page; ignoring submission");
                    return Vec::new();
                };
                form.fill(&name, &email, &message);
                match form.submit() {
                    SubmitOutcome::Rejected { notice } => {
                        vec![PageCommand::Notice { text: notice }]
                    }
                    SubmitOutcome::Accepted { notice } => vec![
                        PageCommand::Notice { text: notice },
                        PageCommand::ResetForm,
                    ],
                }
            }
        }
    }
}
