//! Async carousel task: owns the controller plus the auto-advance and
//! settle-debounce deadlines, and emits viewport jumps to the host adapter.

use anyhow::Result;
use tokio::select;
use tokio::sync::mpsc::{Receiver, Sender, error::SendError};
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::carousel::{Carousel, Direction, Track};
use crate::config::CarouselOptions;
use crate::events::{CarouselEvent, ViewportJump};

pub async fn run(
    track: Track,
    options: CarouselOptions,
    mut events: Receiver<CarouselEvent>,
    to_viewport: Sender<ViewportJump>,
    cancel: CancellationToken,
) -> Result<()> {
    let mut task = CarouselTask::new(track, options);

    // Init: align with the first slide, then begin the slideshow cadence.
    if task.jump_to(0, &to_viewport).await.is_err() {
        warn!("viewport channel closed before init");
        return Ok(());
    }
    task.start_auto();
    info!(
        slides = task.carousel.track().len(),
        interval = ?task.options.auto_advance_interval,
        "carousel started"
    );

    loop {
        let auto_at = task.auto_deadline;
        let settle_at = task.settle_deadline;
        select! {
            _ = cancel.cancelled() => break,

            maybe_ev = events.recv() => {
                match maybe_ev {
                    Some(ev) => {
                        if task.handle(ev, &to_viewport).await.is_err() {
                            warn!("viewport channel closed");
                            break;
                        }
                    }
                    None => {
                        debug!("event producer ended; stopping carousel task");
                        break;
                    }
                }
            }

            _ = deadline_elapsed(auto_at), if auto_at.is_some() => {
                if task.advance(Direction::Forward, &to_viewport).await.is_err() {
                    warn!("viewport channel closed");
                    break;
                }
                // Re-arm for the next periodic tick.
                task.start_auto();
            }

            _ = deadline_elapsed(settle_at), if settle_at.is_some() => {
                task.settle();
            }
        }
    }

    Ok(())
}

async fn deadline_elapsed(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}

struct CarouselTask {
    carousel: Carousel,
    options: CarouselOptions,
    /// Next automatic advance; None while auto-advance is paused. Arming
    /// always replaces, so at most one cadence exists.
    auto_deadline: Option<Instant>,
    /// Pending manual-scroll resynchronization; each scroll movement
    /// replaces it (last-write-wins debounce).
    settle_deadline: Option<Instant>,
    viewport_offset: f32,
}

impl CarouselTask {
    fn new(track: Track, options: CarouselOptions) -> Self {
        Self {
            carousel: Carousel::new(track),
            options,
            auto_deadline: None,
            settle_deadline: None,
            viewport_offset: 0.0,
        }
    }

    async fn handle(
        &mut self,
        event: CarouselEvent,
        to_viewport: &Sender<ViewportJump>,
    ) -> Result<(), SendError<ViewportJump>> {
        match event {
            CarouselEvent::PrevPressed => {
                self.advance(Direction::Backward, to_viewport).await?;
                self.restart_auto();
            }
            CarouselEvent::NextPressed => {
                self.advance(Direction::Forward, to_viewport).await?;
                self.restart_auto();
            }
            CarouselEvent::PointerEntered => {
                debug!("pointer over gallery; pausing auto-advance");
                self.stop_auto();
            }
            CarouselEvent::PointerLeft => {
                debug!("pointer left gallery; resuming auto-advance");
                self.start_auto();
            }
            CarouselEvent::Scrolled { offset } => {
                self.note_scroll(offset);
            }
        }
        Ok(())
    }

    async fn advance(
        &mut self,
        direction: Direction,
        to_viewport: &Sender<ViewportJump>,
    ) -> Result<(), SendError<ViewportJump>> {
        let jump = self.carousel.advance(direction);
        debug!(index = jump.index, offset = jump.offset, ?direction, "carousel advanced");
        to_viewport.send(jump).await
    }

    async fn jump_to(
        &mut self,
        index: usize,
        to_viewport: &Sender<ViewportJump>,
    ) -> Result<(), SendError<ViewportJump>> {
        let jump = self.carousel.jump_to(index);
        to_viewport.send(jump).await
    }

    fn start_auto(&mut self) {
        // Replacing the deadline is the stop-first discipline: two concurrent
        // cadences cannot exist.
        self.auto_deadline = Some(Instant::now() + self.options.auto_advance_interval);
    }

    fn stop_auto(&mut self) {
        self.auto_deadline = None;
    }

    fn restart_auto(&mut self) {
        self.stop_auto();
        self.start_auto();
    }

    fn note_scroll(&mut self, offset: f32) {
        self.viewport_offset = offset;
        self.settle_deadline = Some(Instant::now() + self.options.settle_debounce);
    }

    fn settle(&mut self) {
        self.settle_deadline = None;
        let index = self.carousel.resync(self.viewport_offset);
        debug!(
            index,
            offset = self.viewport_offset,
            "index resynced after manual scroll"
        );
    }
}
