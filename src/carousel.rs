//! Carousel core: the slide track and the index-tracking controller.
//!
//! Everything here is synchronous and timer-free; the pacing (auto-advance
//! cadence, settle debounce) lives in [`crate::tasks::carousel`].

use crate::error::Error;
use crate::events::ViewportJump;

/// Direction of a manual or automatic step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Ordered, session-immutable slide offsets within the scrollable track.
#[derive(Debug, Clone)]
pub struct Track {
    offsets: Vec<f32>,
}

impl Track {
    /// Construct a track from recorded slide offsets.
    ///
    /// # Errors
    /// Returns [`Error::EmptyTrack`] if `offsets` is empty.
    pub fn from_offsets(offsets: Vec<f32>) -> Result<Self, Error> {
        if offsets.is_empty() {
            return Err(Error::EmptyTrack);
        }
        Ok(Self { offsets })
    }

    /// Number of slides, always ≥ 1.
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Recorded offset of slide `index`. Caller guarantees `index < len()`.
    #[must_use]
    pub fn offset(&self, index: usize) -> f32 {
        self.offsets[index]
    }

    /// Index of the slide whose offset is nearest `offset`.
    ///
    /// Scans in sequence order under strict less-than, so an exact tie
    /// resolves to the lowest index.
    #[must_use]
    pub fn nearest(&self, offset: f32) -> usize {
        let mut nearest = 0;
        let mut min_dist = f32::INFINITY;
        for (i, slide) in self.offsets.iter().enumerate() {
            let dist = (slide - offset).abs();
            if dist < min_dist {
                min_dist = dist;
                nearest = i;
            }
        }
        nearest
    }
}

/// Owns the current index into a [`Track`].
///
/// The index is only ever mutated here; it always names a valid slide.
#[derive(Debug, Clone)]
pub struct Carousel {
    track: Track,
    index: usize,
}

impl Carousel {
    #[must_use]
    pub fn new(track: Track) -> Self {
        Self { track, index: 0 }
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn track(&self) -> &Track {
        &self.track
    }

    /// Align the viewport with slide `index` and make it current.
    ///
    /// Used for initialization (index 0) and as the primitive under
    /// [`Carousel::advance`]. Caller guarantees `index < track.len()`.
    pub fn jump_to(&mut self, index: usize) -> ViewportJump {
        self.index = index;
        ViewportJump {
            index,
            offset: self.track.offset(index),
        }
    }

    /// Step one slide forward or backward, wrapping at the ends.
    pub fn advance(&mut self, direction: Direction) -> ViewportJump {
        let n = self.track.len();
        let next = match direction {
            Direction::Forward => (self.index + 1) % n,
            Direction::Backward => (self.index + n - 1) % n,
        };
        self.jump_to(next)
    }

    /// Resynchronize the index with wherever a manual scroll left the
    /// viewport. Returns the new index; no jump is emitted, the browser's
    /// native snapping is trusted to produce visual alignment.
    pub fn resync(&mut self, viewport_offset: f32) -> usize {
        self.index = self.track.nearest(viewport_offset);
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five_slides() -> Track {
        Track::from_offsets(vec![0.0, 100.0, 200.0, 300.0, 400.0]).unwrap()
    }

    #[test]
    fn empty_track_is_rejected() {
        assert!(matches!(
            Track::from_offsets(Vec::new()),
            Err(Error::EmptyTrack)
        ));
    }

    #[test]
    fn advancing_n_times_returns_to_start() {
        for n in 1..=6 {
            let offsets = (0..n).map(|i| i as f32 * 80.0).collect();
            let mut carousel = Carousel::new(Track::from_offsets(offsets).unwrap());
            carousel.jump_to(n / 2);
            let start = carousel.current_index();
            for _ in 0..n {
                carousel.advance(Direction::Forward);
            }
            assert_eq!(carousel.current_index(), start, "forward closure, n={n}");
            for _ in 0..n {
                carousel.advance(Direction::Backward);
            }
            assert_eq!(carousel.current_index(), start, "backward closure, n={n}");
        }
    }

    #[test]
    fn forward_then_backward_restores_index() {
        let mut carousel = Carousel::new(five_slides());
        carousel.jump_to(3);
        carousel.advance(Direction::Forward);
        carousel.advance(Direction::Backward);
        assert_eq!(carousel.current_index(), 3);
    }

    #[test]
    fn backward_from_zero_wraps_to_last() {
        let mut carousel = Carousel::new(five_slides());
        let jump = carousel.advance(Direction::Backward);
        assert_eq!(jump.index, 4);
        assert_eq!(jump.offset, 400.0);
    }

    #[test]
    fn single_slide_track_stays_put() {
        let mut carousel = Carousel::new(Track::from_offsets(vec![12.0]).unwrap());
        assert_eq!(carousel.advance(Direction::Forward).index, 0);
        assert_eq!(carousel.advance(Direction::Backward).index, 0);
    }

    #[test]
    fn arrow_scenario_matches_offsets() {
        let mut carousel = Carousel::new(five_slides());
        assert_eq!(carousel.jump_to(0), ViewportJump { index: 0, offset: 0.0 });
        carousel.advance(Direction::Forward);
        let second = carousel.advance(Direction::Forward);
        assert_eq!(second, ViewportJump { index: 2, offset: 200.0 });
        let back = carousel.advance(Direction::Backward);
        assert_eq!(back, ViewportJump { index: 1, offset: 100.0 });
    }

    #[test]
    fn resync_picks_nearest_slide() {
        let mut carousel = Carousel::new(five_slides());
        assert_eq!(carousel.resync(205.0), 2);
        assert_eq!(carousel.resync(95.0), 1);
        assert_eq!(carousel.resync(-40.0), 0);
        assert_eq!(carousel.resync(1000.0), 4);
    }

    #[test]
    fn resync_tie_prefers_lowest_index() {
        let mut carousel = Carousel::new(five_slides());
        // 50 is equidistant from slides 0 and 1.
        assert_eq!(carousel.resync(50.0), 0);
    }
}
