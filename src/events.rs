/// Stimuli for the carousel controller, produced by the host page adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum CarouselEvent {
    /// Left arrow activated.
    PrevPressed,
    /// Right arrow activated.
    NextPressed,
    /// Pointer entered the gallery viewport.
    PointerEntered,
    /// Pointer left the gallery viewport.
    PointerLeft,
    /// The viewport moved under a manual scroll or drag.
    Scrolled { offset: f32 },
}

/// An instant repositioning of the gallery viewport onto a slide.
///
/// Emitted by the carousel task; the host adapter applies it as a direct
/// scroll-offset write, never a smooth animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportJump {
    pub index: usize,
    pub offset: f32,
}

/// Stimuli for the rest of the page: anchors, reveals, form, back-to-top.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    AnchorClicked { href: String },
    WindowScrolled { y: f32 },
    TargetIntersected { id: String, ratio: f32 },
    FormSubmitted { name: String, email: String, message: String },
    BackToTopPressed,
}

/// Effects the page task asks the host adapter to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum PageCommand {
    /// Smooth-scroll the window to the in-page fragment.
    SmoothScrollTo { fragment: String },
    /// Mark a reveal target visible (one-shot per target).
    Reveal { id: String },
    /// Show or hide the back-to-top affordance.
    SetBackToTopVisible(bool),
    /// Smooth-scroll the window back to the origin.
    ScrollToTop,
    /// Blocking user-visible notice.
    Notice { text: String },
    /// Clear all contact-form fields after an accepted submission.
    ResetForm,
}
