//! Operator interaction seam.
//!
//! The orchestrators talk to the operator through this trait so the
//! decision logic can be driven by a scripted console in tests. The
//! CLI crate provides the terminal implementation.

use crate::error::Result;

pub trait Console {
    /// Print one line of output.
    fn line(&mut self, text: &str);

    /// Ask a yes/no question. `default_yes` is the answer taken on
    /// empty input.
    fn confirm(&mut self, question: &str, default_yes: bool) -> Result<bool>;

    /// Start a progress spinner bracketing a long-running call. The
    /// returned guard stops the spinner when dropped, so it is
    /// released on every exit path; call [`Spinner::done`] to finish
    /// it with a success mark instead.
    fn spinner(&mut self, text: &str) -> Box<dyn Spinner>;
}

pub trait Spinner {
    fn done(self: Box<Self>);
}

/// No-op spinner for consoles that have no live progress display.
pub struct SilentSpinner;

impl Spinner for SilentSpinner {
    fn done(self: Box<Self>) {}
}
