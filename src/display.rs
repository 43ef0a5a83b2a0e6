//! Two-line status display capability.

use core::fmt::{self, Write as _};

use heapless::String;

/// Characters per display line (16×2 character LCD).
pub const LINE_LEN: usize = 16;

/// One display line. Text past [`LINE_LEN`] characters is cut off.
pub type Line = String<LINE_LEN>;

/// A display that shows two lines of text.
pub trait TextDisplay {
    /// Replaces the screen contents with `line1` over `line2`.
    async fn show_two_lines(&mut self, line1: &str, line2: &str);
}

/// Builds a [`Line`] from format arguments, truncating at [`LINE_LEN`].
///
/// ```rust
/// use box_envoy::display::line;
///
/// assert_eq!(line(format_args!("width: {}", 3)).as_str(), "width: 3");
/// assert_eq!(line(format_args!("{}", "0123456789abcdefXYZ")).len(), 16);
/// ```
#[must_use]
pub fn line(args: fmt::Arguments<'_>) -> Line {
    let mut truncating = Truncating(Line::new());
    // `Truncating` never reports an error.
    let _ = truncating.write_fmt(args);
    truncating.0
}

struct Truncating(Line);

impl fmt::Write for Truncating {
    fn write_str(&mut self, text: &str) -> fmt::Result {
        for character in text.chars() {
            if self.0.push(character).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Wraps a [`TextDisplay`] and skips redraws whose two lines match the last ones shown.
pub struct DedupDisplay<D> {
    inner: D,
    last: Option<(Line, Line)>,
}

impl<D: TextDisplay> DedupDisplay<D> {
    /// Wraps `inner`; the first call always goes through.
    pub const fn new(inner: D) -> Self {
        Self { inner, last: None }
    }

    /// The wrapped display.
    pub const fn inner(&self) -> &D {
        &self.inner
    }

    /// Unwraps the display.
    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<D: TextDisplay> TextDisplay for DedupDisplay<D> {
    async fn show_two_lines(&mut self, line1: &str, line2: &str) {
        let first = line(format_args!("{line1}"));
        let second = line(format_args!("{line2}"));
        if self
            .last
            .as_ref()
            .is_some_and(|(shown1, shown2)| *shown1 == first && *shown2 == second)
        {
            return;
        }
        self.inner.show_two_lines(&first, &second).await;
        self.last = Some((first, second));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<(std::string::String, std::string::String)>);

    impl TextDisplay for Recorder {
        async fn show_two_lines(&mut self, line1: &str, line2: &str) {
            self.0.push((line1.to_owned(), line2.to_owned()));
        }
    }

    #[test]
    fn repeated_screen_is_sent_once() {
        let mut display = DedupDisplay::new(Recorder::default());
        embassy_futures::block_on(async {
            display.show_two_lines("Press B to set", "width: 1").await;
            display.show_two_lines("Press B to set", "width: 1").await;
            display.show_two_lines("Press B to set", "width: 2").await;
            display.show_two_lines("Press B to set", "width: 1").await;
        });
        let shown = &display.inner().0;
        assert_eq!(shown.len(), 3);
        assert_eq!(shown[1].1, "width: 2");
    }

    #[test]
    fn long_lines_are_cut_to_display_width() {
        let mut display = DedupDisplay::new(Recorder::default());
        embassy_futures::block_on(display.show_two_lines("Add another object?", "A=yes B=no"));
        assert_eq!(display.into_inner().0[0].0, "Add another obje");
    }
}
