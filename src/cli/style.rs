//! Terminal styling for train output
//!
//! Color is applied only when stdout supports it; `owo-colors` reads
//! `NO_COLOR`, `CLICOLOR` and `CLICOLOR_FORCE`, so piped output and test
//! captures stay plain.
//!
//! | Method        | Look | Used for                             |
//! |---------------|------|--------------------------------------|
//! | `.accent()`   | Cyan | PR numbers, cycle and label counts   |
//! | `.muted()`    | Dim  | Dry-run markers, wait hints          |
//! | `.emphasis()` | Bold | Titles of PRs just labelled          |

use indicatif::ProgressStyle;
pub use owo_colors::Stream;
use owo_colors::{OwoColorize, Style};
use std::fmt::{self, Display};
use std::sync::OnceLock;

const ACCENT: Style = Style::new().cyan();
const MUTED: Style = Style::new().dimmed();
const EMPHASIS: Style = Style::new().bold();

/// Train output fragment carrying its style and target stream
#[derive(Clone, Debug)]
pub struct Styled<T> {
    value: T,
    style: Style,
    stream: Stream,
}

impl<T> Styled<T> {
    const fn new(value: T, style: Style, stream: Stream) -> Self {
        Self {
            value,
            style,
            stream,
        }
    }
}

impl<T: Display> Display for Styled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.value
                .if_supports_color(self.stream, |v| v.style(self.style))
        )
    }
}

/// Styles for the values printed in cycle reports
pub trait Stylize: Display {
    /// PR numbers and counts
    fn accent(&self) -> Styled<&Self> {
        Styled::new(self, ACCENT, Stream::Stdout)
    }

    /// Markers that are not part of the report itself
    fn muted(&self) -> Styled<&Self> {
        Styled::new(self, MUTED, Stream::Stdout)
    }

    /// Titles of PRs that were acted on
    fn emphasis(&self) -> Styled<&Self> {
        Styled::new(self, EMPHASIS, Stream::Stdout)
    }
}

impl<T: Display + ?Sized> Stylize for T {}

const fn hyperlink_stream(stream: Stream) -> supports_hyperlinks::Stream {
    match stream {
        Stream::Stdout => supports_hyperlinks::Stream::Stdout,
        Stream::Stderr => supports_hyperlinks::Stream::Stderr,
    }
}

/// Link a PR reference to its web page when the terminal can render OSC 8
pub fn hyperlink(stream: Stream, text: &str, url: &str) -> String {
    if supports_hyperlinks::on(hyperlink_stream(stream)) {
        terminal_link::Link::new(text, url).to_string()
    } else {
        text.to_string()
    }
}

/// Spinner drawn on stderr between cycles
pub fn spinner_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg} ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        })
        .clone()
}
