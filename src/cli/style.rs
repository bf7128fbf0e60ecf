//! Terminal styling for the `contribute` output
//!
//! Every value printed with a color goes through [`Stylize`], which picks a
//! [`Tone`] and lets `owo-colors` decide per stream whether ANSI codes are
//! emitted (`NO_COLOR`, `CLICOLOR`, `CLICOLOR_FORCE`, TTY detection).
//!
//! | Tone       | Look   | Stream | Used for                           |
//! |------------|--------|--------|------------------------------------|
//! | `Accent`   | cyan   | stdout | URLs, package keys, logins         |
//! | `Success`  | green  | stdout | finished steps                     |
//! | `Error`    | red    | stderr | fatal errors                       |
//! | `Warn`     | yellow | stderr | missing repositories, stale forks  |
//! | `Muted`    | dim    | stdout | directories, hints, state changes  |
//! | `Emphasis` | bold   | stdout | headings, command prefixes         |

use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Style};
use std::fmt::{self, Display};
use std::sync::OnceLock;

pub use owo_colors::Stream;

/// Semantic color of a piece of output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Accent,
    Success,
    Error,
    Warn,
    Muted,
    Emphasis,
}

impl Tone {
    const fn style(self) -> Style {
        match self {
            Self::Accent => Style::new().cyan(),
            Self::Success => Style::new().green(),
            Self::Error => Style::new().red(),
            Self::Warn => Style::new().yellow(),
            Self::Muted => Style::new().dimmed(),
            Self::Emphasis => Style::new().bold(),
        }
    }

    /// Stream whose color support decides whether to emit ANSI codes
    const fn stream(self) -> Stream {
        match self {
            Self::Error | Self::Warn => Stream::Stderr,
            _ => Stream::Stdout,
        }
    }
}

/// A borrowed value rendered in a [`Tone`]
#[derive(Debug, Clone, Copy)]
pub struct Styled<T> {
    value: T,
    tone: Tone,
}

impl<T: Display> Display for Styled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = self.tone.style();
        write!(
            f,
            "{}",
            self.value
                .if_supports_color(self.tone.stream(), |v| v.style(style))
        )
    }
}

/// Tone shorthands for anything printable
pub trait Stylize: Display {
    /// Render in the given tone
    fn paint(&self, tone: Tone) -> Styled<&Self> {
        Styled { value: self, tone }
    }

    fn accent(&self) -> Styled<&Self> {
        self.paint(Tone::Accent)
    }

    fn success(&self) -> Styled<&Self> {
        self.paint(Tone::Success)
    }

    fn error(&self) -> Styled<&Self> {
        self.paint(Tone::Error)
    }

    fn warn(&self) -> Styled<&Self> {
        self.paint(Tone::Warn)
    }

    fn muted(&self) -> Styled<&Self> {
        self.paint(Tone::Muted)
    }

    fn emphasis(&self) -> Styled<&Self> {
        self.paint(Tone::Emphasis)
    }
}

impl<T: Display + ?Sized> Stylize for T {}

/// Green check mark
pub fn check() -> Styled<&'static str> {
    "✓".paint(Tone::Success)
}

/// Red cross, meant for stderr
pub fn cross() -> Styled<&'static str> {
    "✗".paint(Tone::Error)
}

/// Cyan arrow in front of state transitions
pub fn arrow() -> Styled<&'static str> {
    "→".paint(Tone::Accent)
}

/// URL as an OSC 8 hyperlink where the terminal supports it, plain text otherwise
pub fn hyperlink_url(stream: Stream, url: &str) -> String {
    let target = match stream {
        Stream::Stdout => supports_hyperlinks::Stream::Stdout,
        Stream::Stderr => supports_hyperlinks::Stream::Stderr,
    };
    if supports_hyperlinks::on(target) {
        terminal_link::Link::new(url, url).to_string()
    } else {
        url.to_string()
    }
}

/// Spinner shown while waiting on GitHub
pub fn spinner_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .expect("spinner template is valid")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
        })
        .clone()
}
