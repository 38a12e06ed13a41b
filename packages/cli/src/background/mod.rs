//! Timed (slideshow) background documents.
//!
//! GNOME reads a `<background>` document made of a start time followed by a
//! chain of transitions. The chain built here is a closed loop: the first
//! transition fades in from the last image, so the cycle never jumps.

pub mod images;

use std::fmt;
use std::path::{Path, PathBuf};

/// Line terminator of generated timed-background documents.
const CRLF: &str = "\r\n";

/// Total time it takes a background to go through every image once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleDuration {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl CycleDuration {
    #[must_use]
    pub const fn new(hours: u64, minutes: u64, seconds: u64) -> Self {
        Self { hours, minutes, seconds }
    }

    /// Total cycle length in seconds.
    ///
    /// Summed in `u128`, which holds any combination of `u64` parts.
    #[must_use]
    pub const fn total_seconds(self) -> u128 {
        self.hours as u128 * 3600 + self.minutes as u128 * 60 + self.seconds as u128
    }

    /// Seconds each of `count` images stays on screen, rounded to one decimal.
    ///
    /// Rounding goes through the exact decimal value of the quotient, so
    /// halfway cases round to even (`0.25` becomes `0.2`) and values just
    /// above a tie round up (`4320.05` becomes `4320.1`).
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Durations beyond 2^53 seconds lose sub-second precision
    pub fn per_image(self, count: usize) -> f64 {
        if count == 0 {
            return 0.0;
        }
        let exact = self.total_seconds() as f64 / count as f64;
        format!("{exact:.1}").parse().unwrap_or(exact)
    }
}

impl fmt::Display for CycleDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m {}s", self.hours, self.minutes, self.seconds)
    }
}

/// Calendar point the slideshow is anchored to.
///
/// Values are written as-is and never validated; GNOME only uses them to
/// compute the phase of the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartTime {
    pub year: u32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl Default for StartTime {
    fn default() -> Self { Self { year: 2021, month: 0, day: 0, hour: 0, minute: 0, second: 0 } }
}

impl StartTime {
    fn fields(&self) -> [(&'static str, u32); 6] {
        [
            ("year", self.year),
            ("month", self.month),
            ("day", self.day),
            ("hour", self.hour),
            ("minute", self.minute),
            ("second", self.second),
        ]
    }
}

/// Kind of transition between two images.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransitionKind {
    /// Crossfade from one image to the next.
    #[default]
    Overlay,
}

impl TransitionKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overlay => "overlay",
        }
    }
}

/// A single fade between two installed images.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub kind: TransitionKind,
    /// Seconds, already rounded to one decimal.
    pub duration: f64,
    pub from: PathBuf,
    pub to: PathBuf,
}

/// A timed background ready to be serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedBackground {
    pub start_time: StartTime,
    pub transitions: Vec<Transition>,
}

impl TimedBackground {
    /// Builds a looping chain of evenly spaced overlay transitions.
    ///
    /// Transition `i` goes from image `i - 1` to image `i`, and the first one
    /// starts from the last image. Returns `None` when `images` is empty.
    #[must_use]
    pub fn looping(images: &[PathBuf], cycle: CycleDuration) -> Option<Self> {
        let mut previous = images.last()?;
        let duration = cycle.per_image(images.len());
        tracing::debug!(duration, count = images.len(), "computed per-image duration");

        let transitions = images
            .iter()
            .map(|image| {
                tracing::debug!(image = %image.display(), "preparing transition");
                let transition = Transition {
                    kind: TransitionKind::Overlay,
                    duration,
                    from: previous.clone(),
                    to: image.clone(),
                };
                previous = image;
                transition
            })
            .collect();

        Some(Self { start_time: StartTime::default(), transitions })
    }

    /// Seconds each image is shown, or `None` for an empty background.
    #[must_use]
    pub fn duration(&self) -> Option<f64> { self.transitions.first().map(|t| t.duration) }

    /// Renders the `<background>` document with tab indentation and CRLF.
    #[must_use]
    pub fn to_xml(&self) -> String {
        let mut out = String::new();

        out.push_str("<background>");
        out.push_str(CRLF);

        out.push_str("\t<starttime>");
        out.push_str(CRLF);
        for (tag, value) in self.start_time.fields() {
            out.push_str(&format!("\t\t<{tag}>{value}</{tag}>{CRLF}"));
        }
        out.push_str("\t</starttime>");
        out.push_str(CRLF);
        out.push_str(CRLF);

        let blocks: Vec<String> = self.transitions.iter().map(render_transition).collect();
        out.push_str(&blocks.join(CRLF));

        out.push_str("</background>");
        out.push_str(CRLF);
        out
    }
}

fn render_transition(transition: &Transition) -> String {
    format!(
        "\t<transition type=\"{kind}\">{CRLF}\
         \t\t<duration>{duration:.1}</duration>{CRLF}\
         \t\t<from>{from}</from>{CRLF}\
         \t\t<to>{to}</to>{CRLF}\
         \t</transition>{CRLF}",
        kind = transition.kind.as_str(),
        duration = transition.duration,
        from = quick_xml::escape::escape(transition.from.to_string_lossy()),
        to = quick_xml::escape::escape(transition.to.to_string_lossy()),
    )
}

/// Where the images of background `name` live once installed.
#[must_use]
pub fn install_dir(backgrounds_dir: &Path, name: &str) -> PathBuf { backgrounds_dir.join(name) }

/// Path of the timed document for background `name`.
#[must_use]
pub fn timed_document_path(backgrounds_dir: &Path, name: &str) -> PathBuf {
    install_dir(backgrounds_dir, name).join(format!("{name}-timed.xml"))
}

/// Maps source images to their installed location, keeping the order.
#[must_use]
pub fn installed_paths(backgrounds_dir: &Path, name: &str, images: &[PathBuf]) -> Vec<PathBuf> {
    let target = install_dir(backgrounds_dir, name);
    images
        .iter()
        .filter_map(|image| image.file_name().map(|file| target.join(file)))
        .collect()
}
