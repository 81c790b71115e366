pub mod apply;
pub mod blog;
pub mod browse;
pub mod careers;
pub mod topics;

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use terminal_size::{Width, terminal_size};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::config::Config;
use crate::feed::cms::CmsClient;

pub(crate) struct Style {
    pub bold: &'static str,
    pub dim: &'static str,
    pub accent: &'static str,
    pub reset: &'static str,
}

impl Style {
    pub fn for_stdout() -> Self {
        Self::new(std::io::stdout().is_terminal())
    }

    pub fn new(color: bool) -> Self {
        if color {
            Self {
                bold: "\x1b[1m",
                dim: "\x1b[2m",
                accent: "\x1b[36m",
                reset: "\x1b[0m",
            }
        } else {
            Self {
                bold: "",
                dim: "",
                accent: "",
                reset: "",
            }
        }
    }
}

pub(crate) fn output_width() -> usize {
    terminal_size()
        .map(|(Width(w), _)| w as usize)
        .unwrap_or(80)
}

/// Cuts `text` to at most `width` columns, marking the cut with an ellipsis.
pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

pub(crate) fn spinner(message: &str) -> ProgressBar {
    let sp = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        sp.set_style(style);
    }
    sp.enable_steady_tick(Duration::from_millis(80));
    sp.set_message(message.to_string());
    sp
}

pub(crate) fn cms_source(config: &Config) -> anyhow::Result<CmsClient> {
    let client = crate::http::http_client(config.timeout())?;
    Ok(CmsClient::new(client, config.feed_url()?))
}
