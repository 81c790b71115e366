use std::fmt::Write;

use anyhow::ensure;
use indicatif::ProgressBar;

use crate::config::Config;
use crate::feed::loader::{FeedLoader, LoadOutcome};
use crate::feed::{FeedEntry, Filters, PageSource};

use super::{Style, cms_source, output_width, spinner, truncate};

fn format_date(entry: &FeedEntry) -> String {
    entry
        .published_at
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn format_labels(entry: &FeedEntry) -> String {
    let mut labels: Vec<String> = Vec::new();
    if let Some(category) = &entry.category {
        labels.push(format!("[{}]", category));
    }
    labels.extend(entry.tags.iter().map(|t| format!("#{}", t)));
    labels.join(" ")
}

pub(crate) fn format_entry(index: usize, entry: &FeedEntry, style: &Style, width: usize) -> String {
    let Style {
        bold,
        dim,
        accent,
        reset,
    } = style;
    let mut line = format!(
        "{accent}{}{reset}  {bold}{:>2}{reset} {}",
        format_date(entry),
        index,
        entry.title
    );
    if !entry.author.is_empty() {
        write!(line, " {dim}({}){reset}", entry.author).unwrap();
    }
    let labels = format_labels(entry);
    if !labels.is_empty() {
        write!(line, " {dim}{}{reset}", labels).unwrap();
    }
    if !entry.description.is_empty() {
        let indent = "              ";
        let text = truncate(&entry.description, width.saturating_sub(indent.len()));
        write!(line, "\n{indent}{dim}{}{reset}", text).unwrap();
    }
    line
}

/// Renders `entries` numbering them from `first_index`.
pub(crate) fn render_entries(
    entries: &[FeedEntry],
    first_index: usize,
    style: &Style,
    width: usize,
) -> String {
    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        writeln!(out, "{}", format_entry(first_index + i, entry, style, width)).unwrap();
    }
    out
}

pub(crate) fn report(outcome: &LoadOutcome, sp: &ProgressBar) {
    if let LoadOutcome::Fallback(notice) = outcome {
        sp.suspend(|| eprintln!("{}", notice));
    }
}

pub(crate) fn load_pages<S: PageSource>(
    loader: &mut FeedLoader,
    source: &S,
    filters: Filters,
    pages: u32,
) {
    let sp = spinner("Loading posts...");
    let mut outcome = loader.apply_filters(source, filters);
    report(&outcome, &sp);
    // A failed page would only fail again
    for _ in 1..pages {
        if !matches!(outcome, LoadOutcome::Loaded { .. }) {
            break;
        }
        outcome = loader.load_more(source);
        report(&outcome, &sp);
    }
    sp.finish_and_clear();
}

pub(crate) fn cmd_blog(config: &Config, filters: Filters, pages: u32) -> anyhow::Result<()> {
    ensure!(pages >= 1, "--pages must be at least 1");
    let source = cms_source(config)?;
    let mut loader = FeedLoader::new();

    load_pages(&mut loader, &source, filters, pages);

    ensure!(!loader.entries().is_empty(), "No blog posts found.");
    let style = Style::for_stdout();
    print!(
        "{}",
        render_entries(loader.entries(), 1, &style, output_width())
    );
    if loader.has_more() {
        println!(
            "{}-- more posts available (use --pages or `site browse`) --{}",
            style.dim, style.reset
        );
    }
    Ok(())
}
