use std::io::{self, BufRead, Write};

use anyhow::{Context, bail};

use crate::config::Config;
use crate::feed::loader::{FeedLoader, LoadOutcome};
use crate::feed::{Filters, PageSource};

use super::blog::render_entries;
use super::{Style, cms_source, output_width};

const HELP: &str = "\
commands:
  <enter> | scroll     reach the end of the list (loads the next page)
  more                 load more posts
  category [NAME]      filter by category, or clear the filter
  tag [NAME]           filter by tag, or clear the filter
  open N               open post N in the browser
  quit                 leave";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Scroll,
    More,
    Category(Option<String>),
    Tag(Option<String>),
    Open(usize),
    Help,
    Quit,
}

fn optional_arg(rest: &str) -> Option<String> {
    let rest = rest.trim();
    (!rest.is_empty()).then(|| rest.to_string())
}

fn parse_event(line: &str) -> anyhow::Result<Event> {
    let line = line.trim();
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    match command {
        "" | "scroll" => Ok(Event::Scroll),
        "more" | "m" => Ok(Event::More),
        "category" | "c" => Ok(Event::Category(optional_arg(rest))),
        "tag" | "t" => Ok(Event::Tag(optional_arg(rest))),
        "open" | "o" => {
            let n = rest
                .trim()
                .parse::<usize>()
                .with_context(|| format!("not a post number: {:?}", rest.trim()))?;
            Ok(Event::Open(n))
        }
        "help" | "?" => Ok(Event::Help),
        "quit" | "q" | "exit" => Ok(Event::Quit),
        other => bail!("unknown command: {} (type `help`)", other),
    }
}

/// Opens a post URL outside the terminal.
pub(crate) type Opener = fn(&str) -> io::Result<()>;

fn open_in_browser(url: &str) -> io::Result<()> {
    open::that(url)
}

/// Interactive feed session. Each input line is one UI event.
struct Session<'a, S, W> {
    loader: FeedLoader,
    source: &'a S,
    opener: Opener,
    out: W,
    style: Style,
    width: usize,
    shown: usize,
}

impl<S: PageSource, W: Write> Session<'_, S, W> {
    fn print_all(&mut self) -> anyhow::Result<()> {
        let entries = self.loader.entries();
        if entries.is_empty() {
            writeln!(self.out, "No blog posts found.")?;
        } else {
            write!(
                self.out,
                "{}",
                render_entries(entries, 1, &self.style, self.width)
            )?;
        }
        self.shown = entries.len();
        Ok(())
    }

    fn print_tail(&mut self, added: usize) -> anyhow::Result<()> {
        let entries = self.loader.entries();
        let start = entries.len() - added;
        write!(
            self.out,
            "{}",
            render_entries(&entries[start..], start + 1, &self.style, self.width)
        )?;
        self.shown = entries.len();
        Ok(())
    }

    fn print_footer(&mut self) -> anyhow::Result<()> {
        let Style { dim, reset, .. } = self.style;
        if self.loader.can_load_more() {
            writeln!(self.out, "{dim}-- scroll or `more` for more posts --{reset}")?;
        } else {
            writeln!(self.out, "{dim}-- end of posts --{reset}")?;
        }
        Ok(())
    }

    fn show(&mut self, outcome: LoadOutcome) -> anyhow::Result<()> {
        match outcome {
            LoadOutcome::Loaded { added } => self.print_tail(added)?,
            LoadOutcome::Fallback(notice) => {
                eprintln!("{}", notice);
                if self.loader.entries().len() != self.shown {
                    self.print_all()?;
                }
            }
            LoadOutcome::Skipped | LoadOutcome::Stale => {}
        }
        self.print_footer()
    }

    fn refilter(&mut self, filters: Filters) -> anyhow::Result<()> {
        let label = describe(&filters);
        writeln!(self.out, "=== {} ===", label)?;
        self.shown = 0;
        let outcome = self.loader.apply_filters(self.source, filters);
        if let LoadOutcome::Fallback(notice) = &outcome {
            eprintln!("{}", notice);
        }
        self.print_all()?;
        self.print_footer()
    }

    fn handle(&mut self, event: Event, config: &Config) -> anyhow::Result<bool> {
        match event {
            Event::Scroll => {
                let outcome = self.loader.on_sentinel_visible(self.source);
                self.show(outcome)?;
            }
            Event::More => {
                if !self.loader.can_load_more() {
                    writeln!(self.out, "Nothing more to load.")?;
                } else {
                    let outcome = self.loader.load_more(self.source);
                    self.show(outcome)?;
                }
            }
            Event::Category(category) => {
                let tag = self.loader.filters().tag.clone();
                self.refilter(Filters::new(category, tag))?;
            }
            Event::Tag(tag) => {
                let category = self.loader.filters().category.clone();
                self.refilter(Filters::new(category, tag))?;
            }
            Event::Open(n) => match n.checked_sub(1).and_then(|i| self.loader.entries().get(i)) {
                Some(entry) => {
                    let url = config.post_url(&entry.slug);
                    if let Err(e) = (self.opener)(&url) {
                        writeln!(self.out, "Could not open {}: {}", url, e)?;
                    }
                }
                None => writeln!(self.out, "No post number {}.", n)?,
            },
            Event::Help => writeln!(self.out, "{}", HELP)?,
            Event::Quit => return Ok(false),
        }
        Ok(true)
    }
}

fn describe(filters: &Filters) -> String {
    match (&filters.category, &filters.tag) {
        (None, None) => "All posts".to_string(),
        (Some(c), None) => format!("Category: {}", c),
        (None, Some(t)) => format!("Tag: {}", t),
        (Some(c), Some(t)) => format!("Category: {}, Tag: {}", c, t),
    }
}

pub(crate) fn run_browse<S: PageSource, R: BufRead, W: Write>(
    config: &Config,
    source: &S,
    opener: Opener,
    filters: Filters,
    input: R,
    out: W,
    style: Style,
) -> anyhow::Result<()> {
    let mut session = Session {
        loader: FeedLoader::new(),
        source,
        opener,
        out,
        style,
        width: output_width(),
        shown: 0,
    };
    session.refilter(filters)?;

    for line in input.lines() {
        let line = line.context("failed to read input")?;
        match parse_event(&line) {
            Ok(event) => {
                if !session.handle(event, config)? {
                    break;
                }
            }
            Err(e) => eprintln!("{:#}", e),
        }
        session.out.flush()?;
    }
    Ok(())
}

pub(crate) fn cmd_browse(config: &Config, filters: Filters) -> anyhow::Result<()> {
    let source = cms_source(config)?;
    let stdin = std::io::stdin();
    run_browse(
        config,
        &source,
        open_in_browser,
        filters,
        stdin.lock(),
        std::io::stdout().lock(),
        Style::for_stdout(),
    )
}
