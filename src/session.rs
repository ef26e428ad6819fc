//! Interactive mode: each typed command maps to one list-state transition
//! followed by a redraw of the affected section.

use chrono::Utc;
use std::io::Write;
use std::str::FromStr;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::fetch::Fetcher;
use crate::listing::SortKey;
use crate::portfolio::Portfolio;
use crate::render::{RenderError, SectionKind, Terminal};

const HELP: &str = "\
commands:
  filter <tag>       show items with this language/tag (`all`, `other`)
  search [term]      narrow the filtered items by name, description or topic
  sort <key>         reorder shown items: updated, stars, forks, name, created
  more               load the next page
  reload             fetch the focused section again
  focus <section>    switch between projects and articles
  show               redraw the whole page
  help               this text
  quit               leave";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to read input: {0}")]
    Input(#[from] std::io::Error),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Filter(String),
    Search(String),
    Sort(SortKey),
    LoadMore,
    Reload,
    Focus(SectionKind),
    Show,
    Help,
    Quit,
}

impl FromStr for Action {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command.to_lowercase().as_str() {
            "filter" if rest.is_empty() => Err("usage: filter <tag>".to_string()),
            "filter" => Ok(Action::Filter(rest.to_string())),
            "search" => Ok(Action::Search(rest.to_string())),
            "sort" => rest.parse().map(Action::Sort),
            "more" => Ok(Action::LoadMore),
            "reload" => Ok(Action::Reload),
            "focus" => rest.parse().map(Action::Focus),
            "show" => Ok(Action::Show),
            "help" | "?" => Ok(Action::Help),
            "quit" | "exit" | "q" => Ok(Action::Quit),
            other => Err(format!("unknown command '{other}' (type `help`)")),
        }
    }
}

pub struct Session<'a> {
    fetcher: &'a Fetcher,
    portfolio: Portfolio,
    focus: SectionKind,
    terminal: Terminal,
}

impl<'a> Session<'a> {
    pub fn new(fetcher: &'a Fetcher, portfolio: Portfolio, terminal: Terminal) -> Self {
        Self {
            fetcher,
            portfolio,
            focus: SectionKind::Projects,
            terminal,
        }
    }

    /// Draw the page, then read commands until `quit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, out: &mut W) -> Result<(), SessionError>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let page = self.portfolio.page(Utc::now());
        self.terminal.print_page(&page, out).await?;
        writeln!(out, "Type `help` for commands.")?;

        let mut lines = input.lines();
        loop {
            write!(out, "{}> ", self.focus)?;
            out.flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<Action>() {
                Ok(action) => {
                    if !self.handle(action, out).await? {
                        break;
                    }
                }
                Err(message) => writeln!(out, "{message}")?,
            }
        }

        info!("session ended");
        Ok(())
    }

    /// Apply one action and redraw. Returns false when the session should end.
    pub async fn handle<W: Write>(&mut self, action: Action, out: &mut W) -> Result<bool, SessionError> {
        debug!(?action, focus = %self.focus, "handling action");
        let focus = self.focus;

        match action {
            Action::Quit => return Ok(false),
            Action::Help => {
                writeln!(out, "{HELP}")?;
                return Ok(true);
            }
            Action::Show => {
                let page = self.portfolio.page(Utc::now());
                self.terminal.print_page(&page, out).await?;
                return Ok(true);
            }
            Action::Focus(kind) => self.focus = kind,
            Action::Reload => self.portfolio.reload(self.fetcher, focus).await,
            Action::Filter(tag) => match focus {
                SectionKind::Projects => self.portfolio.projects.filter(&tag),
                SectionKind::Articles => self.portfolio.articles.filter(&tag),
            },
            Action::Search(term) => match focus {
                SectionKind::Projects => self.portfolio.projects.search(&term),
                SectionKind::Articles => self.portfolio.articles.search(&term),
            },
            Action::Sort(key) => match focus {
                SectionKind::Projects => self.portfolio.projects.sort(key),
                SectionKind::Articles => self.portfolio.articles.sort(key),
            },
            Action::LoadMore => {
                let added = match focus {
                    SectionKind::Projects => self.portfolio.projects.load_more(),
                    SectionKind::Articles => self.portfolio.articles.load_more(),
                };
                if added == 0 {
                    writeln!(out, "Everything is already shown.")?;
                    return Ok(true);
                }
            }
        }

        let section = self.portfolio.section(self.focus, Utc::now());
        self.terminal.print_section(&section, out).await?;
        Ok(true)
    }
}
