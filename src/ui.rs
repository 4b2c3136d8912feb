#![cfg(feature = "std")]

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crate::{
    common::ShotOutcome,
    display::{GameDisplay, GridView},
    game::{MatchEvent, MatchReport},
    grid::Grid,
    strategy::Mode,
};

/// Plain-text display writing to any `io::Write`.
///
/// Write errors do not interrupt the match; the first one is kept and handed
/// back by [`TextDisplay::finish`].
pub struct TextDisplay<W: Write> {
    out: W,
    delay: Option<Duration>,
    error: Option<io::Error>,
}

impl TextDisplay<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TextDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            delay: None,
            error: None,
        }
    }

    /// Pause after every shot so a match can be followed live.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = (!delay.is_zero()).then_some(delay);
        self
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    /// Flush and return the writer, or the first write error seen.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn emit(&mut self, args: std::fmt::Arguments<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.out.write_fmt(args) {
            self.error = Some(e);
        }
    }

    fn flush_now(&mut self) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.out.flush() {
            self.error = Some(e);
        }
    }
}

impl<W: Write> GameDisplay for TextDisplay<W> {
    fn render(&mut self, grid: &Grid, reveal: bool) {
        self.emit(format_args!("{}", GridView::new(grid, reveal)));
    }

    fn announce(&mut self, event: &MatchEvent) {
        match *event {
            MatchEvent::Started => self.emit(format_args!("\n--- New match ---\n")),
            MatchEvent::Board { side } => self.emit(format_args!("\n{}'s grid:\n", side)),
            MatchEvent::Shot {
                attacker,
                row,
                col,
                outcome,
                mode,
            } => {
                let tag = match mode {
                    Mode::Search => "",
                    Mode::Hunt => " [hunt]",
                };
                match outcome {
                    ShotOutcome::Hit => {
                        self.emit(format_args!("{} hits at ({}, {})!{}\n", attacker, row, col, tag))
                    }
                    ShotOutcome::Miss => self.emit(format_args!(
                        "{} misses at ({}, {}).{}\n",
                        attacker, row, col, tag
                    )),
                }
                if let Some(delay) = self.delay {
                    self.flush_now();
                    thread::sleep(delay);
                }
            }
            MatchEvent::Won { winner, shots } => {
                self.emit(format_args!("\n{} wins after {} shots!\n", winner, shots))
            }
        }
    }
}

/// One-line summary of a finished match.
pub fn summary_line(report: &MatchReport) -> String {
    format!(
        "{} won in round {}: A fired {} ({} hits), B fired {} ({} hits)",
        report.winner,
        report.rounds + 1,
        report.side_a.shots,
        report.side_a.hits,
        report.side_b.shots,
        report.side_b.hits,
    )
}
