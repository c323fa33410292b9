//! # Interpreter
//!
//! Reads lines, validates them, and applies the resulting operations to the
//! session. Every processed line leaves an [`ExecutionStep`] in the trace.
//!
//! Lines run strictly one after another: an animated move finishes before
//! the next line is looked at. A [`ShutdownToken`] is checked before each
//! line is read and never interrupts a line in progress.

use crate::agent::Agent;
use crate::command::{parse_line, Operation};
use crate::config::SessionConfig;
use crate::error::{self, Error, ErrorKind, Result};
use crate::render::{DrawSink, TextSink};
use crate::session::Session;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Interactive prompt
pub const PROMPT: &str = " t: ";

/// One processed line
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionStep {
    /// 1-based position among processed lines
    pub step: usize,
    /// The line as read, without surrounding whitespace
    pub command: String,
    /// Short summary of what happened
    pub result: String,
    /// Error message, if the line failed
    pub error: Option<String>,
}

/// Why the interpreter loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// `bye` was executed
    Bye,
    /// The input source ran out
    EndOfInput,
    /// A shutdown was requested between lines
    Shutdown,
}

/// Shared flag asking the interpreter to stop before its next line
#[derive(Debug, Clone, Default)]
pub struct ShutdownToken {
    requested: Arc<AtomicBool>,
}

impl ShutdownToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        if !self.requested.swap(true, Ordering::SeqCst) {
            info!("shutdown requested");
        }
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}

/// The turtle language interpreter
pub struct Interpreter<W: Write> {
    session: Session,
    sink: Box<dyn DrawSink>,
    out: W,
    trace: Vec<ExecutionStep>,
    shutdown: ShutdownToken,
}

impl<W: Write> Interpreter<W> {
    /// Create an interpreter drawing through `sink` and writing its
    /// transcript to `out`. Fails if the configuration is invalid.
    pub fn new(config: SessionConfig, sink: Box<dyn DrawSink>, out: W) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            session: Session::new(config),
            sink,
            out,
            trace: Vec::new(),
            shutdown: ShutdownToken::new(),
        })
    }

    /// Text-only interpreter: Cartesian turtles, moves reported as text
    pub fn text_mode(out: W) -> Self {
        Self {
            session: Session::new(SessionConfig::text_mode()),
            sink: Box::new(TextSink),
            out,
            trace: Vec::new(),
            shutdown: ShutdownToken::new(),
        }
    }

    /// Share an existing shutdown token
    pub fn with_shutdown(mut self, token: ShutdownToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn shutdown_token(&self) -> ShutdownToken {
        self.shutdown.clone()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Every line processed so far
    pub fn trace(&self) -> &[ExecutionStep] {
        &self.trace
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Run until `bye`, end of input, or a shutdown request
    pub fn run<I, S>(&mut self, lines: I) -> Result<ExitReason>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run_source(lines.into_iter().map(Ok))
    }

    /// Like [`Interpreter::run`], for sources whose reads can fail.
    /// A read error stops the loop and is returned.
    pub fn run_source<I, S>(&mut self, lines: I) -> Result<ExitReason>
    where
        I: IntoIterator<Item = Result<S>>,
        S: AsRef<str>,
    {
        let mut lines = lines.into_iter();
        let reason = loop {
            if self.shutdown.is_requested() {
                break ExitReason::Shutdown;
            }
            let Some(line) = lines.next() else {
                break ExitReason::EndOfInput;
            };
            if let Some(reason) = self.execute_line(line?.as_ref())? {
                break reason;
            }
        };
        self.out.flush().map_err(error::output_failed)?;
        info!(?reason, steps = self.trace.len(), "interpreter stopped");
        Ok(reason)
    }

    /// Process one line.
    ///
    /// Returns `Some(ExitReason::Bye)` after `bye`. Rejected commands are
    /// reported on the transcript and are not errors; only a failure to write
    /// the transcript is.
    pub fn execute_line(&mut self, line: &str) -> Result<Option<ExitReason>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let step = self.trace.len() + 1;

        let op = match parse_line(line, &self.session) {
            Ok(op) => op,
            Err(err) => {
                debug!(step, kind = %err.kind(), "rejected: {}", line);
                writeln!(self.out, "{}", error::syntax_error_line(&err)).map_err(error::output_failed)?;
                self.record(step, line, "rejected", Some(&err));
                return Ok(None);
            }
        };

        debug!(step, op = ?op, "dispatch");
        match self.dispatch(&op) {
            Ok(summary) => self.record(step, line, &summary, None),
            Err(err) if err.kind() == ErrorKind::SurfaceClosed => {
                warn!(error = %err, "drawing surface closed");
                self.record(step, line, "display closed", Some(&err));
                self.shutdown.request();
            }
            Err(err) => {
                self.record(step, line, "failed", Some(&err));
                return Err(err);
            }
        }

        Ok(op.is_terminal().then_some(ExitReason::Bye))
    }

    fn dispatch(&mut self, op: &Operation) -> Result<String> {
        let summary = match op {
            Operation::Turtle { name } => {
                if self.session.insert_or_replace(name) {
                    format!("created {}", name)
                } else {
                    format!("reset {}", name)
                }
            }
            Operation::Move { name, distance } => {
                let agent = agent_mut(&mut self.session, name)?;
                let notice = agent.advance(*distance, self.sink.as_mut())?;
                let at = agent.position();
                if let Some(notice) = notice {
                    writeln!(self.out, "{}", notice).map_err(error::output_failed)?;
                }
                format!("{} at ({:.2}, {:.2})", name, at.x, at.y)
            }
            Operation::Left { name, degrees } => {
                let agent = agent_mut(&mut self.session, name)?;
                agent.left(*degrees);
                format!("{} heading {:.2}", name, agent.heading())
            }
            Operation::Right { name, degrees } => {
                let agent = agent_mut(&mut self.session, name)?;
                agent.right(*degrees);
                format!("{} heading {:.2}", name, agent.heading())
            }
            Operation::Pen { name, state } => {
                agent_mut(&mut self.session, name)?.pen(*state);
                format!("{} pen {}", name, state)
            }
            Operation::Colour { name, colour } => {
                agent_mut(&mut self.session, name)?.set_colour(*colour);
                format!("{} colour {}", name, colour)
            }
            Operation::Status => {
                for line in self.session.status_report() {
                    writeln!(self.out, "{}", line).map_err(error::output_failed)?;
                }
                format!("{} turtles", self.session.len())
            }
            Operation::Bye => "bye".to_string(),
        };
        Ok(summary)
    }

    fn record(&mut self, step: usize, command: &str, result: &str, err: Option<&Error>) {
        self.trace.push(ExecutionStep {
            step,
            command: command.to_string(),
            result: result.to_string(),
            error: err.map(|e| e.message().to_string()),
        });
    }
}

/// Validated operations only name existing turtles; a miss here is a bug
fn agent_mut<'a>(session: &'a mut Session, name: &str) -> Result<&'a mut Agent> {
    session.get_mut(name).ok_or_else(|| {
        Error::unexpected(format!("turtle '{}' vanished after validation", name)).with_operation("interpreter::dispatch")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, RotationConvention};
    use crate::palette::{Colour, PenState};
    use crate::render::{AnimatedSink, ManualClock, RecordingSurface, Renderer};
    use std::time::Duration;

    fn transcript(interp: &Interpreter<Vec<u8>>) -> Vec<String> {
        String::from_utf8(interp.output().clone())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_bill_session() {
        let mut interp = Interpreter::text_mode(Vec::new());
        let program = ["turtle bill", "move bill 90", "right bill 30", "move bill 20", "status", "bye", "move bill 5"];

        let reason = interp.run(program).unwrap();

        assert_eq!(reason, ExitReason::Bye);
        assert_eq!(
            transcript(&interp),
            [
                "    drew from (0.00, 0.00) to (0.00, 90.00)",
                "    drew from (0.00, 90.00) to (10.00, 107.32)",
                "          bill:  (  10.00,  107.32) |  60.00° | DOWN | black",
            ]
        );
        // the line after bye is never read
        assert_eq!(interp.trace().len(), 6);
        assert_eq!(interp.trace()[5].command, "bye");
    }

    #[test]
    fn test_square_demo_returns_home() {
        let mut interp = Interpreter::text_mode(Vec::new());
        let program = include_str!("../../demos/square.tt");

        assert_eq!(interp.run(program.lines()).unwrap(), ExitReason::EndOfInput);

        let out = transcript(&interp);
        assert_eq!(out.iter().filter(|l| l.starts_with("    drew from")).count(), 4);
        assert!(out.last().unwrap().ends_with("|  90.00° | DOWN | firebrick"));
        let bob = interp.session().get("bob").unwrap();
        assert!(bob.position().distance_to(&Point::ORIGIN) < 1e-9);
    }

    #[test]
    fn test_status_with_no_turtles() {
        let mut interp = Interpreter::text_mode(Vec::new());
        assert_eq!(interp.run(["status"]).unwrap(), ExitReason::EndOfInput);
        assert_eq!(transcript(&interp), ["    No turtles!"]);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let mut interp = Interpreter::text_mode(Vec::new());
        interp.run(["", "   ", "turtle bob", "\t"]).unwrap();
        assert_eq!(interp.trace().len(), 1);
        assert_eq!(interp.trace()[0].step, 1);
        assert_eq!(interp.trace()[0].result, "created bob");
    }

    #[test]
    fn test_turtle_reset() {
        let mut interp = Interpreter::text_mode(Vec::new());
        interp
            .run(["turtle bob", "turtle ann", "move bob 10", "left bob 45", "pen bob up", "colour bob red", "turtle bob"])
            .unwrap();

        let bob = interp.session().get("bob").unwrap();
        assert_eq!(bob.position(), Point::ORIGIN);
        assert_eq!(bob.heading(), 90.0);
        assert_eq!(bob.pen_state(), PenState::Down);
        assert_eq!(bob.colour(), Colour::Black);
        let names: Vec<_> = interp.session().agents().map(|a| a.name()).collect();
        assert_eq!(names, ["bob", "ann"]);
        assert_eq!(interp.trace().last().unwrap().result, "reset bob");
    }

    #[test]
    fn test_rejected_lines_leave_state_alone() {
        let mut interp = Interpreter::text_mode(Vec::new());
        interp.run(["turtle bob", "colour bob red"]).unwrap();
        let before = interp.session().get("bob").unwrap().clone();

        interp
            .run(["colour bob teal", "move bob abc", "left bob 360", "left bob -1", "pen bob maybe", "move ann 3"])
            .unwrap();

        assert_eq!(interp.session().get("bob").unwrap(), &before);
        assert_eq!(
            transcript(&interp),
            [
                "*** Unknown syntax for 'colour': 'teal' is not a known colour",
                "*** Unknown syntax for 'move': 'abc' is not a real number",
                "*** Unknown syntax for 'left': '360' should be in [0,360)",
                "*** Unknown syntax for 'left': '-1' should be in [0,360)",
                "*** Unknown syntax for 'pen': 'maybe' is not a known pen state",
                "*** Unknown syntax for 'move': 'ann' is not a turtle",
            ]
        );
        let failed = interp.trace().iter().filter(|s| s.error.is_some()).count();
        assert_eq!(failed, 6);
    }

    #[test]
    fn test_unknown_command_does_not_stop_the_loop() {
        let mut interp = Interpreter::text_mode(Vec::new());
        let reason = interp.run(["jump", "turtle bob", "left bob 0"]).unwrap();

        assert_eq!(reason, ExitReason::EndOfInput);
        assert_eq!(transcript(&interp), ["*** Unknown syntax for 'jump': unknown command"]);
        assert_eq!(interp.session().len(), 1);
    }

    #[test]
    fn test_shutdown_stops_between_lines() {
        let mut interp = Interpreter::text_mode(Vec::new());
        let token = interp.shutdown_token();
        interp.run(["turtle bob"]).unwrap();

        token.request();
        let reason = interp.run(["move bob 10"]).unwrap();

        assert_eq!(reason, ExitReason::Shutdown);
        assert_eq!(interp.session().get("bob").unwrap().position(), Point::ORIGIN);
        assert!(transcript(&interp).is_empty());
    }

    #[test]
    fn test_read_error_is_returned() {
        let mut interp = Interpreter::text_mode(Vec::new());
        let lines: Vec<Result<String>> = vec![
            Ok("turtle bob".to_string()),
            Err(Error::new(ErrorKind::IoFailed, "read failed")),
            Ok("move bob 1".to_string()),
        ];

        let err = interp.run_source(lines).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::IoFailed);
        assert_eq!(interp.trace().len(), 1);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SessionConfig::text_mode().with_speed(26);
        let err = Interpreter::new(config, Box::new(TextSink), Vec::new()).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_screen_session_draws_on_surface() {
        let surface = RecordingSurface::new();
        let clock = ManualClock::new();
        let config = SessionConfig::screen(600, 600).with_speed(3).with_delay_ms(10);
        let sink = AnimatedSink::new(Renderer::from_config(&config), surface.clone(), clock.clone());
        let mut interp = Interpreter::new(config, Box::new(sink), Vec::new()).unwrap();

        interp
            .run(["turtle bob", "colour bob blue", "move bob 100", "right bob 90", "pen bob up", "move bob 50"])
            .unwrap();

        // animated sessions write nothing for moves
        assert!(transcript(&interp).is_empty());
        let events = surface.events();
        assert_eq!(events.len(), 13);
        assert_eq!(events[0].from, Point::new(300.0, 300.0));
        assert!((events[12].to.y - 200.0).abs() < 1e-9);
        assert!(events.iter().all(|e| e.colour == Colour::Blue));
        assert_eq!(clock.pauses(), 13);
        assert_eq!(clock.elapsed(), Duration::from_millis(130));

        let bob = interp.session().get("bob").unwrap();
        assert_eq!(bob.convention(), RotationConvention::Screen);
        assert_eq!(bob.heading(), 0.0);
        assert!((bob.position().x - 350.0).abs() < 1e-9);
    }

    #[test]
    fn test_closed_surface_requests_shutdown() {
        use crate::render::ChannelSurface;
        use tokio::sync::mpsc::unbounded_channel;

        let (tx, rx) = unbounded_channel();
        drop(rx);
        let config = SessionConfig::screen(100, 100).with_speed(0);
        let sink = AnimatedSink::new(Renderer::from_config(&config), ChannelSurface::new(tx), ManualClock::new());
        let mut interp = Interpreter::new(config, Box::new(sink), Vec::new()).unwrap();

        let reason = interp.run(["turtle bob", "move bob 10", "move bob 10"]).unwrap();

        assert_eq!(reason, ExitReason::Shutdown);
        assert_eq!(interp.trace().len(), 2);
        assert_eq!(interp.trace()[1].result, "display closed");
        assert!(interp.shutdown_token().is_requested());
    }
}
