//! Terminal session state machine

use rand::Rng;
use std::time::Duration;

use super::{TerminalScript, Timing};

/// Where the session is within the current command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Revealing the command one character at a time
    Typing,
    /// Command fully typed, response not shown yet
    Waiting,
    /// Response shown, about to move to the next command
    Holding,
}

/// State of the fake shell. Each call to [`TerminalSession::advance`]
/// performs one transition and returns how long to wait before the next.
#[derive(Debug, Clone)]
pub struct TerminalSession {
    script: TerminalScript,
    timing: Timing,
    index: usize,
    typed: usize,
    display: String,
    phase: Phase,
    cycles: usize,
}

impl TerminalSession {
    pub fn new(script: TerminalScript, timing: Timing) -> Self {
        Self {
            script,
            timing,
            index: 0,
            typed: 0,
            display: String::new(),
            phase: Phase::Typing,
            cycles: 0,
        }
    }

    /// Text currently on screen after the prompt
    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the current command in the script
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current_command(&self) -> &str {
        self.script.command(self.index)
    }

    /// Commands that have run to completion so far
    pub fn cycles(&self) -> usize {
        self.cycles
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    /// The cursor is drawn only while typing
    pub fn is_typing(&self) -> bool {
        self.phase == Phase::Typing
    }

    /// Perform the next transition; returns the delay before the following one
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Duration {
        match self.phase {
            Phase::Typing => {
                let command = self.script.command(self.index);
                match command.chars().nth(self.typed) {
                    Some(c) => {
                        self.display.push(c);
                        self.typed += 1;
                        self.keystroke_delay(rng)
                    }
                    None => {
                        self.phase = Phase::Waiting;
                        self.timing.response_pause
                    }
                }
            }
            Phase::Waiting => {
                let command = self.script.command(self.index);
                let response = self.script.response_for(command);
                self.display.push('\n');
                self.display.push_str(response);
                self.phase = Phase::Holding;
                self.timing.hold
            }
            Phase::Holding => {
                self.index = (self.index + 1) % self.script.len();
                self.typed = 0;
                self.display.clear();
                self.phase = Phase::Typing;
                self.cycles += 1;
                tracing::trace!("Terminal moved to command {}", self.index);
                Duration::ZERO
            }
        }
    }

    fn keystroke_delay<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let jitter = self.timing.keystroke_jitter.as_millis() as u64;
        let extra = if jitter == 0 {
            0
        } else {
            rng.gen_range(0..jitter)
        };
        self.timing.keystroke_min + Duration::from_millis(extra)
    }
}
