//! Draws a terminal session on a timer

use anyhow::Result;
use rand::Rng;
use std::io::Write;
use std::time::Duration;
use tokio::time::{sleep, Instant};

use super::TerminalSession;

/// ANSI: clear screen and home the cursor
const CLEAR: &str = "\x1b[2J\x1b[H";
const CURSOR: char = '█';

/// One frame of the widget as plain text
pub fn render_frame(prompt: &str, session: &TerminalSession, cursor_on: bool) -> String {
    let mut frame = String::with_capacity(prompt.len() + session.display().len() + 4);
    frame.push_str(prompt);
    frame.push_str(session.display());
    if cursor_on && session.is_typing() {
        frame.push(CURSOR);
    }
    frame
}

/// Run the animation, redrawing `out` on every transition and cursor blink.
///
/// Stops after `cycles` commands have completed, or never when `None`.
pub async fn play<W, R>(
    session: &mut TerminalSession,
    prompt: &str,
    out: &mut W,
    rng: &mut R,
    cycles: Option<usize>,
) -> Result<()>
where
    W: Write,
    R: Rng + ?Sized,
{
    let blink = session.timing().blink.max(Duration::from_millis(1));
    let started = Instant::now();
    let cursor_on = |now: Instant| {
        let ticks = now.duration_since(started).as_millis() / blink.as_millis();
        ticks % 2 == 0
    };

    draw(out, &render_frame(prompt, session, true))?;

    loop {
        if cycles.is_some_and(|limit| session.cycles() >= limit) {
            break;
        }

        let delay = session.advance(rng);
        draw(out, &render_frame(prompt, session, cursor_on(Instant::now())))?;

        // Wait out the delay, redrawing whenever the cursor toggles
        let deadline = Instant::now() + delay;
        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            let elapsed = now.duration_since(started).as_millis();
            let next_toggle = blink.as_millis() - elapsed % blink.as_millis();
            let until_toggle = Duration::from_millis(next_toggle as u64);
            let remaining = deadline - now;

            if until_toggle >= remaining {
                sleep(remaining).await;
                break;
            }
            sleep(until_toggle).await;
            if session.is_typing() {
                draw(out, &render_frame(prompt, session, cursor_on(Instant::now())))?;
            }
        }
    }

    writeln!(out)?;
    out.flush()?;
    Ok(())
}

fn draw<W: Write + ?Sized>(out: &mut W, frame: &str) -> Result<()> {
    write!(out, "{}{}", CLEAR, frame)?;
    out.flush()?;
    Ok(())
}
