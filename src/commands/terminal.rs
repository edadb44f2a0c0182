//! Play the terminal widget in the real terminal

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::terminal::{play, prompt_for, TerminalSession, Timing};
use crate::Site;

/// Run the animation on stdout; `cycles` of `None` loops until interrupted
pub async fn run(site: &Site, cycles: Option<usize>) -> Result<()> {
    let script = site.terminal_script();
    tracing::debug!("Playing {} terminal commands", script.len());

    let mut session = TerminalSession::new(script, Timing::default());
    let mut rng = StdRng::from_entropy();
    let prompt = prompt_for(&site.config.author);
    let mut out = std::io::stdout();

    play(&mut session, &prompt, &mut out, &mut rng, cycles).await
}
