//! Scripted terminal widget
//!
//! A fake shell session that types a fixed list of commands one character
//! at a time, prints a canned response for each, and loops forever. Nothing
//! is executed and no input is read.
//!
//! [`TerminalSession`] is the timing-free state machine; [`play`] drives it
//! on a tokio timer and draws frames to any writer.

mod player;
mod session;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::SiteConfig;

pub use player::{play, render_frame};
pub use session::{Phase, TerminalSession};

/// One command of the script and what it "prints"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptEntry {
    pub command: String,
    #[serde(default)]
    pub response: String,
}

/// Ordered commands plus the command -> response lookup
#[derive(Debug, Clone)]
pub struct TerminalScript {
    responses: IndexMap<String, String>,
}

impl TerminalScript {
    /// `None` when there is nothing to play. Repeated commands keep their
    /// first position and the last response given for them.
    pub fn new(entries: Vec<ScriptEntry>) -> Option<Self> {
        let mut responses = IndexMap::new();
        for entry in entries {
            responses.insert(entry.command, entry.response);
        }
        if responses.is_empty() {
            None
        } else {
            Some(Self { responses })
        }
    }

    /// Script from the config, or the built-in one when none is configured
    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.terminal.clone()).unwrap_or_else(Self::builtin)
    }

    pub fn builtin() -> Self {
        let responses = BUILTIN_SCRIPT
            .iter()
            .map(|(command, response)| (command.to_string(), response.to_string()))
            .collect();
        Self { responses }
    }

    pub(crate) fn len(&self) -> usize {
        self.responses.len()
    }

    /// Command at `index`, wrapping around
    pub fn command(&self, index: usize) -> &str {
        self.responses
            .get_index(index % self.len())
            .map(|(command, _)| command.as_str())
            .unwrap_or_default()
    }

    /// Canned output for a command; unknown commands print nothing
    pub fn response_for(&self, command: &str) -> &str {
        self.responses
            .get(command)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

impl Default for TerminalScript {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Delays of the animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Shortest delay between two typed characters
    pub keystroke_min: Duration,
    /// Random extra per keystroke, drawn from `[0, keystroke_jitter)`
    pub keystroke_jitter: Duration,
    /// Pause between the last keystroke and the response
    pub response_pause: Duration,
    /// How long the response stays before the next command
    pub hold: Duration,
    /// Cursor blink half-period
    pub blink: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            keystroke_min: Duration::from_millis(50),
            keystroke_jitter: Duration::from_millis(50),
            response_pause: Duration::from_millis(500),
            hold: Duration::from_millis(2000),
            blink: Duration::from_millis(500),
        }
    }
}

/// Shell prompt shown before the typed command, e.g. `juan@dev:~$ `
pub fn prompt_for(author: &str) -> String {
    let user = author
        .split_whitespace()
        .next()
        .map(|u| u.to_lowercase())
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| "guest".to_string());
    format!("{}@dev:~$ ", user)
}

const BUILTIN_SCRIPT: &[(&str, &str)] = &[
    ("aws --version", "aws-cli/2.15.0 Python/3.11.6"),
    (
        "kubectl get pods",
        "NAME                     READY   STATUS    RESTARTS   AGE\n\
         api-deployment-abc123    2/2     Running   0          2d\n\
         worker-deployment-def456 3/3     Running   0          1d",
    ),
    (
        "terraform plan",
        "Plan: 12 to add, 3 to change, 0 to destroy.\n\n\
         Changes to Outputs:\n  + cluster_endpoint = (known after apply)",
    ),
    (
        "docker ps",
        "CONTAINER ID   IMAGE           COMMAND                  STATUS\n\
         abc123def456   nginx:latest    \"/docker-entrypoint…\"   Up 2 hours\n\
         def456ghi789   redis:alpine    \"docker-entrypoint.s…\"   Up 1 hour",
    ),
    (
        "helm list",
        "NAME            NAMESPACE       REVISION        UPDATED                 STATUS          CHART\n\
         api-service     production      3               2024-01-15 10:30:00     deployed        api-chart-1.2.0",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_script() {
        let script = TerminalScript::builtin();
        assert_eq!(script.len(), 5);
        assert_eq!(script.command(0), "aws --version");
        assert_eq!(script.command(5), "aws --version");
        assert_eq!(
            script.response_for("aws --version"),
            "aws-cli/2.15.0 Python/3.11.6"
        );
        assert!(script
            .response_for("kubectl get pods")
            .starts_with("NAME                     READY"));
        assert_eq!(script.response_for("rm -rf /"), "");
    }

    #[test]
    fn test_empty_script_is_rejected() {
        assert!(TerminalScript::new(Vec::new()).is_none());
        let config = SiteConfig::default();
        assert_eq!(TerminalScript::from_config(&config).len(), 5);
    }

    #[test]
    fn test_duplicate_commands_keep_order() {
        let entry = |c: &str, r: &str| ScriptEntry {
            command: c.into(),
            response: r.into(),
        };
        let script = TerminalScript::new(vec![
            entry("ls", "a"),
            entry("pwd", "/"),
            entry("ls", "b"),
        ])
        .unwrap();
        assert_eq!(script.len(), 2);
        assert_eq!(script.command(0), "ls");
        assert_eq!(script.command(1), "pwd");
        assert_eq!(script.response_for("ls"), "b");
    }

    #[test]
    fn test_prompt_for() {
        assert_eq!(prompt_for("Juan Rodriguez Monti"), "juan@dev:~$ ");
        assert_eq!(prompt_for(""), "guest@dev:~$ ");
    }
}
