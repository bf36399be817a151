//! Interactive chat loop
//!
//! Owns the session state for the lifetime of the process. Every submitted
//! prompt runs retrieval first, then carries its own grounding snippets
//! into the gateway request, so a reply is always grounded by the query
//! that produced it.

use anyhow::Result;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;
use crate::gateway::{ChatBackend, GatewayClient, LocalBackend, INTERRUPTION_NOTICE};
use crate::knowledge::KnowledgeBase;
use crate::rag::context::GroundingContext;
use crate::rag::engine::{RagMatch, RetrievalEngine};
use crate::session::{persistence, ChatMessage, Role, SessionState, AUTO_MEMORY_THRESHOLD};

/// Help text for slash commands
const HELP_TEXT: &str =
    "Commands: /help, /memory <note>, /rag, /quality <ultra|balanced|lite>, /clear, /exit";

/// Result of applying a slash command to the session
#[derive(Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Help,
    MemoryAdded(String),
    MemoryMissingNote,
    RagToggled(bool),
    QualitySet(&'static str),
    QualityInvalid,
    Cleared,
    Exit,
    Unknown(String),
}

/// Apply a slash command to the session
///
/// Returns None when the input is not a command at all.
pub fn apply_command(session: &mut SessionState, input: &str) -> Option<CommandOutcome> {
    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input.splitn(2, ' ');
    let command = parts.next().unwrap_or("");
    let rest = parts.next().unwrap_or("").trim();

    let outcome = match command {
        "/help" => CommandOutcome::Help,
        "/memory" => {
            if rest.is_empty() {
                CommandOutcome::MemoryMissingNote
            } else {
                let label = format!("Session note {}", session.memory_len() + 1);
                session.add_memory(label.clone(), rest, true);
                CommandOutcome::MemoryAdded(label)
            }
        }
        "/rag" => CommandOutcome::RagToggled(session.toggle_rag()),
        "/quality" => match crate::session::QualityMode::parse(rest) {
            Some(mode) => {
                session.quality_mode = mode;
                CommandOutcome::QualitySet(mode.as_str())
            }
            None => CommandOutcome::QualityInvalid,
        },
        "/clear" => {
            session.clear_session();
            CommandOutcome::Cleared
        }
        "/exit" | "/quit" => CommandOutcome::Exit,
        other => CommandOutcome::Unknown(other.to_string()),
    };

    Some(outcome)
}

/// One completed chat turn
pub struct TurnResult {
    pub reply: String,
    pub matches: Vec<RagMatch>,
    /// True when the gateway failed and the local backend answered
    pub used_fallback: bool,
}

/// Interactive chat session
pub struct Repl {
    session: SessionState,
    knowledge: KnowledgeBase,
    engine: RetrievalEngine,
    gateway: GatewayClient,
    local: LocalBackend,
    agent: String,
    session_path: PathBuf,
}

impl Repl {
    /// Create a REPL from configuration, restoring any persisted session
    pub fn new(config: &Config, knowledge: KnowledgeBase, rag_enabled: bool) -> Result<Self> {
        let session_path = persistence::session_path()?;
        let mut session = persistence::load(&session_path).unwrap_or_default();
        session.rag_enabled = rag_enabled;

        Ok(Repl {
            session,
            knowledge,
            engine: RetrievalEngine::with_params(config.retrieval.clone()),
            gateway: GatewayClient::new(&config.gateway)?,
            local: LocalBackend,
            agent: config.gateway.agent.clone(),
            session_path,
        })
    }

    /// Execute one chat turn for a non-command prompt
    ///
    /// Retrieval runs synchronously before the request is built; the
    /// grounding snippets attached to the outbound call always belong to
    /// this prompt.
    pub async fn run_turn(&mut self, prompt: &str) -> TurnResult {
        self.session
            .add_message(ChatMessage::new(Role::User, prompt));

        let matches = if self.session.rag_enabled {
            self.engine.retrieve(prompt, &self.knowledge.documents)
        } else {
            Vec::new()
        };
        let grounding = GroundingContext::from_matches(&matches);

        let (reply, used_fallback) =
            match self.gateway.chat(prompt, &grounding, &self.agent).await {
                Ok(reply) => (reply.reply, false),
                Err(_) => (self.local.reply(prompt, &grounding).reply, true),
            };

        self.session
            .add_message(ChatMessage::new(Role::Assistant, reply.clone()));

        if prompt.len() > AUTO_MEMORY_THRESHOLD {
            let label = format!("User intent {}", self.session.memory_len() + 1);
            self.session.add_memory(label, prompt, false);
        }

        TurnResult {
            reply,
            matches,
            used_fallback,
        }
    }

    /// Run the interactive loop until exit
    pub async fn run(&mut self) -> Result<()> {
        println!("{}", "NeuroLink terminal session".cyan().bold());
        println!("{}", HELP_TEXT.dimmed());

        let mut editor = DefaultEditor::new()?;

        loop {
            self.session.refresh_metrics();
            let status = format!(
                "[latency {}ms | mem {}MB | rag {}]",
                self.session.metrics.latency_ms,
                self.session.metrics.memory_mb,
                if self.session.rag_enabled { "on" } else { "off" },
            );
            println!("{}", status.dimmed());

            let line = match editor.readline("neurolink> ") {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            };

            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            editor.add_history_entry(input)?;

            if let Some(outcome) = apply_command(&mut self.session, input) {
                match outcome {
                    CommandOutcome::Exit => break,
                    other => self.show_outcome(&other),
                }
                continue;
            }

            let spinner = self.start_spinner();
            let turn = self.run_turn(input).await;
            spinner.finish_and_clear();

            self.show_matches(&turn.matches);
            if turn.used_fallback {
                println!("{}", INTERRUPTION_NOTICE.yellow());
            }
            println!("{} {}", "assistant:".blue().bold(), turn.reply);
        }

        persistence::save(&self.session, &self.session_path)?;
        println!("{}", "Session saved.".dimmed());

        Ok(())
    }

    fn start_spinner(&self) -> ProgressBar {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("linking...");
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    }

    fn show_outcome(&self, outcome: &CommandOutcome) {
        match outcome {
            CommandOutcome::Help => println!("{}", HELP_TEXT),
            CommandOutcome::MemoryAdded(label) => {
                println!("{} {}", "pinned:".green(), label)
            }
            CommandOutcome::MemoryMissingNote => {
                println!("{}", "Usage: /memory <note>".yellow())
            }
            CommandOutcome::RagToggled(enabled) => {
                println!("RAG {}", if *enabled { "on".green() } else { "off".red() })
            }
            CommandOutcome::QualitySet(mode) => println!("Quality mode: {}", mode),
            CommandOutcome::QualityInvalid => {
                println!("{}", "Usage: /quality <ultra|balanced|lite>".yellow())
            }
            CommandOutcome::Cleared => println!("{}", "Session cleared.".dimmed()),
            CommandOutcome::Unknown(cmd) => {
                println!("{} {}", "Unknown command:".yellow(), cmd)
            }
            CommandOutcome::Exit => {}
        }
    }

    fn show_matches(&self, matches: &[RagMatch]) {
        for m in matches {
            println!(
                "{} {} ({:.2})",
                "match:".cyan(),
                m.document.title,
                m.score
            );
            for line in &m.highlights {
                println!("  {}", line.dimmed());
            }
        }
    }

    /// Borrow the session state (read-only)
    pub fn session(&self) -> &SessionState {
        &self.session
    }
}
