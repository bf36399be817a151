//! NeuroLink - Main CLI Entry Point

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use neurolink::cli::{Args, Commands, Verbosity};
use neurolink::config::Config;
use neurolink::gateway::{GatewayClient, LocalBackend, INTERRUPTION_NOTICE};
use neurolink::knowledge::KnowledgeBase;
use neurolink::rag::context::GroundingContext;
use neurolink::rag::engine::RetrievalEngine;
use neurolink::repl::Repl;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(message) = args.validate() {
        eprintln!("{} {}", "error:".red().bold(), message);
        std::process::exit(1);
    }

    let mut config = Config::load()?;
    if let Some(url) = &args.gateway_url {
        config.gateway.url = url.clone();
    }
    if let Some(agent) = &args.agent {
        config.gateway.agent = agent.clone();
    }

    let knowledge = match &args.corpus {
        Some(path) => KnowledgeBase::load(path)?,
        None => KnowledgeBase::builtin(),
    };

    match &args.command {
        Some(Commands::Start) => {
            let mut repl = Repl::new(&config, knowledge, !args.no_rag)?;
            repl.run().await
        }
        Some(Commands::Config) => {
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        Some(Commands::Knowledge) => {
            for doc in &knowledge.documents {
                println!("{} {}", doc.id.cyan(), doc.title.bold());
                if args.verbosity() == Verbosity::Verbose {
                    println!("  {}", doc.content.dimmed());
                    println!("  tags: {}", doc.tags.join(", ").dimmed());
                }
            }
            Ok(())
        }
        None => {
            let query = args.query.clone().unwrap_or_default();
            if query.trim().is_empty() {
                eprintln!(
                    "{} provide a QUERY or run 'neurolink start'",
                    "error:".red().bold()
                );
                std::process::exit(1);
            }
            ask_once(&config, &knowledge, &query, &args).await
        }
    }
}

/// One-shot ask: retrieve, call the gateway, print the reply
async fn ask_once(
    config: &Config,
    knowledge: &KnowledgeBase,
    query: &str,
    args: &Args,
) -> Result<()> {
    let engine = RetrievalEngine::with_params(config.retrieval.clone());
    let matches = if args.no_rag {
        Vec::new()
    } else {
        engine.retrieve(query, &knowledge.documents)
    };
    let grounding = GroundingContext::from_matches(&matches);

    if args.verbosity() != Verbosity::Quiet {
        for m in &matches {
            println!("{} {} ({:.2})", "match:".cyan(), m.document.title, m.score);
            for line in &m.highlights {
                println!("  {}", line.dimmed());
            }
        }
    }

    let gateway = GatewayClient::new(&config.gateway)?;
    let reply = match gateway.chat(query, &grounding, &config.gateway.agent).await {
        Ok(reply) => reply.reply,
        Err(err) => {
            if args.verbosity() != Verbosity::Quiet {
                eprintln!("{} {} ({})", "warn:".yellow(), INTERRUPTION_NOTICE, err);
            }
            LocalBackend.reply(query, &grounding).reply
        }
    };

    println!("{}", reply);
    Ok(())
}
