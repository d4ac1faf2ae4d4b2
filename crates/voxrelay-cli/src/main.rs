//! voxrelay CLI - voice agents from the terminal
//!
//! Manage agents, chat with them over text, and place realtime voice calls
//! through a voxrelay server.

mod api;
mod config;
mod media;
mod peer;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{Input, Password};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use voxrelay::CallClient;

use api::{CreateAgentRequest, UpdateAgentRequest, VoxrelayClient};
use config::Config;
use media::{PromptMicrophone, TerminalAudio};
use peer::{PeerEvent, WebRtcPeerConnector};

const DEFAULT_ICE_SERVER: &str = "stun:stun.l.google.com:19302";

#[derive(Parser)]
#[command(name = "voxrelay")]
#[command(about = "voxrelay CLI - voice agents, text chat and realtime calls", long_about = None)]
#[command(version)]
struct Cli {
    /// Log progress (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store API key (and optionally the server URL)
    Login {
        /// API key (will prompt if not provided)
        #[arg(short, long)]
        key: Option<String>,
        /// Server base URL
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Manage agents
    Agent {
        #[command(subcommand)]
        action: AgentAction,
    },

    /// Text chat with an agent (interactive when no message is given)
    Chat {
        /// Agent ID (defaults to the configured agent)
        #[arg(short, long)]
        agent: Option<String>,
        /// Continue an existing conversation
        #[arg(short, long)]
        session: Option<String>,
        /// Single message to send
        message: Option<String>,
    },

    /// Show a stored conversation
    History {
        /// Conversation session ID
        session_id: String,
    },

    /// Realtime voice call with an agent
    Call {
        /// Agent ID (defaults to the configured agent)
        #[arg(short, long)]
        agent: Option<String>,
        /// Grant microphone access without prompting
        #[arg(short, long)]
        yes: bool,
        /// STUN/TURN server URL (repeatable)
        #[arg(long = "ice-server")]
        ice_servers: Vec<String>,
    },

    /// Show current configuration
    Config,
}

#[derive(Subcommand)]
enum AgentAction {
    /// List all agents
    List,
    /// Show one agent
    Show {
        id: String,
    },
    /// Create an agent
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// System prompt (will prompt if not provided)
        #[arg(long)]
        prompt: Option<String>,
        /// Conversation language (server default: hindi)
        #[arg(long)]
        language: Option<String>,
    },
    /// Update fields of an agent
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        prompt: Option<String>,
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete an agent
    Delete {
        id: String,
    },
    /// Set the default agent for chat and call
    Use {
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Login { key, url } => cmd_login(key, url).await,
        Commands::Agent { action } => cmd_agent(action).await,
        Commands::Chat {
            agent,
            session,
            message,
        } => cmd_chat(agent, session, message).await,
        Commands::History { session_id } => cmd_history(session_id).await,
        Commands::Call {
            agent,
            yes,
            ice_servers,
        } => cmd_call(agent, yes, ice_servers).await,
        Commands::Config => cmd_config(),
    }
}

fn client(config: &Config) -> VoxrelayClient {
    VoxrelayClient::new(&config.base_url, config.api_key.as_deref())
}

fn require_agent(config: &Config, explicit: Option<&str>) -> Result<String> {
    config
        .resolve_agent(explicit)
        .context("No agent selected. Use --agent <ID> or 'voxrelay agent use <ID>'.")
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_login(key: Option<String>, url: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    if let Some(url) = url {
        config.base_url = url.trim_end_matches('/').to_string();
    }

    let api_key = match key {
        Some(k) => k,
        None => Password::new()
            .with_prompt("API Key")
            .interact()
            .context("Failed to read API key")?,
    };

    let client = VoxrelayClient::new(&config.base_url, Some(&api_key));
    print!("Testing connection... ");

    match client.verify_key().await {
        Ok(()) => println!("{}", "OK".green()),
        Err(e) => {
            println!("{}", "Failed".red());
            bail!("Could not authenticate with {}: {}", config.base_url, e);
        }
    }

    config.set_api_key(api_key);
    config.save()?;

    println!("{} API key saved to {:?}", "✓".green(), Config::config_path()?);

    if config.default_agent.is_none() {
        println!("\n{}", "Tip: pick a default agent:".yellow());
        println!("  voxrelay agent list");
        println!("  voxrelay agent use <AGENT_ID>");
    }

    Ok(())
}

async fn cmd_agent(action: AgentAction) -> Result<()> {
    let mut config = Config::load()?;
    let client = client(&config);

    match action {
        AgentAction::List => {
            let agents = client.list_agents().await?;

            if agents.is_empty() {
                println!("No agents found.");
                return Ok(());
            }

            println!("{}", "Agents:".bold());
            for agent in agents {
                let is_default = config.default_agent.as_deref() == Some(agent.id.as_str());
                let default_marker = if is_default {
                    " (default)".green().to_string()
                } else {
                    String::new()
                };
                let status = if agent.is_active {
                    "active".green()
                } else {
                    "inactive".red()
                };

                println!(
                    "  {} {} [{}] {}{}",
                    agent.id.dimmed(),
                    agent.name.cyan().bold(),
                    agent.language,
                    status,
                    default_marker
                );
            }
        }

        AgentAction::Show { id } => {
            let agent = client.get_agent(&id).await?;
            println!("{} {}", agent.name.cyan().bold(), agent.id.dimmed());
            println!("  Language: {}", agent.language);
            println!(
                "  Active: {}",
                if agent.is_active { "yes".green() } else { "no".red() }
            );
            if !agent.description.is_empty() {
                println!("  Description: {}", agent.description);
            }
            println!("\n{}", "System prompt:".bold());
            println!("{}", agent.system_prompt);
        }

        AgentAction::Create {
            name,
            description,
            prompt,
            language,
        } => {
            let system_prompt = match prompt {
                Some(p) => p,
                None => Input::new()
                    .with_prompt("System prompt")
                    .interact_text()
                    .context("Failed to read input")?,
            };

            let agent = client
                .create_agent(&CreateAgentRequest {
                    name,
                    description,
                    system_prompt,
                    language,
                })
                .await?;

            println!(
                "{} Agent '{}' created ({})",
                "✓".green(),
                agent.name.cyan(),
                agent.id.dimmed()
            );
        }

        AgentAction::Update {
            id,
            name,
            description,
            prompt,
            language,
            active,
        } => {
            let request = UpdateAgentRequest {
                name,
                description,
                system_prompt: prompt,
                language,
                is_active: active,
            };
            let agent = client.update_agent(&id, &request).await?;
            println!("{} Agent '{}' updated", "✓".green(), agent.name.cyan());
        }

        AgentAction::Delete { id } => {
            client.delete_agent(&id).await?;
            if config.default_agent.as_deref() == Some(id.as_str()) {
                config.default_agent = None;
                config.save()?;
            }
            println!("{} Agent {} deleted", "✓".green(), id.dimmed());
        }

        AgentAction::Use { id } => {
            let agent = client
                .get_agent(&id)
                .await
                .with_context(|| format!("Could not verify agent {}", id))?;
            config.default_agent = Some(agent.id.clone());
            config.save()?;
            println!("{} Default agent set to '{}'", "✓".green(), agent.name.cyan());
        }
    }

    Ok(())
}

async fn cmd_chat(
    agent: Option<String>,
    session: Option<String>,
    message: Option<String>,
) -> Result<()> {
    let config = Config::load()?;
    let agent_id = require_agent(&config, agent.as_deref())?;
    let client = client(&config);

    if let Some(message) = message {
        let reply = client
            .chat(&agent_id, &message, session.as_deref())
            .await?;
        println!("{}", reply.response);
        eprintln!("{} {}", "session:".dimmed(), reply.session_id.dimmed());
        return Ok(());
    }

    println!(
        "{} {} {}",
        "Chatting with".dimmed(),
        agent_id.cyan(),
        "(empty line to quit)".dimmed()
    );

    let mut session_id = session;
    loop {
        let line: String = Input::new()
            .with_prompt("you")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read input")?;

        if line.trim().is_empty() {
            break;
        }

        match client.chat(&agent_id, &line, session_id.as_deref()).await {
            Ok(reply) => {
                println!("{} {}", "agent:".cyan().bold(), reply.response);
                session_id = Some(reply.session_id);
            }
            Err(e) => eprintln!("{} {}", "error:".red(), e),
        }
    }

    if let Some(id) = session_id {
        println!("{} {}", "Session:".dimmed(), id);
    }
    Ok(())
}

async fn cmd_history(session_id: String) -> Result<()> {
    let config = Config::load()?;
    let messages = client(&config).conversation(&session_id).await?;

    if messages.is_empty() {
        println!("No messages for session {}", session_id);
        return Ok(());
    }

    for msg in messages {
        let role = match msg.role.as_str() {
            "user" => msg.role.green(),
            "assistant" => msg.role.cyan(),
            _ => msg.role.dimmed(),
        };
        println!("{} {}", format!("[{}]", role).bold(), msg.content);
    }

    Ok(())
}

async fn cmd_call(agent: Option<String>, yes: bool, ice_servers: Vec<String>) -> Result<()> {
    let config = Config::load()?;
    let agent_id = require_agent(&config, agent.as_deref())?;

    let ice_servers = if ice_servers.is_empty() {
        vec![DEFAULT_ICE_SERVER.to_string()]
    } else {
        ice_servers
    };

    let (peers, mut events) = WebRtcPeerConnector::new(ice_servers);
    let audio = TerminalAudio::new();
    let mut call = CallClient::new(
        client(&config),
        PromptMicrophone::new(yes),
        peers,
        audio.clone(),
    );

    println!("{} {}...", "Calling".dimmed(), agent_id.cyan());
    if let Err(e) = call.start(&agent_id).await {
        println!("{} {}", "✗".red(), call.state().name());
        bail!("Call failed: {}", e);
    }

    println!("{} Connected", "✓".green());
    println!("{}", "  m = mute/unmute, q = hang up".dimmed());

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = stdin.next_line() => {
                match line.context("Failed to read stdin")?.as_deref().map(str::trim) {
                    Some("m") => match call.toggle_mute() {
                        Some(true) => println!("{}", "Muted".yellow()),
                        Some(false) => println!("{}", "Unmuted".green()),
                        None => println!("{}", "No microphone attached".red()),
                    },
                    Some("q") | None => break,
                    Some(_) => {}
                }
            }
            event = events.recv() => {
                match event {
                    Some(PeerEvent::Lost(state)) => {
                        println!("{} Connection {}", "✗".red(), state);
                        break;
                    }
                    Some(PeerEvent::StateChanged(state)) => {
                        tracing::debug!(state = %state, "Peer state");
                    }
                    None => break,
                }
            }
        }
    }

    call.end().await;

    if let Some(stats) = audio.current() {
        println!(
            "{} Call ended ({} audio packets, {} bytes received)",
            "✓".green(),
            stats.packets(),
            stats.bytes()
        );
    } else {
        println!("{} Call ended", "✓".green());
    }

    Ok(())
}

/// Truncate string safely for UTF-8 (by char count, not bytes)
fn truncate_string(s: &str, max_chars: usize) -> String {
    let chars: Vec<char> = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        format!("{}...", chars.into_iter().collect::<String>())
    } else {
        s.to_string()
    }
}

fn cmd_config() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Base URL: {}", config.base_url);
    println!(
        "  API Key: {}",
        match &config.api_key {
            Some(key) => format!("Set ({})", truncate_string(key, 4)).green(),
            None => "Not set".red(),
        }
    );
    println!(
        "  Default Agent: {}",
        config.default_agent.as_deref().unwrap_or("None").cyan()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string_counts_chars() {
        assert_eq!(truncate_string("नमस्ते दुनिया", 3), "नमस...");
        assert_eq!(truncate_string("pizza", 10), "pizza");
    }

    #[test]
    fn test_cli_parses_call_flags() {
        let cli = Cli::try_parse_from([
            "voxrelay",
            "call",
            "--agent",
            "a1",
            "--yes",
            "--ice-server",
            "stun:a",
            "--ice-server",
            "stun:b",
        ])
        .unwrap();

        match cli.command {
            Commands::Call {
                agent,
                yes,
                ice_servers,
            } => {
                assert_eq!(agent.as_deref(), Some("a1"));
                assert!(yes);
                assert_eq!(ice_servers, vec!["stun:a", "stun:b"]);
            }
            _ => panic!("expected call command"),
        }
    }
}
