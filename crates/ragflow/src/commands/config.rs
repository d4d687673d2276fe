//! Config command - connection context management.

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Args, Subcommand};
use console::Style;

use ragflow_config::{AuthConfig, Context as ClientContext};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show configuration file path
    Path,

    /// Show the current context name
    CurrentContext,

    /// List available contexts
    GetContexts,

    /// Switch to a different context
    UseContext {
        /// Context name to switch to
        name: String,
    },

    /// Create or update a context
    SetContext {
        /// Context name
        name: String,

        /// Server URL (e.g., http://localhost:9380)
        #[arg(long)]
        server: Option<String>,

        /// File holding the API key
        #[arg(long, conflicts_with = "api_key_env")]
        api_key_file: Option<PathBuf>,

        /// Environment variable holding the API key
        #[arg(long)]
        api_key_env: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Delete a context
    DeleteContext {
        /// Context name to delete
        name: String,
    },
}

/// Run the config command.
pub async fn run(args: ConfigArgs, json_output: bool) -> Result<()> {
    match args.command {
        ConfigCommand::Path => cmd_path().await,
        ConfigCommand::CurrentContext => cmd_current_context().await,
        ConfigCommand::GetContexts => cmd_get_contexts(json_output).await,
        ConfigCommand::UseContext { name } => cmd_use_context(&name).await,
        ConfigCommand::SetContext {
            name,
            server,
            api_key_file,
            api_key_env,
            timeout,
        } => {
            let auth = match (api_key_file, api_key_env) {
                (Some(path), _) => Some(AuthConfig::api_key_file(path)),
                (None, Some(var)) => Some(AuthConfig::api_key_env(var)),
                (None, None) => None,
            };
            cmd_set_context(&name, server, auth, timeout).await
        }
        ConfigCommand::DeleteContext { name } => cmd_delete_context(&name).await,
    }
}

async fn cmd_path() -> Result<()> {
    let path = ragflow_config::client_config_path()
        .ok_or_else(|| anyhow!("Could not determine config directory"))?;
    println!("{}", path.display());
    Ok(())
}

async fn cmd_current_context() -> Result<()> {
    let config = ragflow_config::load_client_config()?;

    match &config.current_context {
        Some(name) => {
            println!("{}", name);
        }
        None => {
            println!("No current context set. Use 'ragflow config use-context <name>' to set one.");
        }
    }

    Ok(())
}

async fn cmd_get_contexts(json_output: bool) -> Result<()> {
    let config = ragflow_config::load_client_config()?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&config.contexts)?);
        return Ok(());
    }

    if config.contexts.is_empty() {
        println!("No contexts configured.");
        println!();
        println!("Create one with:");
        println!(
            "  ragflow config set-context local --server=http://localhost:9380 --api-key-env=RAGFLOW_API_KEY"
        );
        return Ok(());
    }

    let current = config.current_context.as_deref();
    let dim = Style::new().dim();

    println!("CURRENT   NAME            SERVER                          AUTH");
    for ctx in &config.contexts {
        let marker = if current == Some(ctx.name.as_str()) {
            "*"
        } else {
            " "
        };
        let auth = match &ctx.auth {
            Some(AuthConfig::ApiKey {
                key_file: Some(path),
                ..
            }) => format!("file:{}", path.display()),
            Some(AuthConfig::ApiKey {
                key_env: Some(var),
                ..
            }) => format!("env:{}", var),
            _ => "none".to_string(),
        };
        println!(
            "{}         {:<15} {:<31} {}",
            marker,
            ctx.name,
            ctx.server,
            dim.apply_to(auth)
        );
    }

    Ok(())
}

async fn cmd_use_context(name: &str) -> Result<()> {
    let mut config = ragflow_config::load_client_config()?;

    config.use_context(name)?;
    ragflow_config::save_client_config(&config)?;

    println!("Switched to context \"{}\".", name);

    Ok(())
}

async fn cmd_set_context(
    name: &str,
    server: Option<String>,
    auth: Option<AuthConfig>,
    timeout: Option<u64>,
) -> Result<()> {
    let mut config = ragflow_config::load_client_config()?;

    if let Some(ctx) = config.get_context_mut(name) {
        if let Some(url) = server {
            ctx.server = url;
        }
        if auth.is_some() {
            ctx.auth = auth;
        }
        if let Some(t) = timeout {
            ctx.timeout = Some(t);
        }
        println!("Context \"{}\" modified.", name);
    } else {
        // Creating a new context requires a server
        let server_url =
            server.ok_or_else(|| anyhow!("--server is required when creating a new context"))?;

        let mut ctx = ClientContext::new(name, server_url);
        if let Some(auth) = auth {
            ctx = ctx.with_auth(auth);
        }
        if let Some(t) = timeout {
            ctx = ctx.with_timeout(t);
        }

        config.set_context(ctx);
        println!("Context \"{}\" created.", name);
    }

    // The first context becomes current
    if config.current_context.is_none() && config.contexts.len() == 1 {
        config.current_context = Some(name.to_string());
        println!("Context \"{}\" set as current context.", name);
    }

    ragflow_config::save_client_config(&config)?;

    Ok(())
}

async fn cmd_delete_context(name: &str) -> Result<()> {
    let mut config = ragflow_config::load_client_config()?;

    match config.remove_context(name) {
        Some(_) => {
            ragflow_config::save_client_config(&config)?;
            println!("Context \"{}\" deleted.", name);
            if config.current_context.is_none() {
                println!(
                    "Note: No current context. Use 'ragflow config use-context <name>' to set one."
                );
            }
        }
        None => {
            return Err(anyhow!("context \"{}\" not found", name));
        }
    }

    Ok(())
}
