//! Sessions command - conversation threads under a chat assistant.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::Style;
use ragflow_client::ListSessionsQuery;

use super::{Context, format_time, print_heading};

/// Arguments for the sessions command.
#[derive(Args, Debug)]
pub struct SessionsArgs {
    #[command(subcommand)]
    pub command: SessionsCommand,
}

#[derive(Subcommand, Debug)]
pub enum SessionsCommand {
    /// Open a new session
    Create {
        /// Chat ID
        chat: String,

        /// Session name
        #[arg(long, default_value = "New session")]
        name: String,
    },

    /// List sessions of a chat assistant
    List {
        /// Chat ID
        chat: String,

        /// Only sessions with this exact name
        #[arg(long)]
        name: Option<String>,

        /// Page number (1-based)
        #[arg(long)]
        page: Option<u32>,

        /// Items per page
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Rename a session
    Rename {
        /// Chat ID
        chat: String,

        /// Session ID
        session: String,

        /// New name
        name: String,
    },

    /// Delete sessions
    Delete {
        /// Chat ID
        chat: String,

        /// Session IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

/// Run the sessions command.
pub async fn run(args: SessionsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        SessionsCommand::Create { chat, name } => {
            let session = ctx.client.sessions(&chat).create(&name).await?;
            if ctx.json_output {
                ctx.print_json(&session)?;
            } else {
                ctx.print_success(&format!("Session created: {}", session.id))?;
                if let Some(greeting) = session.messages.first() {
                    let dim = Style::new().dim();
                    println!("{}", dim.apply_to(&greeting.content));
                }
            }
        }
        SessionsCommand::List {
            chat,
            name,
            page,
            page_size,
        } => {
            let query = ListSessionsQuery {
                name,
                page,
                page_size: page_size.or(Some(ctx.page_size)),
                ..Default::default()
            };
            let sessions = ctx.client.sessions(&chat).list(query).await?;
            if ctx.json_output {
                ctx.print_json(&sessions)?;
            } else {
                let dim = Style::new().dim();
                print_heading("Sessions");
                if sessions.is_empty() {
                    println!("{}", dim.apply_to("No sessions found"));
                }
                for session in &sessions {
                    println!(
                        "{}  {:<30} {:>4} msgs  {}",
                        dim.apply_to(&session.id),
                        session.name,
                        session.messages.len(),
                        dim.apply_to(format_time(session.update_time.or(session.create_time)))
                    );
                }
            }
        }
        SessionsCommand::Rename {
            chat,
            session,
            name,
        } => {
            ctx.client.sessions(&chat).update(&session, &name).await?;
            ctx.print_success(&format!("Session {} renamed to \"{}\"", session, name))?;
        }
        SessionsCommand::Delete { chat, ids } => {
            ctx.client.sessions(&chat).delete(&ids).await?;
            ctx.print_success(&format!("Deleted {} session(s)", ids.len()))?;
        }
    }

    Ok(())
}
