//! Agents command - list agents and ask them questions.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::Style;
use ragflow_client::{CompletionRequest, ListAgentsQuery};

use super::{Context, format_time, print_completion, print_heading, stream_answer, truncate};

/// Arguments for the agents command.
#[derive(Args, Debug)]
pub struct AgentsArgs {
    #[command(subcommand)]
    pub command: AgentsCommand,
}

#[derive(Subcommand, Debug)]
pub enum AgentsCommand {
    /// List agents
    List {
        /// Only agents with this exact title
        #[arg(long)]
        title: Option<String>,

        /// Page number (1-based)
        #[arg(long)]
        page: Option<u32>,

        /// Items per page
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Ask an agent a one-shot question
    Ask {
        /// Agent ID
        agent: String,

        /// The question to send
        question: String,

        /// Continue an existing agent session
        #[arg(short, long)]
        session: Option<String>,

        /// Wait for the full answer instead of streaming it
        #[arg(long)]
        no_stream: bool,
    },
}

/// Run the agents command.
pub async fn run(args: AgentsArgs, ctx: &Context) -> Result<()> {
    let api = ctx.client.agents();

    match args.command {
        AgentsCommand::List {
            title,
            page,
            page_size,
        } => {
            let query = ListAgentsQuery {
                title,
                page,
                page_size: page_size.or(Some(ctx.page_size)),
                ..Default::default()
            };
            let agents = api.list(query).await?;
            if ctx.json_output {
                return ctx.print_json(&agents);
            }

            let dim = Style::new().dim();
            print_heading("Agents");
            if agents.is_empty() {
                println!("{}", dim.apply_to("No agents found"));
            }
            for agent in &agents {
                println!(
                    "{}  {:<24} {}  {}",
                    dim.apply_to(&agent.id),
                    agent.title,
                    truncate(agent.description.as_deref().unwrap_or(""), 40),
                    dim.apply_to(format_time(agent.update_time))
                );
            }
        }
        AgentsCommand::Ask {
            agent,
            question,
            session,
            no_stream,
        } => {
            let mut request = CompletionRequest::new(question);
            request.session_id = session;

            if no_stream {
                let completion = api.complete(&agent, request).await?;
                print_completion(&completion, ctx)?;
            } else {
                let stream = api.stream(&agent, request).await?;
                let completion = stream_answer(stream, ctx).await?;
                if ctx.json_output {
                    ctx.print_json(&completion)?;
                }
            }
        }
    }

    Ok(())
}
