//! Chat command - interactive REPL mode.

use anyhow::{Result, anyhow};
use clap::Args;
use ragflow_client::ListChatsQuery;

use super::Context;
use super::repl::Repl;

/// Arguments for the chat command.
#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Chat assistant ID
    pub chat: String,

    /// Resume an existing session
    #[arg(short, long)]
    pub session: Option<String>,
}

/// Run the chat command (REPL).
pub async fn run(args: ChatArgs, ctx: &Context) -> Result<()> {
    // Unknown ids fail here, before the prompt opens
    let query = ListChatsQuery {
        id: Some(args.chat.clone()),
        ..Default::default()
    };
    let chat = ctx
        .client
        .chats()
        .list(query)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("chat assistant '{}' not found", args.chat))?;

    let mut repl = Repl::new(
        ctx.client.clone(),
        chat.id,
        chat.name,
        args.session,
        ctx.verbose,
    )?;
    repl.run().await
}
