//! Chats command - chat assistant management and one-shot questions.

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use console::Style;
use ragflow_client::{
    CompletionRequest, CreateChatRequest, ListChatsQuery, LlmSettings, PromptConfig,
    UpdateChatRequest,
};

use super::{Context, format_time, print_completion, print_heading, stream_answer};

/// Arguments for the chats command.
#[derive(Args, Debug)]
pub struct ChatsArgs {
    #[command(subcommand)]
    pub command: ChatsCommand,
}

/// LLM and prompt settings shared by create and update.
#[derive(Args, Debug, Default)]
pub struct ChatSettings {
    /// Chat model name
    #[arg(long)]
    pub model: Option<String>,

    /// Sampling temperature
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Nucleus sampling threshold
    #[arg(long)]
    pub top_p: Option<f64>,

    /// Maximum tokens per answer
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// System prompt
    #[arg(long)]
    pub prompt: Option<String>,

    /// Greeting shown when a session opens
    #[arg(long)]
    pub opener: Option<String>,

    /// Minimum similarity for retrieved chunks
    #[arg(long)]
    pub similarity_threshold: Option<f64>,

    /// Number of chunks fed to the model
    #[arg(long)]
    pub top_n: Option<u32>,
}

impl ChatSettings {
    fn llm(&self) -> Option<LlmSettings> {
        let llm = LlmSettings {
            model_name: self.model.clone(),
            temperature: self.temperature,
            top_p: self.top_p,
            max_tokens: self.max_tokens,
            ..Default::default()
        };
        (llm != LlmSettings::default()).then_some(llm)
    }

    fn prompt(&self) -> Option<PromptConfig> {
        let prompt = PromptConfig {
            prompt: self.prompt.clone(),
            opener: self.opener.clone(),
            similarity_threshold: self.similarity_threshold,
            top_n: self.top_n,
            ..Default::default()
        };
        (prompt != PromptConfig::default()).then_some(prompt)
    }
}

#[derive(Subcommand, Debug)]
pub enum ChatsCommand {
    /// Create a chat assistant
    Create {
        /// Assistant name
        name: String,

        /// Dataset the assistant answers from (repeatable)
        #[arg(short, long = "dataset")]
        datasets: Vec<String>,

        /// Description
        #[arg(long)]
        description: Option<String>,

        #[command(flatten)]
        settings: ChatSettings,
    },

    /// List chat assistants
    List {
        /// Only assistants with this exact name
        #[arg(long)]
        name: Option<String>,

        /// Page number (1-based)
        #[arg(long)]
        page: Option<u32>,

        /// Items per page
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Update a chat assistant
    Update {
        /// Chat ID
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// Replace the datasets (repeatable)
        #[arg(short, long = "dataset")]
        datasets: Vec<String>,

        #[command(flatten)]
        settings: ChatSettings,
    },

    /// Delete chat assistants
    Delete {
        /// Chat IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Ask a chat assistant a one-shot question
    Ask {
        /// Chat ID
        chat: String,

        /// The question to send
        question: String,

        /// Continue an existing session
        #[arg(short, long)]
        session: Option<String>,

        /// Wait for the full answer instead of streaming it
        #[arg(long)]
        no_stream: bool,
    },
}

/// Run the chats command.
pub async fn run(args: ChatsArgs, ctx: &Context) -> Result<()> {
    let api = ctx.client.chats();

    match args.command {
        ChatsCommand::Create {
            name,
            datasets,
            description,
            settings,
        } => {
            let request = CreateChatRequest {
                description,
                llm: settings.llm(),
                prompt: settings.prompt(),
                ..CreateChatRequest::new(name, datasets)
            };
            let chat = api.create(request).await?;
            if ctx.json_output {
                ctx.print_json(&chat)?;
            } else {
                let dim = Style::new().dim();
                let green = Style::new().green();
                println!(
                    "{} Chat created: {} {}",
                    green.apply_to("✓"),
                    chat.name,
                    dim.apply_to(&chat.id)
                );
            }
        }
        ChatsCommand::List {
            name,
            page,
            page_size,
        } => {
            let query = ListChatsQuery {
                name,
                page,
                page_size: page_size.or(Some(ctx.page_size)),
                ..Default::default()
            };
            let chats = api.list(query).await?;
            if ctx.json_output {
                ctx.print_json(&chats)?;
            } else {
                let dim = Style::new().dim();
                print_heading("Chat assistants");
                if chats.is_empty() {
                    println!("{}", dim.apply_to("No chat assistants found"));
                }
                for chat in &chats {
                    let model = chat
                        .llm
                        .as_ref()
                        .and_then(|l| l.model_name.as_deref())
                        .unwrap_or("-");
                    println!(
                        "{}  {:<24} {:<20} {:>2} dataset(s)  {}",
                        dim.apply_to(&chat.id),
                        chat.name,
                        model,
                        chat.dataset_ids.len(),
                        dim.apply_to(format_time(chat.create_time))
                    );
                }
            }
        }
        ChatsCommand::Update {
            id,
            name,
            datasets,
            settings,
        } => {
            let request = UpdateChatRequest {
                name,
                dataset_ids: (!datasets.is_empty()).then_some(datasets),
                llm: settings.llm(),
                prompt: settings.prompt(),
                ..Default::default()
            };
            if request.name.is_none()
                && request.dataset_ids.is_none()
                && request.llm.is_none()
                && request.prompt.is_none()
            {
                bail!("nothing to update; pass at least one field (see --help)");
            }
            api.update(&id, request).await?;
            ctx.print_success(&format!("Chat {} updated", id))?;
        }
        ChatsCommand::Delete { ids } => {
            api.delete(&ids).await?;
            ctx.print_success(&format!("Deleted {} chat(s)", ids.len()))?;
        }
        ChatsCommand::Ask {
            chat,
            question,
            session,
            no_stream,
        } => {
            let mut request = CompletionRequest::new(question);
            request.session_id = session;

            if no_stream {
                let completion = api.complete(&chat, request).await?;
                print_completion(&completion, ctx)?;
            } else {
                let stream = api.stream(&chat, request).await?;
                let completion = stream_answer(stream, ctx).await?;
                if ctx.json_output {
                    ctx.print_json(&completion)?;
                } else if ctx.verbose
                    && let Some(id) = &completion.session_id
                {
                    let dim = Style::new().dim();
                    println!("{}", dim.apply_to(format!("Session: {}", id)));
                }
            }
        }
    }

    Ok(())
}
