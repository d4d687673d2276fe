//! Chunks command - inspect and edit the chunks of a parsed document.

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use console::{Style, style};
use ragflow_client::{AddChunkRequest, ListChunksQuery, UpdateChunkRequest};

use super::{Context, print_heading, truncate};

/// Arguments for the chunks command.
#[derive(Args, Debug)]
pub struct ChunksArgs {
    #[command(subcommand)]
    pub command: ChunksCommand,
}

#[derive(Subcommand, Debug)]
pub enum ChunksCommand {
    /// List the chunks of a document
    List {
        /// Dataset ID
        dataset: String,

        /// Document ID
        document: String,

        /// Only chunks containing these keywords
        #[arg(long)]
        keywords: Option<String>,

        /// Page number (1-based)
        #[arg(long)]
        page: Option<u32>,

        /// Items per page
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Add a chunk to a document
    Add {
        /// Dataset ID
        dataset: String,

        /// Document ID
        document: String,

        /// Chunk text
        content: String,

        /// Important keyword (repeatable)
        #[arg(short, long = "keyword")]
        keywords: Vec<String>,

        /// Question this chunk answers (repeatable)
        #[arg(short, long = "question")]
        questions: Vec<String>,
    },

    /// Update a chunk
    Update {
        /// Dataset ID
        dataset: String,

        /// Document ID
        document: String,

        /// Chunk ID
        chunk: String,

        /// New text
        #[arg(long)]
        content: Option<String>,

        /// Replace the important keywords (repeatable)
        #[arg(short, long = "keyword")]
        keywords: Vec<String>,

        /// Enable or disable the chunk for retrieval
        #[arg(long)]
        available: Option<bool>,
    },

    /// Delete chunks
    Delete {
        /// Dataset ID
        dataset: String,

        /// Document ID
        document: String,

        /// Chunk IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

/// Run the chunks command.
pub async fn run(args: ChunksArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ChunksCommand::List {
            dataset,
            document,
            keywords,
            page,
            page_size,
        } => {
            let query = ListChunksQuery {
                keywords,
                page,
                page_size: page_size.or(Some(ctx.page_size)),
                ..Default::default()
            };
            let list = ctx.client.chunks(&dataset, &document).list(query).await?;

            if ctx.json_output {
                return ctx.print_json(&list);
            }

            let dim = Style::new().dim();
            let title = match &list.doc {
                Some(doc) => format!("Chunks of {} ({} total)", doc.name, list.total),
                None => format!("Chunks ({} total)", list.total),
            };
            print_heading(&title);
            if list.chunks.is_empty() {
                println!("{}", dim.apply_to("No chunks found"));
            }
            for chunk in &list.chunks {
                let marker = if chunk.available == Some(false) {
                    style("○").dim()
                } else {
                    style("●").green()
                };
                println!(
                    "{} {} {}",
                    marker,
                    dim.apply_to(&chunk.id),
                    truncate(&chunk.content, 70)
                );
                if !chunk.important_keywords.is_empty() {
                    println!(
                        "    {}",
                        dim.apply_to(format!("keywords: {}", chunk.important_keywords.join(", ")))
                    );
                }
            }
            Ok(())
        }
        ChunksCommand::Add {
            dataset,
            document,
            content,
            keywords,
            questions,
        } => {
            let request = AddChunkRequest {
                questions,
                ..AddChunkRequest::new(content).with_keywords(keywords)
            };
            let chunk = ctx.client.chunks(&dataset, &document).add(request).await?;
            if ctx.json_output {
                ctx.print_json(&chunk)
            } else {
                ctx.print_success(&format!("Chunk added: {}", chunk.id))
            }
        }
        ChunksCommand::Update {
            dataset,
            document,
            chunk,
            content,
            keywords,
            available,
        } => {
            let request = UpdateChunkRequest {
                content,
                important_keywords: (!keywords.is_empty()).then_some(keywords),
                available,
                ..Default::default()
            };
            if request.content.is_none()
                && request.important_keywords.is_none()
                && request.available.is_none()
            {
                bail!("nothing to update; pass --content, --keyword or --available");
            }
            ctx.client
                .chunks(&dataset, &document)
                .update(&chunk, request)
                .await?;
            ctx.print_success(&format!("Chunk {} updated", chunk))
        }
        ChunksCommand::Delete {
            dataset,
            document,
            ids,
        } => {
            ctx.client.chunks(&dataset, &document).delete(&ids).await?;
            ctx.print_success(&format!("Deleted {} chunk(s)", ids.len()))
        }
    }
}
