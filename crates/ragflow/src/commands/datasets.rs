//! Datasets command - dataset management.

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use console::Style;
use ragflow_client::{CreateDatasetRequest, ListDatasetsQuery, UpdateDatasetRequest};

use super::{Context, format_time, print_heading};

/// Arguments for the datasets command.
#[derive(Args, Debug)]
pub struct DatasetsArgs {
    #[command(subcommand)]
    pub command: DatasetsCommand,
}

#[derive(Subcommand, Debug)]
pub enum DatasetsCommand {
    /// Create a dataset
    Create {
        /// Dataset name
        name: String,

        /// Document language (e.g. English, Chinese)
        #[arg(long)]
        language: Option<String>,

        /// Embedding model (e.g. BAAI/bge-large-zh-v1.5)
        #[arg(long)]
        embedding_model: Option<String>,

        /// Chunking method (naive, qa, manual, paper, book, laws, ...)
        #[arg(long)]
        chunk_method: Option<String>,

        /// Description
        #[arg(long)]
        description: Option<String>,

        /// Visibility: me or team
        #[arg(long)]
        permission: Option<String>,
    },

    /// List datasets
    List {
        /// Only datasets with this exact name
        #[arg(long)]
        name: Option<String>,

        /// Page number (1-based)
        #[arg(long)]
        page: Option<u32>,

        /// Items per page
        #[arg(long)]
        page_size: Option<u32>,

        /// Sort field (create_time or update_time)
        #[arg(long)]
        orderby: Option<String>,

        /// Sort descending
        #[arg(long)]
        desc: Option<bool>,
    },

    /// Update a dataset
    Update {
        /// Dataset ID
        id: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,

        /// New embedding model
        #[arg(long)]
        embedding_model: Option<String>,

        /// New chunking method
        #[arg(long)]
        chunk_method: Option<String>,

        /// New visibility: me or team
        #[arg(long)]
        permission: Option<String>,
    },

    /// Delete datasets
    Delete {
        /// Dataset IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

/// Run the datasets command.
pub async fn run(args: DatasetsArgs, ctx: &Context) -> Result<()> {
    let api = ctx.client.datasets();

    match args.command {
        DatasetsCommand::Create {
            name,
            language,
            embedding_model,
            chunk_method,
            description,
            permission,
        } => {
            let request = CreateDatasetRequest {
                language,
                embedding_model,
                chunk_method,
                description,
                permission,
                ..CreateDatasetRequest::new(name)
            };
            let dataset = api.create(request).await?;
            if ctx.json_output {
                ctx.print_json(&dataset)?;
            } else {
                let dim = Style::new().dim();
                let green = Style::new().green();
                println!(
                    "{} Dataset created: {} {}",
                    green.apply_to("✓"),
                    dataset.name,
                    dim.apply_to(&dataset.id)
                );
            }
        }
        DatasetsCommand::List {
            name,
            page,
            page_size,
            orderby,
            desc,
        } => {
            let query = ListDatasetsQuery {
                name,
                page,
                page_size: page_size.or(Some(ctx.page_size)),
                orderby,
                desc,
                ..Default::default()
            };
            let datasets = api.list(query).await?;
            if ctx.json_output {
                ctx.print_json(&datasets)?;
            } else {
                let dim = Style::new().dim();
                print_heading("Datasets");
                if datasets.is_empty() {
                    println!("{}", dim.apply_to("No datasets found"));
                }
                for ds in &datasets {
                    println!(
                        "{}  {:<24} {:>5} docs {:>7} chunks  {}",
                        dim.apply_to(&ds.id),
                        ds.name,
                        ds.document_count,
                        ds.chunk_count,
                        dim.apply_to(format_time(ds.create_time))
                    );
                }
            }
        }
        DatasetsCommand::Update {
            id,
            name,
            description,
            embedding_model,
            chunk_method,
            permission,
        } => {
            let request = UpdateDatasetRequest {
                name,
                description,
                embedding_model,
                chunk_method,
                permission,
                ..Default::default()
            };
            if request.is_empty() {
                bail!("nothing to update; pass at least one field (see --help)");
            }
            api.update(&id, request).await?;
            ctx.print_success(&format!("Dataset {} updated", id))?;
        }
        DatasetsCommand::Delete { ids } => {
            api.delete(&ids).await?;
            ctx.print_success(&format!("Deleted {} dataset(s)", ids.len()))?;
        }
    }

    Ok(())
}
