//! Documents command - upload, inspect and parse documents in a dataset.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context as _, Result, bail};
use clap::{Args, Subcommand};
use console::Style;
use ragflow_client::{Document, ListDocumentsQuery, RunStatus, UpdateDocumentRequest};

use super::{Context, format_time, print_heading, truncate};

/// Arguments for the documents command.
#[derive(Args, Debug)]
pub struct DocumentsArgs {
    #[command(subcommand)]
    pub command: DocumentsCommand,
}

#[derive(Subcommand, Debug)]
pub enum DocumentsCommand {
    /// Upload files into a dataset
    Upload {
        /// Dataset ID
        dataset: String,

        /// Files to upload (sent in one request)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Start parsing the uploaded documents right away
        #[arg(long)]
        parse: bool,
    },

    /// List documents in a dataset
    List {
        /// Dataset ID
        dataset: String,

        /// Only documents with this exact name
        #[arg(long)]
        name: Option<String>,

        /// Only documents whose name contains these keywords
        #[arg(long)]
        keywords: Option<String>,

        /// Page number (1-based)
        #[arg(long)]
        page: Option<u32>,

        /// Items per page
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Rename a document or change how it is chunked
    Update {
        /// Dataset ID
        dataset: String,

        /// Document ID
        document: String,

        /// New name (extension must stay the same)
        #[arg(long)]
        name: Option<String>,

        /// New chunking method
        #[arg(long)]
        chunk_method: Option<String>,
    },

    /// Download a document's original file
    Download {
        /// Dataset ID
        dataset: String,

        /// Document ID
        document: String,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete documents
    Delete {
        /// Dataset ID
        dataset: String,

        /// Document IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Start parsing documents into chunks
    Parse {
        /// Dataset ID
        dataset: String,

        /// Document IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Stop parsing documents
    Stop {
        /// Dataset ID
        dataset: String,

        /// Document IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

/// Run the documents command.
pub async fn run(args: DocumentsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        DocumentsCommand::Upload {
            dataset,
            files,
            parse,
        } => cmd_upload(&dataset, &files, parse, ctx).await,
        DocumentsCommand::List {
            dataset,
            name,
            keywords,
            page,
            page_size,
        } => {
            let query = ListDocumentsQuery {
                name,
                keywords,
                page,
                page_size: page_size.or(Some(ctx.page_size)),
                ..Default::default()
            };
            cmd_list(&dataset, query, ctx).await
        }
        DocumentsCommand::Update {
            dataset,
            document,
            name,
            chunk_method,
        } => {
            let request = UpdateDocumentRequest {
                name,
                chunk_method,
                ..Default::default()
            };
            if request.name.is_none() && request.chunk_method.is_none() {
                bail!("nothing to update; pass --name or --chunk-method");
            }
            ctx.client
                .documents(&dataset)
                .update(&document, request)
                .await?;
            ctx.print_success(&format!("Document {} updated", document))
        }
        DocumentsCommand::Download {
            dataset,
            document,
            output,
        } => cmd_download(&dataset, &document, output, ctx).await,
        DocumentsCommand::Delete { dataset, ids } => {
            ctx.client.documents(&dataset).delete(&ids).await?;
            ctx.print_success(&format!("Deleted {} document(s)", ids.len()))
        }
        DocumentsCommand::Parse { dataset, ids } => {
            ctx.client.documents(&dataset).parse(&ids).await?;
            ctx.print_success(&format!("Parsing started for {} document(s)", ids.len()))
        }
        DocumentsCommand::Stop { dataset, ids } => {
            ctx.client.documents(&dataset).stop_parsing(&ids).await?;
            ctx.print_success(&format!("Parsing stopped for {} document(s)", ids.len()))
        }
    }
}

async fn cmd_upload(dataset: &str, files: &[PathBuf], parse: bool, ctx: &Context) -> Result<()> {
    let api = ctx.client.documents(dataset);
    let docs = api.upload_paths(files).await?;

    if parse {
        let ids: Vec<String> = docs.iter().map(|d| d.id.clone()).collect();
        api.parse(&ids).await.context("documents uploaded but parsing failed to start")?;
    }

    if ctx.json_output {
        return ctx.print_json(&docs);
    }

    let green = Style::new().green();
    let dim = Style::new().dim();
    for doc in &docs {
        println!(
            "{} Uploaded {} {}",
            green.apply_to("✓"),
            doc.name,
            dim.apply_to(&doc.id)
        );
    }
    if parse {
        println!("{}", dim.apply_to("Parsing started"));
    }
    Ok(())
}

async fn cmd_list(dataset: &str, query: ListDocumentsQuery, ctx: &Context) -> Result<()> {
    let list = ctx.client.documents(dataset).list(query).await?;

    if ctx.json_output {
        return ctx.print_json(&list);
    }

    let dim = Style::new().dim();
    print_heading(&format!("Documents ({} total)", list.total));
    if list.docs.is_empty() {
        println!("{}", dim.apply_to("No documents found"));
    }
    for doc in &list.docs {
        println!(
            "{}  {:<32} {:<9} {:>6} chunks  {}",
            dim.apply_to(&doc.id),
            truncate(&doc.name, 32),
            run_label(doc),
            doc.chunk_count,
            dim.apply_to(format_time(doc.create_time))
        );
    }
    Ok(())
}

async fn cmd_download(
    dataset: &str,
    document: &str,
    output: Option<PathBuf>,
    ctx: &Context,
) -> Result<()> {
    let bytes = ctx.client.documents(dataset).download(document).await?;

    match output {
        Some(path) => {
            tokio::fs::write(&path, &bytes)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            ctx.print_success(&format!("Saved {} bytes to {}", bytes.len(), path.display()))
        }
        None => {
            let mut stdout = std::io::stdout();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
            Ok(())
        }
    }
}

/// Colored parse state, with progress while running.
fn run_label(doc: &Document) -> String {
    match doc.run {
        Some(RunStatus::Done) => Style::new().green().apply_to("DONE").to_string(),
        Some(RunStatus::Fail) => Style::new().red().apply_to("FAIL").to_string(),
        Some(RunStatus::Running) => Style::new()
            .yellow()
            .apply_to(format!("{:>3.0}%", doc.progress * 100.0))
            .to_string(),
        Some(RunStatus::Cancel) => "CANCEL".to_string(),
        Some(RunStatus::Unstart) | Some(RunStatus::Unknown) | None => {
            Style::new().dim().apply_to("-").to_string()
        }
    }
}
