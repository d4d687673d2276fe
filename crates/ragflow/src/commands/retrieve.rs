//! Retrieve command - ranked chunk search across datasets.

use anyhow::Result;
use clap::Args;
use console::{Style, style};
use ragflow_client::RetrievalRequest;

use super::{Context, print_heading};

/// Arguments for the retrieve command.
#[derive(Args, Debug)]
pub struct RetrieveArgs {
    /// The question to search for
    pub question: String,

    /// Dataset to search (repeatable)
    #[arg(short, long = "dataset", required = true)]
    pub datasets: Vec<String>,

    /// Restrict the search to this document (repeatable)
    #[arg(long = "document")]
    pub documents: Vec<String>,

    /// Page number (1-based)
    #[arg(long)]
    pub page: Option<u32>,

    /// Chunks per page
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Minimum similarity score (0.0 - 1.0)
    #[arg(long)]
    pub similarity_threshold: Option<f64>,

    /// Weight of vector similarity against term similarity (0.0 - 1.0)
    #[arg(long)]
    pub vector_similarity_weight: Option<f64>,

    /// Number of chunks taking part in vector cosine computation
    #[arg(long)]
    pub top_k: Option<u32>,

    /// Rerank model ID
    #[arg(long)]
    pub rerank_id: Option<String>,

    /// Expand the question with extracted keywords
    #[arg(long)]
    pub keyword: bool,

    /// Highlight matched terms
    #[arg(long)]
    pub highlight: bool,
}

/// Run the retrieve command.
pub async fn run(args: RetrieveArgs, ctx: &Context) -> Result<()> {
    let dim = Style::new().dim();

    if ctx.verbose {
        println!(
            "{}",
            dim.apply_to(format!(
                "Searching {} dataset(s) for: \"{}\"",
                args.datasets.len(),
                args.question
            ))
        );
        println!();
    }

    let request = RetrievalRequest {
        page: args.page,
        page_size: args.page_size,
        similarity_threshold: args.similarity_threshold,
        vector_similarity_weight: args.vector_similarity_weight,
        top_k: args.top_k,
        rerank_id: args.rerank_id,
        keyword: args.keyword.then_some(true),
        highlight: args.highlight.then_some(true),
        ..RetrievalRequest::new(args.question, args.datasets).with_documents(args.documents)
    };
    let result = ctx.client.retrieval().retrieve(request).await?;

    if ctx.json_output {
        return ctx.print_json(&result);
    }

    print_heading(&format!("Results ({} total)", result.total));
    if result.chunks.is_empty() {
        println!("{}", dim.apply_to("No matching chunks"));
        return Ok(());
    }

    for (i, chunk) in result.chunks.iter().enumerate() {
        let score = chunk
            .similarity
            .map(|s| format!("(score: {:.3})", s))
            .unwrap_or_default();
        let source = chunk.document_keyword.as_deref().unwrap_or(&chunk.document_id);
        println!(
            "{}. {} {}",
            i + 1,
            style(source).cyan(),
            dim.apply_to(score)
        );
        let text = chunk.highlight.as_deref().unwrap_or(&chunk.content);
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            println!("   {}", line.trim());
        }
        println!();
    }

    if ctx.verbose && !result.doc_aggs.is_empty() {
        println!("{}", dim.apply_to("Matches per document:"));
        for agg in &result.doc_aggs {
            println!("  {:<40} {}", agg.doc_name, agg.count);
        }
    }

    Ok(())
}
