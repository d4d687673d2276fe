//! CLI command handlers.

use std::io::Write;
use std::time::Duration;

use anyhow::{Context as _, Result};
use console::Style;
use futures::{Stream, StreamExt};
use ragflow_client::{Completion, CompletionEvent, RagflowClient};
use ragflow_config::ClientConfig;
use serde::Serialize;

pub mod agents;
pub mod chat;
pub mod chats;
pub mod chunks;
pub mod config;
pub mod datasets;
pub mod documents;
pub mod repl;
pub mod retrieve;
pub mod sessions;

/// Server used when neither a flag, the environment, nor a context names one.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:9380";

/// Shared context for all commands that talk to a server.
#[derive(Debug, Clone)]
pub struct Context {
    /// Client bound to the resolved server and key.
    pub client: RagflowClient,
    /// Server URL in use.
    pub server_url: String,
    /// Page size for list commands that don't pass one.
    pub page_size: u32,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
}

/// Connection flags as given on the command line (or via env).
#[derive(Debug, Clone, Default)]
pub struct ConnectionFlags {
    pub server: Option<String>,
    pub api_key: Option<String>,
    pub context: Option<String>,
}

/// Server settings after merging flags with the client config.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub server_url: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub page_size: u32,
    /// Name of the context the settings came from, if any.
    pub context: Option<String>,
}

/// Merge connection flags with the client config.
///
/// Flags (and their env vars) win, then the named or current context, then
/// the local default server with no key.
pub fn resolve_connection(flags: &ConnectionFlags, config: &ClientConfig) -> Result<Connection> {
    let resolved = match &flags.context {
        Some(name) => Some(config.resolve(name)?),
        None => config.resolve_current()?,
    };

    let (ctx_server, ctx_key, timeout, context) = match resolved {
        Some(r) => (Some(r.server), r.api_key, r.timeout, Some(r.name)),
        None => (
            None,
            None,
            Duration::from_secs(config.defaults.timeout),
            None,
        ),
    };

    Ok(Connection {
        server_url: flags
            .server
            .clone()
            .or(ctx_server)
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
        api_key: flags.api_key.clone().or(ctx_key),
        timeout,
        page_size: config.defaults.page_size,
        context,
    })
}

impl Context {
    /// Resolve connection settings and build the client.
    pub fn connect(flags: &ConnectionFlags, json_output: bool, verbose: bool) -> Result<Self> {
        let config = ragflow_config::load_client_config().context("loading client config")?;
        let connection = resolve_connection(flags, &config)?;

        if let Some(name) = &connection.context {
            tracing::debug!(context = %name, server = %connection.server_url, "using context");
        }
        if connection.api_key.is_none() {
            tracing::warn!("no API key configured; requests will be sent unauthenticated");
        }

        let mut builder = RagflowClient::builder()
            .base_url(&connection.server_url)
            .timeout(connection.timeout);
        if let Some(key) = &connection.api_key {
            builder = builder.api_key(key);
        }
        let client = builder
            .build()
            .with_context(|| format!("connecting to {}", connection.server_url))?;

        Ok(Self {
            client,
            server_url: connection.server_url,
            page_size: connection.page_size,
            json_output,
            verbose,
        })
    }

    /// Print a value as pretty JSON.
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Print a success line, or `{"ok": true, ...}` in JSON mode.
    pub fn print_success(&self, message: &str) -> Result<()> {
        if self.json_output {
            self.print_json(&serde_json::json!({ "ok": true, "message": message }))
        } else {
            let green = Style::new().green();
            println!("{} {}", green.apply_to("✓"), message);
            Ok(())
        }
    }
}

/// Print a bold heading followed by a dim rule.
pub fn print_heading(title: &str) {
    let dim = Style::new().dim();
    println!("{}", console::style(title).bold());
    println!("{}", dim.apply_to("─".repeat(50)));
}

/// Render a millisecond timestamp as a local date.
pub fn format_time(millis: Option<i64>) -> String {
    millis
        .and_then(chrono::DateTime::from_timestamp_millis)
        .map(|t| {
            t.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "-".to_string())
}

/// Collapse newlines and cut a string to `max_len` characters.
pub fn truncate(s: &str, max_len: usize) -> String {
    let s = s.replace('\n', " ");
    if s.chars().count() <= max_len {
        s
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Prints a streamed answer incrementally.
///
/// Each stream event carries the whole answer so far; only the new suffix is
/// written. If the server rewrites earlier text, the answer is reprinted on a
/// fresh line.
#[derive(Debug, Default)]
pub struct AnswerPrinter {
    printed: String,
}

impl AnswerPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print whatever part of `answer` hasn't been printed yet.
    pub fn update(&mut self, answer: &str) -> Result<()> {
        let mut out = std::io::stdout();
        match answer.strip_prefix(self.printed.as_str()) {
            Some(delta) => write!(out, "{}", delta)?,
            None => write!(out, "\n{}", answer)?,
        }
        out.flush()?;
        self.printed = answer.to_string();
        Ok(())
    }

    /// The full answer printed so far.
    pub fn answer(&self) -> &str {
        &self.printed
    }

    /// End the answer with a newline if anything was printed.
    pub fn finish(&self) {
        if !self.printed.is_empty() {
            println!();
        }
    }
}

/// Drain a completion stream, printing the answer as it grows.
///
/// Returns the last partial completion, which carries the full answer and
/// the session id. In JSON mode nothing is printed while streaming.
pub async fn stream_answer<S>(stream: S, ctx: &Context) -> Result<Completion>
where
    S: Stream<Item = ragflow_client::Result<CompletionEvent>>,
{
    let mut stream = std::pin::pin!(stream);
    let mut printer = AnswerPrinter::new();
    let mut last = Completion::default();

    while let Some(event) = stream.next().await {
        match event? {
            CompletionEvent::Answer(completion) => {
                if !ctx.json_output {
                    printer.update(&completion.answer)?;
                }
                last = completion;
            }
            CompletionEvent::Done => break,
        }
    }

    if !ctx.json_output {
        printer.finish();
    }
    Ok(last)
}

/// Print the outcome of a non-streamed completion.
pub fn print_completion(completion: &Completion, ctx: &Context) -> Result<()> {
    if ctx.json_output {
        ctx.print_json(completion)
    } else {
        println!("{}", completion.answer);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ragflow_config::{AuthConfig, Context as ClientContext};

    fn config_with_context() -> ClientConfig {
        let mut config = ClientConfig::new();
        config.set_context(
            ClientContext::new("staging", "https://staging.example.com")
                .with_auth(AuthConfig::None)
                .with_timeout(5),
        );
        config
    }

    #[test]
    fn test_resolve_defaults_without_config() {
        let conn = resolve_connection(&ConnectionFlags::default(), &ClientConfig::new()).unwrap();
        assert_eq!(conn.server_url, DEFAULT_SERVER_URL);
        assert!(conn.api_key.is_none());
        assert_eq!(conn.timeout, Duration::from_secs(30));
        assert!(conn.context.is_none());
    }

    #[test]
    fn test_resolve_current_context() {
        let mut config = config_with_context();
        config.use_context("staging").unwrap();

        let conn = resolve_connection(&ConnectionFlags::default(), &config).unwrap();
        assert_eq!(conn.server_url, "https://staging.example.com");
        assert_eq!(conn.timeout, Duration::from_secs(5));
        assert_eq!(conn.context.as_deref(), Some("staging"));
    }

    #[test]
    fn test_flags_override_context() {
        let config = config_with_context();
        let flags = ConnectionFlags {
            server: Some("http://10.0.0.2:9380".into()),
            api_key: Some("ragflow-flag".into()),
            context: Some("staging".into()),
        };

        let conn = resolve_connection(&flags, &config).unwrap();
        assert_eq!(conn.server_url, "http://10.0.0.2:9380");
        assert_eq!(conn.api_key.as_deref(), Some("ragflow-flag"));
        assert_eq!(conn.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_unknown_context_flag_is_error() {
        let flags = ConnectionFlags {
            context: Some("missing".into()),
            ..Default::default()
        };
        assert!(resolve_connection(&flags, &ClientConfig::new()).is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("line one\nline two", 100), "line one line two");
        assert_eq!(truncate("abcdefghij", 6), "abc...");
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(None), "-");
        assert_ne!(format_time(Some(1_729_000_000_000)), "-");
    }
}
