//! REPL (Read-Eval-Print Loop) implementation for interactive chat.

use anyhow::Result;
use console::{Style, Term, style};
use futures::StreamExt;
use ragflow_client::{CompletionEvent, CompletionRequest, ListSessionsQuery, RagflowClient};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};

use super::AnswerPrinter;

/// REPL state and configuration.
pub struct Repl {
    client: RagflowClient,
    chat_id: String,
    chat_name: String,
    session_id: Option<String>,
    editor: Editor<(), DefaultHistory>,
    term: Term,
    verbose: bool,
}

impl Repl {
    /// Create a new REPL instance bound to one chat assistant.
    pub fn new(
        client: RagflowClient,
        chat_id: String,
        chat_name: String,
        session_id: Option<String>,
        verbose: bool,
    ) -> Result<Self> {
        let config = Config::builder()
            .history_ignore_space(true)
            .auto_add_history(true)
            .build();

        let editor = Editor::with_config(config)?;

        Ok(Self {
            client,
            chat_id,
            chat_name,
            session_id,
            editor,
            term: Term::stdout(),
            verbose,
        })
    }

    /// Run the REPL loop.
    pub async fn run(&mut self) -> Result<()> {
        self.print_welcome();

        loop {
            let prompt = self.format_prompt();

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        match self.handle_slash_command(line).await {
                            Ok(ControlFlow::Continue) => continue,
                            Ok(ControlFlow::Exit) => break,
                            Err(e) => {
                                self.print_error(&format!("Command error: {}", e));
                                continue;
                            }
                        }
                    }

                    if let Err(e) = self.send_message(line).await {
                        println!();
                        self.print_error(&e.to_string());
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C clears the line but keeps the REPL running
                    println!();
                    self.print_dim("(Interrupted - type /quit to exit)");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(e) => {
                    self.print_error(&format!("Input error: {}", e));
                    break;
                }
            }
        }

        self.print_dim("Goodbye!");
        Ok(())
    }

    /// Send a question and stream the answer.
    async fn send_message(&mut self, message: &str) -> Result<()> {
        let mut request = CompletionRequest::new(message);
        request.session_id = self.session_id.clone();

        let mut stream = self.client.chats().stream(&self.chat_id, request).await?;
        let mut printer = AnswerPrinter::new();
        let mut started = None;

        while let Some(event) = stream.next().await {
            match event? {
                CompletionEvent::Answer(completion) => {
                    printer.update(&completion.answer)?;
                    if self.session_id.is_none() {
                        started = completion.session_id;
                    }
                }
                CompletionEvent::Done => break,
            }
        }

        printer.finish();
        if let Some(id) = started {
            tracing::debug!(session = %id, "session started");
            if self.verbose {
                self.print_dim(&format!("Session: {}", id));
            }
            self.session_id = Some(id);
        }
        println!();
        Ok(())
    }

    /// Handle a slash command.
    async fn handle_slash_command(&mut self, input: &str) -> Result<ControlFlow> {
        let parts: Vec<&str> = input[1..].split_whitespace().collect();
        let cmd = parts.first().copied().unwrap_or("");
        let args = parts.get(1..).unwrap_or_default();

        match cmd {
            "quit" | "q" | "exit" => {
                return Ok(ControlFlow::Exit);
            }
            "help" | "h" | "?" => {
                self.print_help();
            }
            "clear" | "cls" => {
                self.term.clear_screen()?;
            }
            "new" => {
                let name = if args.is_empty() {
                    "New session".to_string()
                } else {
                    args.join(" ")
                };
                let session = self.client.sessions(&self.chat_id).create(&name).await?;
                let green = Style::new().green();
                println!("{} Started session {}", green.apply_to("✓"), session.id);
                if let Some(greeting) = session.messages.first() {
                    self.print_dim(&greeting.content);
                }
                self.session_id = Some(session.id);
            }
            "session" => match (&self.session_id, args.first()) {
                (_, Some(id)) => {
                    self.session_id = Some(id.to_string());
                    println!("Switched to session: {}", id);
                }
                (Some(id), None) => println!("Current session: {}", id),
                (None, None) => {
                    self.print_dim("No active session (will create on first message)")
                }
            },
            "sessions" => {
                self.list_sessions().await?;
            }
            "" => {
                self.print_dim("Type /help for available commands");
            }
            _ => {
                self.print_error(&format!("Unknown command: /{}", cmd));
                self.print_dim("Type /help for available commands");
            }
        }

        Ok(ControlFlow::Continue)
    }

    async fn list_sessions(&self) -> Result<()> {
        let dim = Style::new().dim();
        let sessions = self
            .client
            .sessions(&self.chat_id)
            .list(ListSessionsQuery::default())
            .await?;

        if sessions.is_empty() {
            self.print_dim("No sessions yet");
        }
        for session in &sessions {
            let marker = if self.session_id.as_deref() == Some(session.id.as_str()) {
                "*"
            } else {
                " "
            };
            println!(
                "{} {} {}",
                marker,
                dim.apply_to(&session.id),
                session.name
            );
        }
        Ok(())
    }

    fn print_welcome(&self) {
        let dim = Style::new().dim();
        println!();
        println!("{}", style(format!("RAGFlow Chat: {}", self.chat_name)).bold().cyan());
        println!("{}", dim.apply_to("─".repeat(40)));
        println!(
            "{}",
            dim.apply_to("Type your question and press Enter.")
        );
        println!(
            "{}",
            dim.apply_to("Use /help for commands, Ctrl+D to exit.")
        );
        println!();
    }

    fn print_help(&self) {
        let dim = Style::new().dim();
        println!();
        println!("{}", style("Available Commands").bold());
        println!("{}", dim.apply_to("─".repeat(40)));
        println!("  {}  - Exit the REPL", style("/quit, /q").cyan());
        println!("  {}  - Show this help", style("/help, /h, /?").cyan());
        println!("  {}  - Clear the screen", style("/clear").cyan());
        println!("  {}  - Start a new session", style("/new [name]").cyan());
        println!(
            "  {}  - Show or switch the current session",
            style("/session [id]").cyan()
        );
        println!("  {}  - List sessions", style("/sessions").cyan());
        println!();
        println!("{}", dim.apply_to("Keyboard shortcuts:"));
        println!("  {} - Clear the current line", dim.apply_to("Ctrl+C"));
        println!("  {} - Exit the REPL", dim.apply_to("Ctrl+D"));
        println!();
    }

    fn format_prompt(&self) -> String {
        format!("{} ", style("ragflow>").cyan().bold())
    }

    fn print_dim(&self, msg: &str) {
        let dim = Style::new().dim();
        println!("{}", dim.apply_to(msg));
    }

    fn print_error(&self, msg: &str) {
        let red = Style::new().red();
        println!("{} {}", red.apply_to("Error:"), msg);
    }
}

/// Control flow for the REPL.
pub enum ControlFlow {
    Continue,
    Exit,
}
