//! hostnet REPL: an interactive terminal onto a simulated network.
//!
//! It handles:
//! - Meta-commands: `:new`, `:hosts`, `:use`, `:repair`, `:help`, `:quit`
//! - Forwarding every other line to the selected host's main session
//! - Command history via rustyline

use std::path::PathBuf;

use anyhow::{Context, Result};
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use tokio::runtime::Runtime;

use hostnet_kernel::{Network, NetworkConfig};
use hostnet_types::ExecResult;

/// What the caller should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this.
    Output(String),
    /// Nothing to print.
    Silent,
    /// Leave the REPL.
    Exit,
}

/// REPL state: the network and the host lines are sent to.
pub struct Repl {
    network: Network,
    runtime: Runtime,
    current: Option<String>,
}

impl Repl {
    /// Create a REPL using the user's `network.toml`.
    pub fn new() -> Result<Self> {
        let config = NetworkConfig::load().context("Failed to load network config")?;
        Self::with_config(config)
    }

    /// Create a REPL with an explicit configuration.
    pub fn with_config(config: NetworkConfig) -> Result<Self> {
        let network = Network::from_config(config).context("Failed to create network")?;
        let runtime = Runtime::new().context("Failed to create tokio runtime")?;
        Ok(Self {
            network,
            runtime,
            current: None,
        })
    }

    /// Address of the selected host.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Prompt for the next line.
    pub fn prompt(&self) -> String {
        let Some(address) = &self.current else {
            return "hostnet> ".to_string();
        };
        match self.runtime.block_on(self.network.prompt(address)) {
            Ok(prompt) => prompt,
            Err(e) => {
                tracing::debug!(error = %e, "falling back to plain prompt");
                format!("{address}$ ")
            }
        }
    }

    /// Process a single line of input.
    pub fn process_line(&mut self, line: &str) -> Reply {
        let trimmed = line.trim();
        if let Some(meta) = trimmed.strip_prefix(':') {
            return self.handle_meta_command(meta);
        }
        if trimmed.is_empty() {
            return Reply::Silent;
        }

        let Some(address) = &self.current else {
            return Reply::Output("No host selected. Create one with :new <user> <password>.".to_string());
        };
        let result = self.runtime.block_on(self.network.dispatch(address, trimmed));
        match format_result(&result) {
            output if output.is_empty() => Reply::Silent,
            output => Reply::Output(output),
        }
    }

    fn handle_meta_command(&mut self, cmd: &str) -> Reply {
        let parts: Vec<&str> = cmd.split_whitespace().collect();
        let command = parts.first().copied().unwrap_or("");

        match (command, &parts[1..]) {
            ("quit" | "q" | "exit", _) => Reply::Exit,
            ("help" | "h" | "?", _) => Reply::Output(HELP_TEXT.trim_end().to_string()),
            ("new", [user, password]) => match self.runtime.block_on(self.network.add_host(user, password)) {
                Ok(address) => {
                    self.current = Some(address.clone());
                    Reply::Output(format!("Created host {address}"))
                }
                Err(e) => Reply::Output(format!("Error: {e}")),
            },
            ("hosts", []) => {
                let addresses = self.runtime.block_on(self.network.addresses());
                if addresses.is_empty() {
                    return Reply::Output("(no hosts)".to_string());
                }
                let lines: Vec<String> = addresses
                    .iter()
                    .map(|a| {
                        let marker = if Some(a.as_str()) == self.current.as_deref() { "*" } else { " " };
                        format!("{marker} {a}")
                    })
                    .collect();
                Reply::Output(lines.join("\n"))
            }
            ("use", [address]) => {
                if self.runtime.block_on(self.network.contains(address)) {
                    self.current = Some(address.to_string());
                    Reply::Silent
                } else {
                    Reply::Output(format!("Error: host not found: {address}"))
                }
            }
            ("repair", []) => match &self.current {
                Some(address) => match self.runtime.block_on(self.network.repair(address)) {
                    Ok(()) => Reply::Output("Repaired.".to_string()),
                    Err(e) => Reply::Output(format!("Error: {e}")),
                },
                None => Reply::Output("No host selected.".to_string()),
            },
            ("new" | "use" | "hosts" | "repair", _) => {
                Reply::Output(format!("Invalid arguments for :{command}. Type :help for usage."))
            }
            _ => Reply::Output(format!("Unknown command: :{command}\nType :help for available commands.")),
        }
    }
}

/// Render a result for the terminal: stdout, then stderr.
fn format_result(result: &ExecResult) -> String {
    [result.stdout(), result.stderr()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join("\n")
}

const HELP_TEXT: &str = r#"hostnet REPL

Meta commands:
  :new <user> <password>   Create a host and select it
  :hosts                   List hosts (* marks the selected one)
  :use <address>           Select a host
  :repair                  Reinstall the selected host's integrity marker
  :help                    Show this help
  :quit                    Exit

Anything else runs on the selected host. Type `help` there for its commands.
"#;

/// Save REPL history to disk.
fn save_history(rl: &mut Editor<(), DefaultHistory>, history_path: &Option<PathBuf>) {
    if let Some(path) = history_path {
        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            tracing::warn!("Failed to create history directory: {}", e);
        }
        if let Err(e) = rl.save_history(path) {
            tracing::warn!("Failed to save history: {}", e);
        }
    }
}

/// Run the REPL.
pub fn run(config: NetworkConfig) -> Result<()> {
    println!("hostnet v{}", env!("CARGO_PKG_VERSION"));
    println!("Type :help for commands, :quit to exit.");

    let mut rl: Editor<(), DefaultHistory> = Editor::new().context("Failed to create editor")?;

    let history_path = directories::BaseDirs::new().map(|b| b.data_dir().join("hostnet").join("history.txt"));
    if let Some(path) = &history_path
        && let Err(e) = rl.load_history(path)
    {
        let is_not_found = matches!(&e, ReadlineError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound);
        if !is_not_found {
            tracing::warn!("Failed to load history: {}", e);
        }
    }

    let mut repl = Repl::with_config(config)?;
    println!();

    loop {
        let prompt = repl.prompt();
        match rl.readline(&prompt) {
            Ok(line) => {
                if let Err(e) = rl.add_history_entry(line.as_str()) {
                    tracing::warn!("Failed to add history entry: {}", e);
                }
                match repl.process_line(&line) {
                    Reply::Output(output) => println!("{output}"),
                    Reply::Silent => {}
                    Reply::Exit => break,
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    save_history(&mut rl, &history_path);
    Ok(())
}
