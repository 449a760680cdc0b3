use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;

use triage_dash::api::Backend;
use triage_dash::api::client::ApiClient;
use triage_dash::config::{API_URL_ENV, Config, load_config};
use triage_dash::domain::prompt::{PromptConfig, find_categorization};
use triage_dash::terminal::inbox::{email_card_lines, line_text};
use triage_dash::terminal::run_tui;

#[derive(Parser)]
#[command(name = "triage_dash")]
#[command(about = "Email triage dashboard (inbox + prompt brain)", long_about = None)]
struct Cli {
    /// Backend base url (overrides BACKEND_API_URL and the config file)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the dashboard (default)
    Tui,

    /// Print the inbox
    Emails,

    /// Reload the backend's sample emails
    Reset,

    /// Ask the backend to categorize unread emails
    Analyze,

    /// Show or replace the categorization prompt
    Prompt {
        #[command(subcommand)]
        action: PromptAction,
    },
}

#[derive(Subcommand)]
enum PromptAction {
    Show,
    Set {
        /// Read the template from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

fn init_logging(cfg: &Config) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(path) = &cfg.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| anyhow!("opening log file {path}: {e}"))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = load_config().map_err(|e| anyhow!("Configuration error: {e}"))?;
    init_logging(&cfg)?;

    let env_url = std::env::var(API_URL_ENV).ok();
    let api_url = cfg.resolve_api_url(cli.api_url.as_deref(), env_url.as_deref());
    log::info!("using backend at {api_url}");
    let client = ApiClient::new(&api_url, cfg.request_timeout())?;

    match cli.cmd.unwrap_or(Command::Tui) {
        Command::Tui => run_tui(Arc::new(client)),

        Command::Emails => {
            let emails = client.get_emails()?;
            if emails.is_empty() {
                println!("Inbox is empty. Run: triage_dash reset");
            }
            for email in &emails {
                for line in email_card_lines(email) {
                    println!("{}", line_text(&line));
                }
            }
            Ok(())
        }

        Command::Reset => {
            client.load_mock_data()?;
            println!("Loaded {} sample emails", client.get_emails()?.len());
            Ok(())
        }

        Command::Analyze => {
            client.process_emails()?;
            let emails = client.get_emails()?;
            let done = emails.iter().filter(|e| e.is_processed).count();
            println!("{done}/{} emails analyzed", emails.len());
            Ok(())
        }

        Command::Prompt { action } => match action {
            PromptAction::Show => {
                match find_categorization(client.get_prompts()?) {
                    Some(cfg) => println!("{}", cfg.template_text),
                    None => eprintln!("No categorization prompt configured"),
                }
                Ok(())
            }
            PromptAction::Set { file } => {
                let template_text = match file {
                    Some(path) => std::fs::read_to_string(&path)?,
                    None => {
                        eprintln!("Paste template (end with Ctrl-D):");
                        let mut s = String::new();
                        std::io::Read::read_to_string(&mut std::io::stdin(), &mut s)?;
                        s
                    }
                };
                let current = find_categorization(client.get_prompts()?).unwrap_or_default();
                client.update_prompt(&PromptConfig {
                    template_text: template_text.trim_end().to_string(),
                    ..current
                })?;
                println!("Prompt configuration updated");
                Ok(())
            }
        },
    }
}
