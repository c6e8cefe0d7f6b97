use anyhow::Result;
use colored::Colorize;
use rustyline::Editor;
use rustyline::history::DefaultHistory;

use cadchat_application::history::ReplyEntry;
use cadchat_application::welcome_example;
use cadchat_core::history::ConversationSummary;
use cadchat_core::result::{ExportFormat, RenderMode};
use cadchat_core::session::ModeSelection;

use crate::context::{AppContext, parse_mode};
use crate::helper::{COMMANDS, CliHelper};
use crate::render;

/// One parsed line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplCommand {
    Query(String),
    New,
    Mode(Option<String>),
    History,
    Replies(String),
    Open(usize),
    Download(String),
    Status,
    Examples(Option<usize>),
    Help,
    Quit,
    Invalid(String),
}

fn parse(line: &str) -> ReplCommand {
    let line = line.trim();
    if line == "quit" || line == "exit" {
        return ReplCommand::Quit;
    }
    let Some(command) = line.strip_prefix('/') else {
        return ReplCommand::Query(line.to_string());
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, Some(arg.trim()).filter(|a| !a.is_empty())),
        None => (command, None),
    };
    let number = |arg: Option<&str>| arg.and_then(|a| a.parse::<usize>().ok());

    match (name, arg) {
        ("new", _) => ReplCommand::New,
        ("mode", arg) => ReplCommand::Mode(arg.map(str::to_string)),
        ("history", _) => ReplCommand::History,
        ("replies", Some(target)) => ReplCommand::Replies(target.to_string()),
        ("open", arg) => match number(arg) {
            Some(n) => ReplCommand::Open(n),
            None => ReplCommand::Invalid("usage: /open <n>".to_string()),
        },
        ("download", Some(format)) => ReplCommand::Download(format.to_string()),
        ("status", _) => ReplCommand::Status,
        ("examples", None) => ReplCommand::Examples(None),
        ("examples", arg) => match number(arg) {
            Some(n) => ReplCommand::Examples(Some(n)),
            None => ReplCommand::Invalid("usage: /examples <n>".to_string()),
        },
        ("help", _) => ReplCommand::Help,
        ("replies", None) => ReplCommand::Invalid("usage: /replies <n|id>".to_string()),
        ("download", None) => ReplCommand::Invalid("usage: /download <format>".to_string()),
        (other, _) => ReplCommand::Invalid(format!("Unknown command /{}", other)),
    }
}

/// Listings remembered between commands so they can be referenced by number.
#[derive(Default)]
struct ReplState {
    summaries: Vec<ConversationSummary>,
    replies: Vec<ReplyEntry>,
}

impl ReplState {
    /// Resolves `/replies` targets: a listed number or a raw conversation id.
    fn conversation(&self, target: &str) -> String {
        target
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| self.summaries.get(index))
            .map(|summary| summary.id.clone())
            .unwrap_or_else(|| target.to_string())
    }
}

/// Runs the interactive session until `quit` or EOF.
pub async fn run(ctx: &AppContext) -> Result<()> {
    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== cadchat ===".bright_magenta().bold());
    println!(
        "{}",
        format!("Connected to {}", ctx.config.backend.base_url()).bright_black()
    );
    println!("{}", "Type a description, '/help' for commands, or 'quit' to exit.".bright_black());
    render::print_welcome();
    println!();

    let mut state = ReplState::default();

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                let command = parse(&line);
                if command == ReplCommand::Quit {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
                if let Err(err) = handle(ctx, &mut state, command).await {
                    eprintln!("{}", format!("Error: {:#}", err).red());
                }
                println!();
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

async fn handle(ctx: &AppContext, state: &mut ReplState, command: ReplCommand) -> Result<()> {
    let studio = &ctx.studio;

    match command {
        ReplCommand::Query(text) => submit(ctx, &text).await?,
        ReplCommand::New => {
            let update = studio.new_conversation().await;
            render::print_update(studio, &update).await;
        }
        ReplCommand::Mode(None) => {
            let snapshot = studio.snapshot().await;
            let lock = if snapshot.mode_locked { " (locked)" } else { "" };
            println!("Render mode: {}{}", snapshot.render_mode, lock);
        }
        ReplCommand::Mode(Some(raw)) => {
            let mode: RenderMode = parse_mode(&raw)?;
            match studio.select_mode(mode).await {
                ModeSelection::Applied(mode) => {
                    println!("{}", format!("Render mode set to {}", mode).bright_green())
                }
                ModeSelection::Unchanged => println!("Render mode is already {}", mode),
                ModeSelection::Locked(locked) => println!(
                    "{}",
                    format!(
                        "Render mode is locked to {} for this conversation; use /new to change it",
                        locked
                    )
                    .yellow()
                ),
            }
        }
        ReplCommand::History => {
            state.summaries = studio.history().refresh().await?;
            render::print_summaries(&state.summaries);
        }
        ReplCommand::Replies(target) => {
            let conversation_id = state.conversation(&target);
            state.replies = studio.history().replies(&conversation_id).await?;
            render::print_replies(&state.replies);
        }
        ReplCommand::Open(number) => {
            let Some(reply) = number.checked_sub(1).and_then(|i| state.replies.get(i)) else {
                anyhow::bail!("No reply {} listed, run /replies first", number);
            };
            let update = studio
                .select_history(&reply.conversation_id, reply.message_index)
                .await;
            render::print_update(studio, &update).await;
        }
        ReplCommand::Download(raw) => {
            let format: ExportFormat = raw
                .parse()
                .map_err(|_| anyhow::anyhow!("Unknown format '{}'", raw))?;
            let artifact = studio.download(format).await?;
            let path = ctx.artifacts.save(&artifact.request, &artifact.bytes).await?;
            println!("{}", format!("Saved {}", path.display()).bright_green());
        }
        ReplCommand::Status => {
            let snapshot = studio.snapshot().await;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            render::print_prompt_hint(&snapshot);
        }
        ReplCommand::Examples(None) => render::print_examples(),
        ReplCommand::Examples(Some(number)) => match welcome_example(number) {
            Some(example) => {
                println!("{}", format!("> {}", example).green());
                submit(ctx, example).await?;
            }
            None => anyhow::bail!("No example {}", number),
        },
        ReplCommand::Help => {
            for (name, description) in COMMANDS {
                println!("  {:<12} {}", name.bright_cyan(), description);
            }
            println!("  {:<12} {}", "quit".bright_cyan(), "exit the session");
        }
        ReplCommand::Invalid(message) => println!("{}", message.yellow()),
        ReplCommand::Quit => {}
    }
    Ok(())
}

async fn submit(ctx: &AppContext, text: &str) -> Result<()> {
    println!("{}", "Generating...".bright_black());
    let update = ctx.studio.submit_query(text).await?;
    render::print_update(&ctx.studio, &update).await;
    Ok(())
}
