//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::output;
use crate::setup::{Assistant, parse_screen};
use anyhow::Result;
use colored::Colorize;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};

const HISTORY_SIZE: usize = 500;

/// What a slash command asks the loop to do
#[derive(Debug, PartialEq)]
enum Command<'a> {
    Quit,
    Help,
    Memory,
    Reset,
    Screen(Option<&'a str>),
    Unknown(&'a str),
}

fn parse_command(line: &str) -> Command<'_> {
    let (name, arg) = match line.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, Some(arg.trim()).filter(|a| !a.is_empty())),
        None => (line, None),
    };
    match name {
        "/quit" | "/exit" | "/q" => Command::Quit,
        "/help" | "/h" | "/?" => Command::Help,
        "/memory" | "/m" => Command::Memory,
        "/reset" => Command::Reset,
        "/screen" => Command::Screen(arg),
        _ => Command::Unknown(line),
    }
}

fn line_editor() -> Reedline {
    let editor = Reedline::create();
    let history = dirs::data_dir()
        .map(|p| p.join("droidmind").join("history.txt"))
        .and_then(|path| {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            FileBackedHistory::with_file(HISTORY_SIZE, path).ok()
        });
    match history {
        Some(history) => editor.with_history(Box::new(history)),
        None => editor,
    }
}

fn print_help() {
    println!();
    println!("Commands:");
    println!("  /help, /h, /?          - Show this help");
    println!("  /memory, /m            - Show conversation memory");
    println!("  /screen [name[=json]]  - Set or clear the current screen");
    println!("  /reset                 - Forget this conversation");
    println!("  /quit, /exit, /q       - Exit chat");
    println!();
}

pub async fn run(assistant: &Assistant, show_memory: bool) -> Result<()> {
    let mut editor = line_editor();
    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic("you".to_string()),
        DefaultPromptSegment::Empty,
    );

    println!();
    println!("{} (session {})", "droidmind".bold(), assistant.session_id());
    print_help();

    loop {
        match editor.read_line(&prompt)? {
            Signal::Success(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                if line.starts_with('/') {
                    match parse_command(line) {
                        Command::Quit => {
                            println!("Bye!");
                            break;
                        }
                        Command::Help => print_help(),
                        Command::Memory => {
                            let (memory, summaries) = assistant.memory_snapshot().await;
                            output::print_memory(&memory, summaries);
                        }
                        Command::Reset => {
                            assistant.reset();
                            println!("Conversation cleared.");
                        }
                        Command::Screen(None) => assistant.set_screen(None).await,
                        Command::Screen(Some(raw)) => match parse_screen(raw) {
                            Ok(screen) => assistant.set_screen(Some(screen)).await,
                            Err(e) => eprintln!("{} {:#}", "error:".red(), e),
                        },
                        Command::Unknown(cmd) => {
                            println!("Unknown command: {}", cmd);
                            println!("Type /help for available commands");
                        }
                    }
                    continue;
                }

                let answer = assistant.ask(line).await;
                output::print_answer(&answer);
                if show_memory {
                    let (memory, summaries) = assistant.memory_snapshot().await;
                    output::print_memory(&memory, summaries);
                }
            }
            Signal::CtrlC => continue,
            Signal::CtrlD => {
                println!("Bye!");
                break;
            }
        }
    }

    Ok(())
}
