//! Console rendering

use colored::Colorize;
use droidmind_domain::{ConversationMemory, Role, truncate};

pub fn print_answer(answer: &str) {
    println!();
    println!("{} {}", "droidmind>".green().bold(), answer);
    println!();
}

pub fn format_memory(memory: &ConversationMemory, llm_summaries: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "── memory ──".dimmed()));
    out.push_str(&format!(
        "window: {} messages, archived: {}, model summaries: {}\n",
        memory.running_messages.len(),
        memory.old_messages.len(),
        llm_summaries
    ));
    match &memory.summary {
        Some(summary) => out.push_str(&format!("summary: {}\n", summary.italic())),
        None => out.push_str("summary: (none)\n"),
    }
    for message in &memory.running_messages {
        let role = match message.role {
            Role::User => message.role.as_str().cyan(),
            Role::Assistant => message.role.as_str().green(),
            _ => message.role.as_str().dimmed(),
        };
        out.push_str(&format!("  {:>9}: {}\n", role, truncate(&message.content, 120)));
    }
    out
}

pub fn print_memory(memory: &ConversationMemory, llm_summaries: usize) {
    print!("{}", format_memory(memory, llm_summaries));
    println!();
}
