//! MemoryCompactor - keeps a session's running window within its limits.
//!
//! At the end of every turn the turn's messages are appended to the window.
//! While the window is too long or too large, its older half is rendered as
//! plain text, folded into the rolling summary and archived.

use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::summarizer::SummarizerPort;
use droidmind_domain::memory::render::{render_for_summary, serialized_size};
use droidmind_domain::{ConversationMemory, MemoryLimits, Message, Role, truncate};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What one `finalize` call did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompactionReport {
    /// Batches folded into the summary
    pub batches: usize,
    /// Messages moved to the archive
    pub archived: usize,
    /// Batches compressed by the summarizer
    pub summarized: usize,
    /// Batches compressed by truncation
    pub truncated: usize,
}

impl CompactionReport {
    pub fn compacted(&self) -> bool {
        self.batches > 0
    }
}

/// First index at or after `mid` that does not start with a tool result,
/// so a tool call and its result always land on the same side.
fn pair_safe_split(window: &[Message], mid: usize) -> usize {
    let mut split = mid;
    while split < window.len() && window[split].role == Role::ToolResult {
        split += 1;
    }
    split
}

/// Owner of one session's [`ConversationMemory`].
pub struct MemoryCompactor {
    memory: ConversationMemory,
    limits: MemoryLimits,
    summarizer: Option<Arc<dyn SummarizerPort>>,
    logger: Arc<dyn ConversationLogger>,
    llm_summarization_count: usize,
}

impl MemoryCompactor {
    pub fn new(limits: MemoryLimits) -> Self {
        Self {
            memory: ConversationMemory::new(),
            limits,
            summarizer: None,
            logger: Arc::new(NoConversationLogger),
            llm_summarization_count: 0,
        }
    }

    pub fn with_summarizer(mut self, summarizer: Arc<dyn SummarizerPort>) -> Self {
        self.summarizer = Some(summarizer);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn memory(&self) -> &ConversationMemory {
        &self.memory
    }

    pub fn limits(&self) -> &MemoryLimits {
        &self.limits
    }

    /// Successful summarizer calls over the session's lifetime
    pub fn llm_summarization_count(&self) -> usize {
        self.llm_summarization_count
    }

    /// Record the user message of the turn in progress.
    pub fn begin_turn(&mut self, user_message: &str) {
        self.memory.last_user_message = Some(user_message.to_string());
    }

    /// Forget the turn in progress without recording anything.
    pub fn abandon_turn(&mut self) {
        self.memory.last_user_message = None;
    }

    /// Fold a finished turn into memory and restore the limits.
    pub async fn finalize(&mut self, turn_messages: Vec<Message>) -> CompactionReport {
        self.memory.running_messages.extend(turn_messages);
        self.memory.last_user_message = None;

        let mut report = CompactionReport::default();
        while self.limits.exceeded_by(&self.memory.running_messages) {
            let running = &mut self.memory.running_messages;
            let batch: Vec<Message> = match running.len() {
                0 => break,
                1 => std::mem::take(running),
                len => {
                    let split = pair_safe_split(running, len / 2);
                    running.drain(..split).collect()
                }
            };

            let rendered = render_for_summary(&batch);
            let combined = match self.memory.summary.take() {
                Some(previous) if !previous.is_empty() => format!("{previous}\n\n{rendered}"),
                _ => rendered,
            };
            let summary = self.compress(combined, &mut report).await;

            debug!(
                archived = batch.len(),
                summary_len = summary.len(),
                "Folded messages into summary"
            );
            report.batches += 1;
            report.archived += batch.len();
            self.memory.summary = Some(summary);
            self.memory.old_messages.extend(batch);
        }

        if report.compacted() {
            info!(
                batches = report.batches,
                archived = report.archived,
                window = self.memory.running_messages.len(),
                "Compacted conversation memory"
            );
            self.logger.log(ConversationEvent::new(
                "memory_compacted",
                json!({
                    "batches": report.batches,
                    "archived": report.archived,
                    "summarized": report.summarized,
                    "truncated": report.truncated,
                    "window": self.memory.running_messages.len(),
                    "window_size": serialized_size(&self.memory.running_messages),
                }),
            ));
        }
        report
    }

    /// Bring `text` within the summary target size.
    async fn compress(&mut self, text: String, report: &mut CompactionReport) -> String {
        let target = self.limits.summary_target_size;
        if text.len() <= target {
            return text;
        }

        if let Some(summarizer) = &self.summarizer {
            match summarizer.summarize(&text, target).await {
                Ok(summary) if !summary.trim().is_empty() => {
                    self.llm_summarization_count += 1;
                    report.summarized += 1;
                    return truncate(summary.trim(), target);
                }
                Ok(_) => warn!("Summarizer returned empty text, truncating instead"),
                Err(e) => warn!(error = %e, "Summarizer failed, truncating instead"),
            }
        }

        report.truncated += 1;
        truncate(&text, target)
    }
}
