//! Application layer for droidmind
//!
//! Use cases (tiers, tool invocation, memory compaction), the ports they
//! consume, sessions and context injection. Depends only on the domain layer.

pub mod cache;
pub mod config;
pub mod context;
pub mod ports;
pub mod session;
pub mod use_cases;

// Re-export commonly used types
pub use cache::{CacheConfig, CacheEntry, ToolResultCache};
pub use config::ExecutionParams;
pub use context::{
    ContextInjector, GreetingInjector, InjectedContext, RecallInjector, ScreenContextInjector,
    SummaryInjector, default_injectors,
};
pub use ports::{
    context_retriever::{ContextRetrieverPort, RetrieverError},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    knowledge::{KnowledgeError, KnowledgePort, NoKnowledge},
    llm_gateway::{GatewayError, LlmGateway},
    summarizer::{SummarizerError, SummarizerPort},
    tool_executor::ToolExecutorPort,
    tool_schema::ToolSchemaPort,
};
pub use session::{Session, SessionStore};
pub use use_cases::agent::{Agent, AgentError};
pub use use_cases::compact_memory::{CompactionReport, MemoryCompactor};
pub use use_cases::fallback_agents::{EmergencyAgent, KnowledgeAgent};
pub use use_cases::run_agent::ToolCallingAgent;
pub use use_cases::supervisor::FallbackSupervisor;
pub use use_cases::tool_invoker::{InvokeError, ToolInvoker, augment_with_complements};
