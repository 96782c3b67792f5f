//! Port definitions (interfaces for external collaborators)
//!
//! The application layer drives these traits; adapters in the
//! infrastructure layer implement them.
//!
//! | Port | Consumed by | Required? |
//! |------|-------------|-----------|
//! | [`LlmGateway`](llm_gateway::LlmGateway) | primary and secondary tiers | yes |
//! | [`ToolExecutorPort`](tool_executor::ToolExecutorPort) | `ToolInvoker` | yes |
//! | [`ToolSchemaPort`](tool_schema::ToolSchemaPort) | primary tier | yes |
//! | [`SummarizerPort`](summarizer::SummarizerPort) | `MemoryCompactor` | no, truncates instead |
//! | [`KnowledgePort`](knowledge::KnowledgePort) | secondary tier | no |
//! | [`ContextRetrieverPort`](context_retriever::ContextRetrieverPort) | `RecallInjector` | no |
//! | [`ConversationLogger`](conversation_logger::ConversationLogger) | supervisor, invoker | no |

pub mod context_retriever;
pub mod conversation_logger;
pub mod knowledge;
pub mod llm_gateway;
pub mod summarizer;
pub mod tool_executor;
pub mod tool_schema;
