//! Knowledge sources for the secondary tier

mod http;

pub use http::HttpKnowledgeSource;
