//! Tool backends
//!
//! Every configured tool is served by a [`ToolHandler`] registered in the
//! [`ToolRegistry`]:
//! - `http`: POSTs the call's arguments to an endpoint
//! - `fixed`: answers with a payload from the configuration

pub mod fixed;
pub mod http;
mod registry;
mod schema;

pub use fixed::StaticToolHandler;
pub use http::HttpToolHandler;
pub use registry::{RegistryError, ToolHandler, ToolRegistry, ToolRegistryBuilder};
pub use schema::JsonSchemaToolConverter;
