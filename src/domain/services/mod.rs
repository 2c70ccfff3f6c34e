mod chat_store;
mod query_gateway;
mod wait;

pub use chat_store::*;
pub use query_gateway::*;
pub use wait::*;
