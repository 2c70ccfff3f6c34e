pub mod chat;
pub mod cli;
pub mod portal;
