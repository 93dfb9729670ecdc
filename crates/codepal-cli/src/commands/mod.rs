//! CLI commands.

pub mod ask;
pub mod chat;
pub mod check;
pub mod info;
