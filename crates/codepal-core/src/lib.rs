//! # Codepal Core
//!
//! This crate turns a user's code snippet or question into a prompt, sends it
//! to a locally hosted model and classifies the outcome for display.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌─────────────────┐     ┌─────────────────┐
//! │  Mode + Text    │ --> │ Submission      │ --> │    Outcome      │
//! │  (from the UI)  │     │ Handler         │     │ (for the UI)    │
//! └─────────────────┘     └─────────────────┘     └─────────────────┘
//!                               │
//!                         ┌─────┴─────┐
//!                         │  Ollama   │
//!                         │  client   │
//!                         └───────────┘
//! ```
//!
//! The core keeps no state between submissions. The only shared object is the
//! model client returned by [`get_client`], which is built once per process.
//!
//! ## Usage
//!
//! ```ignore
//! use codepal_core::{get_client, handle_submit, Mode};
//!
//! let client = get_client()?;
//! let outcome = handle_submit(client, Mode::Explain, "int x = 1;").await;
//! ```

mod client;
mod config;
mod factory;
mod mode;
mod ollama;
mod prompt;
mod submit;

pub use client::{FailureKind, ModelClient, ModelError};
pub use config::{AssistConfig, AssistConfigBuilder, GenerationParams};
pub use factory::get_client;
pub use mode::{Mode, ParseModeError, RenderStyle, CODE_FENCE_LANGUAGE, CODE_FILE_EXTENSION};
pub use ollama::{OllamaClient, DEFAULT_MODEL, DEFAULT_OLLAMA_URL};
pub use prompt::{build_prompt, prompt_word_count};
pub use submit::{handle_submit, Outcome, RejectReason};

/// Maximum number of characters accepted in a single submission.
pub const MAX_CHARS: usize = 5000;
