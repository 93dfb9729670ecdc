//! Submission handling: validate, build the prompt, call the model, classify.

use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::client::{FailureKind, ModelClient};
use crate::mode::Mode;
use crate::prompt::{build_prompt, prompt_word_count};
use crate::MAX_CHARS;

/// Why a submission was refused before reaching the model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("Please provide a valid code snippet or question.")]
    EmptyInput,
    #[error("Input is too long. Please limit to {max} characters.")]
    TooLong { len: usize, max: usize },
}

/// Result of a single submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Input failed validation; the model was not called.
    Rejected(RejectReason),
    /// The model answered.
    Success { response: String, elapsed: Duration },
    /// The model call failed.
    Failed { kind: FailureKind, detail: String },
}

impl Outcome {
    /// Elapsed model time in seconds, for successful outcomes.
    pub fn elapsed_secs(&self) -> Option<f64> {
        match self {
            Outcome::Success { elapsed, .. } => Some(elapsed.as_secs_f64()),
            _ => None,
        }
    }

    /// Message to show the user for a rejected or failed submission.
    pub fn message(&self) -> Option<String> {
        match self {
            Outcome::Rejected(reason) => Some(reason.to_string()),
            Outcome::Success { .. } => None,
            Outcome::Failed { kind, detail } => Some(match kind {
                FailureKind::Connectivity => "Failed to connect to the model server. \
                     Please check if the LLM is running locally."
                    .to_string(),
                FailureKind::InvalidInput => {
                    format!("Invalid input or model configuration: {}", detail)
                }
                FailureKind::Unexpected => {
                    "An unexpected error occurred during model inference.".to_string()
                }
            }),
        }
    }

    /// Raw diagnostic shown alongside the message for unclassified failures.
    pub fn diagnostic(&self) -> Option<&str> {
        match self {
            Outcome::Failed {
                kind: FailureKind::Unexpected,
                detail,
            } => Some(detail.as_str()),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

/// Handle one submission of `text` in `mode`.
///
/// Empty or over-long input is rejected without calling the model. Otherwise
/// the prompt is sent once, with no retry, and the result is classified.
pub async fn handle_submit<C>(client: &C, mode: Mode, text: &str) -> Outcome
where
    C: ModelClient + ?Sized,
{
    if text.trim().is_empty() {
        warn!("Rejected submission: empty input");
        return Outcome::Rejected(RejectReason::EmptyInput);
    }

    let len = text.chars().count();
    if len > MAX_CHARS {
        warn!("Rejected submission: {} characters (max {})", len, MAX_CHARS);
        return Outcome::Rejected(RejectReason::TooLong {
            len,
            max: MAX_CHARS,
        });
    }

    let prompt = build_prompt(mode, text);
    info!(
        "Submitting {} request to {} ({} words)",
        mode.name(),
        client.model(),
        prompt_word_count(&prompt)
    );

    let start = Instant::now();
    let result = client.generate(&prompt).await;
    let elapsed = start.elapsed();

    match result {
        Ok(response) => {
            debug!(
                "Model answered in {:.2}s ({} chars)",
                elapsed.as_secs_f64(),
                response.len()
            );
            Outcome::Success { response, elapsed }
        }
        Err(e) => {
            error!("Model call failed after {:.2}s: {}", elapsed.as_secs_f64(), e);
            Outcome::Failed {
                kind: e.kind(),
                detail: e.to_string(),
            }
        }
    }
}
