//! Assistant modes.
//!
//! Every mode owns both its prompt instruction and the way its response is
//! rendered, so the two cannot drift apart.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Language tag used for the fenced block in prompts and for highlighting.
pub const CODE_FENCE_LANGUAGE: &str = "csharp";

/// File extension syntax highlighters know the fence language by.
pub const CODE_FILE_EXTENSION: &str = "cs";

/// How a response should be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderStyle {
    /// Free-form formatted text
    Prose,
    /// Syntax-highlighted code block in [`CODE_FENCE_LANGUAGE`]
    Code,
}

/// What the user wants done with their input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Explain,
    Review,
    Refactor,
    Question,
}

/// Per-mode behavior, kept in one place.
struct ModeSpec {
    name: &'static str,
    label: &'static str,
    instruction: Option<&'static str>,
    render: RenderStyle,
}

impl Mode {
    /// All modes, in display order.
    pub const ALL: [Mode; 4] = [Mode::Explain, Mode::Review, Mode::Refactor, Mode::Question];

    fn spec(self) -> ModeSpec {
        match self {
            Mode::Explain => ModeSpec {
                name: "explain",
                label: "Explain code",
                instruction: Some("Please explain the following code"),
                render: RenderStyle::Prose,
            },
            Mode::Review => ModeSpec {
                name: "review",
                label: "Review code for bugs",
                instruction: Some(
                    "Please review the following code and identify any bugs or issues",
                ),
                render: RenderStyle::Code,
            },
            Mode::Refactor => ModeSpec {
                name: "refactor",
                label: "Improve or refactor code",
                instruction: Some(
                    "Refactor or improve this code for better readability and performance",
                ),
                render: RenderStyle::Code,
            },
            Mode::Question => ModeSpec {
                name: "ask",
                label: "Ask general coding question",
                instruction: None,
                render: RenderStyle::Prose,
            },
        }
    }

    /// Short name used on the command line.
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        self.spec().label
    }

    /// Instruction placed before the fenced input, if the mode wraps it.
    pub fn instruction(self) -> Option<&'static str> {
        self.spec().instruction
    }

    /// How responses for this mode are displayed.
    pub fn render_style(self) -> RenderStyle {
        self.spec().render
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for an unrecognized mode name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mode '{0}' (expected one of: explain, review, refactor, ask)")]
pub struct ParseModeError(pub String);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "explain" => Ok(Mode::Explain),
            "review" => Ok(Mode::Review),
            "refactor" | "improve" => Ok(Mode::Refactor),
            "ask" | "question" => Ok(Mode::Question),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}
