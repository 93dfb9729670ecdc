//! Terminal rendering of submission outcomes.

use std::io::IsTerminal;
use std::sync::OnceLock;

use codepal_core::{
    build_prompt, prompt_word_count, FailureKind, Mode, Outcome, RenderStyle,
    CODE_FENCE_LANGUAGE, CODE_FILE_EXTENSION, MAX_CHARS,
};
use colored::Colorize;
use serde::Serialize;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};

/// Highlighting assets, loaded once.
struct HighlightAssets {
    syntax_set: SyntaxSet,
    theme: Option<Theme>,
}

fn highlight_assets() -> &'static HighlightAssets {
    static ASSETS: OnceLock<HighlightAssets> = OnceLock::new();
    ASSETS.get_or_init(|| {
        let syntax_set = SyntaxSet::load_defaults_newlines();
        let mut theme_set = ThemeSet::load_defaults();
        let theme = theme_set
            .themes
            .remove("base16-eighties.dark")
            .or_else(|| theme_set.themes.into_values().next());
        HighlightAssets { syntax_set, theme }
    })
}

/// Highlight `code` for a 24-bit terminal.
///
/// Returns the code unchanged when no syntax or theme matches.
pub(crate) fn highlight_code(code: &str, lang: &str) -> String {
    let assets = highlight_assets();
    let syntax = assets
        .syntax_set
        .find_syntax_by_token(lang)
        .or_else(|| {
            (lang == CODE_FENCE_LANGUAGE)
                .then(|| assets.syntax_set.find_syntax_by_extension(CODE_FILE_EXTENSION))
                .flatten()
        });

    let (Some(syntax), Some(theme)) = (syntax, assets.theme.as_ref()) else {
        return code.to_string();
    };

    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut out = String::with_capacity(code.len() * 2);
    for line in LinesWithEndings::from(code) {
        match highlighter.highlight_line(line, &assets.syntax_set) {
            Ok(ranges) => out.push_str(&as_24_bit_terminal_escaped(&ranges, false)),
            Err(_) => return code.to_string(),
        }
    }
    out.push_str("\x1b[0m");
    out
}

/// Approximate prompt size in words, only for input that passes validation.
pub(crate) fn prompt_estimate(mode: Mode, text: &str) -> Option<usize> {
    if text.trim().is_empty() || text.chars().count() > MAX_CHARS {
        return None;
    }
    Some(prompt_word_count(&build_prompt(mode, text)))
}

/// Print a response the way its mode asks for.
pub(crate) fn print_response(mode: Mode, response: &str) {
    match mode.render_style() {
        RenderStyle::Prose => println!("{}", response),
        RenderStyle::Code => {
            println!("{}", format!("```{}", CODE_FENCE_LANGUAGE).bright_black());
            if std::io::stdout().is_terminal() {
                println!("{}", highlight_code(response, CODE_FENCE_LANGUAGE));
            } else {
                println!("{}", response);
            }
            println!("{}", "```".bright_black());
        }
    }
}

/// Print an outcome: warning, response with timing, or error.
pub(crate) fn print_outcome(mode: Mode, outcome: &Outcome) {
    match outcome {
        Outcome::Rejected(reason) => {
            println!("{}", format!("Warning: {}", reason).yellow());
        }
        Outcome::Success { response, elapsed } => {
            println!("{}", "Response:".green().bold());
            println!();
            print_response(mode, response);
            println!();
            println!(
                "{}",
                format!("Answered in {:.2} seconds.", elapsed.as_secs_f64())
                    .bright_black()
                    .italic()
            );
        }
        Outcome::Failed { .. } => {
            if let Some(message) = outcome.message() {
                eprintln!("{}", format!("Error: {}", message).red());
            }
            if let Some(diagnostic) = outcome.diagnostic() {
                eprintln!("{}", diagnostic.bright_black());
            }
        }
    }
}

/// Machine-readable form of an outcome.
#[derive(Debug, Serialize)]
pub(crate) struct OutcomeReport<'a> {
    status: &'static str,
    mode: Mode,
    render: RenderStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    response: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    elapsed_secs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<FailureKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagnostic: Option<&'a str>,
}

impl<'a> OutcomeReport<'a> {
    pub(crate) fn new(mode: Mode, outcome: &'a Outcome) -> Self {
        let (status, response, kind) = match outcome {
            Outcome::Rejected(_) => ("rejected", None, None),
            Outcome::Success { response, .. } => ("success", Some(response.as_str()), None),
            Outcome::Failed { kind, .. } => ("failed", None, Some(*kind)),
        };

        Self {
            status,
            mode,
            render: mode.render_style(),
            response,
            elapsed_secs: outcome.elapsed_secs(),
            kind,
            message: outcome.message(),
            diagnostic: outcome.diagnostic(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codepal_core::RejectReason;
    use std::time::Duration;

    #[test]
    fn test_highlight_csharp_adds_escapes() {
        let code = "public class Foo { int x = 1; }";
        let highlighted = highlight_code(code, CODE_FENCE_LANGUAGE);
        assert!(highlighted.contains("\x1b["));
        assert!(highlighted.contains("Foo"));
    }

    #[test]
    fn test_highlight_unknown_language_is_plain() {
        let code = "whatever this is";
        assert_eq!(highlight_code(code, "no-such-language"), code);
    }

    #[test]
    fn test_prompt_estimate_only_for_valid_input() {
        assert_eq!(prompt_estimate(Mode::Question, "how do I sort?"), Some(4));
        assert_eq!(prompt_estimate(Mode::Explain, "int x = 1;"), Some(11));
        assert_eq!(prompt_estimate(Mode::Explain, "  \n"), None);
        assert_eq!(prompt_estimate(Mode::Question, &"a".repeat(MAX_CHARS + 1)), None);
        assert_eq!(prompt_estimate(Mode::Question, &"a".repeat(MAX_CHARS)), Some(1));
    }

    #[test]
    fn test_report_success() {
        let outcome = Outcome::Success {
            response: "fixed".to_string(),
            elapsed: Duration::from_millis(1234),
        };
        let json = serde_json::to_value(OutcomeReport::new(Mode::Review, &outcome)).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["mode"], "review");
        assert_eq!(json["render"], "code");
        assert_eq!(json["response"], "fixed");
        assert!((json["elapsed_secs"].as_f64().unwrap() - 1.234).abs() < 1e-9);
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_report_rejected() {
        let outcome = Outcome::Rejected(RejectReason::EmptyInput);
        let json = serde_json::to_value(OutcomeReport::new(Mode::Explain, &outcome)).unwrap();

        assert_eq!(json["status"], "rejected");
        assert_eq!(
            json["message"],
            "Please provide a valid code snippet or question."
        );
        assert!(json.get("response").is_none());
    }

    #[test]
    fn test_report_failed() {
        let outcome = Outcome::Failed {
            kind: FailureKind::Unexpected,
            detail: "HTTP error: boom".to_string(),
        };
        let json = serde_json::to_value(OutcomeReport::new(Mode::Question, &outcome)).unwrap();

        assert_eq!(json["status"], "failed");
        assert_eq!(json["kind"], "unexpected");
        assert_eq!(json["diagnostic"], "HTTP error: boom");
    }
}
