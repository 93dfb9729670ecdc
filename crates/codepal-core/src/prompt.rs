//! Prompt construction.

use crate::mode::{Mode, CODE_FENCE_LANGUAGE};

/// Build the exact string sent to the model for `mode` and `text`.
///
/// Wrapping modes place `text` verbatim inside a fenced block after the mode's
/// instruction. Fence delimiters inside `text` are not escaped.
pub fn build_prompt(mode: Mode, text: &str) -> String {
    match mode.instruction() {
        Some(instruction) => {
            format!("{instruction}:\n```{CODE_FENCE_LANGUAGE}\n{text}\n```")
        }
        None => text.to_string(),
    }
}

/// Whitespace-separated word count, used as a rough token estimate.
pub fn prompt_word_count(prompt: &str) -> usize {
    prompt.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explain_prompt() {
        let prompt = build_prompt(Mode::Explain, "int x = 1;");
        assert_eq!(
            prompt,
            "Please explain the following code:\n```csharp\nint x = 1;\n```"
        );
    }

    #[test]
    fn test_question_is_identity() {
        let text = "How do I reverse a list?\n```csharp\nfoo\n```";
        assert_eq!(build_prompt(Mode::Question, text), text);
        assert_eq!(build_prompt(Mode::Question, ""), "");
    }

    #[test]
    fn test_wrapping_modes_contain_text_between_fences() {
        let text = "var a = new List<int>();\n  a.Add(1);  ";
        for mode in [Mode::Explain, Mode::Review, Mode::Refactor] {
            let prompt = build_prompt(mode, text);
            let open = format!("```{CODE_FENCE_LANGUAGE}\n");
            let start = prompt.find(&open).unwrap() + open.len();
            let end = prompt.rfind("\n```").unwrap();
            assert_eq!(&prompt[start..end], text);
            assert!(prompt.starts_with(mode.instruction().unwrap()));
        }
    }

    #[test]
    fn test_embedded_fences_pass_through() {
        let text = "```\nnot escaped\n```";
        let prompt = build_prompt(Mode::Review, text);
        assert!(prompt.contains(text));
    }

    #[test]
    fn test_build_prompt_deterministic() {
        for mode in Mode::ALL {
            assert_eq!(build_prompt(mode, "x++;"), build_prompt(mode, "x++;"));
        }
    }

    #[test]
    fn test_word_count() {
        assert_eq!(prompt_word_count(""), 0);
        assert_eq!(prompt_word_count("  one two\nthree\t"), 3);
        assert_eq!(
            prompt_word_count(&build_prompt(Mode::Explain, "int x = 1;")),
            11
        );
    }
}
