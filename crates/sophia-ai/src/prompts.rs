//! Prompt templates and response post-processing.

use sophia_core::tags::normalize_tags;

/// Most tags kept from a suggestion.
pub const MAX_SUGGESTED_TAGS: usize = 5;

#[must_use]
pub fn code_generation(prompt: &str) -> String {
    format!(
        "You are a code generation expert. \
         Based on the following prompt, generate only the code block requested. \
         Do not include any explanation, preamble, or markdown formatting. \
         Just return the raw code.\n\n\
         PROMPT: \"{prompt}\""
    )
}

#[must_use]
pub fn code_explanation(code: &str) -> String {
    format!(
        "You are a code explanation expert. Provide a detailed, \
         line-by-line explanation of the following code. \
         Use Markdown for formatting, including bullet points and bold text. \
         Do not wrap the entire response in a code block.\n\n\
         CODE:\n```\n{code}\n```"
    )
}

#[must_use]
pub fn tag_suggestion(code: &str) -> String {
    format!(
        "You are a code analysis expert. Analyze the following code and generate a \
         comma-separated list of 3 to 5 relevant, lowercase tags. \
         Do not include any explanation, markdown, or other text. \
         Example output: python,flask,sqlalchemy,database\n\n\
         CODE:\n```\n{code}\n```"
    )
}

/// Trim model output and remove a Markdown fence wrapping all of it.
///
/// The model is asked for raw code but sometimes answers with
/// ```` ```python ... ``` ````. Fences inside the text are left alone.
#[must_use]
pub fn strip_code_fence(text: &str) -> String {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed.to_string();
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed.to_string();
    };
    // The opening line may carry a language hint.
    let body = body.split_once('\n').map_or(body, |(_, code)| code);
    body.trim().to_string()
}

/// Turn a comma-separated suggestion into at most five normalised tags.
#[must_use]
pub fn parse_tags(text: &str) -> Vec<String> {
    let mut tags = normalize_tags(&strip_code_fence(text).replace('\n', ","));
    tags.truncate(MAX_SUGGESTED_TAGS);
    tags
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn generation_prompt_quotes_request() {
        let prompt = code_generation("reverse a linked list");
        assert!(prompt.starts_with("You are a code generation expert. "));
        assert!(prompt.contains("Just return the raw code.\n\n"));
        assert!(prompt.ends_with("PROMPT: \"reverse a linked list\""));
    }

    #[test]
    fn explanation_prompt_fences_code() {
        let prompt = code_explanation("x = 1");
        assert!(prompt.contains("line-by-line"));
        assert!(prompt.ends_with("CODE:\n```\nx = 1\n```"));
    }

    #[test]
    fn strips_fence_with_language_hint() {
        let text = "\n```python\ndef f():\n    return 1\n```\n";
        assert_eq!(strip_code_fence(text), "def f():\n    return 1");
    }

    #[test]
    fn strips_bare_fence() {
        assert_eq!(strip_code_fence("```\nSELECT 1;\n```"), "SELECT 1;");
    }

    #[test]
    fn leaves_unfenced_text() {
        assert_eq!(strip_code_fence("  print('hi')  "), "print('hi')");
    }

    #[test]
    fn leaves_inner_fences() {
        let text = "Use this:\n```\ncode\n```";
        assert_eq!(strip_code_fence(text), text);
    }

    #[test]
    fn parses_and_caps_tags() {
        assert_eq!(
            parse_tags("Python, Flask,sqlalchemy,database,orm,web"),
            vec!["python", "flask", "sqlalchemy", "database", "orm"]
        );
    }

    #[test]
    fn parses_newline_separated_tags() {
        assert_eq!(parse_tags("rust\nasync\n"), vec!["rust", "async"]);
    }
}
