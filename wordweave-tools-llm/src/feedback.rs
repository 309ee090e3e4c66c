//! Appends retry feedback to a base prompt, grounded on
//! `base_tool.py`'s `add_quality_feedback_to_prompt`.

/// Extend `prompt` with the fixed quality requirements for this tool, plus
/// whatever feedback the previous attempt's quality gate produced.
pub fn with_feedback(mut prompt: String, requirements: &[&str], quality_feedback: Option<&str>, previous_issues: &[String], suggestions: &[String]) -> String {
    if !requirements.is_empty() {
        prompt.push_str("\n\nQuality requirements:\n");
        for requirement in requirements {
            prompt.push_str(&format!("- {requirement}\n"));
        }
    }

    if let Some(feedback) = quality_feedback {
        prompt.push_str(&format!("\nPrevious attempt feedback: {feedback}\n"));
    }
    if !previous_issues.is_empty() {
        prompt.push_str(&format!("Previous issues: {}\n", previous_issues.join("; ")));
    }
    if !suggestions.is_empty() {
        prompt.push_str(&format!("Suggestions to address: {}\n", suggestions.join("; ")));
    }

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_feedback_leaves_only_requirements() {
        let prompt = with_feedback("base".to_string(), &["be concise"], None, &[], &[]);
        assert!(prompt.contains("be concise"));
        assert!(!prompt.contains("Previous"));
    }

    #[test]
    fn feedback_sections_are_appended_in_order() {
        let prompt = with_feedback(
            "base".to_string(),
            &[],
            Some("too verbose"),
            &["missing article".to_string()],
            &["shorten".to_string()],
        );
        assert!(prompt.contains("too verbose"));
        assert!(prompt.contains("missing article"));
        assert!(prompt.contains("shorten"));
    }
}
