//! Prompt construction for the chat backends

/// Instruction restricting the model to the bare translation
pub fn instruction(target_lang: &str) -> String {
    format!(
        "You are a helpful translator. \
         However, only the translation result should be output. \
         Code blocks or phrases like \"Here is the translation result:\" \
         should not be included. \
         Please translate into {}.",
        target_lang
    )
}

/// Single-message prompt for backends without a system role in the request
pub fn inline_prompt(text: &str, target_lang: &str) -> String {
    format!(
        "{}\n\nSource Sentence: {}\nTarget Sentence: ",
        instruction(target_lang),
        text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction() {
        assert_eq!(
            instruction("Japanese"),
            "You are a helpful translator. However, only the translation result should be output. \
             Code blocks or phrases like \"Here is the translation result:\" should not be included. \
             Please translate into Japanese."
        );
    }

    #[test]
    fn test_inline_prompt_layout() {
        let prompt = inline_prompt("This is a pen.", "Japanese");
        assert!(prompt.starts_with(&instruction("Japanese")));
        assert!(prompt.contains("\n\nSource Sentence: This is a pen.\n"));
        assert!(prompt.ends_with("Target Sentence: "));
    }
}
