//! Token substitution applied to refined responses.
//!
//! The rewriter is pure string work: wherever a refined answer contains one
//! of the possessive tokens `your`, `Your`, `you're` or `You're`, the token
//! is replaced with the fixed Firebox product description. Matching is
//! substring-based and case-sensitive, not word-boundary based, so tokens
//! inside larger words are replaced too (`"yours"` becomes the description
//! followed by `"s"`). That is the shipped behavior and callers rely on it.

/// Fixed product description substituted for possessive tokens.
pub const FIREBOX_DESCRIPTION: &str = "Firebox AI, created by Kushagra Srivastava, \
    is a cutting-edge AI assistant designed to provide smart, insightful, and \
    highly adaptive responses.";

/// Literal tokens replaced by [`replace_possessives`], in replacement order.
const POSSESSIVE_TOKENS: [&str; 4] = ["your", "Your", "you're", "You're"];

/// Replaces every occurrence of the possessive tokens with the Firebox
/// description.
///
/// Substitution is unconditional wherever the token substring occurs,
/// including inside unrelated words.
pub fn replace_possessives(text: &str) -> String {
    POSSESSIVE_TOKENS
        .iter()
        .fold(text.to_string(), |acc, token| {
            acc.replace(token, FIREBOX_DESCRIPTION)
        })
}

/// Builds the default rewrite instruction embedding the original response.
///
/// Used by the refinement pass when the caller supplies no custom prompt.
pub fn default_refine_prompt(response: &str) -> String {
    format!(
        "Rewrite the following response in a more informative, empathetic, and structured way. \
         More General and Welcoming, Slightly More Formal. \
         If the input contains 'your' or 'you're', replace them with: \
         '{FIREBOX_DESCRIPTION}'\n\nOriginal Response:\n{response}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_each_token_variant() {
        for token in ["your", "Your", "you're", "You're"] {
            let rewritten = replace_possessives(&format!("Well, {} call.", token));
            assert_eq!(
                rewritten,
                format!("Well, {} call.", FIREBOX_DESCRIPTION)
            );
        }
    }

    #[test]
    fn substitutes_inside_sentence() {
        let rewritten = replace_possessives("Hey, is this your book?");
        assert_eq!(
            rewritten,
            format!("Hey, is this {} book?", FIREBOX_DESCRIPTION)
        );
    }

    #[test]
    fn substring_semantics_hit_compound_words() {
        // Deliberate: matching is substring-based, not word-boundary based.
        assert_eq!(
            replace_possessives("yours"),
            format!("{}s", FIREBOX_DESCRIPTION)
        );
        assert_eq!(
            replace_possessives("Yourself"),
            format!("{}self", FIREBOX_DESCRIPTION)
        );
    }

    #[test]
    fn case_sensitive_tokens_only() {
        // "YOUR" matches none of the four literal tokens.
        assert_eq!(replace_possessives("YOUR move"), "YOUR move");
    }

    #[test]
    fn text_without_tokens_is_unchanged() {
        let text = "Nothing possessive here.";
        assert_eq!(replace_possessives(text), text);
    }

    #[test]
    fn default_prompt_embeds_original_and_description() {
        let prompt = default_refine_prompt("The sky is blue.");
        assert!(prompt.contains(FIREBOX_DESCRIPTION));
        assert!(prompt.ends_with("Original Response:\nThe sky is blue."));
    }
}
