use sonnet_types::TokenizedLine;

/// Characters that make up a word token: letters, digits, apostrophes and
/// hyphens.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '\'' || c == '-'
}

/// Split line text into word tokens, treating every other character as a
/// separator. Case and apostrophes are left untouched.
pub fn tokenize(text: &str) -> TokenizedLine {
    text.split(|c: char| !is_word_char(c))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_punctuation_and_whitespace() {
        assert_eq!(
            tokenize("Shall I compare thee to a summer's day?"),
            vec!["Shall", "I", "compare", "thee", "to", "a", "summer's", "day"]
        );
    }

    #[test]
    fn keeps_hyphens_and_edge_apostrophes() {
        assert_eq!(
            tokenize("'Tis self-substantial fuel,--and thou'"),
            vec!["'Tis", "self-substantial", "fuel", "--and", "thou'"]
        );
    }

    #[test]
    fn digits_are_word_characters() {
        assert_eq!(tokenize("CXXVI 126."), vec!["CXXVI", "126"]);
    }

    #[test]
    fn empty_and_punctuation_only_lines() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ,;: ! ").is_empty());
    }
}
