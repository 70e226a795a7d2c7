//! Tokenizer shared by the reference table and queries.

/// Split text into lowercase tokens.
///
/// Any run of non-alphanumeric characters separates tokens, so `"fever,cough"`,
/// `"fever, cough"` and `"fever cough"` produce the same tokens.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_whitespace() {
        assert_eq!(
            tokenize("fever  cough\tsore\nthroat"),
            ["fever", "cough", "sore", "throat"]
        );
    }

    #[test]
    fn test_tokenize_case_and_punctuation() {
        assert_eq!(
            tokenize("Fever, COUGH; chest-pain!"),
            ["fever", "cough", "chest", "pain"]
        );
        assert_eq!(tokenize("Fever, COUGH"), tokenize("fever cough"));
        assert_eq!(tokenize("fever,cough,chest pain"), tokenize("fever cough chest pain"));
    }

    #[test]
    fn test_tokenize_blank() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t\n").is_empty());
        assert!(tokenize(", ; ...").is_empty());
    }

    #[test]
    fn test_tokenize_keeps_duplicates() {
        assert_eq!(tokenize("cough cough"), ["cough", "cough"]);
    }
}
