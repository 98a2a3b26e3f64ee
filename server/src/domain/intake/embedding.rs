//! Placeholder text embedding

/// Number of components in every embedding
pub const EMBEDDING_DIM: usize = 3;

/// Map text to `[char count, sum of code points mod 1000, 0.0]`
pub fn embed_text(text: &str) -> Vec<f64> {
    let (len, sum) = text
        .chars()
        .fold((0u64, 0u64), |(len, sum), c| (len + 1, sum + u64::from(c)));
    vec![len as f64, (sum % 1000) as f64, 0.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_ascii() {
        // 'a' + 'b' = 97 + 98
        assert_eq!(embed_text("ab"), vec![2.0, 195.0, 0.0]);
    }

    #[test]
    fn test_embed_counts_chars_not_bytes() {
        let v = embed_text("é");
        assert_eq!(v.len(), EMBEDDING_DIM);
        assert_eq!(v[0], 1.0);
        assert_eq!(v[1], 233.0);
    }

    #[test]
    fn test_embed_wraps_sum() {
        // 11 * 'z' = 11 * 122 = 1342
        assert_eq!(embed_text(&"z".repeat(11)), vec![11.0, 342.0, 0.0]);
        assert_eq!(embed_text(""), vec![0.0, 0.0, 0.0]);
    }
}
