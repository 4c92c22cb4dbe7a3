pub mod filename;
pub mod url_validator;

/// 短码字符集 [A-Za-z0-9]
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// 短码最大长度（与 links.short_code 列宽一致）
pub const MAX_CODE_LENGTH: usize = 32;

/// 从给定字符集中独立均匀地抽取 `length` 个字符
pub fn generate_code_from(alphabet: &[u8], length: usize) -> String {
    use std::iter;

    iter::repeat_with(|| alphabet[rand::random_range(0..alphabet.len())] as char)
        .take(length)
        .collect()
}

/// 短码格式校验：只允许 ASCII 字母数字，长度 1..=32
pub fn is_valid_short_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_CODE_LENGTH
        && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_code_length_and_alphabet() {
        for len in [1, 6, 12] {
            let code = generate_code_from(CODE_ALPHABET, len);
            assert_eq!(code.len(), len);
            assert!(code.bytes().all(|b| CODE_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_alphabet_is_62_unique_chars() {
        let unique: std::collections::HashSet<u8> = CODE_ALPHABET.iter().copied().collect();
        assert_eq!(unique.len(), 62);
    }

    #[test]
    fn test_generate_code_from_custom_alphabet() {
        let code = generate_code_from(b"ab", 32);
        assert!(code.chars().all(|c| c == 'a' || c == 'b'));
    }

    #[test]
    fn test_is_valid_short_code() {
        assert!(is_valid_short_code("aB3xY9"));
        assert!(!is_valid_short_code(""));
        assert!(!is_valid_short_code("../etc"));
        assert!(!is_valid_short_code("has space"));
        assert!(!is_valid_short_code(&"a".repeat(33)));
    }
}
