//! Short code generation.

use rand::{Rng, distr::Alphanumeric};

/// Number of characters in a generated short code.
///
/// 62^8 is about 2*10^14 combinations, so collisions are accepted as
/// negligible at expected scale and no uniqueness check is performed at
/// generation time. A colliding write surfaces as a unique-constraint
/// violation in PostgreSQL or overwrites a guest entry in Redis.
pub const CODE_LENGTH: usize = 8;

/// Generates a random 8-character alphanumeric short code.
///
/// Draws uniformly from `[A-Za-z0-9]` using a non-cryptographic thread-local
/// generator. Codes carry no secret, so a CSPRNG is not required here.
pub fn generate_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(CODE_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        assert_eq!(generate_code().len(), CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_is_alphanumeric() {
        let code = generate_code();
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let mut codes = HashSet::new();

        for _ in 0..1000 {
            codes.insert(generate_code());
        }

        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_generate_code_uses_full_alphabet() {
        // 200 codes of 8 chars should hit lowercase, uppercase and digits.
        let sample: String = (0..200).map(|_| generate_code()).collect();

        assert!(sample.chars().any(|c| c.is_ascii_lowercase()));
        assert!(sample.chars().any(|c| c.is_ascii_uppercase()));
        assert!(sample.chars().any(|c| c.is_ascii_digit()));
    }
}
