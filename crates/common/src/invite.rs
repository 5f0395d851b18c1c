//! Invite-code generation utilities.

use rand::Rng;

/// Alphabet for invite codes. Uppercase letters and digits, minus the
/// easily-confused `0/O` and `1/I` pairs.
const INVITE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Length of a group invite code.
pub const INVITE_CODE_LEN: usize = 6;

/// Generator for group invite codes.
///
/// Codes are not globally unique by construction; callers must check the
/// generated code against existing groups and regenerate on collision.
#[derive(Debug, Clone, Default)]
pub struct InviteCodeGenerator {
    _private: (),
}

impl InviteCodeGenerator {
    /// Create a new invite-code generator.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Generate a 6-character uppercase-alphanumeric invite code.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..INVITE_CODE_LEN)
            .map(|_| {
                let idx = rng.gen_range(0..INVITE_ALPHABET.len());
                INVITE_ALPHABET[idx] as char
            })
            .collect()
    }
}

/// Check whether a string is shaped like an invite code.
#[must_use]
pub fn is_valid_code(code: &str) -> bool {
    code.len() == INVITE_CODE_LEN
        && code.bytes().all(|b| INVITE_ALPHABET.contains(&b))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_length_and_alphabet() {
        let codes = InviteCodeGenerator::new();
        for _ in 0..100 {
            let code = codes.generate();
            assert_eq!(code.len(), INVITE_CODE_LEN);
            assert!(is_valid_code(&code));
        }
    }

    #[test]
    fn test_generated_codes_vary() {
        let codes = InviteCodeGenerator::new();
        let a = codes.generate();
        let b = codes.generate();
        let c = codes.generate();
        // Three consecutive collisions over a 32^6 space would be astonishing.
        assert!(!(a == b && b == c));
    }

    #[test]
    fn test_is_valid_code_rejects_bad_shapes() {
        assert!(!is_valid_code(""));
        assert!(!is_valid_code("ABC"));
        assert!(!is_valid_code("abcdef"));
        assert!(!is_valid_code("AB CD3"));
        assert!(!is_valid_code("AB0DEF")); // 0 excluded from the alphabet
        assert!(is_valid_code("AB2DEF"));
    }
}
