//! Order code generation.

use rand::{Rng, distributions::Alphanumeric};

const CODE_LEN: usize = 12;

/// A fresh 12-character uppercase alphanumeric order code.
#[must_use]
pub fn generate() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(CODE_LEN)
        .map(|byte| char::from(byte).to_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_have_the_expected_shape() {
        let code = generate();

        assert_eq!(code.len(), CODE_LEN);
        assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn codes_are_not_repeated() {
        assert_ne!(generate(), generate());
    }
}
