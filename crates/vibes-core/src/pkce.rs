//! PKCE (Proof Key for Code Exchange) verifier and challenge generation.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Generate a random code verifier: 32 random bytes, base64url encoded with
/// padding stripped. That yields 43 characters, within the 43–128 range
/// RFC 7636 requires.
pub fn generate_verifier() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Derive the S256 code challenge: base64url(SHA-256(verifier)), no padding.
pub fn build_challenge(verifier: &str) -> String {
    let digest = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_base64url(s: &str) -> bool {
        s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }

    #[test]
    fn verifier_uses_base64url_alphabet_without_padding() {
        let v = generate_verifier();
        assert_eq!(v.len(), 43);
        assert!(is_base64url(&v));
        assert!(!v.contains('='));
    }

    #[test]
    fn consecutive_verifiers_differ() {
        assert_ne!(generate_verifier(), generate_verifier());
    }

    #[test]
    fn challenge_is_deterministic() {
        let v = generate_verifier();
        assert_eq!(build_challenge(&v), build_challenge(&v));
    }

    #[test]
    fn challenge_changes_with_verifier() {
        assert_ne!(build_challenge("aaaa"), build_challenge("aaab"));
    }

    #[test]
    fn challenge_matches_rfc7636_appendix_b() {
        let verifier = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
        assert_eq!(
            build_challenge(verifier),
            "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
        );
    }
}
