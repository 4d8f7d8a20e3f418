//! Tamper-evidence tag for dispatched replies.
//!
//! The tag is a keyless SHA-256 digest of the reply text, base64-encoded so it
//! can travel inside a JSON acknowledgement. It is an audit marker, not a
//! credential: identical text always yields the identical tag.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha2::{Digest, Sha256};

pub fn tag(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    STANDARD.encode(digest.as_slice())
}

#[cfg(test)]
mod tests {
    use super::tag;

    #[test]
    fn same_text_yields_same_tag() {
        let first = tag("Messaggio inviato");
        let second = tag("Messaggio inviato");
        assert_eq!(first, second);
    }

    #[test]
    fn distinct_texts_yield_distinct_tags() {
        assert_ne!(tag("ciao"), tag("ciao!"));
        assert_ne!(tag("preventivo"), tag("Preventivo"));
    }

    #[test]
    fn known_vectors() {
        assert_eq!(tag("ciao"), "sTOgwOm+474gFj0q0x1iSNspKqbcse4IeiqlDg/HWuI=");
        assert_eq!(tag(""), "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=");
    }

    #[test]
    fn tag_is_valid_base64_of_a_256_bit_digest() {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine as _;

        let decoded = STANDARD.decode(tag("qualsiasi testo")).expect("tag should decode");
        assert_eq!(decoded.len(), 32);
    }
}
