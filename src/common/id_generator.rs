// src/common/id_generator.rs
//! Crockford Base32 ID Generator
//!
//! Generates human-readable, prefixed IDs using Crockford Base32 encoding.
//! Format: PREFIX_XXXXXX (e.g., C_K7NP3X for companies). The alphabet
//! excludes I, L, O, U so IDs survive being read aloud or retyped.

use rand::Rng;

const CROCKFORD_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Entity type prefixes for ID generation
#[derive(Debug, Clone, Copy)]
pub enum EntityPrefix {
    /// Login account (U_)
    User,
    /// Student profile (P_)
    Profile,
    /// Company listing (C_)
    Company,
    /// Application (A_)
    Application,
}

impl EntityPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityPrefix::User => "U",
            EntityPrefix::Profile => "P",
            EntityPrefix::Company => "C",
            EntityPrefix::Application => "A",
        }
    }
}

fn generate_crockford_string(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..32);
            CROCKFORD_ALPHABET[idx] as char
        })
        .collect()
}

/// Generate a prefixed ID in the format "PREFIX_XXXXXX"
pub fn generate_id(prefix: EntityPrefix) -> String {
    format!("{}_{}", prefix.as_str(), generate_crockford_string(6))
}

/// Generate a User ID (U_XXXXXX)
pub fn generate_user_id() -> String {
    generate_id(EntityPrefix::User)
}

/// Generate a StudentProfile ID (P_XXXXXX)
pub fn generate_profile_id() -> String {
    generate_id(EntityPrefix::Profile)
}

/// Generate a Company ID (C_XXXXXX)
pub fn generate_company_id() -> String {
    generate_id(EntityPrefix::Company)
}

/// Generate an Application ID (A_XXXXXX)
pub fn generate_application_id() -> String {
    generate_id(EntityPrefix::Application)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_id_format() {
        let user_id = generate_user_id();
        assert!(user_id.starts_with("U_"));
        assert_eq!(user_id.len(), 8); // "U_" + 6 chars

        let company_id = generate_company_id();
        assert!(company_id.starts_with("C_"));
        assert_eq!(company_id.len(), 8);
    }

    #[test]
    fn test_crockford_alphabet_only() {
        let id = generate_application_id();
        let random_part = &id[2..];

        for c in random_part.chars() {
            assert!(
                CROCKFORD_ALPHABET.contains(&(c as u8)),
                "Character '{}' not in Crockford alphabet",
                c
            );
        }

        assert!(!random_part.contains('I'));
        assert!(!random_part.contains('L'));
        assert!(!random_part.contains('O'));
        assert!(!random_part.contains('U'));
    }

    #[test]
    fn test_uniqueness() {
        let mut ids = HashSet::new();
        for _ in 0..1000 {
            let id = generate_profile_id();
            assert!(ids.insert(id), "Duplicate ID generated");
        }
    }

    #[test]
    fn test_all_prefixes() {
        assert!(generate_user_id().starts_with("U_"));
        assert!(generate_profile_id().starts_with("P_"));
        assert!(generate_company_id().starts_with("C_"));
        assert!(generate_application_id().starts_with("A_"));
    }
}
