//! Activation codes.
//!
//! Codes are matched by prefix only, case-insensitively, with no signature,
//! expiry or server check. Anyone who can read this file can unlock the
//! unlimited tier; treat it as a client-side convenience, not licensing.

use crate::shell::usage::UsageEvent;

/// Prefix of codes that grant a pack of optimizations.
pub const PACK_PREFIX: &str = "JDOPT10-";
/// Prefix of codes that unlock unlimited optimizations for the session.
pub const UNLIMITED_PREFIX: &str = "JDOPTPRO-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Pack,
    Unlimited,
    Invalid,
}

impl Activation {
    /// The usage transition this activation triggers, if any.
    pub fn event(&self) -> Option<UsageEvent> {
        match self {
            Activation::Pack => Some(UsageEvent::PackActivated),
            Activation::Unlimited => Some(UsageEvent::UnlimitedActivated),
            Activation::Invalid => None,
        }
    }
}

/// Classifies a free-text code. Surrounding whitespace is ignored.
pub fn classify_code(code: &str) -> Activation {
    let code = code.trim().to_ascii_uppercase();
    if code.starts_with(UNLIMITED_PREFIX) {
        Activation::Unlimited
    } else if code.starts_with(PACK_PREFIX) {
        Activation::Pack
    } else {
        Activation::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_prefix_any_suffix() {
        for code in ["JDOPT10-", "JDOPT10-ABC123", "JDOPT10-!!", "JDOPT10-ünï"] {
            assert_eq!(classify_code(code), Activation::Pack, "code: {code}");
        }
    }

    #[test]
    fn test_unlimited_prefix_any_suffix() {
        for code in ["JDOPTPRO-", "JDOPTPRO-2026", "JDOPTPRO-x y z"] {
            assert_eq!(classify_code(code), Activation::Unlimited, "code: {code}");
        }
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert_eq!(classify_code("jdopt10-abc"), Activation::Pack);
        assert_eq!(classify_code("JdOptPro-abc"), Activation::Unlimited);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(classify_code("  jdopt10-abc\n"), Activation::Pack);
    }

    #[test]
    fn test_non_matching_codes_are_invalid() {
        for code in ["", "   ", "JDOPT10", "JDOPT", "XJDOPT10-abc", "FREE-STUFF", "JDOPT1-0"] {
            assert_eq!(classify_code(code), Activation::Invalid, "code: {code:?}");
        }
    }

    #[test]
    fn test_invalid_has_no_event() {
        assert_eq!(Activation::Invalid.event(), None);
        assert_eq!(Activation::Pack.event(), Some(UsageEvent::PackActivated));
        assert_eq!(
            Activation::Unlimited.event(),
            Some(UsageEvent::UnlimitedActivated)
        );
    }
}
