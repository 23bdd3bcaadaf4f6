//! Phone number utilities
//!
//! SkyPark only serves Kyrgyzstan, so every accepted number carries the
//! `+996` country prefix followed by nine national digits.

use once_cell::sync::Lazy;
use regex::Regex;

// Mobile operators: +996 5xx / 7xx
static KG_MOBILE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+996[57]\d{8}$").expect("mobile phone pattern"));

// Bishkek landlines: +996 2xx
static KG_LANDLINE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+9962\d{8}$").expect("landline phone pattern"));

// Any nine-digit national number
static KG_GENERAL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+996\d{9}$").expect("general phone pattern"));

/// Country prefix every regional number starts with
pub const KG_COUNTRY_PREFIX: &str = "+996";

/// Check whether a phone number matches one of the accepted regional formats.
///
/// The input is matched as-is: numbers with spaces, dashes or a missing
/// `+996` prefix are rejected rather than normalized. Never panics and never
/// errors; malformed input simply yields `false`.
pub fn is_valid_regional_phone(phone: &str) -> bool {
    [&*KG_MOBILE_REGEX, &*KG_LANDLINE_REGEX, &*KG_GENERAL_REGEX]
        .iter()
        .any(|pattern| pattern.is_match(phone))
}

/// Check whether a phone number belongs to a mobile operator
pub fn is_mobile_phone(phone: &str) -> bool {
    KG_MOBILE_REGEX.is_match(phone)
}

/// Mask a phone number for logs (e.g. +996*****3456)
pub fn mask_phone_number(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }

    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 8), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_mobile_numbers() {
        assert!(is_valid_regional_phone("+996700123456"));
        assert!(is_valid_regional_phone("+996555123456"));
        assert!(is_mobile_phone("+996777987654"));
    }

    #[test]
    fn test_valid_landline_numbers() {
        assert!(is_valid_regional_phone("+996312123456"));
        assert!(!is_mobile_phone("+996312123456"));
    }

    #[test]
    fn test_general_pattern_accepts_other_ranges() {
        assert!(is_valid_regional_phone("+996900123456"));
    }

    #[test]
    fn test_rejects_malformed_numbers() {
        // wrong length
        assert!(!is_valid_regional_phone("+99670012345"));
        assert!(!is_valid_regional_phone("+9967001234567"));
        // missing prefix
        assert!(!is_valid_regional_phone("996700123456"));
        assert!(!is_valid_regional_phone("0700123456"));
        assert!(!is_valid_regional_phone("+7700123456"));
        // letters and formatting
        assert!(!is_valid_regional_phone("+996700abc456"));
        assert!(!is_valid_regional_phone("+996 700 123 456"));
        assert!(!is_valid_regional_phone(""));
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("+996700123456"), "+996****3456");
        assert_eq!(mask_phone_number("12345"), "*****");
    }
}
