use regex::Regex;
use std::sync::OnceLock;

fn phone_number_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("Invalid phone number regex"))
}

pub fn is_valid(phone_number: &str) -> bool {
    phone_number_regex().is_match(phone_number.trim())
}

/// Prefixes `default_country_code` when the number is not already in
/// international format.
pub fn to_international(phone_number: &str, default_country_code: &str) -> String {
    let phone_number = phone_number.trim();
    if phone_number.starts_with('+') {
        return phone_number.to_string();
    }

    format!("{}{}", default_country_code, phone_number)
}
