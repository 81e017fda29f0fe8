//! Credential derivation for approved and invited members.
//!
//! The username/password formats are fixed for compatibility with existing
//! member communications; the random parts are drawn from the OS CSPRNG.

use chrono::{Datelike, NaiveDate};
use rand::rngs::OsRng;
use rand::Rng;

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const SYMBOLS: &[u8] = b"!@#$%&";

/// Lowercased first token of the full name plus the last four digits of the
/// phone number. With no phone on file (invite path), a random four-digit
/// filler is used instead.
pub fn derive_username(full_name: &str, phone: Option<&str>) -> String {
    let first = full_name
        .trim()
        .split_whitespace()
        .next()
        .unwrap_or("")
        .to_lowercase();

    let digits: Vec<char> = phone
        .unwrap_or("")
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();

    let suffix = if digits.len() >= 4 {
        digits[digits.len() - 4..].iter().collect()
    } else {
        format!("{:04}", OsRng.gen_range(1000..10000))
    };

    format!("{first}{suffix}")
}

/// First letter of the first name (uppercased) + birth year + three random
/// lowercase letters + one random symbol, e.g. `R1998abc#`.
pub fn generate_password(full_name: &str, dob: NaiveDate) -> String {
    let first_letter = full_name
        .trim()
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or('M');

    let year = dob.year();

    let mut rng = OsRng;
    let letters: String = (0..3)
        .map(|_| LOWERCASE[rng.gen_range(0..LOWERCASE.len())] as char)
        .collect();
    let symbol = SYMBOLS[rng.gen_range(0..SYMBOLS.len())] as char;

    format!("{first_letter}{year}{letters}{symbol}")
}

/// Six-digit numeric one-time code for password resets.
pub fn generate_otp() -> String {
    format!("{:06}", OsRng.gen_range(100000..1000000))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_from_name_and_phone() {
        assert_eq!(
            derive_username("Ramesh Das", Some("9876542345")),
            "ramesh2345"
        );
    }

    #[test]
    fn username_without_phone_gets_digit_filler() {
        let username = derive_username("Anita Roy", None);
        assert!(username.starts_with("anita"));
        let suffix = &username["anita".len()..];
        assert_eq!(suffix.len(), 4);
        assert!(suffix.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn password_matches_compatibility_format() {
        let dob = NaiveDate::from_ymd_opt(1998, 4, 12).unwrap();
        let password = generate_password("Ramesh Das", dob);

        let mut chars = password.chars();
        assert_eq!(chars.next(), Some('R'));
        assert_eq!(&password[1..5], "1998");
        assert!(password[5..8].chars().all(|c| c.is_ascii_lowercase()));
        let symbol = password.chars().last().unwrap();
        assert!("!@#$%&".contains(symbol));
        assert_eq!(password.len(), 9);
    }

    #[test]
    fn otp_is_six_digits() {
        let otp = generate_otp();
        assert_eq!(otp.len(), 6);
        assert!(otp.chars().all(|c| c.is_ascii_digit()));
    }
}
