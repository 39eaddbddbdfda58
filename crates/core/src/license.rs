//! Driver license number format.
//!
//! A license number is exactly eight characters: three uppercase ASCII
//! letters followed by five ASCII digits (e.g. `JIM31313`).

/// Required total length of a license number, in characters.
pub const LICENSE_NUMBER_LENGTH: usize = 8;

/// Number of leading uppercase letters.
pub const LICENSE_PREFIX_LENGTH: usize = 3;

/// Reason a license number was rejected. Rules are checked in order and the
/// first failing rule is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LicenseError {
    #[error("License number should consist of 8 characters")]
    WrongLength,

    #[error("First 3 characters should be uppercase letters")]
    InvalidPrefix,

    #[error("Last 5 characters should be digits")]
    InvalidSuffix,
}

/// Check a license number against the required format.
pub fn validate_license_number(license_number: &str) -> Result<(), LicenseError> {
    let chars: Vec<char> = license_number.chars().collect();
    if chars.len() != LICENSE_NUMBER_LENGTH {
        return Err(LicenseError::WrongLength);
    }

    let (prefix, suffix) = chars.split_at(LICENSE_PREFIX_LENGTH);
    if !prefix.iter().all(char::is_ascii_uppercase) {
        return Err(LicenseError::InvalidPrefix);
    }
    if !suffix.iter().all(char::is_ascii_digit) {
        return Err(LicenseError::InvalidSuffix);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn accepts_well_formed_numbers() {
        assert_eq!(validate_license_number("JIM31313"), Ok(()));
        assert_eq!(validate_license_number("ASD12345"), Ok(()));
    }

    #[test]
    fn rejects_wrong_length() {
        assert_matches!(
            validate_license_number("JIM3131"),
            Err(LicenseError::WrongLength)
        );
        assert_matches!(
            validate_license_number("JIM313131"),
            Err(LicenseError::WrongLength)
        );
        assert_matches!(validate_license_number(""), Err(LicenseError::WrongLength));
    }

    #[test]
    fn rejects_lowercase_or_numeric_prefix() {
        assert_matches!(
            validate_license_number("jim31313"),
            Err(LicenseError::InvalidPrefix)
        );
        assert_matches!(
            validate_license_number("JI331313"),
            Err(LicenseError::InvalidPrefix)
        );
    }

    #[test]
    fn rejects_non_digit_suffix() {
        assert_matches!(
            validate_license_number("JIM3131A"),
            Err(LicenseError::InvalidSuffix)
        );
    }

    #[test]
    fn multibyte_input_is_measured_in_characters() {
        // Eight characters, but the prefix is not ASCII.
        assert_matches!(
            validate_license_number("ÄBC12345"),
            Err(LicenseError::InvalidPrefix)
        );
    }

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(
            LicenseError::InvalidSuffix.to_string(),
            "Last 5 characters should be digits"
        );
    }
}
