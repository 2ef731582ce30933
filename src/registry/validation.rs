use super::error::ValidationError;

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// The `@` must sit strictly inside the address: at least one character of
/// local part and at least one of domain. Only the first `@` counts.
pub fn is_valid_email(email: &str) -> bool {
    match email.find('@') {
        Some(at) => at > 0 && at < email.len() - 1,
        None => false,
    }
}

pub(super) fn require_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::BlankName);
    }
    Ok(name.to_owned())
}

pub(super) fn require_email(email: &str) -> Result<String, ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::BlankEmail);
    }
    if !is_valid_email(email) {
        return Err(ValidationError::MalformedEmail);
    }
    Ok(email.to_owned())
}

#[cfg(test)]
mod tests {
    use super::{is_blank, is_valid_email};

    #[test]
    fn test_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("\t\n"));
        assert!(!is_blank(" a "));
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("gush@gmail.com"));
        assert!(is_valid_email("a@b"));

        assert!(!is_valid_email("nada_neutho"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("x.com@"));
        assert!(!is_valid_email("@"));
    }
}
