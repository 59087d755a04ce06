use crate::DomainError;

/// Accepts `local@domain.tld` shaped addresses: one `@`, a non-empty local part
/// and a domain with an inner dot. No whitespace anywhere.
pub(crate) fn validate_email(field: &str, value: &str) -> Result<(), DomainError> {
    if value.chars().any(char::is_whitespace) {
        return Err(DomainError::invalid(field, "Email must not contain whitespace"));
    }
    let Some((local, domain)) = value.split_once('@') else {
        return Err(DomainError::invalid(field, "Email must contain '@'"));
    };
    if local.is_empty() {
        return Err(DomainError::invalid(field, "Email local part is empty"));
    }
    if domain.contains('@') {
        return Err(DomainError::invalid(field, "Email must contain a single '@'"));
    }
    let has_inner_dot = domain
        .find('.')
        .is_some_and(|pos| pos > 0 && !domain.ends_with('.'));
    if !has_inner_dot {
        return Err(DomainError::invalid(
            field,
            format!("'{}' is not a valid email domain", domain),
        ));
    }
    Ok(())
}

pub(crate) fn ensure_finite(field: &str, value: f64) -> Result<(), DomainError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DomainError::invalid(
            field,
            format!("Expected a finite number, got {}", value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(validate_email("email", "alice@example.com").is_ok());
        assert!(validate_email("email", "a.b+c@mail.example.org").is_ok());
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in [
            "alice",
            "@example.com",
            "alice@",
            "alice@example",
            "alice@.com",
            "alice@example.",
            "al ice@example.com",
            "a@b@example.com",
        ] {
            assert!(
                matches!(validate_email("email", bad), Err(DomainError::InvalidFieldValue { field, .. }) if field == "email"),
                "expected '{}' to be rejected",
                bad
            );
        }
    }

    #[test]
    fn finite_check() {
        assert!(ensure_finite("price", 1.5).is_ok());
        assert!(ensure_finite("price", f64::NAN).is_err());
        assert!(ensure_finite("price", f64::INFINITY).is_err());
    }
}
