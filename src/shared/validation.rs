//! Field validation for incoming payloads
//!
//! Each validator collects every failing field instead of stopping at the
//! first, so a 422 response can report them all at once.

use crate::shared::error::SharedError;

/// Minimum password length after trimming
pub const MIN_PASSWORD_LEN: usize = 5;

fn require_non_empty(errors: &mut Vec<SharedError>, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.push(SharedError::validation(field, message));
    }
}

fn finish(errors: Vec<SharedError>) -> Result<(), Vec<SharedError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate the text fields of a post
pub fn validate_post_fields(title: &str, content: &str) -> Result<(), Vec<SharedError>> {
    let mut errors = Vec::new();
    require_non_empty(&mut errors, "title", title, "Title must not be empty.");
    require_non_empty(&mut errors, "content", content, "Content must not be empty.");
    finish(errors)
}

/// Validate a signup request
pub fn validate_signup(email: &str, name: &str, password: &str) -> Result<(), Vec<SharedError>> {
    let mut errors = Vec::new();
    if !is_valid_email(email) {
        errors.push(SharedError::validation("email", "Please enter a valid email."));
    }
    require_non_empty(&mut errors, "name", name, "Name must not be empty.");
    if password.trim().chars().count() < MIN_PASSWORD_LEN {
        errors.push(SharedError::validation(
            "password",
            format!("Password must be at least {} characters.", MIN_PASSWORD_LEN),
        ));
    }
    finish(errors)
}

/// Validate a status update
pub fn validate_status(status: &str) -> Result<(), Vec<SharedError>> {
    let mut errors = Vec::new();
    require_non_empty(&mut errors, "status", status, "Status must not be empty.");
    finish(errors)
}

/// Basic email shape check: one `@` with text on both sides and a dot in the domain
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

/// Lowercase and trim an email before lookup or storage
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_fields_accept_single_characters() {
        assert!(validate_post_fields("T", "C").is_ok());
    }

    #[test]
    fn test_post_fields_report_every_blank_field() {
        let errors = validate_post_fields("  ", "").unwrap_err();
        let fields: Vec<_> = errors.iter().filter_map(SharedError::field).collect();
        assert_eq!(fields, vec!["title", "content"]);
    }

    #[test]
    fn test_signup_validation() {
        assert!(validate_signup("a@x.com", "Ada", "secret123").is_ok());

        let errors = validate_signup("not-an-email", "", "abc").unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_password_is_trimmed_before_length_check() {
        assert!(validate_signup("a@x.com", "Ada", "  abc  ").is_err());
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email(" user.name@mail.example.org "));
        assert!(!is_valid_email("a@x"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("a@@x.com"));
        assert!(!is_valid_email("a@x.com."));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  A@X.Com "), "a@x.com");
    }

    #[test]
    fn test_status_must_not_be_blank() {
        assert!(validate_status("Busy").is_ok());
        assert!(validate_status("   ").is_err());
    }
}
