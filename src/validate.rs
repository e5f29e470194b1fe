//! Validation rules over already-sanitized values
//!
//! Rules are predicates; they never panic and never return errors of their
//! own. `ValidationError` is a plain value carrying the user-facing message.

use crate::state::FormatClass;
use regex::Regex;
use reqwest::Url;
use std::sync::LazyLock;

static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static pattern"));
static PHONE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{8,15}$").expect("static pattern"));

/// Minimum length of a contact message, in characters
pub const MESSAGE_MIN_LEN: usize = 5;

pub fn is_not_empty(value: &str) -> bool {
    !value.is_empty()
}

/// `local@domain.tld` shape, no whitespace
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_SHAPE.is_match(value)
}

/// Optional leading `+` followed by 8 to 15 digits
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_SHAPE.is_match(value)
}

pub fn is_valid_message(value: &str) -> bool {
    value.chars().count() >= MESSAGE_MIN_LEN
}

/// Accept `site.com.br` as well as `https://site.com.br`; only web schemes
/// with a host pass.
pub fn is_valid_url(value: &str) -> bool {
    let candidate = if value.contains("://") {
        value.to_string()
    } else {
        format!("https://{value}")
    };
    match Url::parse(&candidate) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

/// Why a value was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    Required,
    NameRequired,
    InvalidEmail,
    InvalidContactEmail,
    InvalidPhone,
    InvalidUrl,
    MessageTooShort,
    NoOptionSelected,
    NoOptionChecked,
}

impl ValidationError {
    /// User-facing message in the deployment locale (pt-BR)
    pub fn message(&self) -> &'static str {
        match self {
            Self::Required => "Por favor, preencha este campo",
            Self::NameRequired => "O nome é obrigatório.",
            Self::InvalidEmail => "Por favor, insira um e-mail válido",
            Self::InvalidContactEmail => "Formato de e-mail inválido.",
            Self::InvalidPhone => "O telefone deve conter apenas números (8 a 15 dígitos).",
            Self::InvalidUrl => "URL inválida. Ex: https://site.com.br",
            Self::MessageTooShort => "A mensagem deve ter pelo menos 5 caracteres.",
            Self::NoOptionSelected => "Selecione uma opção",
            Self::NoOptionChecked => "Selecione pelo menos uma opção",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Validate a sanitized free-text answer of the given format class.
///
/// Empty optional answers pass; format rules only apply to non-empty values.
pub fn validate_text(
    value: &str,
    format: FormatClass,
    required: bool,
) -> Result<(), ValidationError> {
    if !is_not_empty(value) {
        return if required {
            Err(ValidationError::Required)
        } else {
            Ok(())
        };
    }
    match format {
        FormatClass::Email if !is_valid_email(value) => Err(ValidationError::InvalidEmail),
        FormatClass::Phone if !is_valid_phone(value) => Err(ValidationError::InvalidPhone),
        FormatClass::Url if !is_valid_url(value) => Err(ValidationError::InvalidUrl),
        _ => Ok(()),
    }
}

/// Single-select steps need exactly one selected option.
pub fn validate_single_select(selected: Option<usize>) -> Result<(), ValidationError> {
    selected.map(|_| ()).ok_or(ValidationError::NoOptionSelected)
}

/// Multi-select steps need at least one checked option.
pub fn validate_multi_select(checked: usize) -> Result<(), ValidationError> {
    if checked == 0 {
        Err(ValidationError::NoOptionChecked)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod predicates {
        use super::*;

        #[test]
        fn test_is_not_empty() {
            assert!(is_not_empty("a"));
            assert!(!is_not_empty(""));
        }

        #[test]
        fn test_email_shape() {
            assert!(is_valid_email("john.doe@example.com"));
            assert!(is_valid_email("a@b.co"));
            assert!(!is_valid_email("john.doe@example"));
            assert!(!is_valid_email("@example.com"));
            assert!(!is_valid_email("john doe@example.com"));
            assert!(!is_valid_email("a@b@c.com"));
            assert!(!is_valid_email(""));
        }

        #[test]
        fn test_phone_digit_bounds() {
            assert!(!is_valid_phone("1234567"));
            assert!(is_valid_phone("12345678"));
            assert!(is_valid_phone("123456789012345"));
            assert!(!is_valid_phone("1234567890123456"));
        }

        #[test]
        fn test_phone_bounds_with_leading_plus() {
            assert!(!is_valid_phone("+1234567"));
            assert!(is_valid_phone("+12345678"));
            assert!(is_valid_phone("+123456789012345"));
            assert!(!is_valid_phone("+1234567890123456"));
        }

        #[test]
        fn test_phone_rejects_non_ascii_digits_and_inner_plus() {
            assert!(!is_valid_phone("١٢٣٤٥٦٧٨"));
            assert!(!is_valid_phone("1234+5678"));
        }

        #[test]
        fn test_message_minimum_length() {
            assert!(!is_valid_message("oi"));
            assert!(!is_valid_message("abcd"));
            assert!(is_valid_message("abcde"));
            assert!(is_valid_message("ação!"));
        }

        #[test]
        fn test_url_with_and_without_scheme() {
            assert!(is_valid_url("https://site.com.br"));
            assert!(is_valid_url("site.com.br"));
            assert!(is_valid_url("http://localhost:8080/path"));
            assert!(!is_valid_url("https://"));
            assert!(!is_valid_url("ftp://files.example.com"));
        }
    }

    mod step_rules {
        use super::*;

        #[test]
        fn test_required_empty_fails() {
            assert_eq!(
                validate_text("", FormatClass::Name, true),
                Err(ValidationError::Required)
            );
        }

        #[test]
        fn test_optional_empty_passes() {
            assert_eq!(validate_text("", FormatClass::Url, false), Ok(()));
        }

        #[test]
        fn test_optional_value_is_still_format_checked() {
            assert_eq!(
                validate_text("not a url", FormatClass::Url, false),
                Err(ValidationError::InvalidUrl)
            );
        }

        #[test]
        fn test_email_format() {
            assert_eq!(
                validate_text("john@example", FormatClass::Email, true),
                Err(ValidationError::InvalidEmail)
            );
            assert_eq!(
                validate_text("john@example.com", FormatClass::Email, true),
                Ok(())
            );
        }

        #[test]
        fn test_phone_format() {
            assert_eq!(
                validate_text("1234", FormatClass::Phone, true),
                Err(ValidationError::InvalidPhone)
            );
        }

        #[test]
        fn test_plain_accepts_anything_non_empty() {
            assert_eq!(validate_text("x", FormatClass::Plain, true), Ok(()));
        }

        #[test]
        fn test_single_select() {
            assert_eq!(
                validate_single_select(None),
                Err(ValidationError::NoOptionSelected)
            );
            assert_eq!(validate_single_select(Some(2)), Ok(()));
        }

        #[test]
        fn test_multi_select() {
            assert_eq!(
                validate_multi_select(0),
                Err(ValidationError::NoOptionChecked)
            );
            assert_eq!(validate_multi_select(3), Ok(()));
        }
    }

    #[test]
    fn test_messages_are_localized() {
        assert_eq!(
            ValidationError::Required.to_string(),
            "Por favor, preencha este campo"
        );
        assert_eq!(
            ValidationError::NoOptionChecked.message(),
            "Selecione pelo menos uma opção"
        );
    }
}
