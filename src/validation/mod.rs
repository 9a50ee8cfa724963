pub mod payloads;

use std::fmt;

pub const CPF_LEN: usize = 11;
pub const NAME_MAX_LEN: usize = 255;
pub const EMAIL_MAX_LEN: usize = 255;
pub const CODE_MAX_LEN: usize = 64;
pub const AMOUNT_MAX_LEN: usize = 32;
pub const DATE_MAX_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult = Result<(), ValidationError>;

/// One named check over a payload. Payloads declare an ordered list of these.
pub struct FieldRule<T> {
    pub field: &'static str,
    pub check: fn(&T) -> Result<(), String>,
}

/// Runs the rules in order and stops at the first failure.
pub fn validate_fields<T>(value: &T, rules: &[FieldRule<T>]) -> ValidationResult {
    rules.iter().try_for_each(|rule| {
        (rule.check)(value).map_err(|message| {
            tracing::error!(field = rule.field, %message, "Error validating parameters");
            ValidationError::new(rule.field, message)
        })
    })
}

/// Collapses runs of whitespace (tabs and newlines included) into single
/// spaces and drops the remaining control characters.
pub fn sanitize_string(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| word.chars().filter(|ch| !ch.is_control()).collect::<String>())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn is_present(value: Option<&str>) -> bool {
    value.map_or(false, |value| !value.trim().is_empty())
}

pub fn fits(value: Option<&str>, max_len: usize) -> bool {
    value.map_or(true, |value| value.chars().count() <= max_len)
}

/// Exactly 11 ASCII digits, no dots or dashes.
pub fn is_valid_cpf(cpf: &str) -> bool {
    cpf.len() == CPF_LEN && cpf.chars().all(|ch| ch.is_ascii_digit())
}

/// `local@label.rest` where local is `[A-Za-z0-9_.+-]+`, label is
/// `[A-Za-z0-9-]+` and rest is `[A-Za-z0-9-.]+`.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let Some((label, rest)) = domain.split_once('.') else {
        return false;
    };

    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '+' | '-'));
    let label_ok = !label.is_empty()
        && label
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-');
    let rest_ok = !rest.is_empty()
        && rest
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '.'));

    local_ok && label_ok && rest_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Sample {
        first: Option<String>,
        second: Option<String>,
    }

    fn first_present(sample: &Sample) -> Result<(), String> {
        if is_present(sample.first.as_deref()) {
            Ok(())
        } else {
            Err("first missing".to_string())
        }
    }

    fn second_present(sample: &Sample) -> Result<(), String> {
        if is_present(sample.second.as_deref()) {
            Ok(())
        } else {
            Err("second missing".to_string())
        }
    }

    const SAMPLE_RULES: &[FieldRule<Sample>] = &[
        FieldRule {
            field: "first",
            check: first_present,
        },
        FieldRule {
            field: "second",
            check: second_present,
        },
    ];

    #[test]
    fn rules_run_in_order_and_stop_at_first_failure() {
        let err = validate_fields(&Sample::default(), SAMPLE_RULES).unwrap_err();
        assert_eq!(err, ValidationError::new("first", "first missing"));

        let sample = Sample {
            first: Some("a".to_string()),
            second: None,
        };
        let err = validate_fields(&sample, SAMPLE_RULES).unwrap_err();
        assert_eq!(err.field, "second");
        assert_eq!(err.to_string(), "second: second missing");

        let sample = Sample {
            first: Some("a".to_string()),
            second: Some("b".to_string()),
        };
        assert!(validate_fields(&sample, SAMPLE_RULES).is_ok());
    }

    #[test]
    fn sanitizes_string() {
        assert_eq!(sanitize_string("  hello\tworld  "), "hello world");
        assert_eq!(sanitize_string("single"), "single");
        assert_eq!(sanitize_string(" \n "), "");
        assert_eq!(sanitize_string("ab\u{0000}cd\u{0007}"), "abcd");
        assert_eq!(sanitize_string("Maria\tSouza\nLima"), "Maria Souza Lima");
        assert_eq!(sanitize_string("a \u{0007} b"), "a b");
    }

    #[test]
    fn presence_and_length() {
        assert!(is_present(Some("x")));
        assert!(!is_present(Some("   ")));
        assert!(!is_present(None));
        assert!(fits(Some("abc"), 3));
        assert!(!fits(Some("abcd"), 3));
        assert!(fits(Some("ção"), 3));
        assert!(fits(None, 0));
    }

    #[test]
    fn validates_cpf() {
        assert!(is_valid_cpf("15350946056"));
        assert!(!is_valid_cpf("153.509.460-56"));
        assert!(!is_valid_cpf("1535094605"));
        assert!(!is_valid_cpf("153509460567"));
        assert!(!is_valid_cpf("1535094605a"));
    }

    #[test]
    fn validates_email() {
        assert!(is_valid_email("maria.silva+loja@example.com.br"));
        assert!(is_valid_email("a@b.c"));
        assert!(!is_valid_email("maria"));
        assert!(!is_valid_email("maria@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("maria@.com"));
        assert!(!is_valid_email("ma ria@example.com"));
        assert!(!is_valid_email("maria@exa_mple.com"));
    }
}
