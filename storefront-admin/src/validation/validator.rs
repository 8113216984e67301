//! Validator builder for fluent validation API.

use gridview::CellValue;
use regex::Regex;

use super::result::{FieldError, ValidationResult};

/// Type alias for validation rule closures.
type Rule = Box<dyn Fn(&CellValue) -> Result<(), String> + Send + Sync>;

struct FieldEntry {
    name: String,
    value: CellValue,
    rules: Vec<Rule>,
}

/// Builder for validating multiple fields.
///
/// Only the first failing rule of each field is reported. Rules other than
/// [`FieldBuilder::required`] accept an empty value, so optional fields only
/// need the checks that apply when they are filled in.
#[derive(Default)]
pub struct Validator {
    fields: Vec<FieldEntry>,
}

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field to validate.
    pub fn field(self, name: impl Into<String>, value: impl Into<CellValue>) -> FieldBuilder {
        FieldBuilder {
            validator: self,
            entry: FieldEntry {
                name: name.into(),
                value: value.into(),
                rules: Vec::new(),
            },
        }
    }

    /// Run all validations.
    pub fn validate(self) -> ValidationResult {
        let errors: Vec<FieldError> = self
            .fields
            .iter()
            .filter_map(|field| {
                field
                    .rules
                    .iter()
                    .find_map(|rule| rule(&field.value).err())
                    .map(|message| FieldError {
                        field: field.name.clone(),
                        message,
                    })
            })
            .collect();

        if errors.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(errors)
        }
    }
}

/// Builder for adding validation rules to a single field.
pub struct FieldBuilder {
    validator: Validator,
    entry: FieldEntry,
}

impl FieldBuilder {
    /// Add a custom validation rule.
    pub fn custom<F>(mut self, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(&CellValue) -> bool + Send + Sync + 'static,
    {
        let msg = msg.into();
        self.entry
            .rules
            .push(Box::new(move |v| if f(v) { Ok(()) } else { Err(msg.clone()) }));
        self
    }

    /// Continue to the next field.
    pub fn field(self, name: impl Into<String>, value: impl Into<CellValue>) -> FieldBuilder {
        self.finalize().field(name, value)
    }

    /// Finalize and run all validations.
    pub fn validate(self) -> ValidationResult {
        self.finalize().validate()
    }

    fn finalize(self) -> Validator {
        let mut validator = self.validator;
        validator.fields.push(self.entry);
        validator
    }

    /// Require the field to be present. Text must contain non-whitespace.
    pub fn required(self, msg: impl Into<String>) -> Self {
        self.custom(
            |v| match v {
                CellValue::Empty => false,
                CellValue::Text(s) => !s.trim().is_empty(),
                _ => true,
            },
            msg,
        )
    }

    /// Require minimum length (in characters).
    pub fn min_length(self, min: usize, msg: impl Into<String>) -> Self {
        self.custom(move |v| text_len(v).is_none_or(|n| n >= min), msg)
    }

    /// Require maximum length (in characters).
    pub fn max_length(self, max: usize, msg: impl Into<String>) -> Self {
        self.custom(move |v| text_len(v).is_none_or(|n| n <= max), msg)
    }

    /// Require the value to match a regex pattern.
    ///
    /// A pattern that does not compile fails every non-empty value.
    pub fn pattern(self, pattern: &str, msg: impl Into<String>) -> Self {
        match Regex::new(pattern) {
            Ok(re) => self.custom(
                move |v| v.is_empty() || re.is_match(&v.to_string()),
                msg,
            ),
            Err(e) => {
                log::warn!("Invalid validation pattern {pattern:?}: {e}");
                self.custom(CellValue::is_empty, msg)
            }
        }
    }

    /// Require a valid email address.
    pub fn email(self, msg: impl Into<String>) -> Self {
        self.custom(
            |v| match v {
                CellValue::Empty => true,
                CellValue::Text(s) => email_address::EmailAddress::is_valid(s),
                _ => false,
            },
            msg,
        )
    }

    /// Require the value to lie within inclusive bounds.
    ///
    /// A missing bound leaves that side open. Values of a different kind
    /// than the bounds fail.
    pub fn range(
        self,
        min: Option<CellValue>,
        max: Option<CellValue>,
        msg: impl Into<String>,
    ) -> Self {
        self.custom(
            move |v| {
                if v.is_empty() {
                    return true;
                }
                let above = min
                    .as_ref()
                    .is_none_or(|min| comparable(v, min) && v.natural_cmp(min).is_ge());
                let below = max
                    .as_ref()
                    .is_none_or(|max| comparable(v, max) && v.natural_cmp(max).is_le());
                above && below
            },
            msg,
        )
    }
}

fn text_len(value: &CellValue) -> Option<usize> {
    match value {
        CellValue::Text(s) => Some(s.chars().count()),
        _ => None,
    }
}

fn comparable(a: &CellValue, b: &CellValue) -> bool {
    match (a, b) {
        (CellValue::DateTime(_), CellValue::DateTime(_)) => true,
        (CellValue::Text(_), CellValue::Text(_)) => true,
        _ => a.as_f64().is_some() && b.as_f64().is_some(),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_required_rejects_blank_text() {
        let result = Validator::new()
            .field("title", "   ")
            .required("Title is required")
            .validate();
        assert_eq!(result.first_error().unwrap().message, "Title is required");

        let missing: Option<String> = None;
        let result = Validator::new()
            .field("title", missing)
            .required("Title is required")
            .validate();
        assert!(result.is_invalid());
    }

    #[test]
    fn test_only_first_error_per_field() {
        let result = Validator::new()
            .field("code", "")
            .required("Code is required")
            .min_length(3, "Code is too short")
            .validate();
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].message, "Code is required");
    }

    #[test]
    fn test_optional_fields_skip_format_rules() {
        let none: Option<String> = None;
        let result = Validator::new()
            .field("email", none)
            .email("Invalid email")
            .max_length(5, "Too long")
            .pattern("^[A-Z]+$", "Upper case only")
            .validate();
        assert!(result.is_valid());
    }

    #[test]
    fn test_email_and_pattern() {
        let result = Validator::new()
            .field("email", "shop@example.com")
            .email("Invalid email")
            .field("code", "spring10")
            .pattern("^[A-Z0-9]+$", "Upper case only")
            .validate();
        assert_eq!(
            result.errors(),
            &[FieldError {
                field: "code".into(),
                message: "Upper case only".into()
            }]
        );
    }

    #[test]
    fn test_bad_pattern_fails_filled_values() {
        let result = Validator::new()
            .field("code", "A")
            .pattern("(", "Bad")
            .validate();
        assert!(result.is_invalid());
    }

    #[test]
    fn test_range_is_inclusive_and_open_ended() {
        let check = |v: CellValue| {
            Validator::new()
                .field("percent", v)
                .range(Some(1i64.into()), Some(100i64.into()), "Out of range")
                .validate()
                .is_valid()
        };
        assert!(check(1i64.into()));
        assert!(check(Decimal::new(1000, 1).into()));
        assert!(!check(0i64.into()));
        assert!(!check(101i64.into()));
        assert!(!check("ten".into()));

        let result = Validator::new()
            .field("price", Decimal::new(1, 2))
            .range(Some(Decimal::ZERO.into()), None, "Negative")
            .validate();
        assert!(result.is_valid());
    }

    #[test]
    fn test_into_result() {
        let err = Validator::new()
            .field("name", "")
            .required("Name is required")
            .validate()
            .into_result()
            .unwrap_err();
        assert_eq!(err.to_string(), "name: Name is required");
    }
}
