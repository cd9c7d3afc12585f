use std::fmt;

use serde::Serialize;

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every field-level problem found while validating one request.
///
/// Validation collects all failures instead of stopping at the first one, so
/// the caller can report them together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a result rejected on a single field.
    pub fn single(field: impl Into<String>, message: impl ToString) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl ToString) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.to_string(),
        });
    }

    /// Record the error of `result` under `field`, returning the success value if any.
    pub fn check<T, E: ToString>(
        &mut self,
        field: impl Into<String>,
        result: Result<T, E>,
    ) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.add(field, e);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed")?;
        for (i, error) in self.errors.iter().enumerate() {
            let separator = if i == 0 { ": " } else { "; " };
            write!(f, "{}{}: {}", separator, error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Require a present, non-blank string. The value is returned as given.
pub fn required_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<String>,
) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            errors.add(field, format!("{} must not be blank", field));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_every_error() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "must not be blank");
        errors.add("price", "must be at least 0.01");

        assert_eq!(errors.errors().len(), 2);
        assert!(errors.has_field("name"));
        assert!(errors.has_field("price"));
        assert!(!errors.has_field("quantity"));
        assert_eq!(
            errors.to_string(),
            "Validation failed: name: must not be blank; price: must be at least 0.01"
        );
    }

    #[test]
    fn test_check_records_failure() {
        let mut errors = ValidationErrors::new();

        let ok: Option<i32> = errors.check("a", Ok::<_, String>(1));
        let failed: Option<i32> = errors.check("b", Err("bad"));

        assert_eq!(ok, Some(1));
        assert_eq!(failed, None);
        assert_eq!(errors.errors()[0].field, "b");
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_required_text() {
        let mut errors = ValidationErrors::new();

        assert_eq!(
            required_text(&mut errors, "name", Some("  Widget ".to_string())),
            Some("  Widget ".to_string())
        );
        assert!(errors.is_empty());

        assert_eq!(required_text(&mut errors, "name", Some("   ".to_string())), None);
        assert_eq!(required_text(&mut errors, "description", None), None);
        assert_eq!(errors.errors().len(), 2);
    }

    #[test]
    fn test_new_is_empty() {
        assert!(ValidationErrors::new().is_empty());
    }
}
