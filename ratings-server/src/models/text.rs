//! Free-text fields: teacher name, description and review reason

use super::ValidationError;

/// Maximum length for teacher names
const MAX_NAME_LEN: usize = 100;

/// Maximum length for descriptions and review reasons
const MAX_BODY_LEN: usize = 2000;

/// Trim and check a text field against the shared rules.
fn validated(field: &'static str, s: &str, max: usize) -> Result<String, ValidationError> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(trimmed.to_owned())
}

/// Validated teacher name
///
/// Stored as entered (trimmed). Uniqueness is case-insensitive and is
/// checked by the repository, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherName(String);

impl TeacherName {
    /// Create a new teacher name.
    ///
    /// # Rules
    /// - Non-empty (after trimming whitespace)
    /// - Max 100 characters
    ///
    /// # Example
    /// ```
    /// use ratings_server::models::TeacherName;
    ///
    /// assert!(TeacherName::new("Ms. Frizzle").is_ok());
    /// assert!(TeacherName::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        validated("name", s, MAX_NAME_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-folded form used for duplicate detection.
    ///
    /// Unicode-aware, unlike SQLite's `NOCASE` which folds ASCII only.
    pub fn key(&self) -> String {
        self.0.to_lowercase()
    }
}

/// Validated teacher description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description(String);

impl Description {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        validated("description", s, MAX_BODY_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated review justification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reason(String);

impl Reason {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        validated("reason", s, MAX_BODY_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace() {
        let name = TeacherName::new("  Smith  ").unwrap();
        assert_eq!(name.as_str(), "Smith");
    }

    #[test]
    fn key_folds_non_ascii_case() {
        assert_eq!(TeacherName::new("Émile").unwrap().key(), "émile");
        assert_eq!(
            TeacherName::new("ÉMILE").unwrap().key(),
            TeacherName::new("émile").unwrap().key()
        );
        assert_eq!(TeacherName::new("SMITH").unwrap().key(), "smith");
    }

    #[test]
    fn rejects_empty_fields() {
        assert_eq!(
            TeacherName::new("").unwrap_err(),
            ValidationError::Empty { field: "name" }
        );
        assert_eq!(
            Description::new(" \t ").unwrap_err(),
            ValidationError::Empty {
                field: "description"
            }
        );
        assert_eq!(
            Reason::new("\n").unwrap_err(),
            ValidationError::Empty { field: "reason" }
        );
    }

    #[test]
    fn max_length() {
        assert!(TeacherName::new(&"a".repeat(100)).is_ok());
        let err = TeacherName::new(&"a".repeat(101)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 100, .. }));

        assert!(Reason::new(&"b".repeat(2000)).is_ok());
        assert!(Reason::new(&"b".repeat(2001)).is_err());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 100 two-byte characters
        assert!(TeacherName::new(&"é".repeat(100)).is_ok());
    }
}
