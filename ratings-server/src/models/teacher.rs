//! Validated write inputs for teachers and reviews

use std::fmt;

use super::{Description, Rating, Reason, TeacherName, ValidationError};

/// Storage-assigned teacher identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TeacherId(i64);

impl TeacherId {
    /// Parse a teacher id from a path segment.
    ///
    /// # Example
    /// ```
    /// use ratings_server::models::TeacherId;
    ///
    /// assert_eq!(TeacherId::parse("42").unwrap().get(), 42);
    /// assert!(TeacherId::parse("0").is_err());
    /// assert!(TeacherId::parse("abc").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let id = s
            .trim()
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidFormat {
                field: "teacher id",
                reason: "must be a positive integer",
            })?;
        Self::new(id)
    }

    pub fn new(id: i64) -> Result<Self, ValidationError> {
        if id < 1 {
            return Err(ValidationError::InvalidFormat {
                field: "teacher id",
                reason: "must be a positive integer",
            });
        }
        Ok(Self(id))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TeacherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A review about to be written
#[derive(Debug, Clone)]
pub struct NewReview {
    pub rating: Rating,
    pub reason: Reason,
}

/// A teacher about to be created together with its first review
#[derive(Debug, Clone)]
pub struct NewTeacher {
    pub name: TeacherName,
    pub description: Description,
    pub first_review: NewReview,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_ids() {
        assert_eq!(TeacherId::parse(" 7 ").unwrap().get(), 7);
        assert_eq!(TeacherId::new(1).unwrap().to_string(), "1");
    }

    #[test]
    fn rejects_non_positive_and_garbage() {
        assert!(TeacherId::parse("-3").is_err());
        assert!(TeacherId::parse("1.5").is_err());
        assert!(TeacherId::parse("").is_err());
    }
}
