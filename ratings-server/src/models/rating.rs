//! Star rating given by a review

use serde::Deserialize;

use super::ValidationError;

/// Lowest accepted rating
pub const MIN_RATING: i64 = 1;

/// Highest accepted rating
pub const MAX_RATING: i64 = 5;

/// Validated rating in `1..=5`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    /// Create a rating from an integer.
    ///
    /// # Example
    /// ```
    /// use ratings_server::models::Rating;
    ///
    /// assert_eq!(Rating::new(4).unwrap().get(), 4);
    /// assert!(Rating::new(0).is_err());
    /// assert!(Rating::new(6).is_err());
    /// ```
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if !(MIN_RATING..=MAX_RATING).contains(&value) {
            return Err(ValidationError::OutOfRange {
                field: "rating",
                min: MIN_RATING,
                max: MAX_RATING,
            });
        }

        Ok(Self(value as u8))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

/// Rating as it arrives in a request body.
///
/// Form-driven clients send the value either as a JSON number or as a
/// string; both are accepted and narrowed by [`RatingInput::parse`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RatingInput {
    Number(serde_json::Number),
    Text(String),
}

impl RatingInput {
    /// Parse into a [`Rating`], rejecting fractional and non-numeric input.
    pub fn parse(&self) -> Result<Rating, ValidationError> {
        let value = match self {
            Self::Number(n) => match n.as_i64() {
                Some(v) => v,
                // 4.0 is whole; 4.5 is not
                None => n
                    .as_f64()
                    .filter(|f| f.fract() == 0.0)
                    .map(|f| f as i64)
                    .ok_or(ValidationError::InvalidFormat {
                        field: "rating",
                        reason: "must be a whole number",
                    })?,
            },
            Self::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Err(ValidationError::Empty { field: "rating" });
                }
                s.parse::<i64>().map_err(|_| ValidationError::InvalidFormat {
                    field: "rating",
                    reason: "must be a whole number",
                })?
            }
        };

        Rating::new(value)
    }
}
