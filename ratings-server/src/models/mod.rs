//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod text;
pub mod rating;
pub mod teacher;

pub use validation::ValidationError;
pub use text::{Description, Reason, TeacherName};
pub use rating::{Rating, RatingInput, MAX_RATING, MIN_RATING};
pub use teacher::{NewReview, NewTeacher, TeacherId};
