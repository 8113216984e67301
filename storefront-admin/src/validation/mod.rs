//! Draft validation.
//!
//! Drafts are checked with a fluent [`Validator`] before they reach the data
//! layer:
//!
//! ```
//! use storefront_admin::validation::Validator;
//!
//! let result = Validator::new()
//!     .field("code", "SPRING10")
//!         .required("Code is required")
//!         .max_length(20, "Code is too long")
//!     .field("email", "not-an-email")
//!         .email("Invalid email format")
//!     .validate();
//!
//! assert_eq!(result.errors().len(), 1);
//! ```

mod result;
mod validator;

pub use result::{FieldError, ValidationResult};
pub use validator::{FieldBuilder, Validator};

/// Types that can check themselves before being submitted.
pub trait Validate {
    /// Runs all field rules.
    fn validate(&self) -> ValidationResult;
}
