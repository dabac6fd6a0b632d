//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce the shape rules of a cliente record (positive
//! identifiers, CUIT and mobile phone formats, email shape, non-blank text) so
//! that once a value reaches the domain layer it can be treated as trusted.
//! None of them rewrite the submitted value: what the caller sent is what gets
//! stored.
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

/// CUIT shape: whitelisted prefix, eight digits, one check digit.
pub static CUIT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(20|23|24|27|30|33|34)-\d{8}-\d$").expect("CUIT pattern is valid")
});

/// Mobile phone shape: two-digit area code and eight digits.
pub static MOBILE_PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}-\d{8}$").expect("phone pattern is valid"));

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// CUIT did not match the `NN-NNNNNNNN-N` shape or used an unknown prefix.
    #[error("invalid CUIT")]
    InvalidCuit,
    /// Phone number did not meet the `NN-NNNNNNNN` shape.
    #[error("invalid phone number")]
    InvalidPhone,
}

/// Unique identifier for a cliente, assigned by the store.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClienteId(i32);

impl ClienteId {
    /// Creates a new identifier ensuring it is greater than zero.
    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::NonPositiveId)
        }
    }

    /// Returns the raw `i32` backing this identifier.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Display for ClienteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for ClienteId {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ClienteId> for i32 {
    fn from(value: ClienteId) -> Self {
        value.0
    }
}

/// Macro to generate string newtypes guarded by a validation function.
macro_rules! checked_string_newtype {
    ($name:ident, $check:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Validates the raw value and wraps it unchanged.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let value = value.into();
                let check: fn(&str) -> Result<(), TypeConstraintError> = $check;
                check(&value)?;
                Ok(Self(value))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

fn check_not_blank(value: &str) -> Result<(), TypeConstraintError> {
    if value.trim().is_empty() {
        Err(TypeConstraintError::EmptyString)
    } else {
        Ok(())
    }
}

fn check_cuit(value: &str) -> Result<(), TypeConstraintError> {
    if CUIT_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(TypeConstraintError::InvalidCuit)
    }
}

fn check_mobile_phone(value: &str) -> Result<(), TypeConstraintError> {
    if MOBILE_PHONE_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(TypeConstraintError::InvalidPhone)
    }
}

fn check_email(value: &str) -> Result<(), TypeConstraintError> {
    check_not_blank(value)?;
    if value.validate_email() {
        Ok(())
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

checked_string_newtype!(
    NonEmptyString,
    check_not_blank,
    "Free text that must contain at least one non-whitespace character."
);

checked_string_newtype!(
    Cuit,
    check_cuit,
    "Argentine tax identifier in `NN-NNNNNNNN-N` form with a whitelisted prefix."
);

checked_string_newtype!(
    MobilePhone,
    check_mobile_phone,
    "Mobile phone number in `NN-NNNNNNNN` form."
);

checked_string_newtype!(
    ClienteEmail,
    check_email,
    "Contact email address with a valid shape."
);
