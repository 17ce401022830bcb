//! Resource shape validation.
//!
//! A [`ResourceShape`] is a fixed list of required fields and the kind of
//! value each must hold. Validation is pure: it looks only at the value passed
//! in and reports the first field that breaks the contract.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::fmt;

use super::error::ShapeViolation;
use crate::models::response::json_type_name;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

/// The kind of value a field must hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// An integer greater than zero.
    PositiveInteger,
    /// A string with at least one character.
    NonEmptyString,
    /// A string shaped like `local@domain.tld`.
    Email,
}

impl FieldKind {
    fn check(
        self,
        shape: &'static str,
        field: &'static str,
        value: &Value,
    ) -> Result<(), ShapeViolation> {
        let wrong_type = || ShapeViolation::WrongType {
            shape,
            field,
            expected: self,
            actual: json_type_name(value),
        };
        let constraint = |shown: String| ShapeViolation::Constraint {
            shape,
            field,
            expected: self,
            value: shown,
        };

        match self {
            FieldKind::PositiveInteger => {
                let Value::Number(n) = value else {
                    return Err(wrong_type());
                };
                match (n.as_i64(), n.as_u64()) {
                    (Some(i), _) if i > 0 => Ok(()),
                    (None, Some(_)) => Ok(()),
                    (Some(_), _) => Err(constraint(n.to_string())),
                    (None, None) => Err(wrong_type()),
                }
            }
            FieldKind::NonEmptyString => {
                let Value::String(s) = value else {
                    return Err(wrong_type());
                };
                if s.is_empty() {
                    Err(constraint("\"\"".to_string()))
                } else {
                    Ok(())
                }
            }
            FieldKind::Email => {
                let Value::String(s) = value else {
                    return Err(wrong_type());
                };
                if EMAIL_REGEX.is_match(s) {
                    Ok(())
                } else {
                    Err(constraint(format!("{:?}", s)))
                }
            }
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::PositiveInteger => write!(f, "a positive integer"),
            FieldKind::NonEmptyString => write!(f, "a non-empty string"),
            FieldKind::Email => write!(f, "an email address"),
        }
    }
}

/// A named set of required fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceShape {
    pub name: &'static str,
    pub fields: &'static [(&'static str, FieldKind)],
}

/// Contract for a post.
pub const POST_SHAPE: ResourceShape = ResourceShape {
    name: "post",
    fields: &[
        ("id", FieldKind::PositiveInteger),
        ("userId", FieldKind::PositiveInteger),
        ("title", FieldKind::NonEmptyString),
        ("body", FieldKind::NonEmptyString),
    ],
};

/// Contract for a comment.
pub const COMMENT_SHAPE: ResourceShape = ResourceShape {
    name: "comment",
    fields: &[
        ("postId", FieldKind::PositiveInteger),
        ("id", FieldKind::PositiveInteger),
        ("name", FieldKind::NonEmptyString),
        ("email", FieldKind::Email),
        ("body", FieldKind::NonEmptyString),
    ],
};

impl ResourceShape {
    /// Checks `resource` against this shape.
    ///
    /// Presence of every field is checked before any types, so a resource
    /// missing a field reports the missing field first.
    pub fn validate(&self, resource: &Value) -> Result<(), ShapeViolation> {
        let Value::Object(map) = resource else {
            return Err(ShapeViolation::NotAnObject {
                shape: self.name,
                actual: json_type_name(resource),
            });
        };

        for (field, _) in self.fields {
            if !map.contains_key(*field) {
                return Err(ShapeViolation::MissingField {
                    shape: self.name,
                    field: *field,
                });
            }
        }

        for (field, kind) in self.fields {
            kind.check(self.name, *field, &map[*field])?;
        }

        Ok(())
    }

    /// Checks every item of a listing against this shape.
    pub fn validate_all(&self, resources: &[Value]) -> Result<(), ShapeViolation> {
        resources.iter().try_for_each(|resource| self.validate(resource))
    }
}

/// Validates a post: `id` and `userId` positive integers, `title` and `body`
/// non-empty strings.
pub fn validate_resource_shape(resource: &Value) -> Result<(), ShapeViolation> {
    POST_SHAPE.validate(resource)
}
