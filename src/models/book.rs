//! Book record model and its validation rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnNull};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::book_id::{deserialize_optional_id, BookId};

/// Circulation status of a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum BookStatus {
    CheckedIn,
    CheckedOut,
}

impl BookStatus {
    pub const ALL: [BookStatus; 2] = [BookStatus::CheckedIn, BookStatus::CheckedOut];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::CheckedIn => "CheckedIn",
            BookStatus::CheckedOut => "CheckedOut",
        }
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CheckedIn" => Ok(BookStatus::CheckedIn),
            "CheckedOut" => Ok(BookStatus::CheckedOut),
            _ => Err(format!("Invalid book status: {}", s)),
        }
    }
}

/// Book record as exchanged with clients.
///
/// Missing and `null` fields decode to their zero value (empty string,
/// rating 0, the epoch for `publish_date`) so that the validator reports them.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct Book {
    /// Assigned by the server on create
    #[serde(
        default,
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, example = "5acb40295843ef00e69e28d2")]
    pub id: Option<BookId>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Value must be present and not empty: Title"))]
    pub title: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Value must be present and not empty: Author"))]
    pub author: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    #[validate(custom(function = "not_blank", message = "Value must be present and not empty: Publisher"))]
    pub publisher: String,
    /// RFC 3339 timestamp
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    #[validate(custom(function = "not_epoch", message = "Value must be a valid date (ISO 8601): Publish Date"))]
    pub publish_date: DateTime<Utc>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    #[validate(range(min = 1, max = 3, message = "Value must be in specified range: Rating (1-3)"))]
    pub rating: i64,
    /// One of `CheckedIn`, `CheckedOut`
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    #[validate(custom(function = "known_status", message = "Value must be in specified set: Status (CheckedIn,CheckedOut)"))]
    pub status: String,
}

/// Fields in the order their violations are reported
const RULE_ORDER: [&str; 6] = ["title", "author", "publisher", "publish_date", "rating", "status"];

impl Book {
    /// Run every rule and return the violation messages in rule order.
    /// An empty list means the record is valid.
    pub fn violations(&self) -> Vec<String> {
        let errors = match self.validate() {
            Ok(()) => return Vec::new(),
            Err(errors) => errors,
        };
        let fields = errors.field_errors();

        RULE_ORDER
            .iter()
            .filter_map(|field| fields.get(*field))
            .flat_map(|errs| errs.iter())
            .map(|err| {
                err.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string())
            })
            .collect()
    }

    /// Violations joined with `"; "`, or `None` when the record is valid
    pub fn validation_message(&self) -> Option<String> {
        let violations = self.violations();
        if violations.is_empty() {
            None
        } else {
            Some(violations.join("; "))
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn not_epoch(value: &DateTime<Utc>) -> Result<(), ValidationError> {
    if value.timestamp() == 0 {
        return Err(ValidationError::new("epoch"));
    }
    Ok(())
}

fn known_status(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<BookStatus>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("status"))
}
