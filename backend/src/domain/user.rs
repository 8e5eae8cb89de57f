//! User records as persisted in the backing JSON document.
//!
//! [`UserRecord`] is the stored shape. [`NewUser`] is a candidate whose fields
//! may be missing; [`NewUser::validate`] enforces the presence rules before a
//! record can join the collection. [`UserSummary`] is the `{id, username}`
//! projection served by the listing endpoint.

use serde::{Deserialize, Serialize};

/// Caller-supplied numeric user identifier.
pub type UserIdValue = i64;

/// Validation errors returned by [`NewUser::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// One or more required fields were absent or blank.
    #[error("missing required fields: {}", .missing.join(", "))]
    MissingFields {
        /// Names of the absent fields, in `id`, `username`, `email` order.
        missing: Vec<&'static str>,
    },
}

/// One stored user.
///
/// Records added through [`NewUser::validate`] always carry a non-zero `id`
/// and non-empty `username` and `email`. Records read back from disk are only
/// checked for shape: entries written before ids were required load with no
/// `id` and are kept as they are.
///
/// Serialises with camelCase keys in the order `id`, `firstName`, `lastName`,
/// `username`, `email`; absent fields are omitted.
///
/// # Examples
/// ```
/// use backend::domain::UserRecord;
///
/// let record = UserRecord::new(1, "ab", "ab@x.com").with_names("A", "B");
/// let json = serde_json::to_string(&record).expect("serialise");
/// assert_eq!(
///     json,
///     r#"{"id":1,"firstName":"A","lastName":"B","username":"ab","email":"ab@x.com"}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<UserIdValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
    username: String,
    email: String,
}

impl UserRecord {
    /// Build a record without first or last name.
    pub fn new(id: UserIdValue, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            first_name: None,
            last_name: None,
            username: username.into(),
            email: email.into(),
        }
    }

    /// Attach first and last names.
    #[must_use]
    pub fn with_names(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }

    /// Caller-supplied identifier, absent on legacy records.
    #[must_use]
    pub fn id(&self) -> Option<UserIdValue> {
        self.id
    }

    /// Optional given name.
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    /// Optional family name.
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    /// Unique login handle.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Contact address.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Project the record onto its listing summary.
    #[must_use]
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// Candidate record awaiting validation.
///
/// Blank strings and a zero `id` count as absent, matching how clients of the
/// service have always been treated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewUser {
    /// Caller-supplied identifier.
    pub id: Option<UserIdValue>,
    /// Optional given name.
    pub first_name: Option<String>,
    /// Optional family name.
    pub last_name: Option<String>,
    /// Requested username.
    pub username: Option<String>,
    /// Contact address.
    pub email: Option<String>,
}

impl NewUser {
    /// Check that `id`, `username`, and `email` are present and produce the
    /// record to store.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::NewUser;
    ///
    /// let candidate = NewUser {
    ///     id: Some(3),
    ///     username: Some("cd".into()),
    ///     email: Some("c@d.com".into()),
    ///     ..NewUser::default()
    /// };
    /// let record = candidate.validate().expect("valid candidate");
    /// assert_eq!(record.username(), "cd");
    /// ```
    pub fn validate(self) -> Result<UserRecord, UserValidationError> {
        let Self {
            id,
            first_name,
            last_name,
            username,
            email,
        } = self;

        let id = id.filter(|value| *value != 0);
        let username = username.filter(|value| !value.is_empty());
        let email = email.filter(|value| !value.is_empty());

        match (id, username, email) {
            (Some(id), Some(username), Some(email)) => Ok(UserRecord {
                id: Some(id),
                first_name,
                last_name,
                username,
                email,
            }),
            (id, username, email) => {
                let missing = [
                    ("id", id.is_none()),
                    ("username", username.is_none()),
                    ("email", email.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, absent)| absent.then_some(field))
                .collect();
                Err(UserValidationError::MissingFields { missing })
            }
        }
    }
}

/// `{id, username}` projection of a stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// Caller-supplied identifier; omitted for legacy records without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserIdValue>,
    /// Unique login handle.
    pub username: String,
}
