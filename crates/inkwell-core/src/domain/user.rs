use serde::{Deserialize, Serialize};

/// User - the identity that created or last edited a post.
///
/// Accounts are managed by an external identity provider; only the fields
/// needed to attribute content live here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            username: username.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// "First Last" when a first name is set, otherwise the username.
    pub fn display_name(&self) -> String {
        if self.first_name.trim().is_empty() {
            return self.username.clone();
        }
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim_end()
            .to_string()
    }
}
