use serde::{Deserialize, Serialize};

use crate::domain::common::{Identifiable, NamedEntity};

/// The signed-in user. Authentication itself lives outside this crate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

impl UserIdentity {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            photo: None,
        }
    }
}

impl Identifiable for UserIdentity {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for UserIdentity {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Context passed explicitly into every screen load.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: UserIdentity,
}

impl Session {
    pub fn new(user: UserIdentity) -> Self {
        Self { user }
    }

    /// Store key holding this user's transactions.
    pub fn transactions_key(&self) -> String {
        crate::storage::transactions_key(&self.user)
    }
}
