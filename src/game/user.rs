use serde::{Deserialize, Serialize};

/// Section order used when a user record carries none (local users, older API
/// responses).
pub const DEFAULT_PROFILE_ORDER: [&str; 7] = [
    "me",
    "recent_activity",
    "beatmaps",
    "historical",
    "kudosu",
    "top_ranks",
    "medals",
];

/// Ids at or below this are local/system users and are never requested.
pub const MAX_LOCAL_USER_ID: u64 = 1;

/// User record as returned by `GET /users/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ApiUser {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub profile_order: Vec<String>,
}

/// What the caller knows about a user before the full record arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    pub id: u64,
    pub username: String,
    pub is_bot: bool,
}

impl UserRef {
    pub fn new(id: u64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            is_bot: false,
        }
    }

    #[inline(always)]
    pub const fn is_online(&self) -> bool {
        self.id > MAX_LOCAL_USER_ID
    }
}

impl From<&UserRef> for ApiUser {
    fn from(user: &UserRef) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            is_bot: user.is_bot,
            profile_order: DEFAULT_PROFILE_ORDER.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}
