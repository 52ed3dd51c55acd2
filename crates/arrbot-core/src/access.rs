//! Allow-list gate.
//!
//! An empty list lets everyone in. A malformed list also lets everyone in,
//! with a warning, rather than locking the owner out of their own bot.

/// Telegram user ids allowed to talk to the bot, in configured order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    users: Vec<i64>,
}

impl AllowList {
    /// A list that admits everyone.
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Build a list from explicit ids.
    pub fn from_ids(ids: impl IntoIterator<Item = i64>) -> Self {
        let mut users = Vec::new();
        for id in ids {
            if !users.contains(&id) {
                users.push(id);
            }
        }
        Self { users }
    }

    /// Parse a comma-separated id list such as `"123, 456"`.
    ///
    /// `None`, empty and whitespace-only input all mean "allow all". Any
    /// token that is not an integer degrades the whole list to "allow all".
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::allow_all();
        };

        let mut users = Vec::new();
        for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            match token.parse::<i64>() {
                Ok(id) => users.push(id),
                Err(e) => {
                    tracing::warn!(
                        token = %token,
                        error = %e,
                        "Malformed ALLOWED_USER_IDS entry; allowing all users"
                    );
                    return Self::allow_all();
                }
            }
        }
        Self::from_ids(users)
    }

    /// Whether `user_id` may use the bot.
    pub fn is_allowed(&self, user_id: i64) -> bool {
        self.users.is_empty() || self.users.contains(&user_id)
    }

    /// True when no restriction is configured.
    pub fn is_open(&self) -> bool {
        self.users.is_empty()
    }

    /// The first configured id; VPN alerts go to this user.
    pub fn first(&self) -> Option<i64> {
        self.users.first().copied()
    }

    /// Number of configured ids.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// True when no ids are configured.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
