/// A user record as the directory reports it.
///
/// First name, last name, and email are editable; the avatar is owned by
/// the directory and read-only here.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub avatar: String,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        avatar: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            avatar: avatar.into(),
        }
    }

    /// Field-by-field overlay of a patch onto this record. Fields the patch
    /// leaves unset keep their current values; the id and avatar are never
    /// touched by a patch.
    pub fn with_patch(&self, patch: &UserPatch) -> User {
        User {
            id: self.id.clone(),
            first_name: patch
                .first_name
                .clone()
                .unwrap_or_else(|| self.first_name.clone()),
            last_name: patch
                .last_name
                .clone()
                .unwrap_or_else(|| self.last_name.clone()),
            email: patch.email.clone().unwrap_or_else(|| self.email.clone()),
            avatar: self.avatar.clone(),
        }
    }
}

/// Editable fields for an update call. The directory echoes the same shape
/// back with zero or more authoritative fields set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// Partial-or-full locally held override of a user's fields, keyed by user
/// id in the cache. Fields left unset never erase the base record's values
/// during reconciliation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserOverride {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

impl UserOverride {
    /// Overlay this override onto a fetched record, field by field.
    pub fn apply_to(&self, base: &User) -> User {
        User {
            id: base.id.clone(),
            first_name: self
                .first_name
                .clone()
                .unwrap_or_else(|| base.first_name.clone()),
            last_name: self
                .last_name
                .clone()
                .unwrap_or_else(|| base.last_name.clone()),
            email: self.email.clone().unwrap_or_else(|| base.email.clone()),
            avatar: self.avatar.clone().unwrap_or_else(|| base.avatar.clone()),
        }
    }

    /// Reconstruct a complete record, if every field is set.
    pub fn as_user(&self, id: &str) -> Option<User> {
        Some(User {
            id: id.to_string(),
            first_name: self.first_name.clone()?,
            last_name: self.last_name.clone()?,
            email: self.email.clone()?,
            avatar: self.avatar.clone()?,
        })
    }
}

impl From<User> for UserOverride {
    fn from(user: User) -> Self {
        Self {
            first_name: Some(user.first_name),
            last_name: Some(user.last_name),
            email: Some(user.email),
            avatar: Some(user.avatar),
        }
    }
}

/// One directory page: the records for that page plus the total page count.
/// Pages are never cached; navigation always refetches.
#[derive(Debug, Clone, PartialEq)]
pub struct UserPage {
    pub records: Vec<User>,
    pub total_pages: u32,
}
