use std::fmt;

/// Identity every record read is performed as.
///
/// Passed explicitly through resolution so access rules and the locale of the user
/// apply to each read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActingUser {
    pub id: i32,
    pub lang: String,
    pub is_admin: bool,
}

impl From<entity::app_user::Model> for ActingUser {
    fn from(user: entity::app_user::Model) -> Self {
        Self {
            id: user.id,
            lang: user.lang,
            is_admin: user.is_admin,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessOperation {
    Read,
    Write,
}

impl fmt::Display for AccessOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
        }
    }
}
