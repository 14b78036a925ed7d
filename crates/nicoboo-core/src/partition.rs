//! Storage partition for per-identity data.
//!
//! The identity provider hands us a nullable opaque user id. `None` becomes
//! [`Partition::Guest`], which never shares rows with any signed-in user.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Partition {
    #[default]
    Guest,
    User(String),
}

impl Partition {
    /// Map an identity-provider user id to a partition.
    ///
    /// Blank ids are treated as guest.
    pub fn from_user_id(user_id: Option<&str>) -> Self {
        match user_id.map(str::trim) {
            Some(id) if !id.is_empty() => Partition::User(id.to_string()),
            _ => Partition::Guest,
        }
    }

    /// The value stored in `user_id` columns (`NULL` for guest).
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Partition::Guest => None,
            Partition::User(id) => Some(id),
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Partition::Guest => f.write_str("guest"),
            Partition::User(id) => write!(f, "user:{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_and_blank_ids_are_guest() {
        assert_eq!(Partition::from_user_id(None), Partition::Guest);
        assert_eq!(Partition::from_user_id(Some("  ")), Partition::Guest);
    }

    #[test]
    fn user_id_round_trips_through_partition() {
        let p = Partition::from_user_id(Some("abc123"));
        assert_eq!(p.user_id(), Some("abc123"));
        assert_ne!(p, Partition::Guest);
        assert_eq!(p.to_string(), "user:abc123");
    }
}
