//! Strongly Typed Identifiers
//!
//! This module provides type-safe identifier types for the campus backend.
//! Using the newtype pattern, these types prevent accidental misuse of
//! different ID types at compile time.
//!
//! # Example
//!
//! ```
//! use campus_core::{SchoolId, UserId};
//!
//! let school = SchoolId::new();
//! let user = UserId::new();
//!
//! // Type safety: cannot pass UserId where SchoolId is expected
//! fn requires_school(id: SchoolId) -> String {
//!     id.to_string()
//! }
//!
//! let result = requires_school(school);
//! // requires_school(user); // This would not compile!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Error type for ID parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    /// The type of ID that failed to parse
    pub id_type: &'static str,
    /// The underlying UUID parse error message
    pub message: String,
}

impl Display for ParseIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to parse {}: {}", self.id_type, self.message)
    }
}

impl std::error::Error for ParseIdError {}

/// Macro to define a strongly-typed ID type
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random ID using UUID v4.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns a reference to the underlying UUID.
            #[must_use]
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Consumes the ID and returns the underlying UUID.
            #[must_use]
            pub fn into_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Uuid::parse_str(s)
                    .map(Self)
                    .map_err(|e| ParseIdError {
                        id_type: stringify!($name),
                        message: e.to_string(),
                    })
            }
        }
    };
}

define_id!(
    /// Strongly typed identifier for schools.
    ///
    /// A school is the unit of tenancy: each school owns an isolated
    /// database. Provides compile-time type safety to prevent confusion
    /// with other ID types.
    ///
    /// # Example
    ///
    /// ```
    /// use campus_core::SchoolId;
    /// use uuid::Uuid;
    ///
    /// // Create a new random SchoolId
    /// let school_id = SchoolId::new();
    /// println!("School: {}", school_id);
    ///
    /// // Create from existing UUID
    /// let uuid = Uuid::new_v4();
    /// let school_id = SchoolId::from_uuid(uuid);
    /// assert_eq!(school_id.as_uuid(), &uuid);
    ///
    /// // Parse from string
    /// let school_id: SchoolId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
    /// ```
    SchoolId
);

define_id!(
    /// Strongly typed identifier for course modules.
    ///
    /// Modules live inside a school's isolated database.
    ///
    /// # Example
    ///
    /// ```
    /// use campus_core::ModuleId;
    ///
    /// let module_id = ModuleId::new();
    /// println!("Module: {}", module_id);
    /// ```
    ModuleId
);

define_id!(
    /// Strongly typed identifier for users (professors, admins).
    ///
    /// Users live in the central database and are referenced from tenant
    /// databases by raw UUID.
    ///
    /// # Example
    ///
    /// ```
    /// use campus_core::UserId;
    ///
    /// let user_id = UserId::new();
    /// println!("User: {}", user_id);
    /// ```
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    mod school_id_tests {
        use super::*;

        #[test]
        fn test_new_creates_valid_id() {
            let id = SchoolId::new();
            let id_str = id.to_string();
            // UUID format: 8-4-4-4-12 hex digits
            assert_eq!(id_str.len(), 36);
            assert!(id_str.contains('-'));
        }

        #[test]
        fn test_from_uuid_preserves_value() {
            let uuid = Uuid::new_v4();
            let id = SchoolId::from_uuid(uuid);
            assert_eq!(id.as_uuid(), &uuid);
            assert_eq!(id.into_uuid(), uuid);
        }

        #[test]
        fn test_display_returns_uuid_string() {
            let uuid = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
            let id = SchoolId::from_uuid(uuid);
            assert_eq!(id.to_string(), "550e8400-e29b-41d4-a716-446655440000");
        }

        #[test]
        fn test_default_creates_new_id() {
            let id1 = SchoolId::default();
            let id2 = SchoolId::default();
            // Default should create new random IDs
            assert_ne!(id1, id2);
        }
    }

    mod module_id_tests {
        use super::*;

        #[test]
        fn test_new_creates_valid_id() {
            let id = ModuleId::new();
            assert_eq!(id.to_string().len(), 36);
        }

        #[test]
        fn test_from_conversion() {
            let uuid = Uuid::new_v4();
            let id: ModuleId = uuid.into();
            assert_eq!(id.as_uuid(), &uuid);
        }
    }

    mod serde_tests {
        use super::*;

        #[test]
        fn test_school_id_serde_roundtrip() {
            let original = SchoolId::new();
            let json = serde_json::to_string(&original).unwrap();
            let deserialized: SchoolId = serde_json::from_str(&json).unwrap();
            assert_eq!(original, deserialized);
        }

        #[test]
        fn test_user_id_serde_roundtrip() {
            let original = UserId::new();
            let json = serde_json::to_string(&original).unwrap();
            let deserialized: UserId = serde_json::from_str(&json).unwrap();
            assert_eq!(original, deserialized);
        }

        #[test]
        fn test_serializes_as_plain_string() {
            let uuid = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
            let id = ModuleId::from_uuid(uuid);
            let json = serde_json::to_string(&id).unwrap();
            // Should serialize as plain quoted string, not as object
            assert_eq!(json, "\"550e8400-e29b-41d4-a716-446655440000\"");
        }
    }

    mod from_str_tests {
        use super::*;

        #[test]
        fn test_parse_valid_uuid() {
            let id: SchoolId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
            assert_eq!(id.to_string(), "550e8400-e29b-41d4-a716-446655440000");
        }

        #[test]
        fn test_parse_invalid_uuid_returns_error() {
            let result: std::result::Result<SchoolId, _> = "not-a-uuid".parse();
            assert!(result.is_err());
            let err = result.unwrap_err();
            assert_eq!(err.id_type, "SchoolId");
            assert!(!err.message.is_empty());
        }

        #[test]
        fn test_error_display() {
            let result: std::result::Result<UserId, _> = "invalid".parse();
            let err = result.unwrap_err();
            let display = err.to_string();
            assert!(display.contains("UserId"));
            assert!(display.contains("Failed to parse"));
        }
    }

    mod hash_eq_tests {
        use super::*;
        use std::collections::HashSet;

        #[test]
        fn test_same_uuid_is_equal() {
            let uuid = Uuid::new_v4();
            let id1 = UserId::from_uuid(uuid);
            let id2 = UserId::from_uuid(uuid);
            assert_eq!(id1, id2);
        }

        #[test]
        fn test_can_use_in_hashset() {
            let mut set: HashSet<UserId> = HashSet::new();
            let id1 = UserId::new();
            let id2 = UserId::new();

            set.insert(id1);
            set.insert(id2);
            set.insert(id1); // Duplicate

            assert_eq!(set.len(), 2);
            assert!(set.contains(&id1));
        }

        #[test]
        fn test_copy_semantics() {
            let id1 = ModuleId::new();
            let id2 = id1; // Copy
            assert_eq!(id1, id2); // Both are still valid
        }
    }
}
