//! Storage-assigned integer identifiers.
//!
//! Each record kind gets its own newtype so a `CommentId` can never be passed
//! where a `PostId` is expected.

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw storage identifier.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// The raw storage identifier.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

record_id! {
    /// Identifier of a [`super::User`].
    UserId
}

record_id! {
    /// Identifier of a [`super::Category`].
    CategoryId
}

record_id! {
    /// Identifier of a [`super::Post`].
    PostId
}

record_id! {
    /// Identifier of a [`super::Comment`].
    CommentId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialises_as_bare_integer() {
        let json = serde_json::to_string(&PostId::new(42)).expect("serialise id");
        assert_eq!(json, "42");
        let parsed: CommentId = serde_json::from_str("7").expect("parse id");
        assert_eq!(parsed.get(), 7);
    }
}
