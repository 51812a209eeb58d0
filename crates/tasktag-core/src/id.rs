use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Generate a fresh identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Trailing hex digits used when rendering identifiers in compact form.
            ///
            /// Taken from the random tail; the leading digits of a v7 id are a
            /// timestamp and repeat for ids created close together.
            #[must_use]
            pub fn short(&self) -> String {
                let text = self.0.simple().to_string();
                text[text.len() - SHORT_LEN..].to_owned()
            }

            /// Whether `reference` (hyphens ignored, case-insensitive) is a
            /// prefix of the full id or of its [`short`](Self::short) form.
            #[must_use]
            pub fn matches_ref(&self, reference: &str) -> bool {
                let wanted: String = reference
                    .chars()
                    .filter(|c| *c != '-')
                    .map(|c| c.to_ascii_lowercase())
                    .collect();
                if wanted.is_empty() {
                    return false;
                }
                let full = self.0.simple().to_string();
                full.starts_with(&wanted) || full[full.len() - SHORT_LEN..].starts_with(&wanted)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                s.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(d: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(d)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

/// Number of hex digits shown by `short()`.
const SHORT_LEN: usize = 8;

uuid_id!(
    /// Identifier of a task (UUID v7).
    TaskId
);

uuid_id!(
    /// Identifier of a tag (UUID v7).
    TagId
);
