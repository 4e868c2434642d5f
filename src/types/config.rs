//! Configuration-related type-safe wrappers using NonZero types
//!
//! This module provides validated configuration types that enforce
//! invariants at the type level using Rust's NonZero types.

use std::num::{NonZeroU64, NonZeroUsize};

/// Macro to generate NonZero newtype wrappers with standard implementations
///
/// Each type gets: new(), get(), DEFAULT, Display, FromStr, From, Serialize, Deserialize
macro_rules! nonzero_newtype {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident($nonzero:ty : $primitive:ty, default $default:expr);
    ) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis struct $name($nonzero);

        impl $name {
            /// Default value used when nothing is configured
            pub const DEFAULT: Self = match <$nonzero>::new($default) {
                Some(nz) => Self(nz),
                None => panic!("default must be non-zero"),
            };

            /// Create a new instance, returning None if value is 0
            #[must_use]
            pub const fn new(value: $primitive) -> Option<Self> {
                match <$nonzero>::new(value) {
                    Some(nz) => Some(Self(nz)),
                    None => None,
                }
            }

            /// Get the inner value
            #[must_use]
            #[inline]
            pub const fn get(&self) -> $primitive {
                self.0.get()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::DEFAULT
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.get())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value: $primitive = s
                    .trim()
                    .parse()
                    .map_err(|e| format!("Invalid {}: {}", stringify!($name), e))?;
                Self::new(value).ok_or_else(|| format!("{} cannot be 0", stringify!($name)))
            }
        }

        impl From<$name> for $primitive {
            fn from(val: $name) -> Self {
                val.get()
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_u64(self.get() as u64)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let value = <$primitive>::deserialize(deserializer)?;
                Self::new(value).ok_or_else(|| {
                    serde::de::Error::custom(concat!(stringify!($name), " cannot be 0"))
                })
            }
        }
    };
}

nonzero_newtype! {
    /// Maximum number of entries a moka cache may hold
    pub struct CacheCapacity(NonZeroU64 : u64, default 10_000);
}

nonzero_newtype! {
    /// Distance from either window edge at which a page load is triggered
    pub struct Lookahead(NonZeroUsize : usize, default 8);
}

nonzero_newtype! {
    /// Number of items a loader returns per page
    pub struct PageSize(NonZeroUsize : usize, default 120);
}

/// Helper for (de)serializing Duration as whole seconds
///
/// TOML configs specify durations in seconds, so we need
/// custom serde to convert from u64 seconds to Duration
pub mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
