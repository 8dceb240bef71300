// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(ClaimId);

impl ClaimId {
    /// Parses the value attribute carried by a rendered checkbox.
    pub fn parse(value: &str) -> Result<Self> {
        let parsed = value
            .trim()
            .parse::<i64>()
            .with_context(|| format!("invalid claim id {value:?}"))?;
        Ok(Self(parsed))
    }
}

#[cfg(test)]
mod tests {
    use super::ClaimId;

    #[test]
    fn parse_accepts_checkbox_values_with_whitespace() {
        assert_eq!(ClaimId::parse(" 42 ").expect("valid id"), ClaimId::new(42));
    }

    #[test]
    fn parse_rejects_non_numeric_values() {
        let error = ClaimId::parse("abc").expect_err("non-numeric id should fail");
        assert!(error.to_string().contains("invalid claim id"));
    }

    #[test]
    fn display_matches_raw_value() {
        assert_eq!(ClaimId::new(7).to_string(), "7");
    }
}
