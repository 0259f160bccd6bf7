//! Values embedded at compile time

use crate::types::TierOutcome;

/// Recognized build-time variable names, highest priority first
pub const BUILD_TIME_NAMES: [&str; 2] = ["VITE_CANISTER_ID_BACKEND", "CANISTER_ID_BACKEND"];

/// Ordered candidate values for the build-time tier
///
/// [`BuildTimeValues::embedded`] captures the variables present in the
/// environment when this crate was compiled. The first non-empty candidate
/// is authoritative.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildTimeValues {
    candidates: Vec<(String, Option<String>)>,
}

impl BuildTimeValues {
    /// Values baked in by the compiler
    pub fn embedded() -> Self {
        Self::from_pairs([
            (BUILD_TIME_NAMES[0], option_env!("VITE_CANISTER_ID_BACKEND")),
            (BUILD_TIME_NAMES[1], option_env!("CANISTER_ID_BACKEND")),
        ])
    }

    /// No build-time values at all
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        Self {
            candidates: pairs
                .into_iter()
                .map(|(name, value)| (name.to_string(), value.map(str::to_string)))
                .collect(),
        }
    }

    /// Single-candidate shorthand
    pub fn single(name: &str, value: &str) -> Self {
        Self::from_pairs([(name, Some(value))])
    }

    /// The first non-empty candidate and the name it was found under
    pub fn first(&self) -> Option<(&str, &str)> {
        self.candidates.iter().find_map(|(name, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| (name.as_str(), v))
        })
    }

    pub fn lookup(&self) -> TierOutcome {
        TierOutcome::from_option(self.first().map(|(_, value)| value.to_string()))
    }
}
