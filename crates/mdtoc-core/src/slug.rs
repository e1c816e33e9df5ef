//! # Heading Slugs
//!
//! Converts heading text into the anchor fragment that Markdown renderers
//! generate for it. The transform is lossy and deliberately small:
//!
//! 1. lowercase every character,
//! 2. drop the characters named by the active [`SlugPolicy`],
//! 3. replace each remaining space with `-`, one for one.
//!
//! Nothing else is touched. Two different headings may produce the same
//! slug; callers must not assume anchors are unique.
//!
//! ## Removal Policy
//!
//! The set of removed characters has drifted between revisions of this
//! tool, so it is an explicit value rather than a constant. The default is
//! [`SlugPolicy::Semicolon`]: GitHub keeps underscores in its anchors, so
//! the anchor must keep them even when the display text escapes them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownPolicy;

/// Character class removed from heading text when computing an anchor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlugPolicy {
    /// Remove `;` and `_`.
    SemicolonUnderscore,
    /// Remove `;` only. Underscores survive into the anchor.
    #[default]
    Semicolon,
    /// Remove `;` and `\`. Lets pre-escaped `\_` in a heading map to `_`.
    SemicolonBackslash,
}

impl SlugPolicy {
    /// Every policy, in declaration order.
    pub const ALL: [SlugPolicy; 3] = [
        SlugPolicy::SemicolonUnderscore,
        SlugPolicy::Semicolon,
        SlugPolicy::SemicolonBackslash,
    ];

    /// The characters this policy strips from anchors.
    pub fn removed_chars(self) -> &'static [char] {
        match self {
            SlugPolicy::SemicolonUnderscore => &[';', '_'],
            SlugPolicy::Semicolon => &[';'],
            SlugPolicy::SemicolonBackslash => &[';', '\\'],
        }
    }

    /// Whether `c` is stripped under this policy.
    pub fn removes(self, c: char) -> bool {
        self.removed_chars().contains(&c)
    }

    /// The name used on the command line and in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            SlugPolicy::SemicolonUnderscore => "semicolon-underscore",
            SlugPolicy::Semicolon => "semicolon",
            SlugPolicy::SemicolonBackslash => "semicolon-backslash",
        }
    }
}

impl fmt::Display for SlugPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SlugPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SlugPolicy::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPolicy(s.to_string()))
    }
}

/// Compute the anchor for `text` under `policy`.
///
/// Total over all inputs: the empty string yields an empty anchor.
pub fn slugify(text: &str, policy: SlugPolicy) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !policy.removes(*c))
        .map(|c| if c == ' ' { '-' } else { c })
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_policy() -> impl Strategy<Value = SlugPolicy> {
        prop_oneof![
            Just(SlugPolicy::SemicolonUnderscore),
            Just(SlugPolicy::Semicolon),
            Just(SlugPolicy::SemicolonBackslash),
        ]
    }

    proptest! {
        /// Same input, same anchor.
        #[test]
        fn slug_is_pure(text in ".{0,64}", policy in any_policy()) {
            prop_assert_eq!(slugify(&text, policy), slugify(&text, policy));
        }

        /// Anchors never contain spaces or removed characters.
        #[test]
        fn slug_has_no_spaces_or_removed_chars(text in ".{0,64}", policy in any_policy()) {
            let slug = slugify(&text, policy);
            prop_assert!(!slug.contains(' '));
            prop_assert!(!slug.chars().any(|c| policy.removes(c)));
        }

        /// Without removable characters the slug is lowercase with hyphens for spaces.
        #[test]
        fn slug_of_clean_text(text in "[a-zA-Z0-9 .,:!?()'-]{0,64}", policy in any_policy()) {
            let expected = text.to_lowercase().replace(' ', "-");
            prop_assert_eq!(slugify(&text, policy), expected);
        }
    }
}
