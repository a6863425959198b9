use serde::Deserialize;

/// Size pattern of a drawn digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Big,
    Small,
}

impl SizeClass {
    /// Get the opposite class.
    pub fn opposite(&self) -> SizeClass {
        match self {
            SizeClass::Big => SizeClass::Small,
            SizeClass::Small => SizeClass::Big,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SizeClass::Big => "Big",
            SizeClass::Small => "Small",
        }
    }
}

impl std::fmt::Display for SizeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Threshold rule mapping a digit to a size class.
///
/// Digits `>= threshold` get `at_or_above`, everything below gets the
/// opposite class. Two variants of this rule have been in use, so the
/// direction is a value rather than a hardcoded comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SizePolicy {
    pub threshold: u8,
    pub at_or_above: SizeClass,
}

impl SizePolicy {
    /// 5-9 is Big, 0-4 is Small.
    pub const BIG_AT_OR_ABOVE_FIVE: SizePolicy = SizePolicy {
        threshold: 5,
        at_or_above: SizeClass::Big,
    };

    /// Contrarian variant: 5-9 is Small, 0-4 is Big.
    pub const SMALL_AT_OR_ABOVE_FIVE: SizePolicy = SizePolicy {
        threshold: 5,
        at_or_above: SizeClass::Small,
    };

    pub fn classify(&self, number: u8) -> SizeClass {
        if number >= self.threshold {
            self.at_or_above
        } else {
            self.at_or_above.opposite()
        }
    }
}

impl Default for SizePolicy {
    fn default() -> Self {
        Self::BIG_AT_OR_ABOVE_FIVE
    }
}

/// Classify a drawn digit under `policy`.
pub fn derive_size_class(number: u8, policy: &SizePolicy) -> SizeClass {
    policy.classify(number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_boundary() {
        let policy = SizePolicy::default();
        assert_eq!(derive_size_class(4, &policy), SizeClass::Small);
        assert_eq!(derive_size_class(5, &policy), SizeClass::Big);
    }

    #[test]
    fn test_total_over_digits() {
        let policy = SizePolicy::BIG_AT_OR_ABOVE_FIVE;
        for n in 0..=9u8 {
            let expected = if n >= 5 { SizeClass::Big } else { SizeClass::Small };
            assert_eq!(derive_size_class(n, &policy), expected, "digit {}", n);
        }
    }

    #[test]
    fn test_contrarian_variant_is_mirror() {
        let big = SizePolicy::BIG_AT_OR_ABOVE_FIVE;
        let small = SizePolicy::SMALL_AT_OR_ABOVE_FIVE;
        for n in 0..=9u8 {
            assert_eq!(big.classify(n), small.classify(n).opposite());
        }
    }

    #[test]
    fn test_custom_threshold() {
        let policy = SizePolicy {
            threshold: 7,
            at_or_above: SizeClass::Big,
        };
        assert_eq!(policy.classify(6), SizeClass::Small);
        assert_eq!(policy.classify(7), SizeClass::Big);
    }

    #[test]
    fn test_deserialize_policy() {
        let policy: SizePolicy = toml::from_str("threshold = 5\nat_or_above = \"small\"").unwrap();
        assert_eq!(policy, SizePolicy::SMALL_AT_OR_ABOVE_FIVE);
    }
}
