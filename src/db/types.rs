use std::fmt;

/// Topic keys accepted on the wire, mapped 1:1 to the labels stored in `questions.topic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Topic {
    Algebra,
    IntermediateAlgebra,
    Prealgebra,
    Geometry,
    NumberTheory,
    CountingProbability,
    Precalculus,
}

impl Topic {
    pub(crate) const ALL: [Topic; 7] = [
        Topic::Algebra,
        Topic::IntermediateAlgebra,
        Topic::Prealgebra,
        Topic::Geometry,
        Topic::NumberTheory,
        Topic::CountingProbability,
        Topic::Precalculus,
    ];

    pub(crate) fn key(self) -> &'static str {
        match self {
            Self::Algebra => "algebra",
            Self::IntermediateAlgebra => "intermediate_algebra",
            Self::Prealgebra => "prealgebra",
            Self::Geometry => "geometry",
            Self::NumberTheory => "number_theory",
            Self::CountingProbability => "counting_probability",
            Self::Precalculus => "precalculus",
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Algebra => "Algebra",
            Self::IntermediateAlgebra => "Intermediate Algebra",
            Self::Prealgebra => "Prealgebra",
            Self::Geometry => "Geometry",
            Self::NumberTheory => "Number Theory",
            Self::CountingProbability => "Counting & Probability",
            Self::Precalculus => "Precalculus",
        }
    }

    pub(crate) fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|topic| topic.key() == key)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Difficulty level, always within the `1..=5` range the table constraint enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Difficulty(i32);

impl Difficulty {
    pub(crate) const MIN: i32 = 1;
    pub(crate) const MAX: i32 = 5;

    pub(crate) fn new(value: i32) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Accepts exactly one ASCII digit, so `"03"` or `"+3"` are rejected.
    pub(crate) fn from_digit(raw: &str) -> Option<Self> {
        let mut chars = raw.chars();
        let digit = chars.next()?.to_digit(10)?;
        if chars.next().is_some() {
            return None;
        }
        Self::new(digit as i32)
    }

    pub(crate) fn get(self) -> i32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_keys_round_trip_to_labels() {
        for topic in Topic::ALL {
            assert_eq!(Topic::from_key(topic.key()), Some(topic));
        }
        assert_eq!(Topic::CountingProbability.label(), "Counting & Probability");
        assert_eq!(Topic::IntermediateAlgebra.label(), "Intermediate Algebra");
    }

    #[test]
    fn topic_lookup_is_exact() {
        assert_eq!(Topic::from_key("Algebra"), None);
        assert_eq!(Topic::from_key("algebra "), None);
        assert_eq!(Topic::from_key("all"), None);
        assert_eq!(Topic::from_key("algebra' OR '1'='1"), None);
    }

    #[test]
    fn difficulty_from_digit_bounds() {
        assert_eq!(Difficulty::from_digit("1").map(Difficulty::get), Some(1));
        assert_eq!(Difficulty::from_digit("5").map(Difficulty::get), Some(5));
        assert_eq!(Difficulty::from_digit("0"), None);
        assert_eq!(Difficulty::from_digit("6"), None);
        assert_eq!(Difficulty::from_digit("03"), None);
        assert_eq!(Difficulty::from_digit(""), None);
        assert_eq!(Difficulty::from_digit("?"), None);
    }
}
