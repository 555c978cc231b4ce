//! Score buckets for display. Lower bounds are inclusive.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SlopRating {
    Minimal,
    Low,
    Moderate,
    High,
    Extreme,
}

impl SlopRating {
    pub fn of(score: u8) -> Self {
        match score {
            80.. => Self::Extreme,
            60..=79 => Self::High,
            40..=59 => Self::Moderate,
            20..=39 => Self::Low,
            _ => Self::Minimal,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Extreme => "Extreme Slop",
            Self::High => "High Slop",
            Self::Moderate => "Moderate Slop",
            Self::Low => "Low Slop",
            Self::Minimal => "Minimal Slop",
        }
    }

    /// Colour tag consumed by the UI.
    pub fn color(self) -> &'static str {
        match self {
            Self::Extreme => "#dc2626",
            Self::High => "#ea580c",
            Self::Moderate => "#ca8a04",
            Self::Low => "#65a30d",
            Self::Minimal => "#16a34a",
        }
    }
}

pub fn rating_of(score: u8) -> &'static str {
    SlopRating::of(score).label()
}

pub fn color_of(score: u8) -> &'static str {
    SlopRating::of(score).color()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_belong_to_higher_bucket() {
        assert_eq!(rating_of(80), "Extreme Slop");
        assert_eq!(rating_of(79), "High Slop");
        assert_eq!(rating_of(60), "High Slop");
        assert_eq!(rating_of(59), "Moderate Slop");
        assert_eq!(rating_of(40), "Moderate Slop");
        assert_eq!(rating_of(20), "Low Slop");
        assert_eq!(rating_of(19), "Minimal Slop");
        assert_eq!(rating_of(0), "Minimal Slop");
        assert_eq!(rating_of(100), "Extreme Slop");
    }

    #[test]
    fn colors_follow_same_buckets() {
        assert_eq!(color_of(80), SlopRating::Extreme.color());
        assert_eq!(color_of(79), SlopRating::High.color());
        assert_ne!(color_of(19), color_of(20));
    }
}
