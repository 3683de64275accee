//! Priority codes as carried by the export (`1..=4`).

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
    /// Missing, or a code outside `1..=4`.
    Unknown,
}

impl Priority {
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(1) => Self::Low,
            Some(2) => Self::Medium,
            Some(3) => Self::High,
            Some(4) => Self::Critical,
            _ => Self::Unknown,
        }
    }

    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Low => Some(1),
            Self::Medium => Some(2),
            Self::High => Some(3),
            Self::Critical => Some(4),
            Self::Unknown => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_map_to_labels() {
        assert_eq!(Priority::from_code(Some(1)).label(), "Low");
        assert_eq!(Priority::from_code(Some(2)).label(), "Medium");
        assert_eq!(Priority::from_code(Some(3)).label(), "High");
        assert_eq!(Priority::from_code(Some(4)).label(), "Critical");
    }

    #[test]
    fn test_missing_or_out_of_range_is_unknown() {
        assert_eq!(Priority::from_code(None), Priority::Unknown);
        assert_eq!(Priority::from_code(Some(0)), Priority::Unknown);
        assert_eq!(Priority::from_code(Some(9)).to_string(), "Unknown");
    }

    #[test]
    fn test_code_is_inverse_of_from_code() {
        for code in 1..=4 {
            assert_eq!(Priority::from_code(Some(code)).code(), Some(code));
        }
    }
}
