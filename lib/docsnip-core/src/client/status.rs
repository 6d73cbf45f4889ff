use std::ops::{Range, RangeInclusive};

/// Expected HTTP status codes for a call.
///
/// A response outside the expected set fails the exchange with
/// [`DocClientError::UnexpectedStatusCode`](super::DocClientError::UnexpectedStatusCode).
/// The default accepts 200-499 (inclusive of 200, exclusive of 500): a server
/// error is never an expected documentation subject unless asked for
/// explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedStatusCodes {
    // Inclusive (start, end) pairs.
    ranges: Vec<(u16, u16)>,
}

impl Default for ExpectedStatusCodes {
    fn default() -> Self {
        Self::from_exclusive_range(200..500)
    }
}

impl ExpectedStatusCodes {
    /// Expects a single status code.
    pub fn from_single(code: u16) -> Self {
        Self {
            ranges: vec![(code, code)],
        }
    }

    /// Expects an inclusive range of status codes.
    pub fn from_inclusive_range(range: RangeInclusive<u16>) -> Self {
        Self {
            ranges: vec![(*range.start(), *range.end())],
        }
    }

    /// Expects an exclusive range of status codes.
    pub fn from_exclusive_range(range: Range<u16>) -> Self {
        Self {
            ranges: vec![(range.start, range.end.saturating_sub(1))],
        }
    }

    /// Adds a single expected status code.
    #[must_use]
    pub fn add_single(mut self, code: u16) -> Self {
        self.ranges.push((code, code));
        self
    }

    /// Adds an inclusive range of expected status codes.
    #[must_use]
    pub fn add_inclusive_range(mut self, range: RangeInclusive<u16>) -> Self {
        self.ranges.push((*range.start(), *range.end()));
        self
    }

    /// Adds an exclusive range of expected status codes.
    #[must_use]
    pub fn add_exclusive_range(mut self, range: Range<u16>) -> Self {
        self.ranges.push((range.start, range.end.saturating_sub(1)));
        self
    }

    /// Whether the given status code is expected.
    pub fn contains(&self, code: u16) -> bool {
        self.ranges
            .iter()
            .any(|(start, end)| (*start..=*end).contains(&code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_accepts_2xx_through_4xx() {
        let codes = ExpectedStatusCodes::default();
        assert!(codes.contains(200));
        assert!(codes.contains(404));
        assert!(codes.contains(499));
        assert!(!codes.contains(500));
        assert!(!codes.contains(199));
    }

    #[test]
    fn test_single_and_ranges_combine() {
        let codes = ExpectedStatusCodes::from_single(200)
            .add_inclusive_range(301..=302)
            .add_exclusive_range(400..403);
        assert!(codes.contains(200));
        assert!(codes.contains(301));
        assert!(codes.contains(302));
        assert!(codes.contains(402));
        assert!(!codes.contains(403));
        assert!(!codes.contains(201));
    }
}
