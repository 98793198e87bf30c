//! Delimiter configuration and the UNA service string advice
//!
//! The UNA header is a fixed 9-character preamble: `UNA`, then the
//! component separator, element separator, decimal point, release
//! character, a space, and the segment separator. The decimal point is
//! fixed at `.`; components carry preformatted text, so the parser never
//! interprets it.

use std::fmt;

/// The decimal notation character written into the UNA header.
pub const DECIMAL_POINT: char = '.';

const UNA_PREFIX: &str = "UNA";

/// Length of the UNA header in characters.
pub const UNA_HEADER_LEN: usize = 9;

/// The active delimiter set for one document.
///
/// All control characters must be pairwise distinct. The newline character
/// is reserved for line counting and may only be chosen as the segment
/// separator (which keeps human-readable, one-segment-per-line output
/// possible).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DelimiterConfig {
    pub segment_separator: char,
    pub element_separator: char,
    pub component_separator: char,
    pub escape_character: char,
}

/// Rejection reasons for a delimiter set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelimiterError {
    /// Two control characters (or a control character and the decimal
    /// point) are identical.
    Duplicate(char),
    /// Newline was chosen for something other than the segment separator.
    Newline(&'static str),
}

impl fmt::Display for DelimiterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DelimiterError::Duplicate(c) => {
                write!(f, "Duplicate delimiter character {:?}", c)
            }
            DelimiterError::Newline(role) => {
                write!(f, "{} cannot be '\\n'", role)
            }
        }
    }
}

impl std::error::Error for DelimiterError {}

impl DelimiterConfig {
    /// Build a delimiter set, rejecting duplicates and misplaced newlines.
    pub fn new(
        segment_separator: char,
        element_separator: char,
        component_separator: char,
        escape_character: char,
    ) -> Result<Self, DelimiterError> {
        if element_separator == '\n' {
            return Err(DelimiterError::Newline("Element separator"));
        }
        if component_separator == '\n' {
            return Err(DelimiterError::Newline("Component separator"));
        }
        if escape_character == '\n' {
            return Err(DelimiterError::Newline("Release character"));
        }

        let config = Self {
            segment_separator,
            element_separator,
            component_separator,
            escape_character,
        };

        let chars = [
            segment_separator,
            element_separator,
            component_separator,
            escape_character,
            DECIMAL_POINT,
        ];
        for (i, a) in chars.iter().enumerate() {
            if chars[i + 1..].contains(a) {
                return Err(DelimiterError::Duplicate(*a));
            }
        }

        Ok(config)
    }

    /// Parse the delimiter set out of a 9-character UNA header.
    ///
    /// Only the `UNA` prefix, the length, and pairwise distinctness of the
    /// six declared characters are enforced; the decimal point and the
    /// space are taken as declared.
    pub fn from_una_header(header: &str) -> Option<Self> {
        let chars: Vec<char> = header.chars().collect();
        if chars.len() != UNA_HEADER_LEN || !header.starts_with(UNA_PREFIX) {
            return None;
        }

        let declared = &chars[3..9];
        for (i, a) in declared.iter().enumerate() {
            if declared[i + 1..].contains(a) {
                return None;
            }
        }

        Some(Self {
            component_separator: chars[3],
            element_separator: chars[4],
            escape_character: chars[6],
            segment_separator: chars[8],
        })
    }

    /// Render the 9-character UNA header for this delimiter set.
    pub fn una_header(&self) -> String {
        format!(
            "{}{}{}{}{} {}",
            UNA_PREFIX,
            self.component_separator,
            self.element_separator,
            DECIMAL_POINT,
            self.escape_character,
            self.segment_separator
        )
    }

    /// Escape every character of `text` that collides with the delimiter
    /// set or the release character itself.
    pub fn escape(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if self.is_control_char(c) {
                out.push(self.escape_character);
            }
            out.push(c);
        }
        out
    }

    fn is_control_char(&self, c: char) -> bool {
        c == self.segment_separator
            || c == self.element_separator
            || c == self.component_separator
            || c == self.escape_character
    }
}

impl Default for DelimiterConfig {
    /// The conventional EDIFACT delimiters: `UNA:+.? '`
    fn default() -> Self {
        Self {
            segment_separator: '\'',
            element_separator: '+',
            component_separator: ':',
            escape_character: '?',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_header() {
        assert_eq!(DelimiterConfig::default().una_header(), "UNA:+.? '");
    }

    #[test]
    fn test_header_round_trip() {
        let config = DelimiterConfig::new('\n', '+', ':', '?').unwrap();
        let parsed = DelimiterConfig::from_una_header(&config.una_header()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_rejects_duplicates() {
        assert_eq!(
            DelimiterConfig::new('+', '+', ':', '?'),
            Err(DelimiterError::Duplicate('+'))
        );
        // Decimal point is part of the declared set
        assert_eq!(
            DelimiterConfig::new('\'', '+', '.', '?'),
            Err(DelimiterError::Duplicate('.'))
        );
    }

    #[test]
    fn test_rejects_newline_outside_segment_separator() {
        assert!(DelimiterConfig::new('\'', '\n', ':', '?').is_err());
        assert!(DelimiterConfig::new('\'', '+', '\n', '?').is_err());
        assert!(DelimiterConfig::new('\'', '+', ':', '\n').is_err());
        assert!(DelimiterConfig::new('\n', '+', ':', '?').is_ok());
    }

    #[test]
    fn test_from_una_header_rejects_malformed() {
        assert!(DelimiterConfig::from_una_header("UNB:+.? '").is_none());
        assert!(DelimiterConfig::from_una_header("UNA:+.?").is_none());
        assert!(DelimiterConfig::from_una_header("UNA:+.? :").is_none());
    }

    #[test]
    fn test_escape() {
        let config = DelimiterConfig::default();
        assert_eq!(config.escape("10.5"), "10.5");
        assert_eq!(config.escape("a+b"), "a?+b");
        assert_eq!(config.escape("??"), "????");
    }
}
