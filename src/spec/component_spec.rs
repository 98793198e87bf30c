//! Component datatype specifications
//!
//! Datatype codes follow the UN/EDIFACT notation: `a3` (exactly three
//! letters), `an..10` (up to ten characters of anything), `n3` (exactly
//! three digits), `n..2` (one or two digits). A string that is not a
//! recognized code is a literal match; richer shapes (patterns, optional
//! wrappers, alternations) come from the structured definition forms.

use crate::ast::nodes::Component;
use crate::error::{ParseError, SpecificationError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static FIXED_ALPHA_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^a(\d+)$").unwrap());
static VARIABLE_ALPHANUMERIC_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^an\.\.(\d+)$").unwrap());
static FIXED_NUMERIC_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^n(\d+)$").unwrap());
static VARIABLE_NUMERIC_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^n\.\.(\d+)$").unwrap());

/// A validator for one component's text.
#[derive(Debug, Clone)]
pub enum ComponentSpec {
    /// `a3`: exactly `n` ASCII letters.
    FixedAlpha(usize),
    /// `an..10`: at most `n` characters, empty included.
    VariableAlphanumeric(usize),
    /// `n3`: exactly `n` ASCII digits.
    FixedNumeric(usize),
    /// `n..2`: one to `n` ASCII digits; empty is invalid.
    VariableNumeric(usize),
    /// Exact string equality.
    Literal(String),
    /// Regular expression match (unanchored; anchor in the pattern).
    Pattern(Regex),
    /// Valid when empty, else the inner spec decides.
    Optional(Box<ComponentSpec>),
    /// Valid when any member is; the first success wins.
    AnyOf(Vec<ComponentSpec>),
}

impl ComponentSpec {
    /// Parse a datatype code. Strings that match none of the code shapes
    /// are literal matches.
    pub fn parse(code: &str) -> Result<Self, SpecificationError> {
        if let Some(captures) = FIXED_ALPHA_CODE.captures(code) {
            return Ok(ComponentSpec::FixedAlpha(Self::parse_length(code, &captures)?));
        }
        if let Some(captures) = VARIABLE_ALPHANUMERIC_CODE.captures(code) {
            return Ok(ComponentSpec::VariableAlphanumeric(Self::parse_length(
                code, &captures,
            )?));
        }
        if let Some(captures) = FIXED_NUMERIC_CODE.captures(code) {
            return Ok(ComponentSpec::FixedNumeric(Self::parse_length(code, &captures)?));
        }
        if let Some(captures) = VARIABLE_NUMERIC_CODE.captures(code) {
            return Ok(ComponentSpec::VariableNumeric(Self::parse_length(
                code, &captures,
            )?));
        }
        Ok(ComponentSpec::Literal(code.to_string()))
    }

    fn parse_length(code: &str, captures: &regex::Captures<'_>) -> Result<usize, SpecificationError> {
        captures
            .get(1)
            .and_then(|m| m.as_str().parse().ok())
            .ok_or_else(|| SpecificationError::Component {
                spec: code.to_string(),
                message: "length out of range".to_string(),
            })
    }

    /// Whether an absent component satisfies this spec.
    pub fn is_optional(&self) -> bool {
        matches!(self, ComponentSpec::Optional(_))
    }

    pub fn is_valid(&self, text: &str) -> bool {
        match self {
            ComponentSpec::FixedAlpha(n) => {
                text.chars().count() == *n && text.chars().all(|c| c.is_ascii_alphabetic())
            }
            ComponentSpec::VariableAlphanumeric(n) => text.chars().count() <= *n,
            ComponentSpec::FixedNumeric(n) => {
                text.chars().count() == *n && text.chars().all(|c| c.is_ascii_digit())
            }
            ComponentSpec::VariableNumeric(n) => {
                !text.is_empty()
                    && text.chars().count() <= *n
                    && text.chars().all(|c| c.is_ascii_digit())
            }
            ComponentSpec::Literal(value) => text == value,
            ComponentSpec::Pattern(regex) => regex.is_match(text),
            ComponentSpec::Optional(inner) => text.is_empty() || inner.is_valid(text),
            ComponentSpec::AnyOf(specs) => specs.iter().any(|spec| spec.is_valid(text)),
        }
    }

    /// Validate a component, reporting its position and the expected spec
    /// on failure.
    pub fn validate(&self, component: &Component) -> Result<(), ParseError> {
        if self.is_valid(&component.text) {
            Ok(())
        } else {
            Err(ParseError::InvalidValue {
                pos: component.pos,
                text: component.text.clone(),
                expected: self.to_string(),
            })
        }
    }
}

impl fmt::Display for ComponentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentSpec::FixedAlpha(n) => write!(f, "a{}", n),
            ComponentSpec::VariableAlphanumeric(n) => write!(f, "an..{}", n),
            ComponentSpec::FixedNumeric(n) => write!(f, "n{}", n),
            ComponentSpec::VariableNumeric(n) => write!(f, "n..{}", n),
            ComponentSpec::Literal(value) => write!(f, "{}", value),
            ComponentSpec::Pattern(regex) => write!(f, "{}", regex.as_str()),
            ComponentSpec::Optional(inner) => write!(f, "[{}]", inner),
            ComponentSpec::AnyOf(specs) => {
                for (i, spec) in specs.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{}", spec)?;
                }
                Ok(())
            }
        }
    }
}

impl PartialEq for ComponentSpec {
    fn eq(&self, other: &Self) -> bool {
        use ComponentSpec::*;
        match (self, other) {
            (FixedAlpha(a), FixedAlpha(b)) => a == b,
            (VariableAlphanumeric(a), VariableAlphanumeric(b)) => a == b,
            (FixedNumeric(a), FixedNumeric(b)) => a == b,
            (VariableNumeric(a), VariableNumeric(b)) => a == b,
            (Literal(a), Literal(b)) => a == b,
            (Pattern(a), Pattern(b)) => a.as_str() == b.as_str(),
            (Optional(a), Optional(b)) => a == b,
            (AnyOf(a), AnyOf(b)) => a == b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datatype_codes() {
        assert_eq!(ComponentSpec::parse("a4").unwrap(), ComponentSpec::FixedAlpha(4));
        assert_eq!(
            ComponentSpec::parse("an..35").unwrap(),
            ComponentSpec::VariableAlphanumeric(35)
        );
        assert_eq!(ComponentSpec::parse("n6").unwrap(), ComponentSpec::FixedNumeric(6));
        assert_eq!(
            ComponentSpec::parse("n..2").unwrap(),
            ComponentSpec::VariableNumeric(2)
        );
        assert_eq!(
            ComponentSpec::parse("UNOC").unwrap(),
            ComponentSpec::Literal("UNOC".to_string())
        );
    }

    #[test]
    fn test_fixed_numeric() {
        let spec = ComponentSpec::FixedNumeric(2);
        assert!(spec.is_valid("11"));
        assert!(!spec.is_valid("1"));
        assert!(!spec.is_valid("111"));
        assert!(!spec.is_valid("1a"));
        assert!(!spec.is_valid(""));
    }

    #[test]
    fn test_variable_numeric_rejects_empty() {
        let spec = ComponentSpec::VariableNumeric(2);
        assert!(spec.is_valid("1"));
        assert!(spec.is_valid("11"));
        assert!(!spec.is_valid(""));
        assert!(!spec.is_valid("111"));
    }

    #[test]
    fn test_optional_always_accepts_empty() {
        let spec = ComponentSpec::Optional(Box::new(ComponentSpec::FixedNumeric(4)));
        assert!(spec.is_valid(""));
        assert!(spec.is_valid("2024"));
        assert!(!spec.is_valid("20"));
    }

    #[test]
    fn test_any_of() {
        let spec = ComponentSpec::AnyOf(vec![
            ComponentSpec::VariableAlphanumeric(10),
            ComponentSpec::FixedNumeric(4),
        ]);
        assert!(spec.is_valid("hello"));
        assert!(spec.is_valid("2024"));
        assert!(!spec.is_valid("longer than ten"));
    }

    #[test]
    fn test_display() {
        assert_eq!(ComponentSpec::FixedAlpha(3).to_string(), "a3");
        assert_eq!(ComponentSpec::VariableNumeric(6).to_string(), "n..6");
        assert_eq!(
            ComponentSpec::Optional(Box::new(ComponentSpec::FixedAlpha(1))).to_string(),
            "[a1]"
        );
    }
}
