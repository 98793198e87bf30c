//! Positional element specifications

use crate::ast::nodes::Element;
use crate::error::ParseError;
use crate::spec::component_spec::ComponentSpec;
use std::fmt;

/// The expected shape of one element: an ordered list of component specs,
/// optionally the whole element may be absent.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementSpec {
    pub optional: bool,
    pub components: Vec<ComponentSpec>,
}

impl ElementSpec {
    pub fn new(components: Vec<ComponentSpec>) -> Self {
        Self {
            optional: false,
            components,
        }
    }

    pub fn optional(components: Vec<ComponentSpec>) -> Self {
        Self {
            optional: true,
            components,
        }
    }

    /// Validate an element's components positionally. A present component
    /// must satisfy its spec; an absent one is fine only when the spec is
    /// an optional wrapper. Components beyond the specified count pass
    /// through unvalidated.
    pub fn validate(&self, element: &Element) -> Result<(), ParseError> {
        for (i, spec) in self.components.iter().enumerate() {
            match element.components.get(i) {
                Some(component) => spec.validate(component)?,
                None => {
                    if !spec.is_optional() {
                        return Err(ParseError::MissingComponent {
                            pos: element.pos,
                            expected: spec.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for ElementSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, spec) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", spec.to_string())?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::nodes::Component;
    use crate::ast::position::Position;

    fn element(texts: &[&str]) -> Element {
        let mut element = Element::new(Position::new(1, 13));
        for (i, text) in texts.iter().enumerate() {
            element.push(Component::new(Position::new(1, 14 + i as u32), *text));
        }
        element
    }

    fn spec(codes: &[&str]) -> ElementSpec {
        ElementSpec::new(
            codes
                .iter()
                .map(|c| ComponentSpec::parse(c).unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_valid_components() {
        assert!(spec(&["a4", "n1"]).validate(&element(&["UNOC", "3"])).is_ok());
    }

    #[test]
    fn test_missing_mandatory_component() {
        let err = spec(&["a4", "n1"]).validate(&element(&["UNOC"])).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingComponent {
                pos: Position::new(1, 13),
                expected: "n1".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_optional_component() {
        let spec = ElementSpec::new(vec![
            ComponentSpec::FixedAlpha(4),
            ComponentSpec::Optional(Box::new(ComponentSpec::FixedNumeric(1))),
        ]);
        assert!(spec.validate(&element(&["UNOC"])).is_ok());
    }

    #[test]
    fn test_extra_components_pass_through() {
        assert!(spec(&["a4"]).validate(&element(&["UNOC", "anything"])).is_ok());
    }

    #[test]
    fn test_display() {
        assert_eq!(spec(&["a4", "n1"]).to_string(), r#"["a4", "n1"]"#);
    }
}
