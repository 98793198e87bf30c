//! Serde-facing specification definitions
//!
//! These mirror the YAML/JSON document shape and compile into the closed
//! spec types. Shorthand forms keep real specification files terse: a bare
//! string is a datatype code or literal, a list of codes is an element,
//! a list at component level is an alternation.

use crate::error::SpecificationError;
use crate::spec::component_spec::ComponentSpec;
use crate::spec::element_spec::ElementSpec;
use regex::Regex;
use serde::Deserialize;

/// One component definition.
///
/// `"a4"` is a datatype code (or literal), `["A", "B"]` an alternation,
/// and the mapping form adds `optional` and `pattern`:
///
/// ```yaml
/// - value: n..2
///   optional: true
/// - pattern: "^UNO[A-Z]$"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ComponentSpecDef {
    Code(String),
    AnyOf(Vec<ComponentSpecDef>),
    Detailed(DetailedComponentDef),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetailedComponentDef {
    #[serde(default)]
    pub value: Option<Box<ComponentSpecDef>>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub optional: bool,
}

impl ComponentSpecDef {
    pub fn code(code: &str) -> Self {
        ComponentSpecDef::Code(code.to_string())
    }

    pub fn compile(&self) -> Result<ComponentSpec, SpecificationError> {
        match self {
            ComponentSpecDef::Code(code) => ComponentSpec::parse(code),
            ComponentSpecDef::AnyOf(defs) => {
                let specs = defs
                    .iter()
                    .map(|def| def.compile())
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ComponentSpec::AnyOf(specs))
            }
            ComponentSpecDef::Detailed(detailed) => {
                let inner = match (&detailed.value, &detailed.pattern) {
                    (Some(value), None) => value.compile()?,
                    (None, Some(pattern)) => {
                        let regex =
                            Regex::new(pattern).map_err(|e| SpecificationError::Component {
                                spec: pattern.clone(),
                                message: e.to_string(),
                            })?;
                        ComponentSpec::Pattern(regex)
                    }
                    (None, None) => {
                        return Err(SpecificationError::Component {
                            spec: format!("{:?}", detailed),
                            message: "needs either value or pattern".to_string(),
                        })
                    }
                    (Some(_), Some(_)) => {
                        return Err(SpecificationError::Component {
                            spec: format!("{:?}", detailed),
                            message: "value and pattern are mutually exclusive".to_string(),
                        })
                    }
                };
                if detailed.optional {
                    Ok(ComponentSpec::Optional(Box::new(inner)))
                } else {
                    Ok(inner)
                }
            }
        }
    }
}

/// One element definition: either a bare list of component definitions or
/// a mapping with `components` and `optional`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ElementSpecDef {
    Components(Vec<ComponentSpecDef>),
    Detailed(DetailedElementDef),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetailedElementDef {
    pub components: Vec<ComponentSpecDef>,
    #[serde(default)]
    pub optional: bool,
}

impl ElementSpecDef {
    pub fn codes(codes: &[&str]) -> Self {
        ElementSpecDef::Components(codes.iter().map(|c| ComponentSpecDef::code(c)).collect())
    }

    pub fn compile(&self) -> Result<ElementSpec, SpecificationError> {
        let (defs, optional) = match self {
            ElementSpecDef::Components(defs) => (defs, false),
            ElementSpecDef::Detailed(detailed) => (&detailed.components, detailed.optional),
        };
        let components = defs
            .iter()
            .map(|def| def.compile())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(if optional {
            ElementSpec::optional(components)
        } else {
            ElementSpec::new(components)
        })
    }
}

/// One grammar node definition. A node with `segments` is a group, one
/// without is a segment; `min`/`max` default to 1.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpecNodeDef {
    pub name: String,
    #[serde(default)]
    pub min: Option<u32>,
    #[serde(default)]
    pub max: Option<u32>,
    #[serde(default)]
    pub segments: Option<Vec<SpecNodeDef>>,
    #[serde(default)]
    pub elements: Option<Vec<ElementSpecDef>>,
}

impl SpecNodeDef {
    pub fn segment(name: &str) -> Self {
        Self {
            name: name.to_string(),
            min: None,
            max: None,
            segments: None,
            elements: None,
        }
    }

    pub fn group(name: &str, children: Vec<SpecNodeDef>) -> Self {
        Self {
            name: name.to_string(),
            min: None,
            max: None,
            segments: Some(children),
            elements: None,
        }
    }

    pub fn with_min(mut self, min: u32) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: u32) -> Self {
        self.max = Some(max);
        self
    }

    pub fn with_elements(mut self, elements: Vec<ElementSpecDef>) -> Self {
        self.elements = Some(elements);
        self
    }
}
