//! Declarative description of a node as the host sees it: typed input widgets
//! with defaults and ranges, an ordered output tuple, a menu category and a
//! display name.

use std::collections::HashMap;

use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};

use crate::{ParamsError, Result};

/// Menu category shared by every node in this crate.
pub const CATEGORY: &str = "HELTO/Video";

/// A single value flowing in or out of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<f64> for NodeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<u32> for NodeValue {
    fn from(value: u32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<bool> for NodeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for NodeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Widget type and constraints for one input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum FieldKind {
    Float {
        default: f64,
        min: f64,
        max: f64,
        step: f64,
    },
    Int {
        default: i64,
        min: i64,
        max: i64,
        step: i64,
    },
    Boolean {
        default: bool,
    },
    #[serde(rename = "COMBO")]
    Choice {
        options: Vec<String>,
        default: String,
    },
}

impl FieldKind {
    /// Choice field defaulting to the first option.
    pub fn choice(options: &[&str]) -> Self {
        let options: Vec<String> = options.iter().map(|o| o.to_string()).collect();
        let default = options.first().cloned().unwrap_or_default();
        Self::Choice { options, default }
    }

    pub fn default_value(&self) -> NodeValue {
        match self {
            Self::Float { default, .. } => NodeValue::Float(*default),
            Self::Int { default, .. } => NodeValue::Int(*default),
            Self::Boolean { default } => NodeValue::Bool(*default),
            Self::Choice { default, .. } => NodeValue::Text(default.clone()),
        }
    }

    /// Converts textual input (for example a `name=value` assignment) into a
    /// value of this kind, enforcing the widget's `[min, max]` range.
    pub fn parse_value(&self, field: &str, text: &str) -> Result<NodeValue> {
        let text = text.trim();
        match self {
            Self::Float { min, max, .. } => {
                let value = text
                    .parse::<f64>()
                    .map_err(|_| ParamsError::input_type(field, "a floating point number"))?;
                if !(*min..=*max).contains(&value) {
                    return Err(ParamsError::out_of_range(field, text, *min, *max));
                }
                Ok(NodeValue::Float(value))
            }
            Self::Int { min, max, .. } => {
                let value = text
                    .parse::<i64>()
                    .map_err(|_| ParamsError::input_type(field, "an integer"))?;
                if !(*min..=*max).contains(&value) {
                    return Err(ParamsError::out_of_range(field, text, *min, *max));
                }
                Ok(NodeValue::Int(value))
            }
            Self::Boolean { .. } => match text.to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Ok(NodeValue::Bool(true)),
                "false" | "0" | "no" => Ok(NodeValue::Bool(false)),
                _ => Err(ParamsError::input_type(field, "a boolean")),
            },
            Self::Choice { options, .. } => {
                if options.iter().any(|option| option == text) {
                    Ok(NodeValue::Text(text.to_string()))
                } else {
                    Err(ParamsError::InvalidChoice {
                        field: field.to_string(),
                        value: text.to_string(),
                    })
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputField {
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl InputField {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutputKind {
    Float,
    Int,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputField {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: OutputKind,
}

impl OutputField {
    pub fn new(name: impl Into<String>, kind: OutputKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Everything the host needs to present and wire a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSchema {
    pub name: String,
    pub display_name: String,
    pub category: String,
    pub inputs: Vec<InputField>,
    pub outputs: Vec<OutputField>,
}

impl NodeSchema {
    pub fn input(&self, name: &str) -> Option<&InputField> {
        self.inputs.iter().find(|field| field.name == name)
    }

    /// Inputs with every field set to its widget default.
    pub fn default_inputs(&self) -> NodeInputs {
        let mut inputs = NodeInputs::new();
        for field in &self.inputs {
            inputs.set(field.name.clone(), field.kind.default_value());
        }
        inputs
    }

    /// Parses a `name=value` assignment against this schema.
    pub fn parse_assignment(&self, assignment: &str) -> Result<(String, NodeValue)> {
        let (name, text) = assignment.split_once('=').ok_or_else(|| {
            ParamsError::msg(format!("expected `name=value`, got `{assignment}`"))
        })?;
        let name = name.trim();
        let field = self
            .input(name)
            .ok_or_else(|| ParamsError::msg(format!("`{}` has no input `{name}`", self.name)))?;
        let value = field.kind.parse_value(name, text)?;
        Ok((name.to_string(), value))
    }
}

/// Named input values handed to a node invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeInputs {
    values: HashMap<String, NodeValue>,
}

impl NodeInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<NodeValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<NodeValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Result<&NodeValue> {
        self.values
            .get(name)
            .ok_or_else(|| ParamsError::MissingInput(name.to_string()))
    }

    /// Float input. Integer values are widened.
    pub fn float(&self, name: &str) -> Result<f64> {
        match self.get(name)? {
            NodeValue::Float(value) => Ok(*value),
            NodeValue::Int(value) => Ok(*value as f64),
            _ => Err(ParamsError::input_type(name, "a floating point number")),
        }
    }

    pub fn uint(&self, name: &str) -> Result<u32> {
        match self.get(name)? {
            NodeValue::Int(value) => u32::try_from(*value)
                .map_err(|_| ParamsError::input_type(name, "a non-negative integer")),
            _ => Err(ParamsError::input_type(name, "an integer")),
        }
    }

    pub fn boolean(&self, name: &str) -> Result<bool> {
        match self.get(name)? {
            NodeValue::Bool(value) => Ok(*value),
            _ => Err(ParamsError::input_type(name, "a boolean")),
        }
    }

    pub fn text(&self, name: &str) -> Result<&str> {
        match self.get(name)? {
            NodeValue::Text(value) => Ok(value),
            _ => Err(ParamsError::input_type(name, "a string")),
        }
    }
}

/// Ordered output tuple of a node invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeOutputs {
    values: Vec<(String, NodeValue)>,
}

impl NodeOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<NodeValue>) {
        self.values.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&NodeValue> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &NodeValue> {
        self.values.iter().map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for NodeOutputs {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
