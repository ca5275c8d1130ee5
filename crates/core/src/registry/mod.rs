use std::collections::HashMap;

use crate::{
    nodes::{Node, VideoDimensionsNode, VideoGenParamsNode, VideoParamsNode},
    schema::{NodeInputs, NodeOutputs, NodeSchema},
    AppConfig, ParamsError, Result,
};

/// A node together with the schema it declared at registration.
pub struct RegisteredNode {
    schema: NodeSchema,
    node: Box<dyn Node>,
}

impl RegisteredNode {
    pub fn name(&self) -> &str {
        &self.schema.name
    }

    pub fn display_name(&self) -> &str {
        &self.schema.display_name
    }

    pub fn schema(&self) -> &NodeSchema {
        &self.schema
    }

    pub fn evaluate(&self, inputs: &NodeInputs) -> Result<NodeOutputs> {
        self.node.evaluate(inputs)
    }
}

impl std::fmt::Debug for RegisteredNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredNode")
            .field("name", &self.schema.name)
            .field("display_name", &self.schema.display_name)
            .finish()
    }
}

/// Name to implementation mapping handed to the host. Built once at start-up
/// and read-only afterwards.
#[derive(Debug, Default)]
pub struct NodeRegistry {
    nodes: Vec<RegisteredNode>,
    index: HashMap<String, usize>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every node shipped by this crate.
    pub fn builtin(config: &AppConfig) -> Result<Self> {
        tracing::info!("Loading HELTO Video Parameters nodes...");

        let rounding = config.dimensions.rounding;
        let mut registry = Self::new();
        registry.register(Box::new(VideoParamsNode::new(rounding)))?;
        registry.register(Box::new(VideoDimensionsNode::new(rounding)))?;
        registry.register(Box::new(VideoGenParamsNode::new(rounding)))?;

        tracing::debug!(count = registry.len(), ?rounding, "nodes registered");
        Ok(registry)
    }

    pub fn register(&mut self, node: Box<dyn Node>) -> Result<()> {
        let schema = node.schema();
        if self.index.contains_key(&schema.name) {
            return Err(ParamsError::DuplicateNode(schema.name));
        }

        self.index.insert(schema.name.clone(), self.nodes.len());
        self.nodes.push(RegisteredNode { schema, node });
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredNode> {
        self.index.get(name).map(|&slot| &self.nodes[slot])
    }

    pub fn display_name(&self, name: &str) -> Option<&str> {
        self.get(name).map(RegisteredNode::display_name)
    }

    /// Registered nodes in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &RegisteredNode> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn evaluate(&self, name: &str, inputs: &NodeInputs) -> Result<NodeOutputs> {
        let entry = self
            .get(name)
            .ok_or_else(|| ParamsError::UnknownNode(name.to_string()))?;
        tracing::debug!(node = name, "evaluating node");
        entry.evaluate(inputs)
    }
}
