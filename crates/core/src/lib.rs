//! Core library for the HELTO video parameter nodes.
//!
//! Each module owns one piece of the calculation: ratio parsing, the
//! dimension calculator, the frame aggregator, and the node plumbing (schema,
//! concrete nodes and the registry) that exposes them to a host graph.

pub mod config;
pub mod dimensions;
pub mod error;
pub mod frames;
pub mod nodes;
pub mod ratio;
pub mod registry;
pub mod schema;

pub use config::{AppConfig, DimensionConfig};
pub use dimensions::{
    round_to_multiple, ControllingSide, DimensionCalculator, DimensionPair, RoundingPolicy,
    DIMENSION_MULTIPLE,
};
pub use error::{ParamsError, Result};
pub use frames::{frame_count, VideoParamBundle};
pub use nodes::{Node, VideoDimensionsNode, VideoGenParamsNode, VideoParamsNode};
pub use ratio::{AspectRatio, Orientation};
pub use registry::{NodeRegistry, RegisteredNode};
pub use schema::{NodeInputs, NodeOutputs, NodeSchema, NodeValue};
