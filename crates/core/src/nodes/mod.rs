//! Concrete nodes exposed to the host graph.

use crate::{
    frames::frame_count,
    ratio::{LANDSCAPE_RATIOS, ORIENTED_RATIOS},
    schema::{
        FieldKind, InputField, NodeInputs, NodeOutputs, NodeSchema, OutputField, OutputKind,
        CATEGORY,
    },
    AspectRatio, ControllingSide, DimensionCalculator, DimensionPair, Orientation, Result,
    RoundingPolicy, VideoParamBundle,
};

/// A stateless calculation unit the host can invoke.
pub trait Node: Send + Sync {
    fn schema(&self) -> NodeSchema;

    /// Runs the node once. Outputs follow the order declared in the schema.
    fn evaluate(&self, inputs: &NodeInputs) -> Result<NodeOutputs>;
}

fn fps_field() -> InputField {
    InputField::new(
        "fps",
        FieldKind::Float {
            default: 24.0,
            min: 1.0,
            max: 120.0,
            step: 0.01,
        },
    )
}

fn duration_field() -> InputField {
    InputField::new(
        "duration",
        FieldKind::Int {
            default: 5,
            min: 1,
            max: 10_000,
            step: 1,
        },
    )
}

fn side_field(name: &str, label: &str) -> InputField {
    InputField::new(
        name,
        FieldKind::Int {
            default: 480,
            min: 64,
            max: 8192,
            step: 8,
        },
    )
    .with_label(label)
}

/// Inputs shared by the nodes that pick orientation and controlling side
/// independently of the ratio.
fn oriented_dimension_fields() -> Vec<InputField> {
    vec![
        InputField::new("aspect_ratio", FieldKind::choice(&LANDSCAPE_RATIOS)),
        side_field("side_length", "Side Length"),
        InputField::new("orientation", FieldKind::choice(&Orientation::CHOICES)),
        InputField::new("side_is_long", FieldKind::Boolean { default: false })
            .with_label("Side Length Is Long Side"),
    ]
}

fn read_oriented_dimensions(
    calculator: &DimensionCalculator,
    inputs: &NodeInputs,
) -> Result<DimensionPair> {
    let ratio = AspectRatio::parse(inputs.text("aspect_ratio")?)?;
    let length = inputs.uint("side_length")?;
    let orientation: Orientation = inputs.text("orientation")?.parse()?;
    let controlling = ControllingSide::from_is_long(inputs.boolean("side_is_long")?);
    Ok(calculator.compute(length, ratio, orientation, controlling))
}

/// The classic node: the ratio token carries the orientation and the supplied
/// length is always the short side.
#[derive(Debug, Clone, Copy, Default)]
pub struct VideoParamsNode {
    calculator: DimensionCalculator,
}

impl VideoParamsNode {
    pub const NAME: &'static str = "HeltoVideoParams";

    pub fn new(rounding: RoundingPolicy) -> Self {
        Self {
            calculator: DimensionCalculator::new(rounding),
        }
    }
}

impl Node for VideoParamsNode {
    fn schema(&self) -> NodeSchema {
        NodeSchema {
            name: Self::NAME.to_string(),
            display_name: "Video Parameters".to_string(),
            category: CATEGORY.to_string(),
            inputs: vec![
                fps_field(),
                duration_field(),
                InputField::new("aspect_ratio", FieldKind::choice(&ORIENTED_RATIOS)),
                side_field("short_side", "Shortest Side Length"),
            ],
            outputs: vec![
                OutputField::new("fps", OutputKind::Float),
                OutputField::new("duration", OutputKind::Int),
                OutputField::new("width", OutputKind::Int),
                OutputField::new("height", OutputKind::Int),
                OutputField::new("nr_frames", OutputKind::Int),
            ],
        }
    }

    fn evaluate(&self, inputs: &NodeInputs) -> Result<NodeOutputs> {
        let fps = inputs.float("fps")?;
        let duration = inputs.uint("duration")?;
        let ratio = AspectRatio::parse(inputs.text("aspect_ratio")?)?;
        let short_side = inputs.uint("short_side")?;

        let orientation = ratio.orientation().unwrap_or_default();
        let dims = self
            .calculator
            .compute(short_side, ratio, orientation, ControllingSide::Short);

        let mut outputs = NodeOutputs::new();
        outputs.push("fps", fps);
        outputs.push("duration", duration);
        outputs.push("width", dims.width);
        outputs.push("height", dims.height);
        outputs.push("nr_frames", frame_count(fps, duration));
        Ok(outputs)
    }
}

/// Width and height only, with orientation and the controlling side chosen
/// explicitly.
#[derive(Debug, Clone, Copy, Default)]
pub struct VideoDimensionsNode {
    calculator: DimensionCalculator,
}

impl VideoDimensionsNode {
    pub const NAME: &'static str = "HeltoVideoDimensions";

    pub fn new(rounding: RoundingPolicy) -> Self {
        Self {
            calculator: DimensionCalculator::new(rounding),
        }
    }
}

impl Node for VideoDimensionsNode {
    fn schema(&self) -> NodeSchema {
        NodeSchema {
            name: Self::NAME.to_string(),
            display_name: "Video Dimensions".to_string(),
            category: CATEGORY.to_string(),
            inputs: oriented_dimension_fields(),
            outputs: vec![
                OutputField::new("width", OutputKind::Int),
                OutputField::new("height", OutputKind::Int),
            ],
        }
    }

    fn evaluate(&self, inputs: &NodeInputs) -> Result<NodeOutputs> {
        let dims = read_oriented_dimensions(&self.calculator, inputs)?;

        let mut outputs = NodeOutputs::new();
        outputs.push("width", dims.width);
        outputs.push("height", dims.height);
        Ok(outputs)
    }
}

/// Frame timing, dimensions and sampler settings in one place so a single
/// node can drive a whole generation graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct VideoGenParamsNode {
    calculator: DimensionCalculator,
}

impl VideoGenParamsNode {
    pub const NAME: &'static str = "HeltoVideoGenParams";

    pub fn new(rounding: RoundingPolicy) -> Self {
        Self {
            calculator: DimensionCalculator::new(rounding),
        }
    }

    pub fn bundle(&self, inputs: &NodeInputs) -> Result<VideoParamBundle> {
        let dims = read_oriented_dimensions(&self.calculator, inputs)?;
        Ok(VideoParamBundle::assemble(
            inputs.float("fps")?,
            inputs.uint("duration")?,
            dims,
            inputs.uint("steps")?,
            inputs.float("shift_value")?,
            inputs.float("motion_amplitude")?,
        ))
    }
}

impl Node for VideoGenParamsNode {
    fn schema(&self) -> NodeSchema {
        let mut inputs = vec![fps_field(), duration_field()];
        inputs.extend(oriented_dimension_fields());
        inputs.extend([
            InputField::new(
                "steps",
                FieldKind::Int {
                    default: 30,
                    min: 1,
                    max: 200,
                    step: 1,
                },
            ),
            InputField::new(
                "shift_value",
                FieldKind::Float {
                    default: 5.0,
                    min: 0.0,
                    max: 20.0,
                    step: 0.1,
                },
            ),
            InputField::new(
                "motion_amplitude",
                FieldKind::Float {
                    default: 1.0,
                    min: 0.0,
                    max: 10.0,
                    step: 0.01,
                },
            ),
        ]);

        NodeSchema {
            name: Self::NAME.to_string(),
            display_name: "Video Generation Parameters".to_string(),
            category: CATEGORY.to_string(),
            inputs,
            outputs: vec![
                OutputField::new("fps", OutputKind::Float),
                OutputField::new("duration", OutputKind::Int),
                OutputField::new("width", OutputKind::Int),
                OutputField::new("height", OutputKind::Int),
                OutputField::new("nr_frames", OutputKind::Int),
                OutputField::new("steps", OutputKind::Int),
                OutputField::new("shift_value", OutputKind::Float),
                OutputField::new("motion_amplitude", OutputKind::Float),
            ],
        }
    }

    fn evaluate(&self, inputs: &NodeInputs) -> Result<NodeOutputs> {
        let bundle = self.bundle(inputs)?;

        let mut outputs = NodeOutputs::new();
        outputs.push("fps", bundle.fps);
        outputs.push("duration", bundle.duration);
        outputs.push("width", bundle.width);
        outputs.push("height", bundle.height);
        outputs.push("nr_frames", bundle.frame_count);
        outputs.push("steps", bundle.steps);
        outputs.push("shift_value", bundle.shift_value);
        outputs.push("motion_amplitude", bundle.motion_amplitude);
        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{schema::NodeValue, ParamsError};

    fn int(outputs: &NodeOutputs, name: &str) -> i64 {
        match outputs.get(name) {
            Some(NodeValue::Int(value)) => *value,
            other => panic!("expected integer output `{name}`, got {other:?}"),
        }
    }

    #[test]
    fn classic_node_matches_widget_defaults() {
        let node = VideoParamsNode::default();
        let outputs = node.evaluate(&node.schema().default_inputs()).unwrap();

        let names: Vec<_> = outputs.names().collect();
        assert_eq!(names, ["fps", "duration", "width", "height", "nr_frames"]);
        assert_eq!(outputs.get("fps"), Some(&NodeValue::Float(24.0)));
        assert_eq!(int(&outputs, "duration"), 5);
        assert_eq!(int(&outputs, "width"), 856);
        assert_eq!(int(&outputs, "height"), 480);
        assert_eq!(int(&outputs, "nr_frames"), 121);
    }

    #[test]
    fn classic_node_reads_orientation_from_ratio() {
        let node = VideoParamsNode::default();
        let inputs = node
            .schema()
            .default_inputs()
            .with("aspect_ratio", "2:3")
            .with("short_side", 512_u32);
        let outputs = node.evaluate(&inputs).unwrap();
        assert_eq!(int(&outputs, "width"), 512);
        assert_eq!(int(&outputs, "height"), 768);

        let square = node
            .evaluate(&inputs.clone().with("aspect_ratio", "1:1"))
            .unwrap();
        assert_eq!(int(&square, "width"), int(&square, "height"));
    }

    #[test]
    fn classic_node_surfaces_malformed_ratio() {
        let node = VideoParamsNode::default();
        let inputs = node.schema().default_inputs().with("aspect_ratio", "wide");
        assert!(matches!(
            node.evaluate(&inputs),
            Err(ParamsError::InvalidRatioFormat { .. })
        ));
    }

    #[test]
    fn dimensions_node_honours_orientation_and_long_side() {
        let node = VideoDimensionsNode::new(RoundingPolicy::Floor);
        let inputs = node
            .schema()
            .default_inputs()
            .with("orientation", "portrait")
            .with("side_is_long", true)
            .with("side_length", 1280_u32);
        let outputs = node.evaluate(&inputs).unwrap();
        assert_eq!(int(&outputs, "width"), 720);
        assert_eq!(int(&outputs, "height"), 1280);
    }

    #[test]
    fn dimensions_node_rejects_unknown_orientation() {
        let node = VideoDimensionsNode::default();
        let inputs = node.schema().default_inputs().with("orientation", "diagonal");
        assert!(matches!(
            node.evaluate(&inputs),
            Err(ParamsError::InvalidChoice { .. })
        ));
    }

    #[test]
    fn gen_params_node_passes_sampler_settings_through() {
        let node = VideoGenParamsNode::default();
        let inputs = node
            .schema()
            .default_inputs()
            .with("steps", 42_u32)
            .with("shift_value", 7.3)
            .with("motion_amplitude", 0.85);
        let outputs = node.evaluate(&inputs).unwrap();

        assert_eq!(outputs.len(), node.schema().outputs.len());
        assert_eq!(int(&outputs, "steps"), 42);
        assert_eq!(outputs.get("shift_value"), Some(&NodeValue::Float(7.3)));
        assert_eq!(outputs.get("motion_amplitude"), Some(&NodeValue::Float(0.85)));
        assert_eq!(int(&outputs, "nr_frames"), 121);
        assert_eq!(int(&outputs, "width"), 856);
    }

    #[test]
    fn textual_bindings_stay_within_declared_ranges() {
        let node = VideoDimensionsNode::default();
        let schema = node.schema();
        assert!(matches!(
            schema.parse_assignment("side_length=0"),
            Err(ParamsError::OutOfRange { .. })
        ));

        let params = VideoParamsNode::default().schema();
        assert!(matches!(
            params.parse_assignment("fps=1e12"),
            Err(ParamsError::OutOfRange { .. })
        ));
        assert!(matches!(
            params.parse_assignment("duration=10001"),
            Err(ParamsError::OutOfRange { .. })
        ));

        let (name, value) = schema.parse_assignment("side_length=64").unwrap();
        let outputs = node
            .evaluate(&schema.default_inputs().with(name, value))
            .unwrap();
        assert_eq!(int(&outputs, "height"), 64);
        assert_eq!(int(&outputs, "width"), 112);
    }

    #[test]
    fn missing_inputs_are_reported_by_name() {
        let node = VideoGenParamsNode::default();
        let err = node.evaluate(&NodeInputs::new()).unwrap_err();
        assert!(matches!(err, ParamsError::MissingInput(_)));
    }

    #[test]
    fn output_kinds_match_schema() {
        let nodes: [Box<dyn Node>; 3] = [
            Box::new(VideoParamsNode::default()),
            Box::new(VideoDimensionsNode::default()),
            Box::new(VideoGenParamsNode::default()),
        ];
        for node in nodes {
            let schema = node.schema();
            let outputs = node.evaluate(&schema.default_inputs()).unwrap();
            for (field, value) in schema.outputs.iter().zip(outputs.values()) {
                match (field.kind, value) {
                    (OutputKind::Float, NodeValue::Float(_)) | (OutputKind::Int, NodeValue::Int(_)) => {}
                    other => panic!("{}: mismatched output {other:?}", schema.name),
                }
            }
        }
    }
}
