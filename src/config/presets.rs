//! Configuration records used by the tabular training pipeline.

use crate::config::typed::{ConfigSchema, TypedConfig};
use crate::domain::{FieldSpec, Literal, TypeTag};

/// Optimisation and runtime settings.
pub enum TrainSettings {}

/// Model architecture settings.
pub enum ModelSettings {}

pub type TrainConfig = TypedConfig<TrainSettings>;
pub type ModelConfig = TypedConfig<ModelSettings>;

const DEVICES: &[Literal] = &[Literal::Str("cpu"), Literal::Str("cuda"), Literal::Str("mps")];
const DTYPES: &[Literal] = &[
    Literal::Str("float32"),
    Literal::Str("bfloat16"),
    Literal::Str("float16"),
];
const LOSS_TYPES: &[Literal] = &[
    Literal::Str("BINCE"),
    Literal::Str("MULCE"),
    Literal::Str("MSE"),
    Literal::Str("SUPERVISED"),
];

impl ConfigSchema for TrainSettings {
    const NAME: &'static str = "TrainSettings";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("epochs", TypeTag::Int)
            .default_to(Literal::Int(1))
            .help("passes over the training data"),
        FieldSpec::new("batch_size", TypeTag::Int)
            .default_to(Literal::Int(128))
            .help("rows per optimisation step"),
        FieldSpec::new("lr", TypeTag::Float)
            .default_to(Literal::Float(1e-3))
            .help("peak learning rate"),
        FieldSpec::new("weight_decay", TypeTag::Float).default_to(Literal::Float(0.0)),
        FieldSpec::new("dropout", TypeTag::Float).default_to(Literal::Float(0.0)),
        FieldSpec::new("compile", TypeTag::Bool)
            .default_to(Literal::Bool(false))
            .help("compile the model graph before training"),
        FieldSpec::new("device", TypeTag::Enum(DEVICES)).default_to(Literal::Str("cpu")),
        FieldSpec::new("dtype", TypeTag::Enum(DTYPES)).default_to(Literal::Str("float32")),
        FieldSpec::new("eval_interval", TypeTag::Int)
            .default_to(Literal::Int(100))
            .help("steps between evaluations"),
        FieldSpec::new("seed", TypeTag::Int).default_to(Literal::Int(1337)),
        FieldSpec::new("output_dir", TypeTag::Str)
            .default_to(Literal::Str("out"))
            .help("checkpoint directory"),
    ];
}

impl ConfigSchema for ModelSettings {
    const NAME: &'static str = "ModelSettings";
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("dim", TypeTag::Int)
            .default_to(Literal::Int(64))
            .help("embedding width"),
        FieldSpec::new("n_layers", TypeTag::Int).default_to(Literal::Int(6)),
        FieldSpec::new("n_heads", TypeTag::Int).default_to(Literal::Int(8)),
        FieldSpec::new("loss_type", TypeTag::Enum(LOSS_TYPES))
            .default_to(Literal::Str("BINCE"))
            .help("training objective"),
        FieldSpec::new("multiple_of", TypeTag::Int)
            .default_to(Literal::Int(32))
            .help("feed-forward width rounding"),
        FieldSpec::new("norm_eps", TypeTag::Float).default_to(Literal::Float(1e-5)),
    ];
}
