pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Missing column in edge table: {column}")]
    MissingColumn { column: String },

    #[error("Edge table row {row} has no usable value in endpoint column {column}")]
    InvalidEndpoint { row: usize, column: String },

    #[error("A weight threshold needs a weight attribute")]
    ThresholdWithoutWeight,

    #[error("Grouping by more than one attribute is not supported: {attrs:?}")]
    MultiAttributeGrouping { attrs: Vec<String> },

    #[error("No grouping attribute given")]
    EmptyGroupBy,

    #[error("Unknown edge aggregation: {name}")]
    InvalidAggregation { name: String },

    #[error("Unknown empty combo attribute action: {value} (expected drop, group or promote)")]
    InvalidEmptyAttrAction { value: String },

    #[error("Invalid date/time format: {format}")]
    InvalidDatetimeFormat { format: String },

    #[error(
        "Node attributes hold date/time values that cannot be serialized without a format: {attrs:?}"
    )]
    NonSerializableTemporal { attrs: Vec<String> },
}
