/// Reasons a statistic cannot be computed from the given input.
///
/// Every variant describes an input for which the statistic is mathematically
/// undefined. Functions in this crate return one of these instead of producing
/// `NaN` or infinite values.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum StatsError {
    #[display("at least {required} observations are required, got {actual}")]
    InsufficientData { required: usize, actual: usize },
    #[display("variance is zero")]
    ZeroVariance,
    #[display("samples have different lengths ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },
    #[display("contingency table of shape {rows}x{columns} has no degrees of freedom")]
    DegenerateTable { rows: usize, columns: usize },
    #[display("contingency table has an empty row or column")]
    EmptyMargin,
    #[display("invalid parameters for the {name} distribution")]
    InvalidDistribution { name: &'static str },
}

impl StatsError {
    pub(crate) fn require(required: usize, actual: usize) -> Result<(), Self> {
        if actual < required {
            return Err(Self::InsufficientData { required, actual });
        }
        Ok(())
    }
}
