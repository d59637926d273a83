pub mod calculation;
pub mod decimal;

pub use calculation::{
    calculate_breakdown, calculate_points, strip_non_alphanumeric_chars, PointsBreakdown,
};
pub use decimal::DecimalError;
