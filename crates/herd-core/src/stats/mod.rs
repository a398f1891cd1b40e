pub mod histogram;
pub mod summary;
pub mod survival;

pub use histogram::{far_count, histogram, histogram_key, Histogram};
pub use summary::{summarize, DistanceSummary};
pub use survival::{threshold_survival, SurvivalTable};
