//! # Cost Calculation Engine
//!
//! 多層 BOM 成本累計引擎

pub mod buffer;
pub mod levels;
pub mod report;
pub mod rollup;
pub mod table;

// Re-export 主要類型
pub use buffer::{RowBuffer, RowIndex};
pub use levels::LevelProjector;
pub use report::{CostReport, ReportGenerator, ReportSummary};
pub use rollup::{CostRollup, RollupResult};
pub use table::{Cell, ValueStyle};
