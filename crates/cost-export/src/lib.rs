//! # Cost Export
//!
//! 成本報表 CSV 匯出（`;` 分隔、全欄位加引號、UTF-8 含 BOM）

pub mod csv_writer;
pub mod filename;

// Re-export 主要類型
pub use csv_writer::CsvExporter;
pub use filename::export_filename;

/// 匯出錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("CSV 寫入錯誤: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O 錯誤: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Cost(#[from] cost_core::CostError),
}

pub type Result<T> = std::result::Result<T, ExportError>;
