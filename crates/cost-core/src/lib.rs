//! # Cost Core
//!
//! 成本報表的核心資料模型與類型定義

pub mod bom;
pub mod catalog;
pub mod config;
pub mod format;
pub mod row;

// Re-export 主要類型
pub use bom::{BomKey, BomNode, BomType, ComponentLine, Operation, Product, WorkCenter};
pub use catalog::{BomCatalog, MemoryCatalog, PurchaseHistory, PurchaseLine, PurchaseState};
pub use config::ReportConfig;
pub use row::{CostRow, LineKind, OperationDetail};

/// 成本報表錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum CostError {
    #[error("請至少選擇一個 BOM 以產生報表")]
    NoBomSelected,

    #[error("找不到 BOM: {0}")]
    BomNotFound(String),

    #[error("BOM 結構存在循環: {}", chain.join(" -> "))]
    CyclicBom { chain: Vec<String> },

    #[error("BOM {bom_id} 的數量或成本超出數值範圍")]
    QuantityOverflow { bom_id: String },

    #[error("無效的報表配置: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, CostError>;
