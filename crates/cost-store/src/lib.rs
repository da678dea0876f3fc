//! # Cost Store
//!
//! 已產生成本報表的持久化記錄（記憶體實作）

pub mod line;
pub mod memory;
pub mod record;

// Re-export 主要類型
pub use line::{StoredLine, STORED_LEVELS};
pub use memory::MemoryReportStore;
pub use record::{CostReportRecord, ReportState};

use cost_core::{BomCatalog, PurchaseHistory, ReportConfig};
use uuid::Uuid;

/// 報表儲存錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("找不到報表: {0}")]
    ReportNotFound(Uuid),

    #[error("報表 {0} 已封存，無法重新產生")]
    ReportArchived(Uuid),

    #[error(transparent)]
    Cost(#[from] cost_core::CostError),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// 報表儲存
pub trait ReportStore {
    /// 建立草稿報表
    fn create(&mut self, bom_ids: Vec<String>, config: ReportConfig) -> Result<Uuid>;

    /// 取得報表
    fn get(&self, id: Uuid) -> Option<&CostReportRecord>;

    /// 產生（或重新產生）報表內容
    fn generate(
        &mut self,
        id: Uuid,
        catalog: &dyn BomCatalog,
        history: &dyn PurchaseHistory,
    ) -> Result<&CostReportRecord>;

    /// 刪除報表
    fn remove(&mut self, id: Uuid) -> Result<CostReportRecord>;
}
