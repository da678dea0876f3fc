//! # BOM Cost
//!
//! 多層 BOM 製造成本展開報表
//!
//! ```
//! use bom_cost::{BomNode, ComponentLine, CostReportRequest, MemoryCatalog, Product, ReportConfig};
//! use rust_decimal::Decimal;
//!
//! let catalog = MemoryCatalog::new().with_bom(
//!     BomNode::new("bom-1", Product::new("kit", Decimal::ZERO).with_code("KIT"), Decimal::ONE)
//!         .with_component(ComponentLine::new(Product::new("bolt", Decimal::from(2)), Decimal::from(5))),
//! );
//!
//! let request = CostReportRequest::new(vec!["bom-1".to_string()], ReportConfig::default());
//! let report = request.generate(&catalog, &catalog).unwrap();
//! assert_eq!(report.total_cost(), Decimal::from(10));
//! ```

pub use cost_calc::{
    Cell, CostReport, CostRollup, LevelProjector, ReportGenerator, ReportSummary, RowBuffer,
    RollupResult, ValueStyle,
};
pub use cost_core::{
    format, BomCatalog, BomKey, BomNode, BomType, ComponentLine, CostError, CostRow, LineKind,
    MemoryCatalog, Operation, OperationDetail, Product, PurchaseHistory, PurchaseLine,
    PurchaseState, ReportConfig, WorkCenter,
};
pub use cost_export::{export_filename, CsvExporter, ExportError};
pub use cost_store::{
    CostReportRecord, MemoryReportStore, ReportState, ReportStore, StoreError, StoredLine,
};

use uuid::Uuid;

/// 頂層錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Cost(#[from] CostError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// 匯出的 CSV 檔案
#[derive(Debug, Clone)]
pub struct CsvFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// 成本報表請求（選取的根 BOM + 配置）
#[derive(Debug, Clone)]
pub struct CostReportRequest {
    /// 根 BOM ID（依請求順序）
    pub bom_ids: Vec<String>,

    /// 報表配置
    pub config: ReportConfig,
}

impl CostReportRequest {
    pub fn new(bom_ids: Vec<String>, config: ReportConfig) -> Self {
        Self { bom_ids, config }
    }

    /// 檢查請求（至少選一個 BOM，配置有效）
    pub fn validate(&self) -> std::result::Result<(), CostError> {
        if self.bom_ids.is_empty() {
            return Err(CostError::NoBomSelected);
        }
        self.config.validate()
    }

    /// 產生報表
    pub fn generate(
        &self,
        catalog: &dyn BomCatalog,
        history: &dyn PurchaseHistory,
    ) -> Result<CostReport> {
        self.validate()?;
        let report = ReportGenerator::new(catalog, history, &self.config)
            .generate_by_ids(self.bom_ids.as_slice())?;
        Ok(report)
    }

    /// 產生報表並匯出 CSV
    pub fn export_csv(
        &self,
        catalog: &dyn BomCatalog,
        history: &dyn PurchaseHistory,
    ) -> Result<CsvFile> {
        self.validate()?;
        let generator = ReportGenerator::new(catalog, history, &self.config);
        let roots = generator.resolve_roots(self.bom_ids.as_slice())?;
        let report = generator.generate(&roots)?;

        let file = CsvFile {
            filename: export_filename(&roots),
            bytes: CsvExporter::new().export(&report)?,
        };
        tracing::info!("已匯出 {}（{} 位元組）", file.filename, file.bytes.len());
        Ok(file)
    }

    /// 建立持久化報表並立即產生內容
    pub fn persist(
        &self,
        store: &mut dyn ReportStore,
        catalog: &dyn BomCatalog,
        history: &dyn PurchaseHistory,
    ) -> Result<Uuid> {
        self.validate()?;
        let id = store.create(self.bom_ids.clone(), self.config.clone())?;
        store.generate(id, catalog, history)?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn catalog() -> MemoryCatalog {
        MemoryCatalog::new().with_bom(
            BomNode::new(
                "bom-shelf",
                Product::new("shelf", Decimal::ZERO).with_code("SHELF"),
                Decimal::ONE,
            )
            .with_code("SH-1")
            .with_component(ComponentLine::new(
                Product::new("board", Decimal::from(7)).with_code("BOARD"),
                Decimal::from(3),
            )),
        )
    }

    #[test]
    fn test_empty_request_rejected_everywhere() {
        let catalog = catalog();
        let mut store = MemoryReportStore::new();
        let request = CostReportRequest::new(Vec::new(), ReportConfig::default());

        assert!(matches!(
            request.generate(&catalog, &catalog),
            Err(Error::Cost(CostError::NoBomSelected))
        ));
        assert!(matches!(
            request.export_csv(&catalog, &catalog),
            Err(Error::Cost(CostError::NoBomSelected))
        ));
        assert!(matches!(
            request.persist(&mut store, &catalog, &catalog),
            Err(Error::Cost(CostError::NoBomSelected))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_export_csv_file() {
        let catalog = catalog();
        let request = CostReportRequest::new(vec!["bom-shelf".to_string()], ReportConfig::default());

        let file = request.export_csv(&catalog, &catalog).unwrap();
        assert_eq!(file.filename, "estrutura_custo_detalhada_SH-1.csv");
        assert!(file.bytes.starts_with(b"\xEF\xBB\xBF"));
    }

    #[test]
    fn test_persist_generates_lines() {
        let catalog = catalog();
        let mut store = MemoryReportStore::new();
        let request = CostReportRequest::new(vec!["bom-shelf".to_string()], ReportConfig::default());

        let id = request.persist(&mut store, &catalog, &catalog).unwrap();
        let record = store.get(id).unwrap();

        assert_eq!(record.state, ReportState::Generated);
        assert_eq!(record.summary().total_cost, Decimal::from(21));
        assert_eq!(record.summary().components, 1);
    }
}
