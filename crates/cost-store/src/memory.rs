//! 記憶體報表儲存

use std::collections::HashMap;

use cost_calc::ReportGenerator;
use cost_core::{BomCatalog, CostError, PurchaseHistory, ReportConfig};
use uuid::Uuid;

use crate::record::{CostReportRecord, ReportState};
use crate::{ReportStore, Result, StoreError};

/// 記憶體報表儲存
#[derive(Debug, Default)]
pub struct MemoryReportStore {
    reports: HashMap<Uuid, CostReportRecord>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取得可修改的報表
    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut CostReportRecord> {
        self.reports.get_mut(&id)
    }

    /// 報表數量
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// 依建立時間由新到舊列出報表
    pub fn list(&self) -> Vec<&CostReportRecord> {
        let mut reports: Vec<_> = self.reports.values().collect();
        reports.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        reports
    }
}

impl ReportStore for MemoryReportStore {
    fn create(&mut self, bom_ids: Vec<String>, config: ReportConfig) -> Result<Uuid> {
        if bom_ids.is_empty() {
            return Err(CostError::NoBomSelected.into());
        }
        config.validate()?;

        let record = CostReportRecord::new(bom_ids, config);
        let id = record.id;
        tracing::debug!("建立報表草稿 {}「{}」", id, record.name);
        self.reports.insert(id, record);
        Ok(id)
    }

    fn get(&self, id: Uuid) -> Option<&CostReportRecord> {
        self.reports.get(&id)
    }

    fn generate(
        &mut self,
        id: Uuid,
        catalog: &dyn BomCatalog,
        history: &dyn PurchaseHistory,
    ) -> Result<&CostReportRecord> {
        let record = self
            .reports
            .get_mut(&id)
            .ok_or(StoreError::ReportNotFound(id))?;

        if record.state == ReportState::Archived {
            return Err(StoreError::ReportArchived(id));
        }

        let report = ReportGenerator::new(catalog, history, &record.config)
            .generate_by_ids(record.bom_ids.as_slice())?;

        record.replace_lines(report.rows());
        tracing::info!("報表 {} 已產生：{} 行", id, record.lines.len());

        Ok(&*record)
    }

    fn remove(&mut self, id: Uuid) -> Result<CostReportRecord> {
        self.reports
            .remove(&id)
            .ok_or(StoreError::ReportNotFound(id))
    }
}
