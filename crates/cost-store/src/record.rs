//! 報表記錄

use chrono::{DateTime, Utc};
use cost_calc::ReportSummary;
use cost_core::{CostRow, ReportConfig};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::line::StoredLine;

/// 報表狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportState {
    /// 草稿
    Draft,
    /// 已產生
    Generated,
    /// 已封存
    Archived,
}

/// 已儲存的成本報表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostReportRecord {
    /// 報表ID
    pub id: Uuid,

    /// 報表名稱
    pub name: String,

    /// 分析的根 BOM
    pub bom_ids: Vec<String>,

    /// 產生時使用的配置
    pub config: ReportConfig,

    /// 狀態
    pub state: ReportState,

    /// 報表行（依序號排列）
    pub lines: Vec<StoredLine>,

    /// 建立時間
    pub created_at: DateTime<Utc>,
}

impl CostReportRecord {
    /// 創建新的草稿報表
    pub fn new(bom_ids: Vec<String>, config: ReportConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: config.name.clone(),
            bom_ids,
            config,
            state: ReportState::Draft,
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// 以新的報表行取代現有內容，並標記為已產生
    pub fn replace_lines<'r>(&mut self, rows: impl IntoIterator<Item = &'r CostRow>) {
        self.lines = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| StoredLine::from_row(i + 1, row))
            .collect();
        self.state = ReportState::Generated;
    }

    /// 封存
    pub fn archive(&mut self) {
        self.state = ReportState::Archived;
    }

    /// 退回草稿
    pub fn reset_to_draft(&mut self) {
        self.state = ReportState::Draft;
    }

    /// 摘要
    pub fn summary(&self) -> ReportSummary {
        self.lines
            .iter()
            .fold(ReportSummary::default(), |mut acc, line| {
                acc.add(line.line_type, line.total_cost);
                acc
            })
    }
}
