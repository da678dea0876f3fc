//! 報表行記錄

use cost_core::format::{format_currency, format_duration};
use cost_core::{CostRow, LineKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 儲存端固定的層級欄位數（超出部分捨棄）
pub const STORED_LEVELS: usize = 10;

/// 已儲存的報表行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredLine {
    /// 序號（從 1 起算）
    pub sequence: usize,

    /// 頂層產品料號
    pub bom_main_code: String,

    /// 物料料號
    pub item_code: String,

    /// 層級 1..10
    pub levels: [String; STORED_LEVELS],

    /// BOM 參考
    pub bom_reference: String,

    /// 數量
    pub item_qty: Decimal,

    /// 單位
    pub uom_name: String,

    /// 單位成本
    pub unit_cost: Decimal,

    /// 總成本
    pub total_cost: Decimal,

    /// 最近採購稅別
    pub purchase_taxes: String,

    /// 行類型
    pub line_type: LineKind,

    /// 作業名稱
    pub operation_name: String,

    /// 工作中心
    pub workcenter_name: String,

    /// 作業時間（HH:MM:SS）
    pub operation_time: String,

    /// 作業成本
    pub operation_cost: Decimal,
}

impl StoredLine {
    /// 從報表行建立記錄
    pub fn from_row(sequence: usize, row: &CostRow) -> Self {
        let mut levels: [String; STORED_LEVELS] = Default::default();
        for (slot, label) in levels.iter_mut().zip(&row.levels) {
            slot.clone_from(label);
        }

        let operation = row.operation.as_ref();

        Self {
            sequence,
            bom_main_code: row.top_level_code.clone(),
            item_code: row.item_code.clone(),
            levels,
            bom_reference: row.reference.clone(),
            item_qty: row.quantity.unwrap_or(Decimal::ZERO),
            uom_name: row.uom_name.clone(),
            unit_cost: row.unit_cost.unwrap_or(Decimal::ZERO),
            total_cost: row.total_cost,
            purchase_taxes: row.purchase_taxes.clone(),
            line_type: row.kind,
            operation_name: operation.map(|op| op.name.clone()).unwrap_or_default(),
            workcenter_name: operation
                .map(|op| op.work_center.clone())
                .unwrap_or_default(),
            operation_time: operation
                .map(|op| format_duration(Some(op.duration_minutes)))
                .unwrap_or_default(),
            operation_cost: row.operation_cost(),
        }
    }

    /// 完整層級路徑（非空層級以 ` > ` 串接）
    pub fn hierarchy_path(&self) -> String {
        let non_empty: Vec<&str> = self
            .levels
            .iter()
            .map(String::as_str)
            .filter(|l| !l.is_empty())
            .collect();

        if non_empty.is_empty() {
            "Nível Principal".to_string()
        } else {
            non_empty.join(" > ")
        }
    }

    /// 第一個非空層級
    pub fn level_display(&self) -> String {
        self.levels
            .iter()
            .enumerate()
            .find(|(_, l)| !l.is_empty())
            .map(|(i, l)| format!("Nível {}: {}", i + 1, l))
            .unwrap_or_else(|| "Nível Principal".to_string())
    }

    pub fn unit_cost_formatted(&self) -> String {
        format_currency(self.unit_cost)
    }

    pub fn total_cost_formatted(&self) -> String {
        format_currency(self.total_cost)
    }

    pub fn operation_cost_formatted(&self) -> String {
        format_currency(self.operation_cost)
    }
}
