//! 報表輸出行模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 行類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    /// 主產品（遍歷根節點）
    MainProduct,
    /// 子組件（巢狀 BOM）
    SubAssembly,
    /// 製程作業
    Operation,
    /// 原物料（無 BOM 的子件）
    RawMaterial,
}

impl LineKind {
    /// 依層級決定產品行類型
    pub fn for_level(level: usize) -> Self {
        if level == 1 {
            LineKind::MainProduct
        } else {
            LineKind::SubAssembly
        }
    }

    /// 匯出標籤
    pub fn label(&self) -> &'static str {
        match self {
            LineKind::MainProduct => "Produto Principal",
            LineKind::SubAssembly => "Subconjunto",
            LineKind::Operation => "Operação",
            LineKind::RawMaterial => "Componente",
        }
    }

    /// 檢查是否為產品/子組件行
    pub fn is_product(&self) -> bool {
        match self {
            LineKind::MainProduct | LineKind::SubAssembly => true,
            LineKind::Operation | LineKind::RawMaterial => false,
        }
    }
}

/// 作業明細（僅作業行）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationDetail {
    /// 作業名稱
    pub name: String,

    /// 工作中心名稱
    pub work_center: String,

    /// 總作業時間（分鐘，已乘上數量倍數）
    pub duration_minutes: Decimal,

    /// 總作業成本
    pub cost: Decimal,
}

/// 成本報表行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRow {
    /// 頂層產品料號
    pub top_level_code: String,

    /// 當前物料料號
    pub item_code: String,

    /// 層級欄位（長度固定為 max_display_levels）
    pub levels: Vec<String>,

    /// BOM 參考 / 描述
    pub reference: String,

    /// 有效數量
    pub quantity: Option<Decimal>,

    /// 單位名稱
    pub uom_name: String,

    /// 單位成本
    pub unit_cost: Option<Decimal>,

    /// 行總成本（產品行為累計成本）
    pub total_cost: Decimal,

    /// 最近採購稅別（僅原物料）
    pub purchase_taxes: String,

    /// 行類型
    pub kind: LineKind,

    /// 作業明細
    pub operation: Option<OperationDetail>,
}

impl CostRow {
    /// 作業成本（非作業行為零）
    pub fn operation_cost(&self) -> Decimal {
        self.operation
            .as_ref()
            .map(|op| op.cost)
            .unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_kind_for_level() {
        assert_eq!(LineKind::for_level(1), LineKind::MainProduct);
        assert_eq!(LineKind::for_level(2), LineKind::SubAssembly);
        assert_eq!(LineKind::for_level(7), LineKind::SubAssembly);
    }

    #[test]
    fn test_line_kind_labels() {
        assert_eq!(LineKind::MainProduct.label(), "Produto Principal");
        assert_eq!(LineKind::SubAssembly.label(), "Subconjunto");
        assert_eq!(LineKind::Operation.label(), "Operação");
        assert_eq!(LineKind::RawMaterial.label(), "Componente");
        assert!(LineKind::SubAssembly.is_product());
        assert!(!LineKind::RawMaterial.is_product());
    }

    #[test]
    fn test_operation_cost_defaults_to_zero() {
        let row = CostRow {
            top_level_code: "A".to_string(),
            item_code: "B".to_string(),
            levels: vec!["[A] a".to_string(), "[B] b".to_string(), String::new()],
            reference: String::new(),
            quantity: None,
            uom_name: String::new(),
            unit_cost: None,
            total_cost: Decimal::ZERO,
            purchase_taxes: String::new(),
            kind: LineKind::RawMaterial,
            operation: None,
        };
        assert_eq!(row.operation_cost(), Decimal::ZERO);
    }
}
