//! 外部主資料查詢介面（BOM 目錄、採購歷史）

use serde::{Deserialize, Serialize};

use crate::bom::{BomKey, BomNode};

/// BOM 目錄
pub trait BomCatalog {
    /// 依 ID 取得 BOM
    fn bom(&self, bom_id: &str) -> Option<&BomNode>;

    /// 查找產品在指定公司/類型下適用的 BOM；無 BOM 表示原物料
    fn find_bom(&self, product_id: &str, key: &BomKey) -> Option<&BomNode>;
}

/// 採購歷史
pub trait PurchaseHistory {
    /// 最近一筆已確認採購行的稅別名稱
    fn last_purchase_taxes(&self, product_id: &str) -> Option<Vec<String>>;
}

/// 採購單狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseState {
    Draft,
    Sent,
    /// 已確認
    Purchase,
    /// 已完成
    Done,
    Cancel,
}

impl PurchaseState {
    /// 檢查是否為已確認/已完成
    pub fn is_finalized(&self) -> bool {
        matches!(self, PurchaseState::Purchase | PurchaseState::Done)
    }
}

/// 採購行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseLine {
    /// 採購行ID（越大越新）
    pub id: u64,

    /// 產品ID
    pub product_id: String,

    /// 狀態
    pub state: PurchaseState,

    /// 稅別名稱
    pub tax_names: Vec<String>,
}

impl PurchaseLine {
    pub fn new(id: u64, product_id: impl Into<String>, state: PurchaseState) -> Self {
        Self {
            id,
            product_id: product_id.into(),
            state,
            tax_names: Vec::new(),
        }
    }

    /// 建構器模式：添加稅別
    pub fn with_tax(mut self, name: impl Into<String>) -> Self {
        self.tax_names.push(name.into());
        self
    }
}

/// 記憶體主資料目錄
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    boms: Vec<BomNode>,
    purchase_lines: Vec<PurchaseLine>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加 BOM（同 ID 覆蓋）
    pub fn add_bom(&mut self, bom: BomNode) {
        match self.boms.iter_mut().find(|b| b.id == bom.id) {
            Some(existing) => *existing = bom,
            None => self.boms.push(bom),
        }
    }

    /// 建構器模式：添加 BOM
    pub fn with_bom(mut self, bom: BomNode) -> Self {
        self.add_bom(bom);
        self
    }

    /// 添加採購行
    pub fn add_purchase_line(&mut self, line: PurchaseLine) {
        self.purchase_lines.push(line);
    }

    /// 建構器模式：添加採購行
    pub fn with_purchase_line(mut self, line: PurchaseLine) -> Self {
        self.add_purchase_line(line);
        self
    }

    /// BOM 數量
    pub fn bom_count(&self) -> usize {
        self.boms.len()
    }
}

impl BomCatalog for MemoryCatalog {
    fn bom(&self, bom_id: &str) -> Option<&BomNode> {
        self.boms.iter().find(|b| b.id == bom_id)
    }

    fn find_bom(&self, product_id: &str, key: &BomKey) -> Option<&BomNode> {
        // min_by_key 在相同優先序時保留第一個（插入順序）
        self.boms
            .iter()
            .filter(|b| b.active && b.bom_type == key.bom_type)
            .filter(|b| b.product.as_ref().is_some_and(|p| p.id == product_id))
            .filter(|b| b.company_id.is_none() || b.company_id == key.company_id)
            .min_by_key(|b| b.sequence)
    }
}

impl PurchaseHistory for MemoryCatalog {
    fn last_purchase_taxes(&self, product_id: &str) -> Option<Vec<String>> {
        let line = self
            .purchase_lines
            .iter()
            .filter(|l| l.product_id == product_id && l.state.is_finalized())
            .max_by_key(|l| l.id)?;

        let names: Vec<String> = line
            .tax_names
            .iter()
            .filter(|n| !n.is_empty())
            .cloned()
            .collect();

        if names.is_empty() {
            tracing::trace!("產品 {} 最近採購行沒有稅別", product_id);
            None
        } else {
            Some(names)
        }
    }
}
