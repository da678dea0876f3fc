//! 報表行緩衝區（依索引回填累計成本）

use cost_core::CostRow;
use rust_decimal::Decimal;

/// 已預留行的索引
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowIndex(usize);

/// 只能附加的報表行緩衝區
///
/// 產品行先以佔位成本寫入，子節點全部走訪後再依 [`RowIndex`] 回填。
#[derive(Debug, Default)]
pub struct RowBuffer {
    rows: Vec<CostRow>,
}

impl RowBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 附加一行
    pub fn push(&mut self, row: CostRow) {
        self.rows.push(row);
    }

    /// 附加一行並預留其索引供之後回填
    pub fn reserve(&mut self, row: CostRow) -> RowIndex {
        self.rows.push(row);
        RowIndex(self.rows.len() - 1)
    }

    /// 回填已預留行的總成本
    pub fn patch_total(&mut self, index: RowIndex, total: Decimal) {
        if let Some(row) = self.rows.get_mut(index.0) {
            row.total_cost = total;
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[CostRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<CostRow> {
        self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cost_core::LineKind;

    fn row(kind: LineKind) -> CostRow {
        CostRow {
            top_level_code: "TOP".to_string(),
            item_code: "ITEM".to_string(),
            levels: Vec::new(),
            reference: String::new(),
            quantity: None,
            uom_name: String::new(),
            unit_cost: None,
            total_cost: Decimal::ZERO,
            purchase_taxes: String::new(),
            kind,
            operation: None,
        }
    }

    #[test]
    fn test_reserve_then_patch() {
        let mut buffer = RowBuffer::new();
        let index = buffer.reserve(row(LineKind::MainProduct));
        buffer.push(row(LineKind::RawMaterial));
        buffer.push(row(LineKind::RawMaterial));

        buffer.patch_total(index, Decimal::from(42));

        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.rows()[0].total_cost, Decimal::from(42));
        assert_eq!(buffer.rows()[1].total_cost, Decimal::ZERO);
    }

    #[test]
    fn test_into_rows_preserves_order() {
        let mut buffer = RowBuffer::new();
        assert!(buffer.is_empty());
        buffer.push(row(LineKind::MainProduct));
        buffer.push(row(LineKind::Operation));

        let kinds: Vec<_> = buffer.into_rows().into_iter().map(|r| r.kind).collect();
        assert_eq!(kinds, vec![LineKind::MainProduct, LineKind::Operation]);
    }
}
