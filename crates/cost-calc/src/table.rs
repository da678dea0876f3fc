//! 報表行 → 表格儲存格（原始數值或格式化字串）

use std::fmt;

use cost_core::format::{format_decimal, format_duration};
use cost_core::{CostRow, LineKind};
use rust_decimal::Decimal;
use serde::Serialize;

/// 數值輸出方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueStyle {
    /// 原始數值（內部儲存使用）
    Raw,
    /// 逗號小數字串（文字匯出使用）
    Formatted,
}

/// 表格儲存格
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(Decimal),
}

impl Cell {
    pub fn empty() -> Self {
        Cell::Text(String::new())
    }

    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    fn decimal(value: Option<Decimal>, style: ValueStyle) -> Self {
        match (value, style) {
            (None, _) => Cell::empty(),
            (Some(v), ValueStyle::Raw) => Cell::Number(v),
            (Some(v), ValueStyle::Formatted) => Cell::Text(format_decimal(v)),
        }
    }

    fn duration(minutes: Option<Decimal>, style: ValueStyle) -> Self {
        match (minutes, style) {
            (None, _) => Cell::empty(),
            (Some(v), ValueStyle::Raw) => Cell::Number(v),
            (Some(v), ValueStyle::Formatted) => Cell::Text(format_duration(Some(v))),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Text(s) if s.is_empty())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{}", n),
        }
    }
}

/// 表頭標籤（含 `max_levels` 個層級欄位）
pub fn header_labels(max_levels: usize) -> Vec<String> {
    let mut header = vec![
        "Código LdM Principal".to_string(),
        "Código Item".to_string(),
    ];
    header.extend((1..=max_levels).map(|i| format!("Nível {}", i)));
    header.extend(
        [
            "Ref. LdM Item",
            "Qtd Item",
            "Unidade de Medida",
            "Custo Unit. Item",
            "Custo Total Linha Item/LdM",
            "Taxas Última Compra",
            "Tipo de Linha",
            "Operação: Nome (Detalhe)",
            "Operação: Centro Trabalho (Detalhe)",
            "Operação: Tempo (HH:MM:SS)",
            "Operação: Custo (Detalhe)",
        ]
        .map(str::to_string),
    );
    header
}

/// 將一行轉為儲存格
pub fn row_cells(row: &CostRow, style: ValueStyle) -> Vec<Cell> {
    let mut cells = vec![Cell::text(&row.top_level_code), Cell::text(&row.item_code)];
    cells.extend(row.levels.iter().map(Cell::text));

    cells.push(Cell::text(&row.reference));
    cells.push(Cell::decimal(row.quantity, style));
    cells.push(Cell::text(&row.uom_name));
    cells.push(Cell::decimal(row.unit_cost, style));
    cells.push(Cell::decimal(Some(row.total_cost), style));
    cells.push(Cell::text(&row.purchase_taxes));
    cells.push(Cell::text(row.kind.label()));

    match (row.kind, &row.operation) {
        (LineKind::Operation, Some(op)) => {
            cells.push(Cell::text(&op.name));
            cells.push(Cell::text(&op.work_center));
            cells.push(Cell::duration(Some(op.duration_minutes), style));
            cells.push(Cell::decimal(Some(op.cost), style));
        }
        (LineKind::MainProduct | LineKind::SubAssembly | LineKind::RawMaterial, _)
        | (LineKind::Operation, None) => {
            cells.extend(std::iter::repeat_with(Cell::empty).take(4));
        }
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use cost_core::OperationDetail;

    fn operation_row() -> CostRow {
        CostRow {
            top_level_code: "BIKE".to_string(),
            item_code: "BIKE".to_string(),
            levels: vec!["[BIKE] Bike".to_string(), "Weld".to_string()],
            reference: String::new(),
            quantity: None,
            uom_name: String::new(),
            unit_cost: None,
            total_cost: Decimal::new(455, 1),
            purchase_taxes: String::new(),
            kind: LineKind::Operation,
            operation: Some(OperationDetail {
                name: "Weld".to_string(),
                work_center: "Line 1".to_string(),
                duration_minutes: Decimal::from(90),
                cost: Decimal::new(455, 1),
            }),
        }
    }

    #[test]
    fn test_header_width_matches_rows() {
        let header = header_labels(2);
        assert_eq!(header.len(), 2 + 2 + 11);
        assert_eq!(header[2], "Nível 1");
        assert_eq!(header[3], "Nível 2");

        let cells = row_cells(&operation_row(), ValueStyle::Formatted);
        assert_eq!(cells.len(), header.len());
    }

    #[test]
    fn test_formatted_operation_cells() {
        let cells = row_cells(&operation_row(), ValueStyle::Formatted);
        let text: Vec<String> = cells.iter().map(Cell::to_string).collect();

        assert_eq!(
            text[4..],
            [
                "", "", "", "", "45,50", "", "Operação", "Weld", "Line 1", "01:30:00", "45,50"
            ]
            .map(str::to_string)
        );
    }

    #[test]
    fn test_raw_operation_cells_keep_numbers() {
        let cells = row_cells(&operation_row(), ValueStyle::Raw);

        assert_eq!(cells[5], Cell::empty());
        assert_eq!(cells[8], Cell::Number(Decimal::new(455, 1)));
        assert_eq!(cells[13], Cell::Number(Decimal::from(90)));
        assert_eq!(cells[14], Cell::Number(Decimal::new(455, 1)));
    }

    #[test]
    fn test_product_row_has_blank_operation_columns() {
        let mut row = operation_row();
        row.kind = LineKind::MainProduct;
        row.operation = None;
        row.quantity = Some(Decimal::ONE);

        let cells = row_cells(&row, ValueStyle::Formatted);
        assert_eq!(cells[5], Cell::text("1,00"));
        assert!(cells[11..].iter().all(Cell::is_empty));
    }
}
