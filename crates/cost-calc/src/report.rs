//! 多根 BOM 報表組裝

use cost_core::{BomCatalog, BomNode, CostError, CostRow, LineKind, PurchaseHistory, ReportConfig};
use rust_decimal::Decimal;

use crate::rollup::{CostRollup, RollupResult};
use crate::table::{header_labels, row_cells, Cell, ValueStyle};

/// 成本報表
#[derive(Debug, Clone)]
pub struct CostReport {
    /// 最大顯示層級
    pub max_levels: usize,

    /// 根 BOM 之間是否插入空白行
    pub separate_roots: bool,

    /// 依請求順序排列的根 BOM 結果
    pub sections: Vec<RollupResult>,
}

impl CostReport {
    /// 表頭
    pub fn header(&self) -> Vec<String> {
        header_labels(self.max_levels)
    }

    /// 所有資料行（不含分隔行）
    pub fn rows(&self) -> impl Iterator<Item = &CostRow> {
        self.sections.iter().flat_map(|s| s.rows.iter())
    }

    /// 各根 BOM 累計成本之和
    pub fn total_cost(&self) -> Decimal {
        self.sections.iter().map(|s| s.total_cost).sum()
    }

    /// 完整表格：表頭 + 各根 BOM 的行（多個根時可插入空白分隔行）
    pub fn table(&self, style: ValueStyle) -> Vec<Vec<Cell>> {
        let header = self.header();
        let width = header.len();

        let mut table = vec![header.into_iter().map(Cell::Text).collect::<Vec<_>>()];
        let last = self.sections.len().saturating_sub(1);

        for (i, section) in self.sections.iter().enumerate() {
            table.extend(section.rows.iter().map(|row| row_cells(row, style)));

            if self.separate_roots && self.sections.len() > 1 && i != last {
                table.push(vec![Cell::empty(); width]);
            }
        }

        table
    }

    /// 報表摘要
    pub fn summary(&self) -> ReportSummary {
        ReportSummary::from_rows(self.rows())
    }
}

/// 報表摘要
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportSummary {
    /// 所有主產品行的累計成本之和
    pub total_cost: Decimal,

    /// 產品/子組件行數
    pub products: usize,

    /// 作業行數
    pub operations: usize,

    /// 原物料行數
    pub components: usize,
}

impl ReportSummary {
    /// 從報表行統計
    pub fn from_rows<'r>(rows: impl IntoIterator<Item = &'r CostRow>) -> Self {
        rows.into_iter().fold(Self::default(), |mut acc, row| {
            acc.add(row.kind, row.total_cost);
            acc
        })
    }

    /// 累計一行（總成本只計主產品行，子行已包含在其中）
    pub fn add(&mut self, kind: LineKind, total_cost: Decimal) {
        match kind {
            LineKind::MainProduct => {
                self.products += 1;
                self.total_cost += total_cost;
            }
            LineKind::SubAssembly => self.products += 1,
            LineKind::Operation => self.operations += 1,
            LineKind::RawMaterial => self.components += 1,
        }
    }
}

/// 報表產生器：對每個根 BOM 執行一次累計
pub struct ReportGenerator<'a> {
    catalog: &'a dyn BomCatalog,
    history: &'a dyn PurchaseHistory,
    config: &'a ReportConfig,
}

impl<'a> ReportGenerator<'a> {
    pub fn new(
        catalog: &'a dyn BomCatalog,
        history: &'a dyn PurchaseHistory,
        config: &'a ReportConfig,
    ) -> Self {
        Self {
            catalog,
            history,
            config,
        }
    }

    /// 依 BOM ID 產生報表
    pub fn generate_by_ids<S: AsRef<str>>(&self, bom_ids: &[S]) -> cost_core::Result<CostReport> {
        let roots = self.resolve_roots(bom_ids)?;
        self.generate(&roots)
    }

    /// 依 BOM ID 從目錄取出根 BOM
    pub fn resolve_roots<S: AsRef<str>>(&self, bom_ids: &[S]) -> cost_core::Result<Vec<&'a BomNode>> {
        if bom_ids.is_empty() {
            return Err(CostError::NoBomSelected);
        }

        bom_ids
            .iter()
            .map(|id| {
                let id = id.as_ref();
                self.catalog
                    .bom(id)
                    .ok_or_else(|| CostError::BomNotFound(id.to_string()))
            })
            .collect()
    }

    /// 產生報表
    pub fn generate(&self, roots: &[&BomNode]) -> cost_core::Result<CostReport> {
        if roots.is_empty() {
            return Err(CostError::NoBomSelected);
        }

        tracing::info!(
            "開始產生成本報表「{}」：根 BOM {} 筆，最大層級 {}",
            self.config.name,
            roots.len(),
            self.config.max_display_levels
        );
        let start_time = std::time::Instant::now();

        let engine = CostRollup::new(self.catalog, self.history, self.config);
        let sections = roots
            .iter()
            .map(|root| engine.rollup(root))
            .collect::<cost_core::Result<Vec<_>>>()?;

        // 各根總成本相加也必須在數值範圍內
        sections.iter().try_fold(Decimal::ZERO, |acc, section| {
            acc.checked_add(section.total_cost)
                .ok_or_else(|| CostError::QuantityOverflow {
                    bom_id: section.root_bom_id.clone(),
                })
        })?;

        let report = CostReport {
            max_levels: self.config.max_display_levels,
            separate_roots: self.config.separate_roots,
            sections,
        };

        tracing::info!(
            "成本報表完成，耗時 {:?}：{} 行，總成本 {}",
            start_time.elapsed(),
            report.rows().count(),
            report.total_cost()
        );

        Ok(report)
    }
}
