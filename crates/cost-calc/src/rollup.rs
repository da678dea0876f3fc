//! 多層 BOM 成本累計（遞迴展開）

use cost_core::format::display_label;
use cost_core::{
    BomCatalog, BomNode, ComponentLine, CostError, CostRow, LineKind, Operation, OperationDetail,
    Product, PurchaseHistory, ReportConfig,
};
use rust_decimal::Decimal;

use crate::buffer::RowBuffer;
use crate::levels::LevelProjector;

/// 單一根 BOM 的累計結果
#[derive(Debug, Clone)]
pub struct RollupResult {
    /// 根 BOM ID
    pub root_bom_id: String,

    /// 頂層產品料號
    pub top_level_code: String,

    /// 深度優先前序的報表行
    pub rows: Vec<CostRow>,

    /// 根節點累計總成本
    pub total_cost: Decimal,
}

/// 走訪狀態：輸出緩衝區與當前展開路徑上的 BOM ID
struct Walk<'s> {
    sink: &'s mut RowBuffer,
    chain: Vec<String>,
}

/// BOM 成本累計引擎
pub struct CostRollup<'a> {
    /// BOM 目錄（子 BOM 解析）
    catalog: &'a dyn BomCatalog,

    /// 採購歷史（原物料稅別）
    history: &'a dyn PurchaseHistory,

    /// 報表配置
    config: &'a ReportConfig,

    projector: LevelProjector,
}

impl<'a> CostRollup<'a> {
    /// 創建新的累計引擎
    pub fn new(
        catalog: &'a dyn BomCatalog,
        history: &'a dyn PurchaseHistory,
        config: &'a ReportConfig,
    ) -> Self {
        Self {
            catalog,
            history,
            config,
            projector: LevelProjector::new(config.max_display_levels),
        }
    }

    /// 展開一個根 BOM，初始倍數為其基準數量（非正數時為 1）
    pub fn rollup(&self, root: &BomNode) -> cost_core::Result<RollupResult> {
        let top_level_code = root.product_code().to_string();
        let mut buffer = RowBuffer::new();

        let total_cost = self.traverse(
            &top_level_code,
            &[],
            root,
            1,
            root.initial_multiplier(),
            &mut buffer,
        )?;

        tracing::debug!(
            "根 BOM {} 展開完成：{} 行，總成本 {}",
            root.id,
            buffer.len(),
            total_cost
        );

        Ok(RollupResult {
            root_bom_id: root.id.clone(),
            top_level_code,
            rows: buffer.into_rows(),
            total_cost,
        })
    }

    /// 遞迴走訪 BOM 節點，將報表行附加到 `sink`，回傳此節點的累計成本
    ///
    /// 節點行在子節點之前輸出，作業行在子件行之前，皆依宣告順序。
    /// 展開路徑上重複出現的 BOM 會回傳 [`CostError::CyclicBom`]。
    pub fn traverse(
        &self,
        root_code: &str,
        path_labels: &[String],
        node: &BomNode,
        level: usize,
        multiplier: Decimal,
        sink: &mut RowBuffer,
    ) -> cost_core::Result<Decimal> {
        let mut walk = Walk {
            sink,
            chain: Vec::new(),
        };
        self.descend(root_code, path_labels, node, level, multiplier, &mut walk)
    }

    fn descend(
        &self,
        root_code: &str,
        path_labels: &[String],
        node: &BomNode,
        level: usize,
        multiplier: Decimal,
        walk: &mut Walk<'_>,
    ) -> cost_core::Result<Decimal> {
        if walk.chain.contains(&node.id) {
            let mut chain = walk.chain.clone();
            chain.push(node.id.clone());
            tracing::warn!("偵測到 BOM 循環: {}", chain.join(" -> "));
            return Err(CostError::CyclicBom { chain });
        }
        walk.chain.push(node.id.clone());

        tracing::debug!(
            "展開 BOM {}（層級 {}，倍數 {}）",
            node.id,
            level,
            multiplier
        );

        let label = node
            .product
            .as_ref()
            .map(Product::display_label)
            .unwrap_or_else(|| display_label(None, None));

        let product_row = self.product_row(root_code, path_labels, &label, node, level, multiplier);
        let product_index = walk.sink.reserve(product_row);

        let mut child_path = path_labels.to_vec();
        child_path.push(label);

        let mut rolled_up = Decimal::ZERO;

        if self.config.include_operations {
            for operation in &node.operations {
                let row =
                    self.operation_row(root_code, &child_path, node, operation, level, multiplier)?;
                rolled_up = checked_add(node, rolled_up, row.total_cost)?;
                walk.sink.push(row);
            }
        }

        if self.config.include_components {
            for component in &node.components {
                let child_qty = component
                    .quantity
                    .checked_mul(multiplier)
                    .ok_or_else(|| overflow(node))?;

                let sub_bom = component
                    .product
                    .as_ref()
                    .and_then(|p| self.catalog.find_bom(&p.id, &node.key()));

                match sub_bom {
                    Some(sub_bom) => {
                        tracing::debug!("子件 {} 解析為子組件 BOM {}", node.id, sub_bom.id);
                        let subtotal = self.descend(
                            root_code,
                            &child_path,
                            sub_bom,
                            level + 1,
                            child_qty,
                            walk,
                        )?;
                        rolled_up = checked_add(node, rolled_up, subtotal)?;
                    }
                    None => {
                        let row = self.raw_material_row(
                            root_code,
                            &child_path,
                            node,
                            component,
                            level,
                            child_qty,
                        )?;
                        rolled_up = checked_add(node, rolled_up, row.total_cost)?;
                        walk.sink.push(row);
                    }
                }
            }
        }

        walk.sink.patch_total(product_index, rolled_up);
        walk.chain.pop();

        Ok(rolled_up)
    }

    /// 產品/子組件行（總成本待回填）
    fn product_row(
        &self,
        root_code: &str,
        path_labels: &[String],
        label: &str,
        node: &BomNode,
        level: usize,
        multiplier: Decimal,
    ) -> CostRow {
        let unit_cost = node
            .product
            .as_ref()
            .map(|p| p.standard_price)
            .unwrap_or(Decimal::ZERO);

        CostRow {
            top_level_code: root_code.to_string(),
            item_code: node.product_code().to_string(),
            levels: self.projector.project(path_labels, label, level - 1),
            reference: display_label(node.code.as_deref(), node.product_name()),
            quantity: Some(multiplier),
            uom_name: node.uom_name.clone().unwrap_or_default(),
            unit_cost: Some(unit_cost),
            total_cost: Decimal::ZERO,
            purchase_taxes: String::new(),
            kind: LineKind::for_level(level),
            operation: None,
        }
    }

    /// 作業行：成本 = 每單位成本 × 倍數
    fn operation_row(
        &self,
        root_code: &str,
        child_path: &[String],
        node: &BomNode,
        operation: &Operation,
        level: usize,
        multiplier: Decimal,
    ) -> cost_core::Result<CostRow> {
        let cost = operation
            .cost_per_unit()
            .and_then(|unit| unit.checked_mul(multiplier))
            .ok_or_else(|| overflow(node))?;
        let duration = operation
            .cycle_time_minutes()
            .checked_mul(multiplier)
            .ok_or_else(|| overflow(node))?;

        if operation.work_center.is_none() {
            tracing::trace!("作業 {} 沒有工作中心，成本為零", operation.name);
        }

        Ok(CostRow {
            top_level_code: root_code.to_string(),
            item_code: node.product_code().to_string(),
            levels: self.projector.project(child_path, &operation.name, level),
            reference: String::new(),
            quantity: None,
            uom_name: String::new(),
            unit_cost: None,
            total_cost: cost,
            purchase_taxes: String::new(),
            kind: LineKind::Operation,
            operation: Some(OperationDetail {
                name: operation.name.clone(),
                work_center: operation.work_center_name().to_string(),
                duration_minutes: duration,
                cost,
            }),
        })
    }

    /// 原物料行：成本 = 有效數量 × 單位成本
    fn raw_material_row(
        &self,
        root_code: &str,
        child_path: &[String],
        node: &BomNode,
        component: &ComponentLine,
        level: usize,
        child_qty: Decimal,
    ) -> cost_core::Result<CostRow> {
        let product = component.product.as_ref();
        if product.is_none() {
            tracing::trace!("BOM 行無法解析產品，以零成本輸出");
        }

        let label = product
            .map(Product::display_label)
            .unwrap_or_else(|| display_label(None, None));
        let unit_cost = product.map(|p| p.standard_price).unwrap_or(Decimal::ZERO);
        let total_cost = child_qty
            .checked_mul(unit_cost)
            .ok_or_else(|| overflow(node))?;

        Ok(CostRow {
            top_level_code: root_code.to_string(),
            item_code: product
                .and_then(|p| p.default_code.clone())
                .unwrap_or_default(),
            levels: self.projector.project(child_path, &label, level),
            reference: String::new(),
            quantity: Some(child_qty),
            uom_name: component.uom_name.clone().unwrap_or_default(),
            unit_cost: Some(unit_cost),
            total_cost,
            purchase_taxes: product.map(|p| self.purchase_taxes(p)).unwrap_or_default(),
            kind: LineKind::RawMaterial,
            operation: None,
        })
    }

    /// 最近採購稅別（以 `, ` 串接；停用或無紀錄時為空）
    fn purchase_taxes(&self, product: &Product) -> String {
        if !self.config.include_taxes {
            return String::new();
        }

        match self.history.last_purchase_taxes(&product.id) {
            Some(names) => names.join(", "),
            None => {
                tracing::trace!("產品 {} 沒有已確認的採購紀錄", product.id);
                String::new()
            }
        }
    }
}

fn overflow(node: &BomNode) -> CostError {
    tracing::warn!("BOM {} 的數量或成本溢位", node.id);
    CostError::QuantityOverflow {
        bom_id: node.id.clone(),
    }
}

fn checked_add(node: &BomNode, total: Decimal, value: Decimal) -> cost_core::Result<Decimal> {
    total.checked_add(value).ok_or_else(|| overflow(node))
}
