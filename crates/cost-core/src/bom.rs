//! BOM 主資料模型（外部唯讀輸入）

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 產品主資料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// 產品ID
    pub id: String,

    /// 料號
    pub default_code: Option<String>,

    /// 品名
    pub name: Option<String>,

    /// 標準成本（單位成本）
    pub standard_price: Decimal,
}

impl Product {
    /// 創建新的產品
    pub fn new(id: impl Into<String>, standard_price: Decimal) -> Self {
        Self {
            id: id.into(),
            default_code: None,
            name: None,
            standard_price,
        }
    }

    /// 建構器模式：設置料號
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.default_code = Some(code.into());
        self
    }

    /// 建構器模式：設置品名
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// 顯示標籤 `[料號] 品名`
    pub fn display_label(&self) -> String {
        crate::format::display_label(self.default_code.as_deref(), self.name.as_deref())
    }
}

/// 工作中心
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkCenter {
    pub name: String,

    /// 每小時成本
    pub costs_hour: Decimal,
}

impl WorkCenter {
    pub fn new(name: impl Into<String>, costs_hour: Decimal) -> Self {
        Self {
            name: name.into(),
            costs_hour,
        }
    }
}

/// 製程作業
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// 作業名稱
    pub name: String,

    /// 工作中心
    pub work_center: Option<WorkCenter>,

    /// 手動週期時間（分鐘）
    pub time_cycle_manual: Option<Decimal>,

    /// 標準週期時間（分鐘）
    pub time_cycle: Option<Decimal>,
}

impl Operation {
    /// 創建新的作業
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            work_center: None,
            time_cycle_manual: None,
            time_cycle: None,
        }
    }

    /// 建構器模式：設置工作中心
    pub fn with_work_center(mut self, work_center: WorkCenter) -> Self {
        self.work_center = Some(work_center);
        self
    }

    /// 建構器模式：設置手動週期時間
    pub fn with_manual_cycle(mut self, minutes: Decimal) -> Self {
        self.time_cycle_manual = Some(minutes);
        self
    }

    /// 建構器模式：設置標準週期時間
    pub fn with_cycle(mut self, minutes: Decimal) -> Self {
        self.time_cycle = Some(minutes);
        self
    }

    /// 每單位父件的週期時間（分鐘）
    ///
    /// 手動值為零或缺漏時退回標準值，兩者皆缺則為零。
    pub fn cycle_time_minutes(&self) -> Decimal {
        self.time_cycle_manual
            .filter(|t| !t.is_zero())
            .or(self.time_cycle)
            .unwrap_or(Decimal::ZERO)
    }

    /// 每單位父件的作業成本 = 分鐘 / 60 × 時薪
    ///
    /// 超出 `Decimal` 範圍時回傳 `None`。
    pub fn cost_per_unit(&self) -> Option<Decimal> {
        let minutes = self.cycle_time_minutes();
        match &self.work_center {
            Some(wc) if wc.costs_hour > Decimal::ZERO && minutes > Decimal::ZERO => {
                (minutes / Decimal::from(60)).checked_mul(wc.costs_hour)
            }
            _ => Some(Decimal::ZERO),
        }
    }

    /// 工作中心名稱（缺漏時為空字串）
    pub fn work_center_name(&self) -> &str {
        self.work_center.as_ref().map(|wc| wc.name.as_str()).unwrap_or("")
    }
}

/// BOM 行（子件）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentLine {
    /// 子件產品（可能無法解析）
    pub product: Option<Product>,

    /// 每單位父件用量
    pub quantity: Decimal,

    /// 單位
    pub uom_name: Option<String>,
}

impl ComponentLine {
    pub fn new(product: Product, quantity: Decimal) -> Self {
        Self {
            product: Some(product),
            quantity,
            uom_name: None,
        }
    }

    /// 無法解析產品的 BOM 行
    pub fn unresolved(quantity: Decimal) -> Self {
        Self {
            product: None,
            quantity,
            uom_name: None,
        }
    }

    /// 建構器模式：設置單位
    pub fn with_uom(mut self, uom: impl Into<String>) -> Self {
        self.uom_name = Some(uom.into());
        self
    }
}

/// BOM 類型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BomType {
    /// 製造
    #[default]
    Normal,
    /// 虛擬件（套件）
    Phantom,
}

/// 子 BOM 查找鍵（公司 + BOM 類型）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BomKey {
    pub company_id: Option<String>,
    pub bom_type: BomType,
}

/// BOM 節點
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomNode {
    /// BOM ID
    pub id: String,

    /// BOM 參考編號
    pub code: Option<String>,

    /// 成品
    pub product: Option<Product>,

    /// 基準數量
    pub product_qty: Decimal,

    /// 單位
    pub uom_name: Option<String>,

    /// 公司
    pub company_id: Option<String>,

    /// BOM 類型
    pub bom_type: BomType,

    /// 優先序（越小越優先）
    pub sequence: u32,

    /// 是否啟用
    pub active: bool,

    /// 製程作業（依宣告順序）
    pub operations: Vec<Operation>,

    /// 子件（依宣告順序）
    pub components: Vec<ComponentLine>,
}

impl BomNode {
    /// 創建新的 BOM
    pub fn new(id: impl Into<String>, product: Product, product_qty: Decimal) -> Self {
        Self {
            id: id.into(),
            code: None,
            product: Some(product),
            product_qty,
            uom_name: None,
            company_id: None,
            bom_type: BomType::Normal,
            sequence: 0,
            active: true,
            operations: Vec::new(),
            components: Vec::new(),
        }
    }

    /// 建構器模式：設置參考編號
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// 建構器模式：設置單位
    pub fn with_uom(mut self, uom: impl Into<String>) -> Self {
        self.uom_name = Some(uom.into());
        self
    }

    /// 建構器模式：設置公司
    pub fn with_company(mut self, company_id: impl Into<String>) -> Self {
        self.company_id = Some(company_id.into());
        self
    }

    /// 建構器模式：設置 BOM 類型
    pub fn with_type(mut self, bom_type: BomType) -> Self {
        self.bom_type = bom_type;
        self
    }

    /// 建構器模式：設置優先序
    pub fn with_sequence(mut self, sequence: u32) -> Self {
        self.sequence = sequence;
        self
    }

    /// 建構器模式：停用
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// 建構器模式：添加作業
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    /// 建構器模式：添加子件
    pub fn with_component(mut self, component: ComponentLine) -> Self {
        self.components.push(component);
        self
    }

    /// 子 BOM 查找鍵
    pub fn key(&self) -> BomKey {
        BomKey {
            company_id: self.company_id.clone(),
            bom_type: self.bom_type,
        }
    }

    /// 根節點的初始倍數（基準數量非正數時為 1）
    pub fn initial_multiplier(&self) -> Decimal {
        if self.product_qty > Decimal::ZERO {
            self.product_qty
        } else {
            Decimal::ONE
        }
    }

    /// 成品料號
    pub fn product_code(&self) -> &str {
        self.product
            .as_ref()
            .and_then(|p| p.default_code.as_deref())
            .unwrap_or("")
    }

    /// 成品品名
    pub fn product_name(&self) -> Option<&str> {
        self.product.as_ref().and_then(|p| p.name.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn assembly_center() -> WorkCenter {
        WorkCenter::new("Assembly", Decimal::from(60))
    }

    #[rstest]
    #[case(Some(Decimal::from(30)), Some(Decimal::from(10)), Decimal::from(30))]
    #[case(None, Some(Decimal::from(10)), Decimal::from(10))]
    #[case(Some(Decimal::ZERO), Some(Decimal::from(10)), Decimal::from(10))]
    #[case(None, None, Decimal::ZERO)]
    fn test_cycle_time_fallback(
        #[case] manual: Option<Decimal>,
        #[case] standard: Option<Decimal>,
        #[case] expected: Decimal,
    ) {
        let op = Operation {
            name: "Weld".to_string(),
            work_center: None,
            time_cycle_manual: manual,
            time_cycle: standard,
        };
        assert_eq!(op.cycle_time_minutes(), expected);
    }

    #[test]
    fn test_operation_cost_per_unit() {
        let op = Operation::new("Weld")
            .with_work_center(assembly_center())
            .with_cycle(Decimal::from(30));

        // 30 分鐘 × 60/小時 = 30
        assert_eq!(op.cost_per_unit(), Some(Decimal::from(30)));
        assert_eq!(op.work_center_name(), "Assembly");
    }

    #[test]
    fn test_operation_cost_zero_without_rate_or_time() {
        let no_center = Operation::new("Paint").with_cycle(Decimal::from(15));
        assert_eq!(no_center.cost_per_unit(), Some(Decimal::ZERO));
        assert_eq!(no_center.work_center_name(), "");

        let free_center = Operation::new("Paint")
            .with_work_center(WorkCenter::new("Free", Decimal::ZERO))
            .with_cycle(Decimal::from(15));
        assert_eq!(free_center.cost_per_unit(), Some(Decimal::ZERO));

        let negative_time = Operation::new("Paint")
            .with_work_center(assembly_center())
            .with_cycle(Decimal::from(-5));
        assert_eq!(negative_time.cost_per_unit(), Some(Decimal::ZERO));
    }

    #[test]
    fn test_operation_cost_overflow() {
        let op = Operation::new("Forge")
            .with_work_center(WorkCenter::new("Press", Decimal::MAX))
            .with_cycle(Decimal::from(600));

        assert_eq!(op.cost_per_unit(), None);
    }

    #[test]
    fn test_initial_multiplier() {
        let product = Product::new("p1", Decimal::ONE);
        let bom = BomNode::new("b1", product.clone(), Decimal::from(4));
        assert_eq!(bom.initial_multiplier(), Decimal::from(4));

        let zero = BomNode::new("b2", product, Decimal::ZERO);
        assert_eq!(zero.initial_multiplier(), Decimal::ONE);
    }

    #[test]
    fn test_bom_builder() {
        let product = Product::new("p1", Decimal::from(12))
            .with_code("BIKE-001")
            .with_name("Bike");
        let bom = BomNode::new("b1", product, Decimal::ONE)
            .with_code("BOM-BIKE")
            .with_company("ACME")
            .with_type(BomType::Phantom)
            .with_operation(Operation::new("Assemble"))
            .with_component(ComponentLine::unresolved(Decimal::ONE));

        assert_eq!(bom.product_code(), "BIKE-001");
        assert_eq!(bom.product_name(), Some("Bike"));
        assert_eq!(bom.operations.len(), 1);
        assert_eq!(bom.components.len(), 1);
        assert_eq!(
            bom.key(),
            BomKey {
                company_id: Some("ACME".to_string()),
                bom_type: BomType::Phantom,
            }
        );
    }
}
