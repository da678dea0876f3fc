//! 報表配置模型

use serde::{Deserialize, Serialize};

use crate::{CostError, Result};

/// 成本報表配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// 報表名稱
    pub name: String,

    /// 最大顯示層級（超出部分折疊到最後一欄）
    pub max_display_levels: usize,

    /// 是否包含製程作業
    pub include_operations: bool,

    /// 是否包含子件
    pub include_components: bool,

    /// 是否查詢最近採購稅別
    pub include_taxes: bool,

    /// 多個根 BOM 之間是否插入空白分隔行
    pub separate_roots: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            name: "Relatório de Custo Detalhado".to_string(),
            max_display_levels: 10,
            include_operations: true,
            include_components: true,
            include_taxes: true,
            separate_roots: true,
        }
    }
}

impl ReportConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 從 JSON 載入配置，缺漏欄位使用預設值
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CostError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置報表名稱
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// 建構器模式：設置最大顯示層級
    pub fn with_max_display_levels(mut self, levels: usize) -> Self {
        self.max_display_levels = levels;
        self
    }

    /// 建構器模式：設置是否包含作業
    pub fn with_operations(mut self, include: bool) -> Self {
        self.include_operations = include;
        self
    }

    /// 建構器模式：設置是否包含子件
    pub fn with_components(mut self, include: bool) -> Self {
        self.include_components = include;
        self
    }

    /// 建構器模式：設置是否查詢稅別
    pub fn with_taxes(mut self, include: bool) -> Self {
        self.include_taxes = include;
        self
    }

    /// 建構器模式：設置根 BOM 分隔行
    pub fn with_root_separator(mut self, separate: bool) -> Self {
        self.separate_roots = separate;
        self
    }

    /// 驗證配置
    ///
    /// 零層級合法：此時不輸出任何層級欄位。
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CostError::InvalidConfig("報表名稱不可為空".to_string()));
        }
        Ok(())
    }
}
