//! CSV 寫出

use std::io::Write;

use cost_calc::{CostReport, ValueStyle};

/// UTF-8 位元組順序標記
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// CSV 匯出器
#[derive(Debug, Clone)]
pub struct CsvExporter {
    /// 欄位分隔符
    delimiter: u8,

    /// 是否寫入 UTF-8 BOM
    byte_order_mark: bool,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self {
            delimiter: b';',
            byte_order_mark: true,
        }
    }
}

impl CsvExporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置欄位分隔符
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// 建構器模式：設置是否寫入 BOM
    pub fn with_byte_order_mark(mut self, enabled: bool) -> Self {
        self.byte_order_mark = enabled;
        self
    }

    /// 匯出為位元組
    pub fn export(&self, report: &CostReport) -> crate::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.write_to(report, &mut bytes)?;
        Ok(bytes)
    }

    /// 匯出到任意寫入端（表頭在前，格式化數值）
    pub fn write_to<W: Write>(&self, report: &CostReport, mut writer: W) -> crate::Result<()> {
        if self.byte_order_mark {
            writer.write_all(UTF8_BOM)?;
        }

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote_style(csv::QuoteStyle::Always)
            .flexible(false)
            .from_writer(writer);

        let table = report.table(ValueStyle::Formatted);
        for row in &table {
            csv_writer.write_record(row.iter().map(|cell| cell.to_string()))?;
        }
        csv_writer.flush()?;

        tracing::info!("CSV 匯出完成：{} 行（含表頭）", table.len());
        Ok(())
    }
}
