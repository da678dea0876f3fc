//! 層級欄位投影

/// 超出最大層級時的串接分隔符
pub const OVERFLOW_SEPARATOR: &str = " > ";

/// 層級欄位投影器
///
/// 將任意深度的樹狀路徑投影到固定數量的顯示欄位。
#[derive(Debug, Clone, Copy)]
pub struct LevelProjector {
    max_levels: usize,
}

impl LevelProjector {
    pub fn new(max_levels: usize) -> Self {
        Self { max_levels }
    }

    /// 產生層級欄位
    ///
    /// 祖先標籤依序填入對應欄位；`level_index` 在範圍內時自身標籤佔據該欄。
    /// 超出範圍的祖先與自身標籤都折疊到最後一欄（非空時以 ` > ` 串接）。
    pub fn project(
        &self,
        parent_path: &[String],
        own_label: &str,
        level_index: usize,
    ) -> Vec<String> {
        let mut columns = vec![String::new(); self.max_levels];

        for (index, label) in parent_path.iter().enumerate() {
            self.place(&mut columns, index, label);
        }
        self.place(&mut columns, level_index, own_label);

        columns
    }

    fn place(&self, columns: &mut [String], index: usize, label: &str) {
        if index < self.max_levels {
            columns[index] = label.to_string();
        } else if let Some(last) = columns.last_mut() {
            if last.is_empty() {
                *last = label.to_string();
            } else {
                last.push_str(OVERFLOW_SEPARATOR);
                last.push_str(label);
            }
        }
    }
}
