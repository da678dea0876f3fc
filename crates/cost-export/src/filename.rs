//! 匯出檔名

use cost_core::BomNode;

const FILE_PREFIX: &str = "estrutura_custo_detalhada";

/// 檔名取前三個根 BOM 的代碼
const MAX_CODES_IN_NAME: usize = 3;

/// 依根 BOM 產生匯出檔名
///
/// 每個代碼依序取 BOM 參考編號、產品料號、品名，皆缺漏時為 `BOM`。
pub fn export_filename(roots: &[&BomNode]) -> String {
    if roots.is_empty() {
        return format!("{FILE_PREFIX}.csv");
    }

    let codes: Vec<&str> = roots
        .iter()
        .take(MAX_CODES_IN_NAME)
        .map(|bom| root_code(bom))
        .collect();

    format!("{FILE_PREFIX}_{}.csv", codes.join("_"))
}

fn root_code(bom: &BomNode) -> &str {
    let product = bom.product.as_ref();
    [
        bom.code.as_deref(),
        product.and_then(|p| p.default_code.as_deref()),
        product.and_then(|p| p.name.as_deref()),
    ]
    .into_iter()
    .flatten()
    .find(|s| !s.is_empty())
    .unwrap_or("BOM")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cost_core::Product;
    use rust_decimal::Decimal;

    #[test]
    fn test_filename_without_roots() {
        assert_eq!(export_filename(&[]), "estrutura_custo_detalhada.csv");
    }

    #[test]
    fn test_filename_code_fallbacks() {
        let with_code = BomNode::new("1", Product::new("a", Decimal::ZERO), Decimal::ONE).with_code("B-100");
        let with_default_code = BomNode::new(
            "2",
            Product::new("b", Decimal::ZERO).with_code("PRD-2").with_name("Bench"),
            Decimal::ONE,
        );
        let with_name = BomNode::new("3", Product::new("c", Decimal::ZERO).with_name("Desk"), Decimal::ONE);
        let bare = BomNode::new("4", Product::new("d", Decimal::ZERO), Decimal::ONE);

        assert_eq!(
            export_filename(&[&with_code, &with_default_code, &with_name, &bare]),
            "estrutura_custo_detalhada_B-100_PRD-2_Desk.csv"
        );
        assert_eq!(export_filename(&[&bare]), "estrutura_custo_detalhada_BOM.csv");
    }
}
