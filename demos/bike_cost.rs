//! 腳踏車多層成本展開範例
//!
//! 建立 BOM 目錄與採購歷史，產生報表、匯出 CSV 並儲存

use anyhow::Result;
use bom_cost::*;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("===== Bike Cost Breakdown Example =====\n");

    // 步驟 1: 建立 BOM 目錄
    println!("[1] Create BOM Catalog");
    let catalog = create_bike_catalog();
    println!("    BOMs: {}\n", catalog.bom_count());

    // 步驟 2: 設定報表
    println!("[2] Configure Report");
    let config = ReportConfig::default().with_max_display_levels(3);
    println!("    Name: {}", config.name);
    println!("    Max levels: {}\n", config.max_display_levels);

    // 步驟 3: 產生報表
    println!("[3] Generate Report");
    let request = CostReportRequest::new(vec!["bom-bike".to_string()], config);
    let report = request.generate(&catalog, &catalog)?;

    for row in report.table(ValueStyle::Formatted) {
        let line: Vec<String> = row.iter().map(ToString::to_string).collect();
        println!("    {}", line.join(" | "));
    }

    let summary = report.summary();
    println!(
        "\n    Total: {}  (products {}, operations {}, components {})\n",
        format::format_currency(summary.total_cost),
        summary.products,
        summary.operations,
        summary.components
    );

    // 步驟 4: 匯出 CSV
    println!("[4] Export CSV");
    let file = request.export_csv(&catalog, &catalog)?;
    println!("    {} ({} bytes)\n", file.filename, file.bytes.len());

    // 步驟 5: 儲存報表
    println!("[5] Persist Report");
    let mut store = MemoryReportStore::new();
    let id = request.persist(&mut store, &catalog, &catalog)?;
    if let Some(record) = store.get(id) {
        println!("    {} [{:?}] {} lines", record.id, record.state, record.lines.len());
        for line in record.lines.iter().take(3) {
            println!("    #{} {}", line.sequence, line.hierarchy_path());
        }
    }

    println!("\n===== Done =====");
    Ok(())
}

/// 腳踏車 BOM：車架為子組件，車輪為原物料
fn create_bike_catalog() -> MemoryCatalog {
    let bike = Product::new("bike", Decimal::ZERO)
        .with_code("BIKE-001")
        .with_name("Bicicleta Urbana");
    let frame = Product::new("frame", Decimal::ZERO)
        .with_code("FRAME-001")
        .with_name("Quadro");
    let wheel = Product::new("wheel", Decimal::new(4550, 2))
        .with_code("WHEEL-001")
        .with_name("Roda 26");
    let tube = Product::new("tube", Decimal::new(1200, 2))
        .with_code("TUBE-001")
        .with_name("Tubo de Aço");

    let assembly = WorkCenter::new("Montagem", Decimal::from(60));
    let welding = WorkCenter::new("Solda", Decimal::from(90));

    MemoryCatalog::new()
        .with_bom(
            BomNode::new("bom-bike", bike, Decimal::ONE)
                .with_code("LDM-BIKE")
                .with_uom("Unidade")
                .with_operation(
                    Operation::new("Montagem Final")
                        .with_work_center(assembly)
                        .with_cycle(Decimal::from(45)),
                )
                .with_component(ComponentLine::new(frame.clone(), Decimal::ONE).with_uom("Unidade"))
                .with_component(ComponentLine::new(wheel.clone(), Decimal::from(2)).with_uom("Unidade")),
        )
        .with_bom(
            BomNode::new("bom-frame", frame, Decimal::ONE)
                .with_code("LDM-FRAME")
                .with_operation(
                    Operation::new("Solda do Quadro")
                        .with_work_center(welding)
                        .with_manual_cycle(Decimal::from(20)),
                )
                .with_component(ComponentLine::new(tube.clone(), Decimal::from(3)).with_uom("Metro")),
        )
        .with_purchase_line(
            PurchaseLine::new(1, wheel.id, PurchaseState::Purchase)
                .with_tax("ICMS 18%")
                .with_tax("IPI 5%"),
        )
        .with_purchase_line(PurchaseLine::new(2, tube.id, PurchaseState::Done).with_tax("ICMS 12%"))
}
