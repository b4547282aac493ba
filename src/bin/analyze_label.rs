//! Analyse a nutrition label from a JSON file
//! Usage: cargo run --bin analyze_label -- <label.json | --sample>

use ketoscan::analysis::KetoAnalyzer;
use ketoscan::config::Settings;
use ketoscan::models::NutritionData;
use ketoscan::tables::ReferenceTables;
use ketoscan::tools::labels;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let source = match args.get(1) {
        Some(s) => s.as_str(),
        None => {
            eprintln!("Usage: analyze_label <label.json | --sample>");
            std::process::exit(2);
        }
    };

    let settings = Settings::from_env()?;
    let tables = match &settings.tables_dir {
        Some(dir) => ReferenceTables::load_dir(dir)?,
        None => ReferenceTables::embedded(),
    };

    let data = if source == "--sample" {
        NutritionData::sample()
    } else {
        let text = std::fs::read_to_string(source)?;
        serde_json::from_str::<NutritionData>(&text)?.with_derived_serving_weight()
    };

    let analyzer = KetoAnalyzer::new(&tables).with_thresholds(settings.thresholds);
    let response = labels::analyze_label(&analyzer, &data);
    println!("{}", serde_json::to_string_pretty(&response)?);

    if !response.is_analyzed() {
        std::process::exit(1);
    }

    Ok(())
}
