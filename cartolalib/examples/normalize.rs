use cartolalib::{
    batch::{build_all, BatchMode},
    config::ValidationConfig,
    formats::{csv::Csv, json::Json},
    traits::{ReadFormat, WriteFormat},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Пример: JSON -> канонический CSV (stdin -> stdout), невалидные пропускаются
    let inputs = Json::read(std::io::BufReader::new(std::io::stdin()))?;
    let report = build_all(&inputs, &ValidationConfig::default(), BatchMode::Collect)?;
    for (index, err) in &report.rejected {
        eprintln!("skipped #{index}: {err}");
    }
    Csv::write(std::io::stdout(), &report.records)?;
    Ok(())
}
