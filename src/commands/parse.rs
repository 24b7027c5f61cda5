use anyhow::Result;
use tracing::info;

use crate::numbers;
use crate::report::format_total;
use crate::types::{OutputFormat, TableSnapshot};

/// Run the cell parser over literal texts treated as one table
pub async fn handle_parse(texts: Vec<String>, format: OutputFormat) -> Result<()> {
    info!("Parsing {} cell texts", texts.len());

    let result = numbers::summarize(&[TableSnapshot { cells: texts.clone() }]);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Simple => {
            for text in &texts {
                let values: Vec<String> = numbers::numbers_in_cell(text)
                    .iter()
                    .map(f64::to_string)
                    .collect();
                println!("{:?} -> [{}]", text, values.join(", "));
            }
            println!("Numbers extracted: {}", result.numbers_found.len());
            println!("Unique numbers: {}", result.unique_numbers);
            println!("Total: {}", format_total(result.total));
        }
    }
    Ok(())
}
