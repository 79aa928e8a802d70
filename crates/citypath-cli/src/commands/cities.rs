use std::io::{self, Write};

use anyhow::Result;

use citypath_cli::output::{write_json, OutputFormat};
use citypath_lib::canadian_cities;

use super::CommandContext;

pub fn run(context: &CommandContext) -> Result<()> {
    let cities = canadian_cities();
    let mut stdout = io::stdout().lock();
    match context.format {
        OutputFormat::Json => write_json(&mut stdout, cities)?,
        OutputFormat::Text => {
            for (index, city) in cities.iter().enumerate() {
                writeln!(stdout, "{:>4}. {city}", index + 1)?;
            }
        }
    }
    Ok(())
}
