use crate::io::{create_writer, OutputFormat};
use crate::scoring::score;
use anyhow::Result;
use std::io;

pub fn run_score(impact: i64, probability: i64, format: OutputFormat) -> Result<()> {
    let result = score(impact, probability)?;
    let mut writer = create_writer(format, Box::new(io::stdout().lock()));
    writer.write_score(&result)
}
