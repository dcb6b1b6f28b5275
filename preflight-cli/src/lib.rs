//! Preflight command-line tool.

use std::io::{BufWriter, Write};
use std::path::Path;
use std::{fmt, fs, io};

use anyhow::{Context, Result};
use serde::Serialize;

pub mod briefing;
pub mod calc;
pub mod config;
pub use config::Config;

/// Prints `value` to stdout, as JSON if `json` is set and as text otherwise.
pub fn emit<T: Serialize + fmt::Display>(value: &T, json: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, value).context("write json")?;
        writeln!(stdout)?;
    } else {
        let text = value.to_string();
        write!(stdout, "{text}")?;
        if !text.ends_with('\n') {
            writeln!(stdout)?;
        }
    }
    Ok(())
}

/// Writes the JSON schema of the observation feed.
pub fn json_schema(output: &Path, gzip: bool) -> Result<()> {
    let schema = schemars::schema_for!(store::Feed);
    let mut writer: Box<dyn io::Write> =
        Box::new(BufWriter::new(fs::File::create(output).context("create output")?));
    if gzip {
        writer = Box::new(BufWriter::new(flate2::write::GzEncoder::new(
            writer,
            flate2::Compression::best(),
        )));
    }
    serde_json::to_writer(&mut writer, &schema).context("write schema")?;
    writer.flush().context("flush schema")?;
    Ok(())
}
