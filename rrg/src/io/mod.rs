use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use log::{Level, LevelFilter, info, log};
use plansheet::io::ext_repr::ExtPage;
use serde::Serialize;
use svg::Document;

use crate::EPOCH;

pub mod cli;
pub mod output;

pub fn read_page(path: &Path) -> Result<ExtPage> {
    let file = File::open(path)
        .with_context(|| format!("could not open page file: {}", path.display()))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .with_context(|| format!("could not parse page file: {}", path.display()))
}

pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not create output file: {}", path.display()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value).context("could not serialize output")?;
    info!("output written to {}", path.display());
    Ok(())
}

pub fn write_svg(document: &Document, path: &Path) -> Result<()> {
    svg::save(path, document)
        .with_context(|| format!("failed to write svg file: {}", path.display()))?;
    info!("svg written to {}", path.display());
    Ok(())
}

pub fn init_logger(level_filter: LevelFilter) -> Result<()> {
    fern::Dispatch::new()
        // Perform allocation-free log formatting
        .format(|out, message, record| {
            let handle = std::thread::current();
            let thread_name = handle.name().unwrap_or("-");

            let duration = EPOCH.elapsed();
            let sec = duration.as_secs() % 60;
            let min = (duration.as_secs() / 60) % 60;
            let hours = (duration.as_secs() / 60) / 60;

            let prefix = format!(
                "[{}] [{:0>2}:{:0>2}:{:0>2}] <{}>",
                record.level(),
                hours,
                min,
                sec,
                thread_name,
            );

            out.finish(format_args!("{prefix:<27}{message}"))
        })
        .level(level_filter)
        .chain(std::io::stdout())
        .apply()
        .context("could not initialize logger")?;
    log!(Level::Info, "epoch: {}", jiff::Timestamp::now());
    Ok(())
}
