use std::fs;
use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::{info, warn};
use plansheet::entities::SheetGrid;
use plansheet::io::export::export_part;
use plansheet::io::import::Importer;
use plansheet::io::svg::sheet_to_svg;
use rrg::config::RRGConfig;
use rrg::io::cli::Cli;
use rrg::io::output::RRGOutput;
use rrg::opt::RRGOptimizer;
use rrg::io;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config: RRGConfig = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            RRGConfig::default()
        }
        Some(config_file) => {
            let file = File::open(config_file)?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).context("incorrect config file format")?
        }
    };

    info!("Successfully parsed RRGConfig: {config:?}");

    let input_file_stem = args
        .input_file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .context("input file has no usable name")?;

    if !args.output_folder.exists() {
        fs::create_dir_all(&args.output_folder).with_context(|| {
            format!("could not create output folder: {:?}", args.output_folder)
        })?;
    }

    let ext_page = io::read_page(args.input_file.as_path())?;
    let importer = Importer::new(
        config.footprint_rules.clone(),
        config.grid_rows,
        config.grid_cols,
    );
    let page = importer.import_page(&ext_page)?;

    let mut optimizer = RRGOptimizer::new(config.clone());
    let arrangement = match config.parallel {
        true => optimizer.optimize_parallel(&page.parts),
        false => optimizer.optimize(&page.parts),
    };

    let mut parts = page.parts;
    if let Some(arrangement) = &arrangement {
        for part in &mut parts {
            part.position = arrangement.positions.get(&part.id).copied();
        }
    } else {
        warn!("[MAIN] the part set does not fit the sheet, try fewer or smaller parts");
    }

    {
        let output = RRGOutput {
            parts: parts.iter().map(export_part).collect(),
            arrangement: arrangement.as_ref().map(|a| {
                a.positions
                    .iter()
                    .map(|(id, pos)| (id.clone(), (pos.row, pos.col)))
                    .collect()
            }),
            score: arrangement.as_ref().map(|a| a.score),
            config: config.clone(),
        };
        let output_path = args.output_folder.join(format!("arr_{input_file_stem}.json"));
        io::write_json(&output, output_path.as_path())?;
    }

    if arrangement.is_some() {
        let mut grid = SheetGrid::new(config.grid_rows, config.grid_cols);
        for part in parts {
            if let Some(anchor) = part.position {
                grid.place(part, anchor);
            }
        }
        let svg_path = args.output_folder.join(format!("arr_{input_file_stem}.svg"));
        let document = sheet_to_svg(&grid, config.svg_draw_options, 100.0, input_file_stem);
        io::write_svg(&document, svg_path.as_path())?;
    }

    Ok(())
}
