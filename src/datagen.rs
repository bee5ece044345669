//! Sample dataset generator for the table viewer.

use anyhow::{Context, Result};
use mltable::{generate_document, ExportScope, MultiLevelTable, SampleConfig, TableConfig};
use simplelog::{ColorChoice, Config as LogConfig, LevelFilter, TermLogger, TerminalMode};
use std::env;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Default)]
struct Config {
    sample: SampleConfig,
    output_file: Option<PathBuf>,
    csv_file: Option<PathBuf>,
    use_brotli: bool,
}

fn next_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    match args.get(*i) {
        Some(value) => Ok(value),
        None => anyhow::bail!("{} requires an argument", flag),
    }
}

fn parse_args(args: &[String]) -> Result<Config> {
    let mut config = Config::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-roots" => {
                config.sample.roots = next_value(args, &mut i, "-roots")?.parse()?;
            }
            "-depth" => {
                config.sample.depth = next_value(args, &mut i, "-depth")?.parse()?;
            }
            "-fanout" => {
                config.sample.fanout_min = next_value(args, &mut i, "-fanout")?.parse()?;
                // An optional second number makes it a range.
                match args.get(i + 1).map(|next| next.parse::<usize>()) {
                    Some(Ok(max)) => {
                        i += 1;
                        config.sample.fanout_max = max;
                    }
                    _ => config.sample.fanout_max = config.sample.fanout_min,
                }
                if config.sample.fanout_max < config.sample.fanout_min {
                    anyhow::bail!(
                        "-fanout range is empty: {} > {}",
                        config.sample.fanout_min,
                        config.sample.fanout_max
                    );
                }
            }
            "-seed" => {
                config.sample.seed = next_value(args, &mut i, "-seed")?.parse()?;
            }
            "-out" => {
                config.output_file = Some(PathBuf::from(next_value(args, &mut i, "-out")?));
            }
            "-csv" => {
                config.csv_file = Some(PathBuf::from(next_value(args, &mut i, "-csv")?));
            }
            "-brotli" => {
                config.use_brotli = true;
            }
            "-h" | "-help" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => {
                log::warn!("unknown argument: {}", other);
            }
        }
        i += 1;
    }

    Ok(config)
}

fn print_help() {
    println!("Multi-level table dataset generator");
    println!("Usage: mltable-datagen [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -roots <N>             Number of top-level rows (default: 25)");
    println!("  -depth <N>             Nesting levels below the top level (default: 2)");
    println!("  -fanout <N> [M]        Children per row (default: 0 4)");
    println!("                         If two numbers provided, picks a random count in [N, M]");
    println!("  -seed <N>              Random seed (default: 42)");
    println!("  -out <FILE>            Output file path (default: dataset.json)");
    println!("  -brotli                Write compressed JSON (output: *.json.br)");
    println!("  -csv <FILE>            Also export every row as CSV");
    println!("  -h, -help, --help      Show this help message");
}

fn main() -> Result<()> {
    let _ = TermLogger::init(
        LevelFilter::Info,
        LogConfig::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args)?;

    let output_path = config.output_file.clone().unwrap_or_else(|| {
        if config.use_brotli {
            PathBuf::from("dataset.json.br")
        } else {
            PathBuf::from("dataset.json")
        }
    });

    let document = generate_document(&config.sample);
    document
        .save(&output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;
    println!("Dataset written to: {}", output_path.display());

    if let Some(csv_path) = &config.csv_file {
        let table = MultiLevelTable::new(document.columns(), TableConfig::default()).with_dataset(document.data);
        let file = File::create(csv_path).with_context(|| format!("Failed to create {}", csv_path.display()))?;
        let rows = table.export_csv(BufWriter::new(file), ExportScope::Filtered)?;
        println!("{} rows exported to: {}", rows, csv_path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("mltable-datagen")
            .chain(list.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_parse_fanout_range() {
        let config = parse_args(&args(&["-roots", "5", "-fanout", "1", "3", "-seed", "9"])).unwrap();
        assert_eq!(config.sample.roots, 5);
        assert_eq!((config.sample.fanout_min, config.sample.fanout_max), (1, 3));
        assert_eq!(config.sample.seed, 9);
    }

    #[test]
    fn test_parse_single_fanout() {
        let config = parse_args(&args(&["-fanout", "2", "-brotli"])).unwrap();
        assert_eq!((config.sample.fanout_min, config.sample.fanout_max), (2, 2));
        assert!(config.use_brotli);
    }

    #[test]
    fn test_missing_value_is_an_error() {
        assert!(parse_args(&args(&["-depth"])).is_err());
        assert!(parse_args(&args(&["-fanout", "3", "1"])).is_err());
    }
}
