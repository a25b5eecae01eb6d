//! sheetcalc - evaluate spreadsheet formulas from the command line

mod config;
mod error;

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use sheetcalc_core::{CellRef, Sheet};
use sheetcalc_engine::engine::{builtin_list, detect_circular_reference_with_limits};

use crate::error::CliError;

fn print_usage() {
    eprintln!("Usage: sheetcalc [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -s, --set <CELL=CONTENT>  Seed a cell before evaluating (can be repeated)");
    eprintln!("  -c, --command <FORMULA>   Evaluate FORMULA against the seeded cells");
    eprintln!("  --check <CELL>            With -c, report whether FORMULA in CELL would be circular");
    eprintln!("  --config <FILE>           Load limits from a TOML file");
    eprintln!("  --no-default-config       Ignore the user config file");
    eprintln!("  --list-functions          Print the built-in functions");
    eprintln!("  -h, --help                Print help");
    eprintln!();
    eprintln!("Without -c, prints the value of every seeded cell.");
}

#[derive(Debug, Default)]
struct Options {
    seeds: Vec<(String, String)>,
    command: Option<String>,
    check: Option<String>,
    config: Option<PathBuf>,
    no_default_config: bool,
    list_functions: bool,
    help: bool,
}

fn parse_args(args: &[String]) -> error::Result<Options> {
    let mut options = Options::default();
    let mut i = 0;

    let value = |i: usize, flag: &str| -> error::Result<String> {
        args.get(i)
            .cloned()
            .ok_or_else(|| CliError::Usage(format!("{} requires a value", flag)))
    };

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => options.help = true,
            "-s" | "--set" => {
                i += 1;
                let seed = value(i, "--set")?;
                let (cell, content) = seed.split_once('=').ok_or_else(|| {
                    CliError::Usage(format!("--set expects CELL=CONTENT, got '{}'", seed))
                })?;
                options.seeds.push((cell.to_string(), content.to_string()));
            }
            "-c" | "--command" => {
                i += 1;
                options.command = Some(value(i, "--command")?);
            }
            "--check" => {
                i += 1;
                options.check = Some(value(i, "--check")?);
            }
            "--config" => {
                i += 1;
                options.config = Some(PathBuf::from(value(i, "--config")?));
            }
            "--no-default-config" => options.no_default_config = true,
            "--list-functions" => options.list_functions = true,
            arg => return Err(CliError::Usage(format!("Unexpected argument: {}", arg))),
        }
        i += 1;
    }

    if options.check.is_some() && options.command.is_none() {
        return Err(CliError::Usage("--check requires --command".to_string()));
    }

    Ok(options)
}

fn run(options: Options) -> anyhow::Result<()> {
    if options.list_functions {
        for (name, description) in builtin_list() {
            println!("{:<12} {}", name, description);
        }
        return Ok(());
    }

    let config = config::load_config(options.config.as_deref(), options.no_default_config)
        .context("failed to load config")?;
    let mut sheet = Sheet::with_limits(config.limits);

    for (cell, content) in &options.seeds {
        sheet
            .set_cell(cell, content)
            .map_err(CliError::from)
            .with_context(|| format!("cannot set {}", cell))?;
    }

    match (options.command, options.check) {
        (Some(formula), Some(cell)) => {
            let cell_ref = CellRef::parse(&cell)
                .ok_or_else(|| CliError::Usage(format!("Invalid cell reference: {}", cell)))?;
            let cyclic = detect_circular_reference_with_limits(
                &formula,
                &cell_ref.to_string(),
                &sheet,
                &sheet.limits,
            );
            println!("{}", if cyclic { "cycle" } else { "ok" });
        }
        (Some(formula), None) => {
            println!("{}", sheet.evaluate(&formula));
        }
        (None, _) => {
            let mut cells: Vec<CellRef> = sheet.cells().collect();
            cells.sort_by_key(|cell| (cell.row, cell.col));
            for cell in cells {
                let id = cell.to_string();
                println!("{}\t{}", id, sheet.display(&id));
            }
        }
    }

    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    if options.help {
        print_usage();
        return;
    }

    if let Err(e) = run(options) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args_seeds_keep_formula_equals() {
        let options = parse_args(&args(&["-s", "A1=3", "--set", "A2==A1*2"])).unwrap();
        assert_eq!(
            options.seeds,
            vec![
                ("A1".to_string(), "3".to_string()),
                ("A2".to_string(), "=A1*2".to_string())
            ]
        );
    }

    #[test]
    fn test_parse_args_rejects_bad_input() {
        assert!(parse_args(&args(&["-s"])).is_err());
        assert!(parse_args(&args(&["-s", "A1"])).is_err());
        assert!(parse_args(&args(&["--bogus"])).is_err());
        assert!(parse_args(&args(&["--check", "A1"])).is_err());
    }
}
