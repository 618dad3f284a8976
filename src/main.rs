use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use manifest_flatten::ingestion::{ExcelSheetSelection, LoadOptions};
use manifest_flatten::logging::init_logging;
use manifest_flatten::pipeline::{convert_file, ConvertOptions};
use manifest_flatten::variant::Variant;

/// Convert a container trade manifest (Excel or CSV) into a JSON array of records.
#[derive(Debug, Parser)]
#[command(name = "manifest-flatten", version, about)]
struct Cli {
    /// Input workbook (.xlsx, .xls, .xlsm, .xlsb, .ods) or CSV file.
    input: PathBuf,

    /// Existing directory that receives `<input file name>.json`.
    output_dir: PathBuf,

    /// Manifest layout (excel, excel-pruned, csv). Defaults to the input's format.
    #[arg(long)]
    variant: Option<Variant>,

    /// Workbook sheet to read instead of the first one.
    #[arg(long)]
    sheet: Option<String>,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn verbosity(&self) -> i8 {
        if self.quiet {
            -1
        } else {
            self.verbose.min(i8::MAX as u8) as i8
        }
    }

    fn convert_options(&self) -> ConvertOptions {
        let load = LoadOptions {
            excel_sheet_selection: match &self.sheet {
                Some(name) => ExcelSheetSelection::Sheet(name.clone()),
                None => ExcelSheetSelection::First,
            },
            ..Default::default()
        };
        ConvertOptions {
            variant: self.variant,
            load,
            ..Default::default()
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    tracing::debug!(?cli, "starting");
    let summary = convert_file(&cli.input, &cli.output_dir, &cli.convert_options())?;

    println!("{}", summary.output.display());
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbosity());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
