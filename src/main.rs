use geojson_validate::output::{Output, Report};
use geojson_validate::{Expect, Options, Validator};
use serde_json::Value;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process;
use structopt::StructOpt;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(StructOpt, Debug)]
#[structopt(
    name = "geojson_validate",
    about = "Validate GeoJSON documents against the RFC 7946 object model"
)]
struct Opt {
    /// Expected document kind: geojson, geometry, geometry-collection, feature or feature-collection
    #[structopt(short, long, default_value = "geojson")]
    expect: Expect,

    /// Print one JSON object per input instead of text
    #[structopt(short, long)]
    json: bool,

    /// Print at most this many errors per input
    #[structopt(short, long)]
    max_errors: Option<usize>,

    /// Validate features in parallel once a collection has this many
    #[structopt(long, default_value = "512")]
    parallel_threshold: usize,

    /// Input files, stdin when empty or `-`
    #[structopt(parse(from_os_str))]
    files: Vec<PathBuf>,
}

fn decode(reader: impl Read) -> Result<Value, serde_json::Error> {
    serde_json::from_reader(BufReader::new(reader))
}

fn load(path: &Path) -> Result<Value, Box<dyn Error>> {
    if path.as_os_str() == "-" {
        return Ok(decode(io::stdin())?);
    }
    let file = File::open(path)?;
    Ok(decode(file)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let opt = Opt::from_args();
    let validator = Validator::with_options(Options {
        parallel_threshold: opt.parallel_threshold,
    });

    let files = if opt.files.is_empty() {
        vec![PathBuf::from("-")]
    } else {
        opt.files.clone()
    };

    let mut reports = vec![];
    let mut failed = false;
    for path in &files {
        let source = path.display().to_string();
        let value = match load(path) {
            Ok(value) => value,
            Err(err) => {
                error!(%source, %err, "could not read input");
                failed = true;
                continue;
            }
        };
        let mut report = Report::new(source, validator.validate_as(opt.expect, &value));
        if let Some(max) = opt.max_errors {
            report = report.limit(max);
        }
        info!(source = %report.source, valid = report.is_valid(), "validated");
        failed |= !report.is_valid();
        reports.push(report);
    }

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    if opt.json {
        reports.write_json_lines(&mut writer)?;
    } else {
        reports.write_text(&mut writer)?;
    }

    if failed {
        process::exit(1);
    }
    Ok(())
}
