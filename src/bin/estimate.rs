//! Headless cost estimate.
//!
//! Runs one prediction and prints the full report as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin estimate -- --age 35 --bmi 25 --children 0 \
//!     --sex female --smoker no --region northeast [--model <path>]
//! ```

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use insurecast::adapters::sanitize::SanitizingMakeWriter;
use insurecast::config::Settings;
use insurecast::{
    InsurecastError, ModelStore, PatientProfile, PredictionPresenter, Region, Sex, SmokerStatus,
};

const USAGE: &str = "Usage: estimate --age <18-80> --bmi <15-50> --children <0-5> --sex <female|male> --smoker <yes|no> --region <northeast|northwest|southeast|southwest> [--model <path>]";

#[derive(Default)]
struct Args {
    age: Option<String>,
    bmi: Option<String>,
    children: Option<String>,
    sex: Option<String>,
    smoker: Option<String>,
    region: Option<String>,
    model: Option<PathBuf>,
}

fn parse_args() -> Args {
    let mut args = std::env::args().skip(1);
    let mut parsed = Args::default();

    while let Some(arg) = args.next() {
        let slot = match arg.as_str() {
            "--age" => &mut parsed.age,
            "--bmi" => &mut parsed.bmi,
            "--children" => &mut parsed.children,
            "--sex" => &mut parsed.sex,
            "--smoker" => &mut parsed.smoker,
            "--region" => &mut parsed.region,
            "--model" => {
                let p = args.next().unwrap_or_default();
                if p.is_empty() {
                    eprintln!("{USAGE}");
                    std::process::exit(2);
                }
                parsed.model = Some(PathBuf::from(p));
                continue;
            }
            "-h" | "--help" => {
                println!("{USAGE}\n\nPrints the prediction report (cost, metrics, advice and chart descriptions) as JSON.");
                std::process::exit(0);
            }
            _ => {
                eprintln!("Unknown arg: {arg}\n{USAGE}");
                std::process::exit(2);
            }
        };

        match args.next() {
            Some(v) if !v.is_empty() => *slot = Some(v),
            _ => {
                eprintln!("Missing value for {arg}\n{USAGE}");
                std::process::exit(2);
            }
        }
    }

    parsed
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| anyhow!("Missing required argument --{name}\n{USAGE}"))
}

fn build_profile(args: &Args) -> Result<PatientProfile> {
    let age: u8 = required(&args.age, "age")?
        .trim()
        .parse()
        .context("--age must be a whole number")?;
    let bmi: f64 = required(&args.bmi, "bmi")?
        .trim()
        .parse()
        .context("--bmi must be a number")?;
    let children: u8 = required(&args.children, "children")?
        .trim()
        .parse()
        .context("--children must be a whole number")?;

    let sex: Sex = required(&args.sex, "sex")?
        .parse()
        .map_err(InsurecastError::from)?;
    let smoker: SmokerStatus = required(&args.smoker, "smoker")?
        .parse()
        .map_err(InsurecastError::from)?;
    let region: Region = required(&args.region, "region")?
        .parse()
        .map_err(InsurecastError::from)?;

    let profile = PatientProfile::new(age, bmi, children, sex, smoker, region)
        .map_err(InsurecastError::from)?;
    Ok(profile)
}

fn run() -> Result<()> {
    let args = parse_args();
    let settings = Settings::from_env();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(SanitizingMakeWriter::new(std::io::stderr)),
        )
        .init();

    let profile = build_profile(&args)?;
    let model_path = args.model.unwrap_or(settings.model_path);

    let presenter = PredictionPresenter::new(ModelStore::open(&model_path));
    let report = presenter.present(&profile)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
