mod logic;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use logic::{CampaignPlan, CampaignRecord, aggregate, parse_seed_list, run_campaign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "middleearth-tester", version)]
#[command(about = "Seeded headless campaigns against the Middle-earth quest engine")]
struct Args {
    /// Seeds to run (comma-separated; ranges like 1..10 or 1..=10)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Days to simulate per campaign (defaults to the plan's last day)
    #[arg(long)]
    days: Option<u32>,

    /// Campaign plan JSON file (defaults to the embedded fellowship plan)
    #[arg(long)]
    plan: Option<PathBuf>,

    /// Print the resolved plan and exit
    #[arg(long)]
    show_plan: bool,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Exit non-zero when any scheduled action is rejected
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let plan = load_plan(&args)?;
    if maybe_show_plan(&args, &plan)? {
        return Ok(());
    }

    if args.report == ReportFormat::Console {
        announce_banner();
    }

    let start_time = Instant::now();
    let seeds = parse_seed_list(&args.seeds)?;
    let days = args.days.unwrap_or_else(|| plan.last_day().max(1));
    let records: Vec<CampaignRecord> = seeds
        .iter()
        .map(|&seed| run_campaign(&plan, seed, days))
        .collect();

    write_reports(&args, &records, start_time)?;

    let rejected = records
        .iter()
        .flat_map(|r| &r.actions)
        .any(|action| !action.ok);
    if args.strict && rejected {
        std::process::exit(1);
    }

    Ok(())
}

fn load_plan(args: &Args) -> Result<CampaignPlan> {
    match &args.plan {
        Some(path) => CampaignPlan::load(path),
        None => CampaignPlan::default_plan().context("embedded plan is invalid"),
    }
}

fn maybe_show_plan(args: &Args, plan: &CampaignPlan) -> Result<bool> {
    if !args.show_plan {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Plan: {}", plan.name)?;
    for step in &plan.steps {
        writeln!(
            output_target.writer(),
            "  day {:>3}  {}",
            step.day,
            step.action.label()
        )?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "💍 Middle-earth Campaign Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn write_reports(args: &Args, records: &[CampaignRecord], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    let summary = aggregate(records);

    match args.report {
        ReportFormat::Json => {
            logic::reports::generate_json_report(&mut output_target, records, summary.as_ref())?;
        }
        ReportFormat::Markdown => {
            logic::reports::generate_markdown_report(
                &mut output_target,
                records,
                summary.as_ref(),
            )?;
        }
        ReportFormat::Console => {
            logic::reports::generate_console_report(
                &mut output_target,
                records,
                summary.as_ref(),
                args.verbose,
            )?;
            let duration = start_time.elapsed();
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {duration:?}")?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
