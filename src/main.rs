// ============================================================================
// Energy Market Simulation Driver
// ============================================================================

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use energy_market::domain::MarketMode;
use energy_market::interfaces::RecordSink;
use energy_market::pricing::PricingKind;
use energy_market::simulation::{
    run_experiment, CsvSink, JsonLinesSink, Simulation, SimulationConfig,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::Level;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Peer double auction with the central agent as fallback
    Peer,
    /// Central agent only
    Central,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Pricing {
    Imbalance,
    Performance,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Jsonl,
}

/// Local energy market simulation
#[derive(Parser, Debug)]
#[command(name = "energy-market")]
#[command(about = "Simulates a local energy market with peer-to-peer trading and a central backstop")]
#[command(version)]
struct Args {
    /// TOML configuration file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Clearing mode
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Prosumers per run
    #[arg(long)]
    agents: Option<usize>,

    /// Independent runs
    #[arg(long)]
    runs: Option<u32>,

    /// Simulated days per run
    #[arg(long)]
    days: Option<u32>,

    /// Base seed (run r uses seed + r)
    #[arg(long)]
    seed: Option<u64>,

    /// Lower bound of the price sensitivity
    #[arg(long)]
    sensitivity_min: Option<f64>,

    /// Upper bound of the price sensitivity
    #[arg(long)]
    sensitivity_max: Option<f64>,

    /// Panel production scale used when sizing installations
    #[arg(long)]
    panel_production: Option<f64>,

    /// Sell-price adaptation policy
    #[arg(long, value_enum)]
    pricing: Option<Pricing>,

    /// Worker threads for runs
    #[arg(long)]
    workers: Option<usize>,

    /// Output file (stdout when absent)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "csv")]
    format: Format,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn into_config(self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::from_toml_file(path)
                .with_context(|| format!("Failed to load config file: {}", path.display()))?,
            None => SimulationConfig::default(),
        };

        if let Some(mode) = self.mode {
            config.market.mode = match mode {
                Mode::Peer => MarketMode::PeerToPeer,
                Mode::Central => MarketMode::CentralOnly,
            };
        }
        if let Some(pricing) = self.pricing {
            config.pricing = match pricing {
                Pricing::Imbalance => PricingKind::Imbalance,
                Pricing::Performance => PricingKind::Performance,
            };
        }
        if let Some(agents) = self.agents {
            config.agents = agents;
        }
        if let Some(runs) = self.runs {
            config.runs = runs;
        }
        if let Some(days) = self.days {
            config.days = days;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(min) = self.sensitivity_min {
            config.sensitivity_range.0 = min;
        }
        if let Some(max) = self.sensitivity_max {
            config.sensitivity_range.1 = max;
        }
        if let Some(panel_production) = self.panel_production {
            config.panel_production = panel_production;
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }

        config.validate().context("Invalid simulation configuration")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let format = args.format;
    let output = args.output.clone();
    let config = args.into_config()?;

    tracing::info!(
        mode = ?config.market.mode,
        pricing = ?config.pricing,
        agents = config.agents,
        runs = config.runs,
        days = config.days,
        "Starting simulation"
    );

    let sim = Simulation::new(config).context("Failed to set up simulation")?;

    let writer: Box<dyn Write> = match &output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let mut sink: Box<dyn RecordSink> = match format {
        Format::Csv => Box::new(CsvSink::new(writer)),
        Format::Jsonl => Box::new(JsonLinesSink::new(writer)),
    };

    let summary = run_experiment(&sim, sink.as_mut()).context("Simulation failed")?;

    tracing::info!(
        runs = summary.runs,
        records = summary.records_written,
        seed = sim.base_seed(),
        "Simulation complete"
    );

    Ok(())
}
