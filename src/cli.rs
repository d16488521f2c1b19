//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

use crate::adapters::csv_adapter::{write_universe, CsvAdapter};
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::adapters::text_report_adapter::TextReportAdapter;
use crate::domain::config_validation::{
    parse_bool, parse_date, validate_engine_config, validate_run_config, DATE_FORMAT,
    REPORT_FORMATS,
};
use crate::domain::engine_config::{
    EngineConfig, MIN_UNIVERSE_SIZE, MODEL_VERSION, REQUIRED_TICKER, SECTOR_WARNING_COUNT,
    TOP_N, TRADE_MIN_AVERAGE, TRADE_MIN_DISPERSION,
};
use crate::domain::error::StockCheckError;
use crate::domain::factor_model::FactorModel;
use crate::domain::mock_universe::make_mock_universe;
use crate::domain::stock_check::{StockCheck, StockCheckInput, StockCheckRun};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

pub const DEFAULT_MOCK_SIZE: usize = 250;

#[derive(Parser, Debug)]
#[command(
    name = "stockcheck",
    about = "Rank a stock universe and decide TRADE / NO TRADE"
)]
pub struct Cli {
    /// Emit debug diagnostics on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rank the universe and write the report
    Run {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        universe: Option<PathBuf>,
        #[arg(long)]
        prices: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long, value_enum)]
        format: Option<ReportFormat>,
        /// Force the NO TRADE header
        #[arg(long)]
        override_no_trade: bool,
        #[arg(long)]
        current_date: Option<String>,
        #[arg(long)]
        prediction_date: Option<String>,
    },
    /// Print the tickers that need a price, in output order
    Tickers {
        #[arg(long)]
        universe: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the locked factor table
    Factors,
    /// Write the deterministic mock universe as CSV
    MockUniverse {
        #[arg(long, default_value_t = DEFAULT_MOCK_SIZE)]
        size: usize,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Json,
    Csv,
    Text,
}

impl ReportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
            ReportFormat::Text => "text",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
            ReportFormat::Text => "txt",
        }
    }

    pub fn reporter(&self) -> Box<dyn ReportPort> {
        match self {
            ReportFormat::Json => Box::new(JsonReportAdapter),
            ReportFormat::Csv => Box::new(CsvReportAdapter),
            ReportFormat::Text => Box::new(TextReportAdapter),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = StockCheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            "text" => Ok(ReportFormat::Text),
            _ => Err(StockCheckError::ConfigInvalid {
                section: "run".into(),
                key: "format".into(),
                reason: format!("format must be one of {}", REPORT_FORMATS.join(", ")),
            }),
        }
    }
}

/// Settings for one `run` invocation, resolved from `[run]`.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub current_date: NaiveDate,
    pub prediction_date: NaiveDate,
    pub manual_override: bool,
    pub universe: PathBuf,
    pub prices: PathBuf,
    pub output: PathBuf,
    pub format: ReportFormat,
}

/// Command-line values layered over a config file. Keys set here win.
pub struct OverlayConfig<'a> {
    base: &'a dyn ConfigPort,
    values: HashMap<(String, String), String>,
}

impl<'a> OverlayConfig<'a> {
    pub fn new(base: &'a dyn ConfigPort) -> Self {
        Self {
            base,
            values: HashMap::new(),
        }
    }

    pub fn set(&mut self, section: &str, key: &str, value: Option<String>) {
        if let Some(v) = value {
            self.values.insert((section.to_string(), key.to_string()), v);
        }
    }

    fn lookup(&self, section: &str, key: &str) -> Option<&String> {
        self.values.get(&(section.to_string(), key.to_string()))
    }
}

impl ConfigPort for OverlayConfig<'_> {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        match self.lookup(section, key) {
            Some(v) => Some(v.clone()),
            None => self.base.get_string(section, key),
        }
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        match self.lookup(section, key) {
            Some(v) => v.trim().parse().unwrap_or(default),
            None => self.base.get_int(section, key, default),
        }
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        match self.lookup(section, key) {
            Some(v) => v.trim().parse().unwrap_or(default),
            None => self.base.get_double(section, key, default),
        }
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        match self.lookup(section, key) {
            Some(v) => parse_bool(v).unwrap_or(default),
            None => self.base.get_bool(section, key, default),
        }
    }
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run {
            config,
            universe,
            prices,
            output,
            format,
            override_no_trade,
            current_date,
            prediction_date,
        } => {
            let base = match load_config(&config) {
                Ok(a) => a,
                Err(code) => return code,
            };
            let mut overlay = OverlayConfig::new(&base);
            overlay.set("run", "universe", universe.map(|p| p.display().to_string()));
            overlay.set("run", "prices", prices.map(|p| p.display().to_string()));
            overlay.set("run", "output", output.map(|p| p.display().to_string()));
            overlay.set("run", "format", format.map(|f| f.as_str().to_string()));
            overlay.set("run", "current_date", current_date);
            overlay.set("run", "prediction_date", prediction_date);
            if override_no_trade {
                overlay.set("run", "manual_override", Some("true".to_string()));
            }
            run_stock_check(&overlay)
        }
        Command::Tickers { universe, config } => run_tickers(&universe, config.as_deref()),
        Command::Factors => run_factors(),
        Command::MockUniverse { size, output } => run_mock_universe(size, &output),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    eprintln!("Loading config from {}", path.display());
    FileConfigAdapter::from_file(path).map_err(|e| fail(&e))
}

fn fail(e: &StockCheckError) -> ExitCode {
    eprintln!("error: {e}");
    e.into()
}

fn run_stock_check(config: &dyn ConfigPort) -> ExitCode {
    // Stage 1: Validate and resolve config
    if let Err(e) = validate_engine_config(config).and_then(|()| validate_run_config(config)) {
        return fail(&e);
    }
    let engine = match build_engine_config(config) {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };
    let run_config = match build_run_config(config) {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };

    // Stage 2: Read inputs and run the pipeline
    eprintln!(
        "Loading universe from {} and prices from {}",
        run_config.universe.display(),
        run_config.prices.display()
    );
    let data_port = CsvAdapter::new(run_config.universe.clone()).with_prices(run_config.prices.clone());
    let result = match run_pipeline(&data_port, &engine, &run_config) {
        Ok(r) => r,
        Err(e) => return fail(&e),
    };

    // Stage 3: Console summary
    print_summary(&result, &engine);

    // Stage 4: Report
    match run_config.format.reporter().write(&result, &run_config.output) {
        Ok(()) => {
            eprintln!("\nReport written to: {}", run_config.output.display());
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

pub fn build_engine_config(config: &dyn ConfigPort) -> Result<EngineConfig, StockCheckError> {
    Ok(EngineConfig {
        model_version: text_or(config, "model_version", MODEL_VERSION),
        min_universe_size: count(config, "min_universe_size", MIN_UNIVERSE_SIZE)?,
        top_n: count(config, "top_n", TOP_N)?,
        required_ticker: text_or(config, "required_ticker", REQUIRED_TICKER),
        trade_min_average: config.get_double("engine", "trade_min_average", TRADE_MIN_AVERAGE),
        trade_min_dispersion: config.get_double(
            "engine",
            "trade_min_dispersion",
            TRADE_MIN_DISPERSION,
        ),
        sector_warning_count: count(config, "sector_warning_count", SECTOR_WARNING_COUNT)?,
    })
}

fn text_or(config: &dyn ConfigPort, key: &str, default: &str) -> String {
    config
        .get_string("engine", key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn count(config: &dyn ConfigPort, key: &str, default: usize) -> Result<usize, StockCheckError> {
    let value = config.get_int("engine", key, default as i64);
    usize::try_from(value)
        .ok()
        .filter(|v| *v >= 1)
        .ok_or_else(|| StockCheckError::ConfigInvalid {
            section: "engine".into(),
            key: key.into(),
            reason: format!("{key} must be at least 1"),
        })
}

pub fn build_run_config(config: &dyn ConfigPort) -> Result<RunConfig, StockCheckError> {
    let current_date = parse_date(
        config.get_string("run", "current_date").as_deref(),
        "current_date",
    )?;
    let prediction_date = match config.get_string("run", "prediction_date") {
        Some(s) => parse_date(Some(&s), "prediction_date")?,
        None => current_date
            .succ_opt()
            .ok_or_else(|| StockCheckError::ConfigInvalid {
                section: "run".into(),
                key: "current_date".into(),
                reason: "current_date has no following day".into(),
            })?,
    };
    let format = match config.get_string("run", "format") {
        Some(s) => s.parse()?,
        None => ReportFormat::Json,
    };
    let path = |key: &str| -> Result<PathBuf, StockCheckError> {
        config
            .get_string("run", key)
            .map(|s| PathBuf::from(s.trim()))
            .ok_or_else(|| StockCheckError::ConfigMissing {
                section: "run".into(),
                key: key.into(),
            })
    };
    let output = config
        .get_string("run", "output")
        .map(|s| PathBuf::from(s.trim()))
        .unwrap_or_else(|| PathBuf::from(format!("stock_check.{}", format.extension())));

    Ok(RunConfig {
        current_date,
        prediction_date,
        manual_override: config.get_bool("run", "manual_override", false),
        universe: path("universe")?,
        prices: path("prices")?,
        output,
        format,
    })
}

/// Load inputs through `data_port` and run one Stock Check.
pub fn run_pipeline(
    data_port: &dyn DataPort,
    engine: &EngineConfig,
    run_config: &RunConfig,
) -> Result<StockCheckRun, StockCheckError> {
    let universe = data_port.load_universe()?;
    let prices = data_port.load_prices()?;
    eprintln!(
        "Running Stock Check: {} instruments, {} prices, {} -> {}",
        universe.len(),
        prices.len(),
        run_config.current_date,
        run_config.prediction_date
    );

    let input = StockCheckInput {
        current_date: run_config.current_date.format(DATE_FORMAT).to_string(),
        prediction_date: run_config.prediction_date.format(DATE_FORMAT).to_string(),
        universe,
        prices,
        manual_override: run_config.manual_override,
    };
    StockCheck::new(engine.clone()).run(&input)
}

fn print_summary(result: &StockCheckRun, engine: &EngineConfig) {
    let decision = &result.decision;
    eprintln!("\n=== {} ===", result.document.model_version);
    eprintln!("Header:           {}", decision.trade_header);
    if decision.computed_header != decision.trade_header {
        eprintln!("  (computed {}, overridden)", decision.computed_header);
    }
    eprintln!("Average Growth:   {:.4}%", decision.average_growth);
    eprintln!("Dispersion:       {:.4}%", decision.dispersion);
    eprintln!(
        "Sector Warning:   {}",
        if decision.sector_warning { "yes" } else { "no" }
    );
    eprintln!("Results:          {}", result.document.results.len());
    if result.required_appended {
        eprintln!(
            "  {} appended outside the top {}",
            engine.required_key(),
            engine.top_n
        );
    }
}

fn run_tickers(universe_path: &Path, config_path: Option<&Path>) -> ExitCode {
    let engine = match config_path {
        Some(path) => {
            let adapter = match load_config(path) {
                Ok(a) => a,
                Err(code) => return code,
            };
            if let Err(e) = validate_engine_config(&adapter) {
                return fail(&e);
            }
            match build_engine_config(&adapter) {
                Ok(c) => c,
                Err(e) => return fail(&e),
            }
        }
        None => EngineConfig::default(),
    };

    eprintln!("Loading universe from {}", universe_path.display());
    let universe = match CsvAdapter::new(universe_path.to_path_buf()).load_universe() {
        Ok(u) => u,
        Err(e) => return fail(&e),
    };

    match StockCheck::new(engine).required_tickers(&universe) {
        Ok(tickers) => {
            for ticker in &tickers {
                println!("{ticker}");
            }
            eprintln!("{} tickers need a price", tickers.len());
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

fn run_factors() -> ExitCode {
    let spec = FactorModel::locked().spec();
    println!("Factor model {}", spec.version);
    let mut group = "";
    for f in spec.factors {
        if f.group != group {
            group = f.group;
            println!("\n{group}");
        }
        println!("  {}  {:<44} {:>5.2}%", f.id, f.name, f.weight_pct);
    }
    println!("\nTotal weight: {:.2}%", spec.total_weight_pct);
    ExitCode::SUCCESS
}

fn run_mock_universe(size: usize, output: &Path) -> ExitCode {
    let universe = make_mock_universe(size);
    match write_universe(output, &universe) {
        Ok(()) => {
            eprintln!(
                "Mock universe of {} written to: {}",
                universe.len(),
                output.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

fn run_validate(config_path: &Path) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_engine_config(&adapter) {
        return fail(&e);
    }
    let engine = match build_engine_config(&adapter) {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };
    eprintln!("\n[engine]");
    eprintln!("  model_version:        {}", engine.model_version);
    eprintln!("  min_universe_size:    {}", engine.min_universe_size);
    eprintln!("  top_n:                {}", engine.top_n);
    eprintln!("  required_ticker:      {}", engine.required_key());
    eprintln!("  trade_min_average:    {}", engine.trade_min_average);
    eprintln!("  trade_min_dispersion: {}", engine.trade_min_dispersion);
    eprintln!("  sector_warning_count: {}", engine.sector_warning_count);

    if let Err(e) = validate_run_config(&adapter) {
        return fail(&e);
    }
    let run_config = match build_run_config(&adapter) {
        Ok(c) => c,
        Err(e) => return fail(&e),
    };
    eprintln!("\n[run]");
    eprintln!("  current_date:    {}", run_config.current_date);
    eprintln!("  prediction_date: {}", run_config.prediction_date);
    eprintln!("  manual_override: {}", run_config.manual_override);
    eprintln!("  universe:        {}", run_config.universe.display());
    eprintln!("  prices:          {}", run_config.prices.display());
    eprintln!("  output:          {} ({})", run_config.output.display(), run_config.format);

    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}
