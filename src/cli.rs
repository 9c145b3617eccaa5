//! CLI definition and dispatch.

use chrono::{Months, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use crate::adapters::cached_history_adapter::CachedHistoryAdapter;
use crate::adapters::csv_adapter::CsvHistoryAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::comparison::{compare, StrategyComparison, StrategySummary};
use crate::domain::config_validation::{
    parse_date, parse_strategy_kind, strategy_kind_from_str, validate_comparison_config,
    validate_data_config, validate_simulation_config, validate_strategy_amounts,
    validate_window, DATA, SIMULATION,
};
use crate::domain::error::DcasimError;
use crate::domain::ledger::Ledger;
use crate::domain::metrics::{max_drawdown_pct, relative_returns, PerformanceMetrics};
use crate::domain::normalize::{normalize, DEFAULT_PRICE_FIELDS};
use crate::domain::portfolio::{
    build_allocations, parse_weights, portfolio_curve, portfolio_performance, Allocation,
    PortfolioPerformance, PortfolioPoint, DEFAULT_RISK_FREE_RATE,
};
use crate::domain::price_series::PriceSeries;
use crate::domain::simulator::{simulate, simulate_dca, simulate_lump_sum};
use crate::domain::strategy::{DcaConfig, LumpSumConfig, StrategyConfig, StrategyKind};
use crate::domain::universe::{load_universe, parse_tickers};
use crate::ports::config_port::ConfigPort;
use crate::ports::history_port::HistoryPort;

const DEFAULT_CACHE_TTL_SECONDS: i64 = 300;

#[derive(Parser, Debug)]
#[command(name = "dcasim", about = "DCA versus lump-sum investment simulator")]
pub struct Cli {
    /// Log level for diagnostics on stderr (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one strategy and print its ledger and metrics
    Simulate {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: Option<String>,
        /// dca or lump-sum; overrides [simulation] strategy
        #[arg(long)]
        strategy: Option<String>,
    },
    /// Run DCA and lump sum over the same window and compare them
    Compare {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: Option<String>,
    },
    /// Maximum drawdown of a ticker's price series
    Drawdown {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: Option<String>,
    },
    /// Cumulative relative return of several tickers
    Relative {
        #[arg(short, long)]
        config: PathBuf,
        /// Comma-separated ticker list
        #[arg(long)]
        tickers: String,
    },
    /// Weighted buy-and-hold portfolio against a benchmark
    Portfolio {
        #[arg(short, long)]
        config: PathBuf,
        /// Comma-separated ticker list
        #[arg(long)]
        tickers: String,
        /// Comma-separated weights in percent, in ticker order
        #[arg(long)]
        weights: String,
        /// Benchmark ticker; pass an empty string to skip
        #[arg(long, default_value = "SPY")]
        benchmark: String,
        /// Annual risk-free rate for the Sharpe ratio, as a fraction
        #[arg(long, default_value_t = DEFAULT_RISK_FREE_RATE)]
        risk_free_rate: f64,
    },
    /// List tickers available in the data directory
    ListTickers {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Simulate {
            config,
            ticker,
            strategy,
        } => run_simulate(&config, ticker.as_deref(), strategy.as_deref()),
        Command::Compare { config, ticker } => run_compare(&config, ticker.as_deref()),
        Command::Drawdown { config, ticker } => run_drawdown(&config, ticker.as_deref()),
        Command::Relative { config, tickers } => run_relative(&config, &tickers),
        Command::Portfolio {
            config,
            tickers,
            weights,
            benchmark,
            risk_free_rate,
        } => run_portfolio(&config, &tickers, &weights, &benchmark, risk_free_rate),
        Command::ListTickers { config } => run_list_tickers(&config),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = DcasimError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn fail(err: DcasimError) -> ExitCode {
    eprintln!("error: {err}");
    (&err).into()
}

/// `[data] price_fields` as an ordered list, or the adjusted-close default.
pub fn price_fields(config: &dyn ConfigPort) -> Vec<String> {
    let fields: Vec<String> = config
        .get_string(DATA, "price_fields")
        .map(|s| {
            s.split(',')
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty())
                .collect()
        })
        .unwrap_or_default();
    if fields.is_empty() {
        DEFAULT_PRICE_FIELDS.iter().map(|f| f.to_string()).collect()
    } else {
        fields
    }
}

/// `[start_date, end_date]`; without an explicit end the window spans
/// `duration_months` from the start.
pub fn resolve_window(config: &dyn ConfigPort) -> Result<(NaiveDate, NaiveDate), DcasimError> {
    let start = parse_date(config, SIMULATION, "start_date")?;
    if config.get_string(SIMULATION, "end_date").is_some() {
        return Ok((start, parse_date(config, SIMULATION, "end_date")?));
    }
    let months = duration_months(config)?;
    let end = start
        .checked_add_months(Months::new(months))
        .ok_or_else(|| DcasimError::ConfigInvalid {
            section: SIMULATION.into(),
            key: "duration_months".into(),
            reason: "window end overflows the calendar".into(),
        })?;
    Ok((start, end))
}

fn duration_months(config: &dyn ConfigPort) -> Result<u32, DcasimError> {
    let value = config.get_int(SIMULATION, "duration_months", 0);
    u32::try_from(value)
        .ok()
        .filter(|&m| m >= 1)
        .ok_or_else(|| DcasimError::ConfigInvalid {
            section: SIMULATION.into(),
            key: "duration_months".into(),
            reason: "duration_months must be at least 1".into(),
        })
}

pub fn build_dca_config(config: &dyn ConfigPort) -> Result<DcaConfig, DcasimError> {
    let cfg = DcaConfig {
        monthly_amount: config.get_double(SIMULATION, "monthly_amount", 0.0),
        duration_months: duration_months(config)?,
        start_date: parse_date(config, SIMULATION, "start_date")?,
    };
    cfg.validate()?;
    Ok(cfg)
}

/// Falls back to `monthly_amount * duration_months` when no lump sum is set.
pub fn build_lump_sum_config(config: &dyn ConfigPort) -> Result<LumpSumConfig, DcasimError> {
    let amount = if config.get_string(SIMULATION, "lump_sum_amount").is_some() {
        config.get_double(SIMULATION, "lump_sum_amount", 0.0)
    } else {
        build_dca_config(config)?.planned_investment()
    };
    let cfg = LumpSumConfig {
        amount,
        start_date: parse_date(config, SIMULATION, "start_date")?,
    };
    cfg.validate()?;
    Ok(cfg)
}

pub fn build_strategy_config(
    config: &dyn ConfigPort,
    kind: StrategyKind,
) -> Result<StrategyConfig, DcasimError> {
    match kind {
        StrategyKind::Dca => build_dca_config(config).map(StrategyConfig::Dca),
        StrategyKind::LumpSum => build_lump_sum_config(config).map(StrategyConfig::LumpSum),
    }
}

pub fn resolve_ticker(
    ticker_override: Option<&str>,
    config: &dyn ConfigPort,
) -> Result<String, DcasimError> {
    ticker_override
        .map(|t| t.trim().to_uppercase())
        .or_else(|| {
            config
                .get_string(SIMULATION, "ticker")
                .map(|t| t.trim().to_uppercase())
        })
        .filter(|t| !t.is_empty())
        .ok_or_else(|| DcasimError::ConfigMissing {
            section: SIMULATION.into(),
            key: "ticker".into(),
        })
}

pub fn build_history_port(config: &dyn ConfigPort) -> CachedHistoryAdapter<CsvHistoryAdapter> {
    let path = config
        .get_string(DATA, "path")
        .unwrap_or_else(|| ".".to_string());
    let ttl = config
        .get_int(DATA, "cache_ttl_seconds", DEFAULT_CACHE_TTL_SECONDS)
        .max(0) as u64;
    CachedHistoryAdapter::new(
        CsvHistoryAdapter::new(PathBuf::from(path)),
        Duration::from_secs(ttl),
    )
}

pub fn load_series(
    port: &dyn HistoryPort,
    ticker: &str,
    window: (NaiveDate, NaiveDate),
    price_fields: &[String],
) -> Result<PriceSeries, DcasimError> {
    let raw = port.get_history(ticker, window.0, window.1)?;
    normalize(&raw, price_fields)
}

#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub ledger: Ledger,
    pub metrics: PerformanceMetrics,
}

pub fn run_simulation_pipeline(
    port: &dyn HistoryPort,
    ticker: &str,
    strategy: &StrategyConfig,
    window: (NaiveDate, NaiveDate),
    price_fields: &[String],
) -> Result<SimulationReport, DcasimError> {
    let series = load_series(port, ticker, window, price_fields)?;
    tracing::info!(ticker, prices = series.len(), "price series loaded");
    let ledger = simulate(&series, strategy)?;
    let metrics = PerformanceMetrics::compute(&ledger);
    Ok(SimulationReport { ledger, metrics })
}

#[derive(Debug, Clone)]
pub struct ComparisonReport {
    pub comparison: StrategyComparison,
    pub dca: SimulationReport,
    pub lump_sum: SimulationReport,
}

pub fn run_comparison_pipeline(
    port: &dyn HistoryPort,
    ticker: &str,
    dca_cfg: &DcaConfig,
    lump_cfg: &LumpSumConfig,
    window: (NaiveDate, NaiveDate),
    price_fields: &[String],
) -> Result<ComparisonReport, DcasimError> {
    let series = load_series(port, ticker, window, price_fields)?;
    let dca_ledger = simulate_dca(&series, dca_cfg)?;
    let lump_ledger = simulate_lump_sum(&series, lump_cfg)?;
    let comparison = compare(&dca_ledger, &lump_ledger);
    Ok(ComparisonReport {
        comparison,
        dca: SimulationReport {
            metrics: PerformanceMetrics::compute(&dca_ledger),
            ledger: dca_ledger,
        },
        lump_sum: SimulationReport {
            metrics: PerformanceMetrics::compute(&lump_ledger),
            ledger: lump_ledger,
        },
    })
}

#[derive(Debug, Clone)]
pub struct CurveReport {
    pub curve: Vec<PortfolioPoint>,
    pub performance: PortfolioPerformance,
}

#[derive(Debug, Clone)]
pub struct PortfolioReport {
    pub portfolio: CurveReport,
    /// `None` when no benchmark was requested or it could not be loaded.
    pub benchmark: Option<(String, CurveReport)>,
}

pub fn run_portfolio_pipeline(
    port: &dyn HistoryPort,
    allocations: &[Allocation],
    benchmark: Option<&str>,
    window: (NaiveDate, NaiveDate),
    price_fields: &[String],
    risk_free_rate: f64,
) -> Result<PortfolioReport, DcasimError> {
    let tickers: Vec<String> = allocations.iter().map(|a| a.ticker.clone()).collect();
    let universe = load_universe(port, &tickers, window.0, window.1, price_fields)?;
    if !universe.skipped.is_empty() {
        let missing: Vec<&str> = universe.skipped.iter().map(|s| s.ticker.as_str()).collect();
        return Err(DcasimError::DataUnavailable {
            reason: format!("no usable prices for {}", missing.join(", ")),
        });
    }

    let mut holdings = Vec::with_capacity(allocations.len());
    for allocation in allocations {
        if let Some(loaded) = universe.loaded.iter().find(|l| l.ticker == allocation.ticker) {
            holdings.push((allocation.weight, &loaded.series));
        }
    }
    let curve = portfolio_curve(&holdings)?;
    let portfolio = CurveReport {
        performance: portfolio_performance(&curve, risk_free_rate),
        curve,
    };

    let benchmark = benchmark.filter(|b| !b.trim().is_empty()).and_then(|ticker| {
        let ticker = ticker.trim().to_uppercase();
        let curve = load_series(port, &ticker, window, price_fields)
            .and_then(|series| portfolio_curve(&[(1.0, &series)]));
        match curve {
            Ok(curve) => Some((
                ticker,
                CurveReport {
                    performance: portfolio_performance(&curve, risk_free_rate),
                    curve,
                },
            )),
            Err(e) => {
                tracing::warn!(%ticker, error = %e, "benchmark unavailable");
                None
            }
        }
    });

    Ok(PortfolioReport {
        portfolio,
        benchmark,
    })
}

fn print_ledger(ledger: &Ledger) {
    println!("date,price,shares_acquired,cumulative_shares,cumulative_invested,portfolio_value,return_pct");
    for e in &ledger.entries {
        println!(
            "{},{:.4},{:.6},{:.6},{:.2},{:.2},{:.4}",
            e.date,
            e.price,
            e.shares_acquired,
            e.cumulative_shares,
            e.cumulative_invested,
            e.portfolio_value,
            e.return_pct
        );
    }
}

fn print_metrics(title: &str, metrics: &PerformanceMetrics) {
    eprintln!("\n=== {} ===", title);
    eprintln!("Total Return:     {:.2}%", metrics.total_return_pct);
    eprintln!("Annualized:       {:.2}%", metrics.annualized_return_pct);
    eprintln!("Volatility:       {:.2}%", metrics.volatility_pct);
    eprintln!("Sharpe Ratio:     {:.2}", metrics.sharpe_ratio);
    eprintln!("Max Drawdown:     {:.2}%", metrics.max_drawdown_pct);
}

fn print_performance(title: &str, perf: &PortfolioPerformance) {
    eprintln!("\n=== {} ===", title);
    eprintln!("Total Return:     {:.2}%", perf.total_return_pct);
    eprintln!("Annualized:       {:.2}%", perf.annualized_return_pct);
    eprintln!("Volatility:       {:.2}%", perf.volatility_pct);
    eprintln!("Sharpe Ratio:     {:.2}", perf.sharpe_ratio);
    eprintln!("Max Drawdown:     {:.2}%", perf.max_drawdown_pct);
}

fn print_summary(summary: &StrategySummary) {
    eprintln!("\n--- {} ---", summary.kind);
    eprintln!("Total Invested:   {:.2}", summary.total_invested);
    eprintln!("Final Value:      {:.2}", summary.final_value);
    eprintln!("Shares Held:      {:.4}", summary.cumulative_shares);
    eprintln!("Average Cost:     {:.4}", summary.average_cost);
    eprintln!("Return:           {:+.2}%", summary.total_return_pct);
}

fn report_skips(ledger: &Ledger) {
    for skip in &ledger.skipped {
        eprintln!(
            "warning: month {} ({}) skipped: {}",
            skip.month_index + 1,
            skip.target_date,
            skip.reason
        );
    }
}

fn run_simulate(
    config_path: &PathBuf,
    ticker_override: Option<&str>,
    strategy_override: Option<&str>,
) -> ExitCode {
    // Stage 1: Load config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    // Stage 2: Resolve strategy kind and validate what it needs
    let kind = match strategy_override {
        Some(s) => match strategy_kind_from_str(s) {
            Some(k) => k,
            None => {
                eprintln!("error: unknown strategy '{s}', expected dca or lump-sum");
                return ExitCode::from(2);
            }
        },
        None => match parse_strategy_kind(&adapter) {
            Ok(k) => k,
            Err(e) => return fail(e),
        },
    };
    let validation = validate_data_config(&adapter)
        .and_then(|_| validate_window(&adapter))
        .and_then(|_| validate_strategy_amounts(&adapter, kind));
    if let Err(e) = validation {
        return fail(e);
    }

    // Stage 3: Build inputs
    let inputs = resolve_ticker(ticker_override, &adapter).and_then(|ticker| {
        let strategy = build_strategy_config(&adapter, kind)?;
        let window = resolve_window(&adapter)?;
        Ok((ticker, strategy, window))
    });
    let (ticker, strategy, window) = match inputs {
        Ok(v) => v,
        Err(e) => return fail(e),
    };
    let fields = price_fields(&adapter);
    let port = build_history_port(&adapter);

    // Stage 4: Simulate
    eprintln!(
        "Simulating {} on {}: {} to {}",
        kind, ticker, window.0, window.1
    );
    let report = match run_simulation_pipeline(&port, &ticker, &strategy, window, &fields) {
        Ok(r) => r,
        Err(e) => return fail(e),
    };

    // Stage 5: Output
    report_skips(&report.ledger);
    print_ledger(&report.ledger);
    print_metrics(&format!("{} Results", kind), &report.metrics);
    if let StrategyConfig::Dca(cfg) = &strategy {
        if report.ledger.len() < cfg.duration_months as usize {
            eprintln!(
                "note: series covered {} of {} months",
                report.ledger.len() + report.ledger.skipped.len(),
                cfg.duration_months
            );
        }
    }
    ExitCode::SUCCESS
}

fn run_compare(config_path: &PathBuf, ticker_override: Option<&str>) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_comparison_config(&adapter) {
        return fail(e);
    }

    let inputs = resolve_ticker(ticker_override, &adapter).and_then(|ticker| {
        let dca = build_dca_config(&adapter)?;
        let lump = build_lump_sum_config(&adapter)?;
        let window = resolve_window(&adapter)?;
        Ok((ticker, dca, lump, window))
    });
    let (ticker, dca_cfg, lump_cfg, window) = match inputs {
        Ok(v) => v,
        Err(e) => return fail(e),
    };
    let fields = price_fields(&adapter);
    let port = build_history_port(&adapter);

    eprintln!(
        "Comparing DCA and Lump Sum on {}: {} to {}",
        ticker, window.0, window.1
    );
    let report =
        match run_comparison_pipeline(&port, &ticker, &dca_cfg, &lump_cfg, window, &fields) {
            Ok(r) => r,
            Err(e) => return fail(e),
        };

    report_skips(&report.dca.ledger);
    if let Some(date) = report.comparison.valued_at {
        eprintln!("\nBoth holdings valued at the {} close", date);
    }
    print_summary(&report.comparison.dca);
    print_summary(&report.comparison.lump_sum);
    print_metrics("DCA Metrics", &report.dca.metrics);
    print_metrics("Lump Sum Metrics", &report.lump_sum.metrics);
    eprintln!(
        "\nWinner: {} (better by {:.2} percentage points)",
        report.comparison.winner, report.comparison.margin_pct
    );
    println!(
        "{},{},{:.4},{:.4},{:.4}",
        ticker,
        report.comparison.winner,
        report.comparison.dca.total_return_pct,
        report.comparison.lump_sum.total_return_pct,
        report.comparison.margin_pct
    );
    ExitCode::SUCCESS
}

fn run_drawdown(config_path: &PathBuf, ticker_override: Option<&str>) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let inputs = validate_data_config(&adapter)
        .and_then(|_| validate_window(&adapter))
        .and_then(|_| resolve_ticker(ticker_override, &adapter))
        .and_then(|ticker| Ok((ticker, resolve_window(&adapter)?)));
    let (ticker, window) = match inputs {
        Ok(v) => v,
        Err(e) => return fail(e),
    };

    let port = build_history_port(&adapter);
    let series = match load_series(&port, &ticker, window, &price_fields(&adapter)) {
        Ok(s) => s,
        Err(e) => return fail(e),
    };

    let drawdown = max_drawdown_pct(&series.prices());
    eprintln!(
        "{}: {} prices, {} to {}",
        ticker,
        series.len(),
        series.first().date,
        series.last().date
    );
    println!("{},{:.2}", ticker, drawdown);
    eprintln!("Max Drawdown:     {:.2}%", drawdown);
    ExitCode::SUCCESS
}

fn run_relative(config_path: &PathBuf, tickers_arg: &str) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let tickers = match parse_tickers(tickers_arg) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: failed to parse tickers: {e}");
            return ExitCode::from(2);
        }
    };

    let window = match validate_data_config(&adapter)
        .and_then(|_| validate_window(&adapter))
        .and_then(|_| resolve_window(&adapter))
    {
        Ok(w) => w,
        Err(e) => return fail(e),
    };

    eprintln!("Loading {} tickers: {} to {}", tickers.len(), window.0, window.1);
    let port = build_history_port(&adapter);
    let fields = price_fields(&adapter);
    let universe = match load_universe(&port, &tickers, window.0, window.1, fields.as_slice()) {
        Ok(u) => u,
        Err(e) => return fail(e),
    };

    println!("ticker,date,cumulative_return");
    for loaded in &universe.loaded {
        for point in relative_returns(&loaded.series) {
            println!(
                "{},{},{:.6}",
                loaded.ticker, point.date, point.cumulative_return
            );
        }
    }

    eprintln!("\n=== Cumulative Return ===");
    for loaded in &universe.loaded {
        let last = relative_returns(&loaded.series)
            .last()
            .map(|p| p.cumulative_return)
            .unwrap_or(0.0);
        eprintln!("  {}:  {:+.2}%", loaded.ticker, last * 100.0);
    }
    ExitCode::SUCCESS
}

fn run_portfolio(
    config_path: &PathBuf,
    tickers_arg: &str,
    weights_arg: &str,
    benchmark: &str,
    risk_free_rate: f64,
) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let tickers = match parse_tickers(tickers_arg) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: failed to parse tickers: {e}");
            return ExitCode::from(2);
        }
    };
    let allocations = match parse_weights(weights_arg)
        .and_then(|weights| build_allocations(&tickers, &weights))
    {
        Ok(a) => a,
        Err(e) => return fail(e),
    };

    let window = match validate_data_config(&adapter)
        .and_then(|_| validate_window(&adapter))
        .and_then(|_| resolve_window(&adapter))
    {
        Ok(w) => w,
        Err(e) => return fail(e),
    };

    eprintln!("Loading {} holdings: {} to {}", allocations.len(), window.0, window.1);
    let port = build_history_port(&adapter);
    let fields = price_fields(&adapter);
    let report = match run_portfolio_pipeline(
        &port,
        &allocations,
        Some(benchmark),
        window,
        &fields,
        risk_free_rate,
    ) {
        Ok(r) => r,
        Err(e) => return fail(e),
    };

    match &report.benchmark {
        Some((ticker, bench)) => {
            println!("date,portfolio,{}", ticker);
            for point in &report.portfolio.curve {
                let bench_value = bench
                    .curve
                    .binary_search_by_key(&point.date, |p| p.date)
                    .map(|i| format!("{:.6}", bench.curve[i].value))
                    .unwrap_or_default();
                println!("{},{:.6},{}", point.date, point.value, bench_value);
            }
        }
        None => {
            println!("date,portfolio");
            for point in &report.portfolio.curve {
                println!("{},{:.6}", point.date, point.value);
            }
        }
    }

    print_performance("Portfolio", &report.portfolio.performance);
    if let Some((ticker, bench)) = &report.benchmark {
        print_performance(ticker, &bench.performance);
    }
    ExitCode::SUCCESS
}

fn run_list_tickers(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    if let Err(e) = validate_data_config(&adapter) {
        return fail(e);
    }

    let port = build_history_port(&adapter);
    let tickers = match port.list_tickers() {
        Ok(t) => t,
        Err(e) => return fail(e),
    };

    if tickers.is_empty() {
        eprintln!("No tickers found");
    } else {
        for ticker in &tickers {
            println!("{}", ticker);
        }
        eprintln!("{} tickers found", tickers.len());
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_simulation_config(&adapter) {
        return fail(e);
    }

    let kind = parse_strategy_kind(&adapter).unwrap_or(StrategyKind::Dca);
    let window = match resolve_window(&adapter) {
        Ok(w) => w,
        Err(e) => return fail(e),
    };

    eprintln!("\nStrategy: {}", kind);
    eprintln!("Window:   {} to {}", window.0, window.1);
    eprintln!("Fields:   {}", price_fields(&adapter).join(", "));
    match resolve_ticker(None, &adapter) {
        Ok(t) => eprintln!("Ticker:   {}", t),
        Err(_) => eprintln!("Ticker:   (pass --ticker)"),
    }
    if validate_comparison_config(&adapter).is_ok() {
        eprintln!("\nConfiguration is valid for simulate and compare.");
    } else {
        eprintln!("\nConfiguration is valid for simulate.");
    }
    ExitCode::SUCCESS
}
