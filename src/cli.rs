//! CLI definition and dispatch.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::json_config_adapter::JsonConfigAdapter;
use crate::domain::analysis::{AnalysisWindow, InsiderAnalysis, InsiderQuery};
use crate::domain::backtest::BacktestTable;
use crate::domain::classifier::insider_names;
use crate::domain::config::{default_candidates, first_existing, ExportConfig};
use crate::domain::error::InsiderError;
use crate::domain::horizon::Horizons;
use crate::domain::trade::FILING_DATE_FORMAT;
use crate::ports::price_port::PriceHistoryPort;
use crate::ports::report_port::ReportPort;
use crate::ports::trade_port::TradeSourcePort;

#[derive(Parser, Debug)]
#[command(name = "insidertrader", about = "Insider trade classifier and backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Summarise and backtest one insider's trades
    Analyze {
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(short, long)]
        ticker: String,
        /// Window start, YYYY-MM-DD (requires --end)
        #[arg(long)]
        start: Option<String>,
        /// Window end, YYYY-MM-DD (requires --start)
        #[arg(long)]
        end: Option<String>,
        /// Comma-separated horizons in calendar days
        #[arg(long)]
        horizons: Option<String>,
        /// Directory holding <TICKER>_trades.csv and <TICKER>_prices.csv
        #[arg(short, long, default_value = ".")]
        data_dir: PathBuf,
        #[arg(long, value_enum, default_value_t = Side::Both)]
        side: Side,
        /// Write backtest tables to the configured export path
        #[arg(long)]
        export: bool,
        /// Config file candidates, checked in order
        #[arg(short, long)]
        config: Vec<PathBuf>,
    },
    /// List insiders who filed for a ticker
    Insiders {
        #[arg(short, long)]
        ticker: String,
        #[arg(short, long, default_value = ".")]
        data_dir: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Side {
    Purchases,
    Sales,
    Both,
}

impl Side {
    fn includes_purchases(self) -> bool {
        matches!(self, Side::Purchases | Side::Both)
    }

    fn includes_sales(self) -> bool {
        matches!(self, Side::Sales | Side::Both)
    }
}

/// Everything the analyze pipeline needs besides its ports.
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub query: InsiderQuery,
    pub horizons: Horizons,
    pub side: Side,
}

/// Result of one analyze run.
#[derive(Debug)]
pub struct AnalyzeOutcome {
    pub analysis: InsiderAnalysis,
    pub purchases: Option<BacktestTable>,
    pub sales: Option<BacktestTable>,
    pub exported: Vec<PathBuf>,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Analyze {
            last_name,
            first_name,
            ticker,
            start,
            end,
            horizons,
            data_dir,
            side,
            export,
            config,
        } => {
            let today = Local::now().date_naive();
            let request = match build_request(
                &last_name,
                first_name.as_deref(),
                &ticker,
                start.as_deref(),
                end.as_deref(),
                horizons.as_deref(),
                side,
                today,
            ) {
                Ok(r) => r,
                Err(e) => return report_error(&e),
            };
            run_analyze(&request, &data_dir, export, config)
        }
        Command::Insiders { ticker, data_dir } => run_insiders(&ticker, &data_dir),
    }
}

fn report_error(err: &InsiderError) -> ExitCode {
    eprintln!("error: {err}");
    err.into()
}

#[allow(clippy::too_many_arguments)]
pub fn build_request(
    last_name: &str,
    first_name: Option<&str>,
    ticker: &str,
    start: Option<&str>,
    end: Option<&str>,
    horizons: Option<&str>,
    side: Side,
    today: NaiveDate,
) -> Result<AnalyzeRequest, InsiderError> {
    if last_name.trim().is_empty() {
        return Err(InsiderError::InvalidArgument {
            name: "last-name".into(),
            reason: "must not be empty".into(),
        });
    }
    if ticker.trim().is_empty() {
        return Err(InsiderError::InvalidArgument {
            name: "ticker".into(),
            reason: "must not be empty".into(),
        });
    }

    let window = AnalysisWindow::from_bounds(start, end, today)?;
    let horizons = match horizons {
        Some(list) => Horizons::parse(list).map_err(|e| InsiderError::InvalidArgument {
            name: "horizons".into(),
            reason: e.to_string(),
        })?,
        None => Horizons::default(),
    };

    Ok(AnalyzeRequest {
        query: InsiderQuery {
            last_name: last_name.trim().to_string(),
            first_name: first_name
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string),
            ticker: ticker.trim().to_uppercase(),
            window,
        },
        horizons,
        side,
    })
}

/// Load the export config from the first candidate that exists.
pub fn load_export_config(candidates: &[PathBuf]) -> Result<ExportConfig, InsiderError> {
    let path = first_existing(candidates)?;
    info!(path = %path.display(), "loading config");
    let adapter = JsonConfigAdapter::from_file(path).map_err(|e| InsiderError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })?;
    ExportConfig::from_config(&adapter, path)
}

fn run_analyze(
    request: &AnalyzeRequest,
    data_dir: &PathBuf,
    export: bool,
    config: Vec<PathBuf>,
) -> ExitCode {
    // Config problems are fatal before any data is touched.
    let export_config = if export {
        let candidates = if config.is_empty() {
            default_candidates()
        } else {
            config
        };
        match load_export_config(&candidates) {
            Ok(c) => Some(c),
            Err(e) => return report_error(&e),
        }
    } else {
        None
    };

    let adapter = CsvAdapter::new(data_dir.clone());
    match run_analyze_pipeline(
        &adapter,
        &adapter,
        request,
        export_config.as_ref(),
        &CsvReportAdapter,
    ) {
        Ok(outcome) => {
            print!("{}", render_outcome(&outcome));
            for path in &outcome.exported {
                eprintln!("Exported: {}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => report_error(&e),
    }
}

/// Load, classify, backtest the requested sides and optionally export.
pub fn run_analyze_pipeline(
    trade_port: &dyn TradeSourcePort,
    price_port: &dyn PriceHistoryPort,
    request: &AnalyzeRequest,
    export: Option<&ExportConfig>,
    report_port: &dyn ReportPort,
) -> Result<AnalyzeOutcome, InsiderError> {
    let analysis = InsiderAnalysis::load(&request.query, trade_port)?;

    let purchases = if request.side.includes_purchases() {
        Some(analysis.backtest_purchases(price_port, &request.horizons)?)
    } else {
        None
    };
    let sales = if request.side.includes_sales() {
        Some(analysis.backtest_sales(price_port, &request.horizons)?)
    } else {
        None
    };

    let mut exported = Vec::new();
    if let (Some(config), Some(name)) = (export, analysis.full_name.as_deref()) {
        for (side, table) in [("purchases", &purchases), ("sales", &sales)] {
            if let Some(table) = table {
                let path = config.export_file(&analysis.ticker, name, side);
                report_port.write(table, &path)?;
                info!(path = %path.display(), rows = table.rows.len(), "exported {side}");
                exported.push(path);
            }
        }
    }

    Ok(AnalyzeOutcome {
        analysis,
        purchases,
        sales,
        exported,
    })
}

pub fn render_outcome(outcome: &AnalyzeOutcome) -> String {
    let mut out = format!("{}\n", outcome.analysis.overview());
    for (label, table) in [("Purchases", &outcome.purchases), ("Sales", &outcome.sales)] {
        if let Some(table) = table {
            out.push_str(&format!("\n=== {label} Backtest (% change) ===\n"));
            out.push_str(&render_table(table));
        }
    }
    out
}

/// Fixed-width text rendering; unavailable horizons print as `n/a`.
pub fn render_table(table: &BacktestTable) -> String {
    let mut out = String::new();
    if table.rows.is_empty() {
        out.push_str("(no trades)\n");
    } else {
        out.push_str(&format!(
            "{:<19}  {:<10}  {:>10}  {:>10}",
            "filing_date", "trade_date", "price", "adj_price"
        ));
        for d in table.horizons.days() {
            out.push_str(&format!("  {:>8}", format!("{d}d")));
        }
        out.push_str(&format!("  {:>8}\n", "current"));

        for row in &table.rows {
            out.push_str(&format!(
                "{:<19}  {:<10}  {:>10.2}  {:>10.2}",
                row.filing_date.format(FILING_DATE_FORMAT),
                row.trade_date,
                row.price,
                row.adj_price
            ));
            for &d in table.horizons.days() {
                let cell = row
                    .change(d)
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "n/a".to_string());
                out.push_str(&format!("  {cell:>8}"));
            }
            out.push_str(&format!("  {:>8.2}\n", row.current));
        }
    }

    for failure in &table.failures {
        out.push_str(&format!(
            "skipped {}: {}\n",
            failure.filing_date.format(FILING_DATE_FORMAT),
            failure.error
        ));
    }
    out
}

fn run_insiders(ticker: &str, data_dir: &PathBuf) -> ExitCode {
    let adapter = CsvAdapter::new(data_dir.clone());
    let ticker = ticker.trim().to_uppercase();
    let trades = match adapter.fetch_insider_trades(&ticker) {
        Ok(t) => t,
        Err(e) => return report_error(&e),
    };

    let names = insider_names(&trades);
    if names.is_empty() {
        eprintln!("No insider trades found for {}", ticker);
    } else {
        for name in &names {
            println!("{}", name);
        }
        eprintln!("{} insiders found", names.len());
    }
    ExitCode::SUCCESS
}
