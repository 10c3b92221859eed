//! Pulseboard CLI
//!
//! Command-line interface for the synthetic metrics engine:
//! - Build dashboard and analytics views
//! - Synthesize single series
//! - Compute metric deltas
//! - Browse the product table
//! - Export CSV

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use pulseboard::config::{generate_default_config, Config, LoggingConfig};
use pulseboard::engine::{calculate_metric, MetricsEngine, Period, Product, ProductSummary};
use pulseboard::export::{self, write_csv};
use pulseboard::format::{format_currency, format_number, format_percentage, truncate_text};
use pulseboard::table::{page_links, PageLink, TableRow, TableState};
use serde::Serialize;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "pulseboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Synthetic metrics for analytics dashboards")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed for repeatable output
    #[arg(short, long, global = true)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeriesKind {
    Revenue,
    Orders,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    Performance,
    Breakdown,
    Revenue,
    Orders,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the dashboard view
    Dashboard {
        /// Period (7d, 30d, 90d, 12m)
        #[arg(short, long)]
        period: Option<Period>,
    },

    /// Build the analytics view
    Analytics {
        /// Period (7d, 30d, 90d, 12m)
        #[arg(short, long)]
        period: Option<Period>,
    },

    /// Synthesize a single monthly series
    Series {
        #[arg(value_enum, default_value_t = SeriesKind::Revenue)]
        kind: SeriesKind,
        /// Period (7d, 30d, 90d, 12m)
        #[arg(short, long)]
        period: Option<Period>,
    },

    /// Compute the previous value and trend for a figure
    Metric {
        /// Current value
        current: f64,
        /// Growth in percent
        #[arg(allow_negative_numbers = true)]
        growth: f64,
    },

    /// Show the top products table
    Products {
        /// Column to sort by (name, category, sales, units, growth)
        #[arg(long)]
        sort: Option<String>,
        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,
        /// Page to show
        #[arg(long, default_value = "1")]
        page: usize,
        /// Rows per page (default: from config)
        #[arg(long)]
        per_page: Option<usize>,
    },

    /// Export data as CSV
    Export {
        #[arg(value_enum, default_value_t = ExportKind::Performance)]
        kind: ExportKind,
        /// Period (7d, 30d, 90d, 12m)
        #[arg(short, long)]
        period: Option<Period>,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(Config::default_path);
    let config = match &config_path {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::from_env().context("reading PULSEBOARD_* environment")?,
    };
    init_logging(&config.logging)?;

    tracing::info!("Pulseboard v{}", env!("CARGO_PKG_VERSION"));
    match &config_path {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("Using default config with environment overrides"),
    }

    let seed = cli.seed.or(config.engine.seed);
    let mut engine = MetricsEngine::from_seed(seed).settings(config.engine.settings()?)?;
    let default_period = config.engine.default_period;

    match cli.command {
        Commands::Dashboard { period } => {
            let view = engine.build_dashboard_view(period.unwrap_or(default_period))?;

            if cli.format == OutputFormat::Json {
                return print_json(&view);
            }

            let updated = view.last_updated.format("%Y-%m-%d %H:%M:%S UTC");
            println!("Dashboard (last updated {updated})");
            println!();
            let cards = [
                ("Revenue", view.metrics.revenue, true),
                ("Orders", view.metrics.orders, false),
                ("Customers", view.metrics.customers, false),
                ("Avg. Order Value", view.metrics.average_order_value, true),
            ];
            println!(
                "{:<18} {:>14} {:>14} {:>10} {:<6}",
                "Metric", "Current", "Previous", "Growth", "Trend"
            );
            println!("{}", "-".repeat(66));
            for (name, metric, currency) in cards {
                let show = |v: f64| if currency { format_currency(v) } else { format_number(v) };
                println!(
                    "{:<18} {:>14} {:>14} {:>10} {:<6}",
                    name,
                    show(metric.current),
                    show(metric.previous),
                    format_percentage(metric.growth),
                    metric.trend
                );
            }

            println!();
            println!("{:<10} {:>14} {:>10}", "Month", "Revenue", "Orders");
            println!("{}", "-".repeat(36));
            for (revenue, orders) in view.sales_over_time.months() {
                println!(
                    "{:<10} {:>14} {:>10}",
                    revenue.label,
                    format_currency(revenue.value as f64),
                    format_number(orders.value as f64)
                );
            }

            println!();
            println!("{:<16} {:>14} {:>8} {:>8}", "Category", "Sales", "Share", "Growth");
            println!("{}", "-".repeat(49));
            let shares = view.category_shares();
            for (category, share) in view.product_categories.iter().zip(&shares) {
                println!(
                    "{:<16} {:>14} {:>8} {:>8}",
                    share.name,
                    format_currency(category.value as f64),
                    format!("{}%", share.value),
                    format!("{}%", category.growth)
                );
            }

            let stats = view.stats();
            let users = &view.user_statistics;
            println!();
            println!(
                "Users: {} total, {} active, {} new",
                format_number(users.total_users as f64),
                format_number(users.active_users as f64),
                format_number(users.new_users as f64)
            );
            println!("Customers: {}", format_number(stats.total_customers));
            println!("Conversion rate: {}", format_percentage(stats.conversion_rate));
        }

        Commands::Analytics { period } => {
            let view = engine.build_analytics_view(period.unwrap_or(default_period))?;

            if cli.format == OutputFormat::Json {
                return print_json(&view);
            }

            println!(
                "{:<6} {:>14} {:>14} {:>14} {:>8} {:>8}",
                "Month", "Revenue", "Profit", "Expenses", "Orders", "Margin"
            );
            println!("{}", "-".repeat(69));
            for row in &view.performance {
                println!(
                    "{:<6} {:>14} {:>14} {:>14} {:>8} {:>8}",
                    row.month,
                    format_currency(row.revenue as f64),
                    format_currency(row.profit as f64),
                    format_currency(row.expenses as f64),
                    format_number(row.orders as f64),
                    format_percentage(row.profit_margin)
                );
            }
            println!();
            println!("Total revenue: {}", format_currency(view.totals.revenue as f64));
            println!("Total profit:  {}", format_currency(view.totals.profit as f64));

            println!();
            println!("{:<16} {:>14} {:>8}", "Region", "Sales", "Share");
            println!("{}", "-".repeat(40));
            for region in view.sales_by_region.iter() {
                println!(
                    "{:<16} {:>14} {:>8}",
                    region.region,
                    format_currency(region.sales as f64),
                    format!("{}%", region.percentage)
                );
            }
        }

        Commands::Series { kind, period } => {
            let months = period.unwrap_or(default_period).months();
            let params = match kind {
                SeriesKind::Revenue => engine.get_settings().revenue,
                SeriesKind::Orders => engine.get_settings().orders,
            };
            let series = engine.synthesize(&params, months)?;

            if cli.format == OutputFormat::Json {
                return print_json(&series);
            }

            for point in &series {
                println!("{:<10} {:>14}", point.label, format_number(point.value as f64));
            }
        }

        Commands::Metric { current, growth } => {
            let metric = calculate_metric(current, growth)?;

            if cli.format == OutputFormat::Json {
                return print_json(&metric);
            }

            println!("Current:  {}", format_number(metric.current));
            println!("Previous: {}", format_number(metric.previous));
            println!("Growth:   {}", format_percentage(metric.growth));
            println!("Trend:    {}", metric.trend);
        }

        Commands::Products {
            sort,
            desc,
            page,
            per_page,
        } => {
            let mut state = TableState::new(per_page.unwrap_or(config.table.page_size))?;
            if let Some(key) = sort.as_deref() {
                state.toggle_sort::<Product>(key)?;
                if desc {
                    state.toggle_sort::<Product>(key)?;
                }
            }

            let products = engine.get_catalog().top_products.clone();
            let total = pulseboard::table::total_pages(products.len(), state.page_size())?;
            state.go_to(page, total);
            let view = state.view(products.as_slice())?;
            let summary = ProductSummary::from_products(&products);

            if cli.format == OutputFormat::Json {
                return print_json(&serde_json::json!({
                    "count": products.len(),
                    "summary": summary,
                    "page": view,
                }));
            }

            println!("Products:      {}", products.len());
            println!("Total sales:   {}", format_currency(summary.total_sales as f64));
            println!("Total units:   {}", format_number(summary.total_units as f64));
            println!("Avg. growth:   {}", format_percentage(summary.average_growth));
            println!();

            let headers: Vec<&str> = Product::columns().iter().map(|c| c.header).collect();
            println!(
                "{:<24} {:<18} {:>12} {:>10} {:>8} {:<6}",
                headers[0], headers[1], headers[2], headers[3], headers[4], "Tier"
            );
            println!("{}", "-".repeat(83));
            for product in &view.rows {
                println!(
                    "{:<24} {:<18} {:>12} {:>10} {:>8} {:<6}",
                    truncate_text(&product.name, 20),
                    product.category,
                    format_currency(product.sales as f64),
                    format_number(product.units as f64),
                    format_percentage(product.growth),
                    product.growth_tier()
                );
            }

            if view.is_empty() {
                println!("No products.");
            } else {
                println!();
                println!(
                    "Showing {} to {} of {} results",
                    view.first_row, view.last_row, view.total_rows
                );
            }
            if view.needs_pagination() {
                let links: Vec<String> = page_links(view.page, view.total_pages)
                    .into_iter()
                    .map(|link| match link {
                        PageLink::Page(p) if p == view.page => format!("[{p}]"),
                        PageLink::Page(p) => p.to_string(),
                        PageLink::Ellipsis => "...".to_string(),
                    })
                    .collect();
                println!("Pages: {}", links.join(" "));
            }
        }

        Commands::Export {
            kind,
            period,
            output,
        } => {
            let period = period.unwrap_or(default_period);
            match kind {
                ExportKind::Performance => {
                    let view = engine.build_analytics_view(period)?;
                    write_rows(&view.performance, output.as_deref())?;
                }
                ExportKind::Breakdown => {
                    let view = engine.build_analytics_view(period)?;
                    write_rows(&view.revenue_vs_profit, output.as_deref())?;
                }
                ExportKind::Revenue => {
                    let sales = engine.sales_over_time(period)?;
                    write_rows(sales.revenue(), output.as_deref())?;
                }
                ExportKind::Orders => {
                    let sales = engine.sales_over_time(period)?;
                    write_rows(sales.orders(), output.as_deref())?;
                }
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    std::fs::write(&path, config)
                        .with_context(|| format!("writing config to {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Set up tracing from the logging config; `RUST_LOG` takes precedence
fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("pulseboard={}", config.level)))?;

    let json = config.format.eq_ignore_ascii_case("json");
    let file = match &config.file {
        Some(path) => Some(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {path}"))?,
        ),
        None => None,
    };

    let registry = tracing_subscriber::registry().with(filter);
    match (json, file) {
        (true, Some(file)) => registry
            .with(fmt::layer().json().with_writer(Mutex::new(file)))
            .try_init()?,
        (true, None) => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
        (false, Some(file)) => registry
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .try_init()?,
        (false, None) => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()?,
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn write_rows<T: Serialize>(rows: &[T], output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            let written = export::export_to_path(rows, path)?;
            eprintln!("Exported {} rows to {}", written, path.display());
        }
        None => {
            write_csv(rows, std::io::stdout().lock())?;
        }
    }
    Ok(())
}
