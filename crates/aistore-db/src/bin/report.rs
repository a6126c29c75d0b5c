//! # Report CLI
//!
//! Prints a financial report (or the dashboard) as JSON.
//!
//! ## Usage
//! ```bash
//! # Last 30 days, grouped by day
//! cargo run -p aistore-db --bin report
//!
//! # January, grouped by week
//! cargo run -p aistore-db --bin report -- --start 2024-01-01 --end 2024-01-31 --view week
//!
//! # Dashboard figures
//! cargo run -p aistore-db --bin report -- --dashboard
//!
//! # Second page of paid Cursor orders in January, highest profit first
//! cargo run -p aistore-db --bin report -- --orders --start 2024-01-01 --end 2024-01-31 \
//!     --search cursor --status paid --sort profit --page 2
//! ```
//!
//! Logs go to stderr so stdout stays valid JSON.

use anyhow::{Context, Result};
use chrono::Local;
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

use aistore_core::{OrderListFilter, OrderSort, OrderStatus, ReportingWindow, SortDirection};
use aistore_db::{AppConfig, Database};

const USAGE: &str = "\
AI Store Financial Report

Usage: report [OPTIONS]

Options:
  -s, --start <DATE>   First day, YYYY-MM-DD (default: today - 29 days)
  -e, --end <DATE>     Last day, YYYY-MM-DD (default: today)
  -v, --view <MODE>    day | week | month (default: day)
      --dashboard      Print dashboard figures instead
      --orders         Print the window's orders instead
      --search <TEXT>  Orders: customer or product name contains TEXT
      --status <S>     Orders: paid | pending | cancelled
      --sort <COL>     Orders: sale_date | actual_price | profit |
                       customer_name | created_at (default: sale_date)
      --order <DIR>    Orders: ASC | DESC (default: DESC)
  -p, --page <N>       Orders: page number (default: 1)
  -d, --db <PATH>      Database file path (default: $DB_PATH)
  -h, --help           Show this help message
";

#[derive(Debug, Default)]
struct Args {
    start: Option<String>,
    end: Option<String>,
    view: Option<String>,
    dashboard: bool,
    orders: bool,
    search: Option<String>,
    status: Option<String>,
    sort: Option<String>,
    order: Option<String>,
    page: Option<String>,
    db: Option<String>,
    help: bool,
}

fn parse_args(raw: &[String]) -> Args {
    let mut args = Args::default();

    let mut i = 1;
    while i < raw.len() {
        let value = raw.get(i + 1).cloned();
        match raw[i].as_str() {
            "--start" | "-s" => {
                args.start = value;
                i += 1;
            }
            "--end" | "-e" => {
                args.end = value;
                i += 1;
            }
            "--view" | "-v" => {
                args.view = value;
                i += 1;
            }
            "--db" | "-d" => {
                args.db = value;
                i += 1;
            }
            "--search" => {
                args.search = value;
                i += 1;
            }
            "--status" => {
                args.status = value;
                i += 1;
            }
            "--sort" => {
                args.sort = value;
                i += 1;
            }
            "--order" => {
                args.order = value;
                i += 1;
            }
            "--page" | "-p" => {
                args.page = value;
                i += 1;
            }
            "--dashboard" => args.dashboard = true,
            "--orders" => args.orders = true,
            "--help" | "-h" => args.help = true,
            _ => {}
        }
        i += 1;
    }

    args
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let raw: Vec<String> = env::args().collect();
    let args = parse_args(&raw);

    if args.help {
        print!("{USAGE}");
        return Ok(());
    }

    let mut config = AppConfig::load()?;
    if let Some(path) = args.db.as_deref() {
        config.db_path = path.into();
    }

    let db = Database::new(config.db_config())
        .await
        .context("opening database")?;
    let service = db.reports(config.report);
    let today = Local::now().date_naive();

    let json = if args.dashboard {
        let dashboard = service.dashboard(today).await?;
        serde_json::to_string_pretty(&dashboard)?
    } else {
        // When only --end is given, the default start still counts back
        // from today, matching the admin page.
        let (window, mode) = service.resolve_query(
            args.start.as_deref(),
            args.end.as_deref(),
            args.view.as_deref(),
            today,
        )?;

        if args.orders {
            let filter = order_filter(&args, &window)?;
            info!(window = %window, page = filter.current_page(), "Listing orders");

            let page = db.orders().list(&filter).await?;
            serde_json::to_string_pretty(&page)?
        } else {
            info!(window = %window, mode = %mode, "Building report");

            let report = service.build_report(&window, mode).await?;
            serde_json::to_string_pretty(&report)?
        }
    };

    println!("{json}");
    db.close().await;
    Ok(())
}

/// Order listing parameters for `window`, taken from the command line.
fn order_filter(args: &Args, window: &ReportingWindow) -> Result<OrderListFilter> {
    let status = match args.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) => Some(s.parse::<OrderStatus>()?),
    };
    let page = match args.page.as_deref() {
        None => 1,
        Some(p) => p
            .trim()
            .parse()
            .with_context(|| format!("invalid --page value '{p}'"))?,
    };

    Ok(OrderListFilter {
        search: args.search.clone().unwrap_or_default(),
        status,
        sort: OrderSort::from_query(args.sort.as_deref()),
        direction: SortDirection::from_query(args.order.as_deref()),
        page,
        ..OrderListFilter::for_window(window)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        std::iter::once("report")
            .chain(items.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_args() {
        let args = parse_args(&argv(&["--start", "2024-01-01", "-e", "2024-01-31", "--view", "week"]));
        assert_eq!(args.start.as_deref(), Some("2024-01-01"));
        assert_eq!(args.end.as_deref(), Some("2024-01-31"));
        assert_eq!(args.view.as_deref(), Some("week"));
        assert!(!args.dashboard);
    }

    #[test]
    fn test_parse_flags_and_trailing_option() {
        let args = parse_args(&argv(&["--dashboard", "--view"]));
        assert!(args.dashboard);
        assert!(args.view.is_none());
    }

    #[test]
    fn test_order_filter_from_args() {
        let args = parse_args(&argv(&[
            "--orders", "--search", "cursor", "--status", "paid", "--sort", "profit", "--order",
            "asc", "-p", "2",
        ]));
        assert!(args.orders);

        let window = ReportingWindow::parse("2024-01-01", "2024-01-31").unwrap();
        let filter = order_filter(&args, &window).unwrap();
        assert_eq!(filter.search, "cursor");
        assert_eq!(filter.status, Some(OrderStatus::Paid));
        assert_eq!(filter.sort, OrderSort::Profit);
        assert_eq!(filter.direction, SortDirection::Asc);
        assert_eq!(filter.page, 2);
        assert_eq!(filter.start_date, Some(window.start_date()));
        assert_eq!(filter.end_date, Some(window.end_date()));
    }

    #[test]
    fn test_order_filter_rejects_unknown_status() {
        let window = ReportingWindow::parse("2024-01-01", "2024-01-31").unwrap();

        let args = parse_args(&argv(&["--orders", "--status", "refunded"]));
        assert!(order_filter(&args, &window).is_err());

        let args = parse_args(&argv(&["--orders", "--page", "two"]));
        assert!(order_filter(&args, &window).is_err());
    }

    #[test]
    fn test_usage_describes_default_start() {
        assert!(USAGE.contains("(default: today - 29 days)"));
        assert!(USAGE.contains("--orders"));
    }
}
