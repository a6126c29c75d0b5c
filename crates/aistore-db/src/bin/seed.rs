//! # Seed Data Generator
//!
//! Populates the database with demo orders and fixed costs for development.
//!
//! ## Usage
//! ```bash
//! # 30 days of orders ending today (default)
//! cargo run -p aistore-db --bin seed
//!
//! # Longer history
//! cargo run -p aistore-db --bin seed -- --days 120
//!
//! # Specify database path (overrides DB_PATH)
//! cargo run -p aistore-db --bin seed -- --db ./data/dev.sqlite
//! ```
//!
//! ## Generated Data
//! - 1 to 3 orders per day across the AI tool packages below, mostly paid,
//!   some pending or cancelled
//! - Fixed costs: a monthly VPS, an ongoing team seat, a closed ad campaign
//!   and one inactive record
//!
//! Values are derived from the day index so reruns produce the same data.

use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};
use std::env;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use aistore_core::{Money, NewFixedCost, NewOrder, OrderStatus};
use aistore_db::{AppConfig, Database};

/// (package name, price, license cost) in VND
const PACKAGES: &[(&str, i64, i64)] = &[
    ("Cursor Vô Hạn Request - 1 ngày", 20_000, 5_000),
    ("Cursor Vô Hạn Request - 7 ngày", 50_000, 15_000),
    ("Cursor Vô Hạn Request - 1 tháng", 159_000, 50_000),
    ("Cursor Vô Hạn Request - 3 tháng", 299_000, 100_000),
    ("Cursor Vô Hạn Request - 1 năm", 800_000, 250_000),
    ("Gói Pro", 499_000, 180_000),
    ("Claude Pro 1 tháng", 450_000, 380_000),
    ("GitHub Copilot 1 tháng", 199_000, 120_000),
];

const CUSTOMERS: &[&str] = &[
    "Nguyễn Văn An",
    "Trần Thị Bình",
    "Lê Hoàng Cường",
    "Phạm Minh Đức",
    "Võ Thu Hà",
    "Đặng Quốc Huy",
    "Bùi Ngọc Lan",
];

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();
    let mut config = AppConfig::load()?;
    let mut days: i64 = 30;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--days" | "-n" => {
                if i + 1 < args.len() {
                    days = args[i + 1]
                        .parse()
                        .with_context(|| format!("invalid --days value '{}'", args[i + 1]))?;
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.db_path = args[i + 1].clone().into();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("AI Store Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -n, --days <N>     Days of order history ending today (default: 30)");
                println!("  -d, --db <PATH>    Database file path (default: $DB_PATH)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    if let Some(parent) = config.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }

    let db = Database::new(config.db_config())
        .await
        .context("opening database")?;

    let existing = db.orders().summary().await?.total_orders;
    if existing > 0 {
        warn!(orders = existing, "Database already has orders, skipping seed");
        println!("Delete the database file to regenerate.");
        return Ok(());
    }

    let today = Local::now().date_naive();
    let start = std::time::Instant::now();

    let orders = db.orders();
    let mut generated = 0usize;
    for offset in (0..days.max(1)).rev() {
        let sale_date = today - Duration::days(offset);
        for order in orders_for_day(sale_date, offset as usize) {
            orders.insert(&order).await?;
            generated += 1;
        }
    }

    let costs = db.fixed_costs();
    for cost in fixed_costs(today) {
        costs.insert(&cost).await?;
    }

    info!(
        orders = generated,
        fixed_costs = costs.active_count().await?,
        elapsed = ?start.elapsed(),
        "Seed complete"
    );

    Ok(())
}

/// 1 to 3 orders for the given day.
fn orders_for_day(sale_date: NaiveDate, seed: usize) -> Vec<NewOrder> {
    let count = 1 + (seed * 7) % 3;

    (0..count)
        .map(|j| {
            let n = seed * 3 + j;
            let (name, price, cost) = PACKAGES[(n * 5) % PACKAGES.len()];

            // Occasional discount off the listed price
            let discount = if n % 4 == 0 { price / 10 } else { 0 };

            let status = match n % 9 {
                0 => OrderStatus::Pending,
                5 => OrderStatus::Cancelled,
                _ => OrderStatus::Paid,
            };

            NewOrder {
                customer_name: CUSTOMERS[n % CUSTOMERS.len()].to_string(),
                customer_phone: format!("09{:08}", (n * 7_919) % 100_000_000),
                customer_email: String::new(),
                product_id: None,
                product_name: name.to_string(),
                listed_price: Money::from_units(price),
                actual_price: Money::from_units(price - discount),
                cost: Money::from_units(cost),
                sale_date,
                status,
                notes: String::new(),
            }
        })
        .collect()
}

fn fixed_costs(today: NaiveDate) -> Vec<NewFixedCost> {
    let month_ago = today - Duration::days(29);

    vec![
        NewFixedCost {
            name: "Thuê VPS".to_string(),
            amount: Money::from_units(300_000),
            category: "server".to_string(),
            start_date: month_ago,
            end_date: Some(today),
            is_active: true,
            notes: "VPS 4 vCPU cho landing page".to_string(),
        },
        NewFixedCost {
            name: "Claude Team seat".to_string(),
            amount: Money::from_units(1_500_000),
            category: "tools".to_string(),
            start_date: today - Duration::days(59),
            end_date: None,
            is_active: true,
            notes: String::new(),
        },
        NewFixedCost {
            name: "Facebook Ads".to_string(),
            amount: Money::from_units(2_000_000),
            category: "marketing".to_string(),
            start_date: today - Duration::days(44),
            end_date: Some(today - Duration::days(15)),
            is_active: true,
            notes: "Chiến dịch 30 ngày".to_string(),
        },
        NewFixedCost {
            name: "Hosting cũ".to_string(),
            amount: Money::from_units(150_000),
            category: "server".to_string(),
            start_date: today - Duration::days(90),
            end_date: Some(today - Duration::days(61)),
            is_active: false,
            notes: "Đã chuyển sang VPS".to_string(),
        },
    ]
}
