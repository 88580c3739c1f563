//! `threadline` -- command-line front end for the storefront core.
//!
//! # Commands
//!
//! | Command                              | Description                                   |
//! |--------------------------------------|-----------------------------------------------|
//! | `designs [tab] [search]`             | List designs on a tab (default `all`)          |
//! | `newest-design`                      | Show the most recently created design         |
//! | `create-design <form.json>`          | Validate and submit a design form             |
//! | `design-status <id> <status> [--yes]`| Request a whitelisted design transition       |
//! | `orders [tab] [search]`              | List orders on a tab (default `all`)           |
//! | `cancel-order <id> <reason...> [--yes]` | Cancel a pending or paid order             |
//! | `confirm-delivered <id>`             | Confirm receipt of a shipped order            |
//! | `save-coupon <code>`                 | Remember a coupon code for the current user   |
//! | `saved-coupons`                      | List saved coupon codes                       |
//! | `mark-reviewed <order-id> <item-id>` | Remember that an order item was reviewed      |
//! | `checkout <cart.json> <fee> [coupon.json]` | Compute totals for a cart and coupon    |
//!
//! Configuration comes from the environment; see [`AppConfig::from_env`].

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use async_trait::async_trait;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use threadline_app::bookkeeping::LocalBookkeeping;
use threadline_app::config::AppConfig;
use threadline_app::notify::AutoConfirm;
use threadline_app::session::{checkout, store_from_config};
use threadline_app::{Confirmer, DesignLifecycle, Notifier, OrderHistory};
use threadline_client::StorefrontApi;
use threadline_core::coupon::Coupon;
use threadline_core::design::CreateDesignRequest;
use threadline_core::status::DesignStatus;
use threadline_core::store::{AppStore, CartLine};
use threadline_core::types::DbId;

/// Prints notifications to stderr.
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn error(&self, message: &str) {
        eprintln!("✗ {message}");
    }

    fn success(&self, message: &str) {
        eprintln!("✓ {message}");
    }
}

/// Asks on stdin and accepts `y` / `yes`.
struct TerminalConfirmer;

#[async_trait]
impl Confirmer for TerminalConfirmer {
    async fn confirm(&self, prompt: &str) -> bool {
        let prompt = prompt.to_string();
        let answer = tokio::task::spawn_blocking(move || {
            print!("{prompt} [y/N] ");
            std::io::stdout().flush().ok()?;
            let mut line = String::new();
            std::io::stdin().read_line(&mut line).ok()?;
            Some(line)
        })
        .await
        .ok()
        .flatten()
        .unwrap_or_default();

        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "threadline_app=info,threadline_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(base_url = %config.client.base_url, "Loaded configuration");

    let mut store = match store_from_config(&config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "Invalid session configuration");
            return ExitCode::FAILURE;
        }
    };

    let api = match StorefrontApi::new(&config.client) {
        Ok(api) => Arc::new(api),
        Err(e) => {
            tracing::error!(error = %e, "Failed to build storefront client");
            return ExitCode::FAILURE;
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let assume_yes = args.iter().any(|a| a == "--yes" || a == "-y");
    let args: Vec<&str> = args
        .iter()
        .map(String::as_str)
        .filter(|a| *a != "--yes" && *a != "-y")
        .collect();

    let confirmer: Box<dyn Confirmer> = if assume_yes {
        Box::new(AutoConfirm(true))
    } else {
        Box::new(TerminalConfirmer)
    };

    match run(&config, &mut store, api, &args, confirmer.as_ref()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(
    config: &AppConfig,
    store: &mut AppStore,
    api: Arc<StorefrontApi>,
    args: &[&str],
    confirmer: &dyn Confirmer,
) -> Result<(), String> {
    let notifier = TerminalNotifier;

    match args {
        ["designs", rest @ ..] => {
            let designs = DesignLifecycle::new(api);
            designs.refresh().await.map_err(|e| e.to_string())?;
            if let Some(tab) = rest.first() {
                designs.select_tab(tab).await.map_err(|e| e.to_string())?;
            }
            designs.set_search(&rest.get(1..).unwrap_or_default().join(" ")).await;
            for row in designs.rows().await {
                let actions: Vec<_> = row.controls.iter().map(|c| c.label).collect();
                println!(
                    "#{:<6} {:<32} {:<14} {:>10} VND  {}",
                    row.id,
                    row.name,
                    row.status_label,
                    row.total_price,
                    actions.join(" | ")
                );
            }
            Ok(())
        }
        ["newest-design"] => {
            let designs = DesignLifecycle::new(api);
            match designs.newest_design().await.map_err(|e| e.to_string())? {
                Some(design) => print_json(&design),
                None => {
                    println!("No designs yet.");
                    Ok(())
                }
            }
        }
        ["create-design", path] => {
            let form: CreateDesignRequest = read_json(path).await?;
            let designs = DesignLifecycle::new(api);
            let created = designs
                .create_design(&form, &notifier)
                .await
                .map_err(|e| e.to_string())?;
            print_json(&created)
        }
        ["design-status", id, status] => {
            let id = parse_id(id)?;
            let target = DesignStatus::parse(status)
                .ok_or_else(|| format!("Unknown design status '{status}'"))?;
            let designs = DesignLifecycle::new(api);
            designs.refresh().await.map_err(|e| e.to_string())?;
            let outcome = designs
                .request_transition(id, target, confirmer, &notifier)
                .await
                .map_err(|e| e.to_string())?;
            println!("{outcome:?}");
            Ok(())
        }
        ["orders", rest @ ..] => {
            let orders = OrderHistory::new(api);
            orders.refresh().await.map_err(|e| e.to_string())?;
            if let Some(tab) = rest.first() {
                orders.select_tab(tab).await.map_err(|e| e.to_string())?;
            }
            orders.set_search(&rest.get(1..).unwrap_or_default().join(" ")).await;
            for row in orders.rows().await {
                let actions: Vec<_> = row.controls.iter().map(|c| c.label).collect();
                println!(
                    "#{:<6} {:<14} {:<16} {:>3} items {:>10} VND  {}",
                    row.id,
                    row.order_number,
                    row.status_label,
                    row.item_count,
                    row.final_total,
                    actions.join(" | ")
                );
            }
            Ok(())
        }
        ["cancel-order", id, reason @ ..] if !reason.is_empty() => {
            let id = parse_id(id)?;
            let orders = OrderHistory::new(api);
            orders.refresh().await.map_err(|e| e.to_string())?;
            let outcome = orders
                .cancel_order(id, &reason.join(" "), confirmer, &notifier)
                .await
                .map_err(|e| e.to_string())?;
            println!("{outcome:?}");
            Ok(())
        }
        ["confirm-delivered", id] => {
            let id = parse_id(id)?;
            let orders = OrderHistory::new(api);
            orders.refresh().await.map_err(|e| e.to_string())?;
            let outcome = orders
                .confirm_delivered(id, &notifier)
                .await
                .map_err(|e| e.to_string())?;
            println!("{outcome:?}");
            Ok(())
        }
        ["save-coupon", code] => {
            let user_id = require_user(store)?;
            let books = LocalBookkeeping::new(&config.bookkeeping_dir);
            let saved = books.save_coupon(user_id, code).await.map_err(|e| e.to_string())?;
            println!("{}", if saved { "Saved." } else { "Already saved." });
            Ok(())
        }
        ["saved-coupons"] => {
            let user_id = require_user(store)?;
            let books = LocalBookkeeping::new(&config.bookkeeping_dir);
            for code in books.saved_coupons(user_id).await.map_err(|e| e.to_string())? {
                println!("{code}");
            }
            Ok(())
        }
        ["mark-reviewed", order_id, item_id] => {
            let user_id = require_user(store)?;
            let books = LocalBookkeeping::new(&config.bookkeeping_dir);
            books
                .mark_reviewed(user_id, parse_id(order_id)?, parse_id(item_id)?)
                .await
                .map_err(|e| e.to_string())?;
            Ok(())
        }
        ["checkout", cart_path, fee, rest @ ..] if rest.len() <= 1 => {
            let lines: Vec<CartLine> = read_json(cart_path).await?;
            let coupon: Option<Coupon> = match rest.first() {
                Some(path) => Some(read_json(path).await?),
                None => None,
            };
            let fee = fee
                .parse()
                .map_err(|_| format!("'{fee}' is not a valid shipping fee"))?;
            let totals = checkout(store, lines, coupon, fee, chrono::Utc::now())
                .map_err(|e| e.to_string())?;
            print_json(&totals)
        }
        _ => Err(usage()),
    }
}

fn parse_id(raw: &str) -> Result<DbId, String> {
    raw.parse().map_err(|_| format!("'{raw}' is not a valid id"))
}

fn require_user(store: &AppStore) -> Result<DbId, String> {
    store.user_id().ok_or_else(|| {
        "Sign in first: set STOREFRONT_USER_ID and STOREFRONT_API_TOKEN".to_string()
    })
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, String> {
    let raw = tokio::fs::read(path)
        .await
        .map_err(|e| format!("Cannot read {path}: {e}"))?;
    serde_json::from_slice(&raw).map_err(|e| format!("Invalid JSON in {path}: {e}"))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{text}");
    Ok(())
}

fn usage() -> String {
    "usage: threadline <designs [tab] [search] | newest-design | create-design <form.json> | \
     design-status <id> <status> [--yes] | orders [tab] [search] | \
     cancel-order <id> <reason...> [--yes] | confirm-delivered <id> | save-coupon <code> | \
     saved-coupons | mark-reviewed <order-id> <item-id> | \
     checkout <cart.json> <shipping-fee> [coupon.json]>"
        .to_string()
}
