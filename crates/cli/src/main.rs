use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use daigou_infra::JsonFileStore;
use daigou_ledger::Ledger;
use daigou_money::{format_foreign, format_home};
use daigou_orders::{OrderDraft, OrderRecord, Status};
use daigou_transfer::{backup_file_name, export_blob, import_blob};

mod cli;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    let store = match &cli.data_file {
        Some(path) => JsonFileStore::new(path),
        None => JsonFileStore::at_default_location()
            .context("cannot resolve the default data file location")?,
    };
    tracing::debug!(path = %store.path().display(), "using data file");
    let mut ledger = Ledger::open(store).context("cannot open the order ledger")?;

    match cli.command {
        Commands::Add {
            client,
            product,
            total,
            quantity,
            cost_foreign,
            rate,
            store,
            spec,
            date,
            note,
        } => {
            let draft = OrderDraft {
                date,
                client_code: client,
                store,
                product_name: product,
                spec,
                quantity,
                cost_foreign,
                exchange_rate: rate,
                total_price: total,
                note,
                ..OrderDraft::default()
            };
            let record = ledger.create(&draft).context("order rejected")?;
            print_created(&record);
        }
        Commands::List { all } => run_list(&ledger, all),
        Commands::Edit {
            id,
            client,
            product,
            total,
            quantity,
            cost_foreign,
            rate,
            store,
            spec,
            date,
            note,
            status,
        } => {
            let Some(existing) = ledger.get(id) else {
                println!("order {id} not found");
                return Ok(());
            };
            let mut draft = draft_from_record(existing);
            if let Some(client) = client {
                draft.client_code = client;
            }
            if let Some(product) = product {
                draft.product_name = product;
            }
            if let Some(total) = total {
                draft.total_price = total;
            }
            if let Some(quantity) = quantity {
                draft.quantity = quantity;
            }
            if let Some(cost_foreign) = cost_foreign {
                draft.cost_foreign = cost_foreign;
            }
            if let Some(rate) = rate {
                draft.exchange_rate = rate;
            }
            if let Some(store) = store {
                draft.store = Some(store);
            }
            if let Some(spec) = spec {
                draft.spec = Some(spec);
            }
            if let Some(date) = date {
                draft.date = Some(date);
            }
            if let Some(note) = note {
                draft.note = Some(note);
            }
            draft.status = status;
            ledger.update(id, &draft)?;
            println!("updated order {id}");
        }
        Commands::Status { id, status } => {
            if ledger.set_status(id, status)? {
                println!("order {id} set to {} ({})", status.label(), status.as_str());
            } else {
                println!("order {id} not found");
            }
        }
        Commands::Paid { id, off } => {
            if ledger.set_paid(id, !off)? {
                println!("order {id} marked {}", if off { "unpaid" } else { "paid" });
            } else {
                println!("order {id} not found");
            }
        }
        Commands::ShippingPaid { id, off } => {
            if ledger.set_shipping_paid(id, !off)? {
                let state = if off { "unpaid" } else { "paid" };
                println!("order {id} shipping marked {state}");
            } else {
                println!("order {id} not found");
            }
        }
        Commands::Delete { id, yes } => {
            if ledger.get(id).is_none() {
                println!("order {id} not found");
            } else if yes || confirm(&format!("Delete order {id}?"))? {
                ledger.delete(id)?;
                println!("deleted order {id}");
            } else {
                println!("delete cancelled");
            }
        }
        Commands::Stats => run_stats(&ledger),
        Commands::Export { path } => run_export(&ledger, path)?,
        Commands::Import { path, yes } => run_import(&mut ledger, &path, yes)?,
    }

    Ok(())
}

fn run_list(ledger: &Ledger<JsonFileStore>, all: bool) {
    let records: Vec<&OrderRecord> = if all {
        ledger.records().iter().collect()
    } else {
        ledger.active().collect()
    };
    if records.is_empty() {
        println!("no orders");
        return;
    }
    for record in &records {
        println!("{}", format_line(record));
    }
    if all {
        println!("{} orders", records.len());
    } else {
        println!("{} in flight ({} total)", records.len(), ledger.len());
    }
}

fn run_stats(ledger: &Ledger<JsonFileStore>) {
    let stats = ledger.statistics();
    println!("orders:      {}", stats.order_count);
    println!("revenue:     {}", format_home(stats.total_revenue));
    println!("cost:        {}", format_home(stats.total_cost));
    println!("net profit:  {}", format_home(stats.net_profit));
    println!("margin:      {:.1}%", stats.profit_margin_pct);
    println!("unpaid:      {}", format_home(stats.total_unpaid));
    println!();
    for status in Status::ALL {
        println!(
            "{:>4}  {} ({})",
            stats.count_for(status),
            status.label(),
            status.as_str()
        );
    }
}

fn run_export(ledger: &Ledger<JsonFileStore>, path: Option<PathBuf>) -> anyhow::Result<()> {
    let path =
        path.unwrap_or_else(|| PathBuf::from(backup_file_name(Utc::now().date_naive())));
    let blob = export_blob(ledger.records()).context("cannot encode backup")?;
    std::fs::write(&path, &blob).with_context(|| format!("cannot write {}", path.display()))?;
    println!("exported {} orders to {}", ledger.len(), path.display());
    Ok(())
}

fn run_import(
    ledger: &mut Ledger<JsonFileStore>,
    path: &Path,
    yes: bool,
) -> anyhow::Result<()> {
    let blob = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let records = import_blob(&blob).context("backup rejected")?;
    if !yes {
        let prompt = format!(
            "Replace all {} existing orders with {} imported orders?",
            ledger.len(),
            records.len()
        );
        if !confirm(&prompt)? {
            println!("import cancelled");
            return Ok(());
        }
    }
    let count = records.len();
    ledger
        .replace_all(records)
        .context("cannot apply the imported orders")?;
    println!("imported {count} orders from {}", path.display());
    Ok(())
}

fn print_created(record: &OrderRecord) {
    println!("created order {}", record.id);
    if record.cost_home > 0.0 {
        println!(
            "  cost:   {} ({} @ {})",
            format_home(record.cost_home),
            format_foreign(record.cost_foreign),
            record.exchange_rate
        );
    }
    println!(
        "  price:  {} ({} x {})",
        format_home(record.total_price),
        format_home(record.unit_price),
        record.quantity
    );
    println!("  profit: {}", format_home(record.profit()));
}

fn format_line(record: &OrderRecord) -> String {
    let status = record.workflow_status();
    let paid = if record.is_paid { "已付款" } else { "未付款" };
    let shipping = if record.is_shipping_paid {
        "運費已付"
    } else {
        "運費未付"
    };
    format!(
        "{}  {}  {}  {} x{}  {}  {} ({})  {} {}",
        record.id,
        record.date,
        record.client_code,
        record.product_name,
        record.quantity,
        format_home(record.revenue()),
        status.label(),
        status.as_str(),
        paid,
        shipping
    )
}

/// Editable view of an existing record; flags override individual fields.
fn draft_from_record(record: &OrderRecord) -> OrderDraft {
    OrderDraft {
        date: Some(record.date),
        client_code: record.client_code.clone(),
        store: record.store.clone(),
        product_name: record.product_name.clone(),
        spec: record.spec.clone(),
        quantity: record.quantity,
        cost_foreign: record.cost_foreign,
        exchange_rate: record.exchange_rate,
        total_price: record.total_price,
        status: None,
        is_paid: record.is_paid,
        is_shipping_paid: record.is_shipping_paid,
        note: record.note.clone(),
    }
}

fn confirm(prompt: &str) -> io::Result<bool> {
    eprint!("{prompt} [y/N] ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
