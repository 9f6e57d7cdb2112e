use std::io::{BufRead, Write as _};
use std::sync::Arc;

use anyhow::{Context, bail};
use serde_json::Value;

use milladmin_controllers::list::{ListController, PaginationMode};
use milladmin_core::{EntityId, EntityRecord};
use milladmin_export::csv_export;
use milladmin_gateway::{HttpGateway, ListQuery};
use milladmin_panel::{AdminServices, Config};
use milladmin_store::EntityStore;

macro_rules! dispatch {
    ($services:expr, $entity:expr, $cmd:ident($($arg:expr),*)) => {
        match $entity {
            "branch" => $cmd(&$services.branches $(, $arg)*).await,
            "category" => $cmd(&$services.categories $(, $arg)*).await,
            "department" => $cmd(&$services.departments $(, $arg)*).await,
            "grade" => $cmd(&$services.grades $(, $arg)*).await,
            "machine" => $cmd(&$services.machines $(, $arg)*).await,
            "product" => $cmd(&$services.products $(, $arg)*).await,
            "product-type" => $cmd(&$services.product_types $(, $arg)*).await,
            "tax-slab" => $cmd(&$services.tax_slabs $(, $arg)*).await,
            "uom" => $cmd(&$services.uoms $(, $arg)*).await,
            "work-shift" => $cmd(&$services.work_shifts $(, $arg)*).await,
            "labour" => $cmd(&$services.labours $(, $arg)*).await,
            "customer" => $cmd(&$services.customers $(, $arg)*).await,
            "quote" => $cmd(&$services.quotes $(, $arg)*).await,
            "stock-discard" => $cmd(&$services.stock_discards $(, $arg)*).await,
            other => bail!("unknown entity: {other}"),
        }
    };
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    milladmin_observability::init();

    let config = Config::from_env();
    let services = match &config.api_url {
        Some(url) => AdminServices::new(Arc::new(HttpGateway::new(url))),
        None => AdminServices::in_memory().0,
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        ["list", entity] => dispatch!(services, *entity, cmd_list(None)),
        ["list", entity, filter] => dispatch!(services, *entity, cmd_list(Some(*filter))),
        ["export", entity] => dispatch!(services, *entity, cmd_export(None)),
        ["export", entity, path] => dispatch!(services, *entity, cmd_export(Some(*path))),
        ["remove", entity, id] => dispatch!(services, *entity, cmd_remove(*id)),
        _ => {
            eprintln!("usage: milladmin-panel <list|export|remove> <entity> [args]");
            eprintln!("entities: branch category department grade machine product product-type");
            eprintln!("          tax-slab uom work-shift labour customer quote stock-discard");
            Ok(())
        }
    }
}

async fn cmd_list<R: EntityRecord>(store: &EntityStore<R>, filter: Option<&str>) -> anyhow::Result<()> {
    let list = ListController::new(store.clone(), PaginationMode::Client);
    list.refresh().await?;
    // One page holding everything; the command prints the whole table.
    list.set_page_size(usize::MAX).await?;
    if let Some(text) = filter {
        list.set_filter_input(text);
    }

    let items = list.visible_rows();
    let (columns, rows) = tabulate(&items)?;
    let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
    print!("{}", csv_export(R::ENTITY, &columns, &rows).content);
    tracing::info!(entity = R::ENTITY, count = items.len(), "listed records");
    Ok(())
}

async fn cmd_export<R: EntityRecord>(store: &EntityStore<R>, path: Option<&str>) -> anyhow::Result<()> {
    store.fetch_list(ListQuery::default()).await?;
    let items = store.snapshot().items;
    let (columns, rows) = tabulate(&items)?;
    let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
    let export = csv_export(R::ENTITY, &columns, &rows);

    let target = path.unwrap_or(export.filename.as_str());
    std::fs::write(target, &export.content)
        .with_context(|| format!("failed to write {target}"))?;
    println!("wrote {target}");
    Ok(())
}

async fn cmd_remove<R: EntityRecord>(store: &EntityStore<R>, id: &str) -> anyhow::Result<()> {
    let id: EntityId = id.parse().context("invalid record id")?;

    // Destructive actions need an explicit confirmation.
    print!("delete {} {id}? [y/N] ", R::ENTITY);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
        println!("aborted");
        return Ok(());
    }

    store.fetch_list(ListQuery::default()).await?;
    store.remove(id).await?;
    println!("deleted {} {id}", R::ENTITY);
    Ok(())
}

/// Column names and stringified cells for a record slice.
fn tabulate<R: EntityRecord>(items: &[R]) -> anyhow::Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut columns: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(items.len());

    for item in items {
        let value = serde_json::to_value(item).context("failed to serialize record")?;
        let Value::Object(map) = value else {
            bail!("record did not serialize to an object");
        };
        if columns.is_empty() {
            columns = map.keys().cloned().collect();
        }
        rows.push(columns.iter().map(|c| cell(map.get(c))).collect());
    }

    if columns.is_empty() {
        columns.push("id".to_string());
    }
    Ok((columns, rows))
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
