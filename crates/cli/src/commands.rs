//! Command dispatch against an open session.

use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use stockledger_core::{DomainError, code, input, round_money};
use stockledger_infra::{ExportError, export_all};
use stockledger_inventory::{InventoryReport, InventorySession, Movement, RecordMovement, Shortage};
use stockledger_products::{Product, RegisterProduct};

use crate::args::{Command, MovementCommand, OutputFormat, ProductCommand};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Per-invocation inputs that do not come from the command line arguments.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub format: OutputFormat,
    /// Date used when a movement is recorded without `--date`.
    pub today: NaiveDate,
    pub export_dir: &'a Path,
}

pub fn execute<W: Write>(
    command: &Command,
    session: &mut InventorySession,
    ctx: &Context<'_>,
    out: &mut W,
) -> Result<(), CommandError> {
    match command {
        Command::Product(cmd) => product(cmd, session, ctx, out),
        Command::Movement(cmd) => movement(cmd, session, ctx, out),
        Command::Stock { code } => stock(code, session, ctx, out),
        Command::Report => report(&session.inventory_report()?, ctx, out),
        Command::Shortages => shortages(&session.find_shortages(), ctx, out),
        Command::Value => {
            let total = session.total_inventory_value()?;
            match ctx.format {
                OutputFormat::Json => write_json(out, &json!({ "total_value": total })),
                OutputFormat::Text => Ok(writeln!(out, "total inventory value: {total}")?),
            }
        }
        Command::Export { dir } => {
            let dir = dir.as_deref().unwrap_or(ctx.export_dir);
            let files = export_all(session, dir)?;
            match ctx.format {
                OutputFormat::Json => write_json(
                    out,
                    &json!({
                        "inventory": files.inventory,
                        "movements": files.movements,
                        "products": files.products,
                    }),
                ),
                OutputFormat::Text => {
                    for path in [&files.inventory, &files.movements, &files.products] {
                        writeln!(out, "wrote {}", path.display())?;
                    }
                    Ok(())
                }
            }
        }
    }
}

fn product<W: Write>(
    cmd: &ProductCommand,
    session: &mut InventorySession,
    ctx: &Context<'_>,
    out: &mut W,
) -> Result<(), CommandError> {
    match cmd {
        ProductCommand::Add {
            code,
            name,
            category,
            min,
            price,
        } => {
            let min_threshold = input::parse_threshold(min)?;
            let unit_price = input::parse_price(price)?;
            let code = session.register_product(RegisterProduct::new(
                code.as_str(),
                name.as_str(),
                category.as_str(),
                min_threshold,
                unit_price,
            ))?;
            match ctx.format {
                OutputFormat::Json => write_json(out, &json!({ "registered": code })),
                OutputFormat::Text => Ok(writeln!(out, "registered product {code}")?),
            }
        }
        ProductCommand::Show { code } => {
            let product = find_product(session, code)?;
            let stock = session.current_stock(code);
            match ctx.format {
                OutputFormat::Json => {
                    let mut value = serde_json::to_value(product.to_record())?;
                    value["current_stock"] = json!(stock);
                    write_json(out, &value)
                }
                OutputFormat::Text => {
                    writeln!(out, "code:          {}", product.code())?;
                    writeln!(out, "name:          {}", product.name())?;
                    writeln!(out, "category:      {}", product.category())?;
                    writeln!(out, "unit price:    {}", round_money(product.unit_price()))?;
                    writeln!(out, "min threshold: {}", product.min_threshold())?;
                    writeln!(out, "current stock: {stock}")?;
                    Ok(())
                }
            }
        }
        ProductCommand::List => {
            let products = session.catalog().products();
            match ctx.format {
                OutputFormat::Json => {
                    let records: Vec<_> = products.iter().map(Product::to_record).collect();
                    write_json(out, &records)
                }
                OutputFormat::Text => {
                    if products.is_empty() {
                        writeln!(out, "no products registered")?;
                    }
                    for p in products {
                        writeln!(
                            out,
                            "{:<12} {:<30} {:<16} min={:<6} price={}",
                            p.code(),
                            p.name(),
                            p.category(),
                            p.min_threshold(),
                            round_money(p.unit_price())
                        )?;
                    }
                    Ok(())
                }
            }
        }
    }
}

fn movement<W: Write>(
    cmd: &MovementCommand,
    session: &mut InventorySession,
    ctx: &Context<'_>,
    out: &mut W,
) -> Result<(), CommandError> {
    match cmd {
        MovementCommand::Record {
            code,
            direction,
            quantity,
            date,
            reason,
        } => {
            let quantity = input::parse_quantity(quantity)?;
            let date = match date {
                Some(raw) => raw.clone(),
                None => ctx.today.format(stockledger_inventory::DATE_FORMAT).to_string(),
            };
            let movement = session.record_movement(&RecordMovement::new(
                code.as_str(),
                direction.as_str(),
                quantity,
                date,
                reason.as_str(),
            ))?;
            match ctx.format {
                OutputFormat::Json => write_json(out, &movement),
                OutputFormat::Text => {
                    writeln!(
                        out,
                        "recorded {} {} x{} on {}; stock now {}",
                        movement.direction,
                        movement.product_code,
                        movement.quantity,
                        movement.date,
                        session.current_stock(movement.product_code.as_str())
                    )?;
                    Ok(())
                }
            }
        }
        MovementCommand::List { product } => {
            let movements: Vec<&Movement> = match product {
                Some(code) => session.ledger().for_product(code).collect(),
                None => session.ledger().all().collect(),
            };
            match ctx.format {
                OutputFormat::Json => write_json(out, &movements),
                OutputFormat::Text => {
                    if movements.is_empty() {
                        writeln!(out, "no movements recorded")?;
                    }
                    for m in movements {
                        writeln!(
                            out,
                            "{} {:<8} {:<12} {:>8} {}",
                            m.date, m.direction, m.product_code, m.quantity, m.reason
                        )?;
                    }
                    Ok(())
                }
            }
        }
    }
}

fn stock<W: Write>(
    raw_code: &str,
    session: &InventorySession,
    ctx: &Context<'_>,
    out: &mut W,
) -> Result<(), CommandError> {
    let product = find_product(session, raw_code)?;
    let current = session.current_stock(raw_code);
    match ctx.format {
        OutputFormat::Json => write_json(out, &json!({ "code": product.code(), "current_stock": current })),
        OutputFormat::Text => Ok(writeln!(out, "{}: {current}", product.code())?),
    }
}

fn report<W: Write>(report: &InventoryReport, ctx: &Context<'_>, out: &mut W) -> Result<(), CommandError> {
    if ctx.format == OutputFormat::Json {
        return write_json(out, report);
    }

    writeln!(
        out,
        "{:<12} {:<30} {:<16} {:>10} {:>6} {:>8} {:>12}  STATUS",
        "CODE", "NAME", "CATEGORY", "PRICE", "MIN", "STOCK", "VALUE"
    )?;
    for line in &report.lines {
        writeln!(
            out,
            "{:<12} {:<30} {:<16} {:>10} {:>6} {:>8} {:>12}  {}",
            line.code,
            line.name,
            line.category,
            round_money(line.unit_price),
            line.min_threshold,
            line.current_stock,
            round_money(line.stock_value),
            line.status
        )?;
    }
    writeln!(out, "total units: {}", report.total_units)?;
    writeln!(out, "total value: {}", report.total_value)?;
    writeln!(out, "products in shortage: {}", report.shortage_count())?;
    for line in report.shortages() {
        writeln!(
            out,
            "  {} ({}): current {}, minimum {}",
            line.name, line.code, line.current_stock, line.min_threshold
        )?;
    }
    Ok(())
}

fn shortages<W: Write>(shortages: &[Shortage], ctx: &Context<'_>, out: &mut W) -> Result<(), CommandError> {
    if ctx.format == OutputFormat::Json {
        return write_json(out, shortages);
    }
    if shortages.is_empty() {
        writeln!(out, "no shortages")?;
    }
    for s in shortages {
        writeln!(
            out,
            "{} ({}): stock {} below minimum {}, short by {}",
            s.code,
            s.name,
            s.current_stock,
            s.min_threshold,
            s.deficit()
        )?;
    }
    Ok(())
}

fn find_product<'s>(session: &'s InventorySession, raw_code: &str) -> Result<&'s Product, DomainError> {
    session
        .product(raw_code)
        .ok_or_else(|| DomainError::UnknownProduct(code::normalize(raw_code)))
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<(), CommandError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(format: OutputFormat) -> Context<'static> {
        Context {
            format,
            today: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            export_dir: Path::new("reports"),
        }
    }

    fn run(session: &mut InventorySession, command: Command, format: OutputFormat) -> Result<String, CommandError> {
        let mut out = Vec::new();
        execute(&command, session, &ctx(format), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn add(session: &mut InventorySession, code: &str, min: &str, price: &str) {
        run(
            session,
            Command::Product(ProductCommand::Add {
                code: code.to_string(),
                name: format!("Item {code}"),
                category: "General".to_string(),
                min: min.to_string(),
                price: price.to_string(),
            }),
            OutputFormat::Text,
        )
        .unwrap();
    }

    fn record(session: &mut InventorySession, code: &str, direction: &str, quantity: &str) -> Result<String, CommandError> {
        run(
            session,
            Command::Movement(MovementCommand::Record {
                code: code.to_string(),
                direction: direction.to_string(),
                quantity: quantity.to_string(),
                date: None,
                reason: String::new(),
            }),
            OutputFormat::Text,
        )
    }

    #[test]
    fn record_defaults_to_today() {
        let mut session = InventorySession::new();
        add(&mut session, "a", "0", "1");
        let text = record(&mut session, "A", "in", "4").unwrap();
        assert_eq!(text, "recorded inbound A x4 on 2024-06-01; stock now 4\n");
    }

    #[test]
    fn malformed_numbers_map_to_malformed_input() {
        let mut session = InventorySession::new();
        add(&mut session, "A", "0", "1");
        let err = record(&mut session, "A", "in", "four").unwrap_err();
        assert!(matches!(err, CommandError::Domain(DomainError::MalformedInput(_))));
        assert!(session.ledger().is_empty());
    }

    #[test]
    fn value_and_shortages_follow_the_worked_example() {
        let mut session = InventorySession::new();
        add(&mut session, "A", "5", "10");
        add(&mut session, "B", "0", "20");
        record(&mut session, "A", "inbound", "3").unwrap();
        record(&mut session, "B", "inbound", "2").unwrap();
        record(&mut session, "A", "outbound", "1").unwrap();

        let value = run(&mut session, Command::Value, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&value).unwrap();
        assert_eq!(value["total_value"], "60.00");

        let text = run(&mut session, Command::Shortages, OutputFormat::Text).unwrap();
        assert_eq!(text, "A (Item A): stock 2 below minimum 5, short by 3\n");
    }

    #[test]
    fn unknown_product_lookups_fail() {
        let mut session = InventorySession::new();
        let err = run(&mut session, Command::Stock { code: "nope".to_string() }, OutputFormat::Text).unwrap_err();
        assert!(matches!(err, CommandError::Domain(DomainError::UnknownProduct(c)) if c == "NOPE"));
    }

    #[test]
    fn report_text_ends_with_totals() {
        let mut session = InventorySession::new();
        add(&mut session, "A", "5", "10");
        record(&mut session, "A", "in", "3").unwrap();

        add(&mut session, "B", "0", "2");
        record(&mut session, "B", "in", "4").unwrap();

        let text = run(&mut session, Command::Report, OutputFormat::Text).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert!(lines[1].starts_with("A "));
        assert!(lines[1].ends_with("SHORTAGE"));
        assert!(lines[2].ends_with("OK"));
        assert_eq!(lines[3], "total units: 7");
        assert_eq!(lines[4], "total value: 38.00");
        assert_eq!(lines[5], "products in shortage: 1");
        assert_eq!(lines[6], "  Item A (A): current 3, minimum 5");
    }
}
