//! Splitting a weekend trip between friends

use bigdecimal::BigDecimal;
use split_settlement::{patterns, ExpenseBuilder, ExpenseGroup, SettlementConfig};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Split Settlement - Weekend Trip Example\n");

    let config = SettlementConfig::from_env()?;
    let mut group = ExpenseGroup::new(config);

    let asha = group.add_participant("Asha".to_string(), None)?;
    let ravi = group.add_participant("Ravi".to_string(), Some("ravi.png".to_string()))?;
    let meera = group.add_participant("Meera".to_string(), None)?;
    let dev = group.add_participant("Dev".to_string(), None)?;

    for participant in group.participants() {
        println!("  + {}", participant.name);
    }
    println!();

    let cabin = patterns::shared_by_everyone(
        "Cabin rental".to_string(),
        BigDecimal::from(480),
        asha.id.clone(),
        group.participants(),
    )?;
    let dinner = ExpenseBuilder::new(
        "Dinner".to_string(),
        BigDecimal::from_str("127.35")?,
    )
    .paid_by(ravi.id.clone())
    .shared_with_all([ravi.id.clone(), meera.id.clone(), dev.id.clone()])
    .build()?;
    let fuel = patterns::paid_on_behalf(
        "Fuel".to_string(),
        BigDecimal::from(60),
        meera.id.clone(),
        dev.id.clone(),
    )?;

    for expense in [cabin, dinner, fuel] {
        println!("  * {} ({})", expense.description, expense.amount);
        group.add_expense(expense)?;
    }
    println!();

    println!("Balances:");
    let balances = group.balances()?;
    for (id, balance) in balances.iter() {
        let name = group.participant(id).map(|p| p.name.as_str()).unwrap_or(id);
        println!(
            "  {:>6}: {}",
            name,
            balance.to_decimal(group.config().currency_scale)
        );
    }
    println!();

    let summary = group.summary()?;
    println!("Total spent: {}", summary.total_spent);
    for line in summary.lines() {
        println!("  {}", line);
    }
    println!();

    let (_, dropped) = group.remove_participant(&dev.id)?;
    println!(
        "Dev left the group; {} expense(s) referencing Dev were removed",
        dropped.len()
    );
    for line in group.summary()?.lines() {
        println!("  {}", line);
    }

    Ok(())
}
