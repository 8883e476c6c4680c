//! Prepares a London housing CSV and fits a borough classifier.
//!
//! ```text
//! RUST_LOG=info cargo run --example house_prices -- housing_in_london.csv [trainer.json]
//! ```

use std::env;
use std::process;
use tabulearn::dataset::{Column, Dataset, TimestampCodec};
use tabulearn::model::LogisticRegression;
use tabulearn::preprocessing::{Max, Mean};
use tabulearn::trainer::{Trainer, TrainerConfig};
use tracing_subscriber::EnvFilter;

fn schema() -> tabulearn::Result<Dataset> {
    let mut ds = Dataset::new();
    ds.add_column(Column::timestamp(
        "date",
        0,
        TimestampCodec::with_format("%Y-%m-%d"),
    ))?;
    ds.add_column(Column::string("area", 1))?;
    ds.add_column(Column::int("average_price", 2))?;
    ds.add_column(Column::string("code", 3))?;
    ds.add_column(Column::int("houses_sold", 4))?;
    ds.add_column(Column::float("no_of_crimes", 5))?;
    ds.add_column(Column::int("borough_flag", 6))?;
    Ok(ds)
}

fn print_statistics(ds: &Dataset) -> tabulearn::Result<()> {
    for column in ds.columns() {
        if let Some(stats) = ds.statistics(column.name())? {
            println!("column {}:\n{}", column.name(), stats);
        }
    }
    Ok(())
}

fn run(path: &str, config: Option<&str>) -> tabulearn::Result<()> {
    let mut ds = schema()?;
    ds.load_csv_path(path, true)?;
    print_statistics(&ds)?;

    println!("=============== fill ===================");
    ds.fill("houses_sold", &Mean)?;
    ds.fill("no_of_crimes", &Mean)?;
    print_statistics(&ds)?;

    println!("=============== normalize ===================");
    for name in ["average_price", "houses_sold", "no_of_crimes", "borough_flag"] {
        ds.normalize(name, &Max)?;
    }
    for name in ["area", "code"] {
        ds.normalize_string_by_encode(name)?;
        ds.normalize(name, &Max)?;
    }
    ds.add_x0()?;
    print_statistics(&ds)?;

    println!("=============== train ===================");
    let names = ["x0", "area", "average_price", "code", "houses_sold", "no_of_crimes"];
    let features = ds.indices_of(&names)?;
    let label = ds.indices_of(&["borough_flag"])?[0];
    let samples = ds.column_samples(&features, label)?;

    let config = match config {
        Some(path) => TrainerConfig::from_path(path)?,
        None => TrainerConfig::default(),
    };
    let mut model = LogisticRegression::new();
    let history = Trainer::from_config(config).fit(&mut model, &samples)?;

    for (name, value) in names.iter().zip(&history.final_params) {
        println!("{}={:.6}", name, value);
    }
    println!("final loss after {} epochs: {:.6}", history.epochs, history.losses.last().copied().unwrap_or(f64::NAN));
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let Some(path) = args.get(1) else {
        eprintln!("usage: {} <housing.csv> [trainer.json]", args[0]);
        process::exit(2);
    };
    if let Err(e) = run(path, args.get(2).map(String::as_str)) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
