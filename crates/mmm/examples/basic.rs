//! Basic example: attribution on the synthetic weekly dataset
//!
//! Run with: cargo run --example basic -p mmm-facade
//! Set RUST_LOG=mmm_core=debug to trace each stage.

use mmm_facade::prelude::*;
use mmm_facade::synthetic;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mmm_core=info".into()),
        )
        .init();

    println!("=== mmm Basic Example ===\n");

    // 1. Three years of weekly data with two media channels
    let data = SyntheticDataConfig::default();
    let table = synthetic::generate(&data)?;
    let columns: Vec<&str> = table.column_names().collect();
    println!("1. Generated {} weeks, columns: {:?}\n", table.n_rows(), columns);

    // 2. Transforms on a single series
    let spend = table.column("x1")?;
    let adstocked = geometric_adstock(&spend[..8], data.x1_adstock.alpha)?;
    let saturated = saturation(&adstocked, data.x1_saturation.lambda);
    println!("2. x1 spend:     {:.3?}", &spend[..8]);
    println!("   adstocked:    {:.3?}", adstocked);
    println!("   saturated:    {:.3?}\n", saturated);

    // 3. Full attribution run
    let pipeline = AttributionPipeline::new(synthetic::model_config(&data))?;
    let report = pipeline.run(&table)?;
    println!("3. Regression\n{}\n", report.regression);
    println!("   R-squared: {:.4}\n", report.regression.r_squared);

    // 4. Attribution
    println!("4. Contribution to volume:");
    for (name, value) in report.contribution_to_volume.iter() {
        println!("   {:<12} {:>10.3}", name, value);
    }
    println!("\n   Relative media contribution:");
    for (name, share) in report.relative_contribution.iter() {
        println!("   {:<12} {:>9.1}%", name, share * 100.0);
    }
    if let Some(roi) = &report.roi {
        println!("\n   ROI:");
        for (name, value) in roi.iter() {
            println!("   {:<12} {:>10.4}", name, value);
        }
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
