//! Analyze a test-card image from the command line.
//!
//! Run with: cargo run --example analyze_card -- card.png [model.rten]

use std::sync::Arc;

use anyhow::Context;
use hemotype::prelude::*;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .init();

    let mut args = std::env::args().skip(1);
    let image_path = args.next().context("usage: analyze_card <image> [model.rten]")?;

    // Without a model every section comes back undetermined
    let classifier = match args.next() {
        Some(model_path) => {
            let model: Arc<dyn AgglutinationModel> = Arc::new(RtenModel::load(&model_path)?);
            SectionClassifier::new(model)
        }
        None => SectionClassifier::without_model(),
    };

    let bytes = std::fs::read(&image_path).with_context(|| format!("failed to read {}", image_path))?;
    let result = CardAnalyzer::new(classifier).analyze_bytes(&bytes)?;

    for (reagent, section) in Reagent::ORDER.iter().zip(result.sections()) {
        println!(
            "{:<12} agglutination={:?} confidence={:.2}",
            reagent.as_str(),
            section.agglutination,
            section.confidence
        );
    }
    println!("Blood type: {} ({:.1}% confidence)", result.blood_type, result.confidence_score * 100.0);

    Ok(())
}
