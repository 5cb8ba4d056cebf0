use rusty_dtree::data::dataset::Dataset;
use rusty_dtree::data::loader::{read_dataset, LoaderOptions};
use rusty_dtree::metrics::confusion::ClassificationMetrics;
use rusty_dtree::trees::classifier::DecisionTreeClassifier;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rusty_dtree=info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .unwrap_or_else(|| "datasets/decision_tree_example.txt".to_string());
    let criterion = args.next();

    let dataset = read_dataset(&path, &LoaderOptions::default())?;
    println!("Loaded {} records from {}", dataset.len(), path);

    let mut classifier = DecisionTreeClassifier::with_params(criterion.as_deref())?;
    println!("{}", classifier.fit(&dataset)?);
    if let Some(tree) = classifier.tree() {
        print!("{}", tree);
    }

    let (train_dataset, test_dataset) = dataset.train_test_split(0.75, Some(42))?;
    let mut holdout = DecisionTreeClassifier::with_params(criterion.as_deref())?;
    holdout.fit(&train_dataset)?;
    if test_dataset.is_not_empty() {
        let predictions = holdout.predict(test_dataset.records())?;
        let truth: Vec<String> = test_dataset
            .iter()
            .map(|record| Dataset::target_label(record))
            .collect();
        println!(
            "Held-out accuracy: {}%",
            holdout.accuracy(&truth, &predictions)? * 100.0
        );
    }

    Ok(())
}
