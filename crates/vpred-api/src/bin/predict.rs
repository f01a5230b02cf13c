//! One-shot prediction: reads video metadata JSON from a file (or stdin when
//! the path is `-` or omitted) and prints the prediction report as JSON.
//!
//! Uses the same `VPRED_*` environment variables as the server.

use std::io::Read;

use anyhow::Context;
use vpred_api::logging;
use vpred_engine::{Predictor, PredictorConfig};
use vpred_models::VideoMetadataInput;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init_tracing()?;

    let path = std::env::args().nth(1).unwrap_or_else(|| "-".to_string());
    let raw = read_input(&path)?;
    let input: VideoMetadataInput =
        serde_json::from_str(&raw).with_context(|| format!("invalid metadata JSON in {}", path))?;

    let predictor = Predictor::from_config(PredictorConfig::from_env());
    let report = predictor.predict_input(input)?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.is_predicted() {
        anyhow::bail!("prediction unavailable; features were still computed");
    }
    Ok(())
}

fn read_input(path: &str) -> anyhow::Result<String> {
    if path == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read metadata from stdin")?;
        Ok(raw)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path))
    }
}
