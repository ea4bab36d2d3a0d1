use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::provider::ScorePredictor;
use crate::engine::features::FeatureVector;

/// Client for an HTTP model-serving endpoint hosting the trained pipeline.
///
/// Request:  `POST {endpoint}` with `{"rows": [<feature row>]}`
/// Response: `{"predictions": [<f64>, ...]}`; the first value is used.
#[derive(Clone)]
pub struct RemotePredictor {
    http: Client,
    endpoint: Url,
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    rows: [&'a FeatureVector; 1],
}

#[derive(Deserialize)]
struct PredictResponse {
    predictions: Vec<f64>,
}

impl RemotePredictor {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .with_context(|| format!("Invalid predictor URL '{}'", endpoint))?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(RemotePredictor { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ScorePredictor for RemotePredictor {
    fn name(&self) -> &str {
        "remote-pipeline"
    }

    async fn predict_row(&self, row: &FeatureVector) -> Result<f64> {
        debug!("Requesting prediction from {}", self.endpoint);

        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(&PredictRequest { rows: [row] })
            .send()
            .await
            .context("Predictor request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Predictor error {}: {}", status, body);
        }

        let parsed: PredictResponse = resp
            .json()
            .await
            .context("Failed to parse predictor response")?;
        first_prediction(parsed)
    }
}

fn first_prediction(resp: PredictResponse) -> Result<f64> {
    resp.predictions
        .first()
        .copied()
        .context("Predictor returned no predictions")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::testing::sample_features;

    #[test]
    fn request_body_wraps_single_row() {
        let row = sample_features();
        let body = serde_json::to_value(PredictRequest { rows: [&row] }).unwrap();
        let rows = body["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["batting_team"], "India");
        assert_eq!(rows[0]["balls_left"], 84);
        assert_eq!(rows[0]["last_five"], 30);
    }

    #[test]
    fn takes_first_prediction() {
        let resp: PredictResponse =
            serde_json::from_str(r#"{"predictions": [182.7, 90.0]}"#).unwrap();
        assert_eq!(first_prediction(resp).unwrap(), 182.7);
    }

    #[test]
    fn empty_predictions_is_an_error() {
        let resp: PredictResponse = serde_json::from_str(r#"{"predictions": []}"#).unwrap();
        assert!(first_prediction(resp).is_err());
    }

    #[test]
    fn rejects_unparsable_endpoint() {
        assert!(RemotePredictor::new("not a url", Duration::from_secs(5)).is_err());
        let ok = RemotePredictor::new("http://127.0.0.1:9000/predict", Duration::from_secs(5))
            .unwrap();
        assert_eq!(ok.endpoint().path(), "/predict");
    }
}
