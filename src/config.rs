use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

/// T20 final-score predictor service
#[derive(Parser, Debug, Clone)]
#[command(name = "t20-predictor", version, about)]
pub struct Config {
    /// API listen address
    #[arg(long, env = "LISTEN_ADDR", default_value = "127.0.0.1:8501")]
    pub listen_addr: String,

    /// Path to the local model artifact (JSON), loaded once at startup
    #[arg(long, env = "MODEL_PATH", default_value = "score_model.json")]
    pub model_path: String,

    /// Model-serving endpoint; when set, it is used instead of the local artifact
    #[arg(long, env = "PREDICTOR_URL")]
    pub predictor_url: Option<String>,

    /// Timeout for a single remote prediction, in seconds
    #[arg(long, env = "PREDICTOR_TIMEOUT_SECS", default_value = "10")]
    pub predictor_timeout_secs: u64,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.listen_addr.parse::<SocketAddr>().is_err() {
            anyhow::bail!("listen_addr '{}' is not a valid socket address", self.listen_addr);
        }
        if self.predictor_timeout_secs == 0 {
            anyhow::bail!("predictor_timeout_secs must be positive");
        }
        if let Some(url) = &self.predictor_url {
            if url::Url::parse(url).is_err() {
                anyhow::bail!("predictor_url '{}' is not a valid URL", url);
            }
        }
        Ok(())
    }

    pub fn predictor_timeout(&self) -> Duration {
        Duration::from_secs(self.predictor_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["t20-predictor"];
        argv.extend_from_slice(args);
        Config::parse_from(argv)
    }

    #[test]
    fn defaults_are_valid() {
        let config = parse(&[]);
        assert_eq!(config.model_path, "score_model.json");
        assert!(config.predictor_url.is_none());
        assert!(config.validate().is_ok());
        assert_eq!(config.predictor_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(parse(&["--listen-addr", "localhost"]).validate().is_err());
        assert!(parse(&["--predictor-timeout-secs", "0"]).validate().is_err());
        assert!(parse(&["--predictor-url", "::nope"]).validate().is_err());
        assert!(parse(&["--predictor-url", "http://models:9000/predict"])
            .validate()
            .is_ok());
    }
}
