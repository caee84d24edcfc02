use crate::context::AppContext;
use crate::output::{Output, OutputFormat};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use movieflix_client::RecommendationBackend;
use serde_json::json;

pub async fn run_health(ctx: &AppContext, output: &Output) -> Result<()> {
    let backend = ctx.backend.backend_name().to_string();

    match ctx.backend.health().await {
        Ok(health) => match output.format() {
            OutputFormat::Human => {
                if health.is_healthy() {
                    output.success(format!("{} is healthy ({} movies loaded)", backend, health.movies_loaded));
                } else {
                    output.warn(format!("{} reports status '{}'", backend, health.status));
                }
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                output.json(&json!({
                    "backend": backend,
                    "status": health.status,
                    "movies_loaded": health.movies_loaded,
                }));
            }
        },
        Err(e) => return Err(eyre!("{} is unreachable: {}", backend, e)),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use movieflix_config::{Config, Theme};

    #[tokio::test]
    async fn test_unreachable_backend_is_an_error() {
        let mut config = Config::default();
        // Nothing listens on the discard port
        config.api.base_url = "http://127.0.0.1:9".to_string();
        config.api.timeout_secs = Some(2);
        let ctx = AppContext::new(config).unwrap();
        let output = Output::new(OutputFormat::Json, true, Theme::default());

        let err = run_health(&ctx, &output).await.unwrap_err();
        assert!(err.to_string().contains("is unreachable"), "{}", err);
        assert!(err.to_string().contains("127.0.0.1:9"), "{}", err);
    }
}
