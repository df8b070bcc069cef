use tracing_subscriber::{fmt, EnvFilter};

use crate::core::config::Settings;

/// Noisy dependencies are pinned to `warn` unless `RUST_LOG` says otherwise.
const QUIET_TARGETS: &[&str] = &["sqlx=warn", "hyper=warn", "tower_http=info"];

pub(crate) fn init_tracing(settings: &Settings) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => default_filter(&settings.telemetry().log_level)?,
    };

    let builder = fmt().with_env_filter(filter).with_target(false);

    let result = if settings.telemetry().json {
        builder.json().with_current_span(true).try_init()
    } else {
        builder.compact().try_init()
    };
    result.map_err(|err| anyhow::anyhow!(err.to_string()))?;

    tracing::debug!(
        environment = %settings.runtime().environment.as_str(),
        json = settings.telemetry().json,
        "Tracing initialised"
    );
    Ok(())
}

fn default_filter(level: &str) -> anyhow::Result<EnvFilter> {
    let mut filter = EnvFilter::try_new(level)?;
    for directive in QUIET_TARGETS {
        filter = filter.add_directive(directive.parse()?);
    }
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_accepts_plain_levels() {
        assert!(default_filter("debug").is_ok());
        assert!(default_filter("info,assessment_engine=trace").is_ok());
    }
}
