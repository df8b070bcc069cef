use super::parsing::{
    env_optional, env_or_default, parse_bool, parse_cors_origins, parse_environment, parse_i64,
    parse_u16, parse_u32,
};
use super::types::{
    ApiSettings, ConfigError, CorsSettings, DatabaseSettings, InboxSettings, RuntimeSettings,
    SecuritySettings, ServerHost, ServerPort, ServerSettings, Settings, SubmissionSettings,
    TelemetrySettings,
};

/// Hard ceiling on inbox page sizes, whatever the environment asks for.
const INBOX_PAGE_SIZE_CEILING: i64 = 100;

impl Settings {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        let host = env_or_default("ASSESSMENT_HOST", "0.0.0.0");
        let port = env_or_default("ASSESSMENT_PORT", "8000");

        let environment = parse_environment(
            env_optional("ASSESSMENT_ENV").or_else(|| env_optional("ENVIRONMENT")),
        );
        let strict_config = env_optional("ASSESSMENT_STRICT_CONFIG")
            .map(|value| parse_bool(&value))
            .unwrap_or(false)
            || environment.is_production();

        let project_name = env_or_default("PROJECT_NAME", "Assessment Engine");
        let version = env_or_default("VERSION", env!("CARGO_PKG_VERSION"));
        let api_v1_str = env_or_default("API_V1_STR", "/api/v1");

        // Shared with the platform's auth service, which mints the tokens.
        let secret_key =
            env_optional("SECRET_KEY").ok_or(ConfigError::MissingSecret("SECRET_KEY"))?;
        let algorithm = env_or_default("ALGORITHM", "HS256");

        let cors_origins = parse_cors_origins(env_optional("BACKEND_CORS_ORIGINS"))?;

        let postgres_server = env_or_default("POSTGRES_SERVER", "localhost");
        let postgres_port = parse_u16("POSTGRES_PORT", env_or_default("POSTGRES_PORT", "5432"))?;
        let postgres_user = env_or_default("POSTGRES_USER", "assessment");
        let postgres_password = env_or_default("POSTGRES_PASSWORD", "");
        let postgres_db = env_or_default("POSTGRES_DB", "assessment_db");
        let database_url = env_optional("DATABASE_URL");

        let inbox_defaults = InboxSettings::default();
        let default_page_size = env_optional("INBOX_DEFAULT_PAGE_SIZE")
            .map(|value| parse_i64("INBOX_DEFAULT_PAGE_SIZE", value))
            .transpose()?
            .unwrap_or(inbox_defaults.default_page_size);
        let max_page_size = env_optional("INBOX_MAX_PAGE_SIZE")
            .map(|value| parse_i64("INBOX_MAX_PAGE_SIZE", value))
            .transpose()?
            .unwrap_or(inbox_defaults.max_page_size);

        let submission_defaults = SubmissionSettings::default();
        let attempt_retry_limit = env_optional("ATTEMPT_RETRY_LIMIT")
            .map(|value| parse_u32("ATTEMPT_RETRY_LIMIT", value))
            .transpose()?
            .unwrap_or(submission_defaults.attempt_retry_limit);
        let grading_retry_limit = env_optional("GRADING_RETRY_LIMIT")
            .map(|value| parse_u32("GRADING_RETRY_LIMIT", value))
            .transpose()?
            .unwrap_or(submission_defaults.grading_retry_limit);

        let log_level = env_or_default("ASSESSMENT_LOG_LEVEL", "info");
        let json = env_optional("ASSESSMENT_LOG_JSON").map(|value| parse_bool(&value)).unwrap_or(false);
        let prometheus_enabled =
            env_optional("PROMETHEUS_ENABLED").map(|value| parse_bool(&value)).unwrap_or(false);

        let settings = Self {
            server: ServerSettings { host: ServerHost::parse(host)?, port: ServerPort::parse(port)? },
            runtime: RuntimeSettings { environment, strict_config },
            api: ApiSettings { project_name, version, api_v1_str },
            security: SecuritySettings { secret_key, algorithm },
            cors: CorsSettings { origins: cors_origins },
            database: DatabaseSettings {
                postgres_server,
                postgres_port,
                postgres_user,
                postgres_password,
                postgres_db,
                database_url,
            },
            inbox: InboxSettings { default_page_size, max_page_size },
            submissions: SubmissionSettings { attempt_retry_limit, grading_retry_limit },
            telemetry: TelemetrySettings { log_level, json, prometheus_enabled },
        };

        settings.validate()?;

        Ok(settings)
    }

    pub(crate) fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host.0, self.server.port.0)
    }

    pub(crate) fn server_host(&self) -> &str {
        &self.server.host.0
    }

    pub(crate) fn server_port(&self) -> u16 {
        self.server.port.0
    }

    pub(crate) fn api(&self) -> &ApiSettings {
        &self.api
    }

    pub(crate) fn security(&self) -> &SecuritySettings {
        &self.security
    }

    pub(crate) fn cors(&self) -> &CorsSettings {
        &self.cors
    }

    pub(crate) fn database(&self) -> &DatabaseSettings {
        &self.database
    }

    pub(crate) fn inbox(&self) -> &InboxSettings {
        &self.inbox
    }

    pub(crate) fn submissions(&self) -> &SubmissionSettings {
        &self.submissions
    }

    pub(crate) fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    pub(crate) fn runtime(&self) -> &RuntimeSettings {
        &self.runtime
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.inbox.max_page_size < 1 || self.inbox.max_page_size > INBOX_PAGE_SIZE_CEILING {
            return Err(ConfigError::InvalidValue {
                field: "INBOX_MAX_PAGE_SIZE",
                value: self.inbox.max_page_size.to_string(),
            });
        }

        if self.inbox.default_page_size < 1
            || self.inbox.default_page_size > self.inbox.max_page_size
        {
            return Err(ConfigError::InvalidValue {
                field: "INBOX_DEFAULT_PAGE_SIZE",
                value: self.inbox.default_page_size.to_string(),
            });
        }

        if self.submissions.attempt_retry_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "ATTEMPT_RETRY_LIMIT",
                value: "0".to_string(),
            });
        }

        if self.submissions.grading_retry_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "GRADING_RETRY_LIMIT",
                value: "0".to_string(),
            });
        }

        if !(self.runtime.strict_config || self.runtime.environment.is_production()) {
            return Ok(());
        }

        if self.database.database_url.is_none() && self.database.postgres_password.is_empty() {
            return Err(ConfigError::MissingSecret("POSTGRES_PASSWORD"));
        }

        Ok(())
    }
}
