use std::path::{Path, PathBuf};

use super::parsing::{
    env_optional, env_or_default, parse_bool, parse_cors_origins, parse_environment,
    parse_optional_secs, parse_u16,
};
use super::types::{
    AiSettings, ConfigError, CorsSettings, DatabaseSettings, LoaderSettings, Role,
    RuntimeSettings, ServerHost, ServerPort, ServerSettings, Settings, TelemetrySettings,
};

const DEFAULT_AI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_AI_MODEL: &str = "gemini-2.0-flash-exp";

impl Settings {
    pub(crate) fn load(role: Role) -> Result<Self, ConfigError> {
        let host = env_or_default("APIHOST", "0.0.0.0");
        let port = env_optional("APIPORT").map(ServerPort::parse).transpose()?;

        let environment = parse_environment(env_optional("MATH_PRACTICE_ENV"));

        let cors_origins = parse_cors_origins(env_optional("BACKEND_CORS_ORIGINS"))?;

        let postgres_host = env_or_default("POSTGRES_HOST", "db");
        let postgres_port = parse_u16("POSTGRES_PORT", env_or_default("POSTGRES_PORT", "5432"))?;
        let postgres_user = env_or_default("POSTGRES_USER", "");
        let postgres_password = env_or_default("POSTGRES_PASSWORD", "");
        let postgres_db = env_or_default("POSTGRES_DB", "");
        let database_url = env_optional("DATABASE_URL");

        let api_key = env_or_default("APIKEY", "");
        let base_url = env_or_default("AI_BASE_URL", DEFAULT_AI_BASE_URL);
        let model = env_or_default("AI_MODEL", DEFAULT_AI_MODEL);
        let request_timeout =
            parse_optional_secs("AI_REQUEST_TIMEOUT", env_optional("AI_REQUEST_TIMEOUT"))?;

        let data_dir = PathBuf::from(env_or_default("LOADER_DATA_DIR", "./data"));

        let log_level = env_or_default("MATH_PRACTICE_LOG_LEVEL", "info");
        let json =
            env_optional("MATH_PRACTICE_LOG_JSON").map(|value| parse_bool(&value)).unwrap_or(false);

        let settings = Self {
            server: ServerSettings { host: ServerHost::parse(host)?, port },
            runtime: RuntimeSettings { environment },
            cors: CorsSettings { origins: cors_origins },
            database: DatabaseSettings {
                postgres_host,
                postgres_port,
                postgres_user,
                postgres_password,
                postgres_db,
                database_url,
            },
            ai: AiSettings { api_key, base_url, model, request_timeout },
            loader: LoaderSettings { data_dir },
            telemetry: TelemetrySettings { log_level, json },
        };

        settings.validate(role)?;
        Ok(settings)
    }

    pub(crate) fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host.0, self.server_port())
    }

    pub(crate) fn server_host(&self) -> &str {
        &self.server.host.0
    }

    /// Only meaningful for [`Role::Server`], where `validate` guarantees a port.
    pub(crate) fn server_port(&self) -> u16 {
        self.server.port.map(|port| port.0).unwrap_or_default()
    }

    pub(crate) fn cors(&self) -> &CorsSettings {
        &self.cors
    }

    pub(crate) fn database(&self) -> &DatabaseSettings {
        &self.database
    }

    pub(crate) fn ai(&self) -> &AiSettings {
        &self.ai
    }

    pub(crate) fn loader(&self) -> &LoaderSettings {
        &self.loader
    }

    pub(crate) fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    pub(crate) fn runtime(&self) -> &RuntimeSettings {
        &self.runtime
    }

    fn validate(&self, role: Role) -> Result<(), ConfigError> {
        if self.database.database_url.is_none() {
            if self.database.postgres_user.is_empty() {
                return Err(ConfigError::Missing("POSTGRES_USER"));
            }
            if self.database.postgres_password.is_empty() {
                return Err(ConfigError::Missing("POSTGRES_PASSWORD"));
            }
            if self.database.postgres_db.is_empty() {
                return Err(ConfigError::Missing("POSTGRES_DB"));
            }
        }

        match role {
            Role::Server => {
                if self.server.port.is_none() {
                    return Err(ConfigError::Missing("APIPORT"));
                }
                if self.ai.api_key.is_empty() {
                    return Err(ConfigError::Missing("APIKEY"));
                }
                if self.ai.base_url.is_empty() {
                    return Err(ConfigError::Missing("AI_BASE_URL"));
                }
            }
            Role::Loader => {
                if self.loader.data_dir.as_os_str().is_empty() || is_file(&self.loader.data_dir) {
                    return Err(ConfigError::InvalidValue {
                        field: "LOADER_DATA_DIR",
                        value: self.loader.data_dir.display().to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

fn is_file(path: &Path) -> bool {
    path.metadata().map(|meta| meta.is_file()).unwrap_or(false)
}
