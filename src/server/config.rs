use crate::server::error::config::ConfigError;

const DEFAULT_JWT_HEADER: &str = "Authorization";
const DEFAULT_BUILDER_TIMEOUT_SECONDS: u64 = 60;
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Application configuration read from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    /// Base URL the document builder service uses to reach this server, ends with `/`
    pub app_url: String,
    /// Base URL of the document builder service, ends with `/`
    pub doc_server_url: String,
    /// Shared secret used to sign builder jobs, signing is disabled when unset
    pub doc_server_jwt_secret: Option<String>,
    pub doc_server_jwt_header: String,
    /// Secret used to sign security tokens handed to the builder service
    pub internal_jwt_secret: String,
    /// Lifetime of security tokens in seconds, tokens never expire when unset
    pub security_token_ttl: Option<u64>,
    pub builder_timeout: u64,
    pub bind_address: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());
        let required = |var: &str| optional(var).ok_or(ConfigError::MissingEnvVar(var.to_string()));

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            app_url: with_trailing_slash(required("APP_URL")?),
            doc_server_url: with_trailing_slash(required("DOC_SERVER_URL")?),
            doc_server_jwt_secret: optional("DOC_SERVER_JWT_SECRET"),
            doc_server_jwt_header: optional("DOC_SERVER_JWT_HEADER")
                .unwrap_or_else(|| DEFAULT_JWT_HEADER.to_string()),
            internal_jwt_secret: required("INTERNAL_JWT_SECRET")?,
            security_token_ttl: optional("SECURITY_TOKEN_TTL_SECONDS")
                .map(|value| parse_seconds("SECURITY_TOKEN_TTL_SECONDS", &value))
                .transpose()?,
            builder_timeout: optional("BUILDER_TIMEOUT_SECONDS")
                .map(|value| parse_seconds("BUILDER_TIMEOUT_SECONDS", &value))
                .transpose()?
                .unwrap_or(DEFAULT_BUILDER_TIMEOUT_SECONDS),
            bind_address: optional("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
        })
    }

    /// Endpoint accepting builder jobs
    pub fn docbuilder_url(&self) -> String {
        format!("{}docbuilder", self.doc_server_url)
    }
}

fn with_trailing_slash(url: String) -> String {
    if url.ends_with('/') {
        url
    } else {
        format!("{}/", url)
    }
}

fn parse_seconds(var: &str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(seconds) if seconds > 0 => Ok(seconds),
        Ok(_) => Err(ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: "must be greater than zero".to_string(),
        }),
        Err(e) => Err(ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: e.to_string(),
        }),
    }
}
