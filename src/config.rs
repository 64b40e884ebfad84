//! Configuração carregada a partir de `fidc.toml`.
//!
//! A struct [`FidcConfig`] contém todos os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! As variáveis `FIDC_API_URL` e `FIDC_API_TOKEN` têm precedência sobre o arquivo.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::pipeline::GatingPolicy;

pub const DEFAULT_CONFIG_FILE: &str = "fidc.toml";

/// Configuração de nível superior carregada de `fidc.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct FidcConfig {
    /// URL base da API de pipelines.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Token enviado como `Authorization: Bearer`.
    #[serde(default)]
    pub api_token: String,

    /// Timeout de cada requisição, em segundos.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Dias no mesmo status a partir dos quais o card é destacado no quadro.
    #[serde(default = "default_stale_after_days")]
    pub stale_after_days: u32,

    /// Como itens pendentes bloqueiam transições.
    #[serde(default)]
    pub gating_policy: GatingPolicy,
}

// Valor padrão da URL da API: backend local.
fn default_api_url() -> String {
    "http://localhost:3000/api".to_string()
}

// Valor padrão do timeout: 30s.
fn default_request_timeout_secs() -> u64 {
    30
}

// Valor padrão para destacar cards parados: 7 dias.
fn default_stale_after_days() -> u32 {
    7
}

impl Default for FidcConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_token: String::new(),
            request_timeout_secs: default_request_timeout_secs(),
            stale_after_days: default_stale_after_days(),
            gating_policy: GatingPolicy::default(),
        }
    }
}

impl FidcConfig {
    /// Carrega `fidc.toml` do diretório atual, ou os defaults se não existir.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Carrega a configuração de `path`. Usa valores padrão se o arquivo não existir.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            toml::from_str::<FidcConfig>(&contents)
                .with_context(|| format!("invalid config in {}", path.display()))?
        } else {
            Self::default()
        };

        config.apply_env(|key| std::env::var(key).ok());
        config
            .validate()
            .with_context(|| format!("invalid config in {}", path.display()))?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than zero");
        }
        Ok(())
    }

    /// Variáveis de ambiente têm precedência sobre o arquivo. Valores vazios são ignorados.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("FIDC_API_URL").filter(|v| !v.is_empty()) {
            self.api_url = url;
        }
        if let Some(token) = lookup("FIDC_API_TOKEN").filter(|v| !v.is_empty()) {
            self.api_token = token;
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn api_token(&self) -> Option<String> {
        if self.api_token.is_empty() {
            None
        } else {
            Some(self.api_token.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_values() {
        let config = FidcConfig::default();
        assert_eq!(config.api_url, "http://localhost:3000/api");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.stale_after_days, 7);
        assert_eq!(config.gating_policy, GatingPolicy::Strict);
        assert!(config.api_token().is_none());
    }

    #[test]
    fn deserialize_partial_toml() {
        let toml_str = r#"
            api_url = "https://backend.gestora.com.br/api"
            gating_policy = "terminal_bypass"
        "#;
        let config: FidcConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api_url, "https://backend.gestora.com.br/api");
        assert_eq!(config.gating_policy, GatingPolicy::TerminalBypass);
        assert_eq!(config.stale_after_days, 7);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "stale_after_days = 14\nrequest_timeout_secs = 5").unwrap();

        let config = FidcConfig::load_from(file.path()).unwrap();
        assert_eq!(config.stale_after_days, 14);
        assert_eq!(config.request_timeout_secs, 5);
    }

    #[test]
    fn load_from_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = FidcConfig::load_from(&dir.path().join("fidc.toml")).unwrap();
        assert_eq!(config.stale_after_days, 7);
    }

    #[test]
    fn load_from_invalid_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gating_policy = \"sometimes\"").unwrap();
        assert!(FidcConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn load_from_rejects_zero_timeout() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "request_timeout_secs = 0").unwrap();

        let err = FidcConfig::load_from(file.path()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("invalid config in"), "{message}");
        assert!(message.contains("request_timeout_secs must be greater than zero"), "{message}");
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = FidcConfig::default();
        config.apply_env(|key| match key {
            "FIDC_API_URL" => Some("http://staging/api".into()),
            "FIDC_API_TOKEN" => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.api_url, "http://staging/api");
        assert!(config.api_token.is_empty());
    }
}
