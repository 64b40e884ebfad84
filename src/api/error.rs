//! Tipos de erro para o cliente da API de pipelines.
//!
//! Usa `thiserror` para derivar `Display` e `Error` a partir dos
//! atributos `#[error(...)]`.

use thiserror::Error;

/// Erros que podem ocorrer ao falar com o backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// O backend respondeu com um status HTTP de erro (4xx/5xx).
    /// Contém o código e o corpo da resposta.
    #[error("API error (status {status}): {message}")]
    Status { status: u16, message: String },

    /// Falha de rede ou de decodificação do corpo.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ApiError {
    /// Erros 5xx e de rede podem ser tentados novamente pelo operador.
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Status { status, .. } => *status >= 500,
            ApiError::Network(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_display() {
        let err = ApiError::Status {
            status: 409,
            message: "status changed by another user".into(),
        };
        assert_eq!(
            err.to_string(),
            "API error (status 409): status changed by another user"
        );
    }

    #[test]
    fn server_errors_are_transient() {
        let server = ApiError::Status {
            status: 503,
            message: String::new(),
        };
        let client = ApiError::Status {
            status: 422,
            message: String::new(),
        };
        assert!(server.is_transient());
        assert!(!client.is_transient());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ApiError>();
    }
}
