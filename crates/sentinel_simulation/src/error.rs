//! Setup errors - misconfiguration валится при активации врага, а не молча в рантайме

use thiserror::Error;

/// Ошибка конфигурации при спавне врага / запуске симуляции
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SetupError {
    #[error("navigation backend is not installed (NavigationBackend resource missing)")]
    MissingNavigation,

    #[error("perception geometry backend is not installed (GeometryBackend resource missing)")]
    MissingGeometry,

    #[error("invalid enemy senses: {reason}")]
    InvalidSenses { reason: String },

    #[error("invalid footprint settings: {reason}")]
    InvalidSettings { reason: String },
}

impl SetupError {
    pub fn senses(reason: impl Into<String>) -> Self {
        Self::InvalidSenses {
            reason: reason.into(),
        }
    }

    pub fn settings(reason: impl Into<String>) -> Self {
        Self::InvalidSettings {
            reason: reason.into(),
        }
    }
}
