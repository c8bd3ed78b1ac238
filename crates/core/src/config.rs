//! 설정 관리 -- authscan.toml 파싱 및 런타임 설정
//!
//! [`AuthscanConfig`]는 모든 설정을 담는 최상위 구조체입니다.
//! 분류 규칙은 컴파일 시점에 고정되어 있으므로 설정 대상이 아닙니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`AUTHSCAN_SCAN_INPUT=/var/log/auth.log` 형식)
//! 3. 설정 파일 (`authscan.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), authscan_core::error::AuthscanError> {
//! use authscan_core::config::AuthscanConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = AuthscanConfig::load("authscan.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = AuthscanConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{AuthscanError, ConfigError};

/// 기본 최대 라인 길이 (64KB)
pub const DEFAULT_MAX_LINE_LENGTH: usize = 64 * 1024;

/// authscan 통합 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthscanConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 스캔 설정
    #[serde(default)]
    pub scan: ScanConfig,
}

impl AuthscanConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, AuthscanError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일이 없으면 기본값에 환경변수 오버라이드만 적용합니다.
    ///
    /// 파일이 있지만 파싱/검증에 실패하면 에러를 반환합니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, AuthscanError> {
        let path = path.as_ref();
        match Self::load(path).await {
            Err(AuthscanError::Config(ConfigError::FileNotFound { .. })) => {
                debug!(path = %path.display(), "config file not found, using defaults");
                let mut config = Self::default();
                config.apply_env_overrides();
                config.validate()?;
                Ok(config)
            }
            other => other,
        }
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, AuthscanError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AuthscanError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                AuthscanError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, AuthscanError> {
        toml::from_str(toml_str).map_err(|e| {
            AuthscanError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `AUTHSCAN_{SECTION}_{FIELD}`
    pub fn apply_env_overrides(&mut self) {
        override_string(&mut self.general.log_level, "AUTHSCAN_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "AUTHSCAN_GENERAL_LOG_FORMAT");

        override_string(&mut self.scan.input, "AUTHSCAN_SCAN_INPUT");
        override_usize(
            &mut self.scan.max_line_length,
            "AUTHSCAN_SCAN_MAX_LINE_LENGTH",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), AuthscanError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        if self.scan.input.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "scan.input".to_owned(),
                reason: "input path must not be empty".to_owned(),
            }
            .into());
        }

        if self.scan.max_line_length == 0 {
            return Err(ConfigError::InvalidValue {
                field: "scan.max_line_length".to_owned(),
                reason: "must be greater than 0".to_owned(),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 스캔 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// 기본 입력 로그 파일 경로
    pub input: String,
    /// 최대 라인 길이 (바이트). 초과하는 라인은 건너뜁니다.
    pub max_line_length: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            input: "Auth.log".to_owned(),
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_usize(target: &mut usize, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<usize>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse usize from env var, ignoring"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn default_config_has_sane_values() {
        let config = AuthscanConfig::default();
        assert_eq!(config.general.log_level, "warn");
        assert_eq!(config.general.log_format, "pretty");
        assert_eq!(config.scan.input, "Auth.log");
        assert_eq!(config.scan.max_line_length, 64 * 1024);
    }

    #[test]
    fn default_config_passes_validation() {
        AuthscanConfig::default().validate().unwrap();
    }

    #[test]
    fn from_str_empty_toml_uses_defaults() {
        let config = AuthscanConfig::parse("").unwrap();
        config.validate().unwrap();
        assert_eq!(config.scan.input, "Auth.log");
    }

    #[test]
    fn from_str_partial_toml_merges_with_defaults() {
        let config = AuthscanConfig::parse("[scan]\ninput = \"/var/log/auth.log\"").unwrap();
        assert_eq!(config.scan.input, "/var/log/auth.log");
        assert_eq!(config.scan.max_line_length, DEFAULT_MAX_LINE_LENGTH);
        assert_eq!(config.general.log_level, "warn");
    }

    #[test]
    fn from_str_invalid_toml_returns_error() {
        let err = AuthscanConfig::parse("[general\nlog_level = 1").unwrap_err();
        assert!(matches!(
            err,
            AuthscanError::Config(ConfigError::ParseFailed { .. })
        ));
    }

    #[test]
    fn validate_rejects_invalid_log_level() {
        let mut config = AuthscanConfig::default();
        config.general.log_level = "loud".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("general.log_level"));
    }

    #[test]
    fn validate_rejects_invalid_log_format() {
        let mut config = AuthscanConfig::default();
        config.general.log_format = "xml".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("general.log_format"));
    }

    #[test]
    fn validate_rejects_empty_input() {
        let mut config = AuthscanConfig::default();
        config.scan.input = "  ".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("scan.input"));
    }

    #[test]
    fn validate_rejects_zero_max_line_length() {
        let mut config = AuthscanConfig::default();
        config.scan.max_line_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn env_override_string() {
        let mut val = "original".to_owned();
        // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 다른 테스트와 겹치지 않습니다.
        unsafe { std::env::set_var("TEST_AUTHSCAN_STR", "overridden") };
        override_string(&mut val, "TEST_AUTHSCAN_STR");
        assert_eq!(val, "overridden");
        unsafe { std::env::remove_var("TEST_AUTHSCAN_STR") };
    }

    #[test]
    #[serial]
    fn env_override_usize_invalid_keeps_original() {
        let mut val = 10usize;
        // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 다른 테스트와 겹치지 않습니다.
        unsafe { std::env::set_var("TEST_AUTHSCAN_USIZE_BAD", "many") };
        override_usize(&mut val, "TEST_AUTHSCAN_USIZE_BAD");
        assert_eq!(val, 10);
        unsafe { std::env::remove_var("TEST_AUTHSCAN_USIZE_BAD") };
    }

    #[test]
    #[serial]
    fn apply_env_overrides_scan_section() {
        let mut config = AuthscanConfig::default();
        // SAFETY: serial 테스트로 실행되므로 환경변수 조작이 다른 테스트와 겹치지 않습니다.
        unsafe {
            std::env::set_var("AUTHSCAN_SCAN_INPUT", "/tmp/secure");
            std::env::set_var("AUTHSCAN_SCAN_MAX_LINE_LENGTH", "4096");
        }
        config.apply_env_overrides();
        unsafe {
            std::env::remove_var("AUTHSCAN_SCAN_INPUT");
            std::env::remove_var("AUTHSCAN_SCAN_MAX_LINE_LENGTH");
        }
        assert_eq!(config.scan.input, "/tmp/secure");
        assert_eq!(config.scan.max_line_length, 4096);
    }

    #[test]
    fn env_override_missing_var_keeps_original() {
        let mut val = "original".to_owned();
        override_string(&mut val, "TEST_AUTHSCAN_NONEXISTENT_12345");
        assert_eq!(val, "original");
    }

    #[test]
    fn config_serialize_roundtrip() {
        let config = AuthscanConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = AuthscanConfig::parse(&toml_str).unwrap();
        assert_eq!(config.general.log_level, parsed.general.log_level);
        assert_eq!(config.scan.input, parsed.scan.input);
    }

    #[tokio::test]
    async fn from_file_not_found() {
        let err = AuthscanConfig::from_file("/nonexistent/path/authscan.toml")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AuthscanError::Config(ConfigError::FileNotFound { .. })
        ));
    }

    #[tokio::test]
    #[serial]
    async fn load_or_default_tolerates_missing_file() {
        let config = AuthscanConfig::load_or_default("/nonexistent/path/authscan.toml")
            .await
            .unwrap();
        assert_eq!(config.scan.max_line_length, DEFAULT_MAX_LINE_LENGTH);
    }
}
