//! 분류 엔진 에러 타입
//!
//! 라인 분류는 에러를 만들지 않습니다. [`ClassifierError`]는 규칙 레지스트리
//! 초기화와 로그 소스 I/O에서만 발생합니다.
//! `From<ClassifierError> for AuthscanError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 전파할 수 있습니다.

use authscan_core::error::{AuthscanError, ConfigError};

/// 분류 엔진 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// 내장 규칙 패턴 컴파일 실패
    #[error("rule compile error: rule '{rule_id}': {reason}")]
    RuleCompile {
        /// 문제가 된 규칙 ID
        rule_id: String,
        /// 실패 사유
        reason: String,
    },

    /// 입력 로그 파일을 찾을 수 없음
    #[error("log source not found: {path}")]
    SourceNotFound {
        /// 입력 파일 경로
        path: String,
    },

    /// 소스 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 리포트 싱크가 이벤트를 거부함
    #[error("report sink error: {0}")]
    Sink(String),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ClassifierError> for AuthscanError {
    fn from(err: ClassifierError) -> Self {
        match err {
            ClassifierError::Io(e) => AuthscanError::Io(e),
            ClassifierError::Config { field, reason } => {
                AuthscanError::Config(ConfigError::InvalidValue { field, reason })
            }
            other => AuthscanError::Classifier(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_compile_error_display() {
        let err = ClassifierError::RuleCompile {
            rule_id: "fail_unknown".to_owned(),
            reason: "unclosed group".to_owned(),
        };
        let msg = err.to_string();
        assert!(msg.contains("fail_unknown"));
        assert!(msg.contains("unclosed group"));
    }

    #[test]
    fn source_not_found_display() {
        let err = ClassifierError::SourceNotFound {
            path: "Auth.log".to_owned(),
        };
        assert_eq!(err.to_string(), "log source not found: Auth.log");
    }

    #[test]
    fn converts_to_authscan_error() {
        let err = ClassifierError::SourceNotFound {
            path: "Auth.log".to_owned(),
        };
        let top: AuthscanError = err.into();
        assert!(matches!(top, AuthscanError::Classifier(_)));
    }

    #[test]
    fn io_error_keeps_io_variant() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let top: AuthscanError = ClassifierError::Io(io).into();
        assert!(matches!(top, AuthscanError::Io(_)));
    }

    #[test]
    fn config_error_maps_to_invalid_value() {
        let err = ClassifierError::Config {
            field: "max_line_length".to_owned(),
            reason: "must be greater than 0".to_owned(),
        };
        let top: AuthscanError = err.into();
        assert!(matches!(
            top,
            AuthscanError::Config(ConfigError::InvalidValue { .. })
        ));
    }
}
