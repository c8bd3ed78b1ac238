//! 에러 타입 -- 도메인별 에러 정의
//!
//! 라인 분류 자체는 에러를 만들지 않습니다 (매칭 실패는 `None`).
//! 여기의 에러는 설정 로딩과 로그 소스 I/O 경계에서만 발생합니다.

/// authscan 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum AuthscanError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 규칙/분류기 초기화 에러
    #[error("classifier error: {0}")]
    Classifier(String),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
