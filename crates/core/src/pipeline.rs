//! 파이프라인 trait -- 분류기와 리포트 렌더러의 경계

use crate::types::AuthEvent;

/// 라인 분류 trait
///
/// 한 줄을 받아 최대 하나의 이벤트를 돌려줍니다.
/// 구현은 순수 함수여야 합니다: 같은 입력에는 항상 같은 결과를 반환하고
/// 어떤 입력에도 패닉하거나 에러를 내지 않습니다.
pub trait LineClassifier: Send + Sync {
    /// 한 줄을 분류합니다. 관련 없는 라인이면 `None`.
    fn classify(&self, line: &str) -> Option<AuthEvent>;
}

/// 분류된 이벤트를 소비하는 trait
///
/// 이벤트는 소스 순서대로 전달됩니다.
pub trait ReportSink {
    /// 싱크 에러 타입
    type Error;

    /// 이벤트 하나를 받습니다.
    fn accept(&mut self, event: AuthEvent) -> Result<(), Self::Error>;
}

impl ReportSink for Vec<AuthEvent> {
    type Error = std::convert::Infallible;

    fn accept(&mut self, event: AuthEvent) -> Result<(), Self::Error> {
        self.push(event);
        Ok(())
    }
}
