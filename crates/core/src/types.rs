//! 도메인 타입 -- 인증 로그 분류 결과
//!
//! 분류기가 생성하고 리포트 렌더러가 소비하는 데이터 구조를 정의합니다.
//! 한 번 생성된 [`AuthEvent`]는 변경되지 않습니다.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 사용자명이 비어 있거나 없을 때 사용하는 값
pub const UNKNOWN_USER: &str = "empty";

/// 출발지 주소를 캡처하지 않는 규칙의 기본값
pub const UNKNOWN_ADDRESS: &str = "unknown";

/// 로컬에서만 발생하는 이벤트(`su`)의 출발지 주소
pub const LOCAL_ADDRESS: &str = "localhost";

/// 인증 이벤트 종류
///
/// 선언 순서는 규칙 평가 순서와 같습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// sshd 인증 실패 (ruser 비어 있음)
    #[serde(rename = "fail_unknown")]
    FailUnknownUser,
    /// 디스플레이 매니저의 잘못된 사용자명 시도
    #[serde(rename = "fail_invalid")]
    FailInvalidUser,
    /// sshd 세션 열림
    #[serde(rename = "success")]
    LoginSuccess,
    /// `su` 세션 열림
    PrivilegeEscalation,
}

impl EventKind {
    /// 모든 종류 (규칙 평가 순서)
    pub const ALL: [EventKind; 4] = [
        Self::FailUnknownUser,
        Self::FailInvalidUser,
        Self::LoginSuccess,
        Self::PrivilegeEscalation,
    ];

    /// 리포트와 JSON에서 사용하는 안정적인 라벨
    pub fn label(self) -> &'static str {
        match self {
            Self::FailUnknownUser => "fail_unknown",
            Self::FailInvalidUser => "fail_invalid",
            Self::LoginSuccess => "success",
            Self::PrivilegeEscalation => "privilege_escalation",
        }
    }

    /// 문자열에서 이벤트 종류를 파싱합니다.
    ///
    /// 라벨(`fail_unknown`)과 변형 이름(`FailUnknownUser`)을 모두 받으며
    /// 대소문자를 구분하지 않습니다.
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "fail_unknown" | "failunknownuser" | "fail_unknown_user" => {
                Some(Self::FailUnknownUser)
            }
            "fail_invalid" | "failinvaliduser" | "fail_invalid_user" => {
                Some(Self::FailInvalidUser)
            }
            "success" | "loginsuccess" | "login_success" => Some(Self::LoginSuccess),
            "privilege_escalation" | "privilegeescalation" | "su" => {
                Some(Self::PrivilegeEscalation)
            }
            _ => None,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 분류된 인증 이벤트
///
/// 네 필드는 항상 채워져 있습니다. 캡처가 비어 있으면 규칙이 선언한
/// 기본값(`empty`, `unknown`, `localhost`)이 대신 들어갑니다.
/// 원본 라인이나 규칙에 대한 참조는 갖지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthEvent {
    kind: EventKind,
    timestamp: String,
    user: String,
    source_address: String,
}

impl AuthEvent {
    /// 새 이벤트를 생성합니다.
    pub fn new(
        kind: EventKind,
        timestamp: impl Into<String>,
        user: impl Into<String>,
        source_address: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            timestamp: timestamp.into(),
            user: user.into(),
            source_address: source_address.into(),
        }
    }

    /// 이벤트 종류
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// 라인에서 그대로 가져온 타임스탬프 (`Mon D HH:MM:SS`, 연도 없음)
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// 사용자명
    pub fn user(&self) -> &str {
        &self.user
    }

    /// 출발지 주소
    pub fn source_address(&self) -> &str {
        &self.source_address
    }
}

impl fmt::Display for AuthEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} user={} from={}",
            self.kind, self.timestamp, self.user, self.source_address,
        )
    }
}
