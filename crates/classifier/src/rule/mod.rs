//! 규칙 레지스트리 -- 고정된 순서의 분류 규칙
//!
//! 네 개의 내장 규칙을 정해진 순서로 보관합니다. 순서는 계약의 일부입니다:
//! 한 라인이 여러 패턴에 매칭될 수 있으면 앞선 규칙이 이깁니다.
//!
//! | 순서 | ID | 이벤트 |
//! |---|---|---|
//! | 1 | `fail_unknown` | [`EventKind::FailUnknownUser`] |
//! | 2 | `fail_invalid` | [`EventKind::FailInvalidUser`] |
//! | 3 | `success` | [`EventKind::LoginSuccess`] |
//! | 4 | `privilege_escalation` | [`EventKind::PrivilegeEscalation`] |
//!
//! # 아키텍처
//! - [`RuleRegistry`]: 컴파일된 규칙 목록과 first-match-wins 평가
//! - [`matcher`]: 타임스탬프 접두사 조립 및 정규식 컴파일
//! - [`types`]: 규칙 선언/추출기 데이터 구조

pub mod matcher;
pub mod types;

pub use matcher::{RuleMatcher, TIMESTAMP_PATTERN};
pub use types::{Extractor, FieldRecipe, FieldSource, Rule, RuleDefinition};

use authscan_core::types::{AuthEvent, EventKind, LOCAL_ADDRESS, UNKNOWN_ADDRESS, UNKNOWN_USER};
use tracing::debug;

use crate::error::ClassifierError;

/// 내장 규칙 선언 (평가 순서)
///
/// `fail_unknown`의 `ruser=` 값은 캡처하지 않습니다. 이 규칙은 `ruser`가
/// 비어 있는 형식에서만 매칭되며, 다른 인증 실패 변형과 구분하는 데만 쓰입니다.
pub const BUILTIN_RULES: [RuleDefinition; 4] = [
    RuleDefinition {
        id: "fail_unknown",
        title: "SSH authentication failure",
        kind: EventKind::FailUnknownUser,
        body: r".*sshd.*authentication failure.*ruser=\s*rhost=([^\s]+).*user=([^\s]+)",
        extractor: Extractor {
            user: FieldRecipe::capture(3, UNKNOWN_USER),
            source_address: FieldRecipe::capture(2, UNKNOWN_ADDRESS),
        },
    },
    RuleDefinition {
        id: "fail_invalid",
        title: "Display manager bad username",
        kind: EventKind::FailInvalidUser,
        body: r".*gdm.*bad username \[([^\]]*)\]",
        extractor: Extractor {
            user: FieldRecipe::capture(2, UNKNOWN_USER),
            source_address: FieldRecipe::absent(UNKNOWN_ADDRESS),
        },
    },
    RuleDefinition {
        id: "success",
        title: "SSH session opened",
        kind: EventKind::LoginSuccess,
        body: r".*sshd.*session opened for user (\w+).*rhost=([^\s]+)",
        extractor: Extractor {
            user: FieldRecipe::capture(2, UNKNOWN_USER),
            source_address: FieldRecipe::capture(3, UNKNOWN_ADDRESS),
        },
    },
    RuleDefinition {
        id: "privilege_escalation",
        title: "su session opened",
        kind: EventKind::PrivilegeEscalation,
        body: r".*su.*session opened for user (\w+).*by.*uid=\d+",
        extractor: Extractor {
            user: FieldRecipe::capture(2, UNKNOWN_USER),
            source_address: FieldRecipe::constant(LOCAL_ADDRESS),
        },
    },
];

/// 규칙 레지스트리
///
/// 프로세스 시작 시 한 번 만들어지고 이후 읽기 전용입니다.
/// 규칙 순서는 재정렬되지 않습니다.
///
/// # 사용 예시
/// ```
/// use authscan_classifier::rule::RuleRegistry;
///
/// let registry = RuleRegistry::builtin()?;
/// assert_eq!(registry.len(), 4);
/// # Ok::<(), authscan_classifier::ClassifierError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
}

impl RuleRegistry {
    /// 내장 규칙으로 레지스트리를 만듭니다.
    pub fn builtin() -> Result<Self, ClassifierError> {
        Self::from_definitions(&BUILTIN_RULES)
    }

    /// 선언 목록을 순서대로 컴파일합니다.
    pub(crate) fn from_definitions(
        definitions: &[RuleDefinition],
    ) -> Result<Self, ClassifierError> {
        let rules = definitions
            .iter()
            .map(|def| RuleMatcher::compile(def).map(|matcher| Rule::new(*def, matcher)))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(rule_count = rules.len(), "rule registry compiled");
        Ok(Self { rules })
    }

    /// 평가 순서대로 정렬된 규칙
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// 규칙 수
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// 규칙이 없는지 여부
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// 이벤트 종류로 규칙을 찾습니다.
    pub fn get(&self, kind: EventKind) -> Option<&Rule> {
        self.rules.iter().find(|r| r.kind() == kind)
    }

    /// 첫 번째로 매칭되는 규칙의 이벤트를 반환합니다.
    ///
    /// 매칭되면 이후 규칙은 평가하지 않습니다.
    pub fn first_match(&self, line: &str) -> Option<AuthEvent> {
        self.rules.iter().find_map(|rule| rule.apply(line))
    }
}
