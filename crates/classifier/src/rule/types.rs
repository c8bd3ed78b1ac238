//! 규칙 데이터 타입
//!
//! [`RuleDefinition`]은 컴파일 시점에 고정된 정적 규칙 선언이고,
//! [`Rule`]은 패턴이 컴파일된 실행 가능한 규칙입니다.

use authscan_core::types::{AuthEvent, EventKind};
use regex::Captures;

use super::matcher::RuleMatcher;

/// 정적 규칙 선언
///
/// `body`는 공통 타임스탬프 접두사 뒤에 이어지는 패턴 본문입니다.
/// 캡처 그룹 1번은 항상 타임스탬프이므로 본문의 첫 그룹은 2번이 됩니다.
#[derive(Debug, Clone, Copy)]
pub struct RuleDefinition {
    /// 규칙 고유 ID
    pub id: &'static str,
    /// 규칙 제목
    pub title: &'static str,
    /// 생성할 이벤트 종류
    pub kind: EventKind,
    /// 타임스탬프 접두사 뒤의 패턴 본문
    pub body: &'static str,
    /// 필드 추출 방법
    pub extractor: Extractor,
}

/// 필드 값의 출처
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    /// 지정한 캡처 그룹
    Capture(usize),
    /// 규칙이 정한 고정 값
    Constant(&'static str),
    /// 캡처하지 않음 (항상 기본값)
    Absent,
}

/// 필드 하나의 추출 방법과 기본값
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRecipe {
    /// 값의 출처
    pub source: FieldSource,
    /// 캡처가 비었거나 없을 때 사용하는 값
    pub default: &'static str,
}

impl FieldRecipe {
    /// 캡처 그룹에서 값을 가져오고, 비어 있으면 `default`를 사용합니다.
    pub const fn capture(group: usize, default: &'static str) -> Self {
        Self {
            source: FieldSource::Capture(group),
            default,
        }
    }

    /// 항상 같은 값을 사용합니다.
    pub const fn constant(value: &'static str) -> Self {
        Self {
            source: FieldSource::Constant(value),
            default: value,
        }
    }

    /// 캡처하지 않는 필드. 항상 `default`가 됩니다.
    pub const fn absent(default: &'static str) -> Self {
        Self {
            source: FieldSource::Absent,
            default,
        }
    }

    /// 참조하는 캡처 그룹 번호
    pub fn group(&self) -> Option<usize> {
        match self.source {
            FieldSource::Capture(group) => Some(group),
            _ => None,
        }
    }

    /// 매칭 결과에서 필드 값을 결정합니다.
    ///
    /// 빈 문자열과 참여하지 않은 그룹은 모두 기본값으로 정규화됩니다.
    pub fn resolve(&self, caps: &Captures<'_>) -> String {
        match self.source {
            FieldSource::Capture(group) => caps
                .get(group)
                .map(|m| m.as_str())
                .filter(|s| !s.is_empty())
                .unwrap_or(self.default)
                .to_owned(),
            FieldSource::Constant(value) => value.to_owned(),
            FieldSource::Absent => self.default.to_owned(),
        }
    }
}

/// 캡처 위치 -> 이벤트 필드 매핑
///
/// 타임스탬프는 항상 그룹 1에서 그대로 가져오므로 여기에 포함되지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extractor {
    /// 사용자명
    pub user: FieldRecipe,
    /// 출발지 주소
    pub source_address: FieldRecipe,
}

impl Extractor {
    /// 참조하는 가장 큰 캡처 그룹 번호
    pub fn max_group(&self) -> usize {
        [self.user.group(), self.source_address.group()]
            .into_iter()
            .flatten()
            .max()
            .unwrap_or(1)
    }
}

/// 컴파일된 규칙
#[derive(Debug, Clone)]
pub struct Rule {
    definition: RuleDefinition,
    matcher: RuleMatcher,
}

impl Rule {
    pub(crate) fn new(definition: RuleDefinition, matcher: RuleMatcher) -> Self {
        Self {
            definition,
            matcher,
        }
    }

    /// 규칙 ID
    pub fn id(&self) -> &'static str {
        self.definition.id
    }

    /// 규칙 제목
    pub fn title(&self) -> &'static str {
        self.definition.title
    }

    /// 생성하는 이벤트 종류
    pub fn kind(&self) -> EventKind {
        self.definition.kind
    }

    /// 필드 추출 방법
    pub fn extractor(&self) -> &Extractor {
        &self.definition.extractor
    }

    /// 타임스탬프 접두사를 포함한 전체 패턴
    pub fn pattern(&self) -> &str {
        self.matcher.pattern()
    }

    /// 라인에 규칙을 적용합니다. 매칭되지 않으면 `None`.
    pub fn apply(&self, line: &str) -> Option<AuthEvent> {
        let caps = self.matcher.captures(line)?;
        let timestamp = caps.get(1).map_or("", |m| m.as_str());
        let extractor = &self.definition.extractor;
        Some(AuthEvent::new(
            self.definition.kind,
            timestamp,
            extractor.user.resolve(&caps),
            extractor.source_address.resolve(&caps),
        ))
    }
}
