//! 규칙 매칭 로직 -- 패턴 조립 및 컴파일
//!
//! 모든 규칙 패턴은 공통 타임스탬프 접두사 [`TIMESTAMP_PATTERN`]으로 시작합니다.
//! 접두사와 본문은 레지스트리 초기화 시 한 번만 조립/컴파일되며
//! 라인마다 다시 만들지 않습니다.

use regex::{Captures, Regex, RegexBuilder};

use super::types::RuleDefinition;
use crate::error::ClassifierError;

/// 라인 시작의 syslog 타임스탬프 (`Jan 16 04:56:52`, 연도 없음)
///
/// 캡처 그룹 1번이 됩니다.
pub const TIMESTAMP_PATTERN: &str = r"^([A-Za-z]{3}\s+\d{1,2}\s+\d{2}:\d{2}:\d{2})";

/// 타임스탬프 접두사와 규칙 본문을 하나의 패턴으로 조립합니다.
pub fn compose_pattern(body: &str) -> String {
    format!("{TIMESTAMP_PATTERN}{body}")
}

/// 컴파일된 규칙 매처
///
/// 대소문자를 구분하지 않으며, 라인 전체가 아니라 어디서든 매칭되면 성공입니다
/// (타임스탬프만 라인 시작에 고정).
#[derive(Debug, Clone)]
pub struct RuleMatcher {
    regex: Regex,
}

impl RuleMatcher {
    /// 규칙 선언을 컴파일합니다.
    ///
    /// 패턴이 유효하지 않거나, 추출기가 패턴에 없는 캡처 그룹을 참조하면
    /// 에러를 반환합니다.
    pub fn compile(definition: &RuleDefinition) -> Result<Self, ClassifierError> {
        let pattern = compose_pattern(definition.body);
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| ClassifierError::RuleCompile {
                rule_id: definition.id.to_owned(),
                reason: e.to_string(),
            })?;

        // captures_len()은 그룹 0(전체 매칭)을 포함합니다.
        let max_group = definition.extractor.max_group();
        if max_group >= regex.captures_len() {
            return Err(ClassifierError::RuleCompile {
                rule_id: definition.id.to_owned(),
                reason: format!(
                    "extractor references group {max_group} but pattern has {} groups",
                    regex.captures_len() - 1
                ),
            });
        }

        Ok(Self { regex })
    }

    /// 전체 패턴 문자열
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// 라인에 대해 매칭을 시도합니다.
    pub fn captures<'h>(&self, line: &'h str) -> Option<Captures<'h>> {
        self.regex.captures(line)
    }

    /// 매칭 여부만 확인합니다.
    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }
}
