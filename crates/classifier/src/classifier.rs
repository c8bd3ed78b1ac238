//! 라인 분류기
//!
//! [`Classifier`]는 한 줄을 받아 최대 하나의 [`AuthEvent`]를 돌려주는
//! 순수 함수입니다. 내부 상태를 바꾸지 않으므로 같은 라인에는 항상 같은
//! 결과를 반환합니다.
//!
//! # 알고리즘
//! 1. 라인 앞뒤 공백 제거 (내부 공백은 유지)
//! 2. 레지스트리 순서대로 규칙 평가 (대소문자 무시)
//! 3. 처음 매칭된 규칙의 이벤트 반환, 나머지 규칙은 평가하지 않음
//! 4. 아무 규칙도 매칭되지 않으면 `None` (에러 아님)

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, trace};

use authscan_core::pipeline::{LineClassifier, ReportSink};
use authscan_core::types::{AuthEvent, EventKind};

use crate::error::ClassifierError;
use crate::rule::RuleRegistry;
use crate::source::LogSource;

/// 인증 로그 라인 분류기
#[derive(Debug, Clone)]
pub struct Classifier {
    registry: RuleRegistry,
}

impl Classifier {
    /// 주어진 레지스트리로 분류기를 만듭니다.
    pub fn new(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    /// 내장 규칙으로 분류기를 만듭니다.
    pub fn builtin() -> Result<Self, ClassifierError> {
        Ok(Self::new(RuleRegistry::builtin()?))
    }

    /// 규칙 레지스트리
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// 한 줄을 분류합니다.
    pub fn classify(&self, line: &str) -> Option<AuthEvent> {
        let line = line.trim();
        let event = self.registry.first_match(line);
        match &event {
            Some(e) => debug!(kind = %e.kind(), user = e.user(), "line classified"),
            None => trace!("line ignored"),
        }
        event
    }

    /// 여러 줄을 순서대로 분류합니다.
    ///
    /// 매칭된 이벤트는 원래 라인 순서를 유지합니다.
    pub fn classify_all<I, S>(&self, lines: I) -> (Vec<AuthEvent>, ScanSummary)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut summary = ScanSummary::default();
        let mut events = Vec::new();
        for line in lines {
            summary.lines_read += 1;
            if let Some(event) = self.classify(line.as_ref()) {
                summary.record(event.kind());
                events.push(event);
            }
        }
        (events, summary)
    }

    /// 로그 소스의 모든 라인을 분류하여 싱크로 전달합니다.
    ///
    /// 소스 I/O 에러가 나면 즉시 중단합니다. 그 전에 전달된 이벤트는
    /// 싱크에 남아 있습니다.
    pub async fn scan_source<K>(
        &self,
        source: &mut LogSource,
        sink: &mut K,
    ) -> Result<ScanSummary, ClassifierError>
    where
        K: ReportSink,
        K::Error: std::fmt::Display,
    {
        let mut summary = ScanSummary::default();
        while let Some(line) = source.next_line().await? {
            summary.lines_read += 1;
            if let Some(event) = self.classify(&line) {
                summary.record(event.kind());
                sink.accept(event)
                    .map_err(|e| ClassifierError::Sink(e.to_string()))?;
            }
        }
        summary.lines_skipped = source.skipped();
        summary.lines_read += summary.lines_skipped;
        Ok(summary)
    }
}

impl LineClassifier for Classifier {
    fn classify(&self, line: &str) -> Option<AuthEvent> {
        Classifier::classify(self, line)
    }
}

/// 스캔 통계
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// 읽은 라인 수 (길이 초과로 건너뛴 라인 포함)
    pub lines_read: u64,
    /// 너무 길어서 건너뛴 라인 수
    pub lines_skipped: u64,
    /// 종류별 이벤트 수
    pub by_kind: BTreeMap<String, u64>,
}

impl ScanSummary {
    /// 분류된 이벤트 총 수
    pub fn events(&self) -> u64 {
        self.by_kind.values().sum()
    }

    /// 특정 종류의 이벤트 수
    pub fn count(&self, kind: EventKind) -> u64 {
        self.by_kind.get(kind.label()).copied().unwrap_or(0)
    }

    fn record(&mut self, kind: EventKind) {
        *self.by_kind.entry(kind.label().to_owned()).or_insert(0) += 1;
    }
}
