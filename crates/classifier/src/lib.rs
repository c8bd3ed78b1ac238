#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`rule`]: 고정 규칙 레지스트리 (타임스탬프 접두사 + 규칙별 패턴/추출기)
//! - [`classifier`]: first-match-wins 라인 분류기 및 스캔 통계
//! - [`source`]: 파일 기반 로그 소스 (순차 라인 공급)
//! - [`error`]: 도메인 에러 타입
//!
//! # 아키텍처
//!
//! ```text
//! LogSource -> Classifier -> RuleRegistry -> AuthEvent -> ReportSink
//!     |             |              |
//!  File/reader   trim + 순서 평가   fail_unknown / fail_invalid / success / privilege_escalation
//! ```

pub mod classifier;
pub mod error;
pub mod rule;
pub mod source;

// --- 주요 타입 re-export ---

// 분류기
pub use classifier::{Classifier, ScanSummary};

// 에러
pub use error::ClassifierError;

// 규칙
pub use rule::{Rule, RuleRegistry};

// 로그 소스
pub use source::LogSource;
