#![no_main]

use std::sync::LazyLock;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use authscan_classifier::Classifier;

/// 내장 규칙은 한 번만 컴파일한다
static CLASSIFIER: LazyLock<Classifier> =
    LazyLock::new(|| Classifier::builtin().expect("builtin rules should compile"));

/// 퍼저용 구조적 입력 (규칙 키워드 조각으로 라인을 조립)
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    with_timestamp: bool,
    day: u8,
    fragments: Vec<FuzzFragment>,
    tail: String,
}

#[derive(Arbitrary, Debug)]
enum FuzzFragment {
    Sshd,
    Gdm,
    Su,
    AuthFailure,
    BadUsername(String),
    SessionOpened(String),
    Rhost(String),
    User(String),
    Uid(u32),
    Raw(String),
}

impl FuzzFragment {
    fn render(&self) -> String {
        match self {
            FuzzFragment::Sshd => "sshd[1]:".to_owned(),
            FuzzFragment::Gdm => "gdm-password]:".to_owned(),
            FuzzFragment::Su => "su[2]:".to_owned(),
            FuzzFragment::AuthFailure => "authentication failure; ruser=".to_owned(),
            FuzzFragment::BadUsername(name) => format!("bad username [{name}]"),
            FuzzFragment::SessionOpened(name) => format!("session opened for user {name}"),
            FuzzFragment::Rhost(host) => format!("rhost={host}"),
            FuzzFragment::User(name) => format!("user={name}"),
            FuzzFragment::Uid(uid) => format!("by x(uid={uid})"),
            FuzzFragment::Raw(s) => s.clone(),
        }
    }
}

fuzz_target!(|input: FuzzInput| {
    let classifier = &*CLASSIFIER;

    let mut line = String::new();
    if input.with_timestamp {
        line.push_str(&format!("Jan {:>2} 04:56:52 host ", input.day % 31 + 1));
    }
    // 조각 수 제한 (성능)
    for fragment in input.fragments.iter().take(16) {
        line.push_str(&fragment.render());
        line.push(' ');
    }
    line.push_str(&input.tail);

    // 패닉 없이 분류되어야 하고, 매치되면 모든 필드가 채워져 있어야 한다
    if let Some(event) = classifier.classify(&line) {
        assert!(line.trim().starts_with(event.timestamp()));
        assert!(!event.user().is_empty());
        assert!(!event.source_address().is_empty());
    }
});
