//! 파일 기반 로그 소스
//!
//! 로그 파일을 처음부터 끝까지 한 줄씩 순서대로 읽습니다.
//! 실시간 추적(`tail -f`)이나 로테이션 처리는 하지 않습니다.
//!
//! - UTF-8이 아닌 바이트는 버립니다 (대체 문자를 넣지 않고, 에러로 중단하지도 않음)
//! - 최대 길이를 넘는 라인은 건너뛰고 개수만 기록합니다

use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use authscan_core::config::DEFAULT_MAX_LINE_LENGTH;

use crate::error::ClassifierError;

/// 순서대로 라인을 공급하는 로그 소스
pub struct LogSource {
    /// 소스 이름 (파일 경로 등)
    name: String,
    reader: Box<dyn AsyncBufRead + Unpin + Send>,
    /// 최대 라인 길이 (바이트, 개행 제외)
    max_line_length: usize,
    /// 지금까지 읽은 라인 번호
    line_no: u64,
    /// 길이 초과로 건너뛴 라인 수
    skipped: u64,
    buf: Vec<u8>,
}

impl LogSource {
    /// 로그 파일을 엽니다.
    ///
    /// 파일이 없으면 [`ClassifierError::SourceNotFound`]를 반환합니다.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let file = File::open(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ClassifierError::SourceNotFound {
                    path: path.display().to_string(),
                }
            } else {
                ClassifierError::Io(e)
            }
        })?;
        debug!(path = %path.display(), "log source opened");
        Ok(Self::from_reader(
            path.display().to_string(),
            BufReader::new(file),
        ))
    }

    /// 임의의 비동기 리더로 소스를 만듭니다.
    pub fn from_reader(
        name: impl Into<String>,
        reader: impl AsyncBufRead + Unpin + Send + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            reader: Box::new(reader),
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            line_no: 0,
            skipped: 0,
            buf: Vec::new(),
        }
    }

    /// 최대 라인 길이를 설정합니다.
    pub fn with_max_line_length(mut self, max: usize) -> Result<Self, ClassifierError> {
        if max == 0 {
            return Err(ClassifierError::Config {
                field: "max_line_length".to_owned(),
                reason: "must be greater than 0".to_owned(),
            });
        }
        self.max_line_length = max;
        Ok(self)
    }

    /// 소스 이름
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 길이 초과로 건너뛴 라인 수
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// 다음 라인을 읽습니다. 입력이 끝나면 `None`.
    ///
    /// 반환되는 라인에는 줄바꿈 문자가 포함되지 않습니다.
    pub async fn next_line(&mut self) -> Result<Option<String>, ClassifierError> {
        loop {
            self.buf.clear();
            let n = self.reader.read_until(b'\n', &mut self.buf).await?;
            if n == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            while matches!(self.buf.last(), Some(b'\n' | b'\r')) {
                self.buf.pop();
            }

            if self.buf.len() > self.max_line_length {
                self.skipped += 1;
                warn!(
                    source = %self.name,
                    line_no = self.line_no,
                    length = self.buf.len(),
                    max = self.max_line_length,
                    "line exceeds max length, skipping"
                );
                continue;
            }

            return Ok(Some(self.buf.utf8_chunks().map(|c| c.valid()).collect()));
        }
    }
}

impl std::fmt::Debug for LogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogSource")
            .field("name", &self.name)
            .field("max_line_length", &self.max_line_length)
            .field("line_no", &self.line_no)
            .field("skipped", &self.skipped)
            .finish_non_exhaustive()
    }
}
