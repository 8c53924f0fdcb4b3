//! 에러 타입 -- 도메인별 에러 정의
//!
//! 단언(assertion) 실패는 에러가 아니라 [`crate::check::Check`] 데이터로
//! 기록됩니다. 여기의 에러는 설정 오류와 전송 계층 실패만 다룹니다.

/// Meshprobe 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum MeshprobeError {
    /// 설정 관련 에러 (네트워크 호출 전에 발생, 치명적)
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 백엔드 접속 실패 (해당 체크만 실패 처리, 실행은 계속)
    #[error("connectivity error: {0}")]
    Connectivity(#[from] ConnectivityError),

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

    /// gateway host와 port는 반드시 함께 설정되어야 함
    #[error("both target.gateway_host and target.gateway_port must be configured together")]
    GatewayPairIncomplete,
}

/// 전송 계층 접속 실패
///
/// RPC 대상에 도달하지 못한 경우입니다. 실행을 중단하지 않고
/// 해당 페이즈의 체크들을 실패로 기록하는 데 사용됩니다.
#[derive(Debug, thiserror::Error)]
#[error("cannot reach {target}: {reason}")]
pub struct ConnectivityError {
    /// 접속 대상 (`host:port`)
    pub target: String,
    /// 실패 사유
    pub reason: String,
}

impl ConnectivityError {
    /// 접속 대상과 사유로 에러를 생성합니다.
    pub fn new(target: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            reason: reason.into(),
        }
    }
}
