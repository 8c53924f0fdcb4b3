//! 설정 관리 -- meshprobe.toml 파싱 및 런타임 설정
//!
//! [`MeshprobeConfig`]는 실행 대상 토폴로지와 픽스처 전략을 담는
//! 최상위 구조체입니다. 프로세스 시작 시 한 번 만들어 resolver와
//! 시나리오 러너에 명시적으로 전달합니다 (숨은 전역 상태 없음).
//!
//! # 설정 로딩 우선순위
//! 1. 환경변수 (`MESHPROBE_TARGET_MODE=direct` 형식)
//! 2. 설정 파일 (`meshprobe.toml`)
//! 3. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), meshprobe_core::error::MeshprobeError> {
//! use meshprobe_core::config::MeshprobeConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = MeshprobeConfig::load("meshprobe.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = MeshprobeConfig::parse("[target]\nmode = \"localhost\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, MeshprobeError};
use crate::topology::{DeploymentMode, Protocol};

/// Meshprobe 통합 설정
///
/// `meshprobe.toml` 파일의 최상위 구조를 나타냅니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeshprobeConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 실행 대상 토폴로지 설정
    #[serde(default)]
    pub target: TargetConfig,
    /// 픽스처 이름 전략 설정
    #[serde(default)]
    pub fixtures: FixturesConfig,
}

impl MeshprobeConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, MeshprobeError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 파일이 없으면 기본값에서 출발합니다.
    ///
    /// CI에서는 설정 파일 없이 환경변수만으로 실행하는 경우가 많으므로,
    /// 파일 부재는 경고만 남기고 계속합니다. 파싱/검증 실패는 그대로
    /// 에러입니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, MeshprobeError> {
        let path = path.as_ref();
        let mut config = match Self::from_file(path).await {
            Ok(config) => config,
            Err(MeshprobeError::Config(ConfigError::FileNotFound { .. })) => {
                warn!(path = %path.display(), "config file not found, using defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, MeshprobeError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MeshprobeError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                MeshprobeError::Io(e)
            }
        })?;
        Self::parse(&content)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, MeshprobeError> {
        toml::from_str(toml_str).map_err(|e| {
            MeshprobeError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `MESHPROBE_{SECTION}_{FIELD}`
    /// 예: `MESHPROBE_TARGET_MODE=api-gateway`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "MESHPROBE_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "MESHPROBE_GENERAL_LOG_FORMAT");

        // Target
        override_string(&mut self.target.mode, "MESHPROBE_TARGET_MODE");
        override_string(&mut self.target.protocol, "MESHPROBE_TARGET_PROTOCOL");
        override_opt_string(
            &mut self.target.gateway_host,
            "MESHPROBE_TARGET_GATEWAY_HOST",
        );
        override_opt_u16(
            &mut self.target.gateway_port,
            "MESHPROBE_TARGET_GATEWAY_PORT",
        );

        // Fixtures
        override_string(&mut self.fixtures.naming, "MESHPROBE_FIXTURES_NAMING");
    }

    /// 설정값의 유효성을 검증합니다.
    ///
    /// 네트워크 호출 전에 호출되며, 모순된 조합은 여기서 즉시
    /// 실패합니다 (fail fast).
    pub fn validate(&self) -> Result<(), MeshprobeError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_owned(),
                reason: format!("must be one of: {}", valid_levels.join(", ")),
            }
            .into());
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_format".to_owned(),
                reason: format!("must be one of: {}", valid_formats.join(", ")),
            }
            .into());
        }

        // mode / protocol 문자열 검증
        let mode: DeploymentMode = self.target.mode.parse()?;
        let _: Protocol = self.target.protocol.parse()?;

        // gateway host/port는 반드시 짝으로
        match (&self.target.gateway_host, self.target.gateway_port) {
            (Some(_), None) | (None, Some(_)) => {
                return Err(ConfigError::GatewayPairIncomplete.into());
            }
            (Some(_), Some(port)) => {
                if port == 0 {
                    return Err(ConfigError::InvalidValue {
                        field: "target.gateway_port".to_owned(),
                        reason: "port must be in 1..=65535".to_owned(),
                    }
                    .into());
                }
                if mode != DeploymentMode::ApiGateway {
                    return Err(ConfigError::InvalidValue {
                        field: "target.gateway_host".to_owned(),
                        reason: format!(
                            "gateway endpoint is only valid in api-gateway mode, not '{mode}'"
                        ),
                    }
                    .into());
                }
            }
            (None, None) => {
                if mode == DeploymentMode::ApiGateway {
                    return Err(ConfigError::InvalidValue {
                        field: "target.gateway_host".to_owned(),
                        reason: "api-gateway mode requires gateway_host and gateway_port"
                            .to_owned(),
                    }
                    .into());
                }
            }
        }

        // naming 검증
        let valid_naming = ["generated", "fixed"];
        if !valid_naming.contains(&self.fixtures.naming.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "fixtures.naming".to_owned(),
                reason: format!("must be one of: {}", valid_naming.join(", ")),
            }
            .into());
        }

        Ok(())
    }
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: "json".to_owned(),
        }
    }
}

/// 실행 대상 토폴로지 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// 배포 모드 (api-gateway, localhost, direct)
    pub mode: String,
    /// HTTP 계열 프로토콜 (http, https)
    pub protocol: String,
    /// api-gateway 모드의 gateway host (port와 반드시 짝으로)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_host: Option<String>,
    /// api-gateway 모드의 gateway port (host와 반드시 짝으로)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_port: Option<u16>,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            mode: "direct".to_owned(),
            protocol: "http".to_owned(),
            gateway_host: None,
            gateway_port: None,
        }
    }
}

/// 픽스처 이름 전략 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FixturesConfig {
    /// "generated"는 실행마다 uuid 기반 이름 생성 (동시 실행 충돌 방지),
    /// "fixed"는 고정 리터럴 이름 사용 (실행마다 깨끗한 네임스페이스 전제)
    pub naming: String,
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self {
            naming: "generated".to_owned(),
        }
    }
}

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_opt_string(target: &mut Option<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        if val.is_empty() {
            *target = None;
        } else {
            *target = Some(val);
        }
    }
}

fn override_opt_u16(target: &mut Option<u16>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        if val.is_empty() {
            *target = None;
            return;
        }
        match val.parse::<u16>() {
            Ok(parsed) => *target = Some(parsed),
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u16 from env var, ignoring"
            ),
        }
    }
}
