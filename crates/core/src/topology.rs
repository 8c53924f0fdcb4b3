//! 토폴로지 해석 -- 배포 모드에 따른 백엔드 주소 결정
//!
//! 배포 모드(api-gateway, localhost, direct) 하나를 입력받아 각 백엔드의
//! [`ServiceEndpoint`]와 controller gRPC 대상 주소를 결정합니다.
//! 순수 조회 테이블이며 I/O나 재시도가 없습니다.
//!
//! # 포트 규칙
//!
//! private 포트는 모드와 무관한 메시 내부 상수입니다:
//! pipeline 3081, connector 3082, model 3083, mgmt 3084, controller 3085.
//! 모드에 따라 달라지는 것은 host와 public 포트뿐입니다.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::MeshprobeConfig;
use crate::error::{ConfigError, MeshprobeError};

/// pipeline-backend 메시 내부 포트
pub const PIPELINE_PRIVATE_PORT: u16 = 3081;
/// connector-backend 메시 내부 포트
pub const CONNECTOR_PRIVATE_PORT: u16 = 3082;
/// model-backend 메시 내부 포트
pub const MODEL_PRIVATE_PORT: u16 = 3083;
/// mgmt-backend 메시 내부 포트
pub const MGMT_PRIVATE_PORT: u16 = 3084;
/// controller 메시 내부 포트
pub const CONTROLLER_PRIVATE_PORT: u16 = 3085;

/// api-gateway 모드 기본 public 포트
pub const DEFAULT_GATEWAY_PORT: u16 = 8080;

/// 배포 모드
///
/// 실행 시작 시 설정에서 한 번 결정되며 이후 변경되지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeploymentMode {
    /// 모든 백엔드가 단일 게이트웨이 host 뒤에 있는 모드.
    /// private RPC surface는 외부에서 도달 불가능합니다.
    ApiGateway,
    /// 로컬 CI 모드. 모든 백엔드가 localhost에서 실행됩니다.
    Localhost,
    /// 마이크로서비스 메시 직접 접근 모드. 백엔드별 host를 사용합니다.
    DirectMicroservice,
}

impl DeploymentMode {
    /// 모드 문자열 표현 (설정 파일과 동일한 표기)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApiGateway => "api-gateway",
            Self::Localhost => "localhost",
            Self::DirectMicroservice => "direct",
        }
    }
}

impl FromStr for DeploymentMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "api-gateway" => Ok(Self::ApiGateway),
            "localhost" => Ok(Self::Localhost),
            "direct" => Ok(Self::DirectMicroservice),
            other => Err(ConfigError::InvalidValue {
                field: "target.mode".to_owned(),
                reason: format!("unknown mode '{other}' (expected api-gateway, localhost, direct)"),
            }),
        }
    }
}

impl fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP 계열 백엔드 접근 프로토콜
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[default]
    Http,
    Https,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl FromStr for Protocol {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            other => Err(ConfigError::InvalidValue {
                field: "target.protocol".to_owned(),
                reason: format!("only `http` or `https` is allowed, got '{other}'"),
            }),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 논리 백엔드 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    Pipeline,
    Connector,
    Model,
    Mgmt,
    Controller,
    InferenceServer,
}

impl BackendKind {
    /// 전체 백엔드 (토폴로지 순회 순서)
    pub const ALL: [BackendKind; 6] = [
        Self::Pipeline,
        Self::Connector,
        Self::Model,
        Self::Mgmt,
        Self::Controller,
        Self::InferenceServer,
    ];

    /// 메시 private 포트를 갖는 백엔드 (3081..=3085에 1:1 매핑)
    pub const MESH: [BackendKind; 5] = [
        Self::Pipeline,
        Self::Connector,
        Self::Model,
        Self::Mgmt,
        Self::Controller,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pipeline => "pipeline",
            Self::Connector => "connector",
            Self::Model => "model",
            Self::Mgmt => "mgmt",
            Self::Controller => "controller",
            Self::InferenceServer => "inference-server",
        }
    }

    /// direct 모드에서 사용하는 메시 DNS host
    fn mesh_host(&self) -> &'static str {
        match self {
            Self::Pipeline => "pipeline-backend",
            Self::Connector => "connector-backend",
            Self::Model => "model-backend",
            Self::Mgmt => "mgmt-backend",
            Self::Controller => "controller",
            Self::InferenceServer => "inference-server",
        }
    }

    /// direct/localhost 모드의 public 포트 (백엔드별로 서로 다름)
    fn direct_public_port(&self) -> u16 {
        match self {
            Self::Pipeline => 8081,
            Self::Connector => 8082,
            Self::Model => 8083,
            Self::Mgmt => 8084,
            Self::Controller => 8085,
            Self::InferenceServer => 8001,
        }
    }

    /// 메시 내부 private 포트. inference server는 메시 집합 밖입니다.
    fn private_port(&self) -> Option<u16> {
        match self {
            Self::Pipeline => Some(PIPELINE_PRIVATE_PORT),
            Self::Connector => Some(CONNECTOR_PRIVATE_PORT),
            Self::Model => Some(MODEL_PRIVATE_PORT),
            Self::Mgmt => Some(MGMT_PRIVATE_PORT),
            Self::Controller => Some(CONTROLLER_PRIVATE_PORT),
            Self::InferenceServer => None,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 단일 백엔드의 주소 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    /// HTTP 계열 접근 프로토콜
    pub protocol: Protocol,
    /// host (비어 있지 않음)
    pub host: String,
    /// 외부 노출 포트
    pub public_port: u16,
    /// 메시 내부 포트 (inference server만 None)
    pub private_port: Option<u16>,
}

impl ServiceEndpoint {
    /// `scheme://host:public_port` 형식의 public base URL
    pub fn public_url(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.public_port)
    }

    /// `scheme://host:private_port` 형식의 private base URL
    pub fn private_url(&self) -> Option<String> {
        self.private_port
            .map(|p| format!("{}://{}:{}", self.protocol, self.host, p))
    }

    /// scheme 없는 `host:private_port` 대상. 바이너리 RPC 전송용입니다.
    pub fn grpc_target(&self) -> Option<String> {
        self.private_port.map(|p| format!("{}:{}", self.host, p))
    }
}

/// 해석된 토폴로지
///
/// 시나리오 시작 시 한 번 해석되며 실행 중 변경되지 않습니다.
#[derive(Debug, Clone, Serialize)]
pub struct Topology {
    /// 해석에 사용된 배포 모드
    pub mode: DeploymentMode,
    endpoints: Vec<(BackendKind, ServiceEndpoint)>,
}

impl Topology {
    /// 검증된 설정에서 토폴로지를 해석합니다.
    ///
    /// 순수 데이터 조립입니다. gateway host/port 짝과 프로토콜 문자열을
    /// 재검증하며, 어떤 네트워크 활동도 하지 않습니다.
    pub fn resolve(config: &MeshprobeConfig) -> Result<Self, MeshprobeError> {
        let mode: DeploymentMode = config.target.mode.parse()?;
        let protocol: Protocol = config.target.protocol.parse()?;

        let gateway = match (&config.target.gateway_host, config.target.gateway_port) {
            (Some(host), Some(port)) => Some((host.clone(), port)),
            (None, None) => None,
            _ => return Err(ConfigError::GatewayPairIncomplete.into()),
        };

        if mode != DeploymentMode::ApiGateway && gateway.is_some() {
            return Err(ConfigError::InvalidValue {
                field: "target.gateway_host".to_owned(),
                reason: format!("gateway endpoint is only valid in api-gateway mode, not '{mode}'"),
            }
            .into());
        }

        let host_and_port = |kind: BackendKind| -> Result<(String, u16), ConfigError> {
            match mode {
                DeploymentMode::ApiGateway => match &gateway {
                    Some((host, port)) => Ok((host.clone(), *port)),
                    None => Err(ConfigError::InvalidValue {
                        field: "target.gateway_host".to_owned(),
                        reason: "api-gateway mode requires gateway_host and gateway_port"
                            .to_owned(),
                    }),
                },
                DeploymentMode::Localhost => {
                    Ok(("localhost".to_owned(), kind.direct_public_port()))
                }
                DeploymentMode::DirectMicroservice => {
                    Ok((kind.mesh_host().to_owned(), kind.direct_public_port()))
                }
            }
        };

        let mut endpoints = Vec::with_capacity(BackendKind::ALL.len());
        for kind in BackendKind::ALL {
            let (host, public_port) = host_and_port(kind)?;
            endpoints.push((
                kind,
                ServiceEndpoint {
                    protocol,
                    host,
                    public_port,
                    private_port: kind.private_port(),
                },
            ));
        }

        Ok(Self { mode, endpoints })
    }

    /// 백엔드 종류로 엔드포인트를 조회합니다.
    pub fn endpoint(&self, kind: BackendKind) -> &ServiceEndpoint {
        // ALL의 모든 원소를 resolve에서 채우므로 조회는 항상 성공합니다.
        self.endpoints
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, e)| e)
            .unwrap_or_else(|| unreachable!("endpoint table covers every BackendKind"))
    }

    /// (종류, 엔드포인트) 쌍의 순회
    pub fn iter(&self) -> impl Iterator<Item = (BackendKind, &ServiceEndpoint)> {
        self.endpoints.iter().map(|(k, e)| (*k, e))
    }

    /// controller private RPC 대상 (`host:3085`, scheme 없음)
    pub fn controller_grpc_target(&self) -> String {
        self.endpoint(BackendKind::Controller)
            .grpc_target()
            .unwrap_or_else(|| unreachable!("controller always has a private port"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MeshprobeConfig;

    fn config_for(mode: &str) -> MeshprobeConfig {
        let mut config = MeshprobeConfig::default();
        config.target.mode = mode.to_owned();
        if mode == "api-gateway" {
            config.target.gateway_host = Some("api-gateway".to_owned());
            config.target.gateway_port = Some(8080);
        }
        config
    }

    #[test]
    fn controller_target_is_always_a_private_port() {
        for mode in ["api-gateway", "localhost", "direct"] {
            let topology = Topology::resolve(&config_for(mode)).unwrap();
            let target = topology.controller_grpc_target();
            let port: u16 = target.rsplit(':').next().unwrap().parse().unwrap();
            assert!(
                (3081..=3085).contains(&port),
                "mode {mode}: controller target {target} must use a mesh private port"
            );
            assert_eq!(port, CONTROLLER_PRIVATE_PORT);
        }
    }

    #[test]
    fn private_ports_are_mode_invariant() {
        for mode in ["api-gateway", "localhost", "direct"] {
            let topology = Topology::resolve(&config_for(mode)).unwrap();
            assert_eq!(
                topology.endpoint(BackendKind::Pipeline).private_port,
                Some(3081)
            );
            assert_eq!(
                topology.endpoint(BackendKind::Connector).private_port,
                Some(3082)
            );
            assert_eq!(
                topology.endpoint(BackendKind::Model).private_port,
                Some(3083)
            );
            assert_eq!(topology.endpoint(BackendKind::Mgmt).private_port, Some(3084));
            assert_eq!(
                topology.endpoint(BackendKind::Controller).private_port,
                Some(3085)
            );
            assert_eq!(
                topology.endpoint(BackendKind::InferenceServer).private_port,
                None
            );
        }
    }

    #[test]
    fn api_gateway_mode_collapses_hosts_and_public_ports() {
        let topology = Topology::resolve(&config_for("api-gateway")).unwrap();
        for kind in BackendKind::MESH {
            let endpoint = topology.endpoint(kind);
            assert_eq!(endpoint.host, "api-gateway");
            assert_eq!(endpoint.public_port, 8080);
        }
    }

    #[test]
    fn direct_mode_public_ports_are_pairwise_distinct() {
        let topology = Topology::resolve(&config_for("direct")).unwrap();
        let mut ports: Vec<u16> = BackendKind::MESH
            .iter()
            .map(|&k| topology.endpoint(k).public_port)
            .collect();
        ports.sort_unstable();
        ports.dedup();
        assert_eq!(ports.len(), BackendKind::MESH.len());
    }

    #[test]
    fn localhost_mode_shares_host_with_distinct_ports() {
        let topology = Topology::resolve(&config_for("localhost")).unwrap();
        for (kind, endpoint) in topology.iter() {
            assert_eq!(endpoint.host, "localhost", "backend {kind}");
        }
        assert_ne!(
            topology.endpoint(BackendKind::Pipeline).public_port,
            topology.endpoint(BackendKind::Model).public_port
        );
    }

    #[test]
    fn every_endpoint_has_nonempty_host_and_valid_ports() {
        for mode in ["api-gateway", "localhost", "direct"] {
            let topology = Topology::resolve(&config_for(mode)).unwrap();
            for (kind, endpoint) in topology.iter() {
                assert!(!endpoint.host.is_empty(), "mode {mode} backend {kind}");
                assert!(endpoint.public_port >= 1);
                if let Some(private) = endpoint.private_port {
                    assert!(private >= 1);
                }
            }
        }
    }

    #[test]
    fn gateway_host_without_port_is_a_config_error() {
        let mut config = MeshprobeConfig::default();
        config.target.gateway_host = Some("gw.example.com".to_owned());
        let err = Topology::resolve(&config).unwrap_err();
        assert!(matches!(
            err,
            MeshprobeError::Config(ConfigError::GatewayPairIncomplete)
        ));
    }

    #[test]
    fn gateway_port_without_host_is_a_config_error() {
        let mut config = MeshprobeConfig::default();
        config.target.gateway_port = Some(8080);
        let err = Topology::resolve(&config).unwrap_err();
        assert!(matches!(
            err,
            MeshprobeError::Config(ConfigError::GatewayPairIncomplete)
        ));
    }

    #[test]
    fn invalid_protocol_is_a_config_error() {
        let mut config = MeshprobeConfig::default();
        config.target.protocol = "ftp".to_owned();
        let err = Topology::resolve(&config).unwrap_err();
        assert!(err.to_string().contains("protocol"));
    }

    #[test]
    fn gateway_pair_outside_api_gateway_mode_is_rejected() {
        let mut config = config_for("direct");
        config.target.gateway_host = Some("gw".to_owned());
        config.target.gateway_port = Some(8080);
        assert!(Topology::resolve(&config).is_err());
    }

    #[test]
    fn public_url_and_grpc_target_formats() {
        let topology = Topology::resolve(&config_for("direct")).unwrap();
        let controller = topology.endpoint(BackendKind::Controller);
        assert_eq!(controller.public_url(), "http://controller:8085");
        assert_eq!(controller.private_url().unwrap(), "http://controller:3085");
        assert_eq!(topology.controller_grpc_target(), "controller:3085");
    }

    #[test]
    fn https_protocol_flows_into_urls() {
        let mut config = config_for("api-gateway");
        config.target.protocol = "https".to_owned();
        let topology = Topology::resolve(&config).unwrap();
        assert_eq!(
            topology.endpoint(BackendKind::Model).public_url(),
            "https://api-gateway:8080"
        );
    }
}
