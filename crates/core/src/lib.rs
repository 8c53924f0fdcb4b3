//! meshprobe-core -- 공통 타입, 설정, 토폴로지 해석, 체크 리포트
//!
//! 파이프라인 플랫폼의 controller 마이크로서비스를 검증하는
//! meshprobe 도구의 기반 크레이트입니다. 네트워크 I/O는 포함하지
//! 않으며, 순수 데이터 조립과 검증 로직만 제공합니다.

pub mod check;
pub mod config;
pub mod error;
pub mod fixture;
pub mod scenario;
pub mod topology;

// --- 주요 타입 re-export ---
// 각 모듈의 핵심 타입을 크레이트 루트에서 바로 사용할 수 있도록 합니다.

// 에러
pub use error::{ConfigError, ConnectivityError, MeshprobeError};

// 설정
pub use config::MeshprobeConfig;

// 토폴로지
pub use topology::{BackendKind, DeploymentMode, Protocol, ServiceEndpoint, Topology};

// 픽스처
pub use fixture::{Fixture, FixtureSet, ResourceKind};

// 체크 리포트
pub use check::{Check, CheckReport};

// 시나리오 계획
pub use scenario::{Operation, Phase, ScenarioStep, plan};
