//! 픽스처 -- 테스트 런에서 사용하는 리소스 이름
//!
//! 하나의 런 안에서 create/read/delete가 동일한 `name` 값으로
//! 짝지어지도록, 리소스 이름을 런 시작 시 한 번 확정합니다.
//!
//! 이름 전략은 두 가지입니다:
//! - `generated`: `resources/<uuid>/types/<kind-plural>` 형식의 permalink.
//!   동시 실행 간 충돌을 피합니다.
//! - `fixed`: `models/model-name` 같은 고정 리터럴. 실행마다 깨끗한
//!   네임스페이스(CI)를 전제합니다.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::FixturesConfig;

/// service 픽스처의 고정 리소스 이름 (전략과 무관하게 항상 동일)
pub const SERVICE_RESOURCE_NAME: &str = "resources/model-backend/types/services";

/// controller가 상태를 추적하는 리소스 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Model,
    SourceConnector,
    DestinationConnector,
    Pipeline,
    Service,
}

impl ResourceKind {
    /// exercise 페이즈가 순회하는 네 종류 (순서 고정)
    pub const EXERCISE_ORDER: [ResourceKind; 4] = [
        Self::Model,
        Self::SourceConnector,
        Self::DestinationConnector,
        Self::Pipeline,
    ];

    /// teardown이 삭제하는 다섯 픽스처 전체
    pub const ALL: [ResourceKind; 5] = [
        Self::Model,
        Self::SourceConnector,
        Self::DestinationConnector,
        Self::Pipeline,
        Self::Service,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::SourceConnector => "source-connector",
            Self::DestinationConnector => "destination-connector",
            Self::Pipeline => "pipeline",
            Self::Service => "service",
        }
    }

    /// 리소스 이름 경로에 쓰이는 복수형 세그먼트
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Model => "models",
            Self::SourceConnector => "source-connectors",
            Self::DestinationConnector => "destination-connectors",
            Self::Pipeline => "pipelines",
            Self::Service => "services",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 단일 리소스 픽스처
///
/// `name`은 고정 리터럴, `permalink`는 uuid 기반 생성 이름입니다.
/// 어느 쪽이 와이어에 실리는지는 [`FixtureSet`]의 이름 전략이 정합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub kind: ResourceKind,
    pub name: String,
    pub permalink: String,
}

/// 한 런의 픽스처 묶음
///
/// 런 시작 시 한 번 만들어지고 이후 변경되지 않습니다.
#[derive(Debug, Clone, Serialize)]
pub struct FixtureSet {
    generated: bool,
    fixtures: Vec<Fixture>,
}

impl FixtureSet {
    /// uuid 기반 permalink를 와이어 이름으로 쓰는 픽스처 묶음
    pub fn generated() -> Self {
        Self::build(true)
    }

    /// 고정 리터럴 이름을 와이어 이름으로 쓰는 픽스처 묶음
    pub fn fixed() -> Self {
        Self::build(false)
    }

    /// 설정의 이름 전략에 따라 픽스처 묶음을 만듭니다.
    pub fn for_config(config: &FixturesConfig) -> Self {
        if config.naming == "fixed" {
            Self::fixed()
        } else {
            Self::generated()
        }
    }

    fn build(generated: bool) -> Self {
        let fixtures = ResourceKind::ALL
            .iter()
            .map(|&kind| {
                let name = match kind {
                    ResourceKind::Model => "models/model-name".to_owned(),
                    ResourceKind::SourceConnector => {
                        "source-connectors/source-connector-name".to_owned()
                    }
                    ResourceKind::DestinationConnector => {
                        "destination-connectors/destination-connector-name".to_owned()
                    }
                    ResourceKind::Pipeline => "pipelines/pipeline-name".to_owned(),
                    ResourceKind::Service => SERVICE_RESOURCE_NAME.to_owned(),
                };
                let permalink = match kind {
                    // service 리소스는 항상 고정 경로를 가집니다.
                    ResourceKind::Service => SERVICE_RESOURCE_NAME.to_owned(),
                    _ => format!("resources/{}/types/{}", Uuid::new_v4(), kind.plural()),
                };
                Fixture {
                    kind,
                    name,
                    permalink,
                }
            })
            .collect();
        Self {
            generated,
            fixtures,
        }
    }

    /// 종류로 픽스처를 조회합니다.
    pub fn fixture(&self, kind: ResourceKind) -> &Fixture {
        self.fixtures
            .iter()
            .find(|f| f.kind == kind)
            .unwrap_or_else(|| unreachable!("fixture set covers every ResourceKind"))
    }

    /// 와이어에 실리는 리소스 이름
    ///
    /// create/read/delete 전 단계에서 동일한 값이 사용됩니다.
    pub fn resource_name(&self, kind: ResourceKind) -> &str {
        let fixture = self.fixture(kind);
        if self.generated {
            &fixture.permalink
        } else {
            &fixture.name
        }
    }

    /// teardown이 삭제할 다섯 리소스 이름 (순서 무관)
    pub fn teardown_names(&self) -> Vec<&str> {
        ResourceKind::ALL
            .iter()
            .map(|&kind| self.resource_name(kind))
            .collect()
    }
}
