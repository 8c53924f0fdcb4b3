//! 시나리오 계획 -- 고정 RPC 시퀀스를 데이터로 표현
//!
//! 어떤 페이즈에서 어떤 연산을 수행하는지를 제어 흐름이 아니라
//! [`ScenarioStep`] 목록으로 표현합니다. api-gateway 모드에서 private
//! surface 페이즈를 건너뛰는 조건도 계획 단계에서 데이터로 결정되므로
//! 러너와 독립적으로 테스트할 수 있습니다.

use serde::Serialize;

use crate::fixture::ResourceKind;
use crate::topology::DeploymentMode;

/// 시나리오 페이즈 (엄격한 순서: Health -> Exercise -> Teardown)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    Health,
    Exercise,
    Teardown,
}

impl Phase {
    /// 실행 순서
    pub const ORDER: [Phase; 3] = [Self::Health, Self::Exercise, Self::Teardown];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Exercise => "exercise",
            Self::Teardown => "teardown",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// controller private surface에 대한 단일 RPC 연산
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    Liveness,
    Readiness,
    UpdateResource(ResourceKind),
    GetResource(ResourceKind),
    DeleteResource(ResourceKind),
}

/// 계획된 시나리오 단계 하나
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScenarioStep {
    pub phase: Phase,
    pub operation: Operation,
}

/// 배포 모드에 대한 전체 시나리오 계획을 만듭니다.
///
/// api-gateway 모드에서는 private RPC surface에 외부에서 도달할 수
/// 없으므로 빈 계획을 돌려줍니다. 그 외 모드에서는:
/// - health: Liveness, Readiness
/// - exercise: 네 리소스 종류 각각 UpdateResource 후 GetResource (순서 고정)
/// - teardown: 다섯 픽스처 전체 DeleteResource (순서 무관, 상호 독립)
pub fn plan(mode: DeploymentMode) -> Vec<ScenarioStep> {
    if mode == DeploymentMode::ApiGateway {
        return Vec::new();
    }

    let mut steps = Vec::new();

    steps.push(ScenarioStep {
        phase: Phase::Health,
        operation: Operation::Liveness,
    });
    steps.push(ScenarioStep {
        phase: Phase::Health,
        operation: Operation::Readiness,
    });

    for kind in ResourceKind::EXERCISE_ORDER {
        steps.push(ScenarioStep {
            phase: Phase::Exercise,
            operation: Operation::UpdateResource(kind),
        });
        steps.push(ScenarioStep {
            phase: Phase::Exercise,
            operation: Operation::GetResource(kind),
        });
    }

    for kind in ResourceKind::ALL {
        steps.push(ScenarioStep {
            phase: Phase::Teardown,
            operation: Operation::DeleteResource(kind),
        });
    }

    steps
}

/// 계획에서 특정 페이즈의 단계만 추립니다.
pub fn steps_for_phase(steps: &[ScenarioStep], phase: Phase) -> Vec<ScenarioStep> {
    steps.iter().copied().filter(|s| s.phase == phase).collect()
}
