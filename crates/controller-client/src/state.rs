//! 리소스 종류별 상태 디스패치
//!
//! 종류 -> (상태 필드 이름, 기대 상태 값) 매핑을 한 곳에서 망라적으로
//! 정의합니다. 문자열 분기 대신 [`ResourceKind`]에 대한 exhaustive
//! match를 사용하므로 종류가 늘면 컴파일러가 누락을 잡아냅니다.

use meshprobe_core::fixture::ResourceKind;

use crate::proto::{ConnectorState, ModelState, PipelineState, Resource, ServingStatus, resource};

/// 종류별 "정상(active/online/connected)" 기대 상태
pub fn expected_state(kind: ResourceKind) -> resource::State {
    match kind {
        ResourceKind::Model => resource::State::ModelState(ModelState::Online as i32),
        ResourceKind::SourceConnector | ResourceKind::DestinationConnector => {
            resource::State::ConnectorState(ConnectorState::Connected as i32)
        }
        ResourceKind::Pipeline => resource::State::PipelineState(PipelineState::Active as i32),
        ResourceKind::Service => resource::State::BackendState(ServingStatus::Serving as i32),
    }
}

/// 종류별 상태 필드의 proto 이름
pub fn state_field_name(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Model => "model_state",
        ResourceKind::SourceConnector | ResourceKind::DestinationConnector => "connector_state",
        ResourceKind::Pipeline => "pipeline_state",
        ResourceKind::Service => "backend_state",
    }
}

/// 종류별 기대 상태의 proto enum 이름
pub fn expected_state_name(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Model => ModelState::Online.as_str_name(),
        ResourceKind::SourceConnector | ResourceKind::DestinationConnector => {
            ConnectorState::Connected.as_str_name()
        }
        ResourceKind::Pipeline => PipelineState::Active.as_str_name(),
        ResourceKind::Service => ServingStatus::Serving.as_str_name(),
    }
}

/// 기대 상태를 담은 리소스 레코드를 만듭니다 (UpdateResource 입력).
pub fn resource_for(kind: ResourceKind, name: &str) -> Resource {
    Resource {
        name: name.to_owned(),
        state: Some(expected_state(kind)),
        progress: None,
    }
}

/// 응답 리소스의 상태가 종류별 기대값과 일치하는지 검사합니다.
pub fn state_matches(kind: ResourceKind, resource: &Resource) -> bool {
    resource.state == Some(expected_state(kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_covers_every_kind() {
        assert_eq!(state_field_name(ResourceKind::Model), "model_state");
        assert_eq!(
            state_field_name(ResourceKind::SourceConnector),
            "connector_state"
        );
        assert_eq!(
            state_field_name(ResourceKind::DestinationConnector),
            "connector_state"
        );
        assert_eq!(state_field_name(ResourceKind::Pipeline), "pipeline_state");
        assert_eq!(state_field_name(ResourceKind::Service), "backend_state");
    }

    #[test]
    fn expected_names_match_wire_enum_names() {
        assert_eq!(expected_state_name(ResourceKind::Model), "STATE_ONLINE");
        assert_eq!(
            expected_state_name(ResourceKind::SourceConnector),
            "STATE_CONNECTED"
        );
        assert_eq!(expected_state_name(ResourceKind::Pipeline), "STATE_ACTIVE");
        assert_eq!(
            expected_state_name(ResourceKind::Service),
            "SERVING_STATUS_SERVING"
        );
    }

    #[test]
    fn built_resource_matches_its_own_expectation() {
        for kind in ResourceKind::ALL {
            let resource = resource_for(kind, "resources/x/types/y");
            assert!(state_matches(kind, &resource), "kind {kind}");
        }
    }

    #[test]
    fn wrong_state_value_does_not_match() {
        let mut resource = resource_for(ResourceKind::Pipeline, "pipelines/pipeline-name");
        resource.state = Some(resource::State::PipelineState(
            PipelineState::Inactive as i32,
        ));
        assert!(!state_matches(ResourceKind::Pipeline, &resource));
    }

    #[test]
    fn wrong_state_field_does_not_match() {
        let mut resource = resource_for(ResourceKind::Model, "models/model-name");
        resource.state = Some(resource::State::PipelineState(PipelineState::Active as i32));
        assert!(!state_matches(ResourceKind::Model, &resource));
    }
}
