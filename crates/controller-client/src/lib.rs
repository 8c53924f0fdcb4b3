//! meshprobe-controller-client -- controller private gRPC surface 클라이언트
//!
//! `vdp.controller.v1alpha.ControllerPrivateService` 계약은 외부
//! 소유의 proto 스키마로 정의됩니다. 이 크레이트는 그 계약의 메시지
//! 타입([`proto`]), 리소스 종류별 상태 디스패치([`state`]), tonic 기반
//! 클라이언트와 교체 가능한 trait 경계([`client`])를 제공합니다.

pub mod client;
pub mod proto;
pub mod state;

pub use client::{ControllerApi, ControllerConnector, ControllerGrpcClient, GrpcConnector};
pub use proto::{
    ConnectorState, DeleteResourceRequest, DeleteResourceResponse, GetResourceRequest,
    GetResourceResponse, HealthCheckRequest, HealthCheckResponse, LivenessRequest,
    LivenessResponse, ModelState, PipelineState, ReadinessRequest, ReadinessResponse, Resource,
    ServingStatus, UpdateResourceRequest, UpdateResourceResponse,
};
pub use state::{expected_state, expected_state_name, resource_for, state_field_name, state_matches};
