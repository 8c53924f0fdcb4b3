//! `vdp.controller.v1alpha` 계약의 메시지 타입
//!
//! 스키마는 controller 서비스 쪽이 소유합니다. 빌드 시 protoc 의존을
//! 피하기 위해 생성 코드 대신 prost derive로 와이어 호환 타입을 직접
//! 정의합니다. 태그 번호와 enum 값은 계약과 1:1로 맞춰야 합니다.

/// gRPC 서비스 풀네임
pub const SERVICE_NAME: &str = "vdp.controller.v1alpha.ControllerPrivateService";

/// 서비스 health 상태 (`healthcheck.v1alpha.HealthCheckResponse.ServingStatus`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ServingStatus {
    Unspecified = 0,
    Serving = 1,
    NotServing = 2,
}

impl ServingStatus {
    /// proto enum 이름 문자열
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Self::Unspecified => "SERVING_STATUS_UNSPECIFIED",
            Self::Serving => "SERVING_STATUS_SERVING",
            Self::NotServing => "SERVING_STATUS_NOT_SERVING",
        }
    }
}

/// 모델 상태 (`model.v1alpha.Model.State`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ModelState {
    Unspecified = 0,
    Offline = 1,
    Online = 2,
    Error = 3,
}

impl ModelState {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Self::Unspecified => "STATE_UNSPECIFIED",
            Self::Offline => "STATE_OFFLINE",
            Self::Online => "STATE_ONLINE",
            Self::Error => "STATE_ERROR",
        }
    }
}

/// 커넥터 상태 (`connector.v1alpha.Connector.State`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ConnectorState {
    Unspecified = 0,
    Disconnected = 1,
    Connected = 2,
    Error = 3,
}

impl ConnectorState {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Self::Unspecified => "STATE_UNSPECIFIED",
            Self::Disconnected => "STATE_DISCONNECTED",
            Self::Connected => "STATE_CONNECTED",
            Self::Error => "STATE_ERROR",
        }
    }
}

/// 파이프라인 상태 (`pipeline.v1alpha.Pipeline.State`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum PipelineState {
    Unspecified = 0,
    Inactive = 1,
    Active = 2,
    Error = 3,
}

impl PipelineState {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            Self::Unspecified => "STATE_UNSPECIFIED",
            Self::Inactive => "STATE_INACTIVE",
            Self::Active => "STATE_ACTIVE",
            Self::Error => "STATE_ERROR",
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct HealthCheckRequest {
    /// 점검 대상 서비스 이름 (빈 문자열이면 서버 전체)
    #[prost(string, tag = "1")]
    pub service: ::prost::alloc::string::String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct HealthCheckResponse {
    #[prost(enumeration = "ServingStatus", tag = "1")]
    pub status: i32,
}

impl HealthCheckResponse {
    /// 상태를 enum으로 해석합니다. 알 수 없는 값은 Unspecified 취급.
    pub fn serving_status(&self) -> ServingStatus {
        ServingStatus::try_from(self.status).unwrap_or(ServingStatus::Unspecified)
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LivenessRequest {
    #[prost(message, optional, tag = "1")]
    pub health_check_request: ::core::option::Option<HealthCheckRequest>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LivenessResponse {
    #[prost(message, optional, tag = "1")]
    pub health_check_response: ::core::option::Option<HealthCheckResponse>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReadinessRequest {
    #[prost(message, optional, tag = "1")]
    pub health_check_request: ::core::option::Option<HealthCheckRequest>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ReadinessResponse {
    #[prost(message, optional, tag = "1")]
    pub health_check_response: ::core::option::Option<HealthCheckResponse>,
}

/// controller가 상태를 추적하는 리소스 레코드
///
/// 종류별 상태 필드는 oneof로 표현됩니다. 같은 레코드로
/// UpdateResource(업서트)와 GetResource 응답이 오갑니다.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Resource {
    /// 슬래시 구분 리소스 경로 (예: `resources/<id>/types/models`)
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(oneof = "resource::State", tags = "2, 3, 4, 5")]
    pub state: ::core::option::Option<resource::State>,
    #[prost(int32, optional, tag = "6")]
    pub progress: ::core::option::Option<i32>,
}

pub mod resource {
    /// 리소스 종류별 상태 oneof
    #[derive(Clone, Copy, PartialEq, ::prost::Oneof)]
    pub enum State {
        #[prost(enumeration = "super::ModelState", tag = "2")]
        ModelState(i32),
        #[prost(enumeration = "super::ConnectorState", tag = "3")]
        ConnectorState(i32),
        #[prost(enumeration = "super::PipelineState", tag = "4")]
        PipelineState(i32),
        #[prost(enumeration = "super::ServingStatus", tag = "5")]
        BackendState(i32),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetResourceRequest {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetResourceResponse {
    #[prost(message, optional, tag = "1")]
    pub resource: ::core::option::Option<Resource>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateResourceRequest {
    #[prost(message, optional, tag = "1")]
    pub resource: ::core::option::Option<Resource>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UpdateResourceResponse {
    #[prost(message, optional, tag = "1")]
    pub resource: ::core::option::Option<Resource>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteResourceRequest {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct DeleteResourceResponse {}
