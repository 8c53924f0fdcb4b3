//! tonic 기반 controller 클라이언트와 교체 가능한 trait 경계
//!
//! 시나리오 러너는 [`ControllerApi`]/[`ControllerConnector`] trait만
//! 바라봅니다. 실제 네트워크 구현은 [`ControllerGrpcClient`]이고,
//! 테스트에서는 인메모리 mock이 같은 자리에 들어갑니다.
//!
//! 연결은 페이즈 단위 스코프 자원입니다. 페이즈마다
//! [`ControllerConnector::connect`]로 새로 열고, 페이즈가 끝나면
//! drop으로 닫습니다. 페이즈 간 재사용이나 풀링은 하지 않습니다.

use std::time::Duration;

use async_trait::async_trait;
use tonic::Status;
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};
use tracing::debug;

use meshprobe_core::error::ConnectivityError;

use crate::proto::{
    DeleteResourceRequest, DeleteResourceResponse, GetResourceRequest, GetResourceResponse,
    LivenessRequest, LivenessResponse, ReadinessRequest, ReadinessResponse, Resource,
    UpdateResourceRequest, UpdateResourceResponse,
};

const LIVENESS_PATH: &str = "/vdp.controller.v1alpha.ControllerPrivateService/Liveness";
const READINESS_PATH: &str = "/vdp.controller.v1alpha.ControllerPrivateService/Readiness";
const GET_RESOURCE_PATH: &str = "/vdp.controller.v1alpha.ControllerPrivateService/GetResource";
const UPDATE_RESOURCE_PATH: &str =
    "/vdp.controller.v1alpha.ControllerPrivateService/UpdateResource";
const DELETE_RESOURCE_PATH: &str =
    "/vdp.controller.v1alpha.ControllerPrivateService/DeleteResource";

/// 접속 수립 제한 시간
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// controller private surface의 다섯 unary 호출
#[async_trait]
pub trait ControllerApi: Send {
    async fn liveness(&mut self) -> Result<LivenessResponse, Status>;
    async fn readiness(&mut self) -> Result<ReadinessResponse, Status>;
    /// 업서트 시맨틱: 없으면 생성, 있으면 교체
    async fn update_resource(
        &mut self,
        resource: Resource,
    ) -> Result<UpdateResourceResponse, Status>;
    async fn get_resource(&mut self, name: &str) -> Result<GetResourceResponse, Status>;
    async fn delete_resource(&mut self, name: &str) -> Result<DeleteResourceResponse, Status>;
}

/// 페이즈마다 새 연결을 만드는 팩토리
#[async_trait]
pub trait ControllerConnector: Send + Sync {
    /// 접속 대상 (`host:port`, 로그/체크 이름용)
    fn target(&self) -> &str;

    /// 새 연결을 엽니다. 전송 실패는 [`ConnectivityError`]로 보고됩니다.
    async fn connect(&self) -> Result<Box<dyn ControllerApi>, ConnectivityError>;
}

/// tonic `Grpc<Channel>` 위에 구현한 실제 클라이언트
///
/// 메시 내부 private 포트 대상이므로 TLS 없이 plaintext HTTP/2로
/// `host:port`에 붙습니다.
pub struct ControllerGrpcClient {
    inner: tonic::client::Grpc<Channel>,
}

impl ControllerGrpcClient {
    /// `host:port` 대상에 접속합니다.
    pub async fn connect(target: &str) -> Result<Self, ConnectivityError> {
        let endpoint = Endpoint::from_shared(format!("http://{target}"))
            .map_err(|e| ConnectivityError::new(target, e.to_string()))?
            .connect_timeout(CONNECT_TIMEOUT);
        let channel = endpoint
            .connect()
            .await
            .map_err(|e| ConnectivityError::new(target, e.to_string()))?;
        debug!(addr = target, "controller connection established");
        Ok(Self {
            inner: tonic::client::Grpc::new(channel),
        })
    }

    async fn unary<Req, Resp>(&mut self, path: &'static str, request: Req) -> Result<Resp, Status>
    where
        Req: prost::Message + 'static,
        Resp: prost::Message + Default + 'static,
    {
        self.inner
            .ready()
            .await
            .map_err(|e| Status::unknown(format!("transport not ready: {e}")))?;
        let codec: ProstCodec<Req, Resp> = ProstCodec::default();
        let path = PathAndQuery::from_static(path);
        let response = self
            .inner
            .unary(tonic::Request::new(request), path, codec)
            .await?;
        Ok(response.into_inner())
    }
}

#[async_trait]
impl ControllerApi for ControllerGrpcClient {
    async fn liveness(&mut self) -> Result<LivenessResponse, Status> {
        self.unary(LIVENESS_PATH, LivenessRequest::default()).await
    }

    async fn readiness(&mut self) -> Result<ReadinessResponse, Status> {
        self.unary(READINESS_PATH, ReadinessRequest::default())
            .await
    }

    async fn update_resource(
        &mut self,
        resource: Resource,
    ) -> Result<UpdateResourceResponse, Status> {
        self.unary(
            UPDATE_RESOURCE_PATH,
            UpdateResourceRequest {
                resource: Some(resource),
            },
        )
        .await
    }

    async fn get_resource(&mut self, name: &str) -> Result<GetResourceResponse, Status> {
        self.unary(
            GET_RESOURCE_PATH,
            GetResourceRequest {
                name: name.to_owned(),
            },
        )
        .await
    }

    async fn delete_resource(&mut self, name: &str) -> Result<DeleteResourceResponse, Status> {
        self.unary(
            DELETE_RESOURCE_PATH,
            DeleteResourceRequest {
                name: name.to_owned(),
            },
        )
        .await
    }
}

/// [`ControllerGrpcClient`]를 만드는 기본 커넥터
pub struct GrpcConnector {
    target: String,
}

impl GrpcConnector {
    /// `host:port` 대상의 커넥터를 만듭니다.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }
}

#[async_trait]
impl ControllerConnector for GrpcConnector {
    fn target(&self) -> &str {
        &self.target
    }

    async fn connect(&self) -> Result<Box<dyn ControllerApi>, ConnectivityError> {
        let client = ControllerGrpcClient::connect(&self.target).await?;
        Ok(Box::new(client))
    }
}
