//! End-to-end runner tests against an in-memory mock controller.
//!
//! The mock implements the `ControllerApi`/`ControllerConnector` seam over
//! a shared HashMap store, so the full phase sequence runs without any
//! network while still exercising upsert/read/delete semantics.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tonic::Status;

use meshprobe_controller_client::proto::{
    DeleteResourceResponse, GetResourceResponse, HealthCheckResponse, LivenessResponse,
    PipelineState, ReadinessResponse, Resource, ServingStatus, UpdateResourceResponse, resource,
};
use meshprobe_controller_client::{ControllerApi, ControllerConnector};
use meshprobe_core::check::DEFAULT_PASS_THRESHOLD;
use meshprobe_core::error::ConnectivityError;
use meshprobe_core::fixture::FixtureSet;
use meshprobe_core::topology::DeploymentMode;
use meshprobe_scenario::ScenarioRunner;

/// Checks produced by a full non-gateway run:
/// health 2x2 + exercise 4x(2+3) + teardown 5.
const FULL_RUN_CHECKS: usize = 4 + 20 + 5;

#[derive(Default)]
struct MockState {
    store: Mutex<HashMap<String, Resource>>,
    delete_calls: Mutex<Vec<String>>,
    refuse_connect: bool,
    liveness_status: Option<ServingStatus>,
    readiness_status: Option<ServingStatus>,
    /// Names whose DeleteResource call fails with an internal error.
    failing_deletes: HashSet<String>,
    /// Report pipelines as inactive regardless of what was stored.
    degrade_pipelines: bool,
}

impl MockState {
    fn healthy() -> Self {
        Self {
            liveness_status: Some(ServingStatus::Serving),
            readiness_status: Some(ServingStatus::Serving),
            ..Self::default()
        }
    }
}

struct MockConnector {
    state: Arc<MockState>,
}

impl MockConnector {
    fn new(state: MockState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }
}

#[async_trait]
impl ControllerConnector for MockConnector {
    fn target(&self) -> &str {
        "mock-controller:3085"
    }

    async fn connect(&self) -> Result<Box<dyn ControllerApi>, ConnectivityError> {
        if self.state.refuse_connect {
            return Err(ConnectivityError::new(
                self.target(),
                "connection refused",
            ));
        }
        Ok(Box::new(MockApi {
            state: Arc::clone(&self.state),
        }))
    }
}

struct MockApi {
    state: Arc<MockState>,
}

fn health_response(status: Option<ServingStatus>) -> Option<HealthCheckResponse> {
    status.map(|s| HealthCheckResponse { status: s as i32 })
}

#[async_trait]
impl ControllerApi for MockApi {
    async fn liveness(&mut self) -> Result<LivenessResponse, Status> {
        Ok(LivenessResponse {
            health_check_response: health_response(self.state.liveness_status),
        })
    }

    async fn readiness(&mut self) -> Result<ReadinessResponse, Status> {
        Ok(ReadinessResponse {
            health_check_response: health_response(self.state.readiness_status),
        })
    }

    async fn update_resource(
        &mut self,
        resource: Resource,
    ) -> Result<UpdateResourceResponse, Status> {
        let mut store = self.state.store.lock().unwrap();
        store.insert(resource.name.clone(), resource.clone());
        Ok(UpdateResourceResponse {
            resource: Some(resource),
        })
    }

    async fn get_resource(&mut self, name: &str) -> Result<GetResourceResponse, Status> {
        let store = self.state.store.lock().unwrap();
        let mut resource = store
            .get(name)
            .cloned()
            .ok_or_else(|| Status::not_found(format!("resource {name} not found")))?;
        if self.state.degrade_pipelines && name.contains("pipeline") {
            resource.state = Some(resource::State::PipelineState(
                PipelineState::Inactive as i32,
            ));
        }
        Ok(GetResourceResponse {
            resource: Some(resource),
        })
    }

    async fn delete_resource(&mut self, name: &str) -> Result<DeleteResourceResponse, Status> {
        self.state.delete_calls.lock().unwrap().push(name.to_owned());
        if self.state.failing_deletes.contains(name) {
            return Err(Status::internal("state store unavailable"));
        }
        self.state.store.lock().unwrap().remove(name);
        Ok(DeleteResourceResponse {})
    }
}

#[tokio::test]
async fn full_run_passes_every_check_and_empties_the_store() {
    let connector = MockConnector::new(MockState::healthy());
    let fixtures = FixtureSet::fixed();
    let runner = ScenarioRunner::new(&connector, &fixtures, DeploymentMode::DirectMicroservice);

    let report = runner.run().await;

    assert_eq!(report.total(), FULL_RUN_CHECKS);
    assert_eq!(report.failed_count(), 0);
    assert!(report.is_success(DEFAULT_PASS_THRESHOLD));
    // Teardown deleted everything the exercise phase created.
    assert!(connector.state.store.lock().unwrap().is_empty());
    assert_eq!(connector.state.delete_calls.lock().unwrap().len(), 5);
}

#[tokio::test]
async fn generated_fixtures_pass_the_same_run() {
    let connector = MockConnector::new(MockState::healthy());
    let fixtures = FixtureSet::generated();
    let runner = ScenarioRunner::new(&connector, &fixtures, DeploymentMode::Localhost);

    let report = runner.run().await;

    assert_eq!(report.total(), FULL_RUN_CHECKS);
    assert!(report.is_success(DEFAULT_PASS_THRESHOLD));
}

#[tokio::test]
async fn api_gateway_mode_runs_no_private_checks() {
    let connector = MockConnector::new(MockState::healthy());
    let fixtures = FixtureSet::fixed();
    let runner = ScenarioRunner::new(&connector, &fixtures, DeploymentMode::ApiGateway);

    let report = runner.run().await;

    assert_eq!(report.total(), 0);
    // Vacuously successful; nothing was attempted.
    assert!(report.is_success(DEFAULT_PASS_THRESHOLD));
    assert!(connector.state.delete_calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn wrong_state_fails_only_the_state_check() {
    let state = MockState {
        degrade_pipelines: true,
        ..MockState::healthy()
    };
    let connector = MockConnector::new(state);
    let fixtures = FixtureSet::fixed();
    let runner = ScenarioRunner::new(&connector, &fixtures, DeploymentMode::DirectMicroservice);

    let report = runner.run().await;

    assert_eq!(report.total(), FULL_RUN_CHECKS);
    assert_eq!(report.failed_count(), 1);
    assert!(!report.is_success(DEFAULT_PASS_THRESHOLD));

    let failure = report.failures().next().unwrap();
    assert!(failure.name.contains("pipelines/pipeline-name"));
    assert!(failure.name.contains("state matched STATE_ACTIVE"));
    assert!(failure.detail.as_deref().unwrap().contains("STATE_ACTIVE"));
}

#[tokio::test]
async fn unreachable_controller_fails_every_check_without_aborting() {
    let state = MockState {
        refuse_connect: true,
        ..MockState::healthy()
    };
    let connector = MockConnector::new(state);
    let fixtures = FixtureSet::fixed();
    let runner = ScenarioRunner::new(&connector, &fixtures, DeploymentMode::DirectMicroservice);

    let report = runner.run().await;

    // Every planned check is accounted for, all as connectivity failures.
    assert_eq!(report.total(), FULL_RUN_CHECKS);
    assert_eq!(report.failed_count(), FULL_RUN_CHECKS);
    for failure in report.failures() {
        assert!(failure.detail.as_deref().unwrap().contains("connection failed"));
    }
}

#[tokio::test]
async fn failing_delete_does_not_stop_remaining_deletes() {
    let fixtures = FixtureSet::fixed();
    let model_name = fixtures.resource_name(meshprobe_core::fixture::ResourceKind::Model);
    let state = MockState {
        failing_deletes: HashSet::from([model_name.to_owned()]),
        ..MockState::healthy()
    };
    let connector = MockConnector::new(state);
    let runner = ScenarioRunner::new(&connector, &fixtures, DeploymentMode::DirectMicroservice);

    let report = runner.run().await;

    // All five deletes were attempted despite the first one failing.
    assert_eq!(connector.state.delete_calls.lock().unwrap().len(), 5);
    assert_eq!(report.failed_count(), 1);
    let failure = report.failures().next().unwrap();
    assert!(failure.name.contains("DeleteResource"));
    assert!(failure.name.contains(model_name));
}

#[tokio::test]
async fn unhealthy_liveness_does_not_abort_later_phases() {
    let state = MockState {
        liveness_status: Some(ServingStatus::NotServing),
        ..MockState::healthy()
    };
    let connector = MockConnector::new(state);
    let fixtures = FixtureSet::fixed();
    let runner = ScenarioRunner::new(&connector, &fixtures, DeploymentMode::DirectMicroservice);

    let report = runner.run().await;

    assert_eq!(report.total(), FULL_RUN_CHECKS);
    assert_eq!(report.failed_count(), 1);
    let failure = report.failures().next().unwrap();
    assert!(failure.name.contains("Liveness"));
    assert!(
        failure
            .detail
            .as_deref()
            .unwrap()
            .contains("SERVING_STATUS_NOT_SERVING")
    );
}

#[tokio::test]
async fn repeated_runs_are_idempotent_on_resource_content() {
    let connector = MockConnector::new(MockState::healthy());
    let fixtures = FixtureSet::fixed();

    for _ in 0..2 {
        let runner =
            ScenarioRunner::new(&connector, &fixtures, DeploymentMode::DirectMicroservice);
        let report = runner.run().await;
        // Upsert semantics: the second create-over-existing run reads back
        // the same content and passes identically.
        assert!(report.is_success(DEFAULT_PASS_THRESHOLD));
    }
}
