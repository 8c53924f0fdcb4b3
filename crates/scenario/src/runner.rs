//! Phase-by-phase execution of the controller scenario plan.
//!
//! Phases run strictly sequentially. The RPC connection is a scoped
//! resource: opened fresh at the start of each phase, dropped at the end.
//! A connection failure marks every check of that phase as failed but
//! never aborts the run; later phases still attempt their own connection.
//!
//! Assertions are independent. A failed check is recorded as-is (no
//! retry, no short-circuit) and contributes to the aggregate pass rate.

use tracing::{debug, info};

use meshprobe_core::check::CheckReport;
use meshprobe_core::fixture::FixtureSet;
use meshprobe_core::scenario::{Operation, Phase, ScenarioStep, plan, steps_for_phase};
use meshprobe_core::topology::DeploymentMode;

use meshprobe_controller_client::proto::{SERVICE_NAME, ServingStatus};
use meshprobe_controller_client::{ControllerApi, ControllerConnector};
use meshprobe_controller_client::{expected_state_name, resource_for, state_matches};

/// Executes the scenario plan for one run.
pub struct ScenarioRunner<'a, C: ControllerConnector> {
    connector: &'a C,
    fixtures: &'a FixtureSet,
    mode: DeploymentMode,
}

impl<'a, C: ControllerConnector> ScenarioRunner<'a, C> {
    pub fn new(connector: &'a C, fixtures: &'a FixtureSet, mode: DeploymentMode) -> Self {
        Self {
            connector,
            fixtures,
            mode,
        }
    }

    /// Run all phases and collect the aggregated check report.
    pub async fn run(&self) -> CheckReport {
        let steps = plan(self.mode);
        let mut report = CheckReport::new();

        if steps.is_empty() {
            // The private RPC surface is not reachable through the gateway.
            info!(mode = %self.mode, "no private surface checks to run");
            return report;
        }

        for phase in Phase::ORDER {
            let phase_steps = steps_for_phase(&steps, phase);
            if phase_steps.is_empty() {
                continue;
            }
            self.run_phase(phase, &phase_steps, &mut report).await;
        }

        info!(
            total = report.total(),
            failed = report.failed_count(),
            pass_rate = report.pass_rate(),
            "scenario finished"
        );
        report
    }

    async fn run_phase(&self, phase: Phase, steps: &[ScenarioStep], report: &mut CheckReport) {
        debug!(%phase, steps = steps.len(), addr = self.connector.target(), "starting phase");

        let mut api = match self.connector.connect().await {
            Ok(api) => api,
            Err(e) => {
                // Connectivity failure is fatal for this phase's checks only.
                for step in steps {
                    for name in self.check_names(step.operation) {
                        report.record_fail(name, format!("connection failed: {e}"));
                    }
                }
                return;
            }
        };

        for step in steps {
            self.execute(api.as_mut(), step.operation, report).await;
        }
        // Connection drops here; the next phase opens a fresh one.
    }

    /// Check names for one operation, shared between the execution path
    /// and connectivity-failure accounting so totals stay consistent.
    fn check_names(&self, operation: Operation) -> Vec<String> {
        match operation {
            Operation::Liveness => vec![
                format!("{SERVICE_NAME}/Liveness response status ok"),
                format!("{SERVICE_NAME}/Liveness health status is SERVING_STATUS_SERVING"),
            ],
            Operation::Readiness => vec![
                format!("{SERVICE_NAME}/Readiness response status ok"),
                format!("{SERVICE_NAME}/Readiness health status is SERVING_STATUS_SERVING"),
            ],
            Operation::UpdateResource(kind) => {
                let name = self.fixtures.resource_name(kind);
                vec![
                    format!("{SERVICE_NAME}/UpdateResource {name} response status ok"),
                    format!("{SERVICE_NAME}/UpdateResource {name} response name matched"),
                ]
            }
            Operation::GetResource(kind) => {
                let name = self.fixtures.resource_name(kind);
                let expected = expected_state_name(kind);
                vec![
                    format!("{SERVICE_NAME}/GetResource {name} response status ok"),
                    format!("{SERVICE_NAME}/GetResource {name} response name matched"),
                    format!("{SERVICE_NAME}/GetResource {name} response state matched {expected}"),
                ]
            }
            Operation::DeleteResource(kind) => {
                let name = self.fixtures.resource_name(kind);
                vec![format!(
                    "{SERVICE_NAME}/DeleteResource {name} response status ok"
                )]
            }
        }
    }

    async fn execute(
        &self,
        api: &mut dyn ControllerApi,
        operation: Operation,
        report: &mut CheckReport,
    ) {
        let names = self.check_names(operation);
        match operation {
            Operation::Liveness => {
                let status = api
                    .liveness()
                    .await
                    .map(|r| r.health_check_response.map(|h| h.serving_status()));
                record_health_checks(report, &names, status);
            }
            Operation::Readiness => {
                let status = api
                    .readiness()
                    .await
                    .map(|r| r.health_check_response.map(|h| h.serving_status()));
                record_health_checks(report, &names, status);
            }
            Operation::UpdateResource(kind) => {
                let resource_name = self.fixtures.resource_name(kind);
                let resource = resource_for(kind, resource_name);
                match api.update_resource(resource).await {
                    Ok(response) => {
                        report.record_pass(&names[0]);
                        let echoed = response.resource.as_ref().map(|r| r.name.as_str());
                        if echoed == Some(resource_name) {
                            report.record_pass(&names[1]);
                        } else {
                            report.record_fail(
                                &names[1],
                                format!("expected name '{resource_name}', got {echoed:?}"),
                            );
                        }
                    }
                    Err(status) => record_rpc_failure(report, &names, &status),
                }
            }
            Operation::GetResource(kind) => {
                let resource_name = self.fixtures.resource_name(kind);
                match api.get_resource(resource_name).await {
                    Ok(response) => {
                        report.record_pass(&names[0]);
                        match response.resource {
                            Some(resource) => {
                                if resource.name == resource_name {
                                    report.record_pass(&names[1]);
                                } else {
                                    report.record_fail(
                                        &names[1],
                                        format!(
                                            "expected name '{resource_name}', got '{}'",
                                            resource.name
                                        ),
                                    );
                                }
                                if state_matches(kind, &resource) {
                                    report.record_pass(&names[2]);
                                } else {
                                    report.record_fail(
                                        &names[2],
                                        format!(
                                            "expected state {}, got {:?}",
                                            expected_state_name(kind),
                                            resource.state
                                        ),
                                    );
                                }
                            }
                            None => {
                                report.record_fail(&names[1], "response carried no resource");
                                report.record_fail(&names[2], "response carried no resource");
                            }
                        }
                    }
                    Err(status) => record_rpc_failure(report, &names, &status),
                }
            }
            Operation::DeleteResource(kind) => {
                let resource_name = self.fixtures.resource_name(kind);
                match api.delete_resource(resource_name).await {
                    Ok(_) => report.record_pass(&names[0]),
                    Err(status) => record_rpc_failure(report, &names, &status),
                }
            }
        }
    }
}

fn record_health_checks(
    report: &mut CheckReport,
    names: &[String],
    status: Result<Option<ServingStatus>, tonic::Status>,
) {
    match status {
        Ok(serving) => {
            report.record_pass(&names[0]);
            if serving == Some(ServingStatus::Serving) {
                report.record_pass(&names[1]);
            } else {
                report.record_fail(
                    &names[1],
                    format!(
                        "expected SERVING_STATUS_SERVING, got {}",
                        serving.map_or("no payload", |s| s.as_str_name())
                    ),
                );
            }
        }
        Err(status) => record_rpc_failure(report, names, &status),
    }
}

/// One RPC failure fails every check that depended on its response.
fn record_rpc_failure(report: &mut CheckReport, names: &[String], status: &tonic::Status) {
    for name in names {
        report.record_fail(name, format!("rpc failed: {status}"));
    }
}
