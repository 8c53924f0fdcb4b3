//! 체크 리포트 -- 독립 단언의 기록과 합격률 집계
//!
//! 모든 단언은 서로 독립적인 [`Check`]로 기록됩니다. 실패해도 예외를
//! 던지거나 런을 중단하지 않으며, 구성된 모든 체크는 항상 실행됩니다.
//! 런의 최종 판정은 합격률이 임계값(기본 100%)에 도달했는지로 정합니다.

use serde::Serialize;

/// 런 판정에 쓰는 기본 합격률 임계값 (100%)
pub const DEFAULT_PASS_THRESHOLD: f64 = 1.0;

/// 단일 단언의 결과
#[derive(Debug, Clone, Serialize)]
pub struct Check {
    /// 체크 이름 (무엇을 검사했는지)
    pub name: String,
    /// 통과 여부
    pub passed: bool,
    /// 실패 시 상세 사유
    pub detail: Option<String>,
}

/// 런 전체의 체크 집계
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckReport {
    checks: Vec<Check>,
}

impl CheckReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 체크 결과를 기록합니다.
    pub fn record(&mut self, name: impl Into<String>, passed: bool, detail: Option<String>) {
        let check = Check {
            name: name.into(),
            passed,
            detail,
        };
        let result = if check.passed { "pass" } else { "fail" };
        metrics::counter!("meshprobe_checks_total", "result" => result).increment(1);
        if !check.passed {
            tracing::warn!(check = %check.name, detail = ?check.detail, "check failed");
        }
        self.checks.push(check);
    }

    /// 통과한 체크를 기록합니다.
    pub fn record_pass(&mut self, name: impl Into<String>) {
        self.record(name, true, None);
    }

    /// 실패한 체크를 기록합니다.
    pub fn record_fail(&mut self, name: impl Into<String>, detail: impl Into<String>) {
        self.record(name, false, Some(detail.into()));
    }

    /// 다른 리포트의 체크들을 이어 붙입니다.
    pub fn merge(&mut self, other: CheckReport) {
        self.checks.extend(other.checks);
    }

    /// 전체 체크 목록
    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// 실패한 체크 목록
    pub fn failures(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(|c| !c.passed)
    }

    pub fn total(&self) -> usize {
        self.checks.len()
    }

    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.total() - self.passed_count()
    }

    /// 합격률 (체크가 없으면 1.0)
    ///
    /// api-gateway 모드처럼 실행할 체크가 전혀 없는 런은 공허하게
    /// 성공으로 처리합니다.
    pub fn pass_rate(&self) -> f64 {
        if self.checks.is_empty() {
            return 1.0;
        }
        self.passed_count() as f64 / self.total() as f64
    }

    /// 합격률이 임계값 이상인지 판정합니다.
    pub fn is_success(&self, threshold: f64) -> bool {
        self.pass_rate() >= threshold
    }
}
