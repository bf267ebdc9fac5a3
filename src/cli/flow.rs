//! Select -> compare -> display state machine.
//!
//! Comparison requests are asynchronous; each one is issued under a
//! monotonically increasing token and only the most recent token may
//! apply its outcome. A reply carrying an older token is discarded, so
//! a slow earlier request can never overwrite a newer result set.

use crate::client::ClientError;
use crate::forms::ComparisonType;
use crate::models::Build;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    NoBaseline,
    BaselineSelected,
    Comparing(ComparisonType),
    ResultsShown,
}

pub struct ComparisonFlow {
    state: FlowState,
    baseline: Option<Build>,
    results: Vec<Build>,
    loading: bool,
    next_token: u64,
    current_token: Option<u64>,
}

impl ComparisonFlow {
    pub fn new() -> Self {
        Self {
            state: FlowState::NoBaseline,
            baseline: None,
            results: Vec::new(),
            loading: false,
            next_token: 0,
            current_token: None,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn baseline(&self) -> Option<&Build> {
        self.baseline.as_ref()
    }

    pub fn results(&self) -> &[Build] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Picking a baseline from any state clears prior results.
    pub fn select_baseline(&mut self, build: Build) {
        self.baseline = Some(build);
        self.results.clear();
        self.loading = false;
        self.current_token = None;
        self.state = FlowState::BaselineSelected;
    }

    pub fn deselect(&mut self) {
        self.baseline = None;
        self.results.clear();
        self.loading = false;
        self.current_token = None;
        self.state = FlowState::NoBaseline;
    }

    /// Issue a request token for a new comparison. Returns `None` when no
    /// baseline is selected.
    pub fn begin_comparison(&mut self, kind: ComparisonType) -> Option<u64> {
        self.baseline.as_ref()?;

        self.next_token += 1;
        let token = self.next_token;
        self.current_token = Some(token);
        self.loading = true;
        self.state = FlowState::Comparing(kind);
        Some(token)
    }

    /// Apply a comparison outcome. Outcomes carrying a stale token are
    /// dropped. A failed request degrades to an empty result list.
    pub fn finish_comparison(&mut self, token: u64, outcome: Result<Vec<Build>, ClientError>) {
        if self.current_token != Some(token) {
            tracing::debug!(token, "Discarding stale comparison response");
            return;
        }

        self.results = match outcome {
            Ok(builds) => builds,
            Err(err) => {
                tracing::error!("Comparison failed: {}", err);
                Vec::new()
            }
        };
        self.loading = false;
        self.state = FlowState::ResultsShown;
    }
}

impl Default for ComparisonFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(id: &str, price: i64) -> Build {
        Build {
            id: id.to_string(),
            company: "PC Shop".to_string(),
            title: format!("Build {}", id),
            description: String::new(),
            price,
            price_formatted: String::new(),
            cpu: "I5-12400F".to_string(),
            gpu: "RTX 3060".to_string(),
            ram: "16".to_string(),
            case_color: None,
            photo_url: None,
            vk_url: String::new(),
            is_our_build: false,
            parsed_at: chrono::Utc::now(),
            price_comparison: None,
        }
    }

    #[test]
    fn starts_without_baseline() {
        let flow = ComparisonFlow::new();
        assert_eq!(flow.state(), FlowState::NoBaseline);
        assert!(flow.baseline().is_none());
        assert!(flow.results().is_empty());
    }

    #[test]
    fn cannot_compare_without_baseline() {
        let mut flow = ComparisonFlow::new();
        assert!(flow.begin_comparison(ComparisonType::Price).is_none());
        assert_eq!(flow.state(), FlowState::NoBaseline);
    }

    #[test]
    fn happy_path_reaches_results() {
        let mut flow = ComparisonFlow::new();
        flow.select_baseline(build("b1", 100_000));
        assert_eq!(flow.state(), FlowState::BaselineSelected);

        let token = flow.begin_comparison(ComparisonType::Price).unwrap();
        assert_eq!(flow.state(), FlowState::Comparing(ComparisonType::Price));
        assert!(flow.is_loading());

        flow.finish_comparison(token, Ok(vec![build("b2", 90_000)]));
        assert_eq!(flow.state(), FlowState::ResultsShown);
        assert!(!flow.is_loading());
        assert_eq!(flow.results().len(), 1);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut flow = ComparisonFlow::new();
        flow.select_baseline(build("b1", 100_000));

        let first = flow.begin_comparison(ComparisonType::Price).unwrap();
        let second = flow.begin_comparison(ComparisonType::Specs).unwrap();
        assert_ne!(first, second);

        // newer request resolves first
        flow.finish_comparison(second, Ok(vec![build("b2", 90_000)]));
        assert_eq!(flow.results().len(), 1);

        // slow first request must not overwrite
        flow.finish_comparison(first, Ok(vec![build("b3", 80_000), build("b4", 85_000)]));
        assert_eq!(flow.results().len(), 1);
        assert_eq!(flow.results()[0].id, "b2");
    }

    #[test]
    fn reselecting_baseline_clears_results() {
        let mut flow = ComparisonFlow::new();
        flow.select_baseline(build("b1", 100_000));
        let token = flow.begin_comparison(ComparisonType::Price).unwrap();
        flow.finish_comparison(token, Ok(vec![build("b2", 90_000)]));

        flow.select_baseline(build("b5", 200_000));
        assert_eq!(flow.state(), FlowState::BaselineSelected);
        assert!(flow.results().is_empty());

        // token from before the reselect is stale now
        flow.finish_comparison(token, Ok(vec![build("b6", 190_000)]));
        assert!(flow.results().is_empty());
    }

    #[test]
    fn failure_degrades_to_empty_results() {
        let mut flow = ComparisonFlow::new();
        flow.select_baseline(build("b1", 100_000));
        let token = flow.begin_comparison(ComparisonType::Specs).unwrap();

        flow.finish_comparison(
            token,
            Err(ClientError::RequestFailed("boom".to_string())),
        );
        assert_eq!(flow.state(), FlowState::ResultsShown);
        assert!(flow.results().is_empty());
        assert!(!flow.is_loading());
    }

    #[test]
    fn deselect_returns_to_initial_state() {
        let mut flow = ComparisonFlow::new();
        flow.select_baseline(build("b1", 100_000));
        let token = flow.begin_comparison(ComparisonType::Price).unwrap();
        flow.finish_comparison(token, Ok(vec![build("b2", 90_000)]));

        flow.deselect();
        assert_eq!(flow.state(), FlowState::NoBaseline);
        assert!(flow.baseline().is_none());
        assert!(flow.results().is_empty());
    }
}
