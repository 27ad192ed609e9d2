//! In-memory implementations of the orchestrator's collaborators

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;

use statgate_core::domain::analysis::{
    AnalysisError, AnalysisResultData, AnalysisRun, IAnalysisRunRepository, NewAnalysisRun,
    ResultSection, RunId,
};
use statgate_core::domain::auth::{AuthError, Email, IUserRepository, NewUser, User, UserId};
use statgate_engine::{AnalysisEngine, AnalysisReport, EngineError, EngineRequest};

/// Engine that replays a fixed outcome and records every request
pub struct MockAnalysisEngine {
    outcome: Result<AnalysisReport, EngineError>,
    requests: Mutex<Vec<EngineRequest>>,
}

impl MockAnalysisEngine {
    pub fn returning(report: AnalysisReport) -> Self {
        Self {
            outcome: Ok(report),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: EngineError) -> Self {
        Self {
            outcome: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<EngineRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl AnalysisEngine for MockAnalysisEngine {
    async fn analyze(&self, request: EngineRequest) -> Result<AnalysisReport, EngineError> {
        self.requests.lock().unwrap().push(request);
        self.outcome.clone()
    }
}

/// Run ledger backed by vectors, with switchable write failures
#[derive(Default)]
pub struct InMemoryRunRepository {
    runs: Mutex<Vec<AnalysisRun>>,
    results: Mutex<Vec<AnalysisResultData>>,
    fail_create: bool,
    fail_save_results: bool,
}

impl InMemoryRunRepository {
    pub fn failing_create() -> Self {
        Self {
            fail_create: true,
            ..Default::default()
        }
    }

    pub fn failing_results() -> Self {
        Self {
            fail_save_results: true,
            ..Default::default()
        }
    }

    pub fn run_count(&self) -> usize {
        self.runs.lock().unwrap().len()
    }

    pub fn result_types(&self, run_id: RunId) -> Vec<String> {
        self.results
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.run_id == run_id)
            .map(|r| r.result_type.clone())
            .collect()
    }

    pub fn total_results(&self) -> usize {
        self.results.lock().unwrap().len()
    }
}

#[async_trait]
impl IAnalysisRunRepository for InMemoryRunRepository {
    async fn create_run(&self, run: &NewAnalysisRun) -> Result<AnalysisRun, AnalysisError> {
        if self.fail_create {
            return Err(AnalysisError::database("connection reset"));
        }
        let mut runs = self.runs.lock().unwrap();
        let next_id = runs.iter().map(|r| r.id.as_i64()).max().unwrap_or(0) + 1;
        let stored = run.clone().into_run(RunId::new(next_id));
        runs.push(stored.clone());
        Ok(stored)
    }

    async fn save_results(
        &self,
        run_id: RunId,
        sections: &[ResultSection],
    ) -> Result<(), AnalysisError> {
        if self.fail_save_results {
            return Err(AnalysisError::database("disk full"));
        }
        let mut results = self.results.lock().unwrap();
        for section in sections {
            let id = results.len() as i64 + 1;
            results.push(AnalysisResultData {
                id,
                run_id,
                result_type: section.result_type.clone(),
                data: section.data.clone(),
            });
        }
        Ok(())
    }

    async fn find_runs_by_user(&self, user_id: UserId) -> Result<Vec<AnalysisRun>, AnalysisError> {
        let mut owned: Vec<AnalysisRun> = self
            .runs
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.run_at.cmp(&a.run_at).then(b.id.cmp(&a.id)));
        Ok(owned)
    }

    async fn find_run_by_id(&self, run_id: RunId) -> Result<Option<AnalysisRun>, AnalysisError> {
        Ok(self
            .runs
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == run_id)
            .cloned())
    }

    async fn find_results_by_run(
        &self,
        run_id: RunId,
    ) -> Result<Vec<AnalysisResultData>, AnalysisError> {
        Ok(self
            .results
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.run_id == run_id)
            .cloned()
            .collect())
    }

    async fn delete_run(&self, run_id: RunId) -> Result<(), AnalysisError> {
        let mut runs = self.runs.lock().unwrap();
        let before = runs.len();
        runs.retain(|r| r.id != run_id);
        if runs.len() == before {
            return Err(AnalysisError::RunNotFound {
                run_id: run_id.as_i64(),
            });
        }
        self.results.lock().unwrap().retain(|r| r.run_id != run_id);
        Ok(())
    }
}

/// Credential store backed by a vector
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl IUserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == *email)
            .cloned())
    }

    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, AuthError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.user_id == *user_id)
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, AuthError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::EmailAlreadyExists {
                email: user.email.as_str().to_string(),
            });
        }
        let created = User {
            user_id: UserId::new(users.len() as i64 + 1),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            created_at: user.created_at,
            updated_at: Utc::now(),
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn update(&self, user: &User) -> Result<(), AuthError> {
        let mut users = self.users.lock().unwrap();
        let Some(stored) = users.iter_mut().find(|u| u.user_id == user.user_id) else {
            return Err(AuthError::UserIdNotFound {
                user_id: user.user_id.to_string(),
            });
        };
        *stored = user.clone();
        Ok(())
    }
}
