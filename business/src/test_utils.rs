//! Test utilities for business layer testing with mock servers.
//!
//! A [`TestContext`] serves both the REST API and the identity provider from
//! one `wiremock` server, so a test can drive the gate and the workspace
//! end to end without touching the network.

#![cfg(test)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use ustr::Ustr;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{
    BusinessConfig, FirebaseIdentity, ModerationApi, ModerationWorkspace, ModeratorSession,
    Prompter, RestModerationApi, SessionGate,
};

pub const TEST_API_KEY: &str = "test-api-key";
pub const SIGN_IN_PATH: &str = "/v1/accounts:signInWithPassword";

/// Test context that holds a mock server and clients configured against it.
pub struct TestContext {
    pub mock_server: MockServer,
    pub api: Arc<RestModerationApi>,
    pub identity: Arc<FirebaseIdentity>,
}

impl TestContext {
    pub async fn new() -> Self {
        let mock_server = MockServer::start().await;
        let config = BusinessConfig::single_host(mock_server.uri(), TEST_API_KEY);

        Self {
            api: Arc::new(RestModerationApi::new(config.clone())),
            identity: Arc::new(FirebaseIdentity::new(config)),
            mock_server,
        }
    }

    pub fn gate(&self) -> SessionGate {
        SessionGate::new(self.identity.clone(), self.api.clone())
    }

    pub fn workspace(&self, moderator_id: &str) -> ModerationWorkspace {
        let api: Arc<dyn ModerationApi> = self.api.clone();
        ModerationWorkspace::new(
            api,
            ModeratorSession {
                moderator_id: Ustr::from(moderator_id),
                email: "mod@volun.org".to_owned(),
            },
        )
    }

    /// Workspace already loaded with `users`.
    pub async fn loaded_workspace(&self, users: Vec<Value>) -> ModerationWorkspace {
        self.mock_list_users(users).await;
        let mut workspace = self.workspace("mod-1");
        workspace.load().await.expect("user list should load");
        workspace
    }

    // =========================================================================
    // Identity provider mocks
    // =========================================================================

    pub async fn mock_sign_in(&self, uid: &str, email: &str, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path(SIGN_IN_PATH))
            .and(query_param("key", TEST_API_KEY))
            .and(body_partial_json(json!({ "returnSecureToken": true })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "kind": "identitytoolkit#VerifyPasswordResponse",
                "localId": uid,
                "email": email,
                "idToken": "id-token",
                "refreshToken": "refresh-token",
                "expiresIn": "3600",
                "registered": true
            })))
            .expect(expected_calls)
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_sign_in_rejected(&self, reason: &str) {
        Mock::given(method("POST"))
            .and(path(SIGN_IN_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "code": 400, "message": reason, "errors": [] }
            })))
            .expect(1)
            .mount(&self.mock_server)
            .await;
    }

    pub async fn expect_no_sign_in(&self) {
        Mock::given(method("POST"))
            .and(path(SIGN_IN_PATH))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.mock_server)
            .await;
    }

    // =========================================================================
    // REST API mocks
    // =========================================================================

    pub async fn mock_profile(&self, uid: &str, status: u16, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/usuarios/{uid}")))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .expect(1)
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_list_users(&self, users: Vec<Value>) {
        Mock::given(method("GET"))
            .and(path("/usuarios/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(users)))
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_list_users_error(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path("/usuarios/"))
            .respond_with(ResponseTemplate::new(status).set_body_string("indisponível"))
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_set_suspended(&self, id: &str, suspended: bool, status: u16, calls: u64) {
        Mock::given(method("PUT"))
            .and(path(format!("/usuarios/{id}")))
            .and(body_partial_json(json!({ "userSuspenso": suspended })))
            .respond_with(ResponseTemplate::new(status).set_body_string(if status < 300 {
                ""
            } else {
                "não foi possível atualizar"
            }))
            .expect(calls)
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_delete(&self, id: &str, status: u16, calls: u64) {
        Mock::given(method("DELETE"))
            .and(path(format!("/usuarios/{id}")))
            .respond_with(ResponseTemplate::new(status).set_body_string(if status < 300 {
                ""
            } else {
                "não foi possível excluir"
            }))
            .expect(calls)
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mock_audit(&self, status: u16, calls: u64) {
        Mock::given(method("POST"))
            .and(path("/acoes-moderacao"))
            .respond_with(ResponseTemplate::new(status))
            .expect(calls)
            .mount(&self.mock_server)
            .await;
    }

    /// Bodies of every audit write the server received, in order.
    pub async fn audit_bodies(&self) -> Vec<Value> {
        self.mock_server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.method.as_str() == "POST" && r.url.path() == "/acoes-moderacao")
            .map(|r| serde_json::from_slice(&r.body).expect("audit body should be JSON"))
            .collect()
    }
}

pub fn sample_user(id: &str, name: &str, suspended: bool) -> Value {
    json!({
        "_id": id,
        "nome": name,
        "sobrenome": "Silva",
        "ddd": "11",
        "telefone": "987654321",
        "data_nascimento": "1995-08-20",
        "userSuspenso": suspended
    })
}

/// Prompter that replays canned answers and remembers what it was asked.
#[derive(Default)]
pub struct ScriptedPrompter {
    confirms: Mutex<VecDeque<bool>>,
    inputs: Mutex<VecDeque<Option<String>>>,
    pub asked: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn confirming(answer: bool) -> Self {
        let prompter = Self::default();
        prompter
            .confirms
            .lock()
            .expect("lock")
            .push_back(answer);
        prompter
    }

    pub fn typing(text: Option<&str>) -> Self {
        let prompter = Self::default();
        prompter
            .inputs
            .lock()
            .expect("lock")
            .push_back(text.map(str::to_owned));
        prompter
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().expect("lock").clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, message: &str) -> bool {
        self.asked.lock().expect("lock").push(message.to_owned());
        self.confirms
            .lock()
            .expect("lock")
            .pop_front()
            .expect("unexpected confirmation prompt")
    }

    fn input(&self, title: &str) -> Option<String> {
        self.asked.lock().expect("lock").push(title.to_owned());
        self.inputs
            .lock()
            .expect("lock")
            .pop_front()
            .expect("unexpected input prompt")
    }
}
