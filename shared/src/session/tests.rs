use super::*;
use crate::error::{ApiError, ApiErrorStatus};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

// =========================================================
// Shared Mock Components
// =========================================================

#[derive(Default)]
struct StoreState {
    /// Operation log to verify calling order
    log: RefCell<Vec<String>>,
    entries: RefCell<HashMap<String, String>>,
    /// Keys whose writes and deletes are rejected
    failing_keys: RefCell<Vec<String>>,
}

#[derive(Clone, Default)]
struct MemoryStore {
    state: Rc<StoreState>,
}

impl MemoryStore {
    fn with(entries: &[(&str, &str)]) -> Self {
        let store = Self::default();
        for (k, v) in entries {
            store
                .state
                .entries
                .borrow_mut()
                .insert(k.to_string(), v.to_string());
        }
        store
    }

    fn value(&self, key: &str) -> Option<String> {
        self.state.entries.borrow().get(key).cloned()
    }

    fn log(&self) -> Vec<String> {
        self.state.log.borrow().clone()
    }

    fn fail_on(&self, key: &str) {
        self.state.failing_keys.borrow_mut().push(key.to_string());
    }

    fn check(&self, op: &str, key: &str) -> ApiResult<()> {
        self.state.log.borrow_mut().push(format!("{}:{}", op, key));
        if self.state.failing_keys.borrow().iter().any(|k| k == key) {
            return Err(ApiError::storage(format!("quota exceeded for {}", key)));
        }
        Ok(())
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.value(key)
    }

    fn set(&self, key: &str, value: &str) -> ApiResult<()> {
        self.check("set", key)?;
        self.state
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> ApiResult<()> {
        self.check("delete", key)?;
        self.state.entries.borrow_mut().remove(key);
        Ok(())
    }
}

struct MockGateway {
    result: ApiResult<SessionResponse>,
    requests: RefCell<Vec<SignInRequest>>,
}

impl MockGateway {
    fn ok(token: &str, user: User) -> Self {
        Self {
            result: Ok(SessionResponse {
                token: token.to_string(),
                user,
            }),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn failing(error: ApiError) -> Self {
        Self {
            result: Err(error),
            requests: RefCell::new(Vec::new()),
        }
    }
}

#[async_trait(?Send)]
impl SessionGateway for MockGateway {
    async fn create_session(&self, request: &SignInRequest) -> ApiResult<SessionResponse> {
        self.requests.borrow_mut().push(request.clone());
        self.result.clone()
    }
}

fn keys() -> SessionKeys {
    SessionKeys::new("@GoBarber")
}

fn user(id: &str, name: &str) -> User {
    User {
        id: id.into(),
        name: name.into(),
        email: format!("{}@example.com", name.to_lowercase()),
        avatar_url: None,
    }
}

fn credentials() -> SignInRequest {
    SignInRequest {
        email: "ana@example.com".into(),
        password: "123456".into(),
    }
}

// =========================================================
// initialize
// =========================================================

#[test]
fn rehydrates_persisted_session() {
    let ana = user("1", "Ana");
    let raw = serde_json::to_string(&ana).unwrap();
    let store = MemoryStore::with(&[("@GoBarber:token", "tok-1"), ("@GoBarber:user", &raw)]);

    let ctx = SessionContext::initialize(store, keys());

    assert_eq!(ctx.session().map(|s| s.token.as_str()), Some("tok-1"));
    assert_eq!(ctx.current_user(), Some(&ana));
    assert_eq!(ctx.authorization().as_deref(), Some("Bearer tok-1"));
}

#[test]
fn token_without_user_is_no_session() {
    let store = MemoryStore::with(&[("@GoBarber:token", "tok-1")]);
    let ctx = SessionContext::initialize(store, keys());
    assert!(!ctx.is_authenticated());
    assert_eq!(ctx.authorization(), None);
}

#[test]
fn user_without_token_is_no_session() {
    let raw = serde_json::to_string(&user("1", "Ana")).unwrap();
    let store = MemoryStore::with(&[("@GoBarber:user", &raw)]);
    let ctx = SessionContext::initialize(store, keys());
    assert!(ctx.current_user().is_none());
}

#[test]
fn corrupt_user_record_is_no_session() {
    let store = MemoryStore::with(&[("@GoBarber:token", "tok-1"), ("@GoBarber:user", "{oops")]);
    let ctx = SessionContext::initialize(store, keys());
    assert!(!ctx.is_authenticated());
}

// =========================================================
// sign_in / sign_out
// =========================================================

#[tokio::test]
async fn sign_in_persists_both_fields_and_sets_session() {
    let store = MemoryStore::default();
    let mut ctx = SessionContext::initialize(store.clone(), keys());
    let ana = user("1", "Ana");
    let gateway = MockGateway::ok("tok-9", ana.clone());

    let session = ctx.sign_in(&gateway, &credentials()).await.unwrap();
    assert_eq!(session.token, "tok-9");

    assert_eq!(gateway.requests.borrow().as_slice(), &[credentials()]);
    assert_eq!(store.value("@GoBarber:token").as_deref(), Some("tok-9"));
    let persisted: User = serde_json::from_str(&store.value("@GoBarber:user").unwrap()).unwrap();
    assert_eq!(persisted, ana);
    assert_eq!(ctx.authorization().as_deref(), Some("Bearer tok-9"));

    // A fresh context over the same storage sees the same session
    let reloaded = SessionContext::initialize(store, keys());
    assert_eq!(reloaded.session(), ctx.session());
}

#[tokio::test]
async fn failed_sign_in_leaves_prior_session_untouched() {
    let ana = user("1", "Ana");
    let raw = serde_json::to_string(&ana).unwrap();
    let store = MemoryStore::with(&[("@GoBarber:token", "tok-1"), ("@GoBarber:user", &raw)]);
    let mut ctx = SessionContext::initialize(store.clone(), keys());
    let gateway = MockGateway::failing(ApiError::unauthorized("bad credentials"));

    let err = ctx.sign_in(&gateway, &credentials()).await.unwrap_err();

    assert_eq!(err.status, ApiErrorStatus::Unauthorized);
    assert_eq!(ctx.current_user(), Some(&ana));
    assert_eq!(store.value("@GoBarber:token").as_deref(), Some("tok-1"));
    assert!(store.log().is_empty());
}

#[test]
fn sign_out_clears_both_fields() {
    let raw = serde_json::to_string(&user("1", "Ana")).unwrap();
    let store = MemoryStore::with(&[("@GoBarber:token", "tok-1"), ("@GoBarber:user", &raw)]);
    let mut ctx = SessionContext::initialize(store.clone(), keys());

    ctx.sign_out().unwrap();

    assert!(!ctx.is_authenticated());
    assert_eq!(store.value("@GoBarber:token"), None);
    assert_eq!(store.value("@GoBarber:user"), None);
    assert_eq!(
        store.log(),
        vec!["delete:@GoBarber:token".to_string(), "delete:@GoBarber:user".to_string()]
    );
}

#[test]
fn sign_out_without_session_still_clears_storage() {
    let store = MemoryStore::with(&[("@GoBarber:token", "orphan")]);
    let mut ctx = SessionContext::initialize(store.clone(), keys());

    ctx.sign_out().unwrap();

    assert_eq!(store.value("@GoBarber:token"), None);
    assert!(ctx.session().is_none());
}

// =========================================================
// update_user
// =========================================================

#[tokio::test]
async fn update_user_replaces_user_and_rewrites_record() {
    let store = MemoryStore::default();
    let mut ctx = SessionContext::initialize(store.clone(), keys());
    ctx.sign_in(&MockGateway::ok("tok-1", user("1", "Ana")), &credentials())
        .await
        .unwrap();

    let renamed = User {
        avatar_url: Some("https://cdn.example.com/ana.png".into()),
        ..user("1", "Ana Paula")
    };
    assert_eq!(ctx.update_user(renamed.clone()), Ok(true));

    assert_eq!(ctx.current_user(), Some(&renamed));
    assert_eq!(ctx.session().map(|s| s.token.as_str()), Some("tok-1"));
    let persisted: User = serde_json::from_str(&store.value("@GoBarber:user").unwrap()).unwrap();
    assert_eq!(persisted, renamed);
}

#[test]
fn update_user_without_session_is_ignored() {
    let store = MemoryStore::default();
    let mut ctx = SessionContext::initialize(store.clone(), keys());

    assert_eq!(ctx.update_user(user("1", "Ana")), Ok(false));
    assert!(store.log().is_empty());
    assert!(ctx.current_user().is_none());
}

// =========================================================
// storage failures
// =========================================================

#[tokio::test]
async fn sign_in_fails_when_token_cannot_be_persisted() {
    let store = MemoryStore::default();
    store.fail_on("@GoBarber:token");
    let mut ctx = SessionContext::initialize(store.clone(), keys());

    let err = ctx
        .sign_in(&MockGateway::ok("tok-9", user("1", "Ana")), &credentials())
        .await
        .unwrap_err();

    assert_eq!(err.status, ApiErrorStatus::Storage);
    assert!(!ctx.is_authenticated());
    assert_eq!(ctx.authorization(), None);

    let reloaded = SessionContext::initialize(store, keys());
    assert!(!reloaded.is_authenticated());
}

#[tokio::test]
async fn partial_write_is_rolled_back_to_the_previous_session() {
    let ana = user("1", "Ana");
    let raw = serde_json::to_string(&ana).unwrap();
    let store = MemoryStore::with(&[("@GoBarber:token", "tok-1"), ("@GoBarber:user", &raw)]);
    let mut ctx = SessionContext::initialize(store.clone(), keys());
    store.fail_on("@GoBarber:user");

    let err = ctx
        .sign_in(&MockGateway::ok("tok-9", user("2", "Bia")), &credentials())
        .await
        .unwrap_err();

    assert_eq!(err.status, ApiErrorStatus::Storage);
    assert_eq!(ctx.current_user(), Some(&ana));
    assert_eq!(ctx.authorization().as_deref(), Some("Bearer tok-1"));
    // The new token was written first and then restored
    assert_eq!(store.value("@GoBarber:token").as_deref(), Some("tok-1"));
    let persisted: User = serde_json::from_str(&store.value("@GoBarber:user").unwrap()).unwrap();
    assert_eq!(persisted, ana);
}

#[tokio::test]
async fn partial_write_without_prior_session_clears_storage() {
    let store = MemoryStore::default();
    store.fail_on("@GoBarber:user");
    let mut ctx = SessionContext::initialize(store.clone(), keys());

    ctx.sign_in(&MockGateway::ok("tok-9", user("1", "Ana")), &credentials())
        .await
        .unwrap_err();

    assert_eq!(store.value("@GoBarber:token"), None);
    assert!(!SessionContext::initialize(store, keys()).is_authenticated());
}

#[tokio::test]
async fn update_user_keeps_memory_and_storage_in_step_on_failure() {
    let store = MemoryStore::default();
    let mut ctx = SessionContext::initialize(store.clone(), keys());
    let ana = user("1", "Ana");
    ctx.sign_in(&MockGateway::ok("tok-1", ana.clone()), &credentials())
        .await
        .unwrap();
    store.fail_on("@GoBarber:user");

    let err = ctx.update_user(user("1", "Ana Paula")).unwrap_err();

    assert_eq!(err.status, ApiErrorStatus::Storage);
    assert_eq!(ctx.current_user(), Some(&ana));
}

#[test]
fn sign_out_attempts_both_deletes_and_reports_failure() {
    let raw = serde_json::to_string(&user("1", "Ana")).unwrap();
    let store = MemoryStore::with(&[("@GoBarber:token", "tok-1"), ("@GoBarber:user", &raw)]);
    let mut ctx = SessionContext::initialize(store.clone(), keys());
    store.fail_on("@GoBarber:token");

    let err = ctx.sign_out().unwrap_err();

    assert_eq!(err.status, ApiErrorStatus::Storage);
    assert!(!ctx.is_authenticated());
    assert_eq!(store.value("@GoBarber:user"), None);
}
