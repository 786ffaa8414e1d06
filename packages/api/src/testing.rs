//! In-process stand-in for the member service, bound to an ephemeral port.
//!
//! Behaves like the real server for everything the client relies on: public signup
//! and login, bearer-protected member endpoints, `{ "message": ... }` error bodies,
//! tokens handed back in the `Authorization` header. Every request is recorded so
//! tests can assert on method, path, headers and body.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};

use crate::models::{
    AuthenticationResponse, LoginRequest, Member, MemberRegistrationRequest, MemberUpdateRequest,
};
use crate::token::{decode_claims, now_secs, test_token};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

#[derive(Default)]
struct FakeState {
    members: Vec<Member>,
    passwords: HashMap<String, String>,
    next_id: i64,
    requests: Vec<RecordedRequest>,
}

type Shared = Arc<Mutex<FakeState>>;

pub struct FakeServer {
    pub base_url: String,
    state: Shared,
}

impl FakeServer {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(FakeState {
            next_id: 1,
            ..Default::default()
        }));
        let router = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn members(&self) -> Vec<Member> {
        self.state.lock().unwrap().members.clone()
    }
}

fn header(headers: &HeaderMap, name: axum::http::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

fn error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "message": message,
            "statusCode": status.as_u16(),
        })),
    )
        .into_response()
}

fn authorized(headers: &HeaderMap) -> bool {
    header(headers, AUTHORIZATION)
        .and_then(|h| h.strip_prefix("Bearer ").map(str::to_string))
        .and_then(|t| decode_claims(&t).ok())
        .is_some_and(|claims| !claims.is_expired_at(now_secs()))
}

fn issue_token(email: &str) -> String {
    test_token(email, &["ROLE_USER"], Some(now_secs() + 3600))
}

async fn handle(
    State(state): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let mut state = state.lock().unwrap();
    state.requests.push(RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        authorization: header(&headers, AUTHORIZATION),
        content_type: header(&headers, CONTENT_TYPE),
        body: body.to_vec(),
    });

    let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
    match (method.as_str(), segments.as_slice()) {
        ("POST", ["api", "v1", "auth", "login"]) => {
            let Ok(req) = serde_json::from_slice::<LoginRequest>(&body) else {
                return error(StatusCode::BAD_REQUEST, "malformed body");
            };
            if state.passwords.get(&req.username) != Some(&req.password) {
                return error(StatusCode::UNAUTHORIZED, "invalid credentials");
            }
            let member = state
                .members
                .iter()
                .find(|m| m.email == req.username)
                .cloned();
            let token = issue_token(&req.username);
            (
                StatusCode::OK,
                [(AUTHORIZATION, token.clone())],
                Json(AuthenticationResponse { token, member }),
            )
                .into_response()
        }
        ("POST", ["api", "v1", "members"]) => {
            let Ok(req) = serde_json::from_slice::<MemberRegistrationRequest>(&body) else {
                return error(StatusCode::BAD_REQUEST, "malformed body");
            };
            if state.passwords.contains_key(&req.email) {
                return error(StatusCode::CONFLICT, "email already taken");
            }
            let id = state.next_id;
            state.next_id += 1;
            state.passwords.insert(req.email.clone(), req.password);
            state.members.push(Member {
                id,
                name: req.name,
                email: req.email.clone(),
                age: req.age,
                gender: Some(req.gender),
                roles: vec!["ROLE_USER".to_string()],
                username: req.email.clone(),
                profile_image_id: None,
            });
            (StatusCode::OK, [(AUTHORIZATION, issue_token(&req.email))]).into_response()
        }
        (_, ["api", "v1", "members", ..]) if !authorized(&headers) => {
            error(StatusCode::FORBIDDEN, "Forbidden")
        }
        ("GET", ["api", "v1", "members"]) => Json(state.members.clone()).into_response(),
        (_, ["api", "v1", "members", id, rest @ ..]) => {
            let Ok(id) = id.parse::<i64>() else {
                return error(StatusCode::BAD_REQUEST, "bad id");
            };
            let not_found = format!("member with id [{id}] not found");
            let Some(index) = state.members.iter().position(|m| m.id == id) else {
                return error(StatusCode::NOT_FOUND, &not_found);
            };
            match (method.as_str(), rest) {
                ("GET", []) => Json(state.members[index].clone()).into_response(),
                ("PUT", []) => {
                    let Ok(req) = serde_json::from_slice::<MemberUpdateRequest>(&body) else {
                        return error(StatusCode::BAD_REQUEST, "malformed body");
                    };
                    let member = &mut state.members[index];
                    member.name = req.name;
                    member.email = req.email;
                    member.age = req.age;
                    if req.gender.is_some() {
                        member.gender = req.gender;
                    }
                    StatusCode::OK.into_response()
                }
                ("DELETE", []) => {
                    state.members.remove(index);
                    StatusCode::OK.into_response()
                }
                ("POST", ["profile-image"]) => {
                    let multipart = header(&headers, CONTENT_TYPE)
                        .is_some_and(|ct| ct.starts_with("multipart/form-data"));
                    if !multipart {
                        return error(StatusCode::UNSUPPORTED_MEDIA_TYPE, "expected multipart");
                    }
                    let uploads = state.requests.len();
                    state.members[index].profile_image_id = Some(format!("image-{id}-{uploads}"));
                    StatusCode::OK.into_response()
                }
                _ => error(StatusCode::METHOD_NOT_ALLOWED, "method not allowed"),
            }
        }
        _ => error(StatusCode::NOT_FOUND, "not found"),
    }
}
