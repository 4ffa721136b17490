//! HTTP client for the portal API.
//!
//! The client is built from an explicit [`Session`]; every authenticated call
//! carries its token as a bearer header.

use std::time::Duration;

use portal_core::date_range::DateRange;
use portal_core::event::{Event, EventRecord, NewEvent, parse_events};
use portal_core::session::{Role, Session};
use portal_core::{PortalError, PortalResult};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

const EVENTS_FALLBACK: &str = "Failed to fetch events";
const UPCOMING_FALLBACK: &str = "Failed to fetch upcoming events";

pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Option<Session>,
}

// Response types matching the portal API

#[derive(Debug, Deserialize)]
pub struct ClassSummary {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "classId", default)]
    pub class_id: Option<String>,
    pub name: String,
    #[serde(rename = "totalStudents", default)]
    pub total_students: u32,
}

#[derive(Debug, Deserialize)]
pub struct GuideSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Deserialize)]
struct GuideList {
    users: Vec<GuideSummary>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
    role: Role,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
    user: LoginUser,
}

#[derive(Deserialize)]
struct LoginUser {
    email: String,
    role: Role,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: Option<String>,
}

impl ApiClient {
    pub fn new(api_url: &str, session: Option<Session>) -> PortalResult<Self> {
        let base_url = parse_base_url(api_url)?;
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PortalError::Http(e.to_string()))?;

        Ok(ApiClient {
            http,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> PortalResult<&Session> {
        self.session.as_ref().ok_or(PortalError::NotLoggedIn)
    }

    fn endpoint(&self, path: &str) -> PortalResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| PortalError::Config(format!("Invalid endpoint '{path}': {e}")))
    }

    fn authed(&self, method: Method, path: &str) -> PortalResult<RequestBuilder> {
        let session = self.session()?;
        Ok(self
            .http
            .request(method, self.endpoint(path)?)
            .bearer_auth(&session.token))
    }

    fn events_request(&self, range: &DateRange) -> PortalResult<RequestBuilder> {
        Ok(self.authed(Method::GET, "events")?.query(&range.query()))
    }

    fn guides_request(&self) -> PortalResult<RequestBuilder> {
        Ok(self
            .authed(Method::GET, "users")?
            .query(&[("role", Role::Guide.to_string())]))
    }

    /// POST /auth/login
    pub async fn login(&self, email: &str, password: &str, role: Role) -> PortalResult<Session> {
        let req = self
            .http
            .post(self.endpoint("auth/login")?)
            .json(&LoginRequest {
                email,
                password,
                role,
            });
        let resp: LoginResponse = send_json(req, "Login failed").await?;
        tracing::info!(email = %resp.user.email, role = %resp.user.role, "logged in");

        Ok(Session {
            token: resp.token,
            role: resp.user.role,
            email: resp.user.email,
        })
    }

    /// GET /events?startDate=..&endDate=.. for a month view
    pub async fn list_events(&self, range: &DateRange) -> PortalResult<Vec<Event>> {
        self.fetch_events(range, EVENTS_FALLBACK).await
    }

    /// GET /events?startDate=..&endDate=.. for the upcoming list
    pub async fn list_upcoming_events(&self, range: &DateRange) -> PortalResult<Vec<Event>> {
        self.fetch_events(range, UPCOMING_FALLBACK).await
    }

    async fn fetch_events(&self, range: &DateRange, fallback: &str) -> PortalResult<Vec<Event>> {
        tracing::debug!(from = %range.start_param(), to = %range.end_param(), "fetching events");
        let records: Vec<EventRecord> = send_json(self.events_request(range)?, fallback).await?;
        let fetched = records.len();
        let events = parse_events(records);
        tracing::debug!(fetched, kept = events.len(), "events fetched");
        Ok(events)
    }

    /// POST /events
    pub async fn create_event(&self, event: &NewEvent) -> PortalResult<Event> {
        let req = self.authed(Method::POST, "events")?.json(event);
        let record: EventRecord = send_json(req, "Failed to add event").await?;
        Event::try_from(record)
    }

    /// GET /classes
    pub async fn list_classes(&self) -> PortalResult<Vec<ClassSummary>> {
        send_json(self.authed(Method::GET, "classes")?, "Failed to fetch classes").await
    }

    /// GET /users?role=guide
    pub async fn list_guides(&self) -> PortalResult<Vec<GuideSummary>> {
        let list: GuideList = send_json(self.guides_request()?, "Failed to fetch guides").await?;
        Ok(list.users)
    }
}

/// The base URL must end in `/` so relative endpoints join under it.
fn parse_base_url(api_url: &str) -> PortalResult<Url> {
    let mut url = Url::parse(api_url)
        .map_err(|e| PortalError::Config(format!("Invalid api_url '{api_url}': {e}")))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

async fn send_json<T: DeserializeOwned>(req: RequestBuilder, fallback: &str) -> PortalResult<T> {
    let resp = req
        .send()
        .await
        .map_err(|e| PortalError::Http(e.to_string()))?;
    decode_json(resp, fallback).await
}

/// Non-2xx answers become `Api` errors carrying the body's `message`, or
/// `fallback` when there is none.
async fn decode_json<T: DeserializeOwned>(resp: Response, fallback: &str) -> PortalResult<T> {
    let status = resp.status();
    if !status.is_success() {
        let message = resp
            .json::<ErrorResponse>()
            .await
            .ok()
            .and_then(|e| e.message)
            .unwrap_or_else(|| fallback.to_string());
        return Err(PortalError::Api {
            status: status.as_u16(),
            message,
        });
    }

    resp.json()
        .await
        .map_err(|e| PortalError::Serialization(e.to_string()))
}
