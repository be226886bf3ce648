//! Remote data client: typed requests against the admin REST backend

use reqwest::blocking::multipart::{Form, Part as FormPart};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use crate::config::ApiSettings;
use crate::error::{Error, Result};
use crate::models::{Banner, Exercise, Plan, User};

/// An entity the backend stores under its own collection path.
pub trait Resource: DeserializeOwned + Clone + Send + 'static {
    /// Collection path segment, e.g. `exercises`
    const PATH: &'static str;
    /// Key holding the records in a paged list response
    const LIST_KEY: &'static str;
    /// Singular noun used in confirmation prompts
    const NOUN: &'static str;
    const UPDATE_METHOD: Method;

    fn id(&self) -> &str;
}

impl Resource for Exercise {
    const PATH: &'static str = "exercises";
    const LIST_KEY: &'static str = "exercises";
    const NOUN: &'static str = "exercise";
    const UPDATE_METHOD: Method = Method::Patch;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Plan {
    const PATH: &'static str = "plans";
    const LIST_KEY: &'static str = "plans";
    const NOUN: &'static str = "plan";
    const UPDATE_METHOD: Method = Method::Patch;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for Banner {
    const PATH: &'static str = "banners";
    const LIST_KEY: &'static str = "banners";
    const NOUN: &'static str = "banner";
    const UPDATE_METHOD: Method = Method::Put;

    fn id(&self) -> &str {
        &self.id
    }
}

impl Resource for User {
    const PATH: &'static str = "users";
    const LIST_KEY: &'static str = "users";
    const NOUN: &'static str = "user";
    const UPDATE_METHOD: Method = Method::Patch;

    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Server-side ordering of list results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    NameAsc,
    IdAsc,
    IdDesc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 3] = [SortOrder::NameAsc, SortOrder::IdAsc, SortOrder::IdDesc];

    pub fn as_param(&self) -> &'static str {
        match self {
            SortOrder::NameAsc => "name_asc",
            SortOrder::IdAsc => "id_asc",
            SortOrder::IdDesc => "id_desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::NameAsc => "Sort A-Z",
            SortOrder::IdAsc => "Oldest to Newest",
            SortOrder::IdDesc => "Newest to Oldest",
        }
    }
}

/// Parameters of one list fetch. `page` is 0-based here and 1-based on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub search: String,
    pub page: usize,
    pub limit: usize,
    pub sort: SortOrder,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        mime: String,
        bytes: Vec<u8>,
    },
}

impl Part {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Part::Text {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Empty,
    Json(Value),
    Multipart(Vec<Part>),
}

impl Payload {
    /// Text value of the first multipart field called `name`.
    pub fn text_field(&self, name: &str) -> Option<&str> {
        match self {
            Payload::Multipart(parts) => parts.iter().find_map(|part| match part {
                Part::Text { name: n, value } if n == name => Some(value.as_str()),
                _ => None,
            }),
            _ => None,
        }
    }

    pub fn has_file(&self, name: &str) -> bool {
        match self {
            Payload::Multipart(parts) => parts
                .iter()
                .any(|part| matches!(part, Part::File { name: n, .. } if n == name)),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the base URL, without a leading slash
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub payload: Payload,
}

impl ApiRequest {
    pub fn list(path: &str, query: &ListQuery) -> Self {
        Self {
            method: Method::Get,
            path: path.to_string(),
            query: vec![
                ("search", query.search.clone()),
                ("page", (query.page + 1).to_string()),
                ("limit", query.limit.to_string()),
                ("sort", query.sort.as_param().to_string()),
            ],
            payload: Payload::Empty,
        }
    }

    pub fn create(path: &str, payload: Payload) -> Self {
        Self {
            method: Method::Post,
            path: path.to_string(),
            query: Vec::new(),
            payload,
        }
    }

    pub fn update(path: &str, id: &str, method: Method, payload: Payload) -> Self {
        Self {
            method,
            path: format!("{path}/{id}"),
            query: Vec::new(),
            payload,
        }
    }

    pub fn delete(path: &str, id: &str) -> Self {
        Self {
            method: Method::Delete,
            path: format!("{path}/{id}"),
            query: Vec::new(),
            payload: Payload::Empty,
        }
    }

    /// POST to the collection, or `R::UPDATE_METHOD` on `path/id` when editing.
    pub fn save<R: Resource>(existing_id: Option<&str>, payload: Payload) -> Self {
        match existing_id {
            Some(id) => ApiRequest::update(R::PATH, id, R::UPDATE_METHOD, payload),
            None => ApiRequest::create(R::PATH, payload),
        }
    }
}

/// Anything that can carry an [`ApiRequest`] to the backend.
pub trait Backend: Send + Sync {
    /// Returns the decoded JSON body, or `Value::Null` for an empty body.
    fn execute(&self, request: ApiRequest) -> Result<Value>;
}

/// Blocking HTTP transport built from the configured base URL.
pub struct HttpBackend {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(settings: &ApiSettings) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Backend for HttpBackend {
    fn execute(&self, request: ApiRequest) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, request.path);
        debug!("{:?} {}", request.method, url);

        let mut builder = self.client.request(request.method.into(), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        builder = match request.payload {
            Payload::Empty => builder,
            Payload::Json(body) => builder.json(&body),
            Payload::Multipart(parts) => builder.multipart(multipart_form(parts)?),
        };

        let response = builder.send().inspect_err(|e| {
            error!("{:?} {} failed: {}", request.method, url, e);
        })?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            error!("{:?} {} returned {}: {}", request.method, url, status, body);
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

fn multipart_form(parts: Vec<Part>) -> Result<Form> {
    let mut form = Form::new();
    for part in parts {
        form = match part {
            Part::Text { name, value } => form.text(name, value),
            Part::File {
                name,
                file_name,
                mime,
                bytes,
            } => form.part(
                name,
                FormPart::bytes(bytes).file_name(file_name).mime_str(&mime)?,
            ),
        };
    }
    Ok(form)
}

/// One page of records plus the total the backend reports.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<R> {
    pub items: Vec<R>,
    pub total: usize,
}

/// Decode either `{ <LIST_KEY>: [...], total }` or a bare array.
pub fn decode_page<R: Resource>(value: Value) -> Result<ListPage<R>> {
    match value {
        Value::Array(_) => {
            let items: Vec<R> = serde_json::from_value(value)?;
            let total = items.len();
            Ok(ListPage { items, total })
        }
        Value::Object(mut map) => {
            let records = map.remove(R::LIST_KEY).ok_or_else(|| {
                Error::decode(format!("missing `{}` in list response", R::LIST_KEY))
            })?;
            let items: Vec<R> = serde_json::from_value(records)?;
            let total = map
                .get("total")
                .and_then(Value::as_u64)
                .map(|t| t as usize)
                .unwrap_or(items.len());
            Ok(ListPage { items, total })
        }
        other => Err(Error::decode(format!(
            "expected a list of {}, got {}",
            R::PATH,
            other
        ))),
    }
}

#[cfg(test)]
pub mod testing {
    //! Recording backend for controller tests

    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockBackend {
        calls: Mutex<Vec<ApiRequest>>,
        failing: Mutex<HashSet<String>>,
        list_body: Mutex<Value>,
    }

    impl MockBackend {
        pub fn with_list(body: Value) -> Self {
            let backend = Self::default();
            *backend.list_body.lock().unwrap() = body;
            backend
        }

        pub fn set_list(&self, body: Value) {
            *self.list_body.lock().unwrap() = body;
        }

        /// Every request to exactly this path fails with a 500.
        pub fn fail_path(&self, path: &str) {
            self.failing.lock().unwrap().insert(path.to_string());
        }

        pub fn calls(&self) -> Vec<ApiRequest> {
            self.calls.lock().unwrap().clone()
        }

        pub fn calls_with(&self, method: Method) -> Vec<ApiRequest> {
            self.calls()
                .into_iter()
                .filter(|call| call.method == method)
                .collect()
        }
    }

    impl Backend for MockBackend {
        fn execute(&self, request: ApiRequest) -> Result<Value> {
            self.calls.lock().unwrap().push(request.clone());
            if self.failing.lock().unwrap().contains(&request.path) {
                return Err(Error::Status {
                    status: 500,
                    body: "mock failure".to_string(),
                });
            }
            match request.method {
                Method::Get => Ok(self.list_body.lock().unwrap().clone()),
                _ => Ok(Value::Null),
            }
        }
    }
}
