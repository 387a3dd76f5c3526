//! An in-memory stand-in for the house service.
//!
//! Every request is recorded before it is answered so tests can assert on
//! exactly what the client sent, and in what order. Failures can be scripted
//! per method and path.

use actix_cors::Cors;
use actix_web::{
    App, HttpRequest, HttpResponse, HttpServer, ResponseError,
    body::BoxBody, delete, dev::Server, get, http::StatusCode, post, put,
    web,
};
use payloads::{OptionCategory, responses::ReferenceOption};
use serde_json::{Map, Value, json};
use std::{
    collections::BTreeMap,
    net::TcpListener,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

const SEASONS: [&str; 4] = ["spring", "summer", "autumn", "winter"];
const PRICE_KINDS: [&str; 5] =
    ["normal", "weekend", "holiday", "peak", "extra_person"];
const ADDRESS_KEYS: [&str; 5] =
    ["address", "street", "alley", "plaque", "postal_code"];
const LOCATION_KEYS: [&str; 4] =
    ["province_id", "city_id", "latitude", "longitude"];
const ENVIRONMENT_KEYS: [&str; 6] = [
    "textures",
    "views",
    "neighbour_type",
    "access_routes",
    "description",
    "neighbourhood_description",
];
const RESERVATION_KEYS: [&str; 10] = [
    "min_stay",
    "max_stay",
    "weekly_discount",
    "monthly_discount",
    "capacity",
    "max_capacity",
    "check_in",
    "check_out",
    "weekend",
    "weekday_min_stay",
];

pub struct Config {
    /// set to "0.0.0.0" for public access, "127.0.0.1" for local dev
    pub ip: String,
    /// set to 0 to get an os-assigned port
    pub port: u16,
}

impl Config {
    /// `DEV_SERVER_IP` and `DEV_SERVER_PORT`, defaulting to
    /// `127.0.0.1:8081`.
    pub fn from_env() -> anyhow::Result<Self> {
        use std::env::var;

        let port = match var("DEV_SERVER_PORT") {
            Ok(port) => port.parse()?,
            Err(_) => 8081,
        };
        Ok(Config {
            ip: var("DEV_SERVER_IP").unwrap_or_else(|_| "127.0.0.1".into()),
            port,
        })
    }
}

/// One request as the mock received it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path without the leading slash, e.g. `client/house/{id}/room`.
    pub path: String,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn is(&self, method: &str, path: &str) -> bool {
        self.method.eq_ignore_ascii_case(method)
            && self.path == path.trim_start_matches('/')
    }

    /// The body as JSON, if it was JSON.
    pub fn json(&self) -> Option<Value> {
        serde_json::from_slice(&self.body).ok()
    }

    /// A text part of a multipart body.
    pub fn form_field(&self, name: &str) -> Option<String> {
        let content_type = self.content_type.as_deref()?;
        parse_multipart(content_type, &self.body)
            .into_iter()
            .find(|part| part.name == name)
            .map(|part| String::from_utf8_lossy(&part.data).into_owned())
    }
}

#[derive(Debug, Clone)]
struct ScriptedFailure {
    method: String,
    path: String,
    status: u16,
    body: Value,
}

#[derive(Debug, Default)]
struct Inner {
    token: String,
    profile: Value,
    houses: BTreeMap<String, Value>,
    options: BTreeMap<String, Value>,
    provinces: Value,
    cities: BTreeMap<i64, Value>,
    requests: Vec<RecordedRequest>,
    failures: Vec<ScriptedFailure>,
    next_media_id: i64,
}

/// Shared handle on the mock's data. Cloning shares the same state.
#[derive(Debug, Clone, Default)]
pub struct MockState {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, thiserror::Error)]
pub enum MockError {
    #[error("Unauthenticated")]
    Unauthorized,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Some fields are invalid")]
    Validation(BTreeMap<String, Vec<String>>),
    #[error("Scripted failure ({0})")]
    Scripted(u16, Value),
}

impl MockError {
    fn field(name: &str, message: &str) -> Self {
        Self::Validation(BTreeMap::from([(
            name.to_string(),
            vec![message.to_string()],
        )]))
    }
}

impl ResponseError for MockError {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        match self {
            Self::Unauthorized => HttpResponse::Unauthorized()
                .json(json!({ "message": self.to_string() })),
            Self::NotFound(_) => {
                HttpResponse::NotFound().body(self.to_string())
            }
            Self::BadRequest(_) => {
                HttpResponse::BadRequest().body(self.to_string())
            }
            Self::MethodNotAllowed => {
                HttpResponse::MethodNotAllowed().body(self.to_string())
            }
            Self::Validation(fields) => HttpResponse::UnprocessableEntity()
                .json(json!({ "errors": { "fields": fields } })),
            Self::Scripted(status, body) => {
                let status = StatusCode::from_u16(*status)
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                HttpResponse::build(status).json(body)
            }
        }
    }
}

type MockResult = Result<HttpResponse, MockError>;

impl MockState {
    pub fn new(token: &str) -> Self {
        let state = Self::default();
        state.lock().token = token.to_string();
        state.lock().next_media_id = 100;
        state
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_profile(&self, profile: &payloads::responses::UserProfile) {
        self.lock().profile = to_value(profile);
    }

    pub fn insert_house(&self, house: &payloads::responses::House) {
        self.lock().houses.insert(house.uuid.0.clone(), to_value(house));
    }

    pub fn house(&self, id: &str) -> Option<payloads::responses::House> {
        let inner = self.lock();
        let value = inner.houses.get(id)?.clone();
        serde_json::from_value(value).ok()
    }

    pub fn set_options(
        &self,
        category: OptionCategory,
        options: &[ReferenceOption],
    ) {
        self.lock()
            .options
            .insert(category.to_string(), to_value(options));
    }

    pub fn set_provinces(&self, list: &[payloads::responses::Province]) {
        self.lock().provinces = to_value(list);
    }

    pub fn set_cities(
        &self,
        province_id: payloads::ProvinceId,
        list: &[payloads::responses::City],
    ) {
        self.lock().cities.insert(province_id.0, to_value(list));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.lock().requests.clear();
    }

    /// Answer the next matching request with `status` and `body` instead of
    /// handling it.
    pub fn fail_next(
        &self,
        method: &str,
        path: &str,
        status: u16,
        body: Value,
    ) {
        self.lock().failures.push(ScriptedFailure {
            method: method.to_uppercase(),
            path: path.trim_start_matches('/').to_string(),
            status,
            body,
        });
    }

    /// Record the request, apply any scripted failure, then check the bearer
    /// token when `authenticated` is set.
    fn begin(
        &self,
        req: &HttpRequest,
        body: &[u8],
        authenticated: bool,
    ) -> Result<MutexGuard<'_, Inner>, MockError> {
        let mut inner = self.lock();
        let recorded = RecordedRequest {
            method: req.method().to_string(),
            path: req.path().trim_start_matches('/').to_string(),
            content_type: req
                .headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body: body.to_vec(),
        };
        tracing::debug!(
            method = %recorded.method,
            path = %recorded.path,
            "request"
        );

        if let Some(index) = inner
            .failures
            .iter()
            .position(|f| recorded.is(&f.method, &f.path))
        {
            let failure = inner.failures.remove(index);
            inner.requests.push(recorded);
            return Err(MockError::Scripted(failure.status, failure.body));
        }
        inner.requests.push(recorded);

        if authenticated {
            let bearer = req
                .headers()
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "));
            if bearer != Some(inner.token.as_str()) {
                return Err(MockError::Unauthorized);
            }
        }
        Ok(inner)
    }
}

fn to_value(value: &(impl serde::Serialize + ?Sized)) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

fn json_object(body: &[u8]) -> Result<Map<String, Value>, MockError> {
    serde_json::from_slice(body)
        .map_err(|e| MockError::BadRequest(e.to_string()))
}

fn house_mut<'a>(
    inner: &'a mut Inner,
    house_id: &str,
) -> Result<&'a mut Value, MockError> {
    inner
        .houses
        .get_mut(house_id)
        .ok_or_else(|| MockError::NotFound(format!("house {house_id}")))
}

fn array_mut<'a>(
    house: &'a mut Value,
    key: &str,
) -> Result<&'a mut Vec<Value>, MockError> {
    if house[key].is_null() {
        house[key] = json!([]);
    }
    house[key]
        .as_array_mut()
        .ok_or_else(|| MockError::BadRequest(format!("{key} is not a list")))
}

/// `normal_spring` -> `("spring", "normal")`
fn price_key(key: &str) -> Option<(&'static str, &'static str)> {
    SEASONS.iter().find_map(|season| {
        let kind = key.strip_suffix(season)?.strip_suffix('_')?;
        PRICE_KINDS
            .iter()
            .find(|k| **k == kind)
            .map(|kind| (*season, *kind))
    })
}

fn set_prices(target: &mut Value, update: &Map<String, Value>) {
    for (key, value) in update {
        if let Some((season, kind)) = price_key(key) {
            target[season][kind] = value.clone();
        }
    }
}

fn validate_house_update(
    update: &Map<String, Value>,
) -> Result<(), MockError> {
    let name = update.get("name").and_then(Value::as_str);
    if name.is_some_and(|n| n.trim().is_empty()) {
        return Err(MockError::field("name", "required"));
    }
    let capacity = update
        .get("capacity")
        .and_then(Value::as_str)
        .and_then(|c| c.parse::<u32>().ok());
    if capacity.is_some_and(|c| c < 1) {
        return Err(MockError::field("capacity", "too low"));
    }
    Ok(())
}

/// Merge a flat partial update into the stored house, routing each key to
/// the nested object it belongs to.
fn merge_house_update(house: &mut Value, update: Map<String, Value>) {
    for (key, value) in update {
        let key = key.as_str();
        if key == "_method" {
            continue;
        }
        if let Some((season, kind)) = price_key(key) {
            house["prices"][season][kind] = value;
        } else if ADDRESS_KEYS.contains(&key) {
            house["address"][key] = value;
        } else if LOCATION_KEYS.contains(&key) {
            house["location"][key] = value;
        } else if ENVIRONMENT_KEYS.contains(&key) {
            house["environment"][key] = value;
        } else if RESERVATION_KEYS.contains(&key) {
            house["reservation"][key] = value;
        } else {
            house[key] = value;
        }
    }
}

struct Part {
    name: String,
    file_name: Option<String>,
    data: Vec<u8>,
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn disposition_param(headers: &str, param: &str) -> Option<String> {
    let marker = format!("{param}=\"");
    let start = headers.find(&marker)? + marker.len();
    let end = headers[start..].find('"')?;
    Some(headers[start..start + end].to_string())
}

/// Minimal `multipart/form-data` reader; enough for what reqwest sends.
fn parse_multipart(content_type: &str, body: &[u8]) -> Vec<Part> {
    let Some(boundary) = content_type
        .split(';')
        .find_map(|p| p.trim().strip_prefix("boundary="))
    else {
        return Vec::new();
    };
    let delimiter = format!("--{}", boundary.trim_matches('"'));
    let delimiter = delimiter.as_bytes();

    let mut parts = Vec::new();
    let mut rest = body;
    while let Some(start) = find(rest, delimiter) {
        rest = &rest[start + delimiter.len()..];
        if rest.starts_with(b"--") {
            break;
        }
        let segment_end = find(rest, delimiter).unwrap_or(rest.len());
        let segment = rest[..segment_end].strip_prefix(b"\r\n").unwrap_or(
            &rest[..segment_end],
        );
        let Some(header_end) = find(segment, b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&segment[..header_end]);
        let data = &segment[header_end + 4..];
        let data = data.strip_suffix(b"\r\n").unwrap_or(data);
        if let Some(name) = disposition_param(&headers, "name") {
            parts.push(Part {
                name,
                file_name: disposition_param(&headers, "filename"),
                data: data.to_vec(),
            });
        }
    }
    parts
}

fn multipart_parts(req: &HttpRequest, body: &[u8]) -> Vec<Part> {
    let content_type = req
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    parse_multipart(content_type, body)
}

/// Apply multipart media fields to a stored media item.
fn apply_media_parts(
    media: &mut Value,
    house_id: &str,
    parts: &[Part],
) -> bool {
    let mut is_main = false;
    for part in parts {
        let text = String::from_utf8_lossy(&part.data);
        match part.name.as_str() {
            "title" => media["title"] = json!(text),
            "is_main" => {
                is_main = text == "1";
                media["is_main"] = json!(is_main);
            }
            "file" => {
                let file_name =
                    part.file_name.clone().unwrap_or_else(|| "upload".into());
                media["url"] = json!(format!(
                    "/storage/houses/{house_id}/{}-{file_name}",
                    media["id"]
                ));
            }
            _ => {}
        }
    }
    is_main
}

fn clear_other_main(medias: &mut [Value], keep: &Value) {
    for media in medias {
        if media["id"] != *keep {
            media["is_main"] = json!(false);
        }
    }
}

#[get("/client/profile")]
async fn get_profile(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<MockState>,
) -> MockResult {
    let inner = state.begin(&req, &body, true)?;
    Ok(HttpResponse::Ok().json(&inner.profile))
}

#[tracing::instrument(skip(req, body, state))]
#[put("/client/profile/vendor")]
async fn update_vendor(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<MockState>,
) -> MockResult {
    let mut inner = state.begin(&req, &body, true)?;
    let details = json_object(&body)?;
    let national_code = details
        .get("national_code")
        .and_then(Value::as_str)
        .unwrap_or_default();
    if national_code.len() != 10
        || !national_code.chars().all(|c| c.is_ascii_digit())
    {
        return Err(MockError::field("national_code", "must be 10 digits"));
    }
    for key in ["first_name", "last_name", "email", "national_code"] {
        if let Some(value) = details.get(key) {
            inner.profile[key] = value.clone();
        }
    }
    inner.profile["is_vendor"] = json!(true);
    Ok(HttpResponse::Ok().json(&inner.profile))
}

#[delete("/client/profile/logout")]
async fn logout(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<MockState>,
) -> MockResult {
    state.begin(&req, &body, true)?;
    Ok(HttpResponse::Ok().finish())
}

#[get("/client/house/{house_id}")]
async fn get_house(
    req: HttpRequest,
    body: web::Bytes,
    path: web::Path<String>,
    state: web::Data<MockState>,
) -> MockResult {
    let mut inner = state.begin(&req, &body, true)?;
    let house = house_mut(&mut inner, &path)?;
    Ok(HttpResponse::Ok().json(&*house))
}

#[tracing::instrument(skip(req, body, state))]
#[put("/client/house/{house_id}")]
async fn update_house(
    req: HttpRequest,
    body: web::Bytes,
    path: web::Path<String>,
    state: web::Data<MockState>,
) -> MockResult {
    let mut inner = state.begin(&req, &body, true)?;
    let update = json_object(&body)?;
    validate_house_update(&update)?;
    merge_house_update(house_mut(&mut inner, &path)?, update);
    Ok(HttpResponse::Ok().finish())
}

/// Form-style update: a `POST` that must carry `_method=PUT`.
#[tracing::instrument(skip(req, body, state))]
#[post("/client/house/{house_id}")]
async fn override_house(
    req: HttpRequest,
    body: web::Bytes,
    path: web::Path<String>,
    state: web::Data<MockState>,
) -> MockResult {
    let mut inner = state.begin(&req, &body, true)?;
    let update = json_object(&body)?;
    if update.get("_method").and_then(Value::as_str) != Some("PUT") {
        return Err(MockError::MethodNotAllowed);
    }
    validate_house_update(&update)?;
    merge_house_update(house_mut(&mut inner, &path)?, update);
    Ok(HttpResponse::Ok().finish())
}

#[put("/client/house/{house_id}/facility")]
async fn update_facilities(
    req: HttpRequest,
    body: web::Bytes,
    path: web::Path<String>,
    state: web::Data<MockState>,
) -> MockResult {
    let mut inner = state.begin(&req, &body, true)?;
    let mut update = json_object(&body)?;
    let facilities = update.remove("facilities").unwrap_or(json!([]));
    house_mut(&mut inner, &path)?["facilities"] = facilities;
    Ok(HttpResponse::Ok().finish())
}

#[get("/client/house/{house_id}/prices")]
async fn get_house_prices(
    req: HttpRequest,
    body: web::Bytes,
    path: web::Path<String>,
    state: web::Data<MockState>,
) -> MockResult {
    let mut inner = state.begin(&req, &body, true)?;
    let house = house_mut(&mut inner, &path)?;
    Ok(HttpResponse::Ok().json(&house["prices"]))
}

#[get("/client/house/{house_id}/room")]
async fn list_rooms(
    req: HttpRequest,
    body: web::Bytes,
    path: web::Path<String>,
    state: web::Data<MockState>,
) -> MockResult {
    let mut inner = state.begin(&req, &body, true)?;
    let rooms = array_mut(house_mut(&mut inner, &path)?, "rooms")?;
    Ok(HttpResponse::Ok().json(&*rooms))
}

fn validate_room(
    details: &Map<String, Value>,
    others: &[Value],
) -> Result<(), MockError> {
    let name = details.get("name").and_then(Value::as_str);
    if name.is_none_or(|n| n.trim().is_empty()) {
        return Err(MockError::field("name", "required"));
    }
    let living = |v: &Value| v["is_living_room"].as_bool() == Some(true);
    if details.get("is_living_room").is_some_and(|v| v == &json!(true))
        && others.iter().any(living)
    {
        return Err(MockError::field(
            "is_living_room",
            "the house already has a living room",
        ));
    }
    Ok(())
}

#[tracing::instrument(skip(req, body, state))]
#[post("/client/house/{house_id}/room")]
async fn create_room(
    req: HttpRequest,
    body: web::Bytes,
    path: web::Path<String>,
    state: web::Data<MockState>,
) -> MockResult {
    let mut inner = state.begin(&req, &body, true)?;
    let mut details = json_object(&body)?;
    let rooms = array_mut(house_mut(&mut inner, &path)?, "rooms")?;
    validate_room(&details, rooms)?;
    details.insert("uuid".into(), json!(uuid::Uuid::new_v4().to_string()));
    details.insert("prices".into(), Value::Null);
    let room = Value::Object(details);
    rooms.push(room.clone());
    Ok(HttpResponse::Ok().json(room))
}

#[tracing::instrument(skip(req, body, state))]
#[put("/client/house/{house_id}/room/{room_id}")]
async fn update_room(
    req: HttpRequest,
    body: web::Bytes,
    path: web::Path<(String, String)>,
    state: web::Data<MockState>,
) -> MockResult {
    let (house_id, room_id) = path.into_inner();
    let mut inner = state.begin(&req, &body, true)?;
    let details = json_object(&body)?;
    let rooms = array_mut(house_mut(&mut inner, &house_id)?, "rooms")?;
    let others: Vec<Value> = rooms
        .iter()
        .filter(|r| r["uuid"] != json!(room_id))
        .cloned()
        .collect();
    validate_room(&details, &others)?;
    let room = rooms
        .iter_mut()
        .find(|r| r["uuid"] == json!(room_id))
        .ok_or_else(|| MockError::NotFound(format!("room {room_id}")))?;
    for (key, value) in details {
        if key != "uuid" && key != "prices" {
            room[key.as_str()] = value;
        }
    }
    Ok(HttpResponse::Ok().json(&*room))
}

#[tracing::instrument(skip(req, body, state))]
#[delete("/client/house/{house_id}/room/{room_id}")]
async fn delete_room(
    req: HttpRequest,
    body: web::Bytes,
    path: web::Path<(String, String)>,
    state: web::Data<MockState>,
) -> MockResult {
    let (house_id, room_id) = path.into_inner();
    let mut inner = state.begin(&req, &body, true)?;
    let rooms = array_mut(house_mut(&mut inner, &house_id)?, "rooms")?;
    let before = rooms.len();
    rooms.retain(|r| r["uuid"] != json!(room_id));
    if rooms.len() == before {
        return Err(MockError::NotFound(format!("room {room_id}")));
    }
    Ok(HttpResponse::Ok().finish())
}

#[get("/client/house/{house_id}/room/{room_id}/prices")]
async fn get_room_prices(
    req: HttpRequest,
    body: web::Bytes,
    path: web::Path<(String, String)>,
    state: web::Data<MockState>,
) -> MockResult {
    let (house_id, room_id) = path.into_inner();
    let mut inner = state.begin(&req, &body, true)?;
    let rooms = array_mut(house_mut(&mut inner, &house_id)?, "rooms")?;
    let room = rooms
        .iter()
        .find(|r| r["uuid"] == json!(room_id))
        .ok_or_else(|| MockError::NotFound(format!("room {room_id}")))?;
    let prices = match &room["prices"] {
        Value::Null => to_value(&payloads::SeasonPrices::default()),
        prices => prices.clone(),
    };
    Ok(HttpResponse::Ok().json(prices))
}

#[tracing::instrument(skip(req, body, state))]
#[put("/client/house/{house_id}/room/{room_id}/prices")]
async fn update_room_prices(
    req: HttpRequest,
    body: web::Bytes,
    path: web::Path<(String, String)>,
    state: web::Data<MockState>,
) -> MockResult {
    let (house_id, room_id) = path.into_inner();
    let mut inner = state.begin(&req, &body, true)?;
    let update = json_object(&body)?;
    let rooms = array_mut(house_mut(&mut inner, &house_id)?, "rooms")?;
    let room = rooms
        .iter_mut()
        .find(|r| r["uuid"] == json!(room_id))
        .ok_or_else(|| MockError::NotFound(format!("room {room_id}")))?;
    set_prices(&mut room["prices"], &update);
    Ok(HttpResponse::Ok().finish())
}

#[get("/client/house/{house_id}/media")]
async fn list_media(
    req: HttpRequest,
    body: web::Bytes,
    path: web::Path<String>,
    state: web::Data<MockState>,
) -> MockResult {
    let mut inner = state.begin(&req, &body, true)?;
    let medias = array_mut(house_mut(&mut inner, &path)?, "medias")?;
    Ok(HttpResponse::Ok().json(&*medias))
}

#[tracing::instrument(skip(req, body, state))]
#[post("/client/house/{house_id}/media")]
async fn create_media(
    req: HttpRequest,
    body: web::Bytes,
    path: web::Path<String>,
    state: web::Data<MockState>,
) -> MockResult {
    let mut inner = state.begin(&req, &body, true)?;
    let parts = multipart_parts(&req, &body);
    if !parts.iter().any(|p| p.name == "file" && p.file_name.is_some()) {
        return Err(MockError::field("file", "required"));
    }
    let id = inner.next_media_id;
    inner.next_media_id += 1;

    let mut media = json!({
        "id": id,
        "title": null,
        "url": "",
        "is_main": false,
    });
    let is_main = apply_media_parts(&mut media, &path, &parts);
    let medias = array_mut(house_mut(&mut inner, &path)?, "medias")?;
    if is_main {
        clear_other_main(medias, &media["id"]);
    }
    medias.push(media.clone());
    Ok(HttpResponse::Ok().json(media))
}

#[tracing::instrument(skip(req, body, state))]
#[put("/client/house/{house_id}/media/{media_id}")]
async fn update_media(
    req: HttpRequest,
    body: web::Bytes,
    path: web::Path<(String, i64)>,
    state: web::Data<MockState>,
) -> MockResult {
    let (house_id, media_id) = path.into_inner();
    let mut inner = state.begin(&req, &body, true)?;
    let parts = multipart_parts(&req, &body);
    let medias = array_mut(house_mut(&mut inner, &house_id)?, "medias")?;
    let index = medias
        .iter()
        .position(|m| m["id"] == json!(media_id))
        .ok_or_else(|| MockError::NotFound(format!("media {media_id}")))?;
    let is_main = apply_media_parts(&mut medias[index], &house_id, &parts);
    if is_main {
        clear_other_main(medias, &json!(media_id));
    }
    Ok(HttpResponse::Ok().json(&medias[index]))
}

#[tracing::instrument(skip(req, body, state))]
#[delete("/client/house/{house_id}/media/{media_id}")]
async fn delete_media(
    req: HttpRequest,
    body: web::Bytes,
    path: web::Path<(String, i64)>,
    state: web::Data<MockState>,
) -> MockResult {
    let (house_id, media_id) = path.into_inner();
    let mut inner = state.begin(&req, &body, true)?;
    let medias = array_mut(house_mut(&mut inner, &house_id)?, "medias")?;
    let before = medias.len();
    medias.retain(|m| m["id"] != json!(media_id));
    if medias.len() == before {
        return Err(MockError::NotFound(format!("media {media_id}")));
    }
    Ok(HttpResponse::Ok().finish())
}

#[get("/assets/types/{category}/detail")]
async fn reference_options(
    req: HttpRequest,
    body: web::Bytes,
    path: web::Path<String>,
    state: web::Data<MockState>,
) -> MockResult {
    let inner = state.begin(&req, &body, false)?;
    let options = inner
        .options
        .get(path.as_str())
        .ok_or_else(|| MockError::NotFound(format!("category {path}")))?;
    Ok(HttpResponse::Ok().json(options))
}

#[get("/assets/province")]
async fn provinces(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<MockState>,
) -> MockResult {
    let inner = state.begin(&req, &body, false)?;
    Ok(HttpResponse::Ok().json(&inner.provinces))
}

#[get("/assets/province/{province_id}/cities")]
async fn cities(
    req: HttpRequest,
    body: web::Bytes,
    path: web::Path<i64>,
    state: web::Data<MockState>,
) -> MockResult {
    let inner = state.begin(&req, &body, false)?;
    let cities = inner.cities.get(&*path).cloned().unwrap_or(json!([]));
    Ok(HttpResponse::Ok().json(cities))
}

/// Build the server, but not await it.
///
/// Returns the port that the server has bound to by modifying the config.
pub fn build(config: &mut Config, state: MockState) -> std::io::Result<Server> {
    let state = web::Data::new(state);

    // OS assigns the port if binding to 0
    let listener = TcpListener::bind(format!("{}:{}", config.ip, config.port))?;
    config.port = listener.local_addr()?.port();
    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .service(get_profile)
            .service(update_vendor)
            .service(logout)
            .service(get_house_prices)
            .service(update_facilities)
            .service(list_rooms)
            .service(create_room)
            .service(get_room_prices)
            .service(update_room_prices)
            .service(update_room)
            .service(delete_room)
            .service(list_media)
            .service(create_media)
            .service(update_media)
            .service(delete_media)
            .service(get_house)
            .service(update_house)
            .service(override_house)
            .service(reference_options)
            .service(provinces)
            .service(cities)
            .app_data(state.clone())
    })
    .workers(1)
    .listen(listener)?
    .run();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_keys_split_into_season_and_kind() {
        assert_eq!(price_key("normal_spring"), Some(("spring", "normal")));
        assert_eq!(
            price_key("extra_person_winter"),
            Some(("winter", "extra_person"))
        );
        assert_eq!(price_key("capacity"), None);
        assert_eq!(price_key("spring"), None);
    }

    #[test]
    fn updates_are_routed_to_nested_sections() {
        let mut house = json!({
            "address": { "street": "old" },
            "location": {},
            "environment": {},
            "reservation": {},
            "prices": { "spring": { "normal": "1" } },
        });
        let update = json!({
            "_method": "PUT",
            "street": "new",
            "city_id": 4,
            "capacity": "3",
            "normal_spring": "200000",
            "name": "Villa",
        });
        let Value::Object(update) = update else {
            unreachable!()
        };
        merge_house_update(&mut house, update);
        assert_eq!(house["address"]["street"], "new");
        assert_eq!(house["location"]["city_id"], 4);
        assert_eq!(house["reservation"]["capacity"], "3");
        assert_eq!(house["prices"]["spring"]["normal"], "200000");
        assert_eq!(house["name"], "Villa");
        assert!(house.get("_method").is_none());
    }

    #[test]
    fn multipart_text_and_file_parts_are_read() {
        let body = b"--XyZ\r\n\
            Content-Disposition: form-data; name=\"title\"\r\n\r\n\
            Porch\r\n\
            --XyZ\r\n\
            Content-Disposition: form-data; name=\"file\"; \
            filename=\"a.jpg\"\r\n\
            Content-Type: image/jpeg\r\n\r\n\
            \x01\x02\r\n\
            --XyZ--\r\n";
        let parts =
            parse_multipart("multipart/form-data; boundary=XyZ", body);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].name, "title");
        assert_eq!(parts[0].data, b"Porch");
        assert_eq!(parts[1].file_name.as_deref(), Some("a.jpg"));
        assert_eq!(parts[1].data, vec![1, 2]);
    }
}
