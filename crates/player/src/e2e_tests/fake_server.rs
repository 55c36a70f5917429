//! In-process character API backed by a `Vec`, served by axum on an
//! ephemeral localhost port.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use pcm_domain::{proficiency_bonus, AbilityScore, Character, CharacterId};
use pcm_shared::{CreateCharacterPayload, DataResponse, PaginatedResponse, UpdateCharacterPayload};

#[derive(Default)]
pub struct FakeStore {
    characters: Mutex<Vec<Character>>,
    conflict_on_update: AtomicBool,
}

impl FakeStore {
    fn characters(&self) -> MutexGuard<'_, Vec<Character>> {
        self.characters.lock().expect("fake store lock")
    }
}

type SharedStore = Arc<FakeStore>;

pub struct FakeServer {
    pub base_url: String,
    store: SharedStore,
    handle: JoinHandle<()>,
}

impl FakeServer {
    pub async fn start() -> Self {
        let store = SharedStore::default();
        let app = Router::new()
            .route("/health", get(health))
            .route("/api/characters", get(list).post(create))
            .route(
                "/api/characters/{id}",
                get(fetch).put(update).delete(remove),
            )
            .with_state(Arc::clone(&store));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake server");
        let addr = listener.local_addr().expect("fake server address");
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{}", addr),
            store,
            handle,
        }
    }

    pub fn stored(&self) -> Vec<Character> {
        self.store.characters().clone()
    }

    /// Every later update answers 409.
    pub fn fail_updates_with_conflict(&self) {
        self.store.conflict_on_update.store(true, Ordering::SeqCst);
    }
}

impl Drop for FakeServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn validation_failed(field: &str, message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": "Validation failed",
            "errors": [{ "field": field, "message": message }]
        })),
    )
        .into_response()
}

fn parse_id(raw: &str) -> Result<CharacterId, Response> {
    raw.parse()
        .map_err(|_| error(StatusCode::BAD_REQUEST, "Invalid character ID"))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn create(State(store): State<SharedStore>, Json(body): Json<Value>) -> Response {
    let payload: CreateCharacterPayload = match serde_json::from_value(body) {
        Ok(payload) => payload,
        Err(e) => return validation_failed("body", &e.to_string()),
    };
    if payload.character_name.trim().is_empty() {
        return validation_failed("characterName", "Character name is required");
    }

    let now = Utc::now();
    let character = Character {
        id: CharacterId::new(),
        character_name: payload.character_name,
        player_name: payload.player_name,
        race: payload.race,
        subrace: payload.subrace,
        class: payload.class,
        subclass: payload.subclass,
        multiclass: payload.multiclass,
        level: payload.level,
        experience_points: Some(payload.experience_points),
        background: payload.background,
        alignment: payload.alignment,
        ability_scores: payload
            .ability_scores
            .map(|_, input| AbilityScore::from_score(input.base)),
        proficiency_bonus: proficiency_bonus(payload.level),
        created_at: Some(now),
        updated_at: Some(now),
    };
    store.characters().push(character.clone());

    (StatusCode::CREATED, Json(DataResponse::new(character))).into_response()
}

async fn fetch(State(store): State<SharedStore>, Path(id): Path<String>) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    match store.characters().iter().find(|c| c.id == id) {
        Some(character) => Json(DataResponse::new(character.clone())).into_response(),
        None => error(StatusCode::NOT_FOUND, "Character not found"),
    }
}

async fn update(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    Json(patch): Json<UpdateCharacterPayload>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    if store.conflict_on_update.load(Ordering::SeqCst) {
        return error(StatusCode::CONFLICT, "Version mismatch");
    }

    let mut characters = store.characters();
    let Some(character) = characters.iter_mut().find(|c| c.id == id) else {
        return error(StatusCode::NOT_FOUND, "Character not found");
    };

    if let Some(v) = patch.character_name {
        character.character_name = v;
    }
    if let Some(v) = patch.player_name {
        character.player_name = Some(v);
    }
    if let Some(v) = patch.race {
        character.race = v;
    }
    if let Some(v) = patch.subrace {
        character.subrace = Some(v);
    }
    if let Some(v) = patch.class {
        character.class = v;
    }
    if let Some(v) = patch.subclass {
        character.subclass = Some(v);
    }
    if let Some(v) = patch.multiclass {
        character.multiclass = Some(v);
    }
    if let Some(v) = patch.level {
        character.level = v;
        character.proficiency_bonus = proficiency_bonus(v);
    }
    if let Some(v) = patch.experience_points {
        character.experience_points = Some(v);
    }
    if let Some(v) = patch.background {
        character.background = Some(v);
    }
    if let Some(v) = patch.alignment {
        character.alignment = Some(v);
    }
    if let Some(scores) = patch.ability_scores {
        character.ability_scores = scores.map(|_, input| AbilityScore::from_score(input.base));
    }
    character.updated_at = Some(Utc::now());

    Json(DataResponse::new(character.clone())).into_response()
}

async fn remove(State(store): State<SharedStore>, Path(id): Path<String>) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let mut characters = store.characters();
    match characters.iter().position(|c| c.id == id) {
        Some(index) => {
            characters.remove(index);
            StatusCode::NO_CONTENT.into_response()
        }
        None => error(StatusCode::NOT_FOUND, "Character not found"),
    }
}

async fn list(
    State(store): State<SharedStore>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let page: u32 = params
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1)
        .max(1);
    let limit: u32 = params
        .get("limit")
        .and_then(|l| l.parse().ok())
        .unwrap_or(20)
        .max(1);
    let search = params
        .get("search")
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    let mut found: Vec<Character> = store
        .characters()
        .iter()
        .filter(|c| c.character_name.to_lowercase().contains(&search))
        .cloned()
        .collect();

    match params.get("sortBy").map(String::as_str) {
        Some("characterName") => found.sort_by(|a, b| a.character_name.cmp(&b.character_name)),
        Some("level") => found.sort_by_key(|c| c.level),
        Some("race") => found.sort_by(|a, b| a.race.cmp(&b.race)),
        Some("class") => found.sort_by(|a, b| a.class.cmp(&b.class)),
        _ => found.sort_by_key(|c| c.created_at),
    }
    if params.get("sortOrder").map(String::as_str) != Some("asc") {
        found.reverse();
    }

    let total = found.len() as u64;
    let total_pages = total.div_ceil(u64::from(limit)) as u32;
    let data = found
        .into_iter()
        .skip(((page - 1) * limit) as usize)
        .take(limit as usize)
        .collect();

    Json(PaginatedResponse {
        data,
        total,
        page,
        limit,
        total_pages,
    })
    .into_response()
}
