//! Character Service - Application service for character management
//!
//! This service provides use case implementations for listing, fetching,
//! creating, updating and deleting characters. It maps between the wizard's
//! draft shape and the server schema and depends only on the object-safe
//! [`RawApiPort`], not on a concrete HTTP client.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use pcm_domain::{Character, CharacterDraft, CharacterId};
use pcm_shared::{
    CreateCharacterPayload, DataResponse, HealthResponse, ListCharactersParams, PaginatedResponse,
    UpdateCharacterPayload,
};

use crate::application::ServiceError;
use crate::ports::outbound::{ApiError, RawApiPort};

pub const CHARACTERS_PATH: &str = "/api/characters";
pub const HEALTH_PATH: &str = "/health";

fn character_path(id: CharacterId) -> String {
    format!("{}/{}", CHARACTERS_PATH, id)
}

/// `/api/characters` with the query encoded from `params`. Absent
/// parameters are left out entirely.
fn list_path(params: &ListCharactersParams) -> Result<String, ServiceError> {
    let encoded = serde_json::to_value(params).map_err(ServiceError::parse)?;
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    if let Value::Object(map) = encoded {
        for (key, value) in map {
            match value {
                Value::Null => {}
                Value::String(s) => {
                    query.append_pair(&key, &s);
                }
                other => {
                    query.append_pair(&key, &other.to_string());
                }
            }
        }
    }
    let query = query.finish();
    if query.is_empty() {
        Ok(CHARACTERS_PATH.to_string())
    } else {
        Ok(format!("{}?{}", CHARACTERS_PATH, query))
    }
}

fn decode<T: DeserializeOwned>(operation: &'static str, value: Value) -> Result<T, ServiceError> {
    serde_json::from_value(value).map_err(|e| {
        tracing::error!(operation, error = %e, "Unexpected response shape");
        ServiceError::parse(e)
    })
}

fn decode_data<T: DeserializeOwned>(
    operation: &'static str,
    value: Value,
) -> Result<T, ServiceError> {
    decode::<DataResponse<T>>(operation, value).map(|envelope| envelope.data)
}

fn api_failure(
    operation: &'static str,
    character_id: Option<CharacterId>,
    err: ApiError,
) -> ServiceError {
    if err.is_conflict() {
        tracing::warn!(
            operation,
            character_id = ?character_id,
            error = %err,
            "Character was modified concurrently"
        );
    } else {
        tracing::error!(
            operation,
            character_id = ?character_id,
            status = err.status(),
            error = %err,
            "Character API call failed"
        );
    }
    ServiceError::Api(err)
}

/// Character service over the character API.
#[derive(Clone)]
pub struct CharacterService {
    api: Arc<dyn RawApiPort>,
}

impl CharacterService {
    pub fn new(api: Arc<dyn RawApiPort>) -> Self {
        Self { api }
    }

    /// One page of characters.
    pub async fn list(
        &self,
        params: &ListCharactersParams,
    ) -> Result<PaginatedResponse<Character>, ServiceError> {
        let path = list_path(params)?;
        let value = self
            .api
            .get_json(&path)
            .await
            .map_err(|e| api_failure("list", None, e))?;
        decode("list", value)
    }

    pub async fn get(&self, id: CharacterId) -> Result<Character, ServiceError> {
        tracing::debug!(character_id = %id, "Fetching character");
        let value = self
            .api
            .get_json(&character_path(id))
            .await
            .map_err(|e| api_failure("get", Some(id), e))?;
        decode_data("get", value)
    }

    /// Create a character from a completed draft.
    ///
    /// Fails without a request when name, race, class or any ability score
    /// is missing, or a score falls outside 1–20.
    pub async fn create(&self, draft: &CharacterDraft) -> Result<Character, ServiceError> {
        let payload = CreateCharacterPayload::try_from(draft).map_err(|e| {
            tracing::warn!(operation = "create", error = %e, "Character rejected before sending");
            ServiceError::from(e)
        })?;
        let body = serde_json::to_value(&payload).map_err(ServiceError::parse)?;

        tracing::info!(character_name = %payload.character_name, "Creating character");
        let value = self
            .api
            .post_json(CHARACTERS_PATH, &body)
            .await
            .map_err(|e| api_failure("create", None, e))?;
        let character: Character = decode_data("create", value)?;
        tracing::info!(character_id = %character.id, "Character created");
        Ok(character)
    }

    /// Send only the fields present in `patch`.
    pub async fn update(
        &self,
        id: CharacterId,
        patch: &CharacterDraft,
    ) -> Result<Character, ServiceError> {
        let payload = UpdateCharacterPayload::from(patch);
        let body = serde_json::to_value(&payload).map_err(ServiceError::parse)?;

        tracing::info!(character_id = %id, "Updating character");
        let value = self
            .api
            .put_json(&character_path(id), &body)
            .await
            .map_err(|e| api_failure("update", Some(id), e))?;
        decode_data("update", value)
    }

    pub async fn delete(&self, id: CharacterId) -> Result<(), ServiceError> {
        tracing::info!(character_id = %id, "Deleting character");
        self.api
            .delete(&character_path(id))
            .await
            .map_err(|e| api_failure("delete", Some(id), e))
    }

    pub async fn health(&self) -> Result<HealthResponse, ServiceError> {
        let value = self
            .api
            .get_json(HEALTH_PATH)
            .await
            .map_err(|e| api_failure("health", None, e))?;
        decode("health", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::fixtures;
    use crate::ports::outbound::MockRawApiPort;
    use pcm_domain::{Ability, AbilityScores};
    use pcm_shared::{SortField, SortOrder};
    use serde_json::json;

    fn service(api: MockRawApiPort) -> CharacterService {
        CharacterService::new(Arc::new(api))
    }

    #[test]
    fn list_path_encodes_only_present_params() {
        assert_eq!(
            list_path(&ListCharactersParams::default()).expect("encodes"),
            "/api/characters"
        );

        let path = list_path(&ListCharactersParams {
            page: Some(2),
            limit: Some(20),
            search: Some("Aria Moon".into()),
            sort_by: Some(SortField::CharacterName),
            sort_order: Some(SortOrder::Asc),
        })
        .expect("encodes");
        assert!(path.starts_with("/api/characters?"));
        assert!(path.contains("page=2"));
        assert!(path.contains("limit=20"));
        assert!(path.contains("search=Aria+Moon"));
        assert!(path.contains("sortBy=characterName"));
        assert!(path.contains("sortOrder=asc"));
    }

    #[tokio::test]
    async fn list_decodes_flat_pagination() {
        let mut api = MockRawApiPort::new();
        api.expect_get_json()
            .withf(|path| path.contains("sortBy=createdAt") && !path.contains("search"))
            .times(1)
            .returning(|_| {
                Ok(json!({
                    "data": [fixtures::character_json()],
                    "total": 21,
                    "page": 1,
                    "limit": 20,
                    "totalPages": 2
                }))
            });

        let page = service(api)
            .list(&ListCharactersParams {
                page: Some(1),
                limit: Some(20),
                search: None,
                sort_by: Some(SortField::CreatedAt),
                sort_order: Some(SortOrder::Desc),
            })
            .await
            .expect("list succeeds");
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.data[0].character_name, "Aria");
    }

    #[tokio::test]
    async fn get_unwraps_data_envelope() {
        let mut api = MockRawApiPort::new();
        api.expect_get_json()
            .withf(|path| path == format!("/api/characters/{}", fixtures::CHARACTER_ID))
            .returning(|_| Ok(fixtures::data_envelope(fixtures::character_json())));

        let character = service(api)
            .get(fixtures::character_id())
            .await
            .expect("get succeeds");
        assert_eq!(character.raw_scores(), fixtures::aria_scores());
    }

    #[tokio::test]
    async fn get_reports_not_found() {
        let mut api = MockRawApiPort::new();
        api.expect_get_json()
            .returning(|_| Err(fixtures::api_error(404, "Character not found")));

        let err = service(api)
            .get(fixtures::character_id())
            .await
            .expect_err("missing");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Character not found");
    }

    #[tokio::test]
    async fn create_with_missing_fields_never_calls_the_api() {
        let mut api = MockRawApiPort::new();
        api.expect_post_json().never();

        let mut draft = fixtures::complete_draft();
        draft.class = None;

        let err = service(api).create(&draft).await.expect_err("rejected");
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn create_with_out_of_range_score_never_calls_the_api() {
        let mut api = MockRawApiPort::new();
        api.expect_post_json().never();

        let mut draft = fixtures::complete_draft();
        draft.ability_scores = Some(AbilityScores::uniform(10).with(Ability::Wisdom, 21));

        let err = service(api).create(&draft).await.expect_err("rejected");
        assert!(err.to_string().contains("Invalid wisdom score: 21"));
    }

    #[tokio::test]
    async fn create_posts_transformed_payload() {
        let mut api = MockRawApiPort::new();
        api.expect_post_json()
            .withf(|path, body| {
                path == CHARACTERS_PATH
                    && body["characterName"] == "Aria"
                    && body["abilityScores"]["intelligence"] == json!({"base": 15})
                    && body["proficiencyBonus"] == 2
                    && body.get("alignment").is_none()
            })
            .times(1)
            .returning(|_, _| Ok(fixtures::data_envelope(fixtures::character_json())));

        let created = service(api)
            .create(&fixtures::complete_draft())
            .await
            .expect("create succeeds");
        assert_eq!(created.id, fixtures::character_id());
    }

    #[tokio::test]
    async fn level_only_update_sends_exactly_level_and_bonus() {
        let mut api = MockRawApiPort::new();
        api.expect_put_json()
            .withf(|_, body| *body == json!({"level": 10, "proficiencyBonus": 4}))
            .times(1)
            .returning(|_, _| Ok(fixtures::data_envelope(fixtures::character_json())));

        let patch = CharacterDraft {
            level: Some(10),
            ..CharacterDraft::default()
        };
        service(api)
            .update(fixtures::character_id(), &patch)
            .await
            .expect("update succeeds");
    }

    #[tokio::test]
    async fn update_conflict_is_distinguishable() {
        let mut api = MockRawApiPort::new();
        api.expect_put_json()
            .returning(|_, _| Err(fixtures::api_error(409, "version mismatch")));

        let patch = CharacterDraft {
            name: Some("Aria".into()),
            ..CharacterDraft::default()
        };
        let err = service(api)
            .update(fixtures::character_id(), &patch)
            .await
            .expect_err("conflict");
        assert!(err.is_conflict());
        assert_eq!(err.status(), Some(409));
    }

    #[tokio::test]
    async fn delete_targets_the_character_path() {
        let mut api = MockRawApiPort::new();
        api.expect_delete()
            .withf(|path| path.ends_with(fixtures::CHARACTER_ID))
            .times(1)
            .returning(|_| Ok(()));

        service(api)
            .delete(fixtures::character_id())
            .await
            .expect("delete succeeds");
    }

    #[tokio::test]
    async fn malformed_response_is_a_parse_error() {
        let mut api = MockRawApiPort::new();
        api.expect_get_json()
            .returning(|_| Ok(json!({"unexpected": true})));

        let err = service(api)
            .get(fixtures::character_id())
            .await
            .expect_err("bad shape");
        assert!(matches!(err, ServiceError::ParseError(_)));
    }

    #[tokio::test]
    async fn health_reads_status() {
        let mut api = MockRawApiPort::new();
        api.expect_get_json()
            .withf(|path| path == HEALTH_PATH)
            .returning(|_| Ok(json!({"status": "ok"})));

        let health = service(api).health().await.expect("healthy");
        assert_eq!(health.status, "ok");
    }
}
