//! Screens and the loop that moves between them.

use std::sync::Arc;

use colored::Colorize;

use pcm_domain::CharacterId;
use pcm_shared::{SortField, SortOrder};

use crate::application::services::CharacterService;
use crate::application::wizard::Navigation;
use crate::infrastructure::run_guarded;
use crate::ports::outbound::SleepProvider;
use crate::ui::presentation::views;
use crate::ui::UiError;

pub mod character_detail;
pub mod character_list;
pub mod pc_creation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    CharacterList {
        search: String,
        sort_by: SortField,
        sort_order: SortOrder,
        page: u32,
        banner: Option<String>,
    },
    CharacterDetail {
        id: CharacterId,
    },
    CreateCharacter,
    EditCharacter {
        id: CharacterId,
    },
}

impl Route {
    /// The list with its default query.
    pub fn home() -> Self {
        Self::list_with_banner(None)
    }

    pub fn list_with_banner(banner: Option<String>) -> Self {
        Route::CharacterList {
            search: String::new(),
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
            page: 1,
            banner,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::CharacterList { .. } => "/".to_string(),
            Route::CharacterDetail { id } => format!("/characters/{}", id),
            Route::CreateCharacter => "/create".to_string(),
            Route::EditCharacter { id } => format!("/edit/{}", id),
        }
    }

    pub fn screen(&self) -> &'static str {
        match self {
            Route::CharacterList { .. } => "character_list",
            Route::CharacterDetail { .. } => "character_detail",
            Route::CreateCharacter => "create_character",
            Route::EditCharacter { .. } => "edit_character",
        }
    }

    pub fn is_home(&self) -> bool {
        matches!(self, Route::CharacterList { .. })
    }
}

impl From<Navigation> for Route {
    fn from(navigation: Navigation) -> Self {
        match navigation {
            Navigation::CharacterDetail(id) => Route::CharacterDetail { id },
            Navigation::CharacterList { success_message } => Route::list_with_banner(success_message),
        }
    }
}

/// Runs one screen at a time; each screen returns where to go next.
#[derive(Clone)]
pub struct Router {
    service: CharacterService,
    sleeper: Arc<dyn SleepProvider>,
}

impl Router {
    pub fn new(service: CharacterService, sleeper: Arc<dyn SleepProvider>) -> Self {
        Self { service, sleeper }
    }

    pub async fn run(&self, start: Route) {
        let mut route = start;
        loop {
            tracing::debug!(route = %route.path(), "Navigating");
            let screen = route.screen();
            let was_home = route.is_home();

            let router = self.clone();
            let next = match run_guarded(screen, async move { router.render(route).await }).await {
                Ok(Ok(next)) => next,
                Ok(Err(UiError::Prompt(e))) => {
                    tracing::debug!(screen, error = %e, "Prompt closed, exiting");
                    None
                }
                Ok(Err(e)) => {
                    tracing::error!(screen, error = %e, "Screen failed");
                    eprintln!("{} {}", "✗".red().bold(), e);
                    (!was_home).then(Route::home)
                }
                Err(recovery) => {
                    println!("{}", views::recovery_screen(&recovery));
                    (!was_home).then(Route::home)
                }
            };

            match next {
                Some(next) => route = next,
                None => break,
            }
        }
    }

    async fn render(self, route: Route) -> Result<Option<Route>, UiError> {
        match route {
            Route::CharacterList {
                search,
                sort_by,
                sort_order,
                page,
                banner,
            } => {
                let query = character_list::InitialQuery {
                    search,
                    sort_by,
                    sort_order,
                    page,
                };
                character_list::show(&self.service, Arc::clone(&self.sleeper), query, banner).await
            }
            Route::CharacterDetail { id } => character_detail::show(&self.service, id).await,
            Route::CreateCharacter => pc_creation::create(&self.service).await,
            Route::EditCharacter { id } => pc_creation::edit(&self.service, id).await,
        }
    }
}

/// `health` command.
pub async fn check_health(service: &CharacterService) -> Result<(), UiError> {
    let health = service.health().await?;
    println!("{} API status: {}", "✓".green().bold(), health.status);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::fixtures;

    #[test]
    fn navigation_maps_to_routes() {
        let route = Route::from(Navigation::CharacterDetail(fixtures::character_id()));
        assert_eq!(route.path(), format!("/characters/{}", fixtures::CHARACTER_ID));

        let route = Route::from(Navigation::CharacterList {
            success_message: Some("saved".into()),
        });
        assert!(route.is_home());
        assert!(matches!(
            route,
            Route::CharacterList { banner: Some(ref b), page: 1, .. } if b == "saved"
        ));
    }

    #[test]
    fn paths() {
        assert_eq!(Route::home().path(), "/");
        assert_eq!(Route::CreateCharacter.path(), "/create");
        assert_eq!(
            Route::EditCharacter {
                id: fixtures::character_id()
            }
            .path(),
            format!("/edit/{}", fixtures::CHARACTER_ID)
        );
    }
}
