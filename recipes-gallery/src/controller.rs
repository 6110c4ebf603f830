//! Gallery controller
//!
//! Reconciles the card model with server state and translates user
//! gestures into server requests. All failures are logged and otherwise
//! swallowed: the operation silently does not complete, there are no
//! retries, and nothing is surfaced beyond the log (fire-and-forget).

use serde_json::Value;
use tracing::warn;

use crate::api::RecipeApi;
use crate::model::{Card, GalleryModel};

/// Gallery controller over a [`RecipeApi`] implementation
pub struct GalleryController<A: RecipeApi> {
    api: A,
    model: GalleryModel,
}

impl<A: RecipeApi> GalleryController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            model: GalleryModel::new(),
        }
    }

    /// Current model state
    pub fn model(&self) -> &GalleryModel {
        &self.model
    }

    /// Snapshot of all cards in display order
    pub fn render(&self) -> Vec<Card> {
        self.model.render()
    }

    /// Rebuild the model from the server's full recipe list
    ///
    /// The display is cleared first; on failure it stays empty.
    pub async fn load_all(&mut self) {
        self.model.clear();

        let recipes = match self.api.list_recipes().await {
            Ok(recipes) => recipes,
            Err(e) => {
                warn!("Failed to load recipes: {}", e);
                return;
            }
        };

        for summary in &recipes {
            self.model.insert(Card::from(summary));
        }
    }

    /// Fetch a recipe from a URL, save it, and add its card
    ///
    /// The fetched payload is forwarded to the save endpoint unchanged;
    /// the assigned id and image URL are merged in before the card is
    /// built.
    pub async fn submit_url(&mut self, url: &str) {
        let url = url.trim();
        if url.is_empty() {
            return;
        }

        let mut payload = match self.api.fetch_recipe(url).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to fetch recipe from {}: {}", url, e);
                return;
            }
        };

        let saved = match self.api.save_recipe(&payload).await {
            Ok(saved) => saved,
            Err(e) => {
                warn!("Failed to save recipe from {}: {}", url, e);
                return;
            }
        };

        // Merge the server-assigned fields into the fetched payload
        if let Value::Object(map) = &mut payload {
            map.insert("id".to_string(), Value::from(saved.id));
            if let Some(image_url) = &saved.image_url {
                map.insert("image_url".to_string(), Value::from(image_url.clone()));
            }
        }

        self.model.insert(Card {
            id: saved.id,
            title: payload
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or("Untitled")
                .to_string(),
            times_cooked: payload
                .get("times_cooked")
                .and_then(Value::as_i64)
                .unwrap_or(0),
            image_url: saved.image_url,
        });
    }

    /// Bump one recipe's cook counter
    ///
    /// The card shows the server-returned count, never a local increment,
    /// so independent server-side edits cannot drift the display.
    pub async fn increment(&mut self, id: i64) {
        match self.api.increment_cooked(id).await {
            Ok(reply) if reply.success => {
                self.model.set_times_cooked(id, reply.times_cooked);
            }
            Ok(_) => {
                warn!("Increment rejected for recipe {}", id);
            }
            Err(e) => {
                warn!("Failed to increment recipe {}: {}", id, e);
            }
        }
    }

    /// Delete a recipe after interactive confirmation
    ///
    /// `confirm` guards the destructive action: when it returns false no
    /// request is issued and nothing changes anywhere.
    pub async fn delete(&mut self, id: i64, confirm: impl FnOnce() -> bool) {
        if !confirm() {
            return;
        }

        match self.api.delete_recipe(id).await {
            Ok(()) => {
                self.model.remove(id);
            }
            Err(e) => {
                warn!("Failed to delete recipe {}: {}", id, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiClientError;
    use async_trait::async_trait;
    use recipes_common::models::{IncrementResponse, RecipeSummary, SaveRecipeResponse};
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Debug, Clone)]
    struct StoredRecipe {
        id: i64,
        title: String,
        times_cooked: i64,
    }

    /// In-memory stand-in for the server
    struct InMemoryApi {
        recipes: Mutex<Vec<StoredRecipe>>,
        next_id: AtomicI64,
        fetch_payload: Option<Value>,
        fail_listing: AtomicBool,
        delete_requests: AtomicUsize,
    }

    impl InMemoryApi {
        fn new() -> Self {
            Self {
                recipes: Mutex::new(Vec::new()),
                next_id: AtomicI64::new(1),
                fetch_payload: None,
                fail_listing: AtomicBool::new(false),
                delete_requests: AtomicUsize::new(0),
            }
        }

        fn with_recipes(recipes: Vec<StoredRecipe>) -> Self {
            let next_id = recipes.iter().map(|r| r.id).max().unwrap_or(0) + 1;
            let api = Self::new();
            *api.recipes.lock().unwrap() = recipes;
            api.next_id.store(next_id, Ordering::SeqCst);
            api
        }

        fn stored(id: i64, title: &str, times_cooked: i64) -> StoredRecipe {
            StoredRecipe {
                id,
                title: title.to_string(),
                times_cooked,
            }
        }
    }

    #[async_trait]
    impl RecipeApi for InMemoryApi {
        async fn fetch_recipe(&self, _url: &str) -> Result<Value, ApiClientError> {
            self.fetch_payload
                .clone()
                .ok_or_else(|| ApiClientError::Network("fetch failed".to_string()))
        }

        async fn list_recipes(&self) -> Result<Vec<RecipeSummary>, ApiClientError> {
            if self.fail_listing.load(Ordering::SeqCst) {
                return Err(ApiClientError::Network("connection refused".to_string()));
            }

            Ok(self
                .recipes
                .lock()
                .unwrap()
                .iter()
                .map(|r| RecipeSummary {
                    id: r.id,
                    title: r.title.clone(),
                    times_cooked: r.times_cooked,
                    image_url: None,
                    category: None,
                })
                .collect())
        }

        async fn save_recipe(&self, recipe: &Value) -> Result<SaveRecipeResponse, ApiClientError> {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            let title = recipe
                .get("title")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();

            self.recipes.lock().unwrap().push(StoredRecipe {
                id,
                title,
                times_cooked: 0,
            });

            Ok(SaveRecipeResponse {
                id,
                image_url: Some(format!("/image/{}", id)),
            })
        }

        async fn increment_cooked(&self, id: i64) -> Result<IncrementResponse, ApiClientError> {
            let mut recipes = self.recipes.lock().unwrap();
            match recipes.iter_mut().find(|r| r.id == id) {
                Some(recipe) => {
                    recipe.times_cooked += 1;
                    Ok(IncrementResponse {
                        success: true,
                        times_cooked: recipe.times_cooked,
                    })
                }
                None => Err(ApiClientError::Status(404)),
            }
        }

        async fn delete_recipe(&self, id: i64) -> Result<(), ApiClientError> {
            self.delete_requests.fetch_add(1, Ordering::SeqCst);

            let mut recipes = self.recipes.lock().unwrap();
            let before = recipes.len();
            recipes.retain(|r| r.id != id);
            if recipes.len() == before {
                return Err(ApiClientError::Status(404));
            }
            Ok(())
        }
    }

    fn soup_payload() -> Value {
        json!({
            "title": "Soup",
            "image": "/img/soup.png",
            "ingredients": ["1 onion"],
            "instructions": "Simmer.",
            "times_cooked": 0
        })
    }

    #[tokio::test]
    async fn load_all_mirrors_server_order_without_duplicates() {
        let api = InMemoryApi::with_recipes(vec![
            InMemoryApi::stored(3, "Stew", 5),
            InMemoryApi::stored(1, "Soup", 2),
            InMemoryApi::stored(2, "Pasta", 0),
        ]);
        let mut controller = GalleryController::new(api);

        controller.load_all().await;

        let cards = controller.render();
        assert_eq!(cards.len(), 3);
        let ids: Vec<i64> = cards.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn load_all_failure_leaves_display_empty() {
        let api = InMemoryApi::with_recipes(vec![InMemoryApi::stored(1, "Soup", 0)]);
        let mut controller = GalleryController::new(api);

        controller.load_all().await;
        assert_eq!(controller.render().len(), 1);

        // Next reload fails; the already-cleared display stays empty
        controller.api.fail_listing.store(true, Ordering::SeqCst);
        controller.load_all().await;
        assert!(controller.render().is_empty());
    }

    #[tokio::test]
    async fn submit_url_fetches_saves_and_adds_one_card() {
        let mut api = InMemoryApi::new();
        api.next_id.store(7, Ordering::SeqCst);
        api.fetch_payload = Some(soup_payload());
        let mut controller = GalleryController::new(api);

        controller.submit_url("https://example.com/recipe42").await;

        let cards = controller.render();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].id, 7);
        assert_eq!(cards[0].title, "Soup");
        assert_eq!(cards[0].cooked_label(), "Cooked 0 times");
        assert_eq!(cards[0].image_url.as_deref(), Some("/image/7"));

        // The store has it too
        controller.load_all().await;
        assert_eq!(controller.render().len(), 1);
    }

    #[tokio::test]
    async fn submit_url_with_empty_input_is_a_no_op() {
        let mut api = InMemoryApi::new();
        api.fetch_payload = Some(soup_payload());
        let mut controller = GalleryController::new(api);

        controller.submit_url("   ").await;

        assert!(controller.render().is_empty());
        assert!(controller.api.recipes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn submit_url_fetch_failure_adds_nothing() {
        // fetch_payload is None, so the fetch step fails
        let mut controller = GalleryController::new(InMemoryApi::new());

        controller.submit_url("https://example.com/404").await;

        assert!(controller.render().is_empty());
        assert!(controller.api.recipes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn increment_adopts_server_count_and_touches_one_card() {
        let api = InMemoryApi::with_recipes(vec![
            InMemoryApi::stored(7, "Soup", 0),
            InMemoryApi::stored(8, "Stew", 3),
        ]);
        let mut controller = GalleryController::new(api);
        controller.load_all().await;

        controller.increment(7).await;

        let soup = controller.model().get(7).unwrap();
        assert_eq!(soup.cooked_label(), "Cooked 1 times");
        let stew = controller.model().get(8).unwrap();
        assert_eq!(stew.times_cooked, 3);
    }

    #[tokio::test]
    async fn increment_failure_leaves_counter_unchanged() {
        let api = InMemoryApi::with_recipes(vec![InMemoryApi::stored(7, "Soup", 2)]);
        let mut controller = GalleryController::new(api);
        controller.load_all().await;

        // The recipe vanishes server-side behind the client's back
        controller.api.recipes.lock().unwrap().clear();
        controller.increment(7).await;

        assert_eq!(controller.model().get(7).unwrap().times_cooked, 2);
    }

    #[tokio::test]
    async fn unconfirmed_delete_changes_nothing_anywhere() {
        let api = InMemoryApi::with_recipes(vec![InMemoryApi::stored(7, "Soup", 0)]);
        let mut controller = GalleryController::new(api);
        controller.load_all().await;

        controller.delete(7, || false).await;

        assert!(controller.model().contains(7));
        // No request was issued at all
        assert_eq!(controller.api.delete_requests.load(Ordering::SeqCst), 0);
        assert_eq!(controller.api.recipes.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn confirmed_delete_removes_card_and_record() {
        let api = InMemoryApi::with_recipes(vec![
            InMemoryApi::stored(7, "Soup", 0),
            InMemoryApi::stored(8, "Stew", 0),
        ]);
        let mut controller = GalleryController::new(api);
        controller.load_all().await;

        controller.delete(7, || true).await;

        assert!(!controller.model().contains(7));
        assert!(controller.model().contains(8));

        // Next full load no longer returns the deleted id
        controller.load_all().await;
        let ids: Vec<i64> = controller.render().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![8]);
    }

    #[tokio::test]
    async fn delete_failure_keeps_card() {
        let api = InMemoryApi::with_recipes(vec![InMemoryApi::stored(7, "Soup", 0)]);
        let mut controller = GalleryController::new(api);
        controller.load_all().await;

        // Already gone server-side; the 404 must not remove the local card
        controller.api.recipes.lock().unwrap().clear();
        controller.delete(7, || true).await;

        assert!(controller.model().contains(7));
    }
}
