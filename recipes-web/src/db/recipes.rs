//! Recipe table operations

use sqlx::{Row, SqlitePool};

/// New recipe ready for insertion (image already downloaded)
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub title: String,
    pub yields: String,
    pub prep_time: String,
    pub cook_time: String,
    /// Comma-joined ingredient list
    pub ingredients: String,
    pub instructions: String,
    pub image: Option<Vec<u8>>,
    pub category: Option<String>,
}

/// Gallery listing row
#[derive(Debug, Clone)]
pub struct RecipeSummaryRow {
    pub id: i64,
    pub title: String,
    pub times_cooked: i64,
    pub has_image: bool,
    pub category: Option<String>,
}

/// Full recipe row (without the image blob)
#[derive(Debug, Clone)]
pub struct RecipeRow {
    pub id: i64,
    pub title: String,
    pub yields: String,
    pub prep_time: String,
    pub cook_time: String,
    pub times_cooked: i64,
    pub ingredients: String,
    pub instructions: String,
    pub has_image: bool,
    pub category: Option<String>,
}

/// Insert a recipe, returning the assigned id
pub async fn insert_recipe(pool: &SqlitePool, recipe: &NewRecipe) -> sqlx::Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO recipes (
            title, yields, prep_time, cook_time,
            ingredients, instructions, image, category
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&recipe.title)
    .bind(&recipe.yields)
    .bind(&recipe.prep_time)
    .bind(&recipe.cook_time)
    .bind(&recipe.ingredients)
    .bind(&recipe.instructions)
    .bind(&recipe.image)
    .bind(&recipe.category)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Check whether a recipe with this title already exists
pub async fn title_exists(pool: &SqlitePool, title: &str) -> sqlx::Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes WHERE title = ?")
        .bind(title)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

/// List all recipes in gallery order (most cooked first, then oldest)
pub async fn list_recipes(pool: &SqlitePool) -> sqlx::Result<Vec<RecipeSummaryRow>> {
    let rows = sqlx::query(
        r#"
        SELECT id, title, times_cooked, image IS NOT NULL AS has_image, category
        FROM recipes
        ORDER BY times_cooked DESC, id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| RecipeSummaryRow {
            id: row.get("id"),
            title: row.get("title"),
            times_cooked: row.get("times_cooked"),
            has_image: row.get::<i64, _>("has_image") != 0,
            category: row.get("category"),
        })
        .collect())
}

/// Load one recipe by id
pub async fn get_recipe(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<RecipeRow>> {
    let row = sqlx::query(
        r#"
        SELECT id, title,
               COALESCE(yields, '') AS yields,
               COALESCE(prep_time, '') AS prep_time,
               COALESCE(cook_time, '') AS cook_time,
               times_cooked, ingredients, instructions,
               image IS NOT NULL AS has_image, category
        FROM recipes
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| RecipeRow {
        id: row.get("id"),
        title: row.get("title"),
        yields: row.get("yields"),
        prep_time: row.get("prep_time"),
        cook_time: row.get("cook_time"),
        times_cooked: row.get("times_cooked"),
        ingredients: row.get("ingredients"),
        instructions: row.get("instructions"),
        has_image: row.get::<i64, _>("has_image") != 0,
        category: row.get("category"),
    }))
}

/// Increment the cook counter, returning the new authoritative count
///
/// Returns None when no recipe has this id.
pub async fn increment_times_cooked(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<i64>> {
    let result = sqlx::query("UPDATE recipes SET times_cooked = times_cooked + 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    let count: i64 = sqlx::query_scalar("SELECT times_cooked FROM recipes WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;

    Ok(Some(count))
}

/// Delete a recipe, returning whether a row was removed
pub async fn delete_recipe(pool: &SqlitePool, id: i64) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM recipes WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Load stored image bytes for a recipe
pub async fn get_image(pool: &SqlitePool, id: i64) -> sqlx::Result<Option<Vec<u8>>> {
    let row = sqlx::query("SELECT image FROM recipes WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.and_then(|row| row.get::<Option<Vec<u8>>, _>("image")))
}
