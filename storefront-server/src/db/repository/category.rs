//! Category Repository

use shared::models::{Category, CategoryCreate, CategoryUpdate};
use shared::util::now_millis;
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::utils::slug::slugify;

/// Columns selected for every category read; `product_count` is computed,
/// never stored.
const SELECT_CATEGORY: &str = "SELECT id, name, slug, description, image, created_at, \
     (SELECT COUNT(*) FROM products p WHERE p.category_id = categories.id) AS product_count \
     FROM categories";

/// Find all categories with their product counts, ordered by name.
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Category>> {
    let categories =
        sqlx::query_as::<_, Category>(&format!("{SELECT_CATEGORY} ORDER BY name, id"))
            .fetch_all(pool)
            .await?;
    Ok(categories)
}

/// Find category by id
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Category>> {
    let category = sqlx::query_as::<_, Category>(&format!("{SELECT_CATEGORY} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(category)
}

/// Find category by slug
pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> RepoResult<Option<Category>> {
    let category = sqlx::query_as::<_, Category>(&format!("{SELECT_CATEGORY} WHERE slug = ?"))
        .bind(slug)
        .fetch_optional(pool)
        .await?;
    Ok(category)
}

/// Create a new category. The slug is derived from the name; a slug that
/// already exists is a conflict.
pub async fn create(pool: &SqlitePool, data: CategoryCreate) -> RepoResult<Category> {
    if data.name.trim().is_empty() {
        return Err(RepoError::Validation("name must not be empty".into()));
    }

    let slug = slugify(&data.name);
    if slug.is_empty() {
        return Err(RepoError::Validation(format!(
            "name '{}' does not produce a valid slug",
            data.name
        )));
    }
    if find_by_slug(pool, &slug).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Category '{slug}' already exists"
        )));
    }

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO categories (name, slug, description, image, created_at) \
         VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(&slug)
    .bind(blank_to_null(data.description))
    .bind(blank_to_null(data.image))
    .bind(now_millis())
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create category".into()))
}

/// Update a category. A changed name regenerates the slug and re-checks
/// uniqueness against every other category.
pub async fn update(pool: &SqlitePool, id: i64, data: CategoryUpdate) -> RepoResult<Category> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))?;

    let new_slug = match data.name {
        Some(ref name) => {
            if name.trim().is_empty() {
                return Err(RepoError::Validation("name must not be empty".into()));
            }
            let slug = slugify(name);
            if slug.is_empty() {
                return Err(RepoError::Validation(format!(
                    "name '{name}' does not produce a valid slug"
                )));
            }
            if slug != existing.slug {
                let taken = sqlx::query_scalar::<_, i64>(
                    "SELECT COUNT(*) FROM categories WHERE slug = ? AND id != ?",
                )
                .bind(&slug)
                .bind(id)
                .fetch_one(pool)
                .await?;
                if taken > 0 {
                    return Err(RepoError::Duplicate(format!(
                        "Category '{slug}' already exists"
                    )));
                }
            }
            Some(slug)
        }
        None => None,
    };

    let mut set_parts: Vec<&str> = Vec::new();
    if data.name.is_some() {
        set_parts.push("name = ?");
        set_parts.push("slug = ?");
    }
    if data.description.is_some() {
        set_parts.push("description = ?");
    }
    if data.image.is_some() {
        set_parts.push("image = ?");
    }

    if set_parts.is_empty() {
        return Ok(existing);
    }

    let query_str = format!("UPDATE categories SET {} WHERE id = ?", set_parts.join(", "));
    let mut query = sqlx::query(&query_str);
    if let Some(name) = data.name {
        query = query.bind(name).bind(new_slug);
    }
    if let Some(description) = data.description {
        query = query.bind(blank_to_null(Some(description)));
    }
    if let Some(image) = data.image {
        query = query.bind(blank_to_null(Some(image)));
    }
    query.bind(id).execute(pool).await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))
}

/// Delete a category. Refused while any product still references it; the
/// count and the delete run in one transaction so a concurrent product
/// creation cannot slip between them.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let mut tx = pool.begin().await?;

    let product_count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE category_id = ?")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

    if product_count > 0 {
        return Err(RepoError::Conflict(
            "category has dependent products".into(),
        ));
    }

    let result = sqlx::query("DELETE FROM categories WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Category {id} not found")));
    }

    tx.commit().await?;
    Ok(())
}

/// Map an explicit empty string to NULL for nullable text columns.
pub(crate) fn blank_to_null(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::ProductCreate;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    fn new_category(name: &str) -> CategoryCreate {
        CategoryCreate {
            name: name.to_string(),
            description: None,
            image: None,
        }
    }

    #[tokio::test]
    async fn create_derives_slug_and_counts_start_at_zero() {
        let pool = test_pool().await;
        let cat = create(&pool, new_category("Herramientas Eléctricas"))
            .await
            .unwrap();
        assert_eq!(cat.slug, "herramientas-electricas");
        assert_eq!(cat.product_count, 0);
    }

    #[tokio::test]
    async fn duplicate_slug_is_a_conflict() {
        let pool = test_pool().await;
        create(&pool, new_category("Pintura")).await.unwrap();
        // Different display name, same derived slug
        let err = create(&pool, new_category("PINTURA!")).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn rename_regenerates_slug_and_keeps_own_slug_valid() {
        let pool = test_pool().await;
        let cat = create(&pool, new_category("Jardín")).await.unwrap();

        // Re-saving the same name must not trip the uniqueness check
        let same = update(
            &pool,
            cat.id,
            CategoryUpdate {
                name: Some("Jardín".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(same.slug, "jardin");

        let renamed = update(
            &pool,
            cat.id,
            CategoryUpdate {
                name: Some("Jardín y Exterior".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(renamed.slug, "jardin-y-exterior");
    }

    #[tokio::test]
    async fn rename_to_symbols_only_is_rejected() {
        let pool = test_pool().await;
        let cat = create(&pool, new_category("Jardín")).await.unwrap();

        let err = update(
            &pool,
            cat.id,
            CategoryUpdate {
                name: Some("!!!".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));

        // Name and slug are untouched after the rejected rename
        let unchanged = find_by_id(&pool, cat.id).await.unwrap().unwrap();
        assert_eq!(unchanged.name, "Jardín");
        assert_eq!(unchanged.slug, "jardin");
    }

    #[tokio::test]
    async fn empty_update_changes_nothing() {
        let pool = test_pool().await;
        let cat = create(
            &pool,
            CategoryCreate {
                name: "Plomería".into(),
                description: Some("Caños y llaves".into()),
                image: None,
            },
        )
        .await
        .unwrap();

        let after = update(&pool, cat.id, CategoryUpdate::default()).await.unwrap();
        assert_eq!(after.name, cat.name);
        assert_eq!(after.slug, cat.slug);
        assert_eq!(after.description, cat.description);
    }

    #[tokio::test]
    async fn delete_guard_blocks_while_products_exist() {
        let pool = test_pool().await;
        let cat = create(&pool, new_category("Herramientas")).await.unwrap();

        super::super::product::create(
            &pool,
            ProductCreate {
                name: "Pala".into(),
                description: None,
                price: 1500.0,
                stock: None,
                image: None,
                images: vec![],
                category_id: cat.id,
                sku: None,
                brand: None,
            },
        )
        .await
        .unwrap();

        let err = delete(&pool, cat.id).await.unwrap_err();
        assert!(matches!(err, RepoError::Conflict(ref msg) if msg == "category has dependent products"));

        // Guard never removed the category
        let still_there = find_by_id(&pool, cat.id).await.unwrap().unwrap();
        assert_eq!(still_there.product_count, 1);
    }

    #[tokio::test]
    async fn delete_succeeds_once_empty() {
        let pool = test_pool().await;
        let cat = create(&pool, new_category("Vacía")).await.unwrap();
        delete(&pool, cat.id).await.unwrap();
        assert!(find_by_id(&pool, cat.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let pool = test_pool().await;
        let err = delete(&pool, 999).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
