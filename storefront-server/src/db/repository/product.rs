//! Product Repository

use shared::models::{Category, Product, ProductCreate, ProductFilter, ProductPage, ProductUpdate};
use shared::util::now_millis;
use sqlx::SqlitePool;

use super::category::blank_to_null;
use super::{RepoError, RepoResult};

/// Product columns plus the joined category, aliased for [`ProductRow`].
const SELECT_PRODUCT: &str = "SELECT p.id, p.name, p.description, p.price, p.stock, p.image, \
     p.images, p.category_id, p.sku, p.brand, p.created_at, \
     c.name AS category_name, c.slug AS category_slug, \
     c.description AS category_description, c.image AS category_image, \
     c.created_at AS category_created_at \
     FROM products p JOIN categories c ON c.id = p.category_id";

/// Raw joined row; `images` stays the serialized blob until decode.
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: Option<String>,
    price: f64,
    stock: i64,
    image: Option<String>,
    images: Option<String>,
    category_id: i64,
    sku: Option<String>,
    brand: Option<String>,
    created_at: i64,
    category_name: String,
    category_slug: String,
    category_description: Option<String>,
    category_image: Option<String>,
    category_created_at: i64,
}

impl ProductRow {
    fn into_product(self) -> Product {
        let images = self
            .images
            .as_deref()
            .and_then(|blob| serde_json::from_str::<Vec<String>>(blob).ok())
            .unwrap_or_default();
        Product {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
            image: self.image,
            images,
            category_id: self.category_id,
            sku: self.sku,
            brand: self.brand,
            created_at: self.created_at,
            category: Some(Category {
                id: self.category_id,
                name: self.category_name,
                slug: self.category_slug,
                description: self.category_description,
                image: self.category_image,
                created_at: self.category_created_at,
                product_count: 0,
            }),
        }
    }
}

/// List products joined with their category, newest first.
///
/// `page` is 1-based; a page past the end returns an empty list with the
/// correct totals. Ties on `created_at` keep insertion order.
pub async fn list(
    pool: &SqlitePool,
    filter: &ProductFilter,
    page: i64,
    page_size: i64,
) -> RepoResult<ProductPage> {
    let page = page.max(1);
    let page_size = page_size.max(1);

    let mut where_parts: Vec<&str> = Vec::new();
    if filter.category_slug.is_some() {
        where_parts.push("c.slug = ?");
    }
    let search_token = filter.search.as_ref().map(|s| s.to_lowercase());
    if search_token.is_some() {
        where_parts.push(
            "(instr(lower(p.name), ?) > 0 \
             OR instr(lower(COALESCE(p.description, '')), ?) > 0 \
             OR instr(lower(COALESCE(p.sku, '')), ?) > 0)",
        );
    }
    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };

    let count_query = format!(
        "SELECT COUNT(*) FROM products p JOIN categories c ON c.id = p.category_id{where_clause}"
    );
    let mut count = sqlx::query_scalar::<_, i64>(&count_query);
    if let Some(ref slug) = filter.category_slug {
        count = count.bind(slug);
    }
    if let Some(ref token) = search_token {
        count = count.bind(token).bind(token).bind(token);
    }
    let total = count.fetch_one(pool).await?;

    let page_query = format!(
        "{SELECT_PRODUCT}{where_clause} ORDER BY p.created_at DESC, p.id ASC LIMIT ? OFFSET ?"
    );
    let mut query = sqlx::query_as::<_, ProductRow>(&page_query);
    if let Some(ref slug) = filter.category_slug {
        query = query.bind(slug);
    }
    if let Some(ref token) = search_token {
        query = query.bind(token).bind(token).bind(token);
    }
    // Saturate so an absurd page number degrades to an empty page
    let offset = page.saturating_sub(1).saturating_mul(page_size);
    let rows = query
        .bind(page_size)
        .bind(offset)
        .fetch_all(pool)
        .await?;

    Ok(ProductPage {
        products: rows.into_iter().map(ProductRow::into_product).collect(),
        total,
        page,
        total_pages: (total + page_size - 1) / page_size,
    })
}

/// Find product by id with its category joined
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let row = sqlx::query_as::<_, ProductRow>(&format!("{SELECT_PRODUCT} WHERE p.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(ProductRow::into_product))
}

/// Create a new product
pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    if data.name.trim().is_empty() {
        return Err(RepoError::Validation("name must not be empty".into()));
    }
    validate_price(data.price)?;
    let stock = data.stock.unwrap_or(0);
    validate_stock(stock)?;
    ensure_category_exists(pool, data.category_id).await?;

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO products (name, description, price, stock, image, images, category_id, sku, brand, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.name)
    .bind(blank_to_null(data.description))
    .bind(data.price)
    .bind(stock)
    .bind(blank_to_null(data.image))
    .bind(encode_images(&data.images)?)
    .bind(data.category_id)
    .bind(blank_to_null(data.sku))
    .bind(blank_to_null(data.brand))
    .bind(now_millis())
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

/// Update a product. Only supplied fields change; price and stock are
/// re-validated with the same rules as create.
pub async fn update(pool: &SqlitePool, id: i64, data: ProductUpdate) -> RepoResult<Product> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))?;

    if let Some(ref name) = data.name
        && name.trim().is_empty()
    {
        return Err(RepoError::Validation("name must not be empty".into()));
    }
    if let Some(price) = data.price {
        validate_price(price)?;
    }
    if let Some(stock) = data.stock {
        validate_stock(stock)?;
    }
    if let Some(category_id) = data.category_id {
        ensure_category_exists(pool, category_id).await?;
    }

    let mut set_parts: Vec<&str> = Vec::new();
    if data.name.is_some() {
        set_parts.push("name = ?");
    }
    if data.description.is_some() {
        set_parts.push("description = ?");
    }
    if data.price.is_some() {
        set_parts.push("price = ?");
    }
    if data.stock.is_some() {
        set_parts.push("stock = ?");
    }
    if data.image.is_some() {
        set_parts.push("image = ?");
    }
    if data.images.is_some() {
        set_parts.push("images = ?");
    }
    if data.category_id.is_some() {
        set_parts.push("category_id = ?");
    }
    if data.sku.is_some() {
        set_parts.push("sku = ?");
    }
    if data.brand.is_some() {
        set_parts.push("brand = ?");
    }

    if set_parts.is_empty() {
        return Ok(existing);
    }

    let query_str = format!("UPDATE products SET {} WHERE id = ?", set_parts.join(", "));
    let mut query = sqlx::query(&query_str);
    if let Some(name) = data.name {
        query = query.bind(name);
    }
    if let Some(description) = data.description {
        query = query.bind(blank_to_null(Some(description)));
    }
    if let Some(price) = data.price {
        query = query.bind(price);
    }
    if let Some(stock) = data.stock {
        query = query.bind(stock);
    }
    if let Some(image) = data.image {
        query = query.bind(blank_to_null(Some(image)));
    }
    if let Some(ref images) = data.images {
        query = query.bind(encode_images(images)?);
    }
    if let Some(category_id) = data.category_id {
        query = query.bind(category_id);
    }
    if let Some(sku) = data.sku {
        query = query.bind(blank_to_null(Some(sku)));
    }
    if let Some(brand) = data.brand {
        query = query.bind(blank_to_null(Some(brand)));
    }
    query.bind(id).execute(pool).await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

/// Delete a product, unconditionally.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let result = sqlx::query("DELETE FROM products WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    Ok(())
}

fn validate_price(price: f64) -> RepoResult<()> {
    if !price.is_finite() || price <= 0.0 {
        return Err(RepoError::Validation(
            "price must be a positive number".into(),
        ));
    }
    Ok(())
}

fn validate_stock(stock: i64) -> RepoResult<()> {
    if stock < 0 {
        return Err(RepoError::Validation("stock must not be negative".into()));
    }
    Ok(())
}

async fn ensure_category_exists(pool: &SqlitePool, category_id: i64) -> RepoResult<()> {
    let found = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories WHERE id = ?")
        .bind(category_id)
        .fetch_one(pool)
        .await?;
    if found == 0 {
        return Err(RepoError::Validation(format!(
            "category {category_id} does not exist"
        )));
    }
    Ok(())
}

/// Serialize the image list; an empty sequence is stored as NULL rather
/// than an empty JSON array.
fn encode_images(images: &[String]) -> RepoResult<Option<String>> {
    if images.is_empty() {
        return Ok(None);
    }
    serde_json::to_string(images)
        .map(Some)
        .map_err(|e| RepoError::Validation(format!("invalid images payload: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::CategoryCreate;
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

    async fn seed_category(pool: &SqlitePool, name: &str) -> i64 {
        super::super::category::create(
            pool,
            CategoryCreate {
                name: name.to_string(),
                description: None,
                image: None,
            },
        )
        .await
        .unwrap()
        .id
    }

    fn new_product(name: &str, category_id: i64) -> ProductCreate {
        ProductCreate {
            name: name.to_string(),
            description: None,
            price: 100.0,
            stock: None,
            image: None,
            images: vec![],
            category_id,
            sku: None,
            brand: None,
        }
    }

    #[tokio::test]
    async fn create_populates_category_and_defaults_stock() {
        let pool = test_pool().await;
        let cat_id = seed_category(&pool, "Herramientas").await;

        let product = create(&pool, new_product("Pala", cat_id)).await.unwrap();
        assert_eq!(product.stock, 0);
        assert_eq!(product.category_id, cat_id);
        let cat = product.category.expect("category joined");
        assert_eq!(cat.slug, "herramientas");
    }

    #[tokio::test]
    async fn create_rejects_bad_price_and_missing_category() {
        let pool = test_pool().await;
        let cat_id = seed_category(&pool, "Herramientas").await;

        let mut zero_price = new_product("Pala", cat_id);
        zero_price.price = 0.0;
        assert!(matches!(
            create(&pool, zero_price).await.unwrap_err(),
            RepoError::Validation(_)
        ));

        let mut negative = new_product("Pala", cat_id);
        negative.price = -5.0;
        assert!(create(&pool, negative).await.is_err());

        let orphan = new_product("Pala", 4242);
        assert!(matches!(
            create(&pool, orphan).await.unwrap_err(),
            RepoError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn images_round_trip_and_empty_is_null() {
        let pool = test_pool().await;
        let cat_id = seed_category(&pool, "Herramientas").await;

        let mut data = new_product("Taladro", cat_id);
        data.images = vec!["a.jpg".into(), "b.jpg".into()];
        let product = create(&pool, data).await.unwrap();
        assert_eq!(product.images, vec!["a.jpg", "b.jpg"]);

        let plain = create(&pool, new_product("Pala", cat_id)).await.unwrap();
        let stored: Option<String> =
            sqlx::query_scalar("SELECT images FROM products WHERE id = ?")
                .bind(plain.id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert!(stored.is_none());

        // Clearing via explicit empty sequence stores NULL again
        let cleared = update(
            &pool,
            product.id,
            ProductUpdate {
                images: Some(vec![]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(cleared.images.is_empty());
    }

    #[tokio::test]
    async fn empty_update_leaves_every_field_unchanged() {
        let pool = test_pool().await;
        let cat_id = seed_category(&pool, "Herramientas").await;
        let mut data = new_product("Martillo", cat_id);
        data.description = Some("De carpintero".into());
        data.sku = Some("HM-01".into());
        data.stock = Some(7);
        let before = create(&pool, data).await.unwrap();

        let after = update(&pool, before.id, ProductUpdate::default()).await.unwrap();
        assert_eq!(after.name, before.name);
        assert_eq!(after.description, before.description);
        assert_eq!(after.price, before.price);
        assert_eq!(after.stock, before.stock);
        assert_eq!(after.sku, before.sku);
        assert_eq!(after.created_at, before.created_at);
    }

    #[tokio::test]
    async fn update_missing_product_is_not_found() {
        let pool = test_pool().await;
        let err = update(&pool, 77, ProductUpdate::default()).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
        let err = delete(&pool, 77).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn search_is_case_insensitive_and_or_combined() {
        let pool = test_pool().await;
        let cat_id = seed_category(&pool, "Herramientas").await;
        let mut data = new_product("Martillo", cat_id);
        data.sku = Some("HM-01".into());
        create(&pool, data).await.unwrap();
        create(&pool, new_product("Pala", cat_id)).await.unwrap();

        for token in ["martillo", "MARTILLO", "hm-01"] {
            let page = list(
                &pool,
                &ProductFilter {
                    category_slug: None,
                    search: Some(token.to_string()),
                },
                1,
                12,
            )
            .await
            .unwrap();
            assert_eq!(page.total, 1, "token {token}");
            assert_eq!(page.products[0].name, "Martillo");
        }

        // No match on any field
        let none = list(
            &pool,
            &ProductFilter {
                category_slug: None,
                search: Some("destornillador".into()),
            },
            1,
            12,
        )
        .await
        .unwrap();
        assert_eq!(none.total, 0);
    }

    #[tokio::test]
    async fn filter_by_category_slug() {
        let pool = test_pool().await;
        let tools = seed_category(&pool, "Herramientas").await;
        let paint = seed_category(&pool, "Pintura").await;
        create(&pool, new_product("Pala", tools)).await.unwrap();
        create(&pool, new_product("Rodillo", paint)).await.unwrap();

        let page = list(
            &pool,
            &ProductFilter {
                category_slug: Some("herramientas".into()),
                search: None,
            },
            1,
            12,
        )
        .await
        .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.products[0].name, "Pala");
    }

    #[tokio::test]
    async fn pagination_totals_and_out_of_range_page() {
        let pool = test_pool().await;
        let cat_id = seed_category(&pool, "Herramientas").await;
        for i in 0..25 {
            create(&pool, new_product(&format!("Producto {i}"), cat_id))
                .await
                .unwrap();
        }

        let filter = ProductFilter::default();
        let first = list(&pool, &filter, 1, 12).await.unwrap();
        assert_eq!(first.total, 25);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.products.len(), 12);

        let last = list(&pool, &filter, 3, 12).await.unwrap();
        assert_eq!(last.products.len(), 1);
        assert_eq!(last.total_pages, 3);

        let beyond = list(&pool, &filter, 4, 12).await.unwrap();
        assert!(beyond.products.is_empty());
        assert_eq!(beyond.total, 25);
        assert_eq!(beyond.total_pages, 3);

        // Skip computation must not overflow on extreme page numbers
        let extreme = list(&pool, &filter, i64::MAX, 12).await.unwrap();
        assert!(extreme.products.is_empty());
        assert_eq!(extreme.total, 25);
        assert_eq!(extreme.total_pages, 3);
    }

    #[tokio::test]
    async fn newest_first_with_stable_ties() {
        let pool = test_pool().await;
        let cat_id = seed_category(&pool, "Herramientas").await;
        // Same-millisecond inserts are likely here; ties must keep
        // insertion order within the newest-first sort.
        let a = create(&pool, new_product("Primero", cat_id)).await.unwrap();
        let b = create(&pool, new_product("Segundo", cat_id)).await.unwrap();

        let page = list(&pool, &ProductFilter::default(), 1, 12).await.unwrap();
        let ids: Vec<i64> = page.products.iter().map(|p| p.id).collect();
        if a.created_at == b.created_at {
            assert_eq!(ids, vec![a.id, b.id]);
        } else {
            assert_eq!(ids, vec![b.id, a.id]);
        }
    }
}
