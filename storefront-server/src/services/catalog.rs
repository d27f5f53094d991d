//! Catalog service
//!
//! Orchestrates the repositories behind the HTTP contract and applies the
//! single authorization policy: reads are public, every create/update/
//! delete requires a pre-validated caller identity. The identity arrives
//! as an explicit parameter; the service performs no authentication
//! itself and holds no session state between calls.

use std::collections::BTreeMap;

use shared::models::{
    Category, CategoryCreate, CategoryUpdate, Product, ProductCreate, ProductFilter, ProductPage,
    ProductUpdate, SiteConfig, SiteConfigUpsert, User, UserCreate,
};
use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::db::repository::{category, product, site_config, user};
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, MAX_TEXT_LEN, MAX_URL_LEN,
    validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct CatalogService {
    pool: SqlitePool,
}

impl CatalogService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Reject the call unless a validated identity was supplied.
    fn require_auth<'a>(auth: Option<&'a CurrentUser>) -> AppResult<&'a CurrentUser> {
        auth.ok_or(AppError::Unauthorized)
    }

    // =========================================================================
    // Products
    // =========================================================================

    pub async fn list_products(
        &self,
        filter: &ProductFilter,
        page: i64,
        page_size: i64,
    ) -> AppResult<ProductPage> {
        Ok(product::list(&self.pool, filter, page, page_size).await?)
    }

    pub async fn get_product(&self, id: i64) -> AppResult<Product> {
        product::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product {id} not found")))
    }

    pub async fn create_product(
        &self,
        auth: Option<&CurrentUser>,
        data: ProductCreate,
    ) -> AppResult<Product> {
        Self::require_auth(auth)?;
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&data.description, "description", MAX_TEXT_LEN)?;
        validate_optional_text(&data.sku, "sku", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&data.brand, "brand", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&data.image, "image", MAX_URL_LEN)?;
        Ok(product::create(&self.pool, data).await?)
    }

    pub async fn update_product(
        &self,
        auth: Option<&CurrentUser>,
        id: i64,
        data: ProductUpdate,
    ) -> AppResult<Product> {
        Self::require_auth(auth)?;
        validate_optional_text(&data.description, "description", MAX_TEXT_LEN)?;
        validate_optional_text(&data.sku, "sku", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&data.brand, "brand", MAX_SHORT_TEXT_LEN)?;
        validate_optional_text(&data.image, "image", MAX_URL_LEN)?;
        Ok(product::update(&self.pool, id, data).await?)
    }

    pub async fn delete_product(&self, auth: Option<&CurrentUser>, id: i64) -> AppResult<()> {
        Self::require_auth(auth)?;
        Ok(product::delete(&self.pool, id).await?)
    }

    // =========================================================================
    // Categories
    // =========================================================================

    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        Ok(category::find_all(&self.pool).await?)
    }

    pub async fn get_category(&self, id: i64) -> AppResult<Category> {
        category::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category {id} not found")))
    }

    pub async fn create_category(
        &self,
        auth: Option<&CurrentUser>,
        data: CategoryCreate,
    ) -> AppResult<Category> {
        Self::require_auth(auth)?;
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&data.description, "description", MAX_TEXT_LEN)?;
        validate_optional_text(&data.image, "image", MAX_URL_LEN)?;
        Ok(category::create(&self.pool, data).await?)
    }

    pub async fn update_category(
        &self,
        auth: Option<&CurrentUser>,
        id: i64,
        data: CategoryUpdate,
    ) -> AppResult<Category> {
        Self::require_auth(auth)?;
        validate_optional_text(&data.description, "description", MAX_TEXT_LEN)?;
        validate_optional_text(&data.image, "image", MAX_URL_LEN)?;
        Ok(category::update(&self.pool, id, data).await?)
    }

    /// Delete a category; refused while any product references it.
    pub async fn delete_category(&self, auth: Option<&CurrentUser>, id: i64) -> AppResult<()> {
        Self::require_auth(auth)?;
        Ok(category::delete(&self.pool, id).await?)
    }

    // =========================================================================
    // Site configuration
    // =========================================================================

    /// Flat key → value map for every stored entry.
    pub async fn get_config(&self) -> AppResult<BTreeMap<String, String>> {
        let entries = site_config::find_all(&self.pool).await?;
        Ok(entries.into_iter().map(|e| (e.key, e.value)).collect())
    }

    pub async fn upsert_config(
        &self,
        auth: Option<&CurrentUser>,
        data: SiteConfigUpsert,
    ) -> AppResult<SiteConfig> {
        Self::require_auth(auth)?;
        validate_required_text(&data.key, "key", MAX_SHORT_TEXT_LEN)?;
        Ok(site_config::upsert(&self.pool, data).await?)
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Create a back-office user; admin-only.
    pub async fn create_user(
        &self,
        auth: Option<&CurrentUser>,
        data: UserCreate,
    ) -> AppResult<User> {
        let caller = Self::require_auth(auth)?;
        if !caller.is_admin() {
            return Err(AppError::Forbidden("admin role required".into()));
        }
        validate_required_text(&data.email, "email", MAX_EMAIL_LEN)?;
        validate_required_text(&data.password, "password", MAX_PASSWORD_LEN)?;
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        Ok(user::create(&self.pool, data).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_service() -> CatalogService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        CatalogService::new(pool)
    }

    fn admin() -> CurrentUser {
        CurrentUser {
            id: 1,
            email: "admin@ferreteria.com".into(),
            name: "Administrador".into(),
            role: "admin".into(),
        }
    }

    fn seller() -> CurrentUser {
        CurrentUser {
            id: 2,
            email: "clerk@ferreteria.com".into(),
            name: "Vendedor".into(),
            role: "vendedor".into(),
        }
    }

    #[tokio::test]
    async fn mutations_require_identity() {
        let svc = test_service().await;

        let err = svc
            .create_category(
                None,
                CategoryCreate {
                    name: "Herramientas".into(),
                    description: None,
                    image: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));

        let err = svc.delete_product(None, 1).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));

        let err = svc
            .upsert_config(
                None,
                SiteConfigUpsert {
                    key: "logo".into(),
                    value: "x.png".into(),
                    value_type: "image".into(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn reads_are_public() {
        let svc = test_service().await;
        assert!(svc.list_categories().await.unwrap().is_empty());
        assert!(svc.get_config().await.unwrap().is_empty());
        let page = svc
            .list_products(&ProductFilter::default(), 1, 12)
            .await
            .unwrap();
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[tokio::test]
    async fn authenticated_seller_can_mutate_catalog_but_not_users() {
        let svc = test_service().await;
        let user = seller();

        let cat = svc
            .create_category(
                Some(&user),
                CategoryCreate {
                    name: "Herramientas".into(),
                    description: None,
                    image: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(cat.slug, "herramientas");

        let err = svc
            .create_user(
                Some(&user),
                UserCreate {
                    email: "x@y.com".into(),
                    password: "secret".into(),
                    name: "X".into(),
                    role: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn admin_creates_users() {
        let svc = test_service().await;
        let created = svc
            .create_user(
                Some(&admin()),
                UserCreate {
                    email: "clerk@ferreteria.com".into(),
                    password: "secret".into(),
                    name: "Vendedor".into(),
                    role: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(created.role, "vendedor");
    }

    #[tokio::test]
    async fn config_map_flattens_entries() {
        let svc = test_service().await;
        let user = admin();
        svc.upsert_config(
            Some(&user),
            SiteConfigUpsert {
                key: "logo".into(),
                value: "x.png".into(),
                value_type: "image".into(),
            },
        )
        .await
        .unwrap();
        svc.upsert_config(
            Some(&user),
            SiteConfigUpsert {
                key: "phone".into(),
                value: "555-1234".into(),
                value_type: "text".into(),
            },
        )
        .await
        .unwrap();

        let map = svc.get_config().await.unwrap();
        assert_eq!(map.get("logo").map(String::as_str), Some("x.png"));
        assert_eq!(map.get("phone").map(String::as_str), Some("555-1234"));
    }
}
