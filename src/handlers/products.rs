use axum::{
    extract::{Json, Path, Query, State},
    routing::{delete, get, post, put},
    Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::AdminUser;
use crate::handlers::common::{
    created_response, map_service_error, no_content_response, success_response, validate_input,
};
use crate::services::filter::{
    distinct_brands, distinct_categories, filter_products, FilterCriteria,
};
use crate::{
    errors::ApiError,
    models::{Product, ProductDraft},
    AppState,
};

/// Creates the router for product endpoints. Mutations are gated by the
/// [`AdminUser`] extractor; reads are public.
pub fn products_routes() -> Router<AppState> {
    let admin = Router::new()
        .route("/", post(create_product))
        .route("/:id", put(update_product))
        .route("/:id", delete(delete_product));

    Router::new()
        .route("/", get(list_products))
        .route("/facets", get(list_facets))
        .route("/:id", get(get_product))
        .merge(admin)
}

fn normalize_string(value: String) -> String {
    value.trim().to_string()
}

fn ensure_decimal_non_negative(value: &Decimal, field: &str) -> Result<(), ApiError> {
    if *value < Decimal::ZERO {
        Err(ApiError::ValidationError(format!(
            "{field} cannot be negative"
        )))
    } else {
        Ok(())
    }
}

/// List products matching the active filter criteria
///
/// A product is included iff the name contains `search` case-insensitively
/// (when given), the brand equals `brand` exactly (when given), and the
/// category equals `category` exactly (when given). Output preserves catalog
/// order.
#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(FilterCriteria),
    responses(
        (status = 200, description = "Products matching the criteria", body = ProductListResponse)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(criteria): Query<FilterCriteria>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let snapshot = state.catalog.snapshot().await;
    let products = filter_products(&snapshot, &criteria);

    Ok(success_response(ProductListResponse {
        total: products.len() as u64,
        products,
    }))
}

/// Distinct brands and categories of the full collection
///
/// Always derived from the full collection, independent of any active filter,
/// so selecting a brand never removes other brand options from the controls.
#[utoipa::path(
    get,
    path = "/api/v1/products/facets",
    responses(
        (status = 200, description = "Filter control values", body = FacetsResponse)
    ),
    tag = "Products"
)]
pub async fn list_facets(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let snapshot = state.catalog.snapshot().await;

    Ok(success_response(FacetsResponse {
        brands: distinct_brands(&snapshot),
        categories: distinct_categories(&snapshot),
    }))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/api/v1/products/:id",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product retrieved", body = Product),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let product = state
        .catalog
        .get(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Product with id {id} not found")))?;

    Ok(success_response(product))
}

/// Create a new product
///
/// The store assigns the id; the response carries it.
#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Products"
)]
pub async fn create_product(
    _user: AdminUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;
    let draft = payload.into_draft()?;

    let product = state
        .catalog
        .create(draft)
        .await
        .map_err(map_service_error)?;

    Ok(created_response(product))
}

/// Update a product
///
/// Full replacement of the addressed entry; its position in the collection is
/// preserved. The path id is authoritative and must match the body id when
/// one is supplied.
#[utoipa::path(
    put,
    path = "/api/v1/products/:id",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Products"
)]
pub async fn update_product(
    _user: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    if let Some(body_id) = payload.id {
        if body_id != id {
            return Err(ApiError::ValidationError(format!(
                "Body id {body_id} does not match path id {id}"
            )));
        }
    }

    let draft = payload.request.into_draft()?;
    let product = state
        .catalog
        .update(draft.into_product(id))
        .await
        .map_err(map_service_error)?;

    Ok(success_response(product))
}

/// Delete a product
///
/// Idempotent: deleting an id that is not present succeeds without error.
#[utoipa::path(
    delete,
    path = "/api/v1/products/:id",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 204, description = "Product deleted (or was already absent)"),
        (status = 401, description = "Unauthorized", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Products"
)]
pub async fn delete_product(
    _user: AdminUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .catalog
        .delete(id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

// Request/Response DTOs

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "name": "Red Shoe",
    "brand": "Acme",
    "category": "Footwear",
    "color": "Red",
    "price": 100,
    "image": "https://cdn.example.com/products/red-shoe.jpg"
}))]
pub struct CreateProductRequest {
    /// Product display name
    #[validate(length(min = 1))]
    #[schema(example = "Red Shoe")]
    pub name: String,
    /// Brand name (exact-match filter key)
    #[serde(default)]
    #[schema(example = "Acme")]
    pub brand: Option<String>,
    /// Category (exact-match filter key)
    #[serde(default)]
    #[schema(example = "Footwear")]
    pub category: Option<String>,
    /// Descriptive color, no filtering semantics
    #[serde(default)]
    #[schema(example = "Red")]
    pub color: Option<String>,
    /// Non-negative price
    #[serde(default)]
    #[schema(example = 100)]
    pub price: Option<Decimal>,
    /// Image URL or path reference
    #[serde(default)]
    #[schema(example = "https://cdn.example.com/products/red-shoe.jpg")]
    pub image: Option<String>,
}

impl CreateProductRequest {
    fn into_draft(self) -> Result<ProductDraft, ApiError> {
        let name = normalize_string(self.name);
        if name.is_empty() {
            return Err(ApiError::ValidationError(
                "Product name cannot be blank".to_string(),
            ));
        }

        let price = self.price.unwrap_or(Decimal::ZERO);
        ensure_decimal_non_negative(&price, "price")?;

        Ok(ProductDraft {
            name,
            brand: self.brand.map(normalize_string).unwrap_or_default(),
            category: self.category.map(normalize_string).unwrap_or_default(),
            color: self.color.map(normalize_string).unwrap_or_default(),
            price,
            image: self.image.map(normalize_string).unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProductRequest {
    /// Optional echo of the product id; must match the path id when present
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(flatten)]
    #[validate]
    pub request: CreateProductRequest,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub total: u64,
}

#[derive(Debug, Serialize, ToSchema)]
#[schema(example = json!({
    "brands": ["Acme", "Zenith"],
    "categories": ["Footwear", "Accessories"]
}))]
pub struct FacetsResponse {
    pub brands: Vec<String>,
    pub categories: Vec<String>,
}
