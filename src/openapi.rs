use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = r#"
# Catalog browsing and administration API

A public product list with search/filter, plus token-gated admin endpoints for
create/update/delete, backed by a flat JSON catalog document.

## Authentication

Mutation endpoints require the shared admin token in the Authorization header:

```
Authorization: Bearer <admin-token>
```

Read endpoints are public.
"#
    ),
    paths(
        crate::handlers::products::list_products,
        crate::handlers::products::list_facets,
        crate::handlers::products::get_product,
        crate::handlers::products::create_product,
        crate::handlers::products::update_product,
        crate::handlers::products::delete_product,
    ),
    components(schemas(
        crate::models::Product,
        crate::handlers::products::CreateProductRequest,
        crate::handlers::products::UpdateProductRequest,
        crate::handlers::products::ProductListResponse,
        crate::handlers::products::FacetsResponse,
        crate::errors::ErrorResponse,
    )),
    tags(
        (name = "Products", description = "Catalog browsing and administration")
    )
)]
pub struct ApiDoc;

/// Swagger UI router, mounted at /docs with the OpenAPI document at
/// /api-docs/openapi.json
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
