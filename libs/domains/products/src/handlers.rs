use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, OptionalJson, UuidPath, UuidPathPair,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    Product, ProductFilter, ProductInput, ProductList, ProductOption, ProductOptionInput,
    ProductOptionList,
};
use crate::repository::{ProductOptionRepository, ProductRepository};
use crate::service::ProductService;

const TAG: &str = "Products";

/// OpenAPI documentation for the products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        list_options,
        create_option,
        get_option,
        update_option,
        delete_option,
    ),
    components(
        schemas(
            Product,
            ProductInput,
            ProductList,
            ProductFilter,
            ProductOption,
            ProductOptionInput,
            ProductOptionList
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Products and their options")
    )
)]
pub struct ApiDoc;

type SharedService<P, O> = Arc<ProductService<P, O>>;

/// Create the products router
pub fn router<P, O>(service: ProductService<P, O>) -> Router
where
    P: ProductRepository + 'static,
    O: ProductOptionRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/{id}/options", get(list_options).post(create_option))
        .route(
            "/{id}/options/{option_id}",
            get(get_option).put(update_option).delete(delete_option),
        )
        .with_state(shared_service)
}

/// Record the outcome of a mutating request on the audit log
fn audit<T>(headers: &HeaderMap, action: &str, resource: String, result: &ProductResult<T>) {
    let (outcome, details) = match result {
        Ok(_) => (AuditOutcome::Success, None),
        Err(e) => (AuditOutcome::Failure, Some(json!({ "reason": e.to_string() }))),
    };

    let event = AuditEvent::new(action, Some(resource), outcome).with_request_headers(headers);
    match details {
        Some(details) => event.with_details(details),
        None => event,
    }
    .log();
}

/// List products, optionally filtered by exact name
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ProductFilter),
    responses(
        (status = 200, description = "Products, possibly none", body = ProductList),
    )
)]
async fn list_products<P: ProductRepository, O: ProductOptionRepository>(
    State(service): State<SharedService<P, O>>,
    Query(filter): Query<ProductFilter>,
) -> ProductResult<Json<ProductList>> {
    let items = service.list_products(filter).await?;
    Ok(Json(ProductList { items }))
}

/// Create a product
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 300, response = ConflictResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<P: ProductRepository, O: ProductOptionRepository>(
    State(service): State<SharedService<P, O>>,
    headers: HeaderMap,
    OptionalJson(body): OptionalJson<ProductInput>,
) -> ProductResult<impl IntoResponse> {
    let input = body.ok_or(ProductError::MissingBody)?;
    let resource = input
        .id
        .map_or_else(|| "product:new".to_string(), |id| format!("product:{}", id));

    let result = service.create_product(input).await;
    audit(&headers, "product.create", resource, &result);

    Ok((StatusCode::CREATED, Json(result?)))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_product<P: ProductRepository, O: ProductOptionRepository>(
    State(service): State<SharedService<P, O>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<Product>> {
    Ok(Json(service.get_product(id).await?))
}

/// Replace a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<P: ProductRepository, O: ProductOptionRepository>(
    State(service): State<SharedService<P, O>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    OptionalJson(body): OptionalJson<ProductInput>,
) -> ProductResult<Json<Product>> {
    let input = body.ok_or(ProductError::MissingBody)?;

    let result = service.update_product(id, input).await;
    let resource = format!("product:{}", id);
    audit(&headers, "product.update", resource, &result);

    Ok(Json(result?))
}

/// Delete a product and all of its options
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<P: ProductRepository, O: ProductOptionRepository>(
    State(service): State<SharedService<P, O>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
) -> ProductResult<StatusCode> {
    let result = service.delete_product(id).await;
    let resource = format!("product:{}", id);
    audit(&headers, "product.delete", resource, &result);

    result.map(|()| StatusCode::NO_CONTENT)
}

/// List the options of a product
#[utoipa::path(
    get,
    path = "/{id}/options",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product id")),
    responses(
        (status = 200, description = "Options of the product, possibly none", body = ProductOptionList),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn list_options<P: ProductRepository, O: ProductOptionRepository>(
    State(service): State<SharedService<P, O>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<ProductOptionList>> {
    let items = service.list_options(id).await?;
    Ok(Json(ProductOptionList { items }))
}

/// Create an option for a product
#[utoipa::path(
    post,
    path = "/{id}/options",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Product id")),
    request_body = ProductOptionInput,
    responses(
        (status = 201, description = "Option created", body = ProductOption),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_option<P: ProductRepository, O: ProductOptionRepository>(
    State(service): State<SharedService<P, O>>,
    headers: HeaderMap,
    UuidPath(id): UuidPath,
    OptionalJson(body): OptionalJson<ProductOptionInput>,
) -> ProductResult<impl IntoResponse> {
    let input = body.ok_or(ProductError::MissingBody)?;

    let result = service.create_option(id, input).await;
    let resource = format!("product:{}", id);
    audit(&headers, "product_option.create", resource, &result);

    Ok((StatusCode::CREATED, Json(result?)))
}

/// Get one option of a product
#[utoipa::path(
    get,
    path = "/{id}/options/{option_id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product id"),
        ("option_id" = Uuid, Path, description = "Option id")
    ),
    responses(
        (status = 200, description = "Option found", body = ProductOption),
        (status = 404, response = NotFoundResponse)
    )
)]
async fn get_option<P: ProductRepository, O: ProductOptionRepository>(
    State(service): State<SharedService<P, O>>,
    UuidPathPair(id, option_id): UuidPathPair,
) -> ProductResult<Json<ProductOption>> {
    Ok(Json(service.get_option(id, option_id).await?))
}

/// Replace an option of a product
#[utoipa::path(
    put,
    path = "/{id}/options/{option_id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product id"),
        ("option_id" = Uuid, Path, description = "Option id")
    ),
    request_body = ProductOptionInput,
    responses(
        (status = 200, description = "Option updated", body = ProductOption),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_option<P: ProductRepository, O: ProductOptionRepository>(
    State(service): State<SharedService<P, O>>,
    headers: HeaderMap,
    UuidPathPair(id, option_id): UuidPathPair,
    OptionalJson(body): OptionalJson<ProductOptionInput>,
) -> ProductResult<Json<ProductOption>> {
    let input = body.ok_or(ProductError::MissingBody)?;

    let result = service.update_option(id, option_id, input).await;
    let resource = format!("product_option:{}", option_id);
    audit(&headers, "product_option.update", resource, &result);

    Ok(Json(result?))
}

/// Delete an option of a product
#[utoipa::path(
    delete,
    path = "/{id}/options/{option_id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Product id"),
        ("option_id" = Uuid, Path, description = "Option id")
    ),
    responses(
        (status = 204, description = "Option deleted"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_option<P: ProductRepository, O: ProductOptionRepository>(
    State(service): State<SharedService<P, O>>,
    headers: HeaderMap,
    UuidPathPair(id, option_id): UuidPathPair,
) -> ProductResult<StatusCode> {
    let result = service.delete_option(id, option_id).await;
    let resource = format!("product_option:{}", option_id);
    audit(&headers, "product_option.delete", resource, &result);

    result.map(|()| StatusCode::NO_CONTENT)
}
