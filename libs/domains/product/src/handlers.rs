//! HTTP handlers for the Products API
//!
//! Marshaling only: every operation answers 200 with the service's value,
//! degraded responses included. Clients inspect payload fields to detect
//! fallbacks; see [`crate::service`].

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{Condition, ConditionPatch, CreateProduct, Product, Response, UpdateProduct};
use crate::publisher::ProductPublisher;
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(Product, Condition, ConditionPatch, CreateProduct, UpdateProduct, Response)
    ),
    tags(
        (name = "Products", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R, P>(service: ProductService<R, P>) -> Router
where
    R: ProductRepository + 'static,
    P: ProductPublisher + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{product_name}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "All stored products, or a single sentinel entry in degraded mode", body = Vec<Product>)
    )
)]
async fn list_products<R, P>(
    State(service): State<Arc<ProductService<R, P>>>,
) -> Json<Vec<Product>>
where
    R: ProductRepository + 'static,
    P: ProductPublisher + 'static,
{
    Json(service.find_all_products().await)
}

/// Get a product by name
#[utoipa::path(
    get,
    path = "/{product_name}",
    tag = "Products",
    params(
        ("product_name" = String, Path, description = "Business name of the product")
    ),
    responses(
        (status = 200, description = "The stored product, or a synthetic one carrying the error message in product_type", body = Product)
    )
)]
async fn get_product<R, P>(
    State(service): State<Arc<ProductService<R, P>>>,
    Path(product_name): Path<String>,
) -> Json<Product>
where
    R: ProductRepository + 'static,
    P: ProductPublisher + 'static,
{
    Json(service.find_by_product_name(&product_name).await)
}

/// Create a product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 200, description = "The created product, or a synthetic one on failure", body = Product)
    )
)]
async fn create_product<R, P>(
    State(service): State<Arc<ProductService<R, P>>>,
    Json(input): Json<CreateProduct>,
) -> Json<Product>
where
    R: ProductRepository + 'static,
    P: ProductPublisher + 'static,
{
    Json(service.create_product(input).await)
}

/// Update a product's conditions
#[utoipa::path(
    put,
    path = "/{product_name}",
    tag = "Products",
    params(
        ("product_name" = String, Path, description = "Business name of the product to update")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "The updated product, or a synthetic one on failure", body = Product)
    )
)]
async fn update_product<R, P>(
    State(service): State<Arc<ProductService<R, P>>>,
    Path(product_name): Path<String>,
    Json(input): Json<UpdateProduct>,
) -> Json<Product>
where
    R: ProductRepository + 'static,
    P: ProductPublisher + 'static,
{
    Json(service.update_product(input, &product_name).await)
}

/// Delete a product by name
#[utoipa::path(
    delete,
    path = "/{product_name}",
    tag = "Products",
    params(
        ("product_name" = String, Path, description = "Business name of the product to delete")
    ),
    responses(
        (status = 200, description = "Confirmation envelope, or the name plus error message on failure", body = Response)
    )
)]
async fn delete_product<R, P>(
    State(service): State<Arc<ProductService<R, P>>>,
    Path(product_name): Path<String>,
) -> Json<Response>
where
    R: ProductRepository + 'static,
    P: ProductPublisher + 'static,
{
    Json(service.delete_product(&product_name).await)
}
