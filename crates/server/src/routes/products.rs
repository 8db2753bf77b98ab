//! Catalog route handlers.

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use clementine_core::ProductId;

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::models::product::{
    CatalogFilter, CategorySummary, NewProduct, Product, ProductPage, SortKey,
};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Maximum images accepted per product upload.
const MAX_IMAGES: usize = 3;

/// Catalog listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub sort: Option<String>,
    pub category: Option<String>,
}

impl ListParams {
    /// Convert to the repository filter. "all" (the frontend's
    /// everything-selector) means no category restriction.
    fn into_filter(self) -> CatalogFilter {
        let category = self
            .category
            .filter(|c| !c.is_empty() && c != "all");

        CatalogFilter {
            page: self.page.unwrap_or(1).max(1),
            sort: SortKey::from_query(self.sort.as_deref()),
            category,
        }
    }
}

/// Paged product listing.
///
/// An empty page answers 404 so clients can tell "nothing matches" from a
/// succeeding page; this mirrors the store's public API contract.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ApiResponse<ProductPage>>> {
    let repo = ProductRepository::new(state.pool());
    let page = repo.list(&params.into_filter()).await?;

    if page.items.is_empty() {
        return Err(AppError::NotFound(
            "No products found for this criteria".to_owned(),
        ));
    }

    Ok(ApiResponse::ok_with_message(
        page,
        "Products fetched successfully",
    ))
}

/// Category names, each with a representative image.
#[instrument(skip(state))]
pub async fn categories(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CategorySummary>>>> {
    let repo = ProductRepository::new(state.pool());
    let categories = repo.categories().await?;

    Ok(ApiResponse::ok(categories))
}

/// Single product detail.
#[instrument(skip(state))]
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ApiResponse<Product>>> {
    let repo = ProductRepository::new(state.pool());
    let product = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id} not found")))?;

    Ok(ApiResponse::ok_with_message(product, "Product detail fetched"))
}

/// Fields collected from the multipart upload form.
#[derive(Debug, Default)]
struct UploadForm {
    name: Option<String>,
    price: Option<String>,
    quantity: Option<String>,
    category: Option<String>,
    images: Vec<(String, Vec<u8>)>,
}

/// Create a product (admin only).
///
/// Accepts a multipart form with `name`, `price`, `quantity`, `category`
/// text fields and up to three `images` files. Images are uploaded to the
/// blob collaborator first; any upload failure aborts the request and
/// nothing is persisted.
#[instrument(skip(state, admin, multipart), fields(admin_id = %admin.id))]
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<Product>>> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart payload: {e}")))?
    {
        let Some(field_name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };

        match field_name.as_str() {
            "name" => form.name = Some(read_text(field).await?),
            "price" => form.price = Some(read_text(field).await?),
            "quantity" => form.quantity = Some(read_text(field).await?),
            "category" => form.category = Some(read_text(field).await?),
            "images" => {
                if form.images.len() >= MAX_IMAGES {
                    return Err(AppError::Validation(format!(
                        "at most {MAX_IMAGES} images are allowed"
                    )));
                }
                let filename = field
                    .file_name()
                    .map(ToOwned::to_owned)
                    .ok_or_else(|| AppError::Validation("image is missing a filename".to_owned()))?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("failed to read image: {e}")))?;
                form.images.push((filename, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let new = validate_upload_form(form)?;

    // Upload all images before touching the catalog; a failed upload must
    // not leave a partially-created product.
    let mut image_urls = Vec::with_capacity(new.files.len());
    for (filename, bytes) in new.files {
        let url = state.uploader().put(&filename, bytes).await?;
        image_urls.push(url);
    }

    let repo = ProductRepository::new(state.pool());
    let product = repo
        .create(
            &NewProduct {
                name: new.name,
                price: new.price,
                quantity: new.quantity,
                category: new.category,
                images: image_urls,
            },
            admin.id,
        )
        .await?;

    tracing::info!(product_id = %product.id, "product created");
    Ok(ApiResponse::ok_with_message(product, "Product added"))
}

/// Validated upload form, files still pending upload.
#[derive(Debug)]
struct ValidatedUpload {
    name: String,
    price: Decimal,
    quantity: i32,
    category: String,
    files: Vec<(String, Vec<u8>)>,
}

fn validate_upload_form(form: UploadForm) -> Result<ValidatedUpload> {
    let name = non_empty(form.name, "name")?;
    let category = non_empty(form.category, "category")?;

    let price: Decimal = non_empty(form.price, "price")?
        .parse()
        .map_err(|_| AppError::Validation("price must be a number".to_owned()))?;
    if price < Decimal::ZERO {
        return Err(AppError::Validation(
            "price must be non-negative".to_owned(),
        ));
    }

    let quantity: i32 = non_empty(form.quantity, "quantity")?
        .parse()
        .map_err(|_| AppError::Validation("quantity must be an integer".to_owned()))?;
    if quantity < 0 {
        return Err(AppError::Validation(
            "quantity must be non-negative".to_owned(),
        ));
    }

    if form.images.is_empty() {
        return Err(AppError::Validation(
            "at least one image is required".to_owned(),
        ));
    }

    Ok(ValidatedUpload {
        name,
        price,
        quantity,
        category,
        files: form.images,
    })
}

fn non_empty(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!("{field} is required"))),
    }
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("invalid form field: {e}")))
}
