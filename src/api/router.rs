//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::dto::{ApiResponse, ListParams, PaginatedResponse};
use crate::api::handlers::{
    auth, customers, finance, health, parts, quotes, service_orders, vehicles, AppState,
};
use crate::auth::jwt::JwtConfig;
use crate::auth::middleware::{admin_middleware, auth_middleware, AuthState};
use crate::domain::RepositoryProvider;

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::get_current_user,
        auth::change_password,
        // Customers
        customers::list_customers,
        customers::get_customer,
        customers::create_customer,
        customers::update_customer,
        customers::delete_customer,
        customers::list_customer_vehicles,
        customers::list_customer_quotes,
        customers::list_customer_orders,
        // Vehicles
        vehicles::list_vehicles,
        vehicles::get_vehicle,
        vehicles::create_vehicle,
        vehicles::update_vehicle,
        vehicles::delete_vehicle,
        // Quotes
        quotes::list_quotes,
        quotes::get_quote,
        quotes::create_quote,
        quotes::update_quote,
        quotes::delete_quote,
        quotes::preview_totals,
        quotes::approve_quote,
        quotes::reject_quote,
        quotes::convert_quote,
        // Service orders
        service_orders::list_service_orders,
        service_orders::get_service_order,
        service_orders::create_service_order,
        service_orders::update_service_order,
        service_orders::update_order_status,
        service_orders::delete_service_order,
        // Parts
        parts::list_parts,
        parts::get_part,
        parts::create_part,
        parts::update_part,
        parts::delete_part,
        parts::adjust_stock,
        parts::list_low_stock,
        // Finance
        finance::list_entries,
        finance::get_entry,
        finance::create_entry,
        finance::update_entry,
        finance::delete_entry,
        finance::settle_entry,
        finance::finance_summary,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            ListParams,
            PaginatedResponse<customers::CustomerResponse>,
            PaginatedResponse<vehicles::VehicleResponse>,
            PaginatedResponse<quotes::QuoteResponse>,
            PaginatedResponse<service_orders::ServiceOrderResponse>,
            PaginatedResponse<parts::PartResponse>,
            PaginatedResponse<finance::AccountEntryResponse>,
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            auth::ChangePasswordRequest,
            // Customers
            customers::CustomerResponse,
            customers::CreateCustomerRequest,
            customers::UpdateCustomerRequest,
            // Vehicles
            vehicles::VehicleResponse,
            vehicles::CreateVehicleRequest,
            vehicles::UpdateVehicleRequest,
            // Quotes
            quotes::QuoteResponse,
            quotes::QuoteItemResponse,
            quotes::QuoteItemRequest,
            quotes::CreateQuoteRequest,
            quotes::UpdateQuoteRequest,
            quotes::PreviewTotalsRequest,
            quotes::TotalsResponse,
            // Service orders
            service_orders::ServiceOrderResponse,
            service_orders::CreateServiceOrderRequest,
            service_orders::UpdateServiceOrderRequest,
            service_orders::UpdateOrderStatusRequest,
            // Parts
            parts::PartResponse,
            parts::CreatePartRequest,
            parts::UpdatePartRequest,
            parts::AdjustStockRequest,
            // Finance
            finance::AccountEntryResponse,
            finance::CreateEntryRequest,
            finance::UpdateEntryRequest,
            finance::FinanceSummaryResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health check. No authentication required."),
        (name = "Authentication", description = "User authentication: login (JWT) and password management. Pass the token in the `Authorization: Bearer <token>` header."),
        (name = "Customers", description = "Customer registry. List endpoints support `search`, `page` and `limit` query parameters."),
        (name = "Vehicles", description = "Motorcycle registry. Every vehicle belongs to a customer."),
        (name = "Quotes", description = "Price estimates with labor and part lines. Totals are always computed server-side. Lifecycle: `Pending` → `Approved`/`Rejected`, `Approved` → `Converted` (into a service order)."),
        (name = "Service Orders", description = "Jobs the workshop has agreed to carry out. Workflow: `Open` → `InProgress` → `Completed` → `Delivered`, with cancelation allowed before completion."),
        (name = "Parts", description = "Spare part inventory with stock movements and low-stock reporting. A part is low on stock when its quantity is at or below its reorder threshold."),
        (name = "Finance", description = "Accounts receivable and payable. Admin role required. Entries are settled with an explicit endpoint; the summary aggregates open amounts, overdue counts and the net balance."),
    ),
    info(
        title = "Moto Workshop Service API",
        version = "0.1.0",
        description = "REST API for running a motorcycle repair shop: customers, vehicles, \
quotes, service orders, parts inventory and accounts receivable/payable.

## Authentication

Obtain a JWT via `POST /api/v1/auth/login` and pass it in the
`Authorization: Bearer <token>` header. Only `/health` and the login
endpoint are public.

## Response format

Every response is wrapped in a standard envelope:
```json
{\"success\": true, \"data\": {...}, \"error\": null}
```

On failure:
```json
{\"success\": false, \"data\": null, \"error\": \"description\"}
```

## Pagination

List endpoints accept `page` (1-based), `limit` (1-100, default 10) and
`search`. Responses carry navigation metadata including the 1-based
display range for \"showing X-Y of Z\" captions.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig) -> Router {
    let middleware_state = AuthState {
        jwt_config: jwt_config.clone(),
    };

    let app_state = AppState {
        repos: Arc::clone(&repos),
    };

    let auth_state = auth::AuthHandlerState { repos, jwt_config };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .with_state(auth_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::get_current_user))
        .route("/change-password", put(auth::change_password))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_state);

    let customer_routes = Router::new()
        .route("/", get(customers::list_customers).post(customers::create_customer))
        .route(
            "/{id}",
            get(customers::get_customer)
                .put(customers::update_customer)
                .delete(customers::delete_customer),
        )
        .route("/{id}/vehicles", get(customers::list_customer_vehicles))
        .route("/{id}/quotes", get(customers::list_customer_quotes))
        .route("/{id}/service-orders", get(customers::list_customer_orders))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(app_state.clone());

    let vehicle_routes = Router::new()
        .route("/", get(vehicles::list_vehicles).post(vehicles::create_vehicle))
        .route(
            "/{id}",
            get(vehicles::get_vehicle)
                .put(vehicles::update_vehicle)
                .delete(vehicles::delete_vehicle),
        )
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(app_state.clone());

    let quote_routes = Router::new()
        .route("/", get(quotes::list_quotes).post(quotes::create_quote))
        .route("/preview-totals", post(quotes::preview_totals))
        .route(
            "/{id}",
            get(quotes::get_quote)
                .put(quotes::update_quote)
                .delete(quotes::delete_quote),
        )
        .route("/{id}/approve", post(quotes::approve_quote))
        .route("/{id}/reject", post(quotes::reject_quote))
        .route("/{id}/convert", post(quotes::convert_quote))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(app_state.clone());

    let service_order_routes = Router::new()
        .route(
            "/",
            get(service_orders::list_service_orders).post(service_orders::create_service_order),
        )
        .route(
            "/{id}",
            get(service_orders::get_service_order)
                .put(service_orders::update_service_order)
                .delete(service_orders::delete_service_order),
        )
        .route("/{id}/status", put(service_orders::update_order_status))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(app_state.clone());

    let part_routes = Router::new()
        .route("/", get(parts::list_parts).post(parts::create_part))
        .route("/low-stock", get(parts::list_low_stock))
        .route(
            "/{id}",
            get(parts::get_part).put(parts::update_part).delete(parts::delete_part),
        )
        .route("/{id}/adjust-stock", post(parts::adjust_stock))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(app_state.clone());

    let finance_routes = Router::new()
        .route("/entries", get(finance::list_entries).post(finance::create_entry))
        .route(
            "/entries/{id}",
            get(finance::get_entry)
                .put(finance::update_entry)
                .delete(finance::delete_entry),
        )
        .route("/entries/{id}/settle", post(finance::settle_entry))
        .route("/summary", get(finance::finance_summary))
        // admin_middleware needs the extension auth_middleware inserts,
        // so the auth layer must be the outer one
        .layer(middleware::from_fn(admin_middleware))
        .layer(middleware::from_fn_with_state(middleware_state, auth_middleware))
        .with_state(app_state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/health", get(health::health_check))
        // Auth
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/auth", auth_protected_routes)
        // Resources
        .nest("/api/v1/customers", customer_routes)
        .nest("/api/v1/vehicles", vehicle_routes)
        .nest("/api/v1/quotes", quote_routes)
        .nest("/api/v1/service-orders", service_order_routes)
        .nest("/api/v1/parts", part_routes)
        .nest("/api/v1/finance", finance_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
