//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `http://localhost:8000/docs`
//! - OpenAPI JSON: `http://localhost:8000/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::gateway::types::{ErrorDetail, HealthResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Trade History Gateway API",
        version = "1.0.0",
        description = "Cached proxy for MetaStats account trade history.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8000", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::history::trading_history,
        crate::gateway::handlers::health::health_check,
    ),
    components(
        schemas(
            ErrorDetail,
            HealthResponse,
        )
    ),
    tags(
        (name = "History", description = "Account trade history"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;
