use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stash API",
        version = "0.1.0",
        description = "Register, log in, and keep personal JSON items."
    ),
    paths(
        crate::routes::register,
        crate::routes::login,
        crate::routes::add_item,
        crate::routes::list_items,
        crate::routes::health,
    ),
    components(schemas(
        crate::dto::CredentialsRequest,
        crate::dto::ItemListResponse,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "accounts", description = "Registration and login"),
        (name = "items", description = "Per-user item storage"),
        (name = "system", description = "Health and system status"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Adds the access token security scheme to the OpenAPI spec.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Token from the `Authentication` header of POST /login. \
                             Sent in `Authorization`, with or without the `Bearer` prefix.",
                        ))
                        .build(),
                ),
            );
        }
    }
}
