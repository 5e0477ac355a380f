use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::middlewares::v1::auth::ADMIN_KEY_HEADER;
use crate::{controllers, entities, errors, requests, responses};

pub struct Authentication;

impl Modify for Authentication {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);

        components.add_security_scheme(
            "basic",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
        );
        components.add_security_scheme(
            "admin_key",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(ADMIN_KEY_HEADER))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "simple-banking"),
    tags(
        (name = "User"),
        (name = "Account"),
        (name = "Transfer"),
        (name = "Health"),
    ),
    modifiers(&Authentication),
    paths(
        controllers::v1::user::store,
        controllers::v1::user::list,
        controllers::v1::user::me,

        controllers::v1::account::show,
        controllers::v1::account::deposit,
        controllers::v1::account::withdraw,

        controllers::v1::transfer::transfer,

        controllers::health::health,
        controllers::health::health_db,
    ),
    components(schemas(
        requests::v1::user::UserStoreRequest,
        requests::v1::account::AmountRequest,
        requests::v1::transfer::TransferRequest,

        responses::v1::user::User,
        responses::v1::user::UserSummary,
        responses::v1::account::Account,
        responses::v1::account::AccountSummary,

        entities::v1::sea_orm_active_enums::Currency,
        entities::v1::sea_orm_active_enums::Role,

        errors::ErrorResponse,

        controllers::health::LivenessResponse,
        controllers::health::HealthResponse,
    )),
)]
pub struct Definition;
