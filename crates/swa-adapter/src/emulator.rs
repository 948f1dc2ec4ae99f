//! Local stand-in for the platform object the server function receives.

use indexmap::IndexMap;
use serde::Serialize;
use swa_config::{
    ClientPrincipal, ClientPrincipalClaim, EmulateOptions, EmulateRole, SERVER_FUNC_DIR_NAME,
};
use uuid::Uuid;

const CLAIM_NAME: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name";
const CLAIM_EMAIL: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress";
const CLAIM_ROLE: &str = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role";

pub const DEV_USER_ID: &str = "devUser";
pub const DEV_USER_DETAILS: &str = "devUser@development.org";
pub const DEV_IDENTITY_PROVIDER: &str = "adapter-azure-swa";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    pub client_principal: Option<ClientPrincipal>,
    pub user: Option<RequestUser>,
    pub context: InvocationContext,
}

/// User attached to the request by the Functions runtime.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestUser {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub username: String,
    pub identity_provider: String,
    pub claims_principal_data: IndexMap<String, String>,
}

impl From<&ClientPrincipal> for RequestUser {
    fn from(principal: &ClientPrincipal) -> Self {
        let claims_principal_data = principal
            .claims
            .iter()
            .flatten()
            .map(|claim| (claim.typ.clone(), claim.val.clone()))
            .collect();

        Self {
            kind: "StaticWebApps".to_string(),
            id: principal.user_id.clone(),
            username: principal.user_details.clone(),
            identity_provider: principal.identity_provider.clone(),
            claims_principal_data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationContext {
    pub invocation_id: Uuid,
    pub function_name: String,
}

impl InvocationContext {
    pub fn new() -> Self {
        Self {
            invocation_id: Uuid::new_v4(),
            function_name: SERVER_FUNC_DIR_NAME.to_string(),
        }
    }
}

impl Default for InvocationContext {
    fn default() -> Self {
        Self::new()
    }
}

/// The principal used for `role: authenticated` emulation.
pub fn dev_client_principal() -> ClientPrincipal {
    let claim = |typ: &str, val: &str| ClientPrincipalClaim {
        typ: typ.to_string(),
        val: val.to_string(),
    };

    ClientPrincipal {
        identity_provider: DEV_IDENTITY_PROVIDER.to_string(),
        user_id: DEV_USER_ID.to_string(),
        user_details: DEV_USER_DETAILS.to_string(),
        user_roles: vec!["authenticated".to_string()],
        claims: Some(vec![
            claim(CLAIM_NAME, DEV_USER_ID),
            claim(CLAIM_EMAIL, DEV_USER_DETAILS),
            claim(CLAIM_ROLE, "authenticated"),
        ]),
    }
}

/// Build the emulated platform object.
///
/// An explicit `clientPrincipal` wins; otherwise `role: authenticated`
/// yields the development principal and anything else is anonymous.
pub fn emulate_platform(options: Option<&EmulateOptions>) -> Platform {
    let client_principal = options.and_then(|o| {
        o.client_principal
            .clone()
            .or_else(|| (o.role == Some(EmulateRole::Authenticated)).then(dev_client_principal))
    });

    Platform {
        user: client_principal.as_ref().map(RequestUser::from),
        client_principal,
        context: InvocationContext::new(),
    }
}
