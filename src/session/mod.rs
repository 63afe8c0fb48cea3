//! Session and identity
//!
//! Login exchanges vendor credentials for an identity token. The token's
//! `vendor` claim is the authoritative identity after login and is cached
//! under `uD`; the token itself is kept under `aT` and attached to every
//! gateway request.

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use validator::Validate;

use crate::codec::{IntoVariables, PayloadCodec, Sealed, SEALED_KEY};
use crate::error::ClientError;
use crate::gateway::{take_result, Gateway, GatewayRequest, Operation, Shape};
use crate::models::VendorRef;
use crate::storage::{keys, LocalStore};
use crate::store::Store;

const LOGIN: Operation = Operation::sealed_mutation("loginVendor", Shape::Entity);

/// Vendor login form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Credentials {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, max = 128))]
    pub password: String,
}

/// Claims carried by an identity token
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityClaims {
    pub vendor: VendorRef,
    pub user: Option<String>,
    pub exp: Option<i64>,
}

/// The signed-in vendor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub vendor: VendorRef,
    pub user: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Identity {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|exp| exp <= now).unwrap_or(false)
    }
}

impl From<IdentityClaims> for Identity {
    fn from(claims: IdentityClaims) -> Self {
        Self {
            vendor: claims.vendor,
            user: claims.user,
            expires_at: claims
                .exp
                .and_then(|exp| Utc.timestamp_opt(exp, 0).single()),
        }
    }
}

/// Decode an identity token without verifying its signature.
///
/// The identity may sit at the top level of the claims or inside a sealed
/// payload claim.
pub fn decode_identity(token: &str) -> Result<Identity, ClientError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<Value>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|e| ClientError::Session(format!("Unreadable identity token: {}", e)))?;

    let claims = match data.claims {
        Value::Object(mut map) if !map.contains_key("vendor") && map.contains_key(SEALED_KEY) => {
            map.remove(SEALED_KEY).unwrap_or(Value::Null)
        }
        other => other,
    };

    let claims: IdentityClaims = serde_json::from_value(claims)?;
    if claims.vendor.id.is_empty() {
        return Err(ClientError::Session(
            "Identity token carries no vendor".to_string(),
        ));
    }
    Ok(claims.into())
}

#[derive(Debug, Deserialize)]
struct LoginResult {
    token: String,
}

pub struct Session {
    gateway: Arc<dyn Gateway>,
    codec: Arc<dyn PayloadCodec>,
    storage: Arc<dyn LocalStore>,
    store: Arc<Store>,
}

impl Session {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        codec: Arc<dyn PayloadCodec>,
        storage: Arc<dyn LocalStore>,
        store: Arc<Store>,
    ) -> Self {
        Self {
            gateway,
            codec,
            storage,
            store,
        }
    }

    /// Log in and persist the token and identity
    pub async fn login(&self, credentials: &Credentials) -> Result<Identity, ClientError> {
        credentials.validate()?;

        let request = GatewayRequest {
            operation_name: LOGIN.name,
            kind: LOGIN.kind,
            document: LOGIN.document("token"),
            variables: Sealed(credentials).into_variables(self.codec.as_ref())?,
        };

        tracing::info!(operation = LOGIN.name, "Logging in");
        let result = take_result(self.gateway.execute(request).await?, LOGIN.name)?;
        let LoginResult { token } = serde_json::from_value(result)?;
        let identity = decode_identity(&token)?;

        self.storage.set(keys::AUTH_TOKEN, Value::String(token.clone()))?;
        self.storage
            .set(keys::USER_DATA, serde_json::to_value(&identity)?)?;
        self.gateway.set_auth_token(Some(token));

        tracing::info!(vendor_id = %identity.vendor.id, "Logged in");
        Ok(identity)
    }

    /// Re-attach a persisted token to the gateway.
    ///
    /// Returns `None` when no token is stored or the stored one has expired.
    pub fn restore(&self) -> Result<Option<Identity>, ClientError> {
        let token = match self.storage.get(keys::AUTH_TOKEN)? {
            Some(Value::String(token)) => token,
            _ => return Ok(None),
        };

        let identity = decode_identity(&token)?;
        if identity.is_expired(Utc::now()) {
            tracing::info!(vendor_id = %identity.vendor.id, "Stored session expired");
            self.clear_credentials()?;
            return Ok(None);
        }

        self.gateway.set_auth_token(Some(token));
        Ok(Some(identity))
    }

    /// Forget the session and every cached slice
    pub async fn logout(&self) -> Result<(), ClientError> {
        self.clear_credentials()?;
        self.storage.remove(keys::LAST_ERROR)?;
        self.store.clear().await;
        tracing::info!("Logged out");
        Ok(())
    }

    pub fn current_identity(&self) -> Result<Option<Identity>, ClientError> {
        match self.storage.get(keys::USER_DATA)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Record that the next start follows a deliberate reload
    pub fn mark_reload(&self) -> Result<(), ClientError> {
        self.storage
            .set(keys::IDLE_MARKER, json!(Utc::now().to_rfc3339()))?;
        Ok(())
    }

    /// Consume the reload marker, returning when it was set
    pub fn take_reload_marker(&self) -> Result<Option<DateTime<Utc>>, ClientError> {
        let marker = self.storage.get(keys::IDLE_MARKER)?;
        self.storage.remove(keys::IDLE_MARKER)?;

        Ok(marker
            .as_ref()
            .and_then(Value::as_str)
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|at| at.with_timezone(&Utc)))
    }

    pub fn record_error(&self, message: &str) -> Result<(), ClientError> {
        self.storage.set(keys::LAST_ERROR, json!(message))?;
        Ok(())
    }

    pub fn last_error(&self) -> Result<Option<String>, ClientError> {
        Ok(self
            .storage
            .get(keys::LAST_ERROR)?
            .and_then(|value| value.as_str().map(str::to_string)))
    }

    fn clear_credentials(&self) -> Result<(), ClientError> {
        self.storage.remove(keys::AUTH_TOKEN)?;
        self.storage.remove(keys::USER_DATA)?;
        self.gateway.set_auth_token(None);
        Ok(())
    }
}
