//! Request payload codec
//!
//! Outbound variables of sealed operations travel as a single opaque token
//! under the `pl` wire key. The codec is symmetric: whatever `encode`
//! produces, `decode` turns back into the identical JSON value.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Wire key carrying a sealed payload
pub const SEALED_KEY: &str = "pl";

/// GraphQL variables map
pub type Variables = Map<String, Value>;

/// Codec errors
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Payload encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Payload decoding failed: {0}")]
    DecodingFailed(String),

    #[error("Plain variables must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("Payload is not serializable: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Opaque encode/decode of JSON payloads
pub trait PayloadCodec: Send + Sync {
    fn encode(&self, payload: &Value) -> Result<String, CodecError>;
    fn decode(&self, token: &str) -> Result<Value, CodecError>;
}

#[derive(Debug, Serialize, Deserialize)]
struct SealedClaims {
    #[serde(default)]
    pl: Value,
}

/// HS256 token codec keyed by a shared secret
pub struct JwtCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtCodec {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

impl PayloadCodec for JwtCodec {
    fn encode(&self, payload: &Value) -> Result<String, CodecError> {
        let claims = SealedClaims {
            pl: payload.clone(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| CodecError::EncodingFailed(e.to_string()))
    }

    fn decode(&self, token: &str) -> Result<Value, CodecError> {
        let data = decode::<SealedClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| CodecError::DecodingFailed(e.to_string()))?;
        Ok(data.claims.pl)
    }
}

/// Variables that are sealed into a single `pl` token
pub struct Sealed<T>(pub T);

/// Variables spread directly into the request
pub struct Plain<T>(pub T);

/// Conversion of a typed payload into request variables
pub trait IntoVariables {
    fn into_variables(self, codec: &dyn PayloadCodec) -> Result<Variables, CodecError>;
}

impl<T: Serialize> IntoVariables for Sealed<T> {
    fn into_variables(self, codec: &dyn PayloadCodec) -> Result<Variables, CodecError> {
        let payload = serde_json::to_value(&self.0)?;
        let mut variables = Variables::new();
        variables.insert(SEALED_KEY.to_string(), Value::String(codec.encode(&payload)?));
        Ok(variables)
    }
}

impl<T: Serialize> IntoVariables for Plain<T> {
    fn into_variables(self, _codec: &dyn PayloadCodec) -> Result<Variables, CodecError> {
        match serde_json::to_value(&self.0)? {
            Value::Object(map) => Ok(map),
            Value::Null => Ok(Variables::new()),
            Value::Array(_) => Err(CodecError::NotAnObject("array")),
            Value::String(_) => Err(CodecError::NotAnObject("string")),
            Value::Number(_) => Err(CodecError::NotAnObject("number")),
            Value::Bool(_) => Err(CodecError::NotAnObject("bool")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn codec() -> JwtCodec {
        JwtCodec::new("test-payload-secret")
    }

    #[test]
    fn test_round_trip_nested_object() {
        let codec = codec();
        let payload = json!({
            "id": "veh-1",
            "vendor": { "id": "ven-9", "organization": { "name": "Autohaus" } },
            "imageUrls": ["a.jpg", "b.jpg"],
            "price": 18500.5,
            "reserved": "No"
        });

        let token = codec.encode(&payload).unwrap();
        assert_eq!(codec.decode(&token).unwrap(), payload);
    }

    #[test]
    fn test_round_trip_empty_and_scalar_values() {
        let codec = codec();
        for payload in [json!({}), json!([]), json!(null), json!(0), json!("")] {
            let token = codec.encode(&payload).unwrap();
            assert_eq!(codec.decode(&token).unwrap(), payload);
        }
    }

    #[test]
    fn test_decode_with_wrong_secret_fails() {
        let token = codec().encode(&json!({ "id": "x" })).unwrap();
        let other = JwtCodec::new("another-secret");
        assert!(matches!(
            other.decode(&token),
            Err(CodecError::DecodingFailed(_))
        ));
    }

    #[test]
    fn test_sealed_variables_use_pl_key() {
        let codec = codec();
        let variables = Sealed(json!({ "id": "veh-1" }))
            .into_variables(&codec)
            .unwrap();

        assert_eq!(variables.len(), 1);
        let token = variables[SEALED_KEY].as_str().unwrap();
        assert_eq!(codec.decode(token).unwrap(), json!({ "id": "veh-1" }));
    }

    #[test]
    fn test_plain_variables_are_spread() {
        let variables = Plain(json!({ "id": "b-1", "clicks": 4 }))
            .into_variables(&codec())
            .unwrap();
        assert_eq!(variables["id"], json!("b-1"));
        assert_eq!(variables["clicks"], json!(4));

        assert!(Plain(json!([1, 2])).into_variables(&codec()).is_err());
        assert!(Plain(json!(null)).into_variables(&codec()).unwrap().is_empty());
    }
}
