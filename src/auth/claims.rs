// ============================================================================
// CLAIMS - Decodificación del payload del access token (JWT)
// ============================================================================
// Solo leemos los claims; la firma la verifica el backend en cada request.
// ============================================================================

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use thiserror::Error;

use crate::models::auth::{Role, TokenClaims};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClaimsError {
    #[error("el token no tiene formato JWT")]
    NotAJwt,

    #[error("el payload del token no es base64url válido")]
    InvalidBase64,

    #[error("el payload del token no es JSON válido")]
    InvalidJson,

    #[error("claim de rol desconocido: {0}")]
    UnknownRole(String),
}

/// Decodificar el payload (segundo segmento) del JWT
pub fn decode_claims(token: &str) -> Result<TokenClaims, ClaimsError> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_)) if !payload.is_empty() => payload,
        _ => return Err(ClaimsError::NotAJwt),
    };
    // Un JWS tiene exactamente tres segmentos
    if segments.next().is_some() {
        return Err(ClaimsError::NotAJwt);
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| ClaimsError::InvalidBase64)?;

    serde_json::from_slice(&bytes).map_err(|_| ClaimsError::InvalidJson)
}

/// Extraer el rol del access token
pub fn role_from_token(token: &str) -> Result<Role, ClaimsError> {
    let claims = decode_claims(token)?;
    Role::from_claim(&claims.role).ok_or_else(|| ClaimsError::UnknownRole(claims.role))
}

/// Construir un token de prueba con el rol indicado (solo tests)
#[cfg(test)]
pub(crate) fn token_with_role(role: &str) -> String {
    let payload = format!(r#"{{"role":"{}","sub":"user-1"}}"#, role);
    format!(
        "eyJhbGciOiJIUzI1NiJ9.{}.firma-no-verificada",
        URL_SAFE_NO_PAD.encode(payload)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_role_and_sub() {
        let token = token_with_role("distributor");
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.role, "distributor");
        assert_eq!(claims.sub.as_deref(), Some("user-1"));
    }

    #[test]
    fn test_role_from_token_maps_both_roles() {
        assert_eq!(role_from_token(&token_with_role("admin")).unwrap(), Role::Admin);
        assert_eq!(
            role_from_token(&token_with_role("distributor")).unwrap(),
            Role::Distributor
        );
    }

    #[test]
    fn test_role_claim_is_case_insensitive() {
        assert_eq!(role_from_token(&token_with_role("ADMIN")).unwrap(), Role::Admin);
    }

    #[test]
    fn test_rejects_token_without_three_segments() {
        assert_eq!(decode_claims("no-es-un-jwt").unwrap_err(), ClaimsError::NotAJwt);
        assert_eq!(decode_claims("solo.dos").unwrap_err(), ClaimsError::NotAJwt);
        assert_eq!(
            decode_claims("a.b.c.d").unwrap_err(),
            ClaimsError::NotAJwt
        );
    }

    #[test]
    fn test_rejects_payload_that_is_not_base64() {
        assert_eq!(
            decode_claims("cabecera.¡¡¡.firma").unwrap_err(),
            ClaimsError::InvalidBase64
        );
    }

    #[test]
    fn test_rejects_payload_that_is_not_json() {
        let payload = URL_SAFE_NO_PAD.encode("esto no es json");
        let token = format!("cabecera.{}.firma", payload);
        assert_eq!(decode_claims(&token).unwrap_err(), ClaimsError::InvalidJson);
    }

    #[test]
    fn test_rejects_unknown_role() {
        let err = role_from_token(&token_with_role("superuser")).unwrap_err();
        assert_eq!(err, ClaimsError::UnknownRole("superuser".to_string()));
    }
}
