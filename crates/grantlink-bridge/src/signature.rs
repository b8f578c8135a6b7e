//! Webhook request signature verification.
//!
//! The governance platform signs each delivery with HMAC-SHA256 over
//! `{timestamp}.{raw body}` and sends the hex signature plus the signing
//! time in request headers. Verification happens on the exact request
//! bytes, before any JSON parsing.

use chrono::Utc;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the hex-encoded payload signature.
pub const SIGNATURE_HEADER: &str = "x-indent-signature";
/// Header carrying the unix timestamp the payload was signed at.
pub const TIMESTAMP_HEADER: &str = "x-indent-timestamp";

/// Maximum accepted age of a signed request, in seconds.
const MAX_SKEW_SECS: i64 = 300;

/// Compute the hex-encoded HMAC-SHA256 signature for a payload.
///
/// The signature covers `{timestamp}.{body}` to prevent replay attacks.
pub fn compute_signature(secret: &str, timestamp: &str, body: &[u8]) -> String {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(secret.as_bytes())
        .expect("HMAC can take key of any size");

    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(body);

    hex::encode(mac.finalize().into_bytes())
}

/// Verify a webhook request signature.
///
/// Rejects missing headers, timestamps outside the accepted window, and
/// mismatched signatures; the comparison runs in constant time.
pub fn verify_signature(
    secret: &SecretString,
    signature: Option<&str>,
    timestamp: Option<&str>,
    body: &[u8],
) -> bool {
    let (Some(signature), Some(timestamp)) = (signature, timestamp) else {
        return false;
    };

    let Ok(signed_at) = timestamp.parse::<i64>() else {
        return false;
    };

    if (Utc::now().timestamp() - signed_at).abs() > MAX_SKEW_SECS {
        return false;
    }

    let computed = compute_signature(secret.expose_secret(), timestamp, body);
    constant_time_eq(signature.as_bytes(), computed.as_bytes())
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    use subtle::ConstantTimeEq;
    a.ct_eq(b).into()
}
