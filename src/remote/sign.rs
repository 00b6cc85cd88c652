//! HMAC-SHA1 request signing for access-key protected services.

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::Hmac;
use hmac::Mac;
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

const DELIMITER: &str = "\n";

pub(crate) fn signature(timestamp: &str, path_with_query: &str, secret: &str) -> String {
    let mut mac =
        HmacSha1::new_from_slice(secret.as_bytes()).expect("hmac accepts any key length");
    mac.update(timestamp.as_bytes());
    mac.update(DELIMITER.as_bytes());
    mac.update(path_with_query.as_bytes());

    STANDARD.encode(mac.finalize().into_bytes())
}

/// `Authorization` and `Timestamp` headers for one signed request.
pub(crate) fn auth_headers(
    path_with_query: &str,
    app_id: &str,
    secret: &str,
) -> [(&'static str, String); 2] {
    let timestamp = epoch_millis().to_string();
    let signature = signature(&timestamp, path_with_query, secret);

    [
        ("Authorization", format!("{app_id}:{signature}")),
        ("Timestamp", timestamp),
    ]
}

fn epoch_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis()
}
