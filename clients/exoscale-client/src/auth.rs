// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Request signing
//!
//! Every request is a query string signed with the account secret: the
//! parameters are sorted by name, values are percent-encoded (spaces as
//! `%20`), the whole string is lower-cased and run through HMAC-SHA1. The
//! base64 digest travels as the `signature` parameter.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::ClientError;

type HmacSha1 = Hmac<Sha1>;

/// Build the query string in signing order
///
/// Values are encoded the same way whether the result is signed or sent,
/// so the server recomputes an identical string.
pub fn canonical_query(params: &[(String, String)]) -> String {
    let mut sorted: Vec<&(String, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));
    sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Compute the `signature` parameter for a set of request parameters
pub fn sign(secret: &str, params: &[(String, String)]) -> Result<String, ClientError> {
    let payload = canonical_query(params).to_lowercase();
    let mut mac = HmacSha1::new_from_slice(secret.as_bytes())
        .map_err(|e| ClientError::Signing(e.to_string()))?;
    mac.update(payload.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_canonical_query_sorts_and_encodes() {
        let p = params(&[("name", "my key"), ("command", "deleteSSHKeyPair")]);
        assert_eq!(canonical_query(&p), "command=deleteSSHKeyPair&name=my%20key");
    }

    #[test]
    fn test_sign_known_vector() {
        let p = params(&[
            ("command", "deleteSSHKeyPair"),
            ("name", "my key"),
            ("apikey", "EXO123"),
            ("response", "json"),
        ]);
        assert_eq!(sign("s3cr3t", &p).unwrap(), "A53dUxUU5+htE2ctzct0aOjbDgc=");
    }

    #[test]
    fn test_sign_ignores_parameter_order() {
        let a = params(&[("a", "1"), ("b", "2")]);
        let b = params(&[("b", "2"), ("a", "1")]);
        assert_eq!(sign("secret", &a).unwrap(), sign("secret", &b).unwrap());
    }

    #[test]
    fn test_sign_depends_on_secret() {
        let p = params(&[("command", "listZones")]);
        assert_ne!(sign("one", &p).unwrap(), sign("two", &p).unwrap());
    }
}
