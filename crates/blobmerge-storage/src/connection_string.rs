//! Azure Storage connection string parsing
//!
//! A connection string is a `;`-separated list of `Key=Value` segments, for
//! example:
//!
//! ```text
//! DefaultEndpointsProtocol=https;AccountName=acct;AccountKey=bXlrZXk=;EndpointSuffix=core.windows.net
//! ```
//!
//! Values are split at the first `=` only, since base64 account keys end
//! with padding. Keys are matched case-insensitively and unknown keys are
//! ignored.

use thiserror::Error;

const DEFAULT_PROTOCOL: &str = "https";
const DEFAULT_ENDPOINT_SUFFIX: &str = "core.windows.net";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConnectionStringError {
    #[error("Malformed connection string segment (expected Key=Value): {0}")]
    MalformedSegment(String),

    #[error("Connection string has no AccountName")]
    MissingAccountName,

    #[error("Connection string has neither AccountKey nor SharedAccessSignature")]
    MissingCredential,
}

/// Credential used to authorize requests.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    AccountKey(String),
    SharedAccessSignature(String),
}

/// A parsed Azure Storage connection string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionString {
    /// `UseDevelopmentStorage=true`: the local Azurite emulator.
    DevelopmentStorage,
    Account {
        account_name: String,
        credential: Credential,
        blob_endpoint: String,
    },
}

impl ConnectionString {
    pub fn parse(input: &str) -> Result<Self, ConnectionStringError> {
        let mut protocol = None;
        let mut account_name = None;
        let mut account_key = None;
        let mut sas = None;
        let mut endpoint_suffix = None;
        let mut blob_endpoint = None;
        let mut development = false;

        for segment in input.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            let (key, value) = segment
                .split_once('=')
                .ok_or_else(|| ConnectionStringError::MalformedSegment(redact(segment)))?;
            let value = value.trim().to_string();

            match key.trim().to_ascii_lowercase().as_str() {
                "defaultendpointsprotocol" => protocol = Some(value),
                "accountname" => account_name = Some(value),
                "accountkey" => account_key = Some(value),
                "sharedaccesssignature" => sas = Some(value),
                "endpointsuffix" => endpoint_suffix = Some(value),
                "blobendpoint" => blob_endpoint = Some(value),
                "usedevelopmentstorage" => development = value.eq_ignore_ascii_case("true"),
                other => {
                    tracing::debug!(key = %other, "Ignoring unknown connection string key");
                }
            }
        }

        if development {
            return Ok(ConnectionString::DevelopmentStorage);
        }

        let credential = match (account_key, sas) {
            (Some(key), _) if !key.is_empty() => Credential::AccountKey(key),
            (_, Some(sas)) if !sas.is_empty() => {
                Credential::SharedAccessSignature(sas.trim_start_matches('?').to_string())
            }
            _ => return Err(ConnectionStringError::MissingCredential),
        };

        // SAS connection strings generated by the portal carry only
        // BlobEndpoint; the account is the first label of its host.
        let account_name = match account_name.filter(|s| !s.is_empty()) {
            Some(name) => name,
            None => match (&credential, blob_endpoint.as_deref()) {
                (Credential::SharedAccessSignature(_), Some(endpoint)) => {
                    account_from_endpoint(endpoint)
                        .ok_or(ConnectionStringError::MissingAccountName)?
                }
                _ => return Err(ConnectionStringError::MissingAccountName),
            },
        };

        let blob_endpoint = match blob_endpoint.filter(|s| !s.is_empty()) {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => format!(
                "{}://{}.blob.{}",
                protocol.as_deref().unwrap_or(DEFAULT_PROTOCOL),
                account_name,
                endpoint_suffix.as_deref().unwrap_or(DEFAULT_ENDPOINT_SUFFIX)
            ),
        };

        Ok(ConnectionString::Account {
            account_name,
            credential,
            blob_endpoint,
        })
    }

    pub fn account_name(&self) -> Option<&str> {
        match self {
            ConnectionString::DevelopmentStorage => None,
            ConnectionString::Account { account_name, .. } => Some(account_name),
        }
    }

    pub fn blob_endpoint(&self) -> Option<&str> {
        match self {
            ConnectionString::DevelopmentStorage => None,
            ConnectionString::Account { blob_endpoint, .. } => Some(blob_endpoint),
        }
    }
}

/// `https://acct.blob.core.windows.net/` -> `acct`
fn account_from_endpoint(endpoint: &str) -> Option<String> {
    let without_scheme = endpoint
        .split_once("://")
        .map_or(endpoint, |(_, rest)| rest);
    let host = without_scheme
        .split(['/', ':'])
        .next()
        .unwrap_or_default();
    if host.parse::<std::net::IpAddr>().is_ok() {
        return None;
    }
    let (account, rest) = host.split_once('.')?;
    if account.is_empty() || rest.is_empty() {
        return None;
    }
    Some(account.to_string())
}

// Keep secrets out of error messages.
fn redact(segment: &str) -> String {
    let lower = segment.to_ascii_lowercase();
    if lower.starts_with("accountkey") || lower.starts_with("sharedaccesssignature") {
        "<redacted>".to_string()
    } else {
        segment.to_string()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::AccountKey(_) => f.write_str("AccountKey(<redacted>)"),
            Credential::SharedAccessSignature(_) => {
                f.write_str("SharedAccessSignature(<redacted>)")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_account_key_with_padding() {
        let cs = ConnectionString::parse(
            "DefaultEndpointsProtocol=https;AccountName=acct;AccountKey=bXlrZXk=;EndpointSuffix=core.windows.net",
        )
        .unwrap();

        assert_eq!(
            cs,
            ConnectionString::Account {
                account_name: "acct".to_string(),
                credential: Credential::AccountKey("bXlrZXk=".to_string()),
                blob_endpoint: "https://acct.blob.core.windows.net".to_string(),
            }
        );
    }

    #[test]
    fn defaults_protocol_and_suffix() {
        let cs = ConnectionString::parse("AccountName=acct;AccountKey=a2V5").unwrap();
        assert_eq!(cs.blob_endpoint(), Some("https://acct.blob.core.windows.net"));
    }

    #[test]
    fn honours_protocol_and_sovereign_suffix() {
        let cs = ConnectionString::parse(
            "DefaultEndpointsProtocol=http;AccountName=acct;AccountKey=a2V5;EndpointSuffix=core.chinacloudapi.cn;",
        )
        .unwrap();
        assert_eq!(cs.blob_endpoint(), Some("http://acct.blob.core.chinacloudapi.cn"));
    }

    #[test]
    fn explicit_blob_endpoint_wins() {
        let cs = ConnectionString::parse(
            "AccountName=devstoreaccount1;AccountKey=a2V5;BlobEndpoint=http://127.0.0.1:10000/devstoreaccount1/",
        )
        .unwrap();
        assert_eq!(
            cs.blob_endpoint(),
            Some("http://127.0.0.1:10000/devstoreaccount1")
        );
    }

    #[test]
    fn parses_sas_without_leading_question_mark() {
        let cs = ConnectionString::parse(
            "BlobEndpoint=https://acct.blob.core.windows.net;AccountName=acct;SharedAccessSignature=?sv=2022-11-02&sig=abc%3D",
        )
        .unwrap();

        let ConnectionString::Account { credential, .. } = cs else {
            panic!("expected account connection string");
        };
        assert_eq!(
            credential,
            Credential::SharedAccessSignature("sv=2022-11-02&sig=abc%3D".to_string())
        );
    }

    #[test]
    fn sas_only_derives_account_from_endpoint() {
        let cs = ConnectionString::parse(
            "BlobEndpoint=https://acct.blob.core.windows.net/;SharedAccessSignature=sv=2022&sig=x",
        )
        .unwrap();

        assert_eq!(
            cs,
            ConnectionString::Account {
                account_name: "acct".to_string(),
                credential: Credential::SharedAccessSignature("sv=2022&sig=x".to_string()),
                blob_endpoint: "https://acct.blob.core.windows.net".to_string(),
            }
        );
    }

    #[test]
    fn account_key_without_account_name_is_rejected() {
        let err = ConnectionString::parse(
            "BlobEndpoint=https://acct.blob.core.windows.net;AccountKey=a2V5",
        )
        .unwrap_err();
        assert_eq!(err, ConnectionStringError::MissingAccountName);
    }

    #[test]
    fn sas_without_endpoint_or_account_is_rejected() {
        let err = ConnectionString::parse("SharedAccessSignature=sv=2022&sig=x").unwrap_err();
        assert_eq!(err, ConnectionStringError::MissingAccountName);
    }

    #[test]
    fn account_from_endpoint_host() {
        assert_eq!(
            account_from_endpoint("https://acct.blob.core.windows.net/"),
            Some("acct".to_string())
        );
        assert_eq!(
            account_from_endpoint("https://acct.blob.core.windows.net:443/x"),
            Some("acct".to_string())
        );
        assert_eq!(account_from_endpoint("http://127.0.0.1:10000/devstoreaccount1"), None);
        assert_eq!(account_from_endpoint("https://localhost/"), None);
    }

    #[test]
    fn keys_are_case_insensitive() {
        let cs = ConnectionString::parse("accountname=acct;ACCOUNTKEY=a2V5").unwrap();
        assert_eq!(cs.account_name(), Some("acct"));
    }

    #[test]
    fn development_storage() {
        let cs = ConnectionString::parse("UseDevelopmentStorage=true").unwrap();
        assert_eq!(cs, ConnectionString::DevelopmentStorage);
        assert_eq!(cs.account_name(), None);
    }

    #[test]
    fn malformed_segment_is_rejected() {
        let err = ConnectionString::parse("AccountName=acct;garbage").unwrap_err();
        assert_eq!(err, ConnectionStringError::MalformedSegment("garbage".to_string()));
    }

    #[test]
    fn missing_account_name_is_rejected() {
        let err = ConnectionString::parse("AccountKey=a2V5").unwrap_err();
        assert_eq!(err, ConnectionStringError::MissingAccountName);
    }

    #[test]
    fn missing_credential_is_rejected() {
        let err = ConnectionString::parse("AccountName=acct;AccountKey=").unwrap_err();
        assert_eq!(err, ConnectionStringError::MissingCredential);
    }

    #[test]
    fn debug_hides_credential() {
        let cs = ConnectionString::parse("AccountName=acct;AccountKey=c2VjcmV0").unwrap();
        assert!(!format!("{:?}", cs).contains("c2VjcmV0"));
    }
}
