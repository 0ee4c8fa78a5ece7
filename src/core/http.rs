//! HTTP utilities shared by the data sources

use crate::core::config::{OfficialCredentials, USER_AGENT};
use crate::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};

/// Build the shared client: JSON accept header and a fixed user agent.
pub fn build_client() -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .build()?)
}

/// Attach official-service credentials to a request.
pub fn with_official_auth(
    builder: RequestBuilder,
    creds: &OfficialCredentials,
) -> Result<RequestBuilder> {
    Ok(match creds {
        OfficialCredentials::Token(token) => {
            builder.header(AUTHORIZATION, HeaderValue::from_str(&format!("Basic {token}"))?)
        }
        OfficialCredentials::UserKey { user, key } => builder.basic_auth(user, Some(key)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_header(creds: &OfficialCredentials) -> String {
        let client = Client::new();
        let req = with_official_auth(client.get("http://localhost/x"), creds)
            .unwrap()
            .build()
            .unwrap();
        req.headers()[AUTHORIZATION].to_str().unwrap().to_string()
    }

    #[test]
    fn test_token_is_forwarded_verbatim() {
        let header = auth_header(&OfficialCredentials::Token("dXNlcjprZXk=".into()));
        assert_eq!(header, "Basic dXNlcjprZXk=");
    }

    #[test]
    fn test_user_key_is_basic_auth() {
        let header = auth_header(&OfficialCredentials::UserKey {
            user: "user".into(),
            key: "key".into(),
        });
        assert_eq!(header, "Basic dXNlcjprZXk=");
    }

    #[test]
    fn test_invalid_token_is_an_error() {
        let client = Client::new();
        let result = with_official_auth(
            client.get("http://localhost/x"),
            &OfficialCredentials::Token("bad\ntoken".into()),
        );
        assert!(matches!(result, Err(crate::ScoutError::InvalidHeader(_))));
    }

    #[test]
    fn test_build_client() {
        assert!(build_client().is_ok());
    }
}
