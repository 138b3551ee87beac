use common::enums::http_method::HttpMethod;
use glint_error::GlintError;
use log::debug;
use reqwest::{Error, Method, Response};
use serde::de::DeserializeOwned;
use serde_json::from_str;

pub fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

/// Returns the body of a successful response.
pub async fn try_response_text(result: Result<Response, Error>) -> Result<String, GlintError> {
    let response = result?;
    let status = response.status();
    let response_text = response.text().await?;

    if !status.is_success() {
        let description = format!(
            "try_response_text -> unsuccessful response {} => {}",
            status, response_text
        );
        return Err(GlintError::new_unsuccessful_response(description));
    }

    debug!("received raw: {}", response_text);
    Ok(response_text)
}

pub async fn try_parse_response<T: DeserializeOwned>(
    result: Result<Response, Error>,
) -> Result<T, GlintError> {
    let response_text = try_response_text(result).await?;
    let parsed_response = from_str::<T>(&response_text)?;
    Ok(parsed_response)
}
