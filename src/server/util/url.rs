use crate::server::error::Error;

/// Joins a path to a base URL ending with `/` and appends URL encoded query parameters
pub fn app_url(base: &str, path: &str, params: &[(&str, String)]) -> Result<String, Error> {
    let url = reqwest::Url::parse_with_params(&format!("{}{}", base, path), params)
        .map_err(|e| Error::ParseError(format!("Invalid URL for {}: {}", path, e)))?;

    Ok(url.to_string())
}
