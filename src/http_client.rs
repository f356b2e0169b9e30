use anyhow::{Context, Result, anyhow};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

pub const AUTH_KEY_ENV: &str = "TBA_AUTH_KEY";
const AUTH_HEADER: &str = "X-TBA-Auth-Key";

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Read the API credential from the environment (a `.env` file is loaded by
/// the binary before this is called). An empty or missing key aborts early.
pub fn auth_key() -> Result<String> {
    let key = std::env::var(AUTH_KEY_ENV).unwrap_or_default();
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(anyhow!(
            "{AUTH_KEY_ENV} is not set; export it or add it to a .env file"
        ));
    }
    Ok(key)
}

pub fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        let key = auth_key()?;
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTH_HEADER,
            HeaderValue::from_str(&key).context("auth key is not a valid header value")?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Client::builder()
            .default_headers(headers)
            .build()
            .context("failed to build http client")
    })
}
