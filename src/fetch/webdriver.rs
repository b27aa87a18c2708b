use crate::config::FetchConfig;
use crate::fetch::{FetchError, Fetcher, validate_url};
use crate::utils::secs_or;
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::timeout;

/// Common local driver endpoints tried when the configured one is unreachable
const FALLBACK_WEBDRIVER_URLS: [&str; 4] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4723", // Appium default
    "http://localhost:9222", // Chrome debug port default
    "http://127.0.0.1:4444",
];

/// Fetches the rendered source of pages through a WebDriver session.
///
/// Match pages fill in their score panels with script, so a browser sees more
/// than a plain GET. The session is opened on first use and reused.
pub struct WebDriverFetcher {
    webdriver_url: String,
    page_timeout: Duration,
    client: Mutex<Option<Client>>,
}

impl WebDriverFetcher {
    pub fn new(config: &FetchConfig) -> Self {
        Self {
            webdriver_url: config.webdriver_url.clone(),
            page_timeout: secs_or(config.connect_timeout_secs, 10)
                + secs_or(config.read_timeout_secs, 15),
            client: Mutex::new(None),
        }
    }

    async fn page_source(&self, client: &Client, url: &str) -> Result<String, FetchError> {
        client
            .goto(url)
            .await
            .map_err(|e| navigation_error(e, "accessing", url))?;
        client
            .source()
            .await
            .map_err(|e| navigation_error(e, "getting source for", url))
    }
}

#[async_trait]
impl Fetcher for WebDriverFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let url = validate_url(url)?.to_string();

        let mut guard = self.client.lock().await;
        if guard.is_none() {
            *guard = Some(connect_to_webdriver(&self.webdriver_url).await?);
        }
        let client = match guard.as_ref() {
            Some(client) => client.clone(),
            None => return Err(FetchError::WebDriver("no session".to_string())),
        };

        let result = match timeout(self.page_timeout, self.page_source(&client, &url)).await {
            Ok(result) => result,
            Err(_) => {
                ::log::error!("Timeout fetching: {}", url);
                Err(FetchError::Timeout(url.clone()))
            }
        };

        // A lost session is dropped so the next fetch reconnects.
        if let Err(FetchError::WebDriver(msg)) = &result {
            if msg.contains("Unable to find session") {
                *guard = None;
            }
        }

        result
    }

    async fn shutdown(&self) {
        if let Some(client) = self.client.lock().await.take() {
            if let Err(e) = client.close().await {
                ::log::warn!("Failed to close WebDriver client: {}", e);
            }
        }
    }
}

/// Connects to the WebDriver instance, trying common local ports if the configured one fails
async fn connect_to_webdriver(webdriver_url: &str) -> Result<Client, FetchError> {
    match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Ok(client);
        }
        Err(e) => {
            ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
        }
    }

    for url in FALLBACK_WEBDRIVER_URLS {
        if url == webdriver_url {
            continue;
        }

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        if let Ok(client) = ClientBuilder::native().connect(url).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Ok(client);
        }
    }

    ::log::error!("Make sure a WebDriver server is running or set webdriver_url in the config");
    Err(FetchError::WebDriver(format!(
        "no WebDriver server reachable at {}",
        webdriver_url
    )))
}

fn navigation_error(error: fantoccini::error::CmdError, context: &str, url: &str) -> FetchError {
    let message = error.to_string();
    if message.contains("Unable to find session") {
        ::log::warn!("Lost session while {} {}", context, url);
    } else {
        ::log::error!("Failed {} {}: {}", context, url, message);
    }
    FetchError::WebDriver(message)
}
