use serde_json::Value;
use std::sync::Arc;

use crate::{
    CacheStore, Config, FileCache, Forecast, ForecastError, ForecastTime, HttpClient,
    ReqwestClient, Result, Units, config::DEFAULT_CACHE_LIFETIME_MINUTES,
};

pub const API_URL: &str = "https://api.forecast.io/forecast";

/// Fetches forecasts, going through the cache when one is configured.
#[derive(Debug, Clone)]
pub struct ForecastClient {
    http: Arc<dyn HttpClient>,
    cache: Option<Arc<dyn CacheStore>>,
    api_key: Option<String>,
    cache_lifetime: u32,
    units: Option<Units>,
    base_url: String,
}

impl ForecastClient {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self {
            http,
            cache: None,
            api_key: None,
            cache_lifetime: DEFAULT_CACHE_LIFETIME_MINUTES,
            units: None,
            base_url: API_URL.to_string(),
        }
    }

    /// Client with the stock HTTP transport and, if enabled, the file cache.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut client = Self::new(Arc::new(ReqwestClient::new()?))
            .with_cache_lifetime(config.cache_lifetime_minutes);

        if let Some(key) = &config.api_key {
            client = client.with_api_key(key.clone());
        }
        if let Some(units) = config.units {
            client = client.with_units(units);
        }
        if let Some(base_url) = &config.base_url {
            client = client.with_base_url(base_url.clone());
        }
        if config.cache_enabled {
            client = client.with_cache(Arc::new(FileCache::in_default_location()?));
        }

        Ok(client)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_cache(mut self, cache: Arc<dyn CacheStore>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_cache_lifetime(mut self, minutes: u32) -> Self {
        self.cache_lifetime = minutes;
        self
    }

    pub fn with_units(mut self, units: Units) -> Self {
        self.units = Some(units);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn cache_lifetime(&self) -> u32 {
        self.cache_lifetime
    }

    pub fn units(&self) -> Option<Units> {
        self.units
    }

    /// Key under which the response for these arguments is cached.
    ///
    /// Includes the units mode, since it changes the payload.
    pub fn cache_key(&self, latitude: f64, longitude: f64, time: Option<&ForecastTime>) -> String {
        format!(
            "forecast|{}|{}|{}|{}",
            latitude,
            longitude,
            time.map(ToString::to_string).unwrap_or_default(),
            self.units.map(|u| u.as_str()).unwrap_or_default(),
        )
    }

    fn location_path(latitude: f64, longitude: f64, time: Option<&ForecastTime>) -> String {
        match time {
            Some(time) => format!("{latitude},{longitude},{}", time.as_path_segment()),
            None => format!("{latitude},{longitude}"),
        }
    }

    fn query(&self) -> Vec<(String, String)> {
        self.units
            .map(|units| vec![("units".to_string(), units.as_str().to_string())])
            .unwrap_or_default()
    }

    fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ForecastError::Configuration("API key is not set".to_string()))
    }

    /// Forecast for a location, now or at `time`.
    pub async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        time: Option<&ForecastTime>,
    ) -> Result<Forecast> {
        let api_key = self.require_api_key()?;
        let cache_key = self.cache_key(latitude, longitude, time);

        if let Some(document) = self.cached(&cache_key) {
            tracing::debug!("Forecast cache hit for {}", cache_key);
            return Ok(Forecast::new(document));
        }
        tracing::debug!("Forecast cache miss for {}", cache_key);

        let location = Self::location_path(latitude, longitude, time);
        let url = format!("{}/{}/{}", self.base_url, api_key, location);
        tracing::debug!("Requesting {}/<api-key>/{}", self.base_url, location);

        let body = self.http.get(&url, &self.query()).await?;
        let document: Value = serde_json::from_str(&body)?;
        tracing::info!("Fetched forecast for {}", location);

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.put(&cache_key, &document, self.cache_lifetime) {
                tracing::warn!("Failed to cache forecast for {}: {}", cache_key, e);
            }
        }

        Ok(Forecast::new(document))
    }

    fn cached(&self, key: &str) -> Option<Value> {
        let cache = self.cache.as_ref()?;
        if !cache.has(key) {
            return None;
        }
        // Entry may expire between `has` and `get`; that is just a miss.
        cache.get(key)
    }
}
