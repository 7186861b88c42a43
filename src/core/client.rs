use crate::core::errors::{Error, Result};
use crate::core::json::IpRanges;
use chrono::{Local, NaiveDate};
use log::{info, warn};
use std::env;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;

/*-------------------------------------------------------------------------------------------------
  Simple Interface
-------------------------------------------------------------------------------------------------*/

/// _**Simple library interface**_ retrieves and decodes the IP ranges using the default client
/// configuration (with environment overrides). Uses today's cache file when present, otherwise
/// fetches the document and caches it.
///
/// ```no_run
/// # fn main() -> ipranges::Result<()> {
/// let ip_ranges = ipranges::get_ranges()?;
/// println!("{} prefixes", ip_ranges.len());
/// # Ok(())
/// # }
/// ```
pub fn get_ranges() -> Result<IpRanges> {
    Client::new().get_ranges()
}

/*-------------------------------------------------------------------------------------------------
  Client Builder
-------------------------------------------------------------------------------------------------*/

/// A builder for the [Client] struct.
///
/// ```
/// let client = ipranges::ClientBuilder::new()
///     .url("https://ip-ranges.amazonaws.com/ip-ranges.json")
///     .cache_dir("/tmp")
///     .refresh(true)
///     .timeout(10_000) // 10 seconds
///     .build();
/// ```
///
/// [ClientBuilder::new] sources initial values from environment variables when set; use
/// [ClientBuilder::default] to ignore the environment.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    url: String,
    cache_dir: PathBuf,
    refresh: bool,
    timeout: u64,
}

/*--------------------------------------------------------------------------------------
  Client Builder Implementation
--------------------------------------------------------------------------------------*/

impl Default for ClientBuilder {
    /// Create a new [ClientBuilder] with default configuration values.
    ///
    /// ```
    /// let client = ipranges::ClientBuilder::default().build();
    ///
    /// assert_eq!(client.url(), "https://ip-ranges.amazonaws.com/ip-ranges.json");
    /// assert_eq!(client.cache_dir(), std::env::temp_dir());
    /// assert!(!client.refresh());
    /// assert_eq!(client.timeout(), 30000);
    /// ```
    fn default() -> Self {
        Self {
            url: "https://ip-ranges.amazonaws.com/ip-ranges.json".to_string(),
            cache_dir: env::temp_dir(),
            refresh: false,
            timeout: 30_000, // 30 seconds
        }
    }
}

impl ClientBuilder {
    /// Create a new [ClientBuilder] reading initial configuration values from
    /// environment variables when set and default values otherwise:
    /// - `IPRANGES_URL`
    /// - `IPRANGES_CACHE_DIR`
    /// - `IPRANGES_TIMEOUT`
    pub fn new() -> Self {
        let default = ClientBuilder::default();

        Self {
            url: get_env_var("IPRANGES_URL", default.url),
            cache_dir: get_env_var("IPRANGES_CACHE_DIR", default.cache_dir),
            refresh: default.refresh,
            timeout: get_env_var("IPRANGES_TIMEOUT", default.timeout),
        }
    }

    /*-------------------------------------------------------------------------
      Setters
    -------------------------------------------------------------------------*/

    /// Set the URL of the IP ranges document.
    pub fn url(&mut self, url: &str) -> &mut Self {
        self.url = url.to_string();
        self
    }

    /// Set the directory holding the daily cache files; defaults to the
    /// system temporary directory.
    pub fn cache_dir<P: AsRef<Path>>(&mut self, cache_dir: P) -> &mut Self {
        self.cache_dir = cache_dir.as_ref().to_path_buf();
        self
    }

    /// Ignore today's cache file and fetch the document from the URL.
    pub fn refresh(&mut self, refresh: bool) -> &mut Self {
        self.refresh = refresh;
        self
    }

    /// Set the HTTP request timeout in milliseconds.
    pub fn timeout(&mut self, timeout: u64) -> &mut Self {
        self.timeout = timeout;
        self
    }

    /*-------------------------------------------------------------------------
      Build Method
    -------------------------------------------------------------------------*/

    pub fn build(&self) -> Client {
        Client {
            url: self.url.clone(),
            cache_dir: self.cache_dir.clone(),
            refresh: self.refresh,
            timeout: self.timeout,
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Client
-------------------------------------------------------------------------------------------------*/

/// Retrieves the IP ranges from today's cache file, or from the URL when the
/// cache file is absent (or a refresh is requested), caching what it fetched.
#[derive(Debug, Clone)]
pub struct Client {
    url: String,
    cache_dir: PathBuf,
    refresh: bool,
    timeout: u64,
}

/*--------------------------------------------------------------------------------------
  Client Implementation
--------------------------------------------------------------------------------------*/

impl Default for Client {
    fn default() -> Self {
        ClientBuilder::default().build()
    }
}

impl Client {
    pub fn new() -> Self {
        ClientBuilder::new().build()
    }

    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn refresh(&self) -> bool {
        self.refresh
    }

    /// HTTP request timeout in milliseconds.
    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    /// Path of today's cache file, `<cache_dir>/ip-ranges-YYYYMMDD.json`.
    pub fn cache_file(&self) -> PathBuf {
        self.cache_dir
            .join(cache_file_name(Local::now().date_naive()))
    }

    /*-------------------------------------------------------------------------
      Get Ranges
    -------------------------------------------------------------------------*/

    /// Retrieve and decode the IP ranges.
    ///
    /// A cache file that exists but does not decode is a
    /// [MalformedData](Error::MalformedData) error; it is not refetched. When
    /// the document cannot be fetched and no usable cache file exists the
    /// error is [DataUnavailable](Error::DataUnavailable).
    pub fn get_ranges(&self) -> Result<IpRanges> {
        let cache_file = self.cache_file();
        info!("Cache file path: {:?}", &cache_file);

        if self.refresh {
            info!("Refresh requested; ignore cache file");
        } else if let Some(json) = self.get_json_from_file(&cache_file) {
            return IpRanges::from_json(&json);
        }

        match self.get_json_from_url() {
            Ok(json) => {
                let ip_ranges = IpRanges::from_json(&json)?;
                let _ = self.cache_json_to_file(&cache_file, &json);
                Ok(ip_ranges)
            }
            Err(error) if self.refresh => self
                .get_json_from_file(&cache_file)
                .and_then(|json| IpRanges::from_json(&json).ok())
                .inspect(|_| warn!("Unable to refresh IP ranges ({error}); use cache file"))
                .ok_or(error),
            Err(error) => Err(error),
        }
    }

    /*-------------------------------------------------------------------------
      Private Methods
    -------------------------------------------------------------------------*/

    /// Get the IP ranges JSON from the URL.
    fn get_json_from_url(&self) -> Result<String> {
        info!("Get IP ranges from URL: GET {}", self.url);

        reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(self.timeout))
            .build()
            .and_then(|client| client.get(&self.url).send())
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .inspect(|_| info!("Get IP ranges from URL: Ok"))
            .map_err(|error| {
                Error::DataUnavailable(format!("failed to retrieve {}: {error}", self.url))
            })
    }

    /// Write the IP ranges JSON to the cache file. Failures are logged and
    /// otherwise ignored; the next run fetches again.
    ///
    /// The JSON is written to a temporary file in the cache directory and
    /// renamed over the cache file, so a concurrent reader sees either no
    /// cache file or a complete one.
    fn cache_json_to_file(&self, cache_file: &Path, json: &str) -> Result<()> {
        let cache_dir = match cache_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        fs::create_dir_all(cache_dir)
            .and_then(|_| NamedTempFile::new_in(cache_dir))
            .and_then(|mut temp_file| {
                temp_file.write_all(json.as_bytes())?;
                temp_file.persist(cache_file).map_err(|error| error.error)
            })
            .map(|_| info!("Cached IP ranges to: {:?}", cache_file))
            .map_err(|error| {
                Error::DataUnavailable(format!("failed to write {cache_file:?}: {error}"))
            })
            .inspect_err(|error| warn!("{error}"))
    }

    /// Read the IP ranges JSON from the cache file. A missing, unreadable, or
    /// empty file is a cache miss.
    fn get_json_from_file(&self, cache_file: &Path) -> Option<String> {
        match fs::read_to_string(cache_file) {
            Ok(json) if json.trim().is_empty() => {
                info!("Cache file is empty");
                None
            }
            Ok(json) => {
                info!("Read IP ranges from: {:?}", cache_file);
                Some(json)
            }
            Err(error) if error.kind() == ErrorKind::NotFound => {
                info!("Cache file not found");
                None
            }
            Err(error) => {
                warn!("Unable to read cache file {:?}: {}", cache_file, error);
                None
            }
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

/// Name of the cache file for a calendar day.
pub fn cache_file_name(date: NaiveDate) -> String {
    format!("ip-ranges-{}.json", date.format("%Y%m%d"))
}

/// Get and parse an environment variable value or return a default value.
fn get_env_var<T: std::str::FromStr>(env_var: &str, default: T) -> T {
    env::var(env_var)
        .ok()
        .and_then(|value| {
            value
                .parse::<T>()
                .inspect(|_| info!("Using {}: {}", env_var, value))
                .inspect_err(|_| warn!("Invalid {}: {}", env_var, value))
                .ok()
        })
        .unwrap_or(default)
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
