use crate::core::errors::Result;
use crate::core::utils;
use std::net::IpAddr;

/*-------------------------------------------------------------------------------------------------
  Mode
-------------------------------------------------------------------------------------------------*/

/// What a [Query] produces: filtered prefixes (the default) or one of the enumerations.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Mode {
    /// Prefixes matching the target IP, region, and service filters.
    #[default]
    Search,

    /// Every CIDR, IPv4 then IPv6, in document order.
    ListCidrs,

    /// Distinct regions in first-seen order.
    ListRegions,

    /// Distinct services in first-seen order.
    ListServices,
}

/*-------------------------------------------------------------------------------------------------
  QueryBuilder
-------------------------------------------------------------------------------------------------*/

/// Builder used to construct a [Query].
///
/// ```rust
/// # fn main() -> ipranges::Result<()> {
/// let query = ipranges::QueryBuilder::new()
///     .ip("3.5.140.2")?
///     .region("ap-northeast-2")
///     .service("S3")
///     .build();
/// assert_eq!(query.region(), Some("ap-northeast-2"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct QueryBuilder {
    ip: Option<IpAddr>,
    region: Option<String>,
    service: Option<String>,
    mode: Mode,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /*-------------------------------------------------------------------------
      Setters
    -------------------------------------------------------------------------*/

    /// Restrict the search to the prefix containing this IP address. An empty
    /// value clears the target; any other unparsable value is an
    /// [InvalidInput](crate::Error::InvalidInput) error.
    pub fn ip(mut self, ip: &str) -> Result<Self> {
        self.ip = if ip.is_empty() {
            None
        } else {
            Some(utils::ipnetwork::parse_ip(ip)?)
        };
        Ok(self)
    }

    /// Include only prefixes from this region (exact, case-sensitive match).
    pub fn region<S: Into<String>>(mut self, region: S) -> Self {
        self.region = non_empty(region.into());
        self
    }

    /// Include only prefixes used by this service (exact, case-sensitive match).
    pub fn service<S: Into<String>>(mut self, service: S) -> Self {
        self.service = non_empty(service.into());
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /*-------------------------------------------------------------------------
      Build Method
    -------------------------------------------------------------------------*/

    pub fn build(self) -> Query {
        Query {
            ip: self.ip,
            region: self.region,
            service: self.service,
            mode: self.mode,
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Query
-------------------------------------------------------------------------------------------------*/

/// An immutable query over the IP ranges. In [Mode::Search] the target IP,
/// region, and service filters combine as a logical AND; unset filters match
/// every prefix.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Query {
    ip: Option<IpAddr>,
    region: Option<String>,
    service: Option<String>,
    mode: Mode,
}

impl Query {
    pub fn ip(&self) -> Option<IpAddr> {
        self.ip
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn service(&self) -> Option<&str> {
        self.service.as_deref()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Check the region and service filters against a prefix's labels.
    pub(crate) fn includes(&self, region: &str, service: &str) -> bool {
        self.region().map_or(true, |filter| filter == region)
            && self.service().map_or(true, |filter| filter == service)
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
