use crate::core::json::IpRanges;
use serde::Serialize;

/*-------------------------------------------------------------------------------------------------
  Query Results
-------------------------------------------------------------------------------------------------*/

/// Result of a [Query](crate::Query); serializes as the inner value.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResult {
    /// [IpRanges] pruned to the matching prefixes.
    Prefixes(IpRanges),
    Cidrs(Cidrs),
    Regions(Regions),
    Services(Services),
}

/*--------------------------------------------------------------------------------------
  CIDRs
--------------------------------------------------------------------------------------*/

/// Every published CIDR, in document order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Cidrs {
    #[serde(rename = "syncToken")]
    pub sync_token: String,

    #[serde(rename = "createDate")]
    pub create_date: String,

    pub ipv4_cidrs: Vec<String>,

    pub ipv6_cidrs: Vec<String>,
}

impl Cidrs {
    /// IPv4 CIDRs followed by IPv6 CIDRs.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ipv4_cidrs
            .iter()
            .chain(self.ipv6_cidrs.iter())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ipv4_cidrs.len() + self.ipv6_cidrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ipv4_cidrs.is_empty() && self.ipv6_cidrs.is_empty()
    }
}

/*--------------------------------------------------------------------------------------
  Regions
--------------------------------------------------------------------------------------*/

/// Distinct regions in first-seen order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Regions {
    #[serde(rename = "syncToken")]
    pub sync_token: String,

    #[serde(rename = "createDate")]
    pub create_date: String,

    pub regions: Vec<String>,
}

/*--------------------------------------------------------------------------------------
  Services
--------------------------------------------------------------------------------------*/

/// Distinct services in first-seen order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Services {
    #[serde(rename = "syncToken")]
    pub sync_token: String,

    #[serde(rename = "createDate")]
    pub create_date: String,

    pub services: Vec<String>,
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
