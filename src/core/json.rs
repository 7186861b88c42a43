use crate::core::errors::{Error, Result};
use serde::{Deserialize, Serialize};

/*-------------------------------------------------------------------------------------------------
  Parse JSON
-------------------------------------------------------------------------------------------------*/

/// Decode an IP ranges document. Any structural mismatch (missing keys, wrong value types) is
/// reported as [Error::MalformedData]; unknown keys are ignored.
pub fn parse(json: &str) -> Result<IpRanges> {
    serde_json::from_str(json)
        .map_err(|error| Error::MalformedData(format!("invalid IP ranges document: {error}")))
}

/*-------------------------------------------------------------------------------------------------
  JSON Data Structures
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  IP Ranges
--------------------------------------------------------------------------------------*/

/// The published IP ranges: a sync token, the publication date, and the IPv4 and IPv6 prefix
/// lists in document order.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct IpRanges {
    /// Opaque version stamp of the document.
    #[serde(rename = "syncToken")]
    pub sync_token: String,

    /// Publication date, kept exactly as published.
    #[serde(rename = "createDate")]
    pub create_date: String,

    pub prefixes: Vec<IpPrefix>,

    pub ipv6_prefixes: Vec<Ipv6Prefix>,
}

impl IpRanges {
    /// Decode the IP ranges from a JSON document.
    pub fn from_json(json: &str) -> Result<IpRanges> {
        parse(json)
    }

    /// An empty [IpRanges] carrying this document's sync token and create date.
    pub(crate) fn empty_copy(&self) -> IpRanges {
        IpRanges {
            sync_token: self.sync_token.clone(),
            create_date: self.create_date.clone(),
            prefixes: Vec::new(),
            ipv6_prefixes: Vec::new(),
        }
    }

    /// Total number of IPv4 and IPv6 prefix entries.
    pub fn len(&self) -> usize {
        self.prefixes.len() + self.ipv6_prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty() && self.ipv6_prefixes.is_empty()
    }
}

/*--------------------------------------------------------------------------------------
  IP (IPv4) Prefix
--------------------------------------------------------------------------------------*/

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct IpPrefix {
    pub ip_prefix: String,
    pub region: String,
    pub service: String,
    pub network_border_group: String,
}

/*--------------------------------------------------------------------------------------
  IPv6 Prefix
--------------------------------------------------------------------------------------*/

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Ipv6Prefix {
    pub ipv6_prefix: String,
    pub region: String,
    pub service: String,
    pub network_border_group: String,
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
