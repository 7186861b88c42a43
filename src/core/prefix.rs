use crate::core::json::{IpPrefix, Ipv6Prefix};

/*-------------------------------------------------------------------------------------------------
  Prefix Type
-------------------------------------------------------------------------------------------------*/

/// Address family of a prefix list (IPv4 or IPv6).
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PrefixType {
    IPv4,
    IPv6,
}

/*-------------------------------------------------------------------------------------------------
  Prefix
-------------------------------------------------------------------------------------------------*/

/// Common view over the IPv4 and IPv6 prefix records.
pub trait Prefix {
    /// Prefix list this record is published in.
    const PREFIX_TYPE: PrefixType;

    /// CIDR-notation network, as published.
    fn cidr(&self) -> &str;
    fn region(&self) -> &str;
    fn service(&self) -> &str;
    fn network_border_group(&self) -> &str;
}

impl Prefix for IpPrefix {
    const PREFIX_TYPE: PrefixType = PrefixType::IPv4;

    fn cidr(&self) -> &str {
        &self.ip_prefix
    }

    fn region(&self) -> &str {
        &self.region
    }

    fn service(&self) -> &str {
        &self.service
    }

    fn network_border_group(&self) -> &str {
        &self.network_border_group
    }
}

impl Prefix for Ipv6Prefix {
    const PREFIX_TYPE: PrefixType = PrefixType::IPv6;

    fn cidr(&self) -> &str {
        &self.ipv6_prefix
    }

    fn region(&self) -> &str {
        &self.region
    }

    fn service(&self) -> &str {
        &self.service
    }

    fn network_border_group(&self) -> &str {
        &self.network_border_group
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
