/*-------------------------------------------------------------------------------------------------
  Utilities
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  IP Network Supplemental Functions
--------------------------------------------------------------------------------------*/

pub mod ipnetwork {
    use crate::core::errors::{Error, Result};
    use ipnetwork::IpNetwork;
    use std::net::IpAddr;

    /*
        Published CIDRs are trusted data; a CIDR that does not parse is a
        malformed document, not bad user input.

        Host bits are accepted (`10.0.0.1/8` is the network 10.0.0.0/8), the
        same as IpNetwork's own parser. A bare address is not a CIDR, although
        IpNetwork would read it as a /32 or /128.
    */

    pub fn parse_network(cidr: &str) -> Result<IpNetwork> {
        if cidr.split_once('/').is_none() {
            return Err(Error::MalformedData(format!(
                "invalid CIDR {cidr:?}: missing prefix length"
            )));
        }

        cidr.parse::<IpNetwork>()
            .map_err(|error| Error::MalformedData(format!("invalid CIDR {cidr:?}: {error}")))
    }

    /*
        IpNetwork::contains() never matches an address of the other family, so
        an IPv4 address is never contained by an IPv6 network (or vice versa).
    */

    pub fn contains(network: &IpNetwork, ip: IpAddr) -> bool {
        network.contains(ip)
    }

    /// Parse a target IP address; IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`)
    /// are converted to the IPv4 address they carry.
    pub fn parse_ip(value: &str) -> Result<IpAddr> {
        value
            .parse::<IpAddr>()
            .map(|ip| ip.to_canonical())
            .map_err(|_| Error::InvalidInput(format!("invalid IP address: {value:?}")))
    }

}
