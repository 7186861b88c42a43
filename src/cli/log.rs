use ipranges::{IpRanges, Query, QueryResult};
use log::{info, warn};

/*-------------------------------------------------------------------------------------------------
  Logging Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  IP Ranges
--------------------------------------------------------------------------------------*/

pub fn ip_ranges(ip_ranges: &IpRanges) {
    info!(
        "Loaded IP ranges {} ({}): {} IPv4 and {} IPv6 prefixes",
        ip_ranges.sync_token,
        ip_ranges.create_date,
        ip_ranges.prefixes.len(),
        ip_ranges.ipv6_prefixes.len()
    );
}

/*--------------------------------------------------------------------------------------
  Query Result
--------------------------------------------------------------------------------------*/

pub fn query_result(query: &Query, result: &QueryResult) {
    match result {
        QueryResult::Prefixes(found) => {
            info!(
                "Found {} IPv4 and {} IPv6 prefix(es)",
                found.prefixes.len(),
                found.ipv6_prefixes.len()
            );
            if found.is_empty() {
                if let Some(ip) = query.ip() {
                    warn!("No prefix contains {ip}");
                }
            }
        }
        QueryResult::Cidrs(cidrs) => info!("Listed {} CIDR(s)", cidrs.len()),
        QueryResult::Regions(regions) => info!("Listed {} region(s)", regions.regions.len()),
        QueryResult::Services(services) => info!("Listed {} service(s)", services.services.len()),
    }
}
