use crate::core::errors::Result;
use crate::core::json::IpRanges;
use crate::core::prefix::Prefix;
use crate::core::query::{Mode, Query};
use crate::core::results::{Cidrs, QueryResult, Regions, Services};
use crate::core::utils;
use log::{debug, trace};
use std::collections::HashSet;

/*-------------------------------------------------------------------------------------------------
  Execute
-------------------------------------------------------------------------------------------------*/

/// Run a [Query] against the IP ranges.
///
/// ```rust
/// # fn main() -> ipranges::Result<()> {
/// let ip_ranges = ipranges::IpRanges::from_json(r#"{
///     "syncToken": "1640995200",
///     "createDate": "2022-01-01-00-00-00",
///     "prefixes": [
///         {"ip_prefix": "10.0.0.0/8", "region": "us-east-1", "service": "EC2", "network_border_group": "us-east-1"}
///     ],
///     "ipv6_prefixes": []
/// }"#)?;
///
/// let query = ipranges::QueryBuilder::new().ip("10.1.2.3")?.build();
/// match ipranges::execute(&ip_ranges, &query)? {
///     ipranges::QueryResult::Prefixes(found) => assert_eq!(found.prefixes.len(), 1),
///     _ => unreachable!(),
/// }
/// # Ok(())
/// # }
/// ```
pub fn execute(ip_ranges: &IpRanges, query: &Query) -> Result<QueryResult> {
    debug!("Execute {:?} query", query.mode());
    match query.mode() {
        Mode::Search => search(ip_ranges, query).map(QueryResult::Prefixes),
        Mode::ListCidrs => Ok(QueryResult::Cidrs(list_cidrs(ip_ranges))),
        Mode::ListRegions => Ok(QueryResult::Regions(list_regions(ip_ranges))),
        Mode::ListServices => Ok(QueryResult::Services(list_services(ip_ranges))),
    }
}

/*-------------------------------------------------------------------------------------------------
  List CIDRs
-------------------------------------------------------------------------------------------------*/

/// Every IPv4 CIDR followed by every IPv6 CIDR, in document order, without
/// filtering or de-duplication.
pub fn list_cidrs(ip_ranges: &IpRanges) -> Cidrs {
    Cidrs {
        sync_token: ip_ranges.sync_token.clone(),
        create_date: ip_ranges.create_date.clone(),
        ipv4_cidrs: ip_ranges
            .prefixes
            .iter()
            .map(|prefix| prefix.cidr().to_string())
            .collect(),
        ipv6_cidrs: ip_ranges
            .ipv6_prefixes
            .iter()
            .map(|prefix| prefix.cidr().to_string())
            .collect(),
    }
}

/*-------------------------------------------------------------------------------------------------
  List Regions and Services
-------------------------------------------------------------------------------------------------*/

/// Distinct regions, in first-seen order across the IPv4 then IPv6 prefixes.
pub fn list_regions(ip_ranges: &IpRanges) -> Regions {
    let regions = ip_ranges
        .prefixes
        .iter()
        .map(|prefix| prefix.region())
        .chain(ip_ranges.ipv6_prefixes.iter().map(|prefix| prefix.region()));

    Regions {
        sync_token: ip_ranges.sync_token.clone(),
        create_date: ip_ranges.create_date.clone(),
        regions: distinct(regions),
    }
}

/// Distinct services, in first-seen order across the IPv4 then IPv6 prefixes.
pub fn list_services(ip_ranges: &IpRanges) -> Services {
    let services = ip_ranges
        .prefixes
        .iter()
        .map(|prefix| prefix.service())
        .chain(ip_ranges.ipv6_prefixes.iter().map(|prefix| prefix.service()));

    Services {
        sync_token: ip_ranges.sync_token.clone(),
        create_date: ip_ranges.create_date.clone(),
        services: distinct(services),
    }
}

/// Keep the first occurrence of each label (exact, case-sensitive match).
fn distinct<'r, I>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = &'r str>,
{
    let mut seen: HashSet<&str> = HashSet::new();
    labels
        .into_iter()
        .filter(|label| seen.insert(*label))
        .map(str::to_string)
        .collect()
}

/*-------------------------------------------------------------------------------------------------
  Search
-------------------------------------------------------------------------------------------------*/

/// Prune the IP ranges to the prefixes matching the query's filters.
///
/// With a target IP the search stops at the first prefix (IPv4 prefixes first,
/// then IPv6, in document order) whose network contains the address, so the
/// result holds at most one prefix. Every CIDR visited is parsed, including
/// prefixes the region and service filters exclude; one malformed CIDR fails
/// the whole search.
pub fn search(ip_ranges: &IpRanges, query: &Query) -> Result<IpRanges> {
    let mut result = ip_ranges.empty_copy();

    match search_prefixes(&ip_ranges.prefixes, query)? {
        Matches::First(prefix) => {
            result.prefixes.push(prefix.clone());
            return Ok(result);
        }
        Matches::All(prefixes) => result.prefixes = prefixes,
    }

    match search_prefixes(&ip_ranges.ipv6_prefixes, query)? {
        Matches::First(prefix) => result.ipv6_prefixes.push(prefix.clone()),
        Matches::All(prefixes) => result.ipv6_prefixes = prefixes,
    }

    if query.ip().is_some() && result.is_empty() {
        debug!("No prefix contains the target IP");
    }

    Ok(result)
}

/// Outcome of searching one prefix list.
enum Matches<'r, P> {
    /// The first prefix containing the target IP; ends the search.
    First(&'r P),

    /// Every prefix passing the filters (no target IP, or no prefix contained it).
    All(Vec<P>),
}

fn search_prefixes<'r, P>(prefixes: &'r [P], query: &Query) -> Result<Matches<'r, P>>
where
    P: Prefix + Clone,
{
    let mut matches: Vec<P> = Vec::new();

    for prefix in prefixes {
        let network = utils::ipnetwork::parse_network(prefix.cidr())?;

        if !query.includes(prefix.region(), prefix.service()) {
            continue;
        }

        match query.ip() {
            Some(ip) if utils::ipnetwork::contains(&network, ip) => {
                debug!(
                    "{:?} prefix {} ({}, {}, network border group {}) contains {ip}",
                    P::PREFIX_TYPE,
                    prefix.cidr(),
                    prefix.region(),
                    prefix.service(),
                    prefix.network_border_group()
                );
                return Ok(Matches::First(prefix));
            }
            Some(_) => {
                trace!("{} does not contain the target IP", prefix.cidr());
            }
            None => matches.push(prefix.clone()),
        }
    }

    Ok(Matches::All(matches))
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::{log_error, ErrorKind};
    use crate::core::json::tests::{test_ip_ranges, test_ipv4_prefix, test_ipv6_prefix};
    use crate::core::query::QueryBuilder;
    use test_log::test;

    fn two_entry_ip_ranges() -> IpRanges {
        IpRanges {
            sync_token: "1".to_string(),
            create_date: "2022-01-01-00-00-00".to_string(),
            prefixes: vec![
                test_ipv4_prefix("10.0.0.0/8", "us-east-1", "EC2"),
                test_ipv4_prefix("10.0.0.0/8", "us-east-1", "S3"),
            ],
            ipv6_prefixes: vec![],
        }
    }

    fn search_ip(ip_ranges: &IpRanges, ip: &str) -> IpRanges {
        let query = QueryBuilder::new().ip(ip).unwrap().build();
        search(ip_ranges, &query).inspect_err(log_error).unwrap()
    }

    /*-------------------------------------------------------------------------
      Execute
    -------------------------------------------------------------------------*/

    #[test]
    fn test_execute_dispatches_on_mode() {
        let ip_ranges = test_ip_ranges();

        let cases = [
            (Mode::Search, "prefixes"),
            (Mode::ListCidrs, "cidrs"),
            (Mode::ListRegions, "regions"),
            (Mode::ListServices, "services"),
        ];

        for (mode, expected) in cases {
            let query = QueryBuilder::new().mode(mode).build();
            let result = execute(&ip_ranges, &query).unwrap();
            let actual = match result {
                QueryResult::Prefixes(_) => "prefixes",
                QueryResult::Cidrs(_) => "cidrs",
                QueryResult::Regions(_) => "regions",
                QueryResult::Services(_) => "services",
            };
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_list_modes_ignore_filters() {
        let ip_ranges = test_ip_ranges();
        let query = QueryBuilder::new()
            .region("no-such-region")
            .mode(Mode::ListCidrs)
            .build();

        match execute(&ip_ranges, &query).unwrap() {
            QueryResult::Cidrs(cidrs) => assert_eq!(cidrs.len(), ip_ranges.len()),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    /*-------------------------------------------------------------------------
      List CIDRs
    -------------------------------------------------------------------------*/

    #[test]
    fn test_list_cidrs_preserves_order_and_duplicates() {
        let ip_ranges = test_ip_ranges();
        let cidrs = list_cidrs(&ip_ranges);

        assert_eq!(cidrs.len(), ip_ranges.len());
        assert_eq!(
            cidrs.iter().collect::<Vec<_>>(),
            [
                "10.0.0.0/8",
                "10.0.0.0/8",
                "192.168.0.0/16",
                "2001:db8::/32",
                "2001:db8:1000::/36",
            ]
        );
        assert_eq!(cidrs.sync_token, ip_ranges.sync_token);
        assert_eq!(cidrs.create_date, ip_ranges.create_date);
    }

    #[test]
    fn test_list_cidrs_does_not_validate() {
        let mut ip_ranges = test_ip_ranges();
        ip_ranges.prefixes[0].ip_prefix = "garbage".to_string();
        assert_eq!(list_cidrs(&ip_ranges).ipv4_cidrs[0], "garbage");
    }

    /*-------------------------------------------------------------------------
      List Regions and Services
    -------------------------------------------------------------------------*/

    #[test]
    fn test_list_regions_deduplicated() {
        let regions = list_regions(&two_entry_ip_ranges());
        assert_eq!(regions.regions, ["us-east-1"]);
    }

    #[test]
    fn test_list_regions_first_seen_order_across_families() {
        let regions = list_regions(&test_ip_ranges());
        assert_eq!(regions.regions, ["us-east-1", "eu-west-1", "us-west-2"]);
    }

    #[test]
    fn test_list_services_first_seen_order_across_families() {
        let services = list_services(&test_ip_ranges());
        assert_eq!(services.services, ["EC2", "S3", "AMAZON", "ROUTE53"]);
    }

    #[test]
    fn test_distinct_is_case_sensitive() {
        let labels = ["EC2", "ec2", "EC2", "S3"];
        assert_eq!(distinct(labels), ["EC2", "ec2", "S3"]);
    }

    #[test]
    fn test_list_on_empty_ip_ranges() {
        let ip_ranges = IpRanges::default();
        assert!(list_regions(&ip_ranges).regions.is_empty());
        assert!(list_services(&ip_ranges).services.is_empty());
        assert!(list_cidrs(&ip_ranges).is_empty());
    }

    /*-------------------------------------------------------------------------
      Search: Filters
    -------------------------------------------------------------------------*/

    #[test]
    fn test_search_without_filters_returns_everything() {
        let ip_ranges = test_ip_ranges();
        let result = search(&ip_ranges, &Query::default()).unwrap();
        assert_eq!(result, ip_ranges);
    }

    #[test]
    fn test_search_region_keeps_order() {
        let ip_ranges = two_entry_ip_ranges();
        let query = QueryBuilder::new().region("us-east-1").build();
        let result = search(&ip_ranges, &query).unwrap();

        assert_eq!(result.prefixes, ip_ranges.prefixes);
        assert!(result.ipv6_prefixes.is_empty());
    }

    #[test]
    fn test_search_region_across_families() {
        let query = QueryBuilder::new().region("us-east-1").build();
        let result = search(&test_ip_ranges(), &query).unwrap();

        assert_eq!(result.prefixes.len(), 2);
        assert_eq!(
            result.ipv6_prefixes,
            [test_ipv6_prefix("2001:db8:1000::/36", "us-east-1", "ROUTE53")]
        );
    }

    #[test]
    fn test_search_region_and_service() {
        let query = QueryBuilder::new().region("us-east-1").service("S3").build();
        let result = search(&test_ip_ranges(), &query).unwrap();

        assert_eq!(
            result.prefixes,
            [test_ipv4_prefix("10.0.0.0/8", "us-east-1", "S3")]
        );
        assert!(result.ipv6_prefixes.is_empty());
    }

    #[test]
    fn test_search_filter_matching_nothing_is_empty() {
        let ip_ranges = test_ip_ranges();
        for query in [
            QueryBuilder::new().region("US-EAST-1").build(),
            QueryBuilder::new().service("ec2").build(),
            QueryBuilder::new().region("eu-west-1").service("EC2").build(),
        ] {
            let result = search(&ip_ranges, &query).unwrap();
            assert!(result.is_empty(), "{query:?}");
            assert_eq!(result.sync_token, ip_ranges.sync_token);
            assert_eq!(result.create_date, ip_ranges.create_date);
        }
    }

    /*-------------------------------------------------------------------------
      Search: Target IP
    -------------------------------------------------------------------------*/

    #[test]
    fn test_search_ip_returns_first_match_only() {
        let result = search_ip(&two_entry_ip_ranges(), "10.1.2.3");
        assert_eq!(
            result.prefixes,
            [test_ipv4_prefix("10.0.0.0/8", "us-east-1", "EC2")]
        );
        assert!(result.ipv6_prefixes.is_empty());
    }

    #[test]
    fn test_search_ip_first_match_in_document_order() {
        let mut ip_ranges = test_ip_ranges();
        ip_ranges.prefixes.insert(
            0,
            test_ipv4_prefix("192.168.1.0/24", "ap-south-1", "CLOUDFRONT"),
        );

        // The broader 192.168.0.0/16 appears later and is never considered
        let result = search_ip(&ip_ranges, "192.168.1.10");
        assert_eq!(result.prefixes.len(), 1);
        assert_eq!(result.prefixes[0].ip_prefix, "192.168.1.0/24");
    }

    #[test]
    fn test_search_ipv6() {
        let result = search_ip(&test_ip_ranges(), "2001:db8::1");
        assert!(result.prefixes.is_empty());
        assert_eq!(
            result.ipv6_prefixes,
            [test_ipv6_prefix("2001:db8::/32", "us-west-2", "AMAZON")]
        );
    }

    #[test]
    fn test_search_ip_with_service_filter() {
        let ip_ranges = two_entry_ip_ranges();
        let query = QueryBuilder::new()
            .ip("10.1.2.3")
            .unwrap()
            .service("S3")
            .build();
        let result = search(&ip_ranges, &query).unwrap();
        assert_eq!(result.prefixes, [ip_ranges.prefixes[1].clone()]);
    }

    #[test]
    fn test_search_ip_not_found_is_empty() {
        let ip_ranges = test_ip_ranges();
        for ip in ["8.8.8.8", "2600::1"] {
            let result = search_ip(&ip_ranges, ip);
            assert!(result.prefixes.is_empty());
            assert!(result.ipv6_prefixes.is_empty());
        }
    }

    #[test]
    fn test_search_ip_never_matches_other_family() {
        let ip_ranges = IpRanges {
            prefixes: vec![test_ipv4_prefix("0.0.0.0/0", "global", "AMAZON")],
            ipv6_prefixes: vec![test_ipv6_prefix("::/0", "global", "AMAZON")],
            ..IpRanges::default()
        };

        let result = search_ip(&ip_ranges, "10.0.0.1");
        assert_eq!(result.prefixes.len(), 1);
        assert!(result.ipv6_prefixes.is_empty());

        let result = search_ip(&ip_ranges, "2001:db8::1");
        assert!(result.prefixes.is_empty());
        assert_eq!(result.ipv6_prefixes.len(), 1);
    }

    #[test]
    fn test_search_ip_at_most_one_match() {
        let ip_ranges = test_ip_ranges();
        for ip in ["10.0.0.1", "10.255.255.255", "192.168.3.4", "2001:db8:1000::1"] {
            let result = search_ip(&ip_ranges, ip);
            assert_eq!(result.len(), 1, "{ip}");
        }
    }

    #[test]
    fn test_search_ipv4_mapped_address() {
        let result = search_ip(&two_entry_ip_ranges(), "::ffff:10.1.2.3");
        assert_eq!(
            result.prefixes,
            [test_ipv4_prefix("10.0.0.0/8", "us-east-1", "EC2")]
        );
        assert!(result.ipv6_prefixes.is_empty());
    }

    /*-------------------------------------------------------------------------
      Search: Malformed Data
    -------------------------------------------------------------------------*/

    #[test]
    fn test_search_bare_address_is_malformed() {
        let ip_ranges = IpRanges {
            prefixes: vec![test_ipv4_prefix("10.0.0.1", "us-east-1", "EC2")],
            ..IpRanges::default()
        };

        let error = search(&ip_ranges, &Query::default()).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MalformedData);
        assert!(error.to_string().contains("10.0.0.1"));
    }

    #[test]
    fn test_search_malformed_cidr_fails() {
        let mut ip_ranges = test_ip_ranges();
        ip_ranges.ipv6_prefixes[1].ipv6_prefix = "2001:db8:1000::/200".to_string();

        let error = search(&ip_ranges, &Query::default()).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MalformedData);
    }

    #[test]
    fn test_search_malformed_cidr_fails_even_when_filtered_out() {
        let mut ip_ranges = test_ip_ranges();
        ip_ranges.prefixes[2].ip_prefix = "192.168.0.0/99".to_string();

        // The malformed prefix is in eu-west-1; the filter selects us-east-1
        let query = QueryBuilder::new().region("us-east-1").build();
        let error = search(&ip_ranges, &query).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MalformedData);

        let query = QueryBuilder::new().ip("8.8.8.8").unwrap().build();
        let error = search(&ip_ranges, &query).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MalformedData);
    }

    #[test]
    fn test_search_stops_before_later_malformed_cidr() {
        let mut ip_ranges = test_ip_ranges();
        ip_ranges.ipv6_prefixes[0].ipv6_prefix = "bad".to_string();

        let result = search_ip(&ip_ranges, "10.1.2.3");
        assert_eq!(result.prefixes.len(), 1);
    }
}
