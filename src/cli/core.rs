use crate::cli;
use ipranges::{Mode, Query, QueryBuilder, Result};

/*-------------------------------------------------------------------------------------------------
  Core functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Select the query mode from CLI arguments
--------------------------------------------------------------------------------------*/

/// The first list flag set (CIDRs, regions, services) wins; no list flag
/// selects the search.
pub fn select_mode(args: &cli::Args) -> Mode {
    if args.list_cidrs {
        Mode::ListCidrs
    } else if args.list_regions {
        Mode::ListRegions
    } else if args.list_services {
        Mode::ListServices
    } else {
        Mode::Search
    }
}

/*--------------------------------------------------------------------------------------
  Build the query from CLI arguments
--------------------------------------------------------------------------------------*/

pub fn build_query(args: &cli::Args) -> Result<Query> {
    let mut builder = QueryBuilder::new().mode(select_mode(args));

    if let Some(ip) = &args.ip {
        builder = builder.ip(ip)?;
    }
    if let Some(region) = &args.region {
        builder = builder.region(region.as_str());
    }
    if let Some(service) = &args.service {
        builder = builder.service(service.as_str());
    }

    Ok(builder.build())
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
