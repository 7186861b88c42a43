//! Query the published AWS IP address ranges.
//!
//! The [Client] retrieves the `ip-ranges.json` document (caching it for the
//! calendar day) and decodes it into [IpRanges]. A [Query] built with the
//! [QueryBuilder] is then run against the ranges with [execute]: search for the
//! prefix containing an IP address, filter by region and service, or list the
//! CIDRs, regions, and services. [render] serializes any result to JSON.
//!
//! ```no_run
//! # fn main() -> ipranges::Result<()> {
//! let ip_ranges = ipranges::get_ranges()?;
//!
//! let query = ipranges::QueryBuilder::new()
//!     .ip("3.5.140.2")?
//!     .build();
//! let result = ipranges::execute(&ip_ranges, &query)?;
//!
//! if let Some(json) = ipranges::render(&result, false)? {
//!     println!("{json}");
//! }
//! # Ok(())
//! # }
//! ```

mod core;

/*-------------------------------------------------------------------------------------------------
  Library Interface
-------------------------------------------------------------------------------------------------*/

pub use crate::core::client::{cache_file_name, get_ranges, Client, ClientBuilder};
pub use crate::core::engine::{execute, list_cidrs, list_regions, list_services, search};
pub use crate::core::errors::{Error, ErrorKind, Result};
pub use crate::core::json::{IpPrefix, IpRanges, Ipv6Prefix};
pub use crate::core::prefix::{Prefix, PrefixType};
pub use crate::core::query::{Mode, Query, QueryBuilder};
pub use crate::core::render::render;
pub use crate::core::results::{Cidrs, QueryResult, Regions, Services};
