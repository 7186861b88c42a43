use clap::Parser;

/*-------------------------------------------------------------------------------------------------
  Command Line Interface (CLI) Arguments
-------------------------------------------------------------------------------------------------*/

#[derive(Parser, Debug)]
#[command(author, version, about = "Query the AWS IP ranges.", long_about = None)]
pub struct Args {
    /// Find the prefix containing this IP address
    #[arg(short = 'i', long, value_name = "IP")]
    pub ip: Option<String>,

    /// Include prefixes from this AWS Region (exact match)
    #[arg(short = 'r', long)]
    pub region: Option<String>,

    /// Include prefixes used by this AWS Service (exact match)
    #[arg(short = 's', long)]
    pub service: Option<String>,

    /// Ignore today's cached ip-ranges.json and download it again
    #[arg(short = 'f', long, visible_alias = "clean")]
    pub refresh: bool,

    /// Print single-line JSON
    #[arg(short = 'c', long, visible_alias = "compress")]
    pub compact: bool,

    /// List all CIDRs
    #[arg(long = "ls-cidrs")]
    pub list_cidrs: bool,

    /// List all AWS Regions
    #[arg(long = "ls-regions")]
    pub list_regions: bool,

    /// List all AWS Services
    #[arg(long = "ls-services")]
    pub list_services: bool,

    /// Logging verbosity
    #[command(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
