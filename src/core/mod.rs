/*-------------------------------------------------------------------------------------------------
  Core Modules
-------------------------------------------------------------------------------------------------*/

pub mod client;
pub mod engine;
pub mod errors;
pub mod json;
pub mod prefix;
pub mod query;
pub mod render;
pub mod results;
pub mod utils;
