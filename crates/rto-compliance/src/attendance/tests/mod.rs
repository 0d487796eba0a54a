mod aggregation;
mod caching;
mod common;
mod status;
