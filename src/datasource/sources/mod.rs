//! Datasource implementations for looking up package releases

pub mod orb;

pub use orb::OrbDatasource;
