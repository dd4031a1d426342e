//! Gateway connectors. Each connector module owns the transformation from
//! store snapshots into its gateway's request wire format.

pub mod connectors;
