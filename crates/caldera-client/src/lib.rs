pub mod gateway;
pub mod snapshot;

pub use gateway::GatewayClient;
pub use snapshot::SnapshotApi;
