//! Adapters implementing the KYC service port

mod remote;

pub use remote::{RemoteKycAdapter, RemoteKycConfig};
