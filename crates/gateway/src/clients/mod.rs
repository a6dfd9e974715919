//! gRPC clients for calling the repo service.

mod repo_client;

pub use repo_client::RepoClient;
