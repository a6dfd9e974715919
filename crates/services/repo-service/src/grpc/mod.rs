//! gRPC surface.

mod repo_grpc;

pub use repo_grpc::RepoGrpcService;
