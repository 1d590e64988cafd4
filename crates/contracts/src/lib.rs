//! Access to the compiled contracts of the Hardhat project: ABIs and creation
//! bytecode, looked up by contract name.
pub mod artifacts;

pub use artifacts::{Artifact, Artifacts, Error};

/// Name of the greeting contract deployed by the `greeter` binary.
pub const GREETER: &str = "Greeter";

/// Name of the certificate (ERC-721 style) contract used by the e2e tests.
pub const CERTIFICATE: &str = "Certificate";
