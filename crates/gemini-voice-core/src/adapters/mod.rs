//! Default implementations of the collaborator ports.

mod credentials;
mod observer;
mod packager;
mod parameters;

pub use credentials::{CredentialChain, EnvCredentials, FileCredentials, StaticCredentials};
pub use observer::{snippet, TracingObserver};
pub use packager::InlineBinaryPackager;
pub use parameters::ItemParameters;
