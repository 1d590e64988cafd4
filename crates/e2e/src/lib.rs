pub mod certificate;
pub mod fixture;
pub mod nodes;
pub mod setup;
