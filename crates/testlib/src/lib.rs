//! Stand-ins for the project's contracts on the in-memory [`DevChain`].
//!
//! The implementations only reproduce what callers can observe through the
//! contracts' public functions.

pub mod args;
pub mod certificate;
pub mod greeter;

use chain::dev::DevChain;

/// Dev chain with the default accounts and every contract of the project
/// registered under its artifact name.
pub fn dev_chain() -> DevChain {
    DevChain::default()
        .with_contract(contracts::GREETER, greeter::Greeter)
        .with_contract(contracts::CERTIFICATE, certificate::Certificate)
}

#[cfg(test)]
mod tests {
    use {super::*, chain::ChainClient};

    #[tokio::test]
    async fn knows_project_contracts() {
        let chain = dev_chain();

        assert!(chain.contract_factory(contracts::GREETER).is_ok());
        assert!(chain.contract_factory(contracts::CERTIFICATE).is_ok());
        assert!(chain.contract_factory("Lock").unwrap_err().is_unknown_contract());
    }
}
