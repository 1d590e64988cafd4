use {
    alloy::primitives::{Address, U256},
    anyhow::{Context, Result},
    chain::{Account, Chain, Contract, DynSolValue, Receipt},
};

/// A freshly deployed Certificate owned by the first signer.
#[derive(Debug, Clone)]
pub struct CertificateFixture {
    pub certificate: Contract,
    pub owner: Account,
    pub other_account: Account,
}

/// Deploys a Certificate from the first signer and makes it the owner. The
/// second signer is handed out as an account without any role.
pub async fn deploy_certificate_fixture(chain: Chain) -> Result<CertificateFixture> {
    let signers = chain.signers().await.context("failed to query signers")?;
    let [owner, other_account, ..] = signers[..] else {
        anyhow::bail!("certificate fixture needs two signers, got {}", signers.len());
    };

    let certificate = chain
        .contract_factory(contracts::CERTIFICATE)?
        .deploy(&owner, &[DynSolValue::Address(owner.address())])
        .await
        .context("failed to submit Certificate deployment")?
        .wait_for_deployment()
        .await
        .context("Certificate deployment failed")?;
    tracing::info!(address = %certificate.address(), %owner, "Certificate deployed");

    Ok(CertificateFixture {
        certificate,
        owner,
        other_account,
    })
}

impl CertificateFixture {
    pub async fn owner(&self) -> Result<Address> {
        address(self.certificate.call_one("owner", &[]).await?)
    }

    pub async fn owner_of(&self, token_id: u64) -> Result<Address> {
        address(
            self.certificate
                .call_one("ownerOf", &[DynSolValue::Uint(U256::from(token_id), 256)])
                .await?,
        )
    }

    /// Mints the next certificate to `to` and waits for the transaction.
    pub async fn safe_mint(&self, to: &Account, uri: &str) -> Result<Receipt> {
        let receipt = self
            .certificate
            .send(
                &self.owner,
                "safeMint",
                &[
                    DynSolValue::Address(to.address()),
                    DynSolValue::String(uri.to_string()),
                ],
            )
            .await?
            .wait()
            .await
            .context("safeMint failed")?;
        Ok(receipt)
    }
}

fn address(value: DynSolValue) -> Result<Address> {
    value
        .as_address()
        .with_context(|| format!("expected an address, got {value:?}"))
}

#[cfg(test)]
mod tests {
    use {super::*, chain::dev::DevChain, std::sync::Arc};

    #[tokio::test]
    async fn needs_two_signers() {
        let chain = DevChain::new(1)
            .with_contract(contracts::CERTIFICATE, testlib::certificate::Certificate);

        let err = deploy_certificate_fixture(Chain::new(Arc::new(chain)))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("two signers"));
    }

    #[tokio::test]
    async fn owner_is_deployer() {
        let fixture = deploy_certificate_fixture(Chain::new(Arc::new(testlib::dev_chain())))
            .await
            .unwrap();

        assert_eq!(fixture.owner().await.unwrap(), fixture.owner.address());
        assert_ne!(fixture.owner, fixture.other_account);
    }
}
