//! Deploys a Greeter, reads its greeting, updates it and reads it again.

pub mod arguments;

use {
    alloy::primitives::Address,
    anyhow::{Context, Result},
    chain::{Account, Chain, Contract, DynSolValue},
    std::sync::Arc,
};

/// What the workflow observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub address: Address,
    pub initial_greeting: String,
    pub updated_greeting: String,
}

/// Runs the workflow with `deployer` as the sender of every transaction.
pub async fn run(
    chain: &Chain,
    deployer: &Account,
    initial_greeting: &str,
    new_greeting: &str,
) -> Result<Outcome> {
    let factory = chain
        .contract_factory(contracts::GREETER)
        .context("Greeter contract is unavailable")?;

    let greeter = factory
        .deploy(deployer, &[DynSolValue::String(initial_greeting.to_string())])
        .await
        .context("failed to submit Greeter deployment")?
        .wait_for_deployment()
        .await
        .context("Greeter deployment failed")?;
    tracing::info!(address = %greeter.address(), %deployer, "Greeter deployed");

    let initial = greet(&greeter).await?;
    tracing::info!(greeting = %initial, "read greeting");

    let pending = greeter
        .send(
            deployer,
            "setGreeting",
            &[DynSolValue::String(new_greeting.to_string())],
        )
        .await
        .context("failed to submit setGreeting")?;
    tracing::info!(tx_hash = ?pending.tx_hash(), "setGreeting submitted");
    let receipt = pending.wait().await.context("setGreeting failed")?;
    tracing::info!(block = ?receipt.block_number, "setGreeting mined");

    let updated = greet(&greeter).await?;
    tracing::info!(greeting = %updated, "read greeting");

    Ok(Outcome {
        address: greeter.address(),
        initial_greeting: initial,
        updated_greeting: updated,
    })
}

/// Connects to the node described by `args` and runs the workflow from its
/// first account.
pub async fn start(args: arguments::Arguments) -> Result<Outcome> {
    let artifacts = contracts::Artifacts::load(&args.artifacts)
        .with_context(|| format!("failed to load artifacts from {}", args.artifacts.display()))?;
    anyhow::ensure!(
        !artifacts.is_empty(),
        "no contract artifacts found in {}, compile the contracts first",
        args.artifacts.display()
    );
    let client = chain::rpc::RpcChainClient::connect(&args.node_url, Arc::new(artifacts))
        .with_confirmation_timeout(args.confirmation_timeout);
    let chain = Chain::new(Arc::new(client));

    let deployer = chain
        .signers()
        .await
        .context("failed to query node accounts")?
        .into_iter()
        .next()
        .context("node manages no accounts")?;

    run(&chain, &deployer, &args.initial_greeting, &args.new_greeting).await
}

async fn greet(greeter: &Contract) -> Result<String> {
    let value = greeter.call_one("greet", &[]).await.context("greet() failed")?;
    value
        .as_str()
        .map(str::to_string)
        .with_context(|| format!("greet() returned {value:?} instead of a string"))
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        chain::{ContractFactory, MockChainClient, Receipt, TxHash, dev::DevChain},
        mockall::Sequence,
        rstest::rstest,
    };

    fn with_client(client: impl chain::ChainClient + 'static) -> Chain {
        Chain::new(Arc::new(client))
    }

    #[tokio::test]
    async fn greets_and_updates() {
        let dev = testlib::dev_chain();
        let deployer = chain::ChainClient::signers(&dev).await.unwrap()[0];

        let outcome = run(&with_client(dev), &deployer, "Hello, Hardhat!", "Hola, mundo!")
            .await
            .unwrap();

        assert_eq!(outcome.initial_greeting, "Hello, Hardhat!");
        assert_eq!(outcome.updated_greeting, "Hola, mundo!");
        assert_eq!(outcome.address, deployer.address().create(0));
    }

    #[rstest]
    #[case::empty("", "x")]
    #[case::unicode("¡Hola! 👋", "こんにちは")]
    #[case::unchanged("same", "same")]
    #[tokio::test]
    async fn reads_reflect_confirmed_writes(#[case] initial: &str, #[case] new: &str) {
        let dev = testlib::dev_chain();
        let deployer = chain::ChainClient::signers(&dev).await.unwrap()[3];

        let outcome = run(&with_client(dev), &deployer, initial, new).await.unwrap();

        assert_eq!(outcome.initial_greeting, initial);
        assert_eq!(outcome.updated_greeting, new);
    }

    #[tokio::test]
    async fn pending_update_is_invisible_until_mined() {
        let chain = with_client(testlib::dev_chain());
        let deployer = chain.signers().await.unwrap()[0];
        let greeter = chain
            .contract_factory(contracts::GREETER)
            .unwrap()
            .deploy(&deployer, &[DynSolValue::String("Hello, Hardhat!".into())])
            .await
            .unwrap()
            .wait_for_deployment()
            .await
            .unwrap();

        let pending = greeter
            .send(
                &deployer,
                "setGreeting",
                &[DynSolValue::String("Hola, mundo!".into())],
            )
            .await
            .unwrap();
        assert_eq!(greet(&greeter).await.unwrap(), "Hello, Hardhat!");

        pending.wait().await.unwrap();
        assert_eq!(greet(&greeter).await.unwrap(), "Hola, mundo!");
    }

    #[tokio::test]
    async fn missing_artifact_is_fatal() {
        let dev = DevChain::default();
        let deployer = chain::ChainClient::signers(&dev).await.unwrap()[0];

        let err = run(&with_client(dev), &deployer, "a", "b").await.unwrap_err();

        assert!(
            err.downcast_ref::<chain::Error>()
                .is_some_and(chain::Error::is_unknown_contract)
        );
    }

    #[tokio::test]
    async fn uncompiled_artifacts_are_fatal() {
        use {clap::Parser, std::ffi::OsStr};
        let dir = tempfile::tempdir().unwrap();
        let args = arguments::Arguments::try_parse_from([
            OsStr::new("greeter"),
            OsStr::new("--artifacts"),
            dir.path().as_os_str(),
        ])
        .unwrap();

        let err = start(args).await.unwrap_err();

        assert!(err.to_string().contains("no contract artifacts found"));
    }

    #[tokio::test]
    async fn unknown_deployer_is_rejected() {
        let stranger = Account::new(Address::repeat_byte(0x55));

        let err = run(&with_client(testlib::dev_chain()), &stranger, "a", "b")
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<chain::Error>(),
            Some(chain::Error::UnknownAccount(_))
        ));
    }

    #[tokio::test]
    async fn every_transaction_comes_from_the_deployer_and_is_awaited() {
        let deployer = Account::new(Address::with_last_byte(7));
        let greeter_address = Address::with_last_byte(0xaa);
        let deploy_tx = TxHash::with_last_byte(1);
        let update_tx = TxHash::with_last_byte(2);
        let receipt = |hash: TxHash, contract_address: Option<Address>| Receipt {
            transaction_hash: hash,
            block_number: Some(1),
            gas_used: 0,
            contract_address,
        };
        let greeting = |value: &str| -> chain::Result<Vec<DynSolValue>> {
            Ok(vec![DynSolValue::String(value.to_string())])
        };

        let mut seq = Sequence::new();
        let mut client = MockChainClient::new();
        client.expect_contract_factory().returning(|name| {
            Ok(ContractFactory::new(name, Default::default(), Default::default()))
        });
        client
            .expect_deploy()
            .withf(move |_, from, _| *from == deployer)
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_, _, _| Ok(deploy_tx));
        client
            .expect_wait_for_receipt()
            .withf(move |hash| *hash == deploy_tx)
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |hash| Ok(receipt(hash, Some(greeter_address))));
        client
            .expect_call()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_, _, _| greeting("Hello, Hardhat!"));
        client
            .expect_send()
            .withf(move |handle, from, method, args| {
                handle.address() == greeter_address
                    && *from == deployer
                    && method == "setGreeting"
                    && args == [DynSolValue::String("Hola, mundo!".into())]
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_, _, _, _| Ok(update_tx));
        client
            .expect_wait_for_receipt()
            .withf(move |hash| *hash == update_tx)
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |hash| Ok(receipt(hash, None)));
        client
            .expect_call()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_, _, _| greeting("Hola, mundo!"));

        let outcome = run(&with_client(client), &deployer, "Hello, Hardhat!", "Hola, mundo!")
            .await
            .unwrap();

        assert_eq!(
            outcome,
            Outcome {
                address: greeter_address,
                initial_greeting: "Hello, Hardhat!".into(),
                updated_greeting: "Hola, mundo!".into(),
            }
        );
    }

    #[tokio::test]
    async fn reverted_update_is_fatal() {
        let mut client = MockChainClient::new();
        client.expect_contract_factory().returning(|name| {
            Ok(ContractFactory::new(name, Default::default(), Default::default()))
        });
        client
            .expect_deploy()
            .returning(|_, _, _| Ok(TxHash::with_last_byte(1)));
        client
            .expect_wait_for_receipt()
            .withf(|hash| *hash == TxHash::with_last_byte(1))
            .returning(|hash| {
                Ok(Receipt {
                    transaction_hash: hash,
                    block_number: Some(1),
                    gas_used: 0,
                    contract_address: Some(Address::with_last_byte(1)),
                })
            });
        client
            .expect_call()
            .returning(|_, _, _| Ok(vec![DynSolValue::String("Hello".into())]));
        client
            .expect_send()
            .returning(|_, _, _, _| Ok(TxHash::with_last_byte(2)));
        client
            .expect_wait_for_receipt()
            .withf(|hash| *hash == TxHash::with_last_byte(2))
            .returning(|_| {
                Err(chain::Error::Reverted {
                    reason: "out of gas".into(),
                })
            });

        let err = run(&with_client(client), &Account::new(Address::ZERO), "Hello", "Hola")
            .await
            .unwrap_err();

        assert!(format!("{err:?}").contains("setGreeting failed"));
    }
}
