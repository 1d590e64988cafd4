use {
    alloy::primitives::Address,
    chain::Chain,
    e2e::{
        certificate::{CertificateFixture, deploy_certificate_fixture},
        fixture::FixtureLoader,
        setup::{run_dev_test, run_test},
    },
    rstest::rstest,
};

const URI: &str = "http://example.com";

async fn fixture(fixtures: &FixtureLoader) -> CertificateFixture {
    fixtures
        .load_fixture(deploy_certificate_fixture)
        .await
        .unwrap()
}

async fn should_set_the_right_owner(fixtures: &FixtureLoader) {
    let fixture = fixture(fixtures).await;

    assert_eq!(fixture.owner().await.unwrap(), fixture.owner.address());
}

async fn should_mint_to_other_account(fixtures: &FixtureLoader) {
    let fixture = fixture(fixtures).await;

    fixture
        .safe_mint(&fixture.other_account, URI)
        .await
        .unwrap();

    assert_eq!(
        fixture.owner_of(0).await.unwrap(),
        fixture.other_account.address()
    );
}

async fn ownership(chain: Chain) {
    should_set_the_right_owner(&FixtureLoader::new(chain)).await;
}

async fn minting(chain: Chain) {
    should_mint_to_other_account(&FixtureLoader::new(chain)).await;
}

/// Both scenarios on one fixture loader, minting first. Each sees the
/// pristine post-deployment state.
async fn scenarios_are_isolated(chain: Chain) {
    let fixtures = FixtureLoader::new(chain);

    should_mint_to_other_account(&fixtures).await;
    should_set_the_right_owner(&fixtures).await;
    let fixture = fixture(&fixtures).await;
    assert!(fixture.owner_of(0).await.is_err());
    should_mint_to_other_account(&fixtures).await;
}

#[tokio::test]
async fn dev_certificate_ownership() {
    run_dev_test(ownership).await;
}

#[tokio::test]
async fn dev_certificate_minting() {
    run_dev_test(minting).await;
}

#[tokio::test]
async fn dev_certificate_scenarios_are_isolated() {
    run_dev_test(scenarios_are_isolated).await;
}

#[rstest]
#[case::first_signer(0)]
#[case::other_signer(5)]
#[tokio::test]
async fn dev_certificate_owner_is_any_deployer(#[case] deployer: usize) {
    run_dev_test(|chain| async move {
        let signers = chain.signers().await.unwrap();
        let owner = signers[deployer];
        let certificate = chain
            .contract_factory(contracts::CERTIFICATE)
            .unwrap()
            .deploy(&owner, &[chain::DynSolValue::Address(owner.address())])
            .await
            .unwrap()
            .wait_for_deployment()
            .await
            .unwrap();

        let recorded = certificate.call_one("owner", &[]).await.unwrap();
        assert_eq!(recorded.as_address(), Some(owner.address()));
    })
    .await;
}

#[rstest]
#[case::example(URI)]
#[case::ipfs("ipfs://bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi")]
#[case::single_char("x")]
#[tokio::test]
async fn dev_certificate_mint_with_any_uri(#[case] uri: &'static str) {
    run_dev_test(|chain| async move {
        let fixture = deploy_certificate_fixture(chain).await.unwrap();

        fixture.safe_mint(&fixture.other_account, uri).await.unwrap();

        assert_eq!(
            fixture.owner_of(0).await.unwrap(),
            fixture.other_account.address()
        );
        assert_ne!(fixture.owner_of(0).await.unwrap(), Address::ZERO);
    })
    .await;
}

#[tokio::test]
#[ignore]
async fn local_node_certificate_ownership() {
    run_test(ownership).await;
}

#[tokio::test]
#[ignore]
async fn local_node_certificate_minting() {
    run_test(minting).await;
}

#[tokio::test]
#[ignore]
async fn local_node_certificate_scenarios_are_isolated() {
    run_test(scenarios_are_isolated).await;
}
