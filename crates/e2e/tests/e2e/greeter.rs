use {
    chain::Chain,
    e2e::setup::{run_dev_test, run_test},
};

async fn greeter_workflow(chain: Chain) {
    let deployer = chain.signers().await.unwrap()[0];

    let outcome = greeter::run(&chain, &deployer, "Hello, Hardhat!", "Hola, mundo!")
        .await
        .unwrap();

    assert_eq!(outcome.initial_greeting, "Hello, Hardhat!");
    assert_eq!(outcome.updated_greeting, "Hola, mundo!");
}

#[tokio::test]
async fn dev_greeter_workflow() {
    run_dev_test(greeter_workflow).await;
}

#[tokio::test]
#[ignore]
async fn local_node_greeter_workflow() {
    run_test(greeter_workflow).await;
}
