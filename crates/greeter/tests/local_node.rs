//! Runs against a development node at `NODE_URL` with the project's compiled
//! artifacts at `ARTIFACTS`:
//!
//! ```text
//! npx hardhat compile && npx hardhat node
//! cargo test -p greeter -- --ignored
//! ```

use clap::Parser;

#[tokio::test]
#[ignore]
async fn local_node_greeter() {
    observe::tracing::initialize_reentrant(&observe::Config::new(
        "warn,greeter=debug,chain=debug",
        tracing::Level::ERROR,
    ));
    let args = greeter::arguments::Arguments::parse_from([
        "greeter",
        "--initial-greeting",
        "Hello, Hardhat!",
        "--new-greeting",
        "Hola, mundo!",
    ]);

    let outcome = greeter::start(args).await.unwrap();

    assert_eq!(outcome.initial_greeting, "Hello, Hardhat!");
    assert_eq!(outcome.updated_greeting, "Hola, mundo!");
}
