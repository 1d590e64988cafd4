use {
    crate::nodes::LocalNode,
    chain::Chain,
    futures::FutureExt,
    std::{
        future::Future,
        panic::{self, AssertUnwindSafe},
        sync::Arc,
    },
    tokio::sync::Mutex,
};

static NODE_MUTEX: Mutex<()> = Mutex::const_new(());

fn init_tracing() {
    let filters = ["warn", "chain=debug", "e2e=debug", "greeter=debug"].join(",");
    observe::tracing::initialize_reentrant(&observe::Config::new(
        &filters,
        tracing::Level::ERROR,
    ));
}

/// *Testing* function that takes a closure and runs it on the local testing
/// node. Before each test, it creates a snapshot of the current state of the
/// chain. The saved state is restored at the end of the test, also when the
/// test panics.
///
/// Note that tests calling this function will not be run simultaneously.
pub async fn run_test<F, Fut>(f: F)
where
    F: FnOnce(Chain) -> Fut,
    Fut: Future<Output = ()>,
{
    init_tracing();
    let _lock = NODE_MUTEX.lock().await;

    let node = LocalNode::connect().expect("failed to connect to the local node");
    // Start every test on a fresh block.
    node.test_node
        .mine_pending_block()
        .await
        .expect("Test network must support evm_mine");
    let snapshot = node
        .chain
        .snapshot()
        .await
        .expect("Test network must support evm_snapshot");

    // The closure may not be unwind safe. This only matters for the state of
    // the node which is restored below anyway.
    let result = AssertUnwindSafe(f(node.chain.clone())).catch_unwind().await;

    node.chain
        .restore(snapshot)
        .await
        .expect("Test network must support evm_revert");

    if let Err(err) = result {
        panic::resume_unwind(err);
    }
}

/// Runs the closure against a fresh in-memory chain with the project's
/// contracts registered.
pub async fn run_dev_test<F, Fut>(f: F)
where
    F: FnOnce(Chain) -> Fut,
    Fut: Future<Output = ()>,
{
    init_tracing();
    f(Chain::new(Arc::new(testlib::dev_chain()))).await;
}
