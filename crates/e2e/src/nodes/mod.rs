pub mod local_node;

pub use local_node::LocalNode;
