use {
    crate::args,
    alloy::{dyn_abi::DynSolValue, primitives::Address},
    chain::{
        Result,
        dev::{ContractLogic, ContractState, revert},
    },
};

/// `constructor(string)`, `greet() returns (string)`, `setGreeting(string)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Greeter;

impl ContractLogic for Greeter {
    fn deploy(&self, _: Address, args: &[DynSolValue]) -> Result<Box<dyn ContractState>> {
        args::expect_count("constructor", args, 1)?;
        Ok(Box::new(GreeterState {
            greeting: args::string("constructor", args, 0)?,
        }))
    }
}

#[derive(Debug, Clone)]
struct GreeterState {
    greeting: String,
}

impl ContractState for GreeterState {
    fn call(&self, method: &str, args: &[DynSolValue]) -> Result<Vec<DynSolValue>> {
        match method {
            "greet" => {
                args::expect_count(method, args, 0)?;
                Ok(vec![DynSolValue::String(self.greeting.clone())])
            }
            _ => Err(revert(format!("Greeter has no view function {method}"))),
        }
    }

    fn transact(&mut self, _: Address, method: &str, args: &[DynSolValue]) -> Result<()> {
        match method {
            "setGreeting" => {
                args::expect_count(method, args, 1)?;
                self.greeting = args::string(method, args, 0)?;
                Ok(())
            }
            _ => Err(revert(format!("Greeter has no function {method}"))),
        }
    }

    fn clone_box(&self) -> Box<dyn ContractState> {
        Box::new(self.clone())
    }
}
