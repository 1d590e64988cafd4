//! Argument decoding for contract stand-ins. Mismatches revert like calls
//! with malformed calldata would.

use {
    alloy::{
        dyn_abi::DynSolValue,
        primitives::{Address, U256},
    },
    chain::{Result, dev::revert},
};

pub fn string(method: &str, args: &[DynSolValue], index: usize) -> Result<String> {
    arg(method, args, index)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| mismatch(method, index, "string"))
}

pub fn address(method: &str, args: &[DynSolValue], index: usize) -> Result<Address> {
    arg(method, args, index)?
        .as_address()
        .ok_or_else(|| mismatch(method, index, "address"))
}

pub fn uint(method: &str, args: &[DynSolValue], index: usize) -> Result<U256> {
    arg(method, args, index)?
        .as_uint()
        .map(|(value, _)| value)
        .ok_or_else(|| mismatch(method, index, "uint256"))
}

/// Fails unless exactly `count` arguments were passed.
pub fn expect_count(method: &str, args: &[DynSolValue], count: usize) -> Result<()> {
    if args.len() == count {
        Ok(())
    } else {
        Err(revert(format!(
            "{method} takes {count} argument(s), got {}",
            args.len()
        )))
    }
}

fn arg<'a>(method: &str, args: &'a [DynSolValue], index: usize) -> Result<&'a DynSolValue> {
    args.get(index)
        .ok_or_else(|| revert(format!("{method}: missing argument {index}")))
}

fn mismatch(method: &str, index: usize, expected: &str) -> chain::Error {
    revert(format!("{method}: argument {index} is not of type {expected}"))
}
