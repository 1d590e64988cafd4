//! ERC-721 certificate with URI storage. Token ids are assigned sequentially
//! starting at zero.

use {
    crate::args,
    alloy::{
        dyn_abi::DynSolValue,
        primitives::{Address, U256},
    },
    chain::{
        Result,
        dev::{ContractLogic, ContractState, revert},
    },
    std::collections::BTreeMap,
};

/// `constructor(address initialOwner)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Certificate;

impl ContractLogic for Certificate {
    fn deploy(&self, _: Address, args: &[DynSolValue]) -> Result<Box<dyn ContractState>> {
        args::expect_count("constructor", args, 1)?;
        let owner = args::address("constructor", args, 0)?;
        if owner.is_zero() {
            return Err(revert("OwnableInvalidOwner(0x0)"));
        }
        Ok(Box::new(CertificateState {
            owner,
            next_token_id: U256::ZERO,
            tokens: BTreeMap::new(),
        }))
    }
}

#[derive(Debug, Clone)]
struct Token {
    owner: Address,
    uri: String,
}

#[derive(Debug, Clone)]
struct CertificateState {
    owner: Address,
    next_token_id: U256,
    tokens: BTreeMap<U256, Token>,
}

impl CertificateState {
    fn token(&self, method: &str, args: &[DynSolValue]) -> Result<&Token> {
        args::expect_count(method, args, 1)?;
        let id = args::uint(method, args, 0)?;
        self.tokens
            .get(&id)
            .ok_or_else(|| revert(format!("ERC721NonexistentToken({id})")))
    }
}

impl ContractState for CertificateState {
    fn call(&self, method: &str, args: &[DynSolValue]) -> Result<Vec<DynSolValue>> {
        let value = match method {
            "owner" => {
                args::expect_count(method, args, 0)?;
                DynSolValue::Address(self.owner)
            }
            "ownerOf" => DynSolValue::Address(self.token(method, args)?.owner),
            "tokenURI" => DynSolValue::String(self.token(method, args)?.uri.clone()),
            "balanceOf" => {
                args::expect_count(method, args, 1)?;
                let holder = args::address(method, args, 0)?;
                let balance = self.tokens.values().filter(|t| t.owner == holder).count();
                DynSolValue::Uint(U256::from(balance), 256)
            }
            _ => return Err(revert(format!("Certificate has no view function {method}"))),
        };
        Ok(vec![value])
    }

    fn transact(&mut self, _: Address, method: &str, args: &[DynSolValue]) -> Result<()> {
        match method {
            "safeMint" => {
                args::expect_count(method, args, 2)?;
                let to = args::address(method, args, 0)?;
                let uri = args::string(method, args, 1)?;
                if to.is_zero() {
                    return Err(revert("ERC721InvalidReceiver(0x0)"));
                }
                self.tokens.insert(self.next_token_id, Token { owner: to, uri });
                self.next_token_id += U256::from(1);
                Ok(())
            }
            _ => Err(revert(format!("Certificate has no function {method}"))),
        }
    }

    fn clone_box(&self) -> Box<dyn ContractState> {
        Box::new(self.clone())
    }
}
