use std::str::FromStr;

use rust_decimal::{Decimal, prelude::Zero};
use thiserror::Error;

use crate::wallet::WalletId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    CreateWallet,
    GetWallet,
    Transfer,
}

impl Method {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "createWallet" => Some(Self::CreateWallet),
            "getWallet" => Some(Self::GetWallet),
            "transfer" => Some(Self::Transfer),
            _ => None,
        }
    }

    pub fn arity(self) -> usize {
        match self {
            Method::CreateWallet => 2,
            Method::GetWallet => 1,
            Method::Transfer => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateWalletCommand {
    pub wallet_id: WalletId,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferCommand {
    pub from: WalletId,
    pub to: WalletId,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCommand {
    CreateWallet(CreateWalletCommand),
    GetWallet { wallet_id: WalletId },
    Transfer(TransferCommand),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unsupported method")]
    UnsupportedMethod { name: String },
    #[error("Incorrect number of parameters, expected {expected}")]
    IncorrectArity { method: Method, expected: usize },
    #[error("Invalid argument(s)")]
    EmptyArgument { method: Method },
    #[error("Invalid argument")]
    EmptyWalletId,
    #[error("From-wallet is same as to-wallet")]
    SameWallet,
    #[error("Token amount parse error")]
    AmountParse { input: String },
    #[error("Invalid token amount")]
    NegativeAmount { amount: Decimal },
}

impl LedgerCommand {
    /// Turns a raw invocation into a command.
    ///
    /// Every check here is pure and runs before the store is touched, in this order:
    /// arity, empty arguments, same wallet (transfer only), amount.
    pub fn parse_command(name: &str, params: &[String]) -> Result<Self, CommandError> {
        let method = Method::from_name(name).ok_or_else(|| CommandError::UnsupportedMethod {
            name: name.to_owned(),
        })?;
        if params.len() != method.arity() {
            return Err(CommandError::IncorrectArity {
                method,
                expected: method.arity(),
            });
        }

        match (method, params) {
            (Method::CreateWallet, [wallet_id, amount]) => {
                if wallet_id.is_empty() || amount.is_empty() {
                    return Err(CommandError::EmptyArgument { method });
                }
                Ok(Self::CreateWallet(CreateWalletCommand {
                    wallet_id: wallet_id.clone(),
                    amount: parse_token_amount(amount)?,
                }))
            }
            (Method::GetWallet, [wallet_id]) => {
                if wallet_id.is_empty() {
                    return Err(CommandError::EmptyWalletId);
                }
                Ok(Self::GetWallet {
                    wallet_id: wallet_id.clone(),
                })
            }
            (Method::Transfer, [from, to, amount]) => {
                if from.is_empty() || to.is_empty() || amount.is_empty() {
                    return Err(CommandError::EmptyArgument { method });
                }
                if from == to {
                    return Err(CommandError::SameWallet);
                }
                Ok(Self::Transfer(TransferCommand {
                    from: from.clone(),
                    to: to.clone(),
                    amount: parse_token_amount(amount)?,
                }))
            }
            _ => Err(CommandError::IncorrectArity {
                method,
                expected: method.arity(),
            }),
        }
    }
}

/// Parses a non-negative token amount.
///
/// Surrounding whitespace is ignored and scientific notation (`1e3`) is accepted.
pub fn parse_token_amount(input: &str) -> Result<Decimal, CommandError> {
    let trimmed = input.trim();
    let amount = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| CommandError::AmountParse {
            input: input.to_owned(),
        })?;
    if amount < Decimal::zero() {
        return Err(CommandError::NegativeAmount { amount });
    }
    // "-0" parses with a sign bit set
    if amount.is_zero() {
        return Ok(Decimal::zero());
    }
    Ok(amount)
}
