use thiserror::Error;

use crate::{
    command::CommandError,
    store::StoreError,
    wallet::{WalletError, WalletId},
};

pub mod wallet_ledger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletRole {
    From,
    To,
}

impl std::fmt::Display for WalletRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalletRole::From => f.write_str("from"),
            WalletRole::To => f.write_str("to"),
        }
    }
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    CommandErr(#[from] CommandError),
    #[error("Wallet existed")]
    WalletExists { wallet_id: WalletId },
    #[error("Nonexistent {role}-wallet")]
    WalletNotFound { wallet_id: WalletId, role: WalletRole },
    /// Lookup of a wallet that was never created. Reported as a bad argument.
    #[error("Invalid argument")]
    UnknownWallet { wallet_id: WalletId },
    #[error(transparent)]
    WalletErr(#[from] WalletError),
    #[error(transparent)]
    StoreErr(#[from] StoreError),
}

/// Coarse classification of every way an invocation can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    InvalidAmount,
    WalletExists,
    WalletNotFound,
    SameWallet,
    InsufficientBalance,
    UnsupportedMethod,
    SerializationFailure,
    StoreFailure,
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::CommandErr(err) => match err {
                CommandError::UnsupportedMethod { .. } => ErrorKind::UnsupportedMethod,
                CommandError::IncorrectArity { .. }
                | CommandError::EmptyArgument { .. }
                | CommandError::EmptyWalletId => ErrorKind::InvalidArgument,
                CommandError::SameWallet => ErrorKind::SameWallet,
                CommandError::AmountParse { .. } | CommandError::NegativeAmount { .. } => {
                    ErrorKind::InvalidAmount
                }
            },
            LedgerError::WalletExists { .. } => ErrorKind::WalletExists,
            LedgerError::WalletNotFound { .. } => ErrorKind::WalletNotFound,
            LedgerError::UnknownWallet { .. } => ErrorKind::InvalidArgument,
            LedgerError::WalletErr(WalletError::InsufficientBalance) => {
                ErrorKind::InsufficientBalance
            }
            LedgerError::WalletErr(WalletError::PrecisionLoss { .. }) => ErrorKind::InvalidAmount,
            LedgerError::WalletErr(_) | LedgerError::StoreErr(_) => ErrorKind::StoreFailure,
        }
    }
}
