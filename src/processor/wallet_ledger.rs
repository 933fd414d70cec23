use std::fmt;

use tracing::{debug, info, warn};

use crate::{
    command::{CreateWalletCommand, LedgerCommand, TransferCommand},
    store::StateStore,
    wallet::Wallet,
};

use super::{ErrorKind, LedgerError, WalletRole};

pub const WALLET_CREATED: &str = "Wallet created";
pub const TRANSFERRED: &str = "Transferred success";

/// Progress of a single transfer. A failing check aborts at whichever stage was reached last;
/// only [`TransferStage::Committed`] has written anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStage {
    Validated,
    SourceLoaded,
    DestinationLoaded,
    BalanceChecked,
    Committed,
}

impl fmt::Display for TransferStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Runs a parsed command against the store and returns the success message.
pub fn execute<S>(store: &mut S, command: &LedgerCommand) -> Result<String, LedgerError>
where
    S: StateStore + ?Sized,
{
    let result = match command {
        LedgerCommand::CreateWallet(command) => create_wallet(store, command).map(str::to_owned),
        LedgerCommand::GetWallet { wallet_id } => get_wallet(&*store, wallet_id),
        LedgerCommand::Transfer(command) => transfer(store, command).map(str::to_owned),
    };
    if let Err(err) = &result {
        if err.kind() == ErrorKind::StoreFailure {
            warn!(error = %err, "ledger operation failed");
        }
    }
    result
}

pub fn create_wallet<S>(
    store: &mut S,
    command: &CreateWalletCommand,
) -> Result<&'static str, LedgerError>
where
    S: StateStore + ?Sized,
{
    if load(&*store, &command.wallet_id)?.is_some() {
        return Err(LedgerError::WalletExists {
            wallet_id: command.wallet_id.clone(),
        });
    }
    let wallet = Wallet::new(command.wallet_id.clone(), command.amount);
    store.put_state(&command.wallet_id, wallet.encode()?)?;
    info!(wallet_id = %command.wallet_id, amount = %command.amount, "wallet created");
    Ok(WALLET_CREATED)
}

/// Returns the stored record exactly as it was written.
pub fn get_wallet<S>(store: &S, wallet_id: &str) -> Result<String, LedgerError>
where
    S: StateStore + ?Sized,
{
    let Some(raw) = load(&*store, wallet_id)? else {
        debug!(wallet_id, "wallet not found");
        return Err(LedgerError::UnknownWallet {
            wallet_id: wallet_id.to_owned(),
        });
    };
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

pub fn transfer<S>(store: &mut S, command: &TransferCommand) -> Result<&'static str, LedgerError>
where
    S: StateStore + ?Sized,
{
    let mut stage = TransferStage::Validated;
    let result = run_transfer(store, command, &mut stage);
    match &result {
        Ok(_) => info!(
            from = %command.from,
            to = %command.to,
            amount = %command.amount,
            "transfer committed"
        ),
        Err(err) => debug!(
            from = %command.from,
            to = %command.to,
            %stage,
            error = %err,
            "transfer aborted"
        ),
    }
    result
}

fn run_transfer<S>(
    store: &mut S,
    command: &TransferCommand,
    stage: &mut TransferStage,
) -> Result<&'static str, LedgerError>
where
    S: StateStore + ?Sized,
{
    let from_raw = load(&*store, &command.from)?.ok_or_else(|| LedgerError::WalletNotFound {
        wallet_id: command.from.clone(),
        role: WalletRole::From,
    })?;
    *stage = TransferStage::SourceLoaded;

    let to_raw = load(&*store, &command.to)?.ok_or_else(|| LedgerError::WalletNotFound {
        wallet_id: command.to.clone(),
        role: WalletRole::To,
    })?;
    *stage = TransferStage::DestinationLoaded;

    let mut from = Wallet::decode(&from_raw)?;
    let mut to = Wallet::decode(&to_raw)?;
    from.debit(command.amount)?;
    to.credit(command.amount)?;
    *stage = TransferStage::BalanceChecked;

    // both records are encoded before either write is issued
    let from_bytes = from.encode()?;
    let to_bytes = to.encode()?;
    store.put_state(&command.from, from_bytes)?;
    store.put_state(&command.to, to_bytes)?;
    *stage = TransferStage::Committed;
    Ok(TRANSFERRED)
}

/// An empty stored value counts as absent.
fn load<S>(store: &S, key: &str) -> Result<Option<Vec<u8>>, LedgerError>
where
    S: StateStore + ?Sized,
{
    Ok(store.get_state(key)?.filter(|value| !value.is_empty()))
}
