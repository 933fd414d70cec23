use tracing::debug;

use crate::{
    command::LedgerCommand,
    processor::{LedgerError, wallet_ledger},
    response::Response,
    store::StateStore,
};

pub const INIT_SUCCESS: &str = "Init success";

/// Called once when the ledger is instantiated. Touches no state.
pub fn init() -> Response {
    Response::success(INIT_SUCCESS)
}

/// Routes a named invocation to the ledger. Always produces exactly one response.
pub fn invoke<S>(store: &mut S, function: &str, params: &[String]) -> Response
where
    S: StateStore + ?Sized,
{
    debug!(function, params = params.len(), "invoke");
    let result = LedgerCommand::parse_command(function, params)
        .map_err(LedgerError::from)
        .and_then(|command| wallet_ledger::execute(store, &command));
    match result {
        Ok(message) => Response::success(message),
        Err(err) => {
            debug!(function, kind = ?err.kind(), error = %err, "invocation rejected");
            Response::error(err.to_string(), "")
        }
    }
}

pub fn create_wallet<S>(store: &mut S, wallet_id: &str, amount: &str) -> Response
where
    S: StateStore + ?Sized,
{
    invoke(store, "createWallet", &[wallet_id.to_owned(), amount.to_owned()])
}

pub fn get_wallet<S>(store: &mut S, wallet_id: &str) -> Response
where
    S: StateStore + ?Sized,
{
    invoke(store, "getWallet", &[wallet_id.to_owned()])
}

pub fn transfer<S>(store: &mut S, from: &str, to: &str, amount: &str) -> Response
where
    S: StateStore + ?Sized,
{
    invoke(
        store,
        "transfer",
        &[from.to_owned(), to.to_owned(), amount.to_owned()],
    )
}
