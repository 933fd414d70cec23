//! Batch driver around the ledger: replays a CSV file of invocations against an in-memory store
//! and prints the resulting wallets. Used by the binary and the integration tests.

use std::io::{Read, Write};

use anyhow::{Context, Result};
use csv_parser::CsvInvocationParser;
use csv_printer::{WalletRow, write_wallet_table};

use crate::{
    dispatcher,
    response::Response,
    store::in_memory_store::InMemoryStore,
    wallet::Wallet,
};

pub mod csv_parser;
pub mod csv_printer;

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub response_printer: Box<dyn FnMut(u64, &Response)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvInvocationParser::new(self.input);

        let mut store = InMemoryStore::default();

        for (line, row) in parser {
            let row = row.with_context(|| format!("Malformed invocation at line {line}"))?;
            // every row gets its own transaction, committed only on success
            let mut tx = store.begin();
            let response = if row.function == "init" {
                dispatcher::init()
            } else {
                dispatcher::invoke(&mut tx, &row.function, &row.params)
            };
            if response.is_ok() {
                tx.commit();
            }
            (self.response_printer)(line, &response);
        }

        let wallets = store
            .iter()
            .map(|(key, raw)| {
                Wallet::decode(raw)
                    .map(|wallet| WalletRow::from(&wallet))
                    .with_context(|| format!("Stored wallet `{key}` cannot be decoded"))
            })
            .collect::<Result<Vec<_>>>()?;

        write_wallet_table(self.output, wallets)
    }
}
