use std::io::Write;

use anyhow::Context;
use csv::Writer;
use serde::Serialize;

use crate::wallet::Wallet;

/// One line of the final wallet table. The amount is rendered with every stored digit.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletRow {
    pub wallet_id: String,
    pub token_amount: String,
}

impl From<&Wallet> for WalletRow {
    fn from(wallet: &Wallet) -> Self {
        Self {
            wallet_id: wallet.wallet_id().to_owned(),
            token_amount: wallet.balance().to_string(),
        }
    }
}

pub fn write_wallet_table<W>(
    output: &mut W,
    rows: impl IntoIterator<Item = WalletRow>,
) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    for row in rows {
        writer
            .serialize(&row)
            .with_context(|| format!("Failed to write wallet `{}`", row.wallet_id))?;
    }
    writer.flush().context("Failed to flush wallet table")
}
