use rust_decimal::{Decimal, prelude::Zero};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type WalletId = String;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Token amount not enough")]
    InsufficientBalance,
    #[error("Token amount overflow for wallet {wallet_id}")]
    BalanceOverflow { wallet_id: WalletId },
    #[error("Malformed wallet record: {0}")]
    Codec(#[from] serde_json::Error),
    #[error("Wallet record for {wallet_id} has a negative balance")]
    NegativeBalance { wallet_id: WalletId },
    #[error("Token amount {amount} cannot be applied exactly to wallet {wallet_id}")]
    PrecisionLoss { wallet_id: WalletId, amount: Decimal },
}

/// Persisted form of a wallet, stored under its own id.
///
/// `tokenAmount` is written as a JSON number carrying every digit of the balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    wallet_id: WalletId,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    token_amount: Decimal,
}

impl Wallet {
    pub fn new(wallet_id: impl Into<WalletId>, token_amount: Decimal) -> Self {
        Self {
            wallet_id: wallet_id.into(),
            token_amount,
        }
    }

    pub fn wallet_id(&self) -> &str {
        &self.wallet_id
    }

    pub fn balance(&self) -> Decimal {
        self.token_amount
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, WalletError> {
        let wallet: Wallet = serde_json::from_slice(bytes)?;
        if wallet.token_amount < Decimal::zero() {
            return Err(WalletError::NegativeBalance {
                wallet_id: wallet.wallet_id,
            });
        }
        Ok(wallet)
    }

    pub fn encode(&self) -> Result<Vec<u8>, WalletError> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn debit(&mut self, amount: Decimal) -> Result<(), WalletError> {
        if self.token_amount < amount {
            return Err(WalletError::InsufficientBalance);
        }
        let balance = self.token_amount - amount;
        self.ensure_exact(self.token_amount - balance, amount)?;
        self.token_amount = balance;
        Ok(())
    }

    pub fn credit(&mut self, amount: Decimal) -> Result<(), WalletError> {
        let balance = self.token_amount.checked_add(amount).ok_or_else(|| {
            WalletError::BalanceOverflow {
                wallet_id: self.wallet_id.clone(),
            }
        })?;
        self.ensure_exact(balance - self.token_amount, amount)?;
        self.token_amount = balance;
        Ok(())
    }

    /// Decimal arithmetic rounds once a result needs more than 28 significant digits.
    /// A balance change that does not equal the requested amount is refused.
    fn ensure_exact(&self, applied: Decimal, amount: Decimal) -> Result<(), WalletError> {
        if applied != amount {
            return Err(WalletError::PrecisionLoss {
                wallet_id: self.wallet_id.clone(),
                amount,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn encode_uses_legacy_field_names() {
        let wallet = Wallet::new("alice", dec!(70));
        let bytes = wallet.encode().unwrap();
        assert_eq!(bytes, br#"{"walletId":"alice","tokenAmount":70}"#);
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["walletId"], "alice");
        assert!(value["tokenAmount"].is_number());
        assert_eq!(value.as_object().unwrap().len(), 2);
    }

    #[rstest]
    #[case::long_fraction(dec!(0.12345678901234567890), "0.12345678901234567890")]
    #[case::beyond_f64(dec!(12345678901234567.5), "12345678901234567.5")]
    #[case::max(Decimal::MAX, "79228162514264337593543950335")]
    fn encode_keeps_every_digit(#[case] amount: Decimal, #[case] number: &str) {
        let bytes = Wallet::new("alice", amount).encode().unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert_eq!(
            text,
            format!(r#"{{"walletId":"alice","tokenAmount":{number}}}"#)
        );
        assert_eq!(Wallet::decode(&bytes).unwrap().balance(), amount);
    }

    #[test]
    fn decode_accepts_legacy_float_records() {
        let wallet = Wallet::decode(br#"{"walletId":"bob","tokenAmount":70.0}"#).unwrap();
        assert_eq!(wallet.balance(), dec!(70));
    }

    #[test]
    fn decode_accepts_integer_and_fractional_amounts() {
        let wallet = Wallet::decode(br#"{"walletId":"bob","tokenAmount":30}"#).unwrap();
        assert_eq!(wallet.wallet_id(), "bob");
        assert_eq!(wallet.balance(), dec!(30));

        let wallet = Wallet::decode(br#"{"walletId":"bob","tokenAmount":0.1}"#).unwrap();
        assert_eq!(wallet.balance(), dec!(0.1));
    }

    #[test]
    fn decode_rejects_garbage_and_negative_balance() {
        let err = Wallet::decode(b"not json").unwrap_err();
        assert!(matches!(err, WalletError::Codec(_)));

        let err = Wallet::decode(br#"{"walletId":"eve","tokenAmount":-1}"#).unwrap_err();
        assert!(matches!(err, WalletError::NegativeBalance { .. }));
    }

    #[test]
    fn debit_and_credit() {
        let mut wallet = Wallet::new("alice", dec!(100));
        wallet.debit(dec!(30)).unwrap();
        assert_eq!(wallet.balance(), dec!(70));

        // balance is untouched when the debit is refused
        let err = wallet.debit(dec!(70.01)).unwrap_err();
        assert!(matches!(err, WalletError::InsufficientBalance));
        assert_eq!(wallet.balance(), dec!(70));

        wallet.debit(dec!(70)).unwrap();
        assert_eq!(wallet.balance(), Decimal::zero());

        wallet.credit(dec!(0.3)).unwrap();
        assert_eq!(wallet.balance(), dec!(0.3));

        let mut near_max = Wallet::new("whale", Decimal::MAX - dec!(1));
        let err = near_max.credit(dec!(0.5)).unwrap_err();
        assert!(matches!(err, WalletError::PrecisionLoss { .. }));
        assert_eq!(near_max.balance(), Decimal::MAX - dec!(1));
        let err = near_max.debit(dec!(0.5)).unwrap_err();
        assert!(matches!(err, WalletError::PrecisionLoss { .. }));
        assert_eq!(near_max.balance(), Decimal::MAX - dec!(1));

        let mut full = Wallet::new("whale", Decimal::MAX);
        let err = full.credit(dec!(1)).unwrap_err();
        assert!(matches!(err, WalletError::BalanceOverflow { .. }));
        assert_eq!(full.balance(), Decimal::MAX);
    }
}
