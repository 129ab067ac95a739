//! An account's public identity: its key and the address it is shown as.

use atto_types::{PrivateKey, PublicKey};

use crate::address::{decode_address, encode_address};
use crate::error::CryptoError;
use crate::keys::derive_public_key;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    public_key: PublicKey,
    address: String,
}

impl Account {
    pub fn from_public_key(public_key: PublicKey, prefix: &str) -> Self {
        Self {
            address: encode_address(&public_key, prefix),
            public_key,
        }
    }

    pub fn from_private_key(private_key: &PrivateKey, prefix: &str) -> Self {
        Self::from_public_key(derive_public_key(private_key), prefix)
    }

    /// Parse an address, keeping its text as given.
    pub fn from_address(address: &str) -> Result<Self, CryptoError> {
        let public_key = decode_address(address)?;
        Ok(Self {
            public_key,
            address: address.to_string(),
        })
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Whether `address` names this account, whatever its prefix.
    pub fn is_address(&self, address: &str) -> bool {
        decode_address(address).is_ok_and(|key| key == self.public_key)
    }
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.address)
    }
}
