use bitcoin::{Address, Network, address::NetworkUnchecked};
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum AddressError {
    #[error("could not parse address: {0}")]
    Parse(#[from] bitcoin::address::ParseError),
    #[error("address not valid for network")]
    WrongNetwork,
}

/// Checks that `address` is a well-formed address for `network`. Format only;
/// no ledger state is consulted.
pub fn validate(address: &str, network: Network) -> Result<(), AddressError> {
    let address: Address<NetworkUnchecked> = address.parse()?;
    if !address.is_valid_for_network(network) {
        return Err(AddressError::WrongNetwork);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_mainnet_addresses() {
        for address in [
            "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa",
            "3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy",
            "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq",
        ] {
            assert!(validate(address, Network::Bitcoin).is_ok());
        }
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            validate("not-an-address", Network::Bitcoin),
            Err(AddressError::Parse(_))
        ));
    }

    #[test]
    fn rejects_wrong_network() {
        assert!(matches!(
            validate("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa", Network::Testnet),
            Err(AddressError::WrongNetwork)
        ));
    }
}
