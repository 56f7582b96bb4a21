use thiserror::Error;

/// Ethereum chain operation errors.
#[derive(Debug, Error)]
pub enum EthError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("unexpected provider response: {0}")]
    UnexpectedResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_address() {
        let err = EthError::InvalidAddress("bad checksum".into());
        assert_eq!(err.to_string(), "invalid address: bad checksum");
    }

    #[test]
    fn display_invalid_quantity() {
        let err = EthError::InvalidQuantity("missing 0x prefix".into());
        assert_eq!(err.to_string(), "invalid quantity: missing 0x prefix");
    }

    #[test]
    fn display_unexpected_response() {
        let err = EthError::UnexpectedResponse("expected array".into());
        assert_eq!(err.to_string(), "unexpected provider response: expected array");
    }

    #[test]
    fn debug_format_works() {
        let err = EthError::InvalidAmount("1.2.3".into());
        let debug = format!("{:?}", err);
        assert!(debug.contains("InvalidAmount"));
    }
}
