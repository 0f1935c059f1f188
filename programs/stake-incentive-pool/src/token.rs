//! Opaque token identity and value-typed custody records.
//!
//! spec.md §9 "Dynamic type-keyed storage" re-models the source's
//! dynamic, type-indexed balance fields as opaque string identifiers
//! checked at each call site. §9 "Ownership & custody" asks for an
//! ownership-passing discipline instead of reference-counted handles:
//! `Coin` is that value type. It carries no backing treasury (issuance and
//! supply-cap enforcement are out of scope per spec.md §1) — it is just a
//! tagged, checked-arithmetic amount that moves by value from caller to
//! pool and back.

use borsh::{BorshDeserialize, BorshSerialize};

/// An opaque token type identifier, compared by value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, BorshSerialize, BorshDeserialize)]
pub struct TokenType(String);

impl TokenType {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TokenType {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A value-typed amount of one token type. Custody moves by ownership:
/// staking consumes a `Coin` into the pool's balance; unstaking, harvesting,
/// and program removal produce one out of the pool's balance.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Coin {
    token_type: TokenType,
    amount: u64,
}

impl Coin {
    pub fn new(token_type: TokenType, amount: u64) -> Self {
        Self { token_type, amount }
    }

    pub fn zero(token_type: TokenType) -> Self {
        Self::new(token_type, 0)
    }

    pub fn token_type(&self) -> &TokenType {
        &self.token_type
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn into_amount(self) -> u64 {
        self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_type_equality_is_by_value() {
        assert_eq!(TokenType::new("SUI"), TokenType::new("SUI"));
        assert_ne!(TokenType::new("SUI"), TokenType::new("USDC"));
    }

    #[test]
    fn coin_carries_its_token_type_and_amount() {
        let c = Coin::new(TokenType::new("SUI"), 42);
        assert_eq!(c.token_type(), &TokenType::new("SUI"));
        assert_eq!(c.amount(), 42);
        assert_eq!(c.into_amount(), 42);
    }
}
