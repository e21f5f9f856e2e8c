//! Identity primitives: account/program addresses and namespaces

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{ETH_PROGRAM_ADDRESS, MAX_ADDRESS_LEN, THIS};
use crate::error::{LasrError, Result};

/// A `0x`-prefixed account or program identity, or the reserved `this`
/// self-reference.
///
/// `this` is never resolved here; it is carried verbatim to the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub fn new(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed == THIS {
            return Ok(Self::this());
        }

        let body = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .ok_or_else(|| LasrError::InvalidAddress(format!("'{}' is missing the 0x prefix", raw)))?;

        if body.is_empty() || body.len() > MAX_ADDRESS_LEN {
            return Err(LasrError::InvalidAddress(format!(
                "'{}' must carry 1 to {} characters after 0x",
                raw, MAX_ADDRESS_LEN
            )));
        }
        if !body.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(LasrError::InvalidAddress(format!(
                "'{}' contains non-alphanumeric characters",
                raw
            )));
        }

        Ok(Address(format!("0x{}", body)))
    }

    pub fn this() -> Self {
        Address(THIS.to_string())
    }

    /// The native ETH token program.
    pub fn eth_program() -> Self {
        Address(ETH_PROGRAM_ADDRESS.to_string())
    }

    pub fn is_this(&self) -> bool {
        self.0 == THIS
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = LasrError;

    fn from_str(s: &str) -> Result<Self> {
        Address::new(s)
    }
}

impl TryFrom<String> for Address {
    type Error = LasrError;

    fn try_from(value: String) -> Result<Self> {
        Address::new(&value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

/// Human-readable program grouping key. Not an account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Namespace(String);

impl Namespace {
    pub fn new(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
            return Err(LasrError::InvalidNamespace(format!(
                "'{}' must be a non-empty name without whitespace",
                raw
            )));
        }
        Ok(Namespace(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Namespace {
    type Error = LasrError;

    fn try_from(value: String) -> Result<Self> {
        Namespace::new(&value)
    }
}

impl From<Namespace> for String {
    fn from(namespace: Namespace) -> Self {
        namespace.0
    }
}

/// Either an address (including `this`) or a namespace.
///
/// On the wire an address is a bare string and a namespace is
/// `{"namespace": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "AddressOrNamespaceRepr", into = "AddressOrNamespaceRepr")]
pub enum AddressOrNamespace {
    Address(Address),
    Namespace(Namespace),
}

impl AddressOrNamespace {
    pub fn this() -> Self {
        AddressOrNamespace::Address(Address::this())
    }

    pub fn is_this(&self) -> bool {
        matches!(self, AddressOrNamespace::Address(address) if address.is_this())
    }

    pub fn address(&self) -> Option<&Address> {
        match self {
            AddressOrNamespace::Address(address) => Some(address),
            AddressOrNamespace::Namespace(_) => None,
        }
    }
}

impl From<Address> for AddressOrNamespace {
    fn from(address: Address) -> Self {
        AddressOrNamespace::Address(address)
    }
}

impl From<Namespace> for AddressOrNamespace {
    fn from(namespace: Namespace) -> Self {
        AddressOrNamespace::Namespace(namespace)
    }
}

impl fmt::Display for AddressOrNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressOrNamespace::Address(address) => address.fmt(f),
            AddressOrNamespace::Namespace(namespace) => write!(f, "namespace:{}", namespace),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum AddressOrNamespaceRepr {
    Address(Address),
    Namespace { namespace: Namespace },
}

impl From<AddressOrNamespaceRepr> for AddressOrNamespace {
    fn from(repr: AddressOrNamespaceRepr) -> Self {
        match repr {
            AddressOrNamespaceRepr::Address(address) => AddressOrNamespace::Address(address),
            AddressOrNamespaceRepr::Namespace { namespace } => {
                AddressOrNamespace::Namespace(namespace)
            }
        }
    }
}

impl From<AddressOrNamespace> for AddressOrNamespaceRepr {
    fn from(value: AddressOrNamespace) -> Self {
        match value {
            AddressOrNamespace::Address(address) => AddressOrNamespaceRepr::Address(address),
            AddressOrNamespace::Namespace(namespace) => {
                AddressOrNamespaceRepr::Namespace { namespace }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_address_normalizes_prefix() {
        let address = Address::new(" 0XAbC1 ").unwrap();
        assert_eq!(address.as_str(), "0xAbC1");
        assert_eq!(address, Address::new("0xAbC1").unwrap());
    }

    #[test]
    fn test_address_rejects_malformed() {
        assert!(Address::new("abc").is_err());
        assert!(Address::new("0x").is_err());
        assert!(Address::new("0x12 34").is_err());
        assert!(Address::new(&format!("0x{}", "a".repeat(65))).is_err());
    }

    #[test]
    fn test_this_survives_serialization() {
        let value = serde_json::to_value(AddressOrNamespace::this()).unwrap();
        assert_eq!(value, json!("this"));

        let back: AddressOrNamespace = serde_json::from_value(value).unwrap();
        assert!(back.is_this());
    }

    #[test]
    fn test_namespace_wire_shape() {
        let ns = AddressOrNamespace::from(Namespace::new("snake-game").unwrap());
        let value = serde_json::to_value(&ns).unwrap();
        assert_eq!(value, json!({ "namespace": "snake-game" }));

        let back: AddressOrNamespace = serde_json::from_value(value).unwrap();
        assert_eq!(back, ns);
    }

    #[test]
    fn test_well_known_programs_are_valid() {
        use crate::consts::VERSE_PROGRAM_ADDRESS;

        assert_eq!(Address::new(ETH_PROGRAM_ADDRESS).unwrap(), Address::eth_program());
        assert!(Address::new(VERSE_PROGRAM_ADDRESS).is_ok());
    }

    #[test]
    fn test_invalid_address_fails_deserialization() {
        let result: std::result::Result<Address, _> = serde_json::from_value(json!("nope"));
        assert!(result.is_err());
    }
}
