use serde::{Deserialize, Serialize};

/// Stock keeping unit identifying a product across every service.
///
/// Each service applies its own validation rules; this type only carries
/// the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sku(String);

impl Sku {
    /// Creates a new SKU from a string.
    pub fn new(sku: impl Into<String>) -> Self {
        Self(sku.into())
    }

    /// Returns the SKU as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the length of the SKU in characters.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Returns true if the SKU is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Sku {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Sku {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Sku {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Sku {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Carrier used to ship an item.
///
/// `Unknown` exists so that a missing or unrecognized method can be
/// represented and rejected; it is never a valid choice in a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ShippingMethod {
    Fedex,
    Ups,
    Usps,
    Raven,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ShippingMethod {
    /// Returns true for every method except `Unknown`.
    pub fn is_known(&self) -> bool {
        !matches!(self, ShippingMethod::Unknown)
    }
}

impl std::fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ShippingMethod::Unknown => "UNKNOWN",
            ShippingMethod::Fedex => "FEDEX",
            ShippingMethod::Ups => "UPS",
            ShippingMethod::Usps => "USPS",
            ShippingMethod::Raven => "RAVEN",
        };
        f.write_str(name)
    }
}
