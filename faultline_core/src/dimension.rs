//! Availability dimensions and their values.
//!
//! A dimension is an independent availability axis, such as an availability
//! zone or a software version. Each dimension carries a set of values; one
//! value per dimension identifies a sector of the lattice.

/// The name of an availability dimension (for example `"az"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DimensionName(String);

impl DimensionName {
    /// Constructor for a [`DimensionName`].
    #[must_use]
    pub const fn new(name: String) -> Self {
        Self(name)
    }

    /// The name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DimensionName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&str> for DimensionName {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl std::fmt::Display for DimensionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A position along one availability dimension (for example `"us-east-1"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DimensionValue(String);

impl DimensionValue {
    /// Constructor for a [`DimensionValue`].
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self(value)
    }

    /// The value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DimensionValue {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for DimensionValue {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl std::fmt::Display for DimensionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
