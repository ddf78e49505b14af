use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Gasoline,
    Gas,
}

impl FuelType {
    /// Both tracked products, in report order.
    pub const ALL: [FuelType; 2] = [FuelType::Gasoline, FuelType::Gas];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gasoline => "gasoline",
            Self::Gas => "gas",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Gasoline => "Gasoline",
            Self::Gas => "Gas",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gasoline" => Some(Self::Gasoline),
            "gas" => Some(Self::Gas),
            _ => None,
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
