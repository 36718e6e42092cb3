use serde::{Deserialize, Serialize};

use gyuto_core::{DomainError, DomainResult, Entity, ProductId};

/// Shortest blade the catalog accepts, in millimeters.
pub const LENGTH_MIN_MM: u32 = 120;
/// Longest blade the catalog accepts, in millimeters.
pub const LENGTH_MAX_MM: u32 = 300;
/// Highest unit price the catalog accepts, in kroner. Keeps
/// `quantity * price` inside `u64` for any cart quantity.
pub const PRICE_MAX_NOK: u64 = u32::MAX as u64;

/// Knife type (blade profile).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum KnifeType {
    Gyuto,
    Santoku,
    Nakiri,
    Bunka,
    Petty,
    Kiritsuke,
    Yanagiba,
}

impl KnifeType {
    pub const ALL: [KnifeType; 7] = [
        KnifeType::Gyuto,
        KnifeType::Santoku,
        KnifeType::Nakiri,
        KnifeType::Bunka,
        KnifeType::Petty,
        KnifeType::Kiritsuke,
        KnifeType::Yanagiba,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            KnifeType::Gyuto => "Gyuto",
            KnifeType::Santoku => "Santoku",
            KnifeType::Nakiri => "Nakiri",
            KnifeType::Bunka => "Bunka",
            KnifeType::Petty => "Petty",
            KnifeType::Kiritsuke => "Kiritsuke",
            KnifeType::Yanagiba => "Yanagiba",
        }
    }
}

impl core::fmt::Display for KnifeType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for KnifeType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KnifeType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::validation(format!("unknown knife type: {s}")))
    }
}

/// Blade finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Finish {
    /// Mirror polish.
    Migaki,
    /// Misty satin.
    Kasumi,
    Damascus,
    /// Hammered.
    Tsuchime,
    /// Forge scale left on the blade.
    Kurouchi,
    /// Pear-skin texture.
    Nashiji,
}

impl Finish {
    pub const ALL: [Finish; 6] = [
        Finish::Migaki,
        Finish::Kasumi,
        Finish::Damascus,
        Finish::Tsuchime,
        Finish::Kurouchi,
        Finish::Nashiji,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Finish::Migaki => "Migaki",
            Finish::Kasumi => "Kasumi",
            Finish::Damascus => "Damascus",
            Finish::Tsuchime => "Tsuchime",
            Finish::Kurouchi => "Kurouchi",
            Finish::Nashiji => "Nashiji",
        }
    }
}

impl core::fmt::Display for Finish {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Finish {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Finish::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::validation(format!("unknown finish: {s}")))
    }
}

/// A catalog product (immutable once loaded).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    #[serde(rename = "type")]
    pub kind: KnifeType,
    /// Steel name as printed on the product card (e.g. "VG-10", "SG2/R2").
    pub steel: String,
    pub finish: Finish,
    /// Blade length in millimeters.
    pub length: u32,
    /// Price in whole kroner.
    pub price: u64,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub image: Option<String>,
}

impl Product {
    /// Steel family used to group facet chips: the first word of the steel
    /// name ("Aogami Super" -> "Aogami").
    pub fn steel_family(&self) -> &str {
        self.steel.split_whitespace().next().unwrap_or(self.steel.as_str())
    }

    /// Check the per-product catalog invariants.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "product {}: name cannot be empty",
                self.id
            )));
        }

        if !(LENGTH_MIN_MM..=LENGTH_MAX_MM).contains(&self.length) {
            return Err(DomainError::validation(format!(
                "product {}: length {} mm outside {LENGTH_MIN_MM}..={LENGTH_MAX_MM}",
                self.id, self.length
            )));
        }

        if self.price > PRICE_MAX_NOK {
            return Err(DomainError::validation(format!(
                "product {}: price {} above {PRICE_MAX_NOK}",
                self.id, self.price
            )));
        }

        Ok(())
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
