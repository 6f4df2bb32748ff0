use phf::phf_map;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Scales kcal/mol per Å² of contact area to mJ/m².
pub const UNIT_CONVERSION: f64 = 694.769;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EnergyComponent {
    Total,
    Electrostatic,
    VanDerWaals,
    HydrogenBond,
}

static COMPONENT_ALIASES: phf::Map<&'static str, EnergyComponent> = phf_map! {
    "total" => EnergyComponent::Total,
    "total energy" => EnergyComponent::Total,
    "interaction energy" => EnergyComponent::Total,
    "electrostatic" => EnergyComponent::Electrostatic,
    "es" => EnergyComponent::Electrostatic,
    "total es energy" => EnergyComponent::Electrostatic,
    "van der waals" => EnergyComponent::VanDerWaals,
    "vdw" => EnergyComponent::VanDerWaals,
    "total vdw energy" => EnergyComponent::VanDerWaals,
    "h-bond" => EnergyComponent::HydrogenBond,
    "hbond" => EnergyComponent::HydrogenBond,
    "hb" => EnergyComponent::HydrogenBond,
    "total hb energy" => EnergyComponent::HydrogenBond,
};

impl EnergyComponent {
    pub const ALL: [EnergyComponent; 4] = [
        EnergyComponent::Total,
        EnergyComponent::Electrostatic,
        EnergyComponent::VanDerWaals,
        EnergyComponent::HydrogenBond,
    ];

    /// Header of the raw column in interaction data files.
    pub fn raw_column(self) -> &'static str {
        match self {
            EnergyComponent::Total => "Interaction Energy",
            EnergyComponent::Electrostatic => "Total ES Energy",
            EnergyComponent::VanDerWaals => "Total VDW Energy",
            EnergyComponent::HydrogenBond => "Total HB Energy",
        }
    }

    /// Name of the area-normalized column.
    pub fn name(self) -> &'static str {
        match self {
            EnergyComponent::Total => "Total Energy",
            EnergyComponent::Electrostatic => "Electrostatic",
            EnergyComponent::VanDerWaals => "Van der Waals",
            EnergyComponent::HydrogenBond => "H-Bond",
        }
    }
}

impl fmt::Display for EnergyComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error(
    "Unknown energy component '{0}'. Expected one of 'Total Energy', 'Electrostatic', 'Van der Waals', 'H-Bond' (optionally prefixed with 'Weighted ')."
)]
pub struct UnknownEnergyColumn(pub String);

impl FromStr for EnergyComponent {
    type Err = UnknownEnergyColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        COMPONENT_ALIASES
            .get(s.trim().to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| UnknownEnergyColumn(s.to_string()))
    }
}

/// One of the eight selectable energy columns of an aggregated dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnergyColumn {
    pub component: EnergyComponent,
    pub weighted: bool,
}

impl EnergyColumn {
    pub const fn normalized(component: EnergyComponent) -> Self {
        Self {
            component,
            weighted: false,
        }
    }

    pub const fn weighted(component: EnergyComponent) -> Self {
        Self {
            component,
            weighted: true,
        }
    }

    pub fn with_weighting(self, weighted: bool) -> Self {
        Self { weighted, ..self }
    }
}

impl fmt::Display for EnergyColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.weighted {
            write!(f, "Weighted {}", self.component)
        } else {
            write!(f, "{}", self.component)
        }
    }
}

impl FromStr for EnergyColumn {
    type Err = UnknownEnergyColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();
        let (weighted, rest) = match lower
            .strip_prefix("weighted ")
            .or_else(|| lower.strip_prefix("weighted-"))
        {
            Some(rest) => (true, rest),
            None => (false, lower.as_str()),
        };
        let component = COMPONENT_ALIASES
            .get(rest)
            .copied()
            .ok_or_else(|| UnknownEnergyColumn(trimmed.to_string()))?;
        Ok(Self {
            component,
            weighted,
        })
    }
}

/// The four energy components of one sampled configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyComponents {
    pub total: f64,
    pub electrostatic: f64,
    pub van_der_waals: f64,
    pub hydrogen_bond: f64,
}

impl EnergyComponents {
    pub fn new(total: f64, electrostatic: f64, van_der_waals: f64, hydrogen_bond: f64) -> Self {
        Self {
            total,
            electrostatic,
            van_der_waals,
            hydrogen_bond,
        }
    }

    #[inline]
    pub fn get(&self, component: EnergyComponent) -> f64 {
        match component {
            EnergyComponent::Total => self.total,
            EnergyComponent::Electrostatic => self.electrostatic,
            EnergyComponent::VanDerWaals => self.van_der_waals,
            EnergyComponent::HydrogenBond => self.hydrogen_bond,
        }
    }

    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            total: f(self.total),
            electrostatic: f(self.electrostatic),
            van_der_waals: f(self.van_der_waals),
            hydrogen_bond: f(self.hydrogen_bond),
        }
    }

    /// Converts raw energies to mJ/m² using the given contact area.
    pub fn normalized_by_area(self, area: f64) -> Self {
        self.map(|e| (e / area) * UNIT_CONVERSION)
    }

    pub fn weighted_by(self, probability: f64) -> Self {
        self.map(|e| e * probability)
    }
}
