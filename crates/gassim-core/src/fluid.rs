//! Fluids and the pressure-weighted mixing rule.

use indexmap::IndexMap;

use crate::error::FluidError;

/// A named substance with mutable pressure and temperature.
///
/// Identity is the `id` string (typically the substance name); two fluids
/// with the same id are the same substance and mix when combined.
#[derive(Clone, Debug, PartialEq)]
pub struct Fluid {
    id: String,
    name: String,
    pressure: f64,
    temperature: f64,
}

impl Fluid {
    /// Create a fluid.
    ///
    /// Pressure must be finite and non-negative; temperature must be finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use gassim_core::Fluid;
    ///
    /// let o2 = Fluid::new("Oxygen", "Oxygen", 101.6, 290.0).unwrap();
    /// assert_eq!(o2.pressure(), 101.6);
    /// assert!(Fluid::new("Oxygen", "Oxygen", -1.0, 290.0).is_err());
    /// ```
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        pressure: f64,
        temperature: f64,
    ) -> Result<Self, FluidError> {
        let id = id.into();
        check_pressure(&id, pressure)?;
        check_temperature(&id, temperature)?;
        Ok(Self {
            id,
            name: name.into(),
            pressure,
            temperature,
        })
    }

    /// Stable key used by mixtures.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name of the substance.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pressure in kPa.
    pub fn pressure(&self) -> f64 {
        self.pressure
    }

    /// Temperature in kelvin.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Overwrite the pressure.
    pub fn set_pressure(&mut self, pressure: f64) -> Result<(), FluidError> {
        check_pressure(&self.id, pressure)?;
        self.pressure = pressure;
        Ok(())
    }

    /// Overwrite the temperature.
    pub fn set_temperature(&mut self, temperature: f64) -> Result<(), FluidError> {
        check_temperature(&self.id, temperature)?;
        self.temperature = temperature;
        Ok(())
    }

    /// Fold `other` into `self`.
    ///
    /// Pressure accumulates and temperature becomes the pressure-weighted
    /// mean. When the combined pressure is zero the weighting is undefined;
    /// the temperature is then left as it was.
    fn absorb(&mut self, other: &Fluid) -> MixOutcome {
        debug_assert_eq!(self.id, other.id);
        let combined = self.pressure + other.pressure;
        if combined == 0.0 {
            return MixOutcome::ZeroPressure;
        }
        self.temperature =
            (self.pressure * self.temperature + other.pressure * other.temperature) / combined;
        self.pressure = combined;
        MixOutcome::Mixed
    }
}

fn check_pressure(id: &str, value: f64) -> Result<(), FluidError> {
    if !value.is_finite() || value < 0.0 {
        return Err(FluidError::InvalidPressure {
            id: id.to_string(),
            value,
        });
    }
    Ok(())
}

fn check_temperature(id: &str, value: f64) -> Result<(), FluidError> {
    if !value.is_finite() {
        return Err(FluidError::InvalidTemperature {
            id: id.to_string(),
            value,
        });
    }
    Ok(())
}

/// What [`FluidMixture::add`] did with the incoming fluid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MixOutcome {
    /// No entry with that id existed; the fluid was inserted as-is.
    Inserted,
    /// An entry existed and was mixed in place.
    Mixed,
    /// An entry existed but both pressures were zero; left unchanged.
    ZeroPressure,
}

/// The fluid content of a cell group: at most one [`Fluid`] per id.
///
/// Iteration follows insertion order, so copies of a mixture replay
/// identically.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FluidMixture {
    fluids: IndexMap<String, Fluid>,
}

impl FluidMixture {
    /// An empty mixture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fluid, mixing it into an existing entry with the same id.
    pub fn add(&mut self, fluid: Fluid) -> MixOutcome {
        match self.fluids.get_mut(fluid.id()) {
            Some(existing) => {
                let outcome = existing.absorb(&fluid);
                if outcome == MixOutcome::ZeroPressure {
                    log::warn!(
                        "mixing '{}' with zero combined pressure; entry left unchanged",
                        fluid.id()
                    );
                }
                outcome
            }
            None => {
                self.fluids.insert(fluid.id.clone(), fluid);
                MixOutcome::Inserted
            }
        }
    }

    /// Look up a fluid by id.
    pub fn get(&self, id: &str) -> Option<&Fluid> {
        self.fluids.get(id)
    }

    /// Whether a fluid with this id is present.
    pub fn contains(&self, id: &str) -> bool {
        self.fluids.contains_key(id)
    }

    /// Fluids in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Fluid> {
        self.fluids.values()
    }

    /// Number of distinct fluids.
    pub fn len(&self) -> usize {
        self.fluids.len()
    }

    /// Whether the mixture holds no fluid.
    pub fn is_empty(&self) -> bool {
        self.fluids.is_empty()
    }
}

impl FromIterator<Fluid> for FluidMixture {
    fn from_iter<I: IntoIterator<Item = Fluid>>(iter: I) -> Self {
        let mut mixture = Self::new();
        for fluid in iter {
            mixture.add(fluid);
        }
        mixture
    }
}
