use std::collections::BTreeMap;

/// Attribute key for the particle count
pub const ATTR_QUANTITY: &str = "particle-quantity";
/// Attribute key for the inverse attraction strength
pub const ATTR_STATICITY: &str = "particle-staticity";
/// Attribute key for the smoothing denominator
pub const ATTR_EASE: &str = "particle-ease";

pub const DEFAULT_QUANTITY: f64 = 30.0;
pub const DEFAULT_STATICITY: f64 = 50.0;
pub const DEFAULT_EASE: f64 = 50.0;

/// Raw string attributes, as they would appear on a host element
pub type Attributes = BTreeMap<String, String>;

/// Resolved particle field tunables. Immutable once the field is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSettings {
    /// Number of factory invocations per initialisation
    pub quantity: usize,
    /// Higher values weaken the pull towards the pointer
    pub staticity: f64,
    /// Smoothing denominator for the translate offset (higher = slower)
    pub ease: f64,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            quantity: quantity_from(DEFAULT_QUANTITY),
            staticity: DEFAULT_STATICITY,
            ease: DEFAULT_EASE,
        }
    }
}

impl ParticleSettings {
    /// Resolve settings from host attributes.
    ///
    /// Absent, empty, non-numeric, non-finite and zero values all fall
    /// back to the defaults without complaint.
    pub fn resolve(attributes: &Attributes) -> Self {
        let lookup = |key: &str, default: f64| {
            attributes
                .get(key)
                .and_then(|raw| parse_numeric(raw))
                .unwrap_or(default)
        };

        Self {
            quantity: quantity_from(lookup(ATTR_QUANTITY, DEFAULT_QUANTITY)),
            staticity: lookup(ATTR_STATICITY, DEFAULT_STATICITY),
            ease: lookup(ATTR_EASE, DEFAULT_EASE),
        }
    }
}

/// Parse a numeric attribute; `None` means "use the default"
fn parse_numeric(raw: &str) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok()?;
    if value.is_finite() && value != 0.0 {
        Some(value)
    } else {
        None
    }
}

/// A counting loop `for i in 0..q` over a real `q` runs `ceil(q)` times
fn quantity_from(value: f64) -> usize {
    if value > 0.0 {
        value.ceil() as usize
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_absent() {
        let settings = ParticleSettings::resolve(&Attributes::new());
        assert_eq!(settings, ParticleSettings::default());
        assert_eq!(settings.quantity, 30);
        assert_eq!(settings.staticity, 50.0);
        assert_eq!(settings.ease, 50.0);
    }

    #[test]
    fn test_explicit_values() {
        let settings = ParticleSettings::resolve(&attrs(&[
            (ATTR_QUANTITY, "120"),
            (ATTR_STATICITY, "25.5"),
            (ATTR_EASE, " 80 "),
        ]));
        assert_eq!(settings.quantity, 120);
        assert_eq!(settings.staticity, 25.5);
        assert_eq!(settings.ease, 80.0);
    }

    #[test]
    fn test_non_numeric_falls_back_to_default_not_zero() {
        let settings = ParticleSettings::resolve(&attrs(&[
            (ATTR_QUANTITY, "lots"),
            (ATTR_STATICITY, ""),
            (ATTR_EASE, "NaN"),
        ]));
        assert_eq!(settings, ParticleSettings::default());
    }

    #[test]
    fn test_zero_falls_back_to_default() {
        let settings = ParticleSettings::resolve(&attrs(&[
            (ATTR_QUANTITY, "0"),
            (ATTR_STATICITY, "0.0"),
            (ATTR_EASE, "-0"),
        ]));
        assert_eq!(settings, ParticleSettings::default());
    }

    #[test]
    fn test_fractional_and_negative_quantity() {
        let fractional = ParticleSettings::resolve(&attrs(&[(ATTR_QUANTITY, "12.5")]));
        assert_eq!(fractional.quantity, 13);

        let negative = ParticleSettings::resolve(&attrs(&[(ATTR_QUANTITY, "-4")]));
        assert_eq!(negative.quantity, 0);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let settings = ParticleSettings::resolve(&attrs(&[("particle-colour", "red")]));
        assert_eq!(settings, ParticleSettings::default());
    }
}
