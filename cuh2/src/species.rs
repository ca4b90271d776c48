//! Classification of atoms into the two species known to the Cu-H potential.
use ndarray::ArrayView1;
use serde::{Serialize, Deserialize};

use crate::Error;

/// Atomic species supported by the Cu-H potential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    Copper,
    Hydrogen,
}

impl Species {
    /// Get the species corresponding to the given atomic number, if it is
    /// one of the supported ones
    pub fn from_atomic_number(atomic_number: i32) -> Option<Species> {
        match atomic_number {
            29 => Some(Species::Copper),
            1 => Some(Species::Hydrogen),
            _ => None,
        }
    }

    /// Get the atomic number of this species
    pub fn atomic_number(self) -> i32 {
        match self {
            Species::Copper => 29,
            Species::Hydrogen => 1,
        }
    }
}

/// Number of atoms of each species in a configuration.
///
/// The native routine expects these as a two-element array, copper first and
/// hydrogen second, regardless of the order atoms appear in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpeciesCounts {
    pub copper: usize,
    pub hydrogen: usize,
}

impl SpeciesCounts {
    /// Count the atoms of each species in `atomic_numbers`.
    ///
    /// Any atomic number other than 29 or 1 aborts the classification with
    /// `Error::InvalidValue`.
    pub fn classify(atomic_numbers: ArrayView1<'_, i32>) -> Result<SpeciesCounts, Error> {
        let mut counts = SpeciesCounts::default();
        for (atom, &atomic_number) in atomic_numbers.iter().enumerate() {
            match Species::from_atomic_number(atomic_number) {
                Some(Species::Copper) => counts.copper += 1,
                Some(Species::Hydrogen) => counts.hydrogen += 1,
                None => {
                    return Err(Error::InvalidValue {
                        name: "atomic numbers",
                        message: format!(
                            "atom {} has atomic number {}, only 29 (Cu) and 1 (H) are supported",
                            atom, atomic_number
                        ),
                    });
                }
            }
        }
        return Ok(counts);
    }

    /// Total number of atoms
    pub fn total(&self) -> usize {
        self.copper + self.hydrogen
    }

    /// Get the counts in the order used by the native routine
    pub fn as_array(&self) -> [usize; 2] {
        [self.copper, self.hydrogen]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr1;

    #[test]
    fn atomic_numbers() {
        assert_eq!(Species::from_atomic_number(29), Some(Species::Copper));
        assert_eq!(Species::from_atomic_number(1), Some(Species::Hydrogen));
        assert_eq!(Species::from_atomic_number(8), None);
        assert_eq!(Species::from_atomic_number(-29), None);

        assert_eq!(Species::Copper.atomic_number(), 29);
        assert_eq!(Species::Hydrogen.atomic_number(), 1);
    }

    #[test]
    fn single_species() {
        let copper = arr1(&[29, 29, 29, 29]);
        let counts = SpeciesCounts::classify(copper.view()).unwrap();
        assert_eq!(counts, SpeciesCounts { copper: 4, hydrogen: 0 });
        assert_eq!(counts.total(), 4);

        let hydrogen = arr1(&[1, 1]);
        let counts = SpeciesCounts::classify(hydrogen.view()).unwrap();
        assert_eq!(counts, SpeciesCounts { copper: 0, hydrogen: 2 });
        assert_eq!(counts.total(), 2);
    }

    #[test]
    fn copper_always_first() {
        let atomic_numbers = arr1(&[1, 1, 1, 29]);
        let counts = SpeciesCounts::classify(atomic_numbers.view()).unwrap();
        assert_eq!(counts.as_array(), [1, 3]);
    }

    #[test]
    fn empty() {
        let atomic_numbers = arr1::<i32>(&[]);
        let counts = SpeciesCounts::classify(atomic_numbers.view()).unwrap();
        assert_eq!(counts.total(), 0);
    }

    #[test]
    fn unsupported_species() {
        let atomic_numbers = arr1(&[29, 1, 26, 1]);
        let error = SpeciesCounts::classify(atomic_numbers.view()).unwrap_err();
        match error {
            Error::InvalidValue { name, message } => {
                assert_eq!(name, "atomic numbers");
                assert!(message.contains("atom 2 has atomic number 26"));
            }
            _ => panic!("expected an invalid value error, got {:?}", error),
        }
    }
}
