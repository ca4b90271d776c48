use serde::{Serialize, Deserialize};
use schemars::JsonSchema;

use crate::{Error, StorageOrder};

/// What to do with a simulation box that has non-zero off-diagonal entries.
///
/// Only orthorhombic boxes are supported by the Cu-H potential, which receives
/// the three diagonal entries of the box matrix and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BoxPolicy {
    /// Use the diagonal of the box and ignore everything else, emitting a
    /// warning when the box is tilted
    #[default]
    Diagonal,
    /// Refuse boxes with off-diagonal entries larger than the tilt tolerance
    Reject,
}

fn default_tilt_tolerance() -> f64 {
    1e-6
}

/// Options controlling how inputs are validated and converted before calling
/// the force routine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AdapterOptions {
    /// How to handle non-orthorhombic boxes
    #[serde(default)]
    pub box_policy: BoxPolicy,
    /// Off-diagonal entries with an absolute value below this are considered
    /// to be zero
    #[serde(default = "default_tilt_tolerance")]
    pub tilt_tolerance: f64,
    /// Storage order of raw matrix buffers coming from the host
    #[serde(default)]
    pub host_order: StorageOrder,
}

impl Default for AdapterOptions {
    fn default() -> AdapterOptions {
        AdapterOptions {
            box_policy: BoxPolicy::default(),
            tilt_tolerance: default_tilt_tolerance(),
            host_order: StorageOrder::default(),
        }
    }
}

impl AdapterOptions {
    /// Parse options from a JSON string
    pub fn from_json(json: &str) -> Result<AdapterOptions, Error> {
        let options: AdapterOptions = serde_json::from_str(json)?;
        options.validate()?;
        return Ok(options);
    }

    /// Check that the options values make sense
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.tilt_tolerance >= 0.0 && self.tilt_tolerance.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "tilt_tolerance must be a positive finite number, got {}", self.tilt_tolerance
            )));
        }
        Ok(())
    }
}

/// Get the JSON schema of [`AdapterOptions`], as a JSON string
pub fn options_schema() -> String {
    let schema = schemars::schema_for!(AdapterOptions);
    serde_json::to_string_pretty(&schema).expect("failed to serialize JSON schema")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = AdapterOptions::from_json("{}").unwrap();
        assert_eq!(options, AdapterOptions::default());
        assert_eq!(options.box_policy, BoxPolicy::Diagonal);
        assert_eq!(options.host_order, StorageOrder::ColumnMajor);
        assert_eq!(options.tilt_tolerance, 1e-6);
    }

    #[test]
    fn parse() {
        let options = AdapterOptions::from_json(r#"{
            "box_policy": "reject",
            "tilt_tolerance": 0.01,
            "host_order": "row_major"
        }"#).unwrap();

        assert_eq!(options.box_policy, BoxPolicy::Reject);
        assert_eq!(options.tilt_tolerance, 0.01);
        assert_eq!(options.host_order, StorageOrder::RowMajor);

        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(AdapterOptions::from_json(&json).unwrap(), options);
    }

    #[test]
    fn invalid() {
        let error = AdapterOptions::from_json(r#"{"cutoff": 5.0}"#).unwrap_err();
        assert!(matches!(error, Error::Json(_)));

        let error = AdapterOptions::from_json(r#"{"box_policy": "triclinic"}"#).unwrap_err();
        assert!(matches!(error, Error::Json(_)));

        let error = AdapterOptions::from_json(r#"{"tilt_tolerance": -1.0}"#).unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid parameter: tilt_tolerance must be a positive finite number, got -1"
        );
    }

    #[test]
    fn schema() {
        let schema = options_schema();
        assert!(schema.contains("box_policy"));
        assert!(schema.contains("host_order"));
        assert!(schema.contains("column_major"));
    }
}
