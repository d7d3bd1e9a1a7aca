//! Projection definitions, and the direction-bound batch [Operator]
mod parameter;
mod parsed_parameters;

use crate::internal::*;
use crate::projection;

pub use parameter::OpParameter;
pub use parsed_parameters::ParsedParameters;

/// A projection bound to a fixed direction, operating on
/// [Coor2D]s, singly or in bulk.
///
/// In the *forward* direction of an operator, geographic input
/// (longitude, latitude in degrees) is projected. An operator built
/// with the `inv` flag swaps the roles of the two sides.
#[derive(Debug)]
pub struct Operator {
    definition: String,
    projection: Box<dyn Projection>,
    direction: Direction,
}

impl Operator {
    /// Instantiate from a definition, e.g. `"utm zone=32 south"`.
    /// The first word names the projection, the remaining words are
    /// parameters of the form `key=value`, or flags.
    pub fn new(definition: &str) -> Result<Operator, Error> {
        let definition = definition.trim();
        let Some(name) = definition.split_whitespace().next() else {
            return Err(Error::Syntax("empty definition".to_string()));
        };
        let (gamut, constructor) = projection::builtin(name)?;
        let params = ParsedParameters::new(definition, gamut)?;
        let projection = constructor(&params)?;
        let direction = if params.boolean("inv") {
            Direction::Inv
        } else {
            Direction::Fwd
        };
        debug!("{name}: {}", projection.description());
        Ok(Operator {
            definition: definition.to_string(),
            projection,
            direction,
        })
    }

    /// Wrap an already instantiated projection
    #[must_use]
    pub fn from_projection(projection: Box<dyn Projection>, direction: Direction) -> Operator {
        Operator {
            definition: projection.name().to_string(),
            projection,
            direction,
        }
    }

    #[must_use]
    pub fn definition(&self) -> &str {
        &self.definition
    }

    #[must_use]
    pub fn projection(&self) -> &dyn Projection {
        self.projection.as_ref()
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Transform a single coordinate in the direction of the operator
    pub fn transform(&self, operand: Coor2D) -> Result<Coor2D, Error> {
        self.run(operand, self.direction)
    }

    /// Transform a single coordinate against the direction of the operator
    pub fn inv_transform(&self, operand: Coor2D) -> Result<Coor2D, Error> {
        self.run(operand, !self.direction)
    }

    /// Transform all `operands` in place. `Fwd` follows the direction of
    /// the operator, `Inv` goes against it. Coordinates that cannot be
    /// transformed are stomped to NaN. Returns the number of successes.
    pub fn apply(&self, operands: &mut [Coor2D], direction: Direction) -> usize {
        let direction = match direction {
            Direction::Fwd => self.direction,
            Direction::Inv => !self.direction,
        };

        let mut successes = 0_usize;
        for coord in operands {
            match self.run(*coord, direction) {
                Ok(result) => {
                    *coord = result;
                    successes += 1;
                }
                Err(e) => {
                    trace!("{}: {e}", self.projection.name());
                    *coord = Coor2D::nan();
                }
            }
        }
        successes
    }

    // The absolute direction: Fwd projects, Inv unprojects
    fn run(&self, operand: Coor2D, direction: Direction) -> Result<Coor2D, Error> {
        match direction {
            Direction::Fwd => Ok(self.projection.to_projected(operand.into())?.into()),
            Direction::Inv => Ok(self.projection.to_geographic(operand.into())?.into()),
        }
    }
}

// ----- A N C I L L A R Y   F U N C T I O N S -----------------------------------------

/// Split a definition into a map of key/value pairs. Flags get the value
/// "true", and the leading word is stored under the key "name".
pub fn split_into_parameters(definition: &str) -> BTreeMap<String, String> {
    // Conflate contiguous whitespace, then remove whitespace around {"=", ","}
    let definition = definition.trim().to_string();
    let elements: Vec<_> = definition.split_whitespace().collect();
    let definition = elements
        .join(" ")
        .replace("= ", "=")
        .replace(", ", ",")
        .replace(" =", "=")
        .replace(" ,", ",");

    let mut params = BTreeMap::new();
    for element in definition.split_whitespace() {
        // Split a key=value-pair into key and value parts
        let mut parts: Vec<&str> = element.trim().splitn(2, '=').collect();
        // Add a boolean true part, to make sure we have a value, even for flags
        parts.push("true");

        // If the first arg is a key-without-value, it is the name of the projection
        if params.is_empty() && parts.len() == 2 {
            params.insert(String::from("name"), String::from(parts[0]));
            continue;
        }

        params.insert(String::from(parts[0]), String::from(parts[1]));
    }

    params
}

// ----- T E S T S ------------------------------------------------------------------
