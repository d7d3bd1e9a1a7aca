use super::*;
use crate::math::angular::parse_sexagesimal;

/// The parameters of a projection definition, type checked against
/// the gamut of the projection, and with defaults filled in.
#[derive(Debug)]
pub struct ParsedParameters {
    pub name: String,

    pub boolean: BTreeSet<&'static str>,
    pub natural: BTreeMap<&'static str, usize>,
    pub real: BTreeMap<&'static str, f64>,
    pub text: BTreeMap<&'static str, String>,
    pub ignored: Vec<String>,
    pub given: BTreeMap<String, String>,
}

// Accessors
impl ParsedParameters {
    pub fn boolean(&self, key: &str) -> bool {
        self.boolean.contains(key)
    }
    pub fn natural(&self, key: &str) -> Result<usize, Error> {
        if let Some(value) = self.natural.get(key) {
            return Ok(*value);
        }
        Err(Error::MissingParam(key.to_string()))
    }
    pub fn real(&self, key: &str) -> Result<f64, Error> {
        if let Some(value) = self.real.get(key) {
            return Ok(*value);
        }
        Err(Error::MissingParam(key.to_string()))
    }
    pub fn text(&self, key: &str) -> Result<String, Error> {
        if let Some(value) = self.text.get(key) {
            return Ok(value.to_string());
        }
        Err(Error::MissingParam(key.to_string()))
    }
    pub fn ignored(&self) -> Vec<String> {
        self.ignored.clone()
    }

    /// The ellipsoid given by the `ellps` parameter: either a builtin
    /// name, or a user defined `a,rf` pair (rf = 0 for a sphere)
    pub fn ellps(&self) -> Result<Ellipsoid, Error> {
        let name = self.text("ellps")?;
        if let Some((a, rf)) = name.split_once(',') {
            let (Ok(a), Ok(rf)) = (a.trim().parse::<f64>(), rf.trim().parse::<f64>()) else {
                warn!("Cannot parse ellps={name} as a,rf");
                return Err(Error::BadParam("ellps".to_string(), name));
            };
            let f = if rf == 0. { 0. } else { 1. / rf };
            return Ellipsoid::new(a, f);
        }
        Ellipsoid::named(&name)
    }
}

impl ParsedParameters {
    pub fn new(definition: &str, gamut: &[OpParameter]) -> Result<ParsedParameters, Error> {
        let locals = super::split_into_parameters(definition);
        let mut boolean = BTreeSet::<&'static str>::new();
        let mut natural = BTreeMap::<&'static str, usize>::new();
        let mut real = BTreeMap::<&'static str, f64>::new();
        let mut text = BTreeMap::<&'static str, String>::new();

        // Try to locate all accepted parameters, type check, and place them into
        // their proper bins
        for p in gamut {
            match *p {
                OpParameter::Flag { key } => {
                    if let Some(value) = locals.get(key) {
                        if value.is_empty() || value.to_lowercase() == "true" {
                            boolean.insert(key);
                            continue;
                        }
                        warn!("Cannot parse {key}={value} as a boolean constant!");
                        return Err(Error::BadParam(key.to_string(), value.to_string()));
                    }
                    // Flags are always optional (i.e. implicitly false when not given)
                    continue;
                }

                OpParameter::Natural { key, default } => {
                    if let Some(value) = locals.get(key) {
                        if let Ok(v) = value.parse::<usize>() {
                            natural.insert(key, v);
                            continue;
                        }
                        warn!("Cannot parse {key}={value} as a natural number!");
                        return Err(Error::BadParam(key.to_string(), value.to_string()));
                    }

                    if let Some(value) = default {
                        natural.insert(key, value);
                        continue;
                    }

                    error!("Missing required parameter '{key}'");
                    return Err(Error::MissingParam(key.to_string()));
                }

                OpParameter::Real { key, default } => {
                    if let Some(value) = locals.get(key) {
                        if let Ok(v) = value.parse::<f64>() {
                            real.insert(key, v);
                            continue;
                        }
                        if let Some(v) = parse_sexagesimal(value) {
                            real.insert(key, v);
                            continue;
                        }
                        warn!("Cannot parse {key}={value} as a real number");
                        return Err(Error::BadParam(key.to_string(), value.to_string()));
                    }

                    if let Some(value) = default {
                        real.insert(key, value);
                        continue;
                    }

                    error!("Missing required parameter '{key}'");
                    return Err(Error::MissingParam(key.to_string()));
                }

                OpParameter::Text { key, default } => {
                    if let Some(value) = locals.get(key) {
                        text.insert(key, value.to_string());
                        continue;
                    }

                    if let Some(value) = default {
                        text.insert(key, value.to_string());
                        continue;
                    }

                    error!("Missing required parameter '{key}'");
                    return Err(Error::MissingParam(key.to_string()));
                }
            };
        }

        let name = locals
            .get("name")
            .unwrap_or(&"unknown".to_string())
            .to_string();

        // Params specified, but not in the gamut
        let ignored: Vec<String> = locals
            .keys()
            .filter(|k| *k != "name" && !gamut.iter().any(|p| p.key() == k.as_str()))
            .cloned()
            .collect();
        for key in &ignored {
            warn!("{name}: ignoring unknown parameter '{key}'");
        }

        Ok(ParsedParameters {
            name,
            boolean,
            natural,
            real,
            text,
            ignored,
            given: locals,
        })
    }
}

// ----- T E S T S ------------------------------------------------------------------
