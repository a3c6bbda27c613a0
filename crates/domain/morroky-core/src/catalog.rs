//! The market hierarchy used by the registration form and the buyer filters.

use serde::Deserialize;

/// Id and label of the catch-all entry appended to every option list.
pub const OTHER_ID: &str = "other";
pub const OTHER_LABEL: &str = "أخرى";

const DERB_OMAR: &str = include_str!("../data/derb-omar.json");

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Street {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kissariat: Vec<Kissaria>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Kissaria {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub alleys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub id: String,
    pub name: String,
}

impl SelectOption {
    fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    fn other() -> Self {
        Self::new(OTHER_ID, OTHER_LABEL)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
pub struct LocationCatalog {
    #[serde(default)]
    streets: Vec<Street>,
}

impl LocationCatalog {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The bundled Derb Omar catalog.
    pub fn derb_omar() -> Self {
        // The bundled file is validated by `bundled_catalog_parses`.
        Self::from_json(DERB_OMAR).unwrap_or_default()
    }

    pub fn streets(&self) -> Vec<SelectOption> {
        self.streets
            .iter()
            .map(|s| SelectOption::new(&s.id, &s.name))
            .chain(std::iter::once(SelectOption::other()))
            .collect()
    }

    pub fn kissariat(&self, street_id: &str) -> Vec<SelectOption> {
        if street_id == OTHER_ID {
            return vec![SelectOption::other()];
        }
        self.street(street_id)
            .into_iter()
            .flat_map(|s| s.kissariat.iter())
            .map(|k| SelectOption::new(&k.id, &k.name))
            .chain(std::iter::once(SelectOption::other()))
            .collect()
    }

    /// Alleys are plain labels; the label doubles as the id.
    pub fn alleys(&self, street_id: &str, kissaria_id: &str) -> Vec<SelectOption> {
        if kissaria_id == OTHER_ID {
            return vec![SelectOption::new(OTHER_LABEL, OTHER_LABEL)];
        }
        self.street(street_id)
            .and_then(|s| s.kissariat.iter().find(|k| k.id == kissaria_id))
            .into_iter()
            .flat_map(|k| k.alleys.iter())
            .map(|a| SelectOption::new(a, a))
            .chain(std::iter::once(SelectOption::new(OTHER_LABEL, OTHER_LABEL)))
            .collect()
    }

    pub fn street_name(&self, street_id: &str) -> Option<String> {
        self.streets().into_iter().find(|o| o.id == street_id).map(|o| o.name)
    }

    pub fn kissaria_name(&self, street_id: &str, kissaria_id: &str) -> Option<String> {
        self.kissariat(street_id)
            .into_iter()
            .find(|o| o.id == kissaria_id)
            .map(|o| o.name)
    }

    fn street(&self, street_id: &str) -> Option<&Street> {
        self.streets.iter().find(|s| s.id == street_id)
    }
}
