use serde::{Deserialize, Serialize};

/// An atom placed on the editor grid. Identified by its index in the
/// submitted list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Atom {
    pub element: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col: Option<i64>,
}

/// Older frontends submit bare element symbols instead of objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum AtomRepr {
    Symbol(String),
    Placed {
        element: String,
        #[serde(default)]
        row: Option<i64>,
        #[serde(default)]
        col: Option<i64>,
    },
}

impl<'de> Deserialize<'de> for Atom {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let atom = match AtomRepr::deserialize(deserializer)? {
            AtomRepr::Symbol(element) => Atom::new(element),
            AtomRepr::Placed { element, row, col } => Atom {
                element: element.trim().to_string(),
                row,
                col,
            },
        };
        Ok(atom)
    }
}

impl Atom {
    pub fn new(element: impl Into<String>) -> Self {
        Self {
            element: element.into().trim().to_string(),
            row: None,
            col: None,
        }
    }

    pub fn at(element: impl Into<String>, row: i64, col: i64) -> Self {
        Self {
            row: Some(row),
            col: Some(col),
            ..Self::new(element)
        }
    }
}

/// A bond between two atoms, by index into the atom list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    pub from: usize,
    pub to: usize,
    #[serde(rename = "type")]
    pub bond_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondPrediction {
    pub bonds: Vec<Bond>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunFact {
    pub fact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoleculeInfo {
    pub chemical_formula: String,
    pub common_name: String,
    pub molar_mass_g_mol: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomAnalysis {
    pub atom_id: usize,
    pub formal_charge: i32,
    pub electrons_shared_or_given: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondAnalysis {
    pub bond_id: usize,
    #[serde(rename = "type")]
    pub bond_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureAnalysis {
    pub atoms: Vec<AtomAnalysis>,
    pub bonds: Vec<BondAnalysis>,
}
