//! Prompt and response-schema definitions, one task per API operation.

use crate::{
    Error, Result,
    chemistry::{Atom, Bond, Formula},
};
use serde_json::{Value, json};
use std::fmt::Write;

const CHEMIST_PERSONA: &str = "You are a chemistry expert.";

const JSON_ONLY: &str = "Respond *only* with a JSON object that adheres to the provided schema. \
Do not include any other text or markdown formatting.";

/// A schema-constrained question for the model. The schema mirrors one of
/// the response types in `chemistry`, but answers are forwarded as-is.
pub trait Task: Send + Sync {
    /// Identifier used as the schema name and in logs.
    const NAME: &'static str;

    fn system_prompt(&self) -> String;
    fn user_prompt(&self) -> String;
    fn response_schema(&self) -> Value;
}

fn validate_atoms(atoms: &[Atom]) -> Result<()> {
    for (index, atom) in atoms.iter().enumerate() {
        if atom.element.is_empty() {
            return Err(Error::invalid_request(format!(
                "Atom {} has no element symbol",
                index
            )));
        }
    }
    Ok(())
}

/// One line per atom: index, symbol and grid position when known.
pub fn describe_atoms(atoms: &[Atom]) -> String {
    let mut out = String::new();
    for (index, atom) in atoms.iter().enumerate() {
        let _ = write!(out, "{}: {}", index, atom.element);
        if let (Some(row), Some(col)) = (atom.row, atom.col) {
            let _ = write!(out, " (row {}, col {})", row, col);
        }
        out.push('\n');
    }
    out
}

pub fn describe_bonds(bonds: &[Bond]) -> String {
    let mut out = String::new();
    for (index, bond) in bonds.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}: atom {} - atom {} ({})",
            index, bond.from, bond.to, bond.bond_type
        );
    }
    out
}

#[derive(Debug, Clone)]
pub struct PredictBonds {
    atoms: Vec<Atom>,
}

impl PredictBonds {
    pub fn new(atoms: Vec<Atom>) -> Result<Self> {
        if atoms.len() < 2 {
            return Err(Error::invalid_request("At least 2 atoms are required"));
        }
        validate_atoms(&atoms)?;
        Ok(Self { atoms })
    }
}

impl Task for PredictBonds {
    const NAME: &'static str = "predict_bonds";

    fn system_prompt(&self) -> String {
        format!(
            "{CHEMIST_PERSONA} A user will provide a list of atoms. \
Your task is to predict the most likely stable bonding structure for these atoms. \
{JSON_ONLY} \
The 'from' and 'to' fields in the bonds should be 0-based indices \
corresponding to the user's input atom list. \
Use 'single', 'double', 'triple' or 'ionic' for the bond type."
        )
    }

    fn user_prompt(&self) -> String {
        format!(
            "Formula: {}\nAtoms:\n{}",
            Formula::from_atoms(&self.atoms),
            describe_atoms(&self.atoms)
        )
    }

    fn response_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "bonds": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "from": {"type": "integer"},
                            "to": {"type": "integer"},
                            "type": {"type": "string"}
                        },
                        "required": ["from", "to", "type"]
                    }
                }
            },
            "required": ["bonds"]
        })
    }
}

#[derive(Debug, Clone)]
pub struct ElementFunFact {
    element: String,
}

impl ElementFunFact {
    pub fn new(element: &str) -> Result<Self> {
        let element = element.trim();
        if element.is_empty() {
            return Err(Error::invalid_request("'element' missing"));
        }
        Ok(Self {
            element: element.to_string(),
        })
    }
}

impl Task for ElementFunFact {
    const NAME: &'static str = "fun_fact";

    fn system_prompt(&self) -> String {
        format!(
            "{CHEMIST_PERSONA} Share one short, surprising and accurate fun fact \
about the chemical element the user names, suitable for a student. \
Keep it to one or two sentences. {JSON_ONLY}"
        )
    }

    fn user_prompt(&self) -> String {
        format!("Element: {}", self.element)
    }

    fn response_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "fact": {"type": "string"}
            },
            "required": ["fact"]
        })
    }
}

#[derive(Debug, Clone)]
pub struct DescribeMolecule {
    atoms: Vec<Atom>,
    formula: Formula,
}

impl DescribeMolecule {
    pub fn new(atoms: Vec<Atom>) -> Result<Self> {
        if atoms.is_empty() {
            return Err(Error::invalid_request("At least 1 atom is required"));
        }
        validate_atoms(&atoms)?;
        let formula = Formula::from_atoms(&atoms);
        Ok(Self { atoms, formula })
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }
}

impl Task for DescribeMolecule {
    const NAME: &'static str = "molecule_info";

    fn system_prompt(&self) -> String {
        format!(
            "{CHEMIST_PERSONA} The user will give you a molecule as a chemical formula \
and its list of atoms. Report the chemical formula, the most common name of the \
molecule (or a descriptive name if it has none) and its molar mass in g/mol. {JSON_ONLY}"
        )
    }

    fn user_prompt(&self) -> String {
        format!(
            "Formula: {}\nAtoms:\n{}",
            self.formula,
            describe_atoms(&self.atoms)
        )
    }

    fn response_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "chemical_formula": {"type": "string"},
                "common_name": {"type": "string"},
                "molar_mass_g_mol": {"type": "number"}
            },
            "required": ["chemical_formula", "common_name", "molar_mass_g_mol"]
        })
    }
}

#[derive(Debug, Clone)]
pub struct AnalyzeStructure {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
}

impl AnalyzeStructure {
    pub fn new(atoms: Vec<Atom>, bonds: Vec<Bond>) -> Result<Self> {
        if atoms.is_empty() {
            return Err(Error::invalid_request("'atoms' list is empty"));
        }
        if bonds.is_empty() {
            return Err(Error::invalid_request("'bonds' list is empty"));
        }
        validate_atoms(&atoms)?;

        for (index, bond) in bonds.iter().enumerate() {
            let highest = bond.from.max(bond.to);
            if highest >= atoms.len() {
                return Err(Error::invalid_request(format!(
                    "Bond {} references atom {}, but only {} atoms were submitted",
                    index,
                    highest,
                    atoms.len()
                )));
            }
        }

        Ok(Self { atoms, bonds })
    }
}

impl Task for AnalyzeStructure {
    const NAME: &'static str = "structure_analysis";

    fn system_prompt(&self) -> String {
        format!(
            "{CHEMIST_PERSONA} The user will give you a molecule drawn in an editor: \
a list of atoms and a list of bonds between them, both with 0-based ids. \
For every atom, give its formal charge and describe how many electrons it shares \
or gives away. For every bond, classify it as 'nonpolar covalent', 'polar covalent' \
or 'ionic'. Use the ids from the user's lists for 'atom_id' and 'bond_id'. {JSON_ONLY}"
        )
    }

    fn user_prompt(&self) -> String {
        format!(
            "Formula: {}\nAtoms:\n{}Bonds:\n{}",
            Formula::from_atoms(&self.atoms),
            describe_atoms(&self.atoms),
            describe_bonds(&self.bonds)
        )
    }

    fn response_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "atoms": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "atom_id": {"type": "integer"},
                            "formal_charge": {"type": "integer"},
                            "electrons_shared_or_given": {"type": "string"}
                        },
                        "required": ["atom_id", "formal_charge", "electrons_shared_or_given"]
                    }
                },
                "bonds": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "bond_id": {"type": "integer"},
                            "type": {"type": "string"}
                        },
                        "required": ["bond_id", "type"]
                    }
                }
            },
            "required": ["atoms", "bonds"]
        })
    }
}
