use crate::chemistry::{Atom, Bond};
use serde::{Deserialize, Serialize};

// Fields are optional so that a missing field is reported as a 400 with a
// readable message instead of a deserialization rejection.

#[derive(Debug, Default, Deserialize)]
pub struct AtomsRequest {
    #[serde(default)]
    pub atoms: Option<Vec<Atom>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FunFactRequest {
    #[serde(default)]
    pub element: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeStructureRequest {
    #[serde(default)]
    pub atoms: Option<Vec<Atom>>,
    #[serde(default)]
    pub bonds: Option<Vec<Bond>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
