use super::prompts::{AnalyzeStructure, DescribeMolecule, ElementFunFact, PredictBonds, Task};
use crate::{
    Error, Result,
    chemistry::{Atom, Bond},
    llm::{GenerationRequest, LlmClient},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Runs chemistry tasks against the hosted model.
///
/// Answers are forwarded as the model produced them: the schema is requested
/// from the provider but the output is only checked to be a JSON object.
pub struct Assistant {
    llm_client: Arc<dyn LlmClient>,
    temperature: Option<f32>,
}

impl Assistant {
    pub fn new(llm_client: Arc<dyn LlmClient>, temperature: Option<f32>) -> Self {
        Self {
            llm_client,
            temperature,
        }
    }

    pub async fn run<T: Task>(&self, task: &T) -> Result<Value> {
        let request = GenerationRequest {
            system_prompt: task.system_prompt(),
            user_prompt: task.user_prompt(),
            response_schema: task.response_schema(),
            schema_name: T::NAME.to_string(),
            temperature: self.temperature,
        };

        debug!("Running task {}: {}", T::NAME, request.user_prompt);

        let text = self.llm_client.generate_json(request).await?;
        let output = parse_output(&text)?;

        info!("Task {} completed", T::NAME);
        Ok(output)
    }

    pub async fn predict_bonds(&self, atoms: Vec<Atom>) -> Result<Value> {
        self.run(&PredictBonds::new(atoms)?).await
    }

    pub async fn fun_fact(&self, element: &str) -> Result<Value> {
        self.run(&ElementFunFact::new(element)?).await
    }

    pub async fn molecule_info(&self, atoms: Vec<Atom>) -> Result<Value> {
        self.run(&DescribeMolecule::new(atoms)?).await
    }

    pub async fn analyze_structure(&self, atoms: Vec<Atom>, bonds: Vec<Bond>) -> Result<Value> {
        self.run(&AnalyzeStructure::new(atoms, bonds)?).await
    }
}

/// Parses model output as a JSON object, tolerating a surrounding markdown
/// code fence.
pub fn parse_output(text: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(strip_code_fence(text))?;
    if !value.is_object() {
        return Err(Error::llm(format!(
            "Model returned JSON that is not an object: {}",
            value
        )));
    }
    Ok(value)
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    // Drop an info string such as `json` on the opening fence line.
    match inner.split_once('\n') {
        Some((info, body)) if !info.trim_start().starts_with(['{', '[']) => body.trim(),
        _ => inner
            .trim_start()
            .trim_start_matches(|c: char| c.is_ascii_alphabetic())
            .trim(),
    }
}
