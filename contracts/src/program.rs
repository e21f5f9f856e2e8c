//! The generic program: create and update only

use lasr_types::{ComputeInputs, Outputs, Result};

use crate::dispatch::{Method, Program};
use crate::handlers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseProgramMethod {
    Create,
    Update,
}

impl Method for BaseProgramMethod {
    const ALL: &'static [Self] = &[BaseProgramMethod::Create, BaseProgramMethod::Update];

    fn name(&self) -> &'static str {
        match self {
            BaseProgramMethod::Create => "create",
            BaseProgramMethod::Update => "update",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BaseProgram;

impl BaseProgram {
    pub fn new() -> Self {
        Self
    }
}

impl Program for BaseProgram {
    type Method = BaseProgramMethod;

    fn name(&self) -> &'static str {
        "program"
    }

    fn call(&self, method: BaseProgramMethod, inputs: &ComputeInputs) -> Result<Outputs> {
        match method {
            BaseProgramMethod::Create => handlers::create(inputs),
            BaseProgramMethod::Update => handlers::update(inputs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lasr_types::LasrError;
    use serde_json::json;

    #[test]
    fn test_base_program_rejects_token_methods() {
        let inputs: ComputeInputs = serde_json::from_value(json!({
            "op": "mint",
            "transaction": { "from": "0xa", "to": "0xb", "programId": "0xc", "value": "1" }
        }))
        .unwrap();
        assert_eq!(
            BaseProgram.start(&inputs).unwrap_err(),
            LasrError::UnknownMethod("mint".to_string())
        );
    }

    #[test]
    fn test_base_program_methods() {
        assert_eq!(BaseProgram.methods(), vec!["create", "update"]);
    }
}
