//! Response envelope returned to the host runtime

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::inputs::ComputeInputs;
use crate::instruction::Instruction;

/// The call echo plus the instructions to apply, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outputs {
    compute_inputs: ComputeInputs,
    instructions: Vec<Instruction>,
}

impl Outputs {
    pub fn new(compute_inputs: ComputeInputs, instructions: Vec<Instruction>) -> Self {
        Self {
            compute_inputs,
            instructions,
        }
    }

    pub fn compute_inputs(&self) -> &ComputeInputs {
        &self.compute_inputs
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::{Address, AddressOrNamespace};
    use crate::builders::TransferInstructionBuilder;
    use serde_json::json;

    #[test]
    fn test_envelope_preserves_order_and_echo() {
        let inputs: ComputeInputs = serde_json::from_value(json!({
            "op": "mint",
            "transaction": { "from": "0xa", "to": "0xb", "programId": "0xc", "value": "7" }
        }))
        .unwrap();

        let transfer = |amount: u64| {
            TransferInstructionBuilder::new()
                .transfer_from(AddressOrNamespace::this())
                .transfer_to(Address::new("0xa").unwrap())
                .amount(amount)
                .token_address(Address::new("0xc").unwrap())
                .build()
                .unwrap()
        };

        let outputs = Outputs::new(inputs, vec![transfer(2), transfer(1)]);
        let value = outputs.to_value().unwrap();

        assert_eq!(value["computeInputs"]["op"], json!("mint"));
        assert_eq!(value["computeInputs"]["transaction"]["value"], json!("7"));
        assert_eq!(value["instructions"][0]["amount"], json!("0x2"));
        assert_eq!(value["instructions"][1]["amount"], json!("0x1"));

        let back: Outputs = serde_json::from_str(&outputs.to_json().unwrap()).unwrap();
        assert_eq!(back, outputs);
    }
}
