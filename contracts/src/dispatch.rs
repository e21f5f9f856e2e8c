//! Operation-name dispatch shared by every program

use std::fmt::Debug;

use lasr_types::{ComputeInputs, LasrError, Outputs, Result};

/// The closed set of operations a program supports.
pub trait Method: Copy + Debug + 'static {
    const ALL: &'static [Self];

    /// Wire name, as sent in `op`.
    fn name(&self) -> &'static str;

    fn parse(op: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|method| method.name() == op)
            .ok_or_else(|| LasrError::UnknownMethod(op.to_string()))
    }
}

pub trait Program {
    type Method: Method;

    fn name(&self) -> &'static str;

    /// Run one already-resolved method.
    fn call(&self, method: Self::Method, inputs: &ComputeInputs) -> Result<Outputs>;

    /// Resolve the call's op to a method and run it.
    fn execute_method(&self, inputs: &ComputeInputs) -> Result<Outputs> {
        let op = inputs.op()?;
        let method = match Self::Method::parse(op) {
            Ok(method) => method,
            Err(err) => {
                tracing::warn!(program = self.name(), op, "Unknown method");
                return Err(err);
            }
        };

        tracing::debug!(program = self.name(), ?method, "Dispatching call");
        let result = self.call(method, inputs);
        match &result {
            Ok(outputs) => tracing::debug!(
                program = self.name(),
                ?method,
                instructions = outputs.instructions().len(),
                "Call produced instructions"
            ),
            Err(err) => tracing::warn!(
                program = self.name(),
                ?method,
                error = %err,
                "Call rejected"
            ),
        }
        result
    }

    /// Entry point for the host runtime.
    fn start(&self, inputs: &ComputeInputs) -> Result<Outputs> {
        self.execute_method(inputs)
    }

    fn methods(&self) -> Vec<&'static str> {
        Self::Method::ALL.iter().map(Method::name).collect()
    }
}
