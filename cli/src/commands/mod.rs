pub mod amount;
pub mod methods;
pub mod run;
