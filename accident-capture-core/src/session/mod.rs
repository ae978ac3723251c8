pub mod form;
pub mod orchestrator;
