mod termination_model;

pub use termination_model::TerminationModel;
