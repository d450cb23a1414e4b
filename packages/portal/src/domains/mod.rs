// Domain modules - each owns one part of the member portal save workflow

pub mod addresses;
pub mod sections;
pub mod settings;
