#![doc = include_str!("../README.md")]

pub mod model {
    pub use rdf_reckon_model::*;
}

pub mod common {
    pub use rdf_reckon_common::*;
}

pub mod functions {
    pub use rdf_reckon_functions::*;
}

pub mod matching {
    pub use rdf_reckon_matching::*;
}
