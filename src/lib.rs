pub mod dictionary;
pub mod facet_enum;
pub mod format;
pub mod phase1;
pub mod polyhedron;
pub mod reverse_search;
