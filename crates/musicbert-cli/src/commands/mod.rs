pub mod compound;
pub mod index;
pub mod vocab;
