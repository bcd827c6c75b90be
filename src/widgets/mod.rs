pub mod carousel;
pub mod status;
pub mod strip;
