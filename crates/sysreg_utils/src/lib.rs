pub mod ecmascript;
pub mod collections;
pub mod option_ext;
pub mod rayon;
