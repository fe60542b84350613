#[cfg(feature = "maud")]
pub mod maud_ext;
