pub mod db;
pub mod entry;
pub mod logging;
pub mod navigation;
pub mod session;
pub mod shell;

#[cfg(feature = "uniffi")]
pub mod runtime;

#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
#[cfg(feature = "uniffi")]
pub mod uniffi_interface;
