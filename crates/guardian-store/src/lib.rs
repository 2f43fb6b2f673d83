//! Injected persistence seams: provider credentials and org notification
//! settings. The engine only consumes the traits; hosts bring their own
//! backends.

pub mod credentials;
pub mod settings;

pub use credentials::{CredentialRecord, CredentialStore, InMemoryCredentialStore};
pub use settings::{InMemorySettingsStore, NotificationSettings, SettingsStore};

#[cfg(test)]
mod tests;
