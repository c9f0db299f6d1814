pub mod key_names;
pub mod modifier_aliases;

pub use key_names::KeyNames;
pub use modifier_aliases::ModifierAliases;
