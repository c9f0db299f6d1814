pub(crate) mod dry_run;
mod evdev_sampler;
mod r#trait;

pub use self::r#trait::{create_key_sampler, KeySampler};
