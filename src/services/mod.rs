pub mod dry_desktop;
pub mod key_sampler;
pub mod placement_loop;
pub mod window_inspector;
pub mod window_mover;

pub use dry_desktop::DryRunDesktop;
pub use key_sampler::create_key_sampler;
pub use placement_loop::PlacementLoop;
pub use window_inspector::create_window_inspector;
pub use window_mover::create_window_mover;
