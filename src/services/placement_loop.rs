use crate::debug_if_enabled;
use crate::error::{PlacerError, Result};
use crate::geometry::{GeometryResolver, Rect};
use crate::hotkeys::HotkeyRegistry;
use std::fmt;
use std::sync::Arc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use super::key_sampler::KeySampler;
use super::window_inspector::WindowInspector;
use super::window_mover::WindowMover;

// Пауза после ошибки опроса клавиатуры
const SAMPLER_BACKOFF: Duration = Duration::from_millis(100);

/// Результат одного опроса
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Ни одно сочетание не зажато
    Idle,
    /// Сочетание найдено, но окно или монитор недоступны либо перемещение не удалось
    Skipped { hotkey: String },
    /// Окно уже стоит в нужном прямоугольнике
    AlreadyPlaced { hotkey: String },
    Placed { hotkey: String, target: Rect },
}

impl fmt::Display for TickOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickOutcome::Idle => write!(f, "idle"),
            TickOutcome::Skipped { hotkey } => write!(f, "\"{}\" пропущено", hotkey),
            TickOutcome::AlreadyPlaced { hotkey } => write!(f, "\"{}\" уже на месте", hotkey),
            TickOutcome::Placed { hotkey, target } => write!(f, "\"{}\" -> {}", hotkey, target),
        }
    }
}

/// Цикл: опрос клавиш → выбор сочетания → расчёт прямоугольника → перемещение окна
pub struct PlacementLoop {
    registry: Arc<HotkeyRegistry>,
    sampler: Box<dyn KeySampler + Send>,
    inspector: Box<dyn WindowInspector + Send + Sync>,
    mover: Box<dyn WindowMover + Send + Sync>,
    interval: Duration,
    skip_if_in_place: bool,
}

impl PlacementLoop {
    pub fn new(
        registry: Arc<HotkeyRegistry>,
        sampler: Box<dyn KeySampler + Send>,
        inspector: Box<dyn WindowInspector + Send + Sync>,
        mover: Box<dyn WindowMover + Send + Sync>,
    ) -> Self {
        Self {
            registry,
            sampler,
            inspector,
            mover,
            interval: Duration::from_millis(50),
            skip_if_in_place: true,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_skip_if_in_place(mut self, skip: bool) -> Self {
        self.skip_if_in_place = skip;
        self
    }

    /// Один опрос. Ошибка возвращается только если не удалось прочитать клавиатуру.
    pub async fn tick(&mut self) -> Result<TickOutcome> {
        let keys = self.sampler.sample().await?;

        let Some(entry) = self.registry.resolve(&keys.keys) else {
            return Ok(TickOutcome::Idle);
        };
        let hotkey = entry.label();
        debug_if_enabled!("Зажато {} -> {}", keys, entry);

        let snapshot = match self.inspector.inspect().await {
            Ok(snapshot) => snapshot,
            Err(PlacerError::EnvironmentUnavailable(reason)) => {
                debug!("Сочетание \"{}\" пропущено: {}", hotkey, reason);
                return Ok(TickOutcome::Skipped { hotkey });
            }
            Err(e) => {
                warn!("Не удалось получить активное окно для \"{}\": {}", hotkey, e);
                return Ok(TickOutcome::Skipped { hotkey });
            }
        };

        let window = &snapshot.window;
        let target = GeometryResolver::compute_rect(&entry.placement, &window.bounds, &snapshot.monitor);

        if self.skip_if_in_place && target == window.bounds.rect {
            debug_if_enabled!("Окно {} уже на месте для \"{}\"", window, hotkey);
            return Ok(TickOutcome::AlreadyPlaced { hotkey });
        }

        if let Err(e) = self.mover.move_window(window, target).await {
            warn!("Не удалось переместить окно {}: {}", window, e);
            return Ok(TickOutcome::Skipped { hotkey });
        }

        info!("\"{}\": окно {} -> {}", hotkey, window, target);
        Ok(TickOutcome::Placed { hotkey, target })
    }

    /// Работает, пока задачу не прервут
    pub async fn run(mut self) -> Result<()> {
        info!(
            "Цикл размещения запущен: {} сочетаний, интервал {:?}",
            self.registry.len(),
            self.interval
        );

        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            if let Err(e) = self.tick().await {
                error!("Ошибка опроса клавиатуры: {}", e);
                tokio::time::sleep(SAMPLER_BACKOFF).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HotkeyRecord, LocationRecord, SizeRecord, SizeValue};
    use crate::events::{KeySnapshot, PressedKeys};
    use crate::mappings::KeyNames;
    use crate::services::key_sampler::dry_run::DryRunKeySampler;
    use crate::services::window_inspector::dry_run::DryRunInspector;
    use crate::services::window_mover::dry_run::DryRunMover;
    use crate::services::DryRunDesktop;

    struct FailingSampler;

    #[async_trait::async_trait]
    impl KeySampler for FailingSampler {
        async fn sample(&mut self) -> Result<KeySnapshot> {
            Err(PlacerError::Io(std::io::Error::other("устройство отключено")))
        }
    }

    struct FailingMover;

    #[async_trait::async_trait]
    impl WindowMover for FailingMover {
        async fn move_window(&self, _window: &crate::events::ActiveWindow, _target: Rect) -> Result<()> {
            Err(PlacerError::EnvironmentUnavailable("wmctrl не найден".to_string()))
        }
    }

    fn right_half_registry() -> Arc<HotkeyRegistry> {
        let record = HotkeyRecord {
            name: "right half".to_string(),
            keys: vec!["super".to_string(), "right".to_string()],
            location: LocationRecord {
                vertical: Some("top".to_string()),
                horizontal: Some("right".to_string()),
            },
            size: SizeRecord {
                vertical: Some(SizeValue::Number(100)),
                horizontal: Some(SizeValue::Number(50)),
            },
        };
        Arc::new(HotkeyRegistry::from_records(&[record]).unwrap())
    }

    fn pressed(names: &[&str]) -> PressedKeys {
        names.iter().map(|n| KeyNames::lookup(n).unwrap()).collect()
    }

    fn placement_loop(script: Vec<PressedKeys>, desktop: &DryRunDesktop) -> PlacementLoop {
        PlacementLoop::new(
            right_half_registry(),
            Box::new(DryRunKeySampler::new(script)),
            Box::new(DryRunInspector::new(desktop.clone())),
            Box::new(DryRunMover::new(desktop.clone())),
        )
    }

    #[tokio::test]
    async fn test_idle_without_hotkey() {
        let desktop = DryRunDesktop::default_layout();
        let mut placement = placement_loop(vec![pressed(&["super"])], &desktop);

        assert_eq!(placement.tick().await.unwrap(), TickOutcome::Idle);
        assert!(desktop.recent_moves().is_empty());
    }

    #[tokio::test]
    async fn test_places_then_reports_in_place() {
        let desktop = DryRunDesktop::default_layout();
        let mut placement = placement_loop(vec![pressed(&["super", "right"])], &desktop);

        // Рабочая область 1920x1040, рамка 0/7/7/7
        let expected = Rect::from_xywh(953, 0, 974, 1047);
        assert_eq!(
            placement.tick().await.unwrap(),
            TickOutcome::Placed {
                hotkey: "right half".to_string(),
                target: expected
            }
        );
        assert_eq!(
            placement.tick().await.unwrap(),
            TickOutcome::AlreadyPlaced {
                hotkey: "right half".to_string()
            }
        );
        assert_eq!(desktop.recent_moves(), vec![expected]);
    }

    #[tokio::test]
    async fn test_repeats_move_when_skip_disabled() {
        let desktop = DryRunDesktop::default_layout();
        let mut placement =
            placement_loop(vec![pressed(&["super", "right"])], &desktop).with_skip_if_in_place(false);

        placement.tick().await.unwrap();
        placement.tick().await.unwrap();
        assert_eq!(desktop.recent_moves().len(), 2);
    }

    #[tokio::test]
    async fn test_skipped_without_window() {
        let desktop = DryRunDesktop::without_window();
        let mut placement = placement_loop(vec![pressed(&["super", "right"])], &desktop);

        assert_eq!(
            placement.tick().await.unwrap(),
            TickOutcome::Skipped {
                hotkey: "right half".to_string()
            }
        );
        assert!(desktop.recent_moves().is_empty());
    }

    #[tokio::test]
    async fn test_mover_failure_is_skipped() {
        let desktop = DryRunDesktop::default_layout();
        let mut placement = PlacementLoop::new(
            right_half_registry(),
            Box::new(DryRunKeySampler::new(vec![pressed(&["super", "right"])])),
            Box::new(DryRunInspector::new(desktop.clone())),
            Box::new(FailingMover),
        );

        assert!(matches!(placement.tick().await.unwrap(), TickOutcome::Skipped { .. }));
    }

    #[tokio::test]
    async fn test_sampler_failure_propagates() {
        let desktop = DryRunDesktop::default_layout();
        let mut placement = PlacementLoop::new(
            right_half_registry(),
            Box::new(FailingSampler),
            Box::new(DryRunInspector::new(desktop.clone())),
            Box::new(DryRunMover::new(desktop)),
        );

        assert!(matches!(placement.tick().await, Err(PlacerError::Io(_))));
    }
}
