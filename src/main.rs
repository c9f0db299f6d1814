use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
mod config;
mod error;
mod events;
mod geometry;
mod hotkeys;
pub mod mappings;
mod services;
mod utils;

use config::Config;
use hotkeys::HotkeyRegistry;
use services::{create_key_sampler, create_window_inspector, create_window_mover, DryRunDesktop, PlacementLoop};

#[derive(Parser, Debug)]
#[command(name = "window-placer")]
#[command(about = "Перемещает активное окно в заданную область монитора по сочетанию клавиш")]
struct Args {
    /// Путь к файлу конфигурации
    #[arg(short, long, default_value = "window-placer.toml")]
    config: String,

    /// Режим сухого запуска: клавиатура и рабочий стол эмулируются
    #[arg(long)]
    dry_run: bool,

    /// Уровень логирования (перекрывает logging.level из конфигурации)
    #[arg(long)]
    log_level: Option<String>,

    /// Проверить конфигурацию, вывести сочетания и выйти
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Загрузка конфигурации
    let config = Arc::new(Config::load(&args.config)?);

    // Инициализация системы логирования
    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    init_tracing(level, &config.logging.format)?;

    info!("Запуск window-placer v{}", env!("CARGO_PKG_VERSION"));
    info!("Конфигурация загружена из: {}", args.config);

    // Сочетания проверяются целиком: одна ошибка отменяет запуск
    let registry = Arc::new(HotkeyRegistry::from_records(&config.hotkeys)?);
    log_registry(&registry);

    if args.check {
        print_registry(&registry);
        return Ok(());
    }

    if registry.is_empty() {
        warn!("В конфигурации нет ни одного сочетания клавиш, окна перемещаться не будут");
    }

    let desktop = if args.dry_run {
        warn!("Режим сухого запуска - реальные действия отключены");
        Some(DryRunDesktop::default_layout())
    } else {
        // Проверка прав доступа
        utils::permissions::check_permissions()?;
        None
    };

    let sampler = create_key_sampler(config.clone(), registry.clone(), args.dry_run)?;
    let inspector = create_window_inspector(desktop.clone())?;
    let mover = create_window_mover(config.clone(), desktop.clone())?;

    let placement_loop = PlacementLoop::new(registry.clone(), sampler, inspector, mover)
        .with_interval(tokio::time::Duration::from_millis(config.poll.interval_ms))
        .with_skip_if_in_place(config.window.skip_if_in_place);

    info!("Все компоненты инициализированы");

    let loop_handle = tokio::spawn(async move {
        if let Err(e) = placement_loop.run().await {
            error!("Ошибка в цикле размещения: {}", e);
        }
    });

    // Ожидание сигнала завершения
    match signal::ctrl_c().await {
        Ok(()) => info!("Получен сигнал завершения (Ctrl+C)"),
        Err(err) => error!("Ошибка при ожидании сигнала завершения: {}", err),
    }

    info!("Завершение работы...");

    // Прерываем цикл: устройство закрывается в Drop
    loop_handle.abort();

    let shutdown_timeout = tokio::time::Duration::from_secs(5);
    match tokio::time::timeout(shutdown_timeout, loop_handle).await {
        Ok(_) => info!("Цикл размещения остановлен"),
        Err(_) => warn!("Таймаут при остановке цикла размещения"),
    }

    if let Some(desktop) = &desktop {
        for rect in desktop.recent_moves() {
            info!("[DRY RUN] Перемещение: {}", rect);
        }
    }

    info!("window-placer завершил работу");
    Ok(())
}

fn log_registry(registry: &HotkeyRegistry) {
    info!(
        "Загружено сочетаний клавиш: {} (различных клавиш: {})",
        registry.len(),
        registry.referenced_keys().len()
    );
    for entry in registry.iter() {
        info!("  {}", entry);
        if entry.placement.is_noop() {
            warn!("Сочетание \"{}\" не задаёт ни положения, ни размера", entry.label());
        }
    }

    for (narrow, wide) in registry.overlaps() {
        info!(
            "Сочетание \"{}\" [{}] не сработает, пока зажато \"{}\" [{}]",
            narrow.label(),
            narrow.combination,
            wide.label(),
            wide.combination
        );
    }
}

fn print_registry(registry: &HotkeyRegistry) {
    println!("Конфигурация корректна, сочетаний: {}", registry.len());
    // От самых конкретных к менее конкретным, в порядке проверки
    for entry in registry.iter().rev() {
        println!("{:>24}  {}", entry.combination.to_string(), entry.placement);
    }
}

fn init_tracing(level: &str, format: &str) -> Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        "full" => registry.with(fmt::layer()).init(),
        _ => registry.with(fmt::layer().compact()).init(),
    }

    Ok(())
}
