#[cfg(feature = "desktop")]
pub mod commands;
pub mod modules;
pub mod shared;

#[cfg(feature = "desktop")]
use commands::get_all_commands;
#[cfg(feature = "desktop")]
use modules::{
    bonus::TaxonomyLoader,
    market::{MarketApiClient, MarketDataSource, MarketService},
};
#[cfg(feature = "desktop")]
use shared::AppConfig;
#[cfg(feature = "desktop")]
use std::sync::Arc;
#[cfg(feature = "desktop")]
use tauri::Manager;

// tauri-specta: generate TS types + typed command client from Rust commands
#[cfg(feature = "desktop")]
use specta_typescript::{BigIntExportBehavior, Typescript};
#[cfg(feature = "desktop")]
use tauri_specta::Builder as SpectaBuilder;

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let specta_builder = SpectaBuilder::<tauri::Wry>::new().commands(get_all_commands());

    // Listing ids and prices are i64; the dashboard reads them as plain numbers
    #[cfg(debug_assertions)]
    if let Err(e) = specta_builder.export(
        Typescript::default().bigint(BigIntExportBehavior::Number),
        "../src/types/bindings.ts",
    ) {
        eprintln!("Warning: Failed to export TypeScript bindings: {}", e);
    }

    tauri::Builder::default()
        .invoke_handler(crate::generate_handler_list!())
        .plugin(tauri_plugin_opener::init())
        .plugin(
            tauri_plugin_log::Builder::new()
                .clear_targets()
                .targets([tauri_plugin_log::Target::new(
                    tauri_plugin_log::TargetKind::Stdout,
                )])
                .level(log::LevelFilter::Debug)
                .level_for("reqwest", log::LevelFilter::Warn)
                .level_for("hyper", log::LevelFilter::Warn)
                .format(|out, message, record| {
                    let target = record.target();

                    if let Some(rest) = target.strip_prefix("pazar_lib::modules::") {
                        // pazar_lib::modules::market::application::service -> [LEVEL] [BACKEND] [market] message
                        let module = rest.split("::").next().unwrap_or("");
                        out.finish(format_args!(
                            "[{}] [BACKEND] [{}] {}",
                            record.level(),
                            module,
                            message
                        ))
                    } else if target.starts_with("pazar_lib") {
                        out.finish(format_args!("[{}] [BACKEND] {}", record.level(), message))
                    } else if target.starts_with("webview:") {
                        out.finish(format_args!("[{}] {}", record.level(), message))
                    } else {
                        out.finish(format_args!(
                            "[{}] [{}] {}",
                            record.level(),
                            target,
                            message
                        ))
                    }
                })
                .build(),
        )
        .setup(move |app| {
            specta_builder.mount_events(app);

            let config = AppConfig::from_env()?;
            let taxonomy = Arc::new(TaxonomyLoader::load_or_default(&config));
            let source: Arc<dyn MarketDataSource> = Arc::new(MarketApiClient::new(&config)?);
            let market_service = Arc::new(MarketService::new(
                source,
                Arc::clone(&taxonomy),
                &config,
            ));

            // First load, as the dashboard does on open
            let initial = Arc::clone(&market_service);
            tauri::async_runtime::spawn(async move {
                if let Err(e) = initial.refresh(None, None).await {
                    log::warn!("Initial market refresh failed: {}", e);
                }
            });

            app.manage(taxonomy);
            app.manage(market_service);

            Ok(())
        })
        .run(tauri::generate_context!())
        .unwrap_or_else(|e| {
            eprintln!("Failed to run Tauri application: {}", e);
            std::process::exit(1);
        });
}
