use tauri_specta::collect_commands;

use crate::modules::{bonus::commands::*, market::commands::*};

/// Every desktop command, registered once for the typed bindings.
/// `generate_handler_list!` must list the same names.
pub fn get_all_commands() -> tauri_specta::Commands<tauri::Wry> {
    collect_commands![
        // Market dashboard
        get_dashboard,
        refresh_market,
        clear_market_filter,
        scan_market,
        select_chart_item,
        get_servers,
        // Bonus and upgrade classification
        classify_bonus_text,
        get_bonus_taxonomy,
        get_upgrade_bucket,
    ]
}

#[macro_export]
macro_rules! generate_handler_list {
    () => {{
        use $crate::modules::{bonus::commands::*, market::commands::*};

        tauri::generate_handler![
            // Market dashboard
            get_dashboard,
            refresh_market,
            clear_market_filter,
            scan_market,
            select_chart_item,
            get_servers,
            // Bonus and upgrade classification
            classify_bonus_text,
            get_bonus_taxonomy,
            get_upgrade_bucket,
        ]
    }};
}
