// Prevents additional console window on Windows in release, DO NOT REMOVE!!
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// This is the primary entry point for the QuickConvert application.
// The lib.rs file serves only as a public API for external consumers.

mod utils;
mod core;
mod editor;
mod processing;
mod results;
mod commands;

use tracing::{info, debug};
use tauri::Manager;
use crate::core::AppState;
use crate::commands::{
    add_documents, add_images, adjust_editor_zoom, apply_editor_stroke, asset_preview,
    build_archive, clear_editor, clear_results, close_editor, convert_documents, convert_images,
    editor_preview, get_theme, list_assets, list_results, open_editor, save_editor,
    save_editor_crop, set_editor_mode, set_theme, supported_targets,
};

// Import the window-vibrancy crate only on macOS
#[cfg(target_os = "macos")]
use window_vibrancy::{apply_vibrancy, NSVisualEffectMaterial};

fn main() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_thread_names(false) // Remove thread names
        .with_target(false)       // Remove module path
        .with_ansi(true)         // Keep colored output
        .with_writer(std::io::stdout)
        .compact();              // Use compact formatter instead of pretty

    subscriber.init();

    info!("=== Application Starting ===");

    let app = tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_fs::init())
        .plugin(tauri_plugin_os::init())
        .plugin(tauri_plugin_opener::init())
        .plugin(tauri_plugin_store::Builder::new().build())
        .invoke_handler(tauri::generate_handler![
            add_images,
            add_documents,
            list_assets,
            asset_preview,
            convert_images,
            convert_documents,
            supported_targets,
            open_editor,
            set_editor_mode,
            adjust_editor_zoom,
            apply_editor_stroke,
            save_editor_crop,
            clear_editor,
            save_editor,
            close_editor,
            editor_preview,
            list_results,
            build_archive,
            clear_results,
            get_theme,
            set_theme,
        ])
        .setup(|app| {
            // Session state shared by all commands
            app.manage(AppState::new());
            debug!("✓ AppState initialized");

            #[cfg(target_os = "macos")]
            {
                let window = app.get_webview_window("main").unwrap();
                info!("Applying vibrancy effect for macOS");
                // Note: This requires macOSPrivateApi=true in tauri.conf.json
                apply_vibrancy(&window, NSVisualEffectMaterial::HudWindow, None, None)
                    .expect("Failed to apply vibrancy effect on macOS");
            }

            if !processing::document::raster::font_available() {
                debug!("No system font found; document-to-PDF routes will report an error");
            }

            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    info!("Starting application event loop...");
    app.run(|_app_handle, event| {
        if let tauri::RunEvent::Exit = event {
            info!("Application exiting");
        }
    });
}
