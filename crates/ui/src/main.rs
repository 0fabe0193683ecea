use gpui::*;
use gpui_component::{Root, Theme, ThemeMode, ThemeRegistry};
use nexo_llm::{GatewayConfig, create_gateway};

use nexo_ui::app::{ChatAppShell, Quit, ToggleSidebar, WINDOW_TITLE, default_themes_path};

/// Application entry point.
///
/// Loads the gateway configuration, initializes gpui-component with a dark
/// theme (or one from ./themes), and opens the single Nexo window.
fn main() {
    tracing_subscriber::fmt::init();

    let config = GatewayConfig::load();
    tracing::info!(
        model_id = %config.settings.model_id,
        max_output_tokens = config.settings.max_output_tokens,
        api_key_configured = config.has_api_key(),
        "gateway configuration loaded"
    );
    let gateway = create_gateway(config);

    let app = Application::new().with_assets(gpui_component_assets::Assets);

    app.run(move |cx| {
        gpui_tokio_bridge::init(cx);

        // Must run before any Root is created.
        gpui_component::init(cx);

        if let Err(err) = ThemeRegistry::watch_dir(default_themes_path(), cx, |cx| {
            Theme::change(ThemeMode::Dark, None, cx);
            tracing::info!("Theme directory watch initialized");
        }) {
            tracing::warn!(error = %err, "Failed to watch themes directory, using built-in dark theme");
            Theme::change(ThemeMode::Dark, None, cx);
        }

        cx.on_action(|_: &Quit, cx| {
            cx.quit();
        });

        cx.bind_keys([
            KeyBinding::new("cmd-q", Quit, None),
            KeyBinding::new("cmd-b", ToggleSidebar, None),
        ]);

        cx.spawn(async move |cx| {
            cx.update(|cx| {
                let options = WindowOptions {
                    window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                        None,
                        size(px(1200.), px(800.)),
                        cx,
                    ))),
                    titlebar: Some(TitlebarOptions {
                        title: Some(WINDOW_TITLE.into()),
                        appears_transparent: true,
                        traffic_light_position: Some(point(px(9.), px(9.))),
                        ..Default::default()
                    }),
                    #[cfg(any(target_os = "linux", target_os = "freebsd"))]
                    window_decorations: Some(WindowDecorations::Client),
                    #[cfg(not(any(target_os = "linux", target_os = "freebsd")))]
                    window_decorations: None,
                    ..Default::default()
                };

                let opened = cx.open_window(options, |window, cx| {
                    let shell = cx.new(|cx| ChatAppShell::new(gateway, window, cx));

                    cx.new(|cx| Root::new(shell, window, cx))
                });

                match opened {
                    Ok(_) => cx.activate(true),
                    Err(error) => {
                        tracing::error!(error = %error, "failed to open main window");
                        cx.quit();
                    }
                }
            })
        })
        .detach();
    });
}
